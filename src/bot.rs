// src/bot.rs

//! Telegram front end.
//!
//! Parses commands and button taps, forwards them to [`PriceHandler`] and
//! delivers the resulting [`Reply`] as a new or edited message.

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId};
use teloxide::utils::command::BotCommands;
use teloxide::{ApiError, RequestError};

use crate::error::{AppError, Result};
use crate::handler::{PriceHandler, Reply};
use crate::models::{Config, ConversationId};
use crate::pipeline::{CallbackAction, Controls};
use crate::services::PriceFetcher;
use crate::storage::MemorySessionStore;

/// Chat commands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "دستورات ربات:")]
pub enum Command {
    #[command(description = "شروع کار با ربات")]
    Start,
    #[command(description = "نمایش لیست قیمت خودروها")]
    Prices,
    #[command(description = "نمایش راهنما")]
    Help,
}

/// Start long polling and serve until Ctrl-C.
pub async fn run(config: &Config) -> Result<()> {
    let token = config.bot.token()?;
    let fetcher = PriceFetcher::new(&config.scraper)?;
    let handler = Arc::new(PriceHandler::from_config(
        config,
        Arc::new(fetcher),
        Arc::new(MemorySessionStore::new()),
    ));

    let bot = Bot::new(token);
    bot.set_my_commands(Command::bot_commands()).await?;

    log::info!("Bot is starting...");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![handler])
        .default_handler(|update| async move {
            log::debug!("Ignoring update {}", update.id);
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Bot stopped");
    Ok(())
}

/// Update routing: commands and callback queries.
pub fn schema() -> UpdateHandler<AppError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(Update::filter_callback_query().endpoint(on_callback))
}

async fn on_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    handler: Arc<PriceHandler>,
) -> Result<()> {
    log::info!("/{:?} from chat {}", cmd, msg.chat.id.0);

    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, handler.welcome()).await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, handler.help()).await?;
        }
        Command::Prices => {
            let placeholder = bot
                .send_message(msg.chat.id, &handler.messages().loading)
                .await?;
            let reply = handler.show_prices(ConversationId(msg.chat.id.0)).await;
            deliver(&bot, msg.chat.id, placeholder.id, &reply).await?;
        }
    }
    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, handler: Arc<PriceHandler>) -> Result<()> {
    bot.answer_callback_query(q.id).await?;

    let Some(message) = q.message else {
        return Ok(());
    };
    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let action = match data.parse::<CallbackAction>() {
        Ok(action) => action,
        Err(e) => {
            log::warn!("Ignoring callback from chat {}: {}", message.chat.id.0, e);
            return Ok(());
        }
    };

    if action == CallbackAction::Refresh {
        bot.edit_message_text(message.chat.id, message.id, &handler.messages().refreshing)
            .await?;
    }

    let reply = handler
        .handle_action(ConversationId(message.chat.id.0), action)
        .await;
    deliver(&bot, message.chat.id, message.id, &reply).await
}

/// Replace the text (and keyboard) of an existing message with `reply`.
async fn deliver(bot: &Bot, chat_id: ChatId, message_id: MessageId, reply: &Reply) -> Result<()> {
    let request = bot.edit_message_text(chat_id, message_id, reply.text());
    let result = match reply.controls() {
        Some(controls) => request.reply_markup(keyboard(controls)).await,
        None => request.await,
    };

    match result {
        Ok(_) => Ok(()),
        // Tapping a button that leads to the page already shown
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            log::debug!("Message {} in chat {} unchanged", message_id.0, chat_id.0);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Inline keyboard carrying each control's encoded action.
pub fn keyboard(controls: &Controls) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(controls.rows.iter().map(|row| {
        row.iter()
            .map(|c| InlineKeyboardButton::callback(c.label.clone(), c.action.to_string()))
            .collect::<Vec<_>>()
    }))
}

#[cfg(test)]
mod tests {
    use teloxide::types::InlineKeyboardButtonKind;

    use super::*;
    use crate::models::{CarRecord, Messages};
    use crate::pipeline::{paginate, render};

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            other => panic!("unexpected button kind {other:?}"),
        }
    }

    fn records(n: usize) -> Vec<CarRecord> {
        (0..n)
            .map(|i| CarRecord {
                title: format!("car {i}"),
                year: "1402".to_string(),
                price: "1".to_string(),
                fetched_at: "2024-01-01 00:00:00".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/prices", "carbot").unwrap(), Command::Prices);
        assert_eq!(Command::parse("/start@carbot", "carbot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/help", "carbot").unwrap(), Command::Help);
        assert!(Command::parse("/list", "carbot").is_err());
    }

    #[test]
    fn test_keyboard_middle_page() {
        let list = records(12);
        let page = render(&paginate(&list, 1), &Messages::default(), "mashinbank.com");

        let markup = keyboard(&page.controls);
        let rows = &markup.inline_keyboard;

        assert_eq!(rows.len(), 2);
        assert_eq!(callback_data(&rows[0][0]), "page_0");
        assert_eq!(callback_data(&rows[0][1]), "page_2");
        assert_eq!(rows[1][0].text, "🔄 بروزرسانی");
        assert_eq!(callback_data(&rows[1][0]), "refresh");
    }

    #[test]
    fn test_keyboard_single_page() {
        let list = records(3);
        let page = render(&paginate(&list, 0), &Messages::default(), "mashinbank.com");

        let markup = keyboard(&page.controls);
        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(callback_data(&markup.inline_keyboard[0][0]), "refresh");
    }
}

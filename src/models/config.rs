//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ListingSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Telegram bot settings
    #[serde(default)]
    pub bot: BotConfig,

    /// HTTP and scraping behavior settings
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// User-facing texts
    #[serde(default)]
    pub messages: Messages,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.bot.token_env.trim().is_empty() {
            return Err(AppError::validation("bot.token_env is empty"));
        }
        url::Url::parse(&self.scraper.url)?;
        if self.scraper.user_agent.trim().is_empty() {
            return Err(AppError::validation("scraper.user_agent is empty"));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::validation("scraper.timeout_secs must be > 0"));
        }
        if self.scraper.utc_offset_minutes.unsigned_abs() >= 24 * 60 {
            return Err(AppError::validation(
                "scraper.utc_offset_minutes must be within ±24h",
            ));
        }
        for selector in self.scraper.selectors.all() {
            Selector::parse(selector)
                .map_err(|e| AppError::selector(selector, format!("{e:?}")))?;
        }
        Ok(())
    }
}

/// Telegram bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Environment variable holding the bot token
    #[serde(default = "defaults::token_env")]
    pub token_env: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token_env: defaults::token_env(),
        }
    }
}

impl BotConfig {
    /// Read the bot token from the environment.
    pub fn token(&self) -> Result<String> {
        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(AppError::config(format!(
                "bot token not set: export {}",
                self.token_env
            ))),
        }
    }
}

/// HTTP client and scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Price listing page
    #[serde(default = "defaults::url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept header
    #[serde(default = "defaults::accept")]
    pub accept: String,

    /// Accept-Language header
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Year shown when a listing has none
    #[serde(default = "defaults::year_fallback")]
    pub year_fallback: String,

    /// Offset from UTC for fetch timestamps, in minutes
    #[serde(default = "defaults::utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Listing selectors
    #[serde(default)]
    pub selectors: ListingSelectors,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url: defaults::url(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
            accept: defaults::accept(),
            accept_language: defaults::accept_language(),
            year_fallback: defaults::year_fallback(),
            utc_offset_minutes: defaults::utc_offset_minutes(),
            selectors: ListingSelectors::default(),
        }
    }
}

/// User-facing texts.
///
/// Templates use `{placeholder}` substitution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "defaults::welcome")]
    pub welcome: String,
    #[serde(default = "defaults::help")]
    pub help: String,
    #[serde(default = "defaults::loading")]
    pub loading: String,
    #[serde(default = "defaults::refreshing")]
    pub refreshing: String,
    #[serde(default = "defaults::fetch_failed")]
    pub fetch_failed: String,
    #[serde(default = "defaults::list_header")]
    pub list_header: String,
    /// Placeholders: `{title}`, `{year}`, `{price}`, `{time}`
    #[serde(default = "defaults::listing")]
    pub listing: String,
    /// Placeholders: `{page}`, `{total}`
    #[serde(default = "defaults::page_footer")]
    pub page_footer: String,
    /// Placeholders: `{source}`
    #[serde(default = "defaults::source_line")]
    pub source_line: String,
    #[serde(default = "defaults::prev_button")]
    pub prev_button: String,
    #[serde(default = "defaults::next_button")]
    pub next_button: String,
    #[serde(default = "defaults::refresh_button")]
    pub refresh_button: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            welcome: defaults::welcome(),
            help: defaults::help(),
            loading: defaults::loading(),
            refreshing: defaults::refreshing(),
            fetch_failed: defaults::fetch_failed(),
            list_header: defaults::list_header(),
            listing: defaults::listing(),
            page_footer: defaults::page_footer(),
            source_line: defaults::source_line(),
            prev_button: defaults::prev_button(),
            next_button: defaults::next_button(),
            refresh_button: defaults::refresh_button(),
        }
    }
}

mod defaults {
    // Bot defaults
    pub fn token_env() -> String {
        "BOT_TOKEN".into()
    }

    // Scraper defaults
    pub fn url() -> String {
        "https://mashinbank.com/%D9%82%DB%8C%D9%85%D8%AA-%D8%AE%D9%88%D8%AF%D8%B1%D9%88".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into()
    }
    pub fn accept() -> String {
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8".into()
    }
    pub fn accept_language() -> String {
        "fa-IR,fa;q=0.9,en-US;q=0.8,en;q=0.7".into()
    }
    pub fn year_fallback() -> String {
        "1402".into()
    }
    // Asia/Tehran, no DST since 2022
    pub fn utc_offset_minutes() -> i32 {
        210
    }

    // Message defaults
    pub fn welcome() -> String {
        "🚗 به ربات قیمت خودرو خوش آمدید!\n\n\
         این ربات قیمت‌های به‌روز خودرو را از سایت mashinbank.com دریافت می‌کند.\n\n\
         برای دیدن لیست قیمت‌ها از دستور /prices استفاده کنید."
            .into()
    }
    pub fn help() -> String {
        "راهنمای استفاده از ربات:\n\n\
         🔹 /start - شروع کار با ربات\n\
         🔹 /prices - نمایش لیست قیمت خودروها\n\
         🔹 /help - نمایش این راهنما\n\n\
         〽️ نکات:\n\
         • قیمت‌ها به صورت لحظه‌ای به‌روز می‌شوند\n\
         • برای مشاهده قیمت‌های جدید روی دکمه 🔄 بروزرسانی کلیک کنید"
            .into()
    }
    pub fn loading() -> String {
        "در حال دریافت اطلاعات... لطفاً صبر کنید.".into()
    }
    pub fn refreshing() -> String {
        "در حال بروزرسانی اطلاعات... لطفاً صبر کنید.".into()
    }
    pub fn fetch_failed() -> String {
        "⚠️ متأسفانه در دریافت اطلاعات مشکلی پیش آمده است.\n\
         لطفاً چند دقیقه دیگر مجدداً تلاش کنید."
            .into()
    }
    pub fn list_header() -> String {
        "📊 لیست قیمت خودروها".into()
    }
    pub fn listing() -> String {
        "🚗 {title}\n📅 مدل {year}\n💰 قیمت: {price}\n🕒 {time}".into()
    }
    pub fn page_footer() -> String {
        "📄 صفحه {page} از {total}".into()
    }
    pub fn source_line() -> String {
        "🌐 منبع: {source}".into()
    }
    pub fn prev_button() -> String {
        "⬅️ قبلی".into()
    }
    pub fn next_button() -> String {
        "بعدی ➡️".into()
    }
    pub fn refresh_button() -> String {
        "🔄 بروزرسانی".into()
    }
}

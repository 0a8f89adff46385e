// src/pipeline/render.rs

//! Page text and navigation controls.

use crate::models::{CarRecord, Messages};
use crate::pipeline::{CallbackAction, Page};

const SEPARATOR_WIDTH: usize = 30;

/// A tappable button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub action: CallbackAction,
}

/// Button rows, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    pub rows: Vec<Vec<Control>>,
}

impl Controls {
    /// Find the control carrying `action`.
    pub fn find(&self, action: CallbackAction) -> Option<&Control> {
        self.rows.iter().flatten().find(|c| c.action == action)
    }

}

/// Display text plus its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub text: String,
    pub controls: Controls,
}

/// Render a page of listings.
///
/// `source` is the attribution shown in the footer.
pub fn render(page: &Page<'_>, messages: &Messages, source: &str) -> RenderedPage {
    let body: String = page
        .items
        .iter()
        .map(|record| listing_block(record, messages))
        .collect();

    let footer = messages
        .page_footer
        .replace("{page}", &page.index.saturating_add(1).to_string())
        .replace("{total}", &page.total_pages.to_string());
    let source_line = messages.source_line.replace("{source}", source);

    RenderedPage {
        text: format!(
            "{}\n\n{}\n{}\n{}",
            messages.list_header, body, footer, source_line
        ),
        controls: controls(page, messages),
    }
}

fn listing_block(record: &CarRecord, messages: &Messages) -> String {
    let listing = messages
        .listing
        .replace("{title}", &record.title)
        .replace("{year}", &record.year)
        .replace("{price}", &record.price)
        .replace("{time}", &record.fetched_at);
    format!("{}\n{}\n", listing, "─".repeat(SEPARATOR_WIDTH))
}

/// Previous/next row (omitted when empty), then refresh on its own row.
fn controls(page: &Page<'_>, messages: &Messages) -> Controls {
    let mut nav = Vec::with_capacity(2);
    if page.has_previous() {
        nav.push(Control {
            label: messages.prev_button.clone(),
            action: CallbackAction::GoToPage(page.index - 1),
        });
    }
    if page.has_next() {
        nav.push(Control {
            label: messages.next_button.clone(),
            action: CallbackAction::GoToPage(page.index + 1),
        });
    }

    let mut rows = Vec::with_capacity(2);
    if !nav.is_empty() {
        rows.push(nav);
    }
    rows.push(vec![Control {
        label: messages.refresh_button.clone(),
        action: CallbackAction::Refresh,
    }]);
    Controls { rows }
}

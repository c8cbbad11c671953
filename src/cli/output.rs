use ansi_term::Style;
use anyhow::Result;

use crate::{
    state::{entities::FocusItemEntity, StoreError},
    utils::time::to_local_display,
};

/// Corrupt local state is reported to the user and ends the command quietly, anything else is
/// passed on.
pub fn report_corrupt(error: anyhow::Error) -> Result<()> {
    if matches!(
        error.downcast_ref::<StoreError>(),
        Some(StoreError::Corrupt { .. })
    ) {
        println!("{error}");
        return Ok(());
    }
    Err(error)
}

/// OSC 8 hyperlink, rendered as clickable `text` by terminals that support it.
pub fn terminal_link(text: &str, url: &str) -> String {
    format!("\u{1b}]8;;{url}\u{7}{text}\u{1b}]8;;\u{7}")
}

pub fn render_focus_item(item: &FocusItemEntity) -> String {
    let link = if item.url.is_empty() {
        String::new()
    } else {
        terminal_link(&item.id.to_uppercase(), &item.url)
    };
    let added = format!("(FOCUS ADDED: {})", to_local_display(item.created));
    format!(
        "[{link}] {} {}",
        item.summary,
        Style::new().dimmed().paint(added)
    )
}

pub fn heading(text: &str) -> String {
    Style::new().bold().paint(text).to_string()
}

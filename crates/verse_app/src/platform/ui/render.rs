use verse_core::VerseView;

use super::constants::*;

/// Renders the current view as a block of terminal text.
pub fn render(view: &VerseView, today: &str) -> String {
    let mut lines = vec![
        APP_TITLE.to_string(),
        APP_SUBTITLE.to_string(),
        today.to_string(),
        String::new(),
    ];

    match view {
        VerseView::Loading => lines.push(LOADING_TEXT.to_string()),
        VerseView::Error {
            headline,
            message,
            retry_label,
        } => {
            lines.push(headline.to_string());
            lines.push(message.clone());
            lines.push(String::new());
            lines.push(format!("[{}] {retry_label}  [{}] Quit", RETRY_KEYS[0], QUIT_KEYS[0]));
        }
        VerseView::Verse {
            title,
            reference,
            text,
        } => {
            lines.push(title.to_string());
            if let Some(reference) = reference {
                lines.push(reference.clone());
            }
            lines.push(String::new());
            lines.push(text.clone());
            lines.push(String::new());
            lines.push(format!("[{}] Refresh  [{}] Quit", REFRESH_KEYS[0], QUIT_KEYS[0]));
        }
    }

    lines.join("\n")
}

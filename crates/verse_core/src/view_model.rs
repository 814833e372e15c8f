use crate::FetchState;

pub const VERSE_TITLE: &str = "Today's verse";
pub const ERROR_HEADLINE: &str = "Failed to load verse";
pub const RETRY_LABEL: &str = "Try Again";

/// One of the three views the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseView {
    Loading,
    Error {
        headline: &'static str,
        message: String,
        retry_label: &'static str,
    },
    Verse {
        title: &'static str,
        /// Omitted when no citation was isolated.
        reference: Option<String>,
        text: String,
    },
}

impl VerseView {
    pub(crate) fn from_state(state: &FetchState) -> Self {
        match state {
            FetchState::Loading => VerseView::Loading,
            FetchState::Error(message) => VerseView::Error {
                headline: ERROR_HEADLINE,
                message: message.clone(),
                retry_label: RETRY_LABEL,
            },
            FetchState::Ready(verse) => VerseView::Verse {
                title: VERSE_TITLE,
                reference: verse
                    .has_reference()
                    .then(|| verse.reference.clone()),
                text: verse.text.clone(),
            },
        }
    }
}

use crate::view_model::VerseView;
use crate::ParsedVerse;

pub type RequestId = u64;

/// What the presentation layer should show. Exactly one is current.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Loading,
    Error(String),
    Ready(ParsedVerse),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerseState {
    fetch: FetchState,
    in_flight: Option<RequestId>,
    last_request_id: RequestId,
    dirty: bool,
}

impl VerseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    /// Request whose completion will be applied, if one is pending.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn view(&self) -> VerseView {
        VerseView::from_state(&self.fetch)
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Enters `Loading` under a fresh request id. Callers check `in_flight` first.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.in_flight = Some(self.last_request_id);
        self.fetch = FetchState::Loading;
        self.dirty = true;
        self.last_request_id
    }

    /// Commits the outcome of `request_id`. Returns false, leaving the state
    /// untouched, when that request is not the one in flight.
    pub(crate) fn complete(&mut self, request_id: RequestId, outcome: FetchState) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.fetch = outcome;
        self.dirty = true;
        true
    }
}

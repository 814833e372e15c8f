use std::collections::VecDeque;

use verse_core::{update, Effect, FetchState, Msg, VerseState};
use verse_logging::verse_warn;

use crate::decode::decode_response;
use crate::fetch::{Fetcher, LogProgressSink};

/// Async driver for the verse state machine.
///
/// Each `load` awaits its single request before returning, so calls on one
/// controller are serialized; a request can never overlap another. A
/// `load` future dropped mid-request leaves its id in flight; the next call
/// fails that request as cancelled before doing anything else.
pub struct FetchController<F> {
    fetcher: F,
    state: VerseState,
    sink: LogProgressSink,
}

impl<F: Fetcher> FetchController<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            state: VerseState::new(),
            sink: LogProgressSink,
        }
    }

    pub fn state(&self) -> &FetchState {
        self.state.fetch_state()
    }

    pub fn verse_state(&self) -> &VerseState {
        &self.state
    }

    pub async fn load(&mut self) -> &FetchState {
        self.dispatch(Msg::LoadRequested).await
    }

    pub async fn retry(&mut self) -> &FetchState {
        self.dispatch(Msg::RetryClicked).await
    }

    pub async fn refresh(&mut self) -> &FetchState {
        self.dispatch(Msg::RefreshClicked).await
    }

    async fn dispatch(&mut self, msg: Msg) -> &FetchState {
        self.abandon_orphaned_request();
        let mut pending: VecDeque<Effect> = self.apply(msg).into();
        while let Some(effect) = pending.pop_front() {
            let msg = match effect {
                Effect::FetchVerse { request_id } => {
                    match self.fetcher.fetch(request_id, &self.sink).await {
                        Ok(output) => Msg::FetchSucceeded {
                            request_id,
                            raw: decode_response(&output),
                        },
                        Err(err) => Msg::FetchFailed {
                            request_id,
                            message: err.to_string(),
                        },
                    }
                }
            };
            pending.extend(self.apply(msg));
        }
        self.state.fetch_state()
    }

    /// No other dispatch can be running under `&mut self`, so anything still
    /// in flight belongs to a dropped future.
    fn abandon_orphaned_request(&mut self) {
        if let Some(request_id) = self.state.in_flight() {
            verse_warn!("Request {} was cancelled before completing", request_id);
            self.apply(Msg::FetchFailed {
                request_id,
                message: "request cancelled".to_string(),
            });
        }
    }

    fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = update(state, msg);
        self.state = next;
        effects
    }
}

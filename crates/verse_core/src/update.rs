use verse_logging::{verse_debug, verse_info, verse_warn};

use crate::{normalize, parse, Effect, FetchState, Msg, RequestId, VerseState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: VerseState, msg: Msg) -> (VerseState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadRequested => request_fetch(&mut state, "load"),
        Msg::RetryClicked => request_fetch(&mut state, "retry"),
        Msg::RefreshClicked => request_fetch(&mut state, "refresh"),
        Msg::FetchSucceeded { request_id, raw } => {
            // Normalization and parsing are total; a body never turns into an error.
            let verse = parse(&normalize(&raw));
            let has_reference = verse.has_reference();
            if state.complete(request_id, FetchState::Ready(verse)) {
                verse_info!(
                    "Verse ready request_id={} has_reference={}",
                    request_id,
                    has_reference
                );
            } else {
                log_stale(request_id, &state);
            }
            Vec::new()
        }
        Msg::FetchFailed {
            request_id,
            message,
        } => {
            let logged = message.clone();
            if state.complete(request_id, FetchState::Error(message)) {
                verse_warn!("Verse fetch failed request_id={}: {}", request_id, logged);
            } else {
                log_stale(request_id, &state);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn request_fetch(state: &mut VerseState, trigger: &str) -> Vec<Effect> {
    if let Some(pending) = state.in_flight() {
        verse_debug!(
            "Ignoring {} while request_id={} is in flight",
            trigger,
            pending
        );
        return Vec::new();
    }
    let request_id = state.begin_request();
    verse_info!("FetchVerse request_id={} trigger={}", request_id, trigger);
    vec![Effect::FetchVerse { request_id }]
}

fn log_stale(request_id: RequestId, state: &VerseState) {
    verse_debug!(
        "Discarding completion for request_id={} (in flight: {:?})",
        request_id,
        state.in_flight()
    );
}

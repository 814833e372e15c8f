use std::sync::Once;
use std::time::{Duration, Instant};

use url::Url;
use verse_core::{update, Effect, FetchState, Msg, ParsedVerse, VerseState};
use verse_engine::{EngineEvent, EngineHandle, FetchSettings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(verse_logging::initialize_for_tests);
}

fn run_effects(engine: &EngineHandle, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::FetchVerse { request_id } => engine.fetch(request_id),
        }
    }
}

/// Pumps engine events into the state until nothing is in flight.
fn settle(engine: &EngineHandle, mut state: VerseState) -> VerseState {
    let deadline = Instant::now() + Duration::from_secs(5);
    while state.in_flight().is_some() && Instant::now() < deadline {
        let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
            continue;
        };
        let msg = match event {
            EngineEvent::Progress(_) => continue,
            EngineEvent::FetchCompleted { request_id, result } => match result {
                Ok(raw) => Msg::FetchSucceeded { request_id, raw },
                Err(err) => Msg::FetchFailed {
                    request_id,
                    message: err.to_string(),
                },
            },
        };
        let (next, effects) = update(state, msg);
        run_effects(engine, effects);
        state = next;
    }
    state
}

#[tokio::test(flavor = "multi_thread")]
async fn rapid_loads_issue_one_http_call() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/verse"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(100))
                .set_body_string(r#"{"text":"Be still — Psalm 46:10"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = Url::parse(&format!("{}/verse", server.uri())).unwrap();
    let engine = EngineHandle::new(endpoint, FetchSettings::default());

    let (state, first) = update(VerseState::new(), Msg::LoadRequested);
    let (state, second) = update(state, Msg::LoadRequested);
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    run_effects(&engine, first);
    run_effects(&engine, second);

    let state = tokio::task::spawn_blocking(move || settle(&engine, state))
        .await
        .unwrap();

    assert_eq!(
        state.fetch_state(),
        &FetchState::Ready(ParsedVerse {
            text: "Be still".to_string(),
            reference: "Psalm 46:10".to_string(),
        })
    );
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn retry_after_error_issues_a_new_request() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/verse"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/verse"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Peace be with you."))
        .mount(&server)
        .await;

    let endpoint = Url::parse(&format!("{}/verse", server.uri())).unwrap();
    let engine = EngineHandle::new(endpoint, FetchSettings::default());

    let state = tokio::task::spawn_blocking(move || {
        let (state, effects) = update(VerseState::new(), Msg::LoadRequested);
        run_effects(&engine, effects);
        let state = settle(&engine, state);
        assert_eq!(
            state.fetch_state(),
            &FetchState::Error("HTTP error! status: 500".to_string())
        );

        let (state, effects) = update(state, Msg::RetryClicked);
        assert_eq!(state.fetch_state(), &FetchState::Loading);
        run_effects(&engine, effects);
        settle(&engine, state)
    })
    .await
    .unwrap();

    assert_eq!(
        state.fetch_state(),
        &FetchState::Ready(ParsedVerse {
            text: "Peace be with you.".to_string(),
            reference: String::new(),
        })
    );
}

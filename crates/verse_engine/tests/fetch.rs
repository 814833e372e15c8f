use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use url::Url;
use verse_core::RawResponse;
use verse_engine::{
    decode_response, EngineEvent, FailureKind, FetchProgress, FetchSettings, Fetcher,
    ProgressSink, ReqwestFetcher, Stage,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn fetcher_for(server: &MockServer, route: &str, settings: FetchSettings) -> ReqwestFetcher {
    let endpoint = Url::parse(&format!("{}{}", server.uri(), route)).unwrap();
    ReqwestFetcher::new(endpoint, settings)
}

#[tokio::test]
async fn fetcher_sends_json_get_and_emits_progress() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/default/getDailyVerse"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "A" })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, "/default/getDailyVerse", FetchSettings::default());
    let sink = TestSink::new();
    assert_eq!(
        fetcher.endpoint().as_str(),
        format!("{}/default/getDailyVerse", server.uri())
    );

    let output = fetcher.fetch(1, &sink).await.expect("fetch ok");
    assert_eq!(output.metadata.status, 200);
    assert_eq!(output.metadata.final_url, output.metadata.endpoint);
    assert_eq!(output.metadata.redirect_count, 0);
    assert!(output
        .metadata
        .content_type
        .as_deref()
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(
        decode_response(&output),
        RawResponse::Json(json!({ "text": "A" }))
    );

    let stages = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::Progress(FetchProgress { stage, .. }) => Some(stage),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert!(stages.contains(&Stage::Requesting));
    assert!(stages.contains(&Stage::Downloading));
}

#[tokio::test]
async fn fetcher_accepts_plain_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/verse"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("Be still - Psalm 46:10", "text/plain; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, "/verse", FetchSettings::default());
    let output = fetcher.fetch(1, &TestSink::new()).await.expect("fetch ok");

    assert_eq!(
        decode_response(&output),
        RawResponse::Text("Be still - Psalm 46:10".to_string())
    );
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/verse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, "/verse", FetchSettings::default());
    let err = fetcher.fetch(7, &TestSink::new()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.to_string(), "HTTP error! status: 503");
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = fetcher_for(&server, "/slow", settings);
    let err = fetcher.fetch(2, &TestSink::new()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("\"01234567890\""),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = fetcher_for(&server, "/large", settings);
    let err = fetcher.fetch(3, &TestSink::new()).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(13)
        }
    );
}

#[tokio::test]
async fn fetcher_enforces_content_type_allow_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/verse"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>hi</p>", "text/html"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        allowed_content_types: vec!["application/json".to_string(), "text/plain".to_string()],
        ..FetchSettings::default()
    };
    let fetcher = fetcher_for(&server, "/verse", settings);
    let err = fetcher.fetch(4, &TestSink::new()).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn fetcher_reports_connection_failure_as_network_error() {
    let server = MockServer::start().await;
    let endpoint = Url::parse(&format!("{}/verse", server.uri())).unwrap();
    drop(server);

    let fetcher = ReqwestFetcher::new(endpoint, FetchSettings::default());
    let err = fetcher.fetch(5, &TestSink::new()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
    assert!(err.to_string().starts_with("network error"));
}

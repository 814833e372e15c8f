use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use url::Url;
use verse_core::RequestId;
use verse_logging::{verse_error, verse_info};

use crate::decode::decode_response;
use crate::fetch::{ChannelProgressSink, FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineEvent, FailureKind, FetchError, FetchProgress, Stage};

enum EngineCommand {
    Fetch { request_id: RequestId },
}

/// Runs fetches on a background tokio runtime and reports `EngineEvent`s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(endpoint: Url, settings: FetchSettings) -> Self {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(endpoint, settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    verse_error!("Failed to start engine runtime: {}", err);
                    fail_all(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch(&self, request_id: RequestId) {
        verse_info!("Engine fetch request_id={}", request_id);
        let _ = self.cmd_tx.send(EngineCommand::Fetch { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch { request_id } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = match fetcher.fetch(request_id, &sink).await {
                Ok(output) => {
                    let _ = event_tx.send(EngineEvent::Progress(FetchProgress {
                        request_id,
                        stage: Stage::Decoding,
                        bytes: Some(output.metadata.byte_len),
                    }));
                    Ok(decode_response(&output))
                }
                Err(err) => Err(err),
            };
            let _ = event_tx.send(EngineEvent::FetchCompleted { request_id, result });
        }
    }
}

fn fail_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(EngineCommand::Fetch { request_id }) = cmd_rx.recv() {
        let _ = event_tx.send(EngineEvent::FetchCompleted {
            request_id,
            result: Err(FetchError::new(
                FailureKind::Network,
                format!("engine unavailable: {reason}"),
            )),
        });
    }
}

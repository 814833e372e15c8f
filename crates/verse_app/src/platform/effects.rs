use std::sync::Arc;

use url::Url;
use verse_core::{Effect, Msg};
use verse_engine::{EngineEvent, EngineHandle, FetchSettings, ReqwestFetcher};
use verse_logging::{verse_debug, verse_info, verse_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(endpoint: Url, settings: FetchSettings) -> Self {
        let fetcher = ReqwestFetcher::new(endpoint, settings);
        verse_info!("Verse endpoint {}", fetcher.endpoint());
        Self {
            engine: EngineHandle::with_fetcher(Arc::new(fetcher)),
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchVerse { request_id } => self.engine.fetch(request_id),
            }
        }
    }

    /// Next message produced by the engine, if any is ready.
    pub fn poll(&self) -> Option<Msg> {
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::Progress(progress) => {
                    verse_debug!(
                        "request_id={} stage={:?} bytes={:?}",
                        progress.request_id,
                        progress.stage,
                        progress.bytes
                    );
                }
                EngineEvent::FetchCompleted { request_id, result } => {
                    return Some(match result {
                        Ok(raw) => Msg::FetchSucceeded { request_id, raw },
                        Err(err) => {
                            verse_warn!("Request {} failed: {}", request_id, err.kind);
                            Msg::FetchFailed {
                                request_id,
                                message: err.to_string(),
                            }
                        }
                    });
                }
            }
        }
        None
    }
}

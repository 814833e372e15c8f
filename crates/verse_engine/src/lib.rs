//! Daily Peace engine: HTTP fetch, body decoding and effect execution.
mod controller;
mod decode;
mod engine;
mod fetch;
mod types;

pub use controller::FetchController;
pub use decode::{decode_body, decode_response, DecodedBody};
pub use engine::EngineHandle;
pub use fetch::{
    ChannelProgressSink, FetchSettings, Fetcher, LogProgressSink, ProgressSink, ReqwestFetcher,
};
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, FetchProgress, Stage,
};

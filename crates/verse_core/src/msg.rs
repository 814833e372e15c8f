#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Initial load requested by the embedding UI.
    LoadRequested,
    /// User clicked "Try Again" on the error view.
    RetryClicked,
    /// User asked for a fresh verse while one is displayed.
    RefreshClicked,
    /// Engine delivered a response body for a request.
    FetchSucceeded {
        request_id: crate::RequestId,
        raw: crate::RawResponse,
    },
    /// Engine reported a transport failure for a request.
    FetchFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one GET against the configured endpoint.
    FetchVerse { request_id: crate::RequestId },
}

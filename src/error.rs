use thiserror::Error;

/// An error reported by the transport layer for a failed exchange, carried
/// as the (domain, code, message) triple OS-level networking stacks use.
///
/// `Display` prints only the message: the two normalized diagnostics are
/// matched on message text by downstream consumers, so the message must
/// surface verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    /// Originating error domain (e.g. `"reqwest"`).
    pub domain: String,
    /// Numeric error code within the domain.
    pub code: i64,
    /// Human-readable description.
    pub message: String,
}

impl TransportError {
    pub fn new(domain: impl Into<String>, code: i64, message: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            code,
            message: message.into(),
        }
    }
}

/// The failure branch of an [`Outcome`](crate::Outcome).
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// The exchange failed before a body could be serialized.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The body was received but could not be deserialized as JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A typed value was requested but the exchange produced no body.
    #[error("response body was empty")]
    MissingBody,

    /// Failure raised by a custom response serializer.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

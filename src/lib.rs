//! Response and outcome modeling for reqwest based HTTP clients.
//!
//! Models the outcome of a single request/response exchange: the raw
//! transport artifacts ([`RawResponse`]), the typed serialization result
//! ([`TypedResponse`]), a lifecycle [`Timeline`], and a normalization layer
//! that rewrites two well-known transport failures (timed out, offline)
//! into fixed user-facing diagnostics.
//!
//! Both records are plain immutable values: built once when an exchange
//! completes, safe to share across threads, with two textual renderings
//! each (a one-line `Display` summary and a five-line `Debug` report).
//!
//! # Example
//! ```rust
//! use bytes::Bytes;
//! use rust_exchange::{Outcome, TypedResponse};
//!
//! let data = Bytes::from_static(b"{\"item1\": \"hello\"}");
//! let outcome = Outcome::<serde_json::Value>::from_json(Some(&data), None);
//! let response = TypedResponse::new(None, None, Some(data), outcome);
//!
//! assert_eq!("SUCCESS", response.to_string());
//! assert_eq!(5, format!("{response:?}").lines().count());
//! ```

mod error;
mod normalize;
mod outcome;
mod response;
mod timeline;
mod transport;

pub use error::{ExchangeError, TransportError};
pub use normalize::{
    normalize, FailureKind, NormalizeConfig, NO_CONNECTIVITY_CODE, NO_CONNECTIVITY_MESSAGE,
    TIMED_OUT_CODE, TIMED_OUT_MESSAGE,
};
pub use outcome::Outcome;
pub use response::{MetricsHandle, RawResponse, RequestEcho, ResponseEcho, TypedResponse};
pub use timeline::Timeline;
pub use transport::{
    execute, execute_typed, execute_typed_with_config, execute_with_config,
    TRANSPORT_ERROR_DOMAIN, UNKNOWN_CODE,
};
pub use reqwest;
pub use reqwest::StatusCode;

use std::collections::HashMap;

/// Header map carried by the request and response echoes.
pub type ExchangeHeaders = HashMap<String, String>;

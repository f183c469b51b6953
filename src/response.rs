use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::{Method, StatusCode, Url};

use crate::error::TransportError;
use crate::normalize::{normalize, NormalizeConfig};
use crate::outcome::Outcome;
use crate::timeline::Timeline;
use crate::ExchangeHeaders;

/// The outbound request as it was actually sent. Absent on catastrophic
/// pre-send failures.
#[derive(Debug, Clone)]
pub struct RequestEcho {
    pub method: Method,
    pub url: Url,
    pub headers: ExchangeHeaders,
}

impl fmt::Display for RequestEcho {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Metadata of the received response. Absent when the exchange never got one
/// (timeout, connection failure).
#[derive(Debug, Clone)]
pub struct ResponseEcho {
    pub status: StatusCode,
    pub url: Url,
    pub headers: ExchangeHeaders,
}

impl fmt::Display for ResponseEcho {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.url)
    }
}

/// Opaque transport metrics attached by the session layer. Carried for
/// consumers outside this crate; nothing here inspects it.
#[derive(Clone)]
pub struct MetricsHandle(Arc<dyn Any + Send + Sync>);

impl MetricsHandle {
    pub fn new<T>(metrics: T) -> Self
    where
        T: Any + Send + Sync,
    {
        MetricsHandle(Arc::new(metrics))
    }

    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: Any,
    {
        self.0.downcast_ref()
    }
}

/// Everything a completed exchange produced before any serialization:
/// request echo, response echo, raw body bytes, and the transport error
/// (already normalized). Built once, read-only afterwards.
///
/// # Example
/// ```rust
/// use rust_exchange::{RawResponse, TransportError, TIMED_OUT_MESSAGE};
///
/// let raw_error = TransportError::new("url-session", -1001, "timed out");
/// let response = RawResponse::new(None, None, None, Some(raw_error));
/// assert_eq!(TIMED_OUT_MESSAGE, response.error.unwrap().message);
/// ```
pub struct RawResponse {
    /// The request sent to the server.
    pub request: Option<RequestEcho>,

    /// The server's response to the request.
    pub response: Option<ResponseEcho>,

    /// The body bytes returned by the server.
    pub data: Option<Bytes>,

    /// The error encountered while executing the request, after
    /// normalization of the recognized failure identities.
    pub error: Option<TransportError>,

    /// Opaque transport metrics, when the session layer attached any.
    pub metrics: Option<MetricsHandle>,
}

impl RawResponse {
    /// Builds the record with the default [`NormalizeConfig`]. Total: never
    /// fails, never panics, regardless of which artifacts are present.
    pub fn new(
        request: Option<RequestEcho>,
        response: Option<ResponseEcho>,
        data: Option<Bytes>,
        error: Option<TransportError>,
    ) -> Self {
        Self::with_config(request, response, data, error, &NormalizeConfig::default())
    }

    /// Builds the record, normalizing the error with an explicit config.
    pub fn with_config(
        request: Option<RequestEcho>,
        response: Option<ResponseEcho>,
        data: Option<Bytes>,
        error: Option<TransportError>,
        config: &NormalizeConfig,
    ) -> Self {
        RawResponse {
            request,
            response,
            data,
            error: error.map(|err| normalize(err, config)),
            metrics: None,
        }
    }

    /// Attaches opaque transport metrics to the record.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

/// Short form: `SUCCESS` or `FAILURE: <message>`.
impl fmt::Display for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "SUCCESS"),
            Some(err) => write!(f, "FAILURE: {err}"),
        }
    }
}

/// Five-line report: request, response, byte count, result, timeline. The
/// order is fixed; log scrapers depend on it.
impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report_header(f, &self.request, &self.response, &self.data)?;
        writeln!(f, "[Result]: {self}")?;
        write!(f, "[Timeline]: nil")
    }
}

/// A typed response: the same transport artifacts plus the serialization
/// [`Outcome`] and the lifecycle [`Timeline`]. Built once, after
/// serialization completes; read-only afterwards.
pub struct TypedResponse<V> {
    /// The request sent to the server.
    pub request: Option<RequestEcho>,

    /// The server's response to the request.
    pub response: Option<ResponseEcho>,

    /// The body bytes returned by the server.
    pub data: Option<Bytes>,

    /// The result of response serialization. Stored as given; this crate
    /// never constructs or inspects the success branch.
    pub result: Outcome<V>,

    /// The timeline of the complete lifecycle of the exchange.
    pub timeline: Timeline,

    /// Opaque transport metrics, when the session layer attached any.
    pub metrics: Option<MetricsHandle>,
}

impl<V> TypedResponse<V> {
    /// Builds the record with the zero [`Timeline`]. Cannot fail.
    pub fn new(
        request: Option<RequestEcho>,
        response: Option<ResponseEcho>,
        data: Option<Bytes>,
        result: Outcome<V>,
    ) -> Self {
        Self::with_timeline(request, response, data, result, Timeline::default())
    }

    /// Builds the record with an explicit timeline.
    pub fn with_timeline(
        request: Option<RequestEcho>,
        response: Option<ResponseEcho>,
        data: Option<Bytes>,
        result: Outcome<V>,
        timeline: Timeline,
    ) -> Self {
        TypedResponse {
            request,
            response,
            data,
            result,
            timeline,
            metrics: None,
        }
    }

    /// Attaches opaque transport metrics to the record.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

/// Short form: delegates to the outcome.
impl<V> fmt::Display for TypedResponse<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.result.fmt(f)
    }
}

/// Five-line report: request, response, byte count, result, timeline. The
/// order is fixed; log scrapers depend on it.
impl<V> fmt::Debug for TypedResponse<V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report_header(f, &self.request, &self.response, &self.data)?;
        writeln!(f, "[Result]: {:?}", self.result)?;
        write!(f, "[Timeline]: {:?}", self.timeline)
    }
}

fn write_report_header(
    f: &mut fmt::Formatter<'_>,
    request: &Option<RequestEcho>,
    response: &Option<ResponseEcho>,
    data: &Option<Bytes>,
) -> fmt::Result {
    match request {
        Some(request) => writeln!(f, "[Request]: {request}")?,
        None => writeln!(f, "[Request]: nil")?,
    }
    match response {
        Some(response) => writeln!(f, "[Response]: {response}")?,
        None => writeln!(f, "[Response]: nil")?,
    }
    writeln!(f, "[Data]: {} bytes", data.as_ref().map_or(0, Bytes::len))
}

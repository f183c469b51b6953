use std::fmt;
use std::time::{Duration, Instant};

/// Lifecycle timing of one request/response/serialization exchange, reduced
/// to durations measured from the moment the request was sent. Immutable
/// once built; `Default` is the zero timeline used when a caller supplies
/// none.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    /// Time until the response metadata arrived.
    pub latency: Duration,
    /// Time until the full body had been received.
    pub request_duration: Duration,
    /// Time spent turning the body into a typed value.
    pub serialization_duration: Duration,
    /// End-to-end time including serialization.
    pub total_duration: Duration,
}

impl Timeline {
    /// Reduces the four capture instants of an exchange into durations.
    pub fn new(
        request_start: Instant,
        response_start: Instant,
        response_end: Instant,
        serialization_end: Instant,
    ) -> Self {
        Timeline {
            latency: response_start.duration_since(request_start),
            request_duration: response_end.duration_since(request_start),
            serialization_duration: serialization_end.duration_since(response_end),
            total_duration: serialization_end.duration_since(request_start),
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3} secs total ({:.3} secs latency)",
            self.total_duration.as_secs_f64(),
            self.latency.as_secs_f64()
        )
    }
}

/// Single line, consumed verbatim by the response debug reports.
impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ latency: {:.3} secs, request: {:.3} secs, serialization: {:.3} secs, total: {:.3} secs }}",
            self.latency.as_secs_f64(),
            self.request_duration.as_secs_f64(),
            self.serialization_duration.as_secs_f64(),
            self.total_duration.as_secs_f64()
        )
    }
}

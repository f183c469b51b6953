//! Bridges a completed reqwest exchange into the raw artifacts the response
//! records are built from, and drives single exchanges end to end.

use std::time::Instant;

use reqwest::header::HeaderMap;
use reqwest::{Client, Request, Response};
use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::normalize::{normalize, NormalizeConfig, NO_CONNECTIVITY_CODE, TIMED_OUT_CODE};
use crate::outcome::Outcome;
use crate::response::{RawResponse, RequestEcho, ResponseEcho, TypedResponse};
use crate::timeline::Timeline;
use crate::ExchangeHeaders;

/// Domain reported for errors raised by the reqwest transport.
pub const TRANSPORT_ERROR_DOMAIN: &str = "reqwest";

/// Code reported for transport errors outside the recognized set.
pub const UNKNOWN_CODE: i64 = -1;

impl TransportError {
    /// Maps a reqwest error onto the (domain, code, message) triple the
    /// normalization layer matches on.
    pub fn from_reqwest(err: &reqwest::Error) -> TransportError {
        let code = if err.is_timeout() {
            TIMED_OUT_CODE
        } else if err.is_connect() {
            NO_CONNECTIVITY_CODE
        } else {
            UNKNOWN_CODE
        };
        TransportError::new(TRANSPORT_ERROR_DOMAIN, code, err.to_string())
    }
}

impl RequestEcho {
    pub fn from_reqwest(request: &Request) -> RequestEcho {
        RequestEcho {
            method: request.method().clone(),
            url: request.url().clone(),
            headers: headers_to_map(request.headers()),
        }
    }
}

impl ResponseEcho {
    pub fn from_reqwest(response: &Response) -> ResponseEcho {
        ResponseEcho {
            status: response.status(),
            url: response.url().clone(),
            headers: headers_to_map(response.headers()),
        }
    }
}

fn headers_to_map(headers: &HeaderMap) -> ExchangeHeaders {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.to_string(), value.to_string()))
        })
        .collect()
}

/// Runs one exchange and gathers its raw artifacts into a [`RawResponse`]
/// with the default [`NormalizeConfig`]. Total: transport failures are
/// captured in the record instead of being returned.
///
/// # Example
/// ```rust
/// use httpmock::prelude::*;
/// use rust_exchange::execute;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let server = MockServer::start();
///     server.mock(|when, then| {
///         when.path("/test").method(GET);
///         then.status(200).body("hello");
///     });
///
///     let client = reqwest::Client::new();
///     let request = client.get(server.url("/test")).build()?;
///     let response = execute(&client, request).await;
///
///     assert!(response.error.is_none());
///     assert_eq!("SUCCESS", response.to_string());
///     assert_eq!(5, response.data.unwrap().len());
///     Ok(())
/// }
/// ```
pub async fn execute(client: &Client, request: Request) -> RawResponse {
    execute_with_config(client, request, &NormalizeConfig::default()).await
}

/// Like [`execute`], with an explicit normalization config.
pub async fn execute_with_config(
    client: &Client,
    request: Request,
    config: &NormalizeConfig,
) -> RawResponse {
    let echo = RequestEcho::from_reqwest(&request);
    log::debug!("sending {echo}");

    match client.execute(request).await {
        Ok(response) => {
            let response_echo = ResponseEcho::from_reqwest(&response);
            match response.bytes().await {
                Ok(data) => {
                    log::debug!("received {response_echo} ({} bytes)", data.len());
                    RawResponse::with_config(
                        Some(echo),
                        Some(response_echo),
                        Some(data),
                        None,
                        config,
                    )
                }
                Err(err) => RawResponse::with_config(
                    Some(echo),
                    Some(response_echo),
                    None,
                    Some(TransportError::from_reqwest(&err)),
                    config,
                ),
            }
        }
        Err(err) => {
            log::debug!("exchange failed: {err}");
            RawResponse::with_config(
                Some(echo),
                None,
                None,
                Some(TransportError::from_reqwest(&err)),
                config,
            )
        }
    }
}

/// Runs one exchange, deserializes the body as JSON and captures the
/// lifecycle timeline, with the default [`NormalizeConfig`]. Total.
///
/// # Example
/// ```rust
/// use httpmock::prelude::*;
/// use rust_exchange::execute_typed;
///
/// #[derive(serde::Deserialize, Debug, PartialEq)]
/// struct ToReturn {
///     item1: String,
/// }
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let server = MockServer::start();
///     server.mock(|when, then| {
///         when.path("/test").method(GET);
///         then.status(200).json_body(serde_json::json!({ "item1": "hello" }));
///     });
///
///     let client = reqwest::Client::new();
///     let request = client.get(server.url("/test")).build()?;
///     let response = execute_typed::<ToReturn>(&client, request).await;
///
///     assert_eq!(
///         Some(&ToReturn {
///             item1: "hello".to_string()
///         }),
///         response.result.value()
///     );
///     Ok(())
/// }
/// ```
pub async fn execute_typed<V>(client: &Client, request: Request) -> TypedResponse<V>
where
    V: DeserializeOwned,
{
    execute_typed_with_config(client, request, &NormalizeConfig::default()).await
}

/// Like [`execute_typed`], with an explicit normalization config.
pub async fn execute_typed_with_config<V>(
    client: &Client,
    request: Request,
    config: &NormalizeConfig,
) -> TypedResponse<V>
where
    V: DeserializeOwned,
{
    let echo = RequestEcho::from_reqwest(&request);
    log::debug!("sending {echo}");
    let request_start = Instant::now();

    let (response_echo, data, error, response_start) = match client.execute(request).await {
        Ok(response) => {
            let response_start = Instant::now();
            let response_echo = ResponseEcho::from_reqwest(&response);
            match response.bytes().await {
                Ok(data) => (Some(response_echo), Some(data), None, response_start),
                Err(err) => (
                    Some(response_echo),
                    None,
                    Some(TransportError::from_reqwest(&err)),
                    response_start,
                ),
            }
        }
        Err(err) => (
            None,
            None,
            Some(TransportError::from_reqwest(&err)),
            Instant::now(),
        ),
    };
    let response_end = Instant::now();

    let result = Outcome::from_json(data.as_ref(), error.map(|err| normalize(err, config)));
    let serialization_end = Instant::now();

    let timeline = Timeline::new(request_start, response_start, response_end, serialization_end);
    TypedResponse::with_timeline(Some(echo), response_echo, data, result, timeline)
}

use std::time::Duration;

use httpmock::prelude::*;
use rust_exchange::{
    execute, execute_typed, execute_with_config, NormalizeConfig, NO_CONNECTIVITY_CODE,
    NO_CONNECTIVITY_MESSAGE, TIMED_OUT_CODE, TIMED_OUT_MESSAGE, TRANSPORT_ERROR_DOMAIN,
    UNKNOWN_CODE,
};
use serde::Deserialize;

#[derive(Deserialize, Debug, PartialEq)]
struct ToReturn {
    item1: String,
}

#[tokio::test]
async fn test_execute_captures_all_artifacts_on_success() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/test").method(GET);
        then.status(200)
            .json_body(serde_json::json!({ "item1": "hello" }));
    });

    let client = reqwest::Client::new();
    let request = client.get(server.url("/test")).build()?;
    let response = execute(&client, request).await;

    assert!(response.error.is_none());
    assert_eq!("SUCCESS", response.to_string());

    let request_echo = response.request.unwrap();
    assert_eq!("GET", request_echo.method.as_str());

    let response_echo = response.response.unwrap();
    assert_eq!(200, response_echo.status.as_u16());

    assert!(!response.data.unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_execute_typed_deserializes_the_body() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/test").method(GET);
        then.status(200)
            .json_body(serde_json::json!({ "item1": "hello" }));
    });

    let client = reqwest::Client::new();
    let request = client.get(server.url("/test")).build()?;
    let response = execute_typed::<ToReturn>(&client, request).await;

    assert_eq!(
        Some(&ToReturn {
            item1: "hello".to_string()
        }),
        response.result.value()
    );
    assert!(response.timeline.total_duration > Duration::ZERO);
    assert!(response.timeline.total_duration >= response.timeline.latency);
    Ok(())
}

#[tokio::test]
async fn test_execute_typed_reports_deserialization_failures() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/test").method(GET);
        then.status(200).body("not json");
    });

    let client = reqwest::Client::new();
    let request = client.get(server.url("/test")).build()?;
    let response = execute_typed::<ToReturn>(&client, request).await;

    assert!(response.result.is_failure());
    assert!(response
        .to_string()
        .starts_with("FAILURE: deserialization failed"));
    assert!(response.data.is_some());
    Ok(())
}

#[tokio::test]
async fn test_timed_out_exchange_yields_the_timeout_diagnostic() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/slow").method(GET);
        then.status(200).delay(Duration::from_millis(500));
    });

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()?;
    let request = client.get(server.url("/slow")).build()?;
    let response = execute(&client, request).await;

    assert!(response.request.is_some());
    assert!(response.response.is_none());
    assert!(response.data.is_none());

    let error = response.error.unwrap();
    assert_eq!(TIMED_OUT_MESSAGE, error.message);
    assert_eq!(TIMED_OUT_CODE, error.code);
    assert_eq!(TRANSPORT_ERROR_DOMAIN, error.domain);
    Ok(())
}

#[tokio::test]
async fn test_unrecognized_transport_error_keeps_the_unknown_code() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/loop").method(GET);
        then.status(302).header("Location", server.url("/loop").as_str());
    });

    let client = reqwest::Client::new();
    let request = client.get(server.url("/loop")).build()?;
    let response = execute(&client, request).await;

    assert!(response.response.is_none());
    let error = response.error.unwrap();
    assert_eq!(UNKNOWN_CODE, error.code);
    assert_eq!(TRANSPORT_ERROR_DOMAIN, error.domain);
    Ok(())
}

#[tokio::test]
async fn test_refused_connection_yields_the_connectivity_diagnostic() -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let request = client.get("http://127.0.0.1:1/unreachable").build()?;
    let response = execute(&client, request).await;

    assert!(response.response.is_none());
    let error = response.error.unwrap();
    assert_eq!(NO_CONNECTIVITY_MESSAGE, error.message);
    assert_eq!(TIMED_OUT_CODE, error.code);
    Ok(())
}

#[tokio::test]
async fn test_connectivity_code_is_kept_distinct_when_configured() -> anyhow::Result<()> {
    let config = NormalizeConfig {
        distinct_offline_code: true,
    };
    let client = reqwest::Client::new();
    let request = client.get("http://127.0.0.1:1/unreachable").build()?;
    let response = execute_with_config(&client, request, &config).await;

    let error = response.error.unwrap();
    assert_eq!(NO_CONNECTIVITY_MESSAGE, error.message);
    assert_eq!(NO_CONNECTIVITY_CODE, error.code);
    Ok(())
}

use httpmock::prelude::*;
use ovh::{compute_signature, Client, ErrorKind};
use ovh_core::time::{now, TimeDelta};
use serde_json::json;

#[tokio::test]
async fn test_signed_call() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let server = MockServer::start_async().await;
    let endpoint = server.url("/1.0");
    let body = r#"{"key":"ssh-ed25519 AAAA","keyName":"laptop"}"#;

    // The call picks its timestamp when it is sent, so expect every second around now.
    // Each mock only matches the signature of the url and body it receives.
    let start = now().timestamp();
    let mut mocks = Vec::new();
    for timestamp in start - 1..=start + 5 {
        let signature = compute_signature(
            "as",
            "ck",
            "POST",
            &format!("{endpoint}/me/sshKey"),
            body.as_bytes(),
            timestamp,
        );
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/1.0/me/sshKey")
                    .header("content-type", "application/json")
                    .header("x-auth-application", "ak")
                    .header("x-auth-consumer", "ck")
                    .header("x-auth-timestamp", timestamp.to_string())
                    .header("x-auth-signature", signature)
                    .body(body);
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"id": 42}"#);
            })
            .await;
        mocks.push(mock);
    }

    let client = Client::new(&endpoint, "ak", "as", "ck");
    let value = client
        .post("/me/sshKey", &json!({"key": "ssh-ed25519 AAAA", "keyName": "laptop"}))
        .await?;
    assert_eq!(value, json!({"id": 42}));

    let mut hits = 0;
    for mock in &mocks {
        hits += mock.hits_async().await;
    }
    assert_eq!(hits, 1);

    Ok(())
}

#[tokio::test]
async fn test_signed_call_api_error() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/1.0/me/sshKey/nope");
            then.status(404)
                .body(r#"{"message":"The requested object (name = nope) does not exist"}"#);
        })
        .await;
    let client = Client::new(server.url("/1.0"), "ak", "as", "ck");

    let err = client.get("/me/sshKey/nope").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    assert_eq!(err.message(), "404 Not Found");
    assert_eq!(
        err.body(),
        Some(r#"{"message":"The requested object (name = nope) does not exist"}"#)
    );

    mock.assert_async().await;
}

#[tokio::test]
async fn test_redirect_is_api_error() {
    let server = MockServer::start_async().await;
    let elsewhere = server
        .mock_async(|when, then| {
            when.path("/elsewhere");
            then.status(200).body(r#"{"id": 42}"#);
        })
        .await;
    let moved = server
        .mock_async(|when, then| {
            when.method(GET).path("/1.0/me");
            then.status(302).header("location", server.url("/elsewhere"));
        })
        .await;
    let client = Client::new(server.url("/1.0"), "ak", "as", "ck");

    let err = client.get("/me").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status().map(|s| s.as_u16()), Some(302));

    moved.assert_async().await;
    assert_eq!(elsewhere.hits_async().await, 0);
}

#[tokio::test]
async fn test_dot_segments_are_not_sent() {
    let server = MockServer::start_async().await;
    let time = server
        .mock_async(|when, then| {
            when.path("/1.0/auth/time");
            then.status(200).body("1700000000");
        })
        .await;
    let client = Client::new(server.url("/1.0"), "ak", "as", "ck");

    let err = client.get("/me/../auth/time").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert_eq!(time.hits_async().await, 0);
}

#[tokio::test]
async fn test_network_error() {
    // Nothing listens on port 1.
    let client = Client::new("http://127.0.0.1:1/1.0", "ak", "as", "ck");

    let err = client.get("/me").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[test]
fn test_blocking_poll_timeshift() -> anyhow::Result<()> {
    let remote = now().timestamp() + 3600;
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/1.0/auth/time")
            .header_missing("x-auth-signature");
        then.status(200).body(remote.to_string());
    });
    let client = ovh::blocking::Client::new(server.url("/1.0"), "", "", "")?;

    let offset = client.poll_timeshift()?;
    assert!(offset > TimeDelta::seconds(3590), "offset: {offset}");
    assert!(offset < TimeDelta::seconds(3610), "offset: {offset}");
    assert_eq!(client.clock_offset(), offset);

    mock.assert();
    Ok(())
}

#[test]
fn test_blocking_call_decode_error() -> anyhow::Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/1.0/me");
        then.status(200).body("not json");
    });
    let client = ovh::blocking::Client::new(server.url("/1.0"), "ak", "as", "ck")?;

    let err = client.get("/me").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    mock.assert();
    Ok(())
}

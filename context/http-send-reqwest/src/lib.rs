//! [`HttpSend`] implementation backed by [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use ovh_core::{Error, HttpSend, Result};
use reqwest::redirect::Policy;
use reqwest::{Client, Request};

/// ReqwestHttpSend sends requests with a [`reqwest::Client`].
///
/// The response body is always collected in full before returning.
#[derive(Debug, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
    timeout: Option<Duration>,
}

impl Default for ReqwestHttpSend {
    /// Create a ReqwestHttpSend with a client that never follows redirects.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, like [`reqwest::Client::new`].
    fn default() -> Self {
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("TLS backend must be initialized");
        Self::new(client)
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    ///
    /// Signed requests must not be replayed to another url, so `client` should be built
    /// with [`Policy::none`]. A followed redirect hides the redirect status from callers.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Set a timeout applied to every request, from connecting until the body is read.
    ///
    /// Without it, only the timeouts configured on the inner client apply.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The per request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let mut req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request").with_source(anyhow::Error::new(e))
        })?;
        if let Some(timeout) = self.timeout {
            *req.timeout_mut() = Some(timeout);
        }

        debug!("sending request: {} {}", req.method(), req.url());
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                Error::network("failed to execute request").with_source(anyhow::Error::new(e))
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::network("failed to read response body").with_source(anyhow::Error::new(e))
            })?;
        debug!("got response: {} ({} bytes)", parts.status, bs.len());

        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use ovh_core::{Context, ErrorKind};

    #[test]
    fn test_timeout() {
        let send = ReqwestHttpSend::default();
        assert_eq!(send.timeout(), None);

        let send = send.with_timeout(Duration::from_secs(10));
        assert_eq!(send.timeout(), Some(Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let ctx = Context::new()
            .with_http_send(ReqwestHttpSend::default().with_timeout(Duration::from_secs(5)));

        let req = http::Request::get("http://127.0.0.1:1/1.0/auth/time")
            .body(Bytes::new())
            .unwrap();

        let err = ctx.http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/1.0/auth/time");
                then.status(200)
                    .body("1700000000")
                    .delay(Duration::from_secs(5));
            })
            .await;

        let ctx = Context::new()
            .with_http_send(ReqwestHttpSend::default().with_timeout(Duration::from_millis(200)));
        let req = http::Request::get(server.url("/1.0/auth/time"))
            .body(Bytes::new())
            .unwrap();

        let err = ctx.http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_redirect_is_not_followed() {
        let server = MockServer::start_async().await;
        let moved = server
            .mock_async(|when, then| {
                when.method(GET).path("/1.0/me");
                then.status(302).header("location", "/elsewhere");
            })
            .await;
        let elsewhere = server
            .mock_async(|when, then| {
                when.path("/elsewhere");
                then.status(200).body(r#"{"id":42}"#);
            })
            .await;

        let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
        let req = http::Request::get(server.url("/1.0/me"))
            .header("x-auth-consumer", "ck")
            .body(Bytes::new())
            .unwrap();

        let resp = ctx.http_send(req).await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::FOUND);
        assert_eq!(resp.headers()["location"], "/elsewhere");
        moved.assert_async().await;
        assert_eq!(elsewhere.hits_async().await, 0);
    }
}

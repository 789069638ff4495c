//! A blocking client.
//!
//! [`Client`] wraps the async [`crate::Client`] and drives each call to completion on a
//! private current-thread runtime, so every method blocks the calling thread until the
//! single request it issues is done.
//!
//! # Note
//!
//! Do not create, use or drop a blocking client from within an async runtime: the inner
//! runtime refuses to block a thread that is already driving async tasks.

use std::sync::Arc;

use http::Method;
use ovh_core::time::TimeDelta;
use ovh_core::{Context, Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::{Config, Credential};

/// Blocking counterpart of [`crate::Client`].
#[derive(Debug, Clone)]
pub struct Client {
    inner: crate::Client,
    rt: Arc<Runtime>,
}

impl Client {
    /// Create a blocking client, see [`crate::Client::new`].
    pub fn new(
        endpoint: impl Into<String>,
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        consumer_key: impl Into<String>,
    ) -> Result<Self> {
        Self::from_async(crate::Client::new(
            endpoint,
            application_key,
            application_secret,
            consumer_key,
        ))
    }

    /// Create a blocking client from a [`Config`], see [`crate::Client::from_config`].
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        Self::from_async(crate::Client::from_config(ctx, config)?)
    }

    /// Create a blocking client from the `OVH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_async(crate::Client::from_env()?)
    }

    /// Wrap an async client. The clock offset stays shared with `inner`.
    pub fn from_async(inner: crate::Client) -> Result<Self> {
        let rt = Builder::new_current_thread().enable_all().build().map_err(|e| {
            Error::unexpected("failed to start blocking runtime").with_source(anyhow::Error::new(e))
        })?;

        Ok(Self {
            inner,
            rt: Arc::new(rt),
        })
    }

    /// Borrow the wrapped async client.
    pub fn as_async(&self) -> &crate::Client {
        &self.inner
    }

    /// Base url of the endpoint.
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }

    /// Credential used to sign calls.
    pub fn credential(&self) -> &Credential {
        self.inner.credential()
    }

    /// Current offset between the server clock and the local clock.
    pub fn clock_offset(&self) -> TimeDelta {
        self.inner.clock_offset()
    }

    /// Set the offset between the server clock and the local clock.
    pub fn set_clock_offset(&self, offset: TimeDelta) {
        self.inner.set_clock_offset(offset)
    }

    /// See [`crate::Client::poll_timeshift`].
    pub fn poll_timeshift(&self) -> Result<TimeDelta> {
        self.rt.block_on(self.inner.poll_timeshift())
    }

    /// See [`crate::Client::call`].
    pub fn call<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.rt.block_on(self.inner.call(method, path, body))
    }

    /// See [`crate::Client::call_as`].
    pub fn call_as<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.rt.block_on(self.inner.call_as(method, path, body))
    }

    /// `GET` `path`.
    pub fn get(&self, path: &str) -> Result<Value> {
        self.rt.block_on(self.inner.get(path))
    }

    /// `POST` `body` to `path`.
    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.rt.block_on(self.inner.post(path, body))
    }

    /// `PUT` `body` to `path`.
    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.rt.block_on(self.inner.put(path, body))
    }

    /// `DELETE` `path`.
    pub fn delete(&self, path: &str) -> Result<Value> {
        self.rt.block_on(self.inner.delete(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ovh_core::ErrorKind;

    #[test]
    fn test_shares_offset_with_async_client() {
        let inner = crate::Client::new("https://eu.api.ovh.com/1.0", "ak", "as", "ck");
        let client = Client::from_async(inner.clone()).unwrap();

        client.set_clock_offset(TimeDelta::seconds(12));
        assert_eq!(inner.clock_offset(), TimeDelta::seconds(12));
        assert_eq!(client.endpoint(), "https://eu.api.ovh.com/1.0");
    }

    #[test]
    fn test_call_without_transport() {
        let client = Client::from_config(
            Context::new(),
            Config::new()
                .with_endpoint("ovh-eu")
                .with_application_key("ak")
                .with_application_secret("as")
                .with_consumer_key("ck"),
        )
        .unwrap();

        let err = client.get("/me").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}

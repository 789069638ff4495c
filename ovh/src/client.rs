use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use http::{Method, StatusCode};
use log::debug;
use ovh_core::time::{now, parse_unix_timestamp, DateTime, TimeDelta};
use ovh_core::{Context, Error, OsEnv, Result};
use ovh_http_send_reqwest::ReqwestHttpSend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::constants::TIME_PATH;
use crate::sign_request::RequestSigner;
use crate::{Config, Credential};

/// Client issues signed calls against one OVH API endpoint.
///
/// Every call is a single request: no retry, no pagination, no streaming. The client is
/// cheap to clone, clones share the clock offset.
///
/// ```no_run
/// use ovh::{Client, Endpoint};
///
/// # async fn example() -> ovh_core::Result<()> {
/// let client = Client::new(Endpoint::OvhEu, "app_key", "app_secret", "consumer_key");
/// client.poll_timeshift().await?;
///
/// let me = client.get("/me").await?;
/// println!("{}", me["nichandle"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    endpoint: String,
    signer: RequestSigner,
    /// Offset between the server and the local clock, in nanoseconds.
    clock_offset: Arc<AtomicI64>,
    time: Option<DateTime>,
}

impl Client {
    /// Create a client for `endpoint` with the given credential and no clock offset.
    ///
    /// Nothing is validated here; empty credentials are fine for
    /// [`Client::poll_timeshift`]. Requests are sent with a default reqwest client.
    pub fn new(
        endpoint: impl Into<String>,
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        consumer_key: impl Into<String>,
    ) -> Self {
        Self::with_credential(
            default_context(),
            endpoint.into(),
            Credential::new(application_key, application_secret, consumer_key),
        )
    }

    /// Create a client from a [`Config`], using `ctx` to send requests.
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let (endpoint, credential) = config.resolve()?;
        Ok(Self::with_credential(ctx, endpoint, credential))
    }

    /// Create a client from the `OVH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let ctx = default_context();
        let config = Config::new().from_env(&ctx);
        Self::from_config(ctx, config)
    }

    fn with_credential(ctx: Context, endpoint: String, credential: Credential) -> Self {
        Self {
            ctx,
            endpoint,
            signer: RequestSigner::new(credential),
            clock_offset: Arc::new(AtomicI64::new(0)),
            time: None,
        }
    }

    /// Replace the context used to send requests.
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Specify the local time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub(crate) fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Base url of the endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Credential used to sign calls.
    pub fn credential(&self) -> &Credential {
        self.signer.credential()
    }

    /// Current offset between the server clock and the local clock.
    pub fn clock_offset(&self) -> TimeDelta {
        TimeDelta::nanoseconds(self.clock_offset.load(Ordering::Relaxed))
    }

    /// Set the offset between the server clock and the local clock.
    ///
    /// Offsets beyond about 292 years are saturated.
    pub fn set_clock_offset(&self, offset: TimeDelta) {
        let nanos = offset.num_nanoseconds().unwrap_or(if offset < TimeDelta::zero() {
            i64::MIN
        } else {
            i64::MAX
        });
        self.clock_offset.store(nanos, Ordering::Relaxed);
    }

    fn now(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    /// Unix timestamp in seconds of the server clock, as estimated by the local clock and
    /// the clock offset.
    pub fn timestamp(&self) -> Result<i64> {
        let offset = self.clock_offset();
        self.now()
            .checked_add_signed(offset)
            .map(|t| t.timestamp())
            .ok_or_else(|| Error::unexpected(format!("clock offset out of range: {offset}")))
    }

    /// Measure the offset between the server clock and the local clock.
    ///
    /// Sends an unauthenticated `GET <endpoint>/auth/time`, which answers with the server
    /// Unix time as plain text. The new offset is stored for all following calls and
    /// returned.
    pub async fn poll_timeshift(&self) -> Result<TimeDelta> {
        let local = self.now();
        let url = format!("{}{TIME_PATH}", self.endpoint);
        let req = http::Request::get(url.as_str()).body(Bytes::new())?;

        let resp = self.ctx.http_send_as_string(req).await?;
        let status = resp.status();
        if status.as_u16() >= 300 {
            return Err(api_error(status, resp.body().as_bytes()));
        }

        let remote = parse_unix_timestamp(resp.body())?;
        let offset = remote - local;
        self.set_clock_offset(offset);
        debug!("clock offset of {} is {offset}", self.endpoint);

        Ok(offset)
    }

    /// Issue a signed call and decode the response as JSON.
    ///
    /// `path` is appended to the endpoint as-is, it must start with `/` and is not
    /// percent encoded. `body` is serialized to JSON, `None` sends an empty body.
    ///
    /// An empty response body decodes to [`Value::Null`].
    ///
    /// ```no_run
    /// # async fn example(client: ovh::Client) -> ovh_core::Result<()> {
    /// use http::Method;
    ///
    /// let zones = client.call(Method::GET, "/domain/zone", None::<&()>).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.call_as(method, path, body).await
    }

    /// Issue a signed call and decode the response into `T`.
    pub async fn call_as<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = match body {
            Some(body) => serde_json::to_vec(body).map(Bytes::from).map_err(|e| {
                Error::encode("failed to serialize request body").with_source(anyhow::Error::new(e))
            })?,
            None => Bytes::new(),
        };

        let bs = self.send(method, path, body).await?;
        decode(&bs)
    }

    /// `GET` `path`.
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.call(Method::GET, path, None::<&()>).await
    }

    /// `POST` `body` to `path`.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.call(Method::POST, path, Some(body)).await
    }

    /// `PUT` `body` to `path`.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.call(Method::PUT, path, Some(body)).await
    }

    /// `DELETE` `path`.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.call(Method::DELETE, path, None::<&()>).await
    }

    async fn send(&self, method: Method, path: &str, body: Bytes) -> Result<Bytes> {
        let url = format!("{}{path}", self.endpoint);
        let timestamp = self.timestamp()?;
        let req = self.signer.build_request(method, &url, body, timestamp)?;

        let (parts, bs) = self.ctx.http_send(req).await?.into_parts();
        if parts.status.as_u16() >= 300 {
            debug!("call to {url} failed with {}", parts.status);
            return Err(api_error(parts.status, &bs));
        }

        Ok(bs)
    }
}

fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// An `Api` error for `status`, carrying the response body unless it is empty.
fn api_error(status: StatusCode, body: &[u8]) -> Error {
    let err = Error::api(status);
    if body.is_empty() {
        err
    } else {
        err.with_body(String::from_utf8_lossy(body))
    }
}

fn decode<T: DeserializeOwned>(bs: &[u8]) -> Result<T> {
    let decoded = if bs.is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(bs)
    };

    decoded.map_err(|e| {
        Error::decode("failed to decode response body").with_source(anyhow::Error::new(e))
    })
}

//! Signed calls to the OVH API.
//!
//! Every call is signed with the application secret and the consumer key, and stamped with
//! the server time as estimated from the local clock plus a measured clock offset.
//!
//! ## Example
//!
//! ```no_run
//! use ovh::{Client, Endpoint};
//! use serde_json::json;
//!
//! # async fn example() -> ovh_core::Result<()> {
//! let client = Client::new(Endpoint::OvhEu, "app_key", "app_secret", "consumer_key");
//!
//! // Keep the signature timestamps inside the server validity window.
//! client.poll_timeshift().await?;
//!
//! let record = client
//!     .post(
//!         "/domain/zone/example.com/record",
//!         &json!({"fieldType": "A", "subDomain": "www", "target": "10.0.0.1"}),
//!     )
//!     .await?;
//! println!("{record}");
//! # Ok(())
//! # }
//! ```
//!
//! Errors carry an [`ErrorKind`] so that callers can pick their own retry policy, see
//! [`Error::is_retryable`].

mod constants;

mod endpoint;
pub use endpoint::*;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{compute_signature, RequestSigner};

mod client;
pub use client::Client;

#[cfg(feature = "blocking")]
pub mod blocking;

pub use ovh_core::{Context, Error, ErrorKind, Result};

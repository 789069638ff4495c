use std::fmt::{Debug, Formatter};

use ovh_core::utils::Redact;
use ovh_core::{Context, Error, Result};

use crate::constants::*;
use crate::{Credential, Endpoint};

/// Config carries all the configuration needed to build a [`crate::Client`].
#[derive(Clone, Default)]
pub struct Config {
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OVH_ENDPOINT`]
    ///
    /// Either a known name like `ovh-eu` or a literal base url.
    pub endpoint: Option<String>,
    /// `application_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OVH_APPLICATION_KEY`]
    pub application_key: Option<String>,
    /// `application_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OVH_APPLICATION_SECRET`]
    pub application_secret: Option<String>,
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OVH_CONSUMER_KEY`]
    pub consumer_key: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set endpoint, by name or base url.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set application_key
    pub fn with_application_key(mut self, application_key: impl Into<String>) -> Self {
        self.application_key = Some(application_key.into());
        self
    }

    /// Set application_secret
    pub fn with_application_secret(mut self, application_secret: impl Into<String>) -> Self {
        self.application_secret = Some(application_secret.into());
        self
    }

    /// Set consumer_key
    pub fn with_consumer_key(mut self, consumer_key: impl Into<String>) -> Self {
        self.consumer_key = Some(consumer_key.into());
        self
    }

    /// Load config from env.
    ///
    /// Values already set take precedence over the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(OVH_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OVH_APPLICATION_KEY) {
            self.application_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OVH_APPLICATION_SECRET) {
            self.application_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OVH_CONSUMER_KEY) {
            self.consumer_key.get_or_insert(v);
        }

        self
    }

    /// Resolve the endpoint base url and the credential.
    ///
    /// Returns [`ovh_core::ErrorKind::ConfigInvalid`] naming the first missing field.
    pub fn resolve(self) -> Result<(String, Credential)> {
        let endpoint = self.endpoint.ok_or_else(|| missing("endpoint", OVH_ENDPOINT))?;
        let application_key = self
            .application_key
            .ok_or_else(|| missing("application_key", OVH_APPLICATION_KEY))?;
        let application_secret = self
            .application_secret
            .ok_or_else(|| missing("application_secret", OVH_APPLICATION_SECRET))?;
        let consumer_key = self
            .consumer_key
            .ok_or_else(|| missing("consumer_key", OVH_CONSUMER_KEY))?;

        Ok((
            Endpoint::resolve(&endpoint),
            Credential::new(application_key, application_secret, consumer_key),
        ))
    }
}

fn missing(field: &str, env: &str) -> Error {
    Error::config_invalid(format!("{field} is required, set it or env {env}"))
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field(
                "application_key",
                &self.application_key.as_ref().map(Redact::from),
            )
            .field(
                "application_secret",
                &self.application_secret.as_ref().map(Redact::from),
            )
            .field("consumer_key", &self.consumer_key.as_ref().map(Redact::from))
            .finish()
    }
}

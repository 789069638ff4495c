//! Known endpoints of the OVH API family.
//!
//! Every brand and region shares the same authentication scheme, only the base url differs.

use std::fmt;
use std::str::FromStr;

use ovh_core::Error;

/// Base url of OVH Europe.
pub const ENDPOINT_EU_OVHCOM: &str = "https://eu.api.ovh.com/1.0";
/// Base url of OVH North America.
pub const ENDPOINT_CA_OVHCOM: &str = "https://ca.api.ovh.com/1.0";
/// Base url of Kimsufi Europe.
pub const ENDPOINT_EU_KIMSUFI: &str = "https://eu.api.kimsufi.com/1.0";
/// Base url of Kimsufi North America.
pub const ENDPOINT_CA_KIMSUFI: &str = "https://ca.api.kimsufi.com/1.0";
/// Base url of So you Start Europe.
pub const ENDPOINT_EU_SOYOUSTART: &str = "https://eu.api.soyoustart.com/1.0";
/// Base url of So you Start North America.
pub const ENDPOINT_CA_SOYOUSTART: &str = "https://ca.api.soyoustart.com/1.0";
/// Base url of RunAbove. Both regions share it.
pub const ENDPOINT_EU_RUNABOVE: &str = "https://api.runabove.com/1.0";
/// Base url of RunAbove. Both regions share it.
pub const ENDPOINT_CA_RUNABOVE: &str = "https://api.runabove.com/1.0";

/// Endpoint names a brand and region of the OVH API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `ovh-eu`
    OvhEu,
    /// `ovh-ca`
    OvhCa,
    /// `kimsufi-eu`
    KimsufiEu,
    /// `kimsufi-ca`
    KimsufiCa,
    /// `soyoustart-eu`
    SoyoustartEu,
    /// `soyoustart-ca`
    SoyoustartCa,
    /// `runabove-eu`
    RunaboveEu,
    /// `runabove-ca`
    RunaboveCa,
}

impl Endpoint {
    /// All known endpoints.
    pub const ALL: [Endpoint; 8] = [
        Endpoint::OvhEu,
        Endpoint::OvhCa,
        Endpoint::KimsufiEu,
        Endpoint::KimsufiCa,
        Endpoint::SoyoustartEu,
        Endpoint::SoyoustartCa,
        Endpoint::RunaboveEu,
        Endpoint::RunaboveCa,
    ];

    /// Base url of this endpoint, without trailing slash.
    pub fn url(self) -> &'static str {
        match self {
            Endpoint::OvhEu => ENDPOINT_EU_OVHCOM,
            Endpoint::OvhCa => ENDPOINT_CA_OVHCOM,
            Endpoint::KimsufiEu => ENDPOINT_EU_KIMSUFI,
            Endpoint::KimsufiCa => ENDPOINT_CA_KIMSUFI,
            Endpoint::SoyoustartEu => ENDPOINT_EU_SOYOUSTART,
            Endpoint::SoyoustartCa => ENDPOINT_CA_SOYOUSTART,
            Endpoint::RunaboveEu => ENDPOINT_EU_RUNABOVE,
            Endpoint::RunaboveCa => ENDPOINT_CA_RUNABOVE,
        }
    }

    /// Short name of this endpoint, like `ovh-eu`.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::OvhEu => "ovh-eu",
            Endpoint::OvhCa => "ovh-ca",
            Endpoint::KimsufiEu => "kimsufi-eu",
            Endpoint::KimsufiCa => "kimsufi-ca",
            Endpoint::SoyoustartEu => "soyoustart-eu",
            Endpoint::SoyoustartCa => "soyoustart-ca",
            Endpoint::RunaboveEu => "runabove-eu",
            Endpoint::RunaboveCa => "runabove-ca",
        }
    }

    /// Resolve an endpoint given either as a known name or as a literal base url.
    ///
    /// Unknown values are returned as-is so that private or future endpoints keep working.
    pub fn resolve(value: &str) -> String {
        match value.parse::<Endpoint>() {
            Ok(endpoint) => endpoint.url().to_string(),
            Err(_) => value.to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::config_invalid(format!("unknown endpoint name: {s}")))
    }
}

impl From<Endpoint> for String {
    fn from(value: Endpoint) -> Self {
        value.url().to_string()
    }
}

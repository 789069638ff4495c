// Headers used in signed calls.
pub const X_AUTH_APPLICATION: &str = "x-auth-application";
pub const X_AUTH_CONSUMER: &str = "x-auth-consumer";
pub const X_AUTH_SIGNATURE: &str = "x-auth-signature";
pub const X_AUTH_TIMESTAMP: &str = "x-auth-timestamp";

// Env values used to load the config.
pub const OVH_ENDPOINT: &str = "OVH_ENDPOINT";
pub const OVH_APPLICATION_KEY: &str = "OVH_APPLICATION_KEY";
pub const OVH_APPLICATION_SECRET: &str = "OVH_APPLICATION_SECRET";
pub const OVH_CONSUMER_KEY: &str = "OVH_CONSUMER_KEY";

/// Path of the unauthenticated server time endpoint.
pub const TIME_PATH: &str = "/auth/time";

/// Prefix of every signature, naming the signing scheme version.
pub const SIGNATURE_PREFIX: &str = "$1$";


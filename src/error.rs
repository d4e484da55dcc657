use thiserror::Error;

/// Errors raised while talking to the contextualization broker.
///
/// Variants carry the request phase (`action`) so a caller polling in a loop
/// can tell a failed session creation from a failed status poll. None of the
/// messages ever include the session secret.
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("failed to contact broker during {action}: {source}")]
    Transport {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected broker status during {action}: {status}")]
    UnexpectedStatus {
        action: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("broker create response carried no Location header")]
    MissingLocation,

    #[error("failed to decode broker response during {action}: {source}")]
    Decode {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors surfaced by a provisioning backend.
///
/// The orchestration core never rewraps these; they pass through to the
/// caller exactly as the backend raised them.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("failed to create nodes for group '{group}': {reason}")]
    CreateFailed { group: String, reason: String },

    #[error("failed to destroy node {uuid}: {reason}")]
    DestroyFailed { uuid: String, reason: String },

    #[error("failed to reboot node {uuid}: {reason}")]
    RebootFailed { uuid: String, reason: String },

    #[error("{0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Broker(#[from] BrokerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// A node spec named a size the backend's catalog does not carry.
    /// Raised before any provisioning call is attempted for that spec.
    #[error("size '{size}' not found in the provisioning backend catalog")]
    SizeNotFound { size: String },

    /// Cluster-wide teardown finished, but one or more nodes failed to
    /// destroy. Every node was still attempted.
    #[error("cluster teardown finished with {} failed node(s)", .failures.len())]
    PartialTeardown { failures: Vec<ProvisionError> },

    /// Cluster-wide reboot finished, but one or more nodes failed to reboot.
    #[error("cluster reboot finished with {} failed node(s)", .failures.len())]
    PartialReboot { failures: Vec<ProvisionError> },
}

pub type Result<T> = std::result::Result<T, Error>;

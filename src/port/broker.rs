//! Contextualization broker port.

use async_trait::async_trait;

use crate::domain::{ContextResource, ContextStatus};
use crate::error::BrokerError;

/// Capability to create and poll contextualization sessions.
///
/// The broker never pushes; completion is observed only through repeated
/// [`get_status`](ContextBroker::get_status) calls. Retry, backoff, and poll
/// cadence are caller concerns.
#[async_trait]
pub trait ContextBroker: Send + Sync {
    /// Create a new session. Called exactly once per cluster.
    async fn create_context(&self) -> Result<ContextResource, BrokerError>;

    /// Fetch a fresh snapshot of the session behind `uri`.
    async fn get_status(&self, uri: &str) -> Result<ContextStatus, BrokerError>;
}

//! Cluster-document port.

use crate::domain::{ContextResource, NodeSpec};

/// A parsed cluster description, able to emit node specifications.
///
/// Document parsing itself is an external concern; by the time a document
/// reaches the driver it is already structurally valid. `build_specs`
/// consumes the session so per-group userdata can embed the broker URI and
/// secret for in-VM contextualization agents.
pub trait ClusterDocument: Send + Sync {
    /// Emit the document's node specifications, in document order.
    fn build_specs(&self, context: &ContextResource) -> Vec<NodeSpec>;
}

//! Capability traits at the system's seams.
//!
//! The driver is written against these, never against concrete backends:
//!
//! - [`ContextBroker`] — session creation and polling.
//! - [`ProvisioningDriver`] / [`ProvisionedNode`] — compute backend.
//! - [`ClusterDocument`] — cluster-description parsing.

pub mod broker;
pub mod document;
pub mod provision;

pub use broker::ContextBroker;
pub use document::ClusterDocument;
pub use provision::{
    CreateNodeParams, NodeSize, Overrides, ProvisionedNode, ProvisioningDriver,
};

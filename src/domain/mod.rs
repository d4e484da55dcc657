//! Backend-agnostic domain types: session handles, status snapshots, node
//! specifications, and the in-memory cluster aggregate.

pub mod cluster;
pub mod context;
pub mod spec;

pub use cluster::{Cluster, ClusterMember};
pub use context::{ContextNode, ContextNodeIdentity, ContextResource, ContextState, ContextStatus};
pub use spec::NodeSpec;

//! Builders for domain primitives used across tests.

use std::sync::Mutex;

use crate::domain::{
    ContextNode, ContextNodeIdentity, ContextResource, ContextStatus, NodeSpec,
};
use crate::port::ClusterDocument;

pub fn resource(uri: &str) -> ContextResource {
    ContextResource::new(uri, "https://broker.test/ctx", "ctx-1", "test-secret")
}

pub fn identity(iface: &str, hostname: &str) -> ContextNodeIdentity {
    ContextNodeIdentity {
        interface: iface.into(),
        ip: "10.0.0.1".into(),
        hostname: hostname.into(),
        pubkey: "ssh-rsa AAAA".into(),
    }
}

pub fn reported_node(identities: Vec<ContextNodeIdentity>) -> ContextNode {
    ContextNode {
        identities,
        ok_occurred: true,
        error_occurred: false,
        error_code: None,
        error_message: None,
    }
}

pub fn pending_status(expected: usize) -> ContextStatus {
    ContextStatus {
        nodes: vec![],
        expected_count: expected,
        complete: false,
        error: false,
    }
}

pub fn complete_status(nodes: Vec<ContextNode>) -> ContextStatus {
    ContextStatus {
        expected_count: nodes.len(),
        nodes,
        complete: true,
        error: false,
    }
}

/// A pre-parsed cluster document with fixed specs. Records the session URI it
/// was last given so tests can assert on context propagation.
pub struct StaticDocument {
    specs: Vec<NodeSpec>,
    seen_uri: Mutex<Option<String>>,
}

impl StaticDocument {
    pub fn new(specs: Vec<NodeSpec>) -> Self {
        Self {
            specs,
            seen_uri: Mutex::new(None),
        }
    }

    /// Session URI from the last `build_specs` call, if any.
    pub fn seen_uri(&self) -> Option<String> {
        self.seen_uri.lock().unwrap().clone()
    }
}

impl ClusterDocument for StaticDocument {
    fn build_specs(&self, context: &ContextResource) -> Vec<NodeSpec> {
        *self.seen_uri.lock().unwrap() = Some(context.uri.clone());
        self.specs.clone()
    }
}

//! Mock provisioning backend.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::ProvisionError;
use crate::port::{CreateNodeParams, NodeSize, ProvisionedNode, ProvisioningDriver};

/// A fake instance with counted lifecycle calls.
pub struct MockNode {
    uuid: String,
    destroy_count: AtomicU32,
    reboot_count: AtomicU32,
    fail_destroy: bool,
    fail_reboot: bool,
}

impl MockNode {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            destroy_count: AtomicU32::new(0),
            reboot_count: AtomicU32::new(0),
            fail_destroy: false,
            fail_reboot: false,
        }
    }

    #[must_use]
    pub fn failing_destroy(mut self) -> Self {
        self.fail_destroy = true;
        self
    }

    #[must_use]
    pub fn failing_reboot(mut self) -> Self {
        self.fail_reboot = true;
        self
    }

    pub fn destroy_count(&self) -> u32 {
        self.destroy_count.load(Ordering::SeqCst)
    }

    pub fn reboot_count(&self) -> u32 {
        self.reboot_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProvisionedNode for MockNode {
    fn uuid(&self) -> String {
        self.uuid.clone()
    }

    async fn destroy(&self) -> Result<(), ProvisionError> {
        self.destroy_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_destroy {
            Err(ProvisionError::DestroyFailed {
                uuid: self.uuid.clone(),
                reason: "scripted failure".into(),
            })
        } else {
            Ok(())
        }
    }

    async fn reboot(&self) -> Result<(), ProvisionError> {
        self.reboot_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_reboot {
            Err(ProvisionError::RebootFailed {
                uuid: self.uuid.clone(),
                reason: "scripted failure".into(),
            })
        } else {
            Ok(())
        }
    }
}

/// Scripted provisioning backend.
///
/// Serves a fixed size catalog, records every creation call, and mints one
/// [`MockNode`] per requested instance (uuid `<group>-<n>`). Minted nodes are
/// retained so tests can assert on their lifecycle counters afterwards.
#[derive(Default)]
pub struct MockProvisioner {
    sizes: Vec<NodeSize>,
    create_calls: Mutex<Vec<CreateNodeParams>>,
    created: Mutex<Vec<Arc<MockNode>>>,
    fail_group: Option<String>,
    fail_nodes: bool,
}

impl MockProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sizes(mut self, sizes: Vec<NodeSize>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Fail `create_node` for the named group.
    #[must_use]
    pub fn failing_for_group(mut self, group: impl Into<String>) -> Self {
        self.fail_group = Some(group.into());
        self
    }

    /// Mint nodes whose destroy/reboot calls fail.
    #[must_use]
    pub fn with_failing_nodes(mut self) -> Self {
        self.fail_nodes = true;
        self
    }

    /// Every creation call seen so far, in order.
    pub fn create_calls(&self) -> Vec<CreateNodeParams> {
        self.create_calls.lock().unwrap().clone()
    }

    /// Every node minted so far, in creation order.
    pub fn created_nodes(&self) -> Vec<Arc<MockNode>> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProvisioningDriver for MockProvisioner {
    async fn list_sizes(&self) -> Result<Vec<NodeSize>, ProvisionError> {
        Ok(self.sizes.clone())
    }

    async fn create_node(
        &self,
        params: CreateNodeParams,
    ) -> Result<Vec<Arc<dyn ProvisionedNode>>, ProvisionError> {
        if self.fail_group.as_deref() == Some(params.name.as_str()) {
            return Err(ProvisionError::CreateFailed {
                group: params.name.clone(),
                reason: "scripted failure".into(),
            });
        }

        let mut minted: Vec<Arc<MockNode>> = Vec::new();
        for n in 0..params.min_count {
            let mut node = MockNode::new(format!("{}-{}", params.name, n));
            if self.fail_nodes {
                node = node.failing_destroy().failing_reboot();
            }
            minted.push(Arc::new(node));
        }

        self.create_calls.lock().unwrap().push(params);
        self.created.lock().unwrap().extend(minted.iter().cloned());

        Ok(minted
            .into_iter()
            .map(|node| node as Arc<dyn ProvisionedNode>)
            .collect())
    }
}

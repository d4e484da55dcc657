//! Cluster orchestration.
//!
//! [`ClusterDriver`] coordinates two independent remote systems — the
//! contextualization broker and a compute provisioning backend — into one
//! cluster-creation transaction. There is no native atomicity between them:
//! creation is strictly sequential with no compensation, so a failure partway
//! leaves the session and any already-provisioned groups exactly as they
//! were. Recovery is the caller's responsibility.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{Cluster, ClusterMember, ContextResource};
use crate::error::{Error, ProvisionError, Result};
use crate::port::{
    ClusterDocument, ContextBroker, CreateNodeParams, NodeSize, Overrides, ProvisioningDriver,
};

/// Orchestrates cluster creation, teardown, and reboot against injected
/// broker and provisioning capabilities.
pub struct ClusterDriver {
    broker: Arc<dyn ContextBroker>,
    provisioner: Arc<dyn ProvisioningDriver>,
}

impl ClusterDriver {
    pub fn new(broker: Arc<dyn ContextBroker>, provisioner: Arc<dyn ProvisioningDriver>) -> Self {
        Self {
            broker,
            provisioner,
        }
    }

    /// Handle to the driver's broker client.
    pub fn broker(&self) -> Arc<dyn ContextBroker> {
        Arc::clone(&self.broker)
    }

    /// Create a cluster: one broker session plus one provisioned instance
    /// group per node spec, in document order.
    ///
    /// An existing session may be passed in to resume against it; otherwise a
    /// fresh one is created first, so specs can embed its coordinates in
    /// their userdata. `overrides` merge into every group's creation
    /// parameters last and win on key conflicts.
    ///
    /// Groups are provisioned one at a time. On the first failure the error
    /// propagates immediately; earlier groups stay provisioned and no cluster
    /// is returned.
    pub async fn create_cluster(
        &self,
        document: &dyn ClusterDocument,
        context: Option<ContextResource>,
        overrides: &Overrides,
    ) -> Result<Cluster> {
        let context = match context {
            Some(context) => context,
            None => self.broker.create_context().await?,
        };

        let specs = document.build_specs(&context);
        info!(uri = %context.uri, groups = specs.len(), "Creating cluster");

        let mut cluster = Cluster::new(context.uri.clone(), Arc::clone(&self.broker));

        for spec in &specs {
            let size = self.resolve_size(&spec.size).await?;
            let mut params = CreateNodeParams::from_spec(spec, size);
            params.apply_overrides(overrides);

            debug!(
                group = %spec.name,
                size = %params.size.id,
                image = %params.image,
                count = spec.count,
                "Provisioning instance group"
            );

            let nodes = self.provisioner.create_node(params).await?;
            cluster.add_nodes(
                nodes
                    .into_iter()
                    .map(|node| ClusterMember::new(node, &spec.name)),
            );
        }

        info!(uuid = %cluster.uuid(), nodes = cluster.len(), "Cluster created");
        Ok(cluster)
    }

    /// Destroy every node in the cluster.
    ///
    /// Each destroy is attempted independently; failures are collected and
    /// reported together rather than aborting the sweep.
    pub async fn destroy_cluster(&self, cluster: &Cluster) -> Result<()> {
        info!(uuid = %cluster.uuid(), nodes = cluster.len(), "Destroying cluster");

        let mut failures: Vec<ProvisionError> = Vec::new();
        for member in cluster.nodes().values() {
            if let Err(err) = member.node().destroy().await {
                warn!(uuid = %member.uuid(), group = %member.group(), error = %err, "Node destroy failed");
                failures.push(err);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::PartialTeardown { failures })
        }
    }

    /// Reboot every node in the cluster, with the same continue-and-collect
    /// policy as teardown.
    pub async fn reboot_cluster(&self, cluster: &Cluster) -> Result<()> {
        info!(uuid = %cluster.uuid(), nodes = cluster.len(), "Rebooting cluster");

        let mut failures: Vec<ProvisionError> = Vec::new();
        for member in cluster.nodes().values() {
            if let Err(err) = member.node().reboot().await {
                warn!(uuid = %member.uuid(), group = %member.group(), error = %err, "Node reboot failed");
                failures.push(err);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::PartialReboot { failures })
        }
    }

    /// Resolve a symbolic size identifier against the backend's catalog.
    async fn resolve_size(&self, size_id: &str) -> Result<NodeSize> {
        let sizes = self.provisioner.list_sizes().await?;
        sizes
            .into_iter()
            .find(|size| size.id == size_id)
            .ok_or_else(|| Error::SizeNotFound {
                size: size_id.to_owned(),
            })
    }
}

//! In-memory cluster aggregate.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::context::ContextStatus;
use crate::error::BrokerError;
use crate::port::{ContextBroker, ProvisionedNode};

/// One provisioned instance tracked by a cluster, tagged with the name of the
/// node-spec group it was created from.
///
/// The instance's lifecycle is owned by the provisioning backend; this is a
/// non-owning handle whose membership in a cluster lasts only for the life of
/// the process.
#[derive(Clone)]
pub struct ClusterMember {
    node: Arc<dyn ProvisionedNode>,
    group: String,
}

impl ClusterMember {
    pub fn new(node: Arc<dyn ProvisionedNode>, group: impl Into<String>) -> Self {
        Self {
            node,
            group: group.into(),
        }
    }

    /// Stable backend identifier for the instance.
    pub fn uuid(&self) -> String {
        self.node.uuid()
    }

    /// Name of the node-spec group this instance belongs to.
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn node(&self) -> &Arc<dyn ProvisionedNode> {
        &self.node
    }
}

impl fmt::Debug for ClusterMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterMember")
            .field("uuid", &self.node.uuid())
            .field("group", &self.group)
            .finish()
    }
}

/// A cluster is a collection of provisioned nodes sharing one
/// contextualization session.
///
/// `id` is the session URI; `uuid` is derived from it once at construction.
/// The node map is keyed by each member's backend uuid — inserting a member
/// with a colliding uuid replaces the prior entry. Intended for a single
/// logical owner; nothing here is synchronized for concurrent mutation.
pub struct Cluster {
    id: String,
    uuid: Uuid,
    name: String,
    nodes: BTreeMap<String, ClusterMember>,
    broker: Arc<dyn ContextBroker>,
}

impl Cluster {
    pub fn new(id: impl Into<String>, broker: Arc<dyn ContextBroker>) -> Self {
        let id = id.into();
        let uuid = Self::derive_uuid(&id);
        Self {
            id,
            uuid,
            name: String::new(),
            nodes: BTreeMap::new(),
            broker,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Deterministic cluster uuid: a v5 (name-based) UUID of the session URI.
    #[must_use]
    pub fn derive_uuid(id: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes())
    }

    /// Session URI, doubling as the cluster identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a member, keyed by its uuid. Last write wins on collision.
    pub fn add_node(&mut self, member: ClusterMember) {
        self.nodes.insert(member.uuid(), member);
    }

    pub fn add_nodes(&mut self, members: impl IntoIterator<Item = ClusterMember>) {
        for member in members {
            self.add_node(member);
        }
    }

    pub fn nodes(&self) -> &BTreeMap<String, ClusterMember> {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Poll the broker for a fresh contextualization snapshot.
    pub async fn get_status(&self) -> Result<ContextStatus, BrokerError> {
        self.broker.get_status(&self.id).await
    }
}

impl fmt::Debug for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cluster")
            .field("id", &self.id)
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cluster: uuid={}, name={}, total nodes={}",
            self.uuid,
            self.name,
            self.nodes.len()
        )
    }
}

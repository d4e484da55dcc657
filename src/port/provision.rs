//! Provisioning backend port.
//!
//! The compute backend (size catalogs, image registries, instance lifecycle)
//! is an external collaborator. These traits define the capability surface
//! the cluster driver consumes; concrete backends are injected at
//! construction, selected by configuration rather than subclassing.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::NodeSpec;
use crate::error::ProvisionError;

/// One entry from a backend's size catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSize {
    /// Catalog identifier, matched against [`NodeSpec::size`].
    pub id: String,
    pub name: String,
    pub ram_mb: Option<u64>,
    pub disk_gb: Option<u64>,
}

impl NodeSize {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ram_mb: None,
            disk_gb: None,
        }
    }
}

/// Caller-supplied parameter overrides, merged last when building
/// [`CreateNodeParams`]. Keys matching a typed parameter replace it; anything
/// else is passed to the backend verbatim through `extra`.
///
/// `size`, `mincount`, and `maxcount` are structural: the size comes from the
/// catalog lookup and the counts from the spec's atomic batch. Overrides for
/// them are ignored rather than smuggled past the typed fields as extras.
pub type Overrides = BTreeMap<String, String>;

/// Parameters for one node-creation call.
///
/// `min_count == max_count` — an instance group is provisioned as an atomic
/// batch. Optional parameters that are `None` are absent, not empty: a
/// backend must never receive a null or empty placeholder for them.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateNodeParams {
    pub name: String,
    pub size: NodeSize,
    pub image: String,
    pub min_count: u32,
    pub max_count: u32,
    pub userdata: Option<String>,
    pub keyname: Option<String>,
    /// Backend-specific extras (e.g. security groups), passed through as-is.
    pub extra: BTreeMap<String, String>,
}

impl CreateNodeParams {
    /// Build creation parameters from a spec and its resolved size.
    #[must_use]
    pub fn from_spec(spec: &NodeSpec, size: NodeSize) -> Self {
        Self {
            name: spec.name.clone(),
            size,
            image: spec.image.clone(),
            min_count: spec.count,
            max_count: spec.count,
            userdata: spec.userdata.clone(),
            keyname: spec.keyname.clone(),
            extra: BTreeMap::new(),
        }
    }

    /// Merge caller overrides; they win on key conflicts.
    ///
    /// `name`, `image`, `userdata`, and `keyname` replace the typed fields;
    /// the structural `size`/`mincount`/`maxcount` keys are dropped (see
    /// [`Overrides`]); unrecognized keys land in `extra`.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        for (key, value) in overrides {
            match key.as_str() {
                "name" => self.name = value.clone(),
                "image" => self.image = value.clone(),
                "userdata" => self.userdata = Some(value.clone()),
                "keyname" => self.keyname = Some(value.clone()),
                "size" | "mincount" | "maxcount" => {
                    warn!(key = %key, "Ignoring override for structural parameter");
                }
                _ => {
                    self.extra.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

/// Handle to one provisioned instance, lifecycle owned by the backend.
#[async_trait]
pub trait ProvisionedNode: Send + Sync {
    /// Stable backend identifier, used as the cluster map key.
    fn uuid(&self) -> String;

    async fn destroy(&self) -> Result<(), ProvisionError>;

    async fn reboot(&self) -> Result<(), ProvisionError>;
}

/// Capability surface of a compute provisioning backend.
#[async_trait]
pub trait ProvisioningDriver: Send + Sync {
    /// The backend's size catalog.
    async fn list_sizes(&self) -> Result<Vec<NodeSize>, ProvisionError>;

    /// Create one instance group. A batch request may yield one or many
    /// instances; backends always report them as a list.
    async fn create_node(
        &self,
        params: CreateNodeParams,
    ) -> Result<Vec<Arc<dyn ProvisionedNode>>, ProvisionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> NodeSpec {
        NodeSpec::new("head", "img-1", "m1.small", 2).with_keyname("ops-key")
    }

    #[test]
    fn from_spec_sets_count_as_atomic_batch() {
        let params = CreateNodeParams::from_spec(&spec(), NodeSize::new("m1.small", "Small"));
        assert_eq!(params.min_count, 2);
        assert_eq!(params.max_count, 2);
        assert_eq!(params.userdata, None);
        assert_eq!(params.keyname.as_deref(), Some("ops-key"));
    }

    #[test]
    fn overrides_win_on_conflict_and_pass_through_otherwise() {
        let mut params = CreateNodeParams::from_spec(&spec(), NodeSize::new("m1.small", "Small"));
        let mut overrides = Overrides::new();
        overrides.insert("keyname".into(), "other-key".into());
        overrides.insert("securitygroup".into(), "default".into());

        params.apply_overrides(&overrides);

        assert_eq!(params.keyname.as_deref(), Some("other-key"));
        assert_eq!(params.extra.get("securitygroup").map(String::as_str), Some("default"));
        // untouched fields keep their spec values
        assert_eq!(params.name, "head");
        assert_eq!(params.image, "img-1");
    }

    #[test]
    fn structural_keys_are_dropped_not_forwarded_as_extras() {
        let mut params = CreateNodeParams::from_spec(&spec(), NodeSize::new("m1.small", "Small"));
        let mut overrides = Overrides::new();
        overrides.insert("size".into(), "m1.xlarge".into());
        overrides.insert("mincount".into(), "9".into());
        overrides.insert("maxcount".into(), "9".into());

        params.apply_overrides(&overrides);

        // the resolved size and the spec's atomic batch stand
        assert_eq!(params.size.id, "m1.small");
        assert_eq!((params.min_count, params.max_count), (2, 2));
        // and no conflicting copy reaches the backend through extra
        assert!(params.extra.is_empty());
    }
}

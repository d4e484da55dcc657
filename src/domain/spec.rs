//! Node-group specifications.

/// One instance-group definition from a cluster document.
///
/// Produced by a [`ClusterDocument`](crate::port::ClusterDocument)
/// implementation; immutable once built. `userdata` typically embeds the
/// contextualization bootstrap payload referencing the broker session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    /// Logical group name; provisioned instances are tagged with it so broker
    /// identities can later be correlated back to their group.
    pub name: String,
    /// Image identifier, as the provisioning backend understands it.
    pub image: String,
    /// Symbolic size identifier, resolved against the backend's catalog.
    pub size: String,
    /// Number of instances in the group, provisioned as one atomic batch.
    pub count: u32,
    pub userdata: Option<String>,
    pub keyname: Option<String>,
}

impl NodeSpec {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        size: impl Into<String>,
        count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            size: size.into(),
            count,
            userdata: None,
            keyname: None,
        }
    }

    #[must_use]
    pub fn with_userdata(mut self, userdata: impl Into<String>) -> Self {
        self.userdata = Some(userdata.into());
        self
    }

    #[must_use]
    pub fn with_keyname(mut self, keyname: impl Into<String>) -> Self {
        self.keyname = Some(keyname.into());
        self
    }
}

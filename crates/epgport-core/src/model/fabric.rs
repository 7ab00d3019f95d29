use epgport_api::models::Interface;

use crate::error::CoreError;
use crate::model::row::FabricKey;

/// Resolved fabric data for one [`FabricKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabricInterfaceSet {
    pub key: FabricKey,
    pub site_id: String,
    pub node_dn: String,
    pub interfaces: Vec<Interface>,
}

impl FabricInterfaceSet {
    /// DN of the interface named `name`, if the node has one.
    pub fn interface_dn(&self, name: &str) -> Option<&str> {
        self.interfaces
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.dn.as_str())
    }

    /// Like [`interface_dn`](Self::interface_dn) but fails with
    /// [`CoreError::InterfaceNotFound`].
    pub fn require_interface_dn(&self, name: &str) -> Result<&str, CoreError> {
        self.interface_dn(name)
            .ok_or_else(|| CoreError::InterfaceNotFound {
                node_dn: self.node_dn.clone(),
                name: name.to_owned(),
            })
    }
}

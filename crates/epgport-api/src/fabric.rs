// Fabric node and interface endpoints
//
// Both listings are scoped to a site:
// - `GET /mso/api/v1/aci/sites/{siteId}/nodes`
// - `GET /mso/api/v1/aci/sites/{siteId}/nodes/interfaces?node={dn}&type={type}`

use tracing::debug;

use crate::client::MsoClient;
use crate::error::Error;
use crate::models::{Interface, InterfaceList, Node, NodeList};

impl MsoClient {
    /// List the switch nodes of a site.
    pub async fn list_nodes(&self, site_id: &str) -> Result<Vec<Node>, Error> {
        let url = self.mso_url(&format!("aci/sites/{site_id}/nodes"))?;
        debug!(site_id, "listing nodes");
        let list: NodeList = self.get(url).await?;
        Ok(list.nodes)
    }

    /// List the interfaces of one node, filtered by wire-level interface type
    /// (`physical`, `vpc`, `dpc`, ...).
    pub async fn list_interfaces(
        &self,
        site_id: &str,
        node_dn: &str,
        interface_type: &str,
    ) -> Result<Vec<Interface>, Error> {
        let mut url = self.mso_url(&format!("aci/sites/{site_id}/nodes/interfaces"))?;
        url.query_pairs_mut()
            .append_pair("node", node_dn)
            .append_pair("type", interface_type);
        debug!(site_id, node_dn, interface_type, "listing interfaces");
        let list: InterfaceList = self.get(url).await?;
        Ok(list.interfaces)
    }
}

// ── Orchestrator port ──
//
// The three remote operations the batch runner needs, behind a trait so
// the runner can be driven by the live orchestrator or an in-memory stub.
// `MsoOrchestrator` resolves names to identifiers over `MsoClient`.

use tracing::{debug, info};

use epgport_api::MsoClient;

use crate::config::ServerConfig;
use crate::error::CoreError;
use crate::model::{FabricInterfaceSet, FabricKey, SchemaDocument};

/// Remote operations consumed by the batch runner.
///
/// Calls are awaited one at a time; implementations need not be `Sync`.
#[allow(async_fn_in_trait)]
pub trait Orchestrator {
    /// Resolve site id, node DN, and interface list for `key`.
    async fn load_fabric(&self, key: &FabricKey) -> Result<FabricInterfaceSet, CoreError>;

    /// Resolve a schema by display name and fetch its full document.
    async fn load_schema(&self, name: &str) -> Result<SchemaDocument, CoreError>;

    /// Replace the stored document with `document`.
    async fn submit_schema(&self, document: &SchemaDocument) -> Result<(), CoreError>;
}

/// [`Orchestrator`] backed by the live MSO REST API.
#[derive(Debug)]
pub struct MsoOrchestrator {
    client: MsoClient,
}

impl MsoOrchestrator {
    /// Authenticate against the orchestrator described by `config`.
    pub async fn connect(config: &ServerConfig) -> Result<Self, CoreError> {
        let base_url = config.base_url()?;
        let client =
            MsoClient::connect(base_url, &config.credentials(), &config.transport()).await?;
        info!(host = %config.host, "orchestrator session established");
        Ok(Self { client })
    }

    /// Wrap an already-authenticated client.
    pub fn with_client(client: MsoClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &MsoClient {
        &self.client
    }

    async fn site_id(&self, name: &str) -> Result<String, CoreError> {
        self.client
            .list_sites()
            .await?
            .into_iter()
            .find(|s| s.name == name)
            .map(|s| s.id)
            .ok_or_else(|| CoreError::SiteNotFound {
                name: name.to_owned(),
            })
    }

    async fn node_dn(&self, key: &FabricKey, site_id: &str) -> Result<String, CoreError> {
        if key.is_vpc() {
            return Ok(key.vpc_node_dn());
        }
        self.client
            .list_nodes(site_id)
            .await?
            .into_iter()
            .find(|n| n.name == key.node)
            .map(|n| n.dn)
            .ok_or_else(|| CoreError::NodeNotFound {
                site: key.site.clone(),
                name: key.node.clone(),
            })
    }

    async fn schema_id(&self, name: &str) -> Result<String, CoreError> {
        self.client
            .list_schemas()
            .await?
            .into_iter()
            .find(|s| s.display_name == name)
            .map(|s| s.id)
            .ok_or_else(|| CoreError::SchemaNotFound {
                name: name.to_owned(),
            })
    }
}

impl Orchestrator for MsoOrchestrator {
    async fn load_fabric(&self, key: &FabricKey) -> Result<FabricInterfaceSet, CoreError> {
        let site_id = self.site_id(&key.site).await?;
        let node_dn = self.node_dn(key, &site_id).await?;

        let interfaces = self
            .client
            .list_interfaces(&site_id, &node_dn, key.wire_interface_type())
            .await?;
        if interfaces.is_empty() {
            return Err(CoreError::EmptyInterfaceList { node_dn });
        }

        debug!(%key, %site_id, %node_dn, interfaces = interfaces.len(), "fabric loaded");
        Ok(FabricInterfaceSet {
            key: key.clone(),
            site_id,
            node_dn,
            interfaces,
        })
    }

    async fn load_schema(&self, name: &str) -> Result<SchemaDocument, CoreError> {
        let schema_id = self.schema_id(name).await?;

        let document: SchemaDocument = self
            .client
            .get_schema(&schema_id)
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    CoreError::SchemaNotFound {
                        name: name.to_owned(),
                    }
                } else {
                    CoreError::from(err)
                }
            })?;

        debug!(schema = name, %schema_id, "schema loaded");
        Ok(document)
    }

    async fn submit_schema(&self, document: &SchemaDocument) -> Result<(), CoreError> {
        self.client
            .update_schema(&document.id, document)
            .await
            .map_err(|err| CoreError::update_failed(&document.display_name, err))
    }
}

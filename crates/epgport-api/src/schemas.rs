// Schema endpoints
//
// The listing is used for display-name resolution only. Single-schema
// reads and writes are generic over the document type so that callers own
// the document model; the client only moves JSON.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::MsoClient;
use crate::error::Error;
use crate::models::{SchemaList, SchemaSummary};

impl MsoClient {
    /// List all schemas (identity fields only).
    ///
    /// `GET /mso/api/v1/schemas`
    pub async fn list_schemas(&self) -> Result<Vec<SchemaSummary>, Error> {
        let url = self.mso_url("schemas")?;
        debug!("listing schemas");
        let list: SchemaList = self.get(url).await?;
        Ok(list.schemas)
    }

    /// Fetch one full schema document.
    ///
    /// `GET /mso/api/v1/schemas/{id}`
    pub async fn get_schema<T: DeserializeOwned>(&self, schema_id: &str) -> Result<T, Error> {
        let url = self.mso_url(&format!("schemas/{schema_id}"))?;
        debug!(schema_id, "fetching schema");
        self.get(url).await
    }

    /// Replace a schema document.
    ///
    /// `PUT /mso/api/v1/schemas/{id}`; the orchestrator answers 201 on
    /// success. Any other status, 200 included, is returned as
    /// [`Error::Status`] with the response body.
    pub async fn update_schema<T: Serialize>(
        &self,
        schema_id: &str,
        document: &T,
    ) -> Result<(), Error> {
        let url = self.mso_url(&format!("schemas/{schema_id}"))?;
        debug!(schema_id, "updating schema");
        self.put(url, document).await
    }
}

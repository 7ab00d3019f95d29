// Site listing
//
// `GET /mso/api/v1/sites` returns every fabric site the orchestrator
// manages; callers resolve names to ids from this list.

use tracing::debug;

use crate::client::MsoClient;
use crate::error::Error;
use crate::models::{Site, SiteList};

impl MsoClient {
    /// List all fabric sites.
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        let url = self.mso_url("sites")?;
        debug!("listing sites");
        let list: SiteList = self.get(url).await?;
        Ok(list.sites)
    }
}

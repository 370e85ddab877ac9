//! History API method for [`ApiClient`].

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::HistoryEntry;

impl ApiClient {
    pub async fn list_history(&self) -> Result<Vec<HistoryEntry>> {
        endpoints::list_history(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            self.metrics.as_ref(),
        )
        .await
    }
}

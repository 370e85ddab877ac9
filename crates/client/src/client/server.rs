//! Backend liveness method for [`ApiClient`].

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::ServerStatus;

impl ApiClient {
    /// `GET /` on the backend.
    pub async fn ping(&self) -> Result<ServerStatus> {
        endpoints::ping(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            self.metrics.as_ref(),
        )
        .await
    }
}

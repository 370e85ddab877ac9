//! Query API method for [`ApiClient`].

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{QueryRequest, QueryResponse};

impl ApiClient {
    /// Run a natural-language query. A backend failure (`500` with
    /// `{success: false, error}`) is returned as `ClientError::ApiError`.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        endpoints::run_query(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            request,
            self.metrics.as_ref(),
        )
        .await
    }
}

//! Stored API key methods for [`ApiClient`].

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{
    ApiKey, ApiKeyTestResult, ApiKeyUpdate, CreatedApiKey, MessageResponse, NewApiKey, ResourceId,
};

impl ApiClient {
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>> {
        endpoints::list_api_keys(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn create_api_key(&self, new_key: &NewApiKey) -> Result<CreatedApiKey> {
        endpoints::create_api_key(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            new_key,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn update_api_key(
        &self,
        id: &ResourceId,
        update: &ApiKeyUpdate,
    ) -> Result<MessageResponse> {
        endpoints::update_api_key(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            id,
            update,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn delete_api_key(&self, id: &ResourceId) -> Result<MessageResponse> {
        endpoints::delete_api_key(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            id,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn test_api_key(&self, id: &ResourceId) -> Result<ApiKeyTestResult> {
        endpoints::test_api_key(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            id,
            self.metrics.as_ref(),
        )
        .await
    }
}

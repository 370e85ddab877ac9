//! Connection API methods for [`ApiClient`].

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{
    Connection, ConnectionTest, CreatedConnection, MessageResponse, NewConnection, ResourceId,
    TestConnectionResult,
};

impl ApiClient {
    pub async fn list_connections(&self) -> Result<Vec<Connection>> {
        endpoints::list_connections(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn create_connection(&self, connection: &NewConnection) -> Result<CreatedConnection> {
        endpoints::create_connection(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            connection,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn delete_connection(&self, id: &ResourceId) -> Result<MessageResponse> {
        endpoints::delete_connection(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            id,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn test_connection(&self, test: &ConnectionTest) -> Result<TestConnectionResult> {
        endpoints::test_connection(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            test,
            self.metrics.as_ref(),
        )
        .await
    }
}

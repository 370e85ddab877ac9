//! Settings API methods for [`ApiClient`].

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{MessageResponse, Settings};

impl ApiClient {
    pub async fn get_settings(&self) -> Result<Settings> {
        endpoints::get_settings(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<MessageResponse> {
        endpoints::save_settings(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            settings,
            self.metrics.as_ref(),
        )
        .await
    }
}

//! Provider catalog API methods for [`ApiClient`].

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{Provider, ProviderCategories};

impl ApiClient {
    pub async fn list_providers(&self, category: Option<&str>) -> Result<Vec<Provider>> {
        endpoints::list_providers(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            category,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn provider_categories(&self) -> Result<ProviderCategories> {
        endpoints::provider_categories(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn search_providers(&self, term: &str) -> Result<Vec<Provider>> {
        endpoints::search_providers(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            term,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn get_provider(&self, key: &str) -> Result<Provider> {
        endpoints::get_provider(
            &self.http,
            &self.base_url,
            self.api_key.as_ref(),
            key,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Providers with their `category` filled in from the categories index.
    pub async fn list_providers_with_categories(&self) -> Result<Vec<Provider>> {
        let mut providers = self.list_providers(None).await?;
        let categories = self.provider_categories().await?;
        Provider::assign_categories(&mut providers, &categories);
        Ok(providers)
    }
}

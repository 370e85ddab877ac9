//! Provider catalog models for `/api/providers`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::AuthType;

/// A known third-party API the backend can talk to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    pub auth_type: AuthType,
    pub base_url: String,
    #[serde(default)]
    pub example_queries: Vec<String>,
}

/// Provider entry inside `/api/providers/categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_url: String,
    pub auth_type: AuthType,
}

/// Category name to providers.
pub type ProviderCategories = BTreeMap<String, Vec<ProviderSummary>>;

impl Provider {
    /// Attach categories to a flat provider list using the categories index.
    ///
    /// Providers absent from every category keep their current value.
    pub fn assign_categories(providers: &mut [Provider], categories: &ProviderCategories) {
        for (category, members) in categories {
            for member in members {
                if let Some(provider) = providers.iter_mut().find(|p| p.key == member.key) {
                    provider.category = Some(category.clone());
                }
            }
        }
    }
}

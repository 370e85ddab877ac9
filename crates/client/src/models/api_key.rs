//! Stored API key models for `/api/api-keys`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::models::ResourceId;

/// A stored key as listed by the backend. The secret value is never returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: ResourceId,
    pub name: String,
    pub service: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(rename = "lastUsed", default)]
    pub last_used: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_status() -> String {
    "active".to_string()
}

impl ApiKey {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// Body of `POST /api/api-keys`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewApiKey {
    pub name: String,
    pub service: String,
    pub key_value: String,
}

impl fmt::Debug for NewApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewApiKey")
            .field("name", &self.name)
            .field("service", &self.service)
            .field("key_value", &"<redacted>")
            .finish()
    }
}

impl NewApiKey {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("service", &self.service),
            ("key_value", &self.key_value),
        ] {
            if value.trim().is_empty() {
                return Err(ClientError::InvalidRequest(format!("{field} is required")));
            }
        }
        Ok(())
    }
}

/// Body of `PUT /api/api-keys/{id}`. Unset fields are left untouched.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiKeyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl fmt::Debug for ApiKeyUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyUpdate")
            .field("name", &self.name)
            .field("service", &self.service)
            .field("key_value", &self.key_value.as_ref().map(|_| "<redacted>"))
            .field("status", &self.status)
            .finish()
    }
}

impl ApiKeyUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.service.is_none()
            && self.key_value.is_none()
            && self.status.is_none()
    }
}

/// Response of `POST /api/api-keys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedApiKey {
    pub id: ResourceId,
    pub message: String,
}

/// Response of `POST /api/api-keys/{id}/test`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiKeyTestResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_entry_shape() {
        let key: ApiKey = serde_json::from_value(json!({
            "id": 3,
            "name": "Weather",
            "service": "openweather",
            "status": "active",
            "lastUsed": null,
            "created_at": "2024-01-02T10:00:00"
        }))
        .unwrap();
        assert!(key.is_active());
        assert!(key.last_used.is_none());
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = ApiKeyUpdate {
            status: Some("inactive".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"status": "inactive"})
        );
        assert!(ApiKeyUpdate::default().is_empty());
    }

    #[test]
    fn test_new_key_validation_and_redaction() {
        let key = NewApiKey {
            name: "Weather".into(),
            service: "openweather".into(),
            key_value: "sekrit".into(),
        };
        assert!(key.validate().is_ok());
        assert!(!format!("{key:?}").contains("sekrit"));

        let blank = NewApiKey {
            key_value: " ".into(),
            ..key
        };
        let err = blank.validate().unwrap_err();
        assert!(err.to_string().contains("key_value"));
    }
}

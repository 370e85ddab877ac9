//! User settings for `/api/settings`.
//!
//! Settings are a two-level map: section (`notifications`, `appearance`,
//! `privacy`, `api`) to key to value. The backend stores every value as
//! text, so booleans saved once come back as the strings `"True"` and
//! `"False"`; the accessors here accept both forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Section name to key to value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(pub BTreeMap<String, BTreeMap<String, Value>>);

impl Settings {
    /// The values the backend reports for a user that never saved anything.
    pub fn defaults() -> Self {
        let mut settings = Self::default();
        for (section, values) in [
            (
                "notifications",
                json!({"email": true, "push": false, "queryAlerts": true, "connectionStatus": true}),
            ),
            (
                "appearance",
                json!({"darkMode": false, "compactMode": false, "language": "en"}),
            ),
            (
                "privacy",
                json!({"analytics": true, "crashReports": true, "shareUsage": false}),
            ),
            ("api", json!({"timeout": 30, "retries": 3, "caching": true})),
        ] {
            if let Value::Object(map) = values {
                settings
                    .0
                    .insert(section.to_string(), map.into_iter().collect());
            }
        }
        settings
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.0.get(section).and_then(|s| s.get(key))
    }

    /// Boolean value, accepting JSON booleans and `"true"`/`"false"` text in any case.
    pub fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        match self.get(section, key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    /// Numeric value, accepting numbers and numeric text.
    pub fn get_i64(&self, section: &str, key: &str) -> Option<i64> {
        match self.get(section, key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_str(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).and_then(Value::as_str)
    }

    pub fn set(&mut self, section: &str, key: &str, value: Value) {
        self.0
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Flip a boolean setting, treating a missing value as `false`.
    /// Returns the new value.
    pub fn toggle(&mut self, section: &str, key: &str) -> bool {
        let next = !self.get_bool(section, key).unwrap_or(false);
        self.set(section, key, Value::Bool(next));
        next
    }

    /// Fill sections and keys missing from `self` with the defaults.
    pub fn with_defaults(mut self) -> Self {
        for (section, values) in Self::defaults().0 {
            let target = self.0.entry(section).or_default();
            for (key, value) in values {
                target.entry(key).or_insert(value);
            }
        }
        self
    }

    /// `(section, key, value)` triples in stable order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Value)> {
        self.0.iter().flat_map(|(section, values)| {
            values
                .iter()
                .map(move |(key, value)| (section.as_str(), key.as_str(), value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::defaults();
        assert_eq!(settings.get_bool("notifications", "email"), Some(true));
        assert_eq!(settings.get_bool("notifications", "push"), Some(false));
        assert_eq!(settings.get_str("appearance", "language"), Some("en"));
        assert_eq!(settings.get_i64("api", "timeout"), Some(30));
        assert_eq!(settings.get_i64("api", "retries"), Some(3));
        assert_eq!(settings.entries().count(), 13);
    }

    #[test]
    fn test_stringified_booleans_from_backend() {
        let settings: Settings = serde_json::from_value(json!({
            "appearance": {"darkMode": "True", "compactMode": "False"},
            "api": {"timeout": "45"}
        }))
        .unwrap();
        assert_eq!(settings.get_bool("appearance", "darkMode"), Some(true));
        assert_eq!(settings.get_bool("appearance", "compactMode"), Some(false));
        assert_eq!(settings.get_i64("api", "timeout"), Some(45));
    }

    #[test]
    fn test_toggle_and_with_defaults() {
        let mut settings: Settings =
            serde_json::from_value(json!({"appearance": {"darkMode": "False"}})).unwrap();
        assert!(settings.toggle("appearance", "darkMode"));
        assert_eq!(settings.get("appearance", "darkMode"), Some(&Value::Bool(true)));

        let filled = settings.with_defaults();
        assert_eq!(filled.get_bool("appearance", "darkMode"), Some(true));
        assert_eq!(filled.get_bool("privacy", "analytics"), Some(true));
    }
}

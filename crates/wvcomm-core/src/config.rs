// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Communicator configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{DEFAULT_ANDROID_INTERFACE, DEFAULT_JS_OBJECT, DEFAULT_URL_PREFIX};

/// Settings shared by both ends of the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunicatorConfig {
    /// Prefix of navigation URLs intercepted by the iOS host.
    pub url_prefix: String,
    /// Name of the global script object the host calls `raiseEvent` on.
    pub js_object: String,
    /// Name under which the Android host injects its call object.
    pub android_interface: String,
    /// Platform tag forced after detection (subject to the override guard).
    pub platform_override: Option<String>,
    /// Write unresolved inbound calls to the script console.
    pub log_unresolved: bool,
}

impl Default for CommunicatorConfig {
    fn default() -> Self {
        Self {
            url_prefix: DEFAULT_URL_PREFIX.into(),
            js_object: DEFAULT_JS_OBJECT.into(),
            android_interface: DEFAULT_ANDROID_INTERFACE.into(),
            platform_override: None,
            log_unresolved: true,
        }
    }
}

impl CommunicatorConfig {
    /// Read a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Persist this configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject settings the wire format cannot carry.
    pub fn validate(&self) -> Result<()> {
        if !self.url_prefix.ends_with('/') {
            return Err(crate::CommunicatorError::Config(format!(
                "url_prefix '{}' must end with '/'",
                self.url_prefix
            )));
        }
        if self.js_object.is_empty() {
            return Err(crate::CommunicatorError::Config(
                "js_object must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wire_constants() {
        let config = CommunicatorConfig::default();
        assert_eq!(config.url_prefix, "js:WebViewCommunicator/");
        assert_eq!(config.js_object, "WebViewCommunicator");
        assert_eq!(config.android_interface, "_WebViewCommunicator");
        assert!(config.platform_override.is_none());
        assert!(config.log_unresolved);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");

        let config = CommunicatorConfig {
            platform_override: Some("ios".into()),
            log_unresolved: false,
            ..CommunicatorConfig::default()
        };
        config.save(&path).expect("save");

        let loaded = CommunicatorConfig::load(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "js_object": "Bridge" }"#).expect("write");

        let loaded = CommunicatorConfig::load(&path).expect("load");
        assert_eq!(loaded.js_object, "Bridge");
        assert_eq!(loaded.url_prefix, "js:WebViewCommunicator/");
    }

    #[test]
    fn prefix_without_trailing_slash_is_rejected() {
        let config = CommunicatorConfig {
            url_prefix: "js:Bridge".into(),
            ..CommunicatorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(crate::CommunicatorError::Config(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = CommunicatorConfig::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(crate::CommunicatorError::Io(_))));
    }
}

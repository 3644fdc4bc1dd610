//! Backend configuration injected by the entry layer at process start.

use serde::{Deserialize, Serialize};

/// Default namespace segment used in remote document paths.
pub const DEFAULT_APP_NAMESPACE: &str = "wallux-aethel";
/// Default interval between remote favorites document polls.
pub const DEFAULT_SYNC_POLL_INTERVAL_MS: u32 = 5_000;

/// Lookup keys understood by [`BackendConfig::from_lookup`].
pub mod keys {
    /// Web API key of the backend project.
    pub const API_KEY: &str = "WALLUX_FIREBASE_API_KEY";
    /// Auth domain of the backend project.
    pub const AUTH_DOMAIN: &str = "WALLUX_FIREBASE_AUTH_DOMAIN";
    /// Backend project id.
    pub const PROJECT_ID: &str = "WALLUX_FIREBASE_PROJECT_ID";
    /// Storage bucket of the backend project.
    pub const STORAGE_BUCKET: &str = "WALLUX_FIREBASE_STORAGE_BUCKET";
    /// Messaging sender id of the backend project.
    pub const MESSAGING_SENDER_ID: &str = "WALLUX_FIREBASE_MESSAGING_SENDER_ID";
    /// Registered web app id.
    pub const APP_ID: &str = "WALLUX_FIREBASE_APP_ID";
    /// Namespace segment for document paths.
    pub const APP_NAMESPACE: &str = "WALLUX_APP_NAMESPACE";
    /// Poll interval for the favorites document, in milliseconds.
    pub const SYNC_POLL_INTERVAL_MS: &str = "WALLUX_SYNC_POLL_INTERVAL_MS";
}

/// Backend project settings used by the browser auth and document adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Web API key.
    pub api_key: String,
    /// Auth domain (informational for REST transport).
    pub auth_domain: String,
    /// Project id used to address the document database.
    pub project_id: String,
    /// Storage bucket (informational; assets are served by the image service).
    pub storage_bucket: String,
    /// Messaging sender id (informational).
    pub messaging_sender_id: String,
    /// Registered web app id.
    pub app_id: String,
    /// Namespace segment in `artifacts/{app_namespace}/users/...` paths.
    #[serde(default = "default_app_namespace")]
    pub app_namespace: String,
    /// Interval between favorites document polls.
    #[serde(default = "default_sync_poll_interval_ms")]
    pub sync_poll_interval_ms: u32,
}

fn default_app_namespace() -> String {
    DEFAULT_APP_NAMESPACE.to_string()
}

fn default_sync_poll_interval_ms() -> u32 {
    DEFAULT_SYNC_POLL_INTERVAL_MS
}

/// Reasons a [`BackendConfig`] cannot be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field was absent or blank.
    Missing {
        /// Field name.
        field: &'static str,
    },
    /// A field was present but could not be parsed.
    Invalid {
        /// Field name.
        field: &'static str,
        /// Offending raw value.
        value: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "backend config field `{field}` is missing"),
            Self::Invalid { field, value } => {
                write!(f, "backend config field `{field}` has invalid value `{value}`")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl BackendConfig {
    /// Builds a config from a key lookup such as build-time or process environment.
    ///
    /// Missing required values are kept empty here and rejected by [`BackendConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the poll interval is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).unwrap_or_default();
        let sync_poll_interval_ms = match lookup(keys::SYNC_POLL_INTERVAL_MS) {
            None => DEFAULT_SYNC_POLL_INTERVAL_MS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(ConfigError::Invalid {
                        field: "sync_poll_interval_ms",
                        value: raw,
                    })
                }
            },
        };
        let app_namespace = Some(get(keys::APP_NAMESPACE))
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(default_app_namespace);

        Ok(Self {
            api_key: get(keys::API_KEY),
            auth_domain: get(keys::AUTH_DOMAIN),
            project_id: get(keys::PROJECT_ID),
            storage_bucket: get(keys::STORAGE_BUCKET),
            messaging_sender_id: get(keys::MESSAGING_SENDER_ID),
            app_id: get(keys::APP_ID),
            app_namespace,
            sync_poll_interval_ms,
        })
    }

    /// Checks that every field the adapters depend on is present.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("api_key", &self.api_key),
            ("auth_domain", &self.auth_domain),
            ("project_id", &self.project_id),
            ("app_id", &self.app_id),
            ("app_namespace", &self.app_namespace),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing { field });
            }
        }
        if self.app_namespace.contains('/') {
            return Err(ConfigError::Invalid {
                field: "app_namespace",
                value: self.app_namespace.clone(),
            });
        }
        if self.sync_poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "sync_poll_interval_ms",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

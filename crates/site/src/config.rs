//! Backend configuration baked in at build time from `WALLUX_*` environment variables.

use leptos::logging;
use platform_host::{config::keys, BackendConfig};

fn compiled_value(key: &str) -> Option<String> {
    let value = match key {
        keys::API_KEY => option_env!("WALLUX_FIREBASE_API_KEY"),
        keys::AUTH_DOMAIN => option_env!("WALLUX_FIREBASE_AUTH_DOMAIN"),
        keys::PROJECT_ID => option_env!("WALLUX_FIREBASE_PROJECT_ID"),
        keys::STORAGE_BUCKET => option_env!("WALLUX_FIREBASE_STORAGE_BUCKET"),
        keys::MESSAGING_SENDER_ID => option_env!("WALLUX_FIREBASE_MESSAGING_SENDER_ID"),
        keys::APP_ID => option_env!("WALLUX_FIREBASE_APP_ID"),
        keys::APP_NAMESPACE => option_env!("WALLUX_APP_NAMESPACE"),
        keys::SYNC_POLL_INTERVAL_MS => option_env!("WALLUX_SYNC_POLL_INTERVAL_MS"),
        _ => None,
    };
    value.map(str::to_string)
}

/// Parses and validates a config from `lookup`.
///
/// Returns `None` (stub host, no favorites) when anything is missing or malformed.
pub fn resolve_backend_config<F>(lookup: F) -> Option<BackendConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match BackendConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("backend config rejected, running without favorites: {err}");
            return None;
        }
    };
    if let Err(err) = config.validate() {
        logging::warn!("backend config rejected, running without favorites: {err}");
        return None;
    }
    Some(config)
}

/// Config compiled into this build.
pub fn compiled_backend_config() -> Option<BackendConfig> {
    resolve_backend_config(compiled_value)
}

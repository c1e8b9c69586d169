//! Runtime configuration for talking to the karaoke server.

use std::time::Duration;

/// Interval between two refreshes of a polling view.
pub const POLL_INTERVAL_MS: u64 = 3000;

/// Languages the server ships translations for.
pub const LANGUAGES: [&str; 6] = ["en-gb", "es-es", "ja-jp", "de-de", "es-eu", "fr-fr"];
pub const DEFAULT_LANGUAGE: &str = "en-gb";

pub const COVER_SIZE_LIST: u32 = 105;
pub const COVER_SIZE_DETAIL: u32 = 200;

#[cfg(not(target_arch = "wasm32"))]
const NATIVE_DEFAULT_BASE: &str = "http://127.0.0.1:10111";

pub fn poll_interval() -> Duration {
    Duration::from_millis(POLL_INTERVAL_MS)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Appended to cover URLs so a new session never reuses stale cached art.
    pub cover_nonce: u64,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, cover_nonce: u64) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cover_nonce,
        }
    }

    /// Resolves the server location: a build-time `KARAOKE_API_BASE` wins,
    /// then the page origin on web, then a local default.
    pub fn from_environment() -> Self {
        let base = option_env!("KARAOKE_API_BASE")
            .map(str::to_string)
            .or_else(page_origin)
            .unwrap_or_else(default_base);
        Self::new(base, session_nonce())
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn default_base() -> String {
    String::new()
}

#[cfg(not(target_arch = "wasm32"))]
fn default_base() -> String {
    NATIVE_DEFAULT_BASE.to_string()
}

#[cfg(target_arch = "wasm32")]
fn session_nonce() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn session_nonce() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = ApiConfig::new("http://karaoke.local:10111/", 9);
        assert_eq!(config.base_url, "http://karaoke.local:10111");
    }

    #[test]
    fn native_environment_falls_back_to_local_server() {
        let config = ApiConfig::from_environment();
        if option_env!("KARAOKE_API_BASE").is_none() {
            assert_eq!(config.base_url, NATIVE_DEFAULT_BASE);
        }
    }
}

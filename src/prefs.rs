use crate::config::{DEFAULT_LANGUAGE, LANGUAGES};
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const PREFS_KEY: &str = "karaoke_remote.display_prefs";

#[cfg(not(target_arch = "wasm32"))]
const PREFS_FILE: &str = "display_prefs.json";

/// How the server should format song metadata for this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayPrefs {
    pub lang: String,
    #[serde(default)]
    pub latin: bool,
}

impl Default for DisplayPrefs {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANGUAGE.to_string(),
            latin: false,
        }
    }
}

impl DisplayPrefs {
    /// Unknown language codes fall back to the default, like the server does.
    pub fn normalized(mut self) -> Self {
        if !LANGUAGES.contains(&self.lang.as_str()) {
            self.lang = DEFAULT_LANGUAGE.to_string();
        }
        self
    }
}

/// Remembers the last preferences a view rendered with. The first value seen
/// is the one the view loaded under, so only later differences count.
#[derive(Debug, Default)]
pub struct DisplayWatch {
    seen: Option<DisplayPrefs>,
}

impl DisplayWatch {
    /// Returns `true` when `current` differs from the previously seen prefs.
    pub fn changed(&mut self, current: &DisplayPrefs) -> bool {
        match self.seen.replace(current.clone()) {
            Some(previous) => previous != *current,
            None => false,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_prefs() -> DisplayPrefs {
    LocalStorage::get::<DisplayPrefs>(PREFS_KEY)
        .map(DisplayPrefs::normalized)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
pub fn save_prefs(prefs: &DisplayPrefs) -> Result<(), String> {
    LocalStorage::set(PREFS_KEY, prefs).map_err(|e| e.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn prefs_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|dir| dir.join("karaoke-remote").join(PREFS_FILE))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_prefs() -> DisplayPrefs {
    prefs_path()
        .and_then(|path| std::fs::read_to_string(path).ok())
        .and_then(|raw| serde_json::from_str::<DisplayPrefs>(&raw).ok())
        .map(DisplayPrefs::normalized)
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_prefs(prefs: &DisplayPrefs) -> Result<(), String> {
    let path = prefs_path().ok_or_else(|| "no config directory available".to_string())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let raw = serde_json::to_string_pretty(prefs).map_err(|e| e.to_string())?;
    std::fs::write(path, raw).map_err(|e| e.to_string())
}

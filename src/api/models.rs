use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Display metadata as formatted by the server (language and latin mode applied).
pub type SongMeta = BTreeMap<String, Option<String>>;

fn meta_field<'a>(meta: &'a SongMeta, key: &str) -> &'a str {
    meta.get(key)
        .and_then(|value| value.as_deref())
        .unwrap_or("")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SongSummary {
    pub id: u32,
    #[serde(default)]
    pub meta: SongMeta,
}

impl SongSummary {
    pub fn title(&self) -> &str {
        meta_field(&self.meta, "title")
    }

    pub fn artist(&self) -> &str {
        meta_field(&self.meta, "artist")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Variant {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Song {
    pub id: u32,
    #[serde(default)]
    pub meta: SongMeta,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default = "default_channel_count")]
    pub channels: u32,
}

fn default_channel_count() -> u32 {
    1
}

impl Song {
    pub fn title(&self) -> &str {
        meta_field(&self.meta, "title")
    }

    pub fn artist(&self) -> &str {
        meta_field(&self.meta, "artist")
    }

    /// Index of the variant the server flags as default, falling back to the first.
    pub fn default_variant_index(&self) -> usize {
        self.variants
            .iter()
            .position(|variant| variant.default)
            .unwrap_or(0)
    }
}

/// Per-entry audio configuration, echoed to the server on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub variant: usize,
    pub channels: Vec<i32>,
    pub speed: i32,
    pub pitch: i32,
    pub pause: bool,
}

pub const DEFAULT_CHANNEL_LEVEL: i32 = 3;
pub const MAX_CHANNEL_LEVEL: i32 = 10;

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            variant: 0,
            channels: vec![DEFAULT_CHANNEL_LEVEL],
            speed: 0,
            pitch: 0,
            pause: false,
        }
    }
}

impl PlaybackConfig {
    /// Fresh configuration for a song that is about to be queued.
    pub fn for_song(song: &Song) -> Self {
        Self {
            variant: song.default_variant_index(),
            ..Self::default()
        }
    }

    pub fn channel_level(&self, channel: usize) -> i32 {
        self.channels
            .get(channel)
            .copied()
            .unwrap_or(MAX_CHANNEL_LEVEL)
    }

    /// Channels past the end of the list are padded at full level.
    pub fn set_channel_level(&mut self, channel: usize, level: i32) {
        if self.channels.len() <= channel {
            self.channels.resize(channel + 1, MAX_CHANNEL_LEVEL);
        }
        self.channels[channel] = level.clamp(0, MAX_CHANNEL_LEVEL);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueueListItem {
    pub idx: usize,
    pub id: u32,
    pub qid: u64,
    #[serde(default)]
    pub meta: SongMeta,
}

impl QueueListItem {
    pub fn title(&self) -> &str {
        meta_field(&self.meta, "title")
    }

    pub fn artist(&self) -> &str {
        meta_field(&self.meta, "artist")
    }
}

/// Addresses one queue entry: either by its qid or as whatever is playing now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueueRef {
    #[default]
    Now,
    Qid(u64),
}

impl fmt::Display for QueueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueRef::Now => write!(f, "now"),
            QueueRef::Qid(qid) => write!(f, "{qid}"),
        }
    }
}

impl FromStr for QueueRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "now" => Ok(QueueRef::Now),
            other => other
                .parse::<u64>()
                .map(QueueRef::Qid)
                .map_err(|e| format!("invalid queue reference {other:?}: {e}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub idx: usize,
    pub id: u32,
    pub qid: u64,
    #[serde(default)]
    pub meta: SongMeta,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default = "default_channel_count")]
    pub channels: u32,
    pub config: PlaybackConfig,
}

impl QueueEntry {
    pub fn title(&self) -> &str {
        meta_field(&self.meta, "title")
    }

    pub fn artist(&self) -> &str {
        meta_field(&self.meta, "artist")
    }

    pub fn is_now_playing(&self) -> bool {
        self.idx == 0
    }
}

/// Global audio settings. Fields the client does not know about are kept and
/// sent back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub volume: i32,
    #[serde(default)]
    pub headstart: i32,
    #[serde(default)]
    pub mic_volume: i32,
    #[serde(default)]
    pub mic_feedback: i32,
    #[serde(default)]
    pub mic_delay: i32,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 50,
            headstart: 30,
            mic_volume: 80,
            mic_feedback: 20,
            mic_delay: 12,
            extra: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn reset_to_defaults(&mut self) {
        let defaults = Settings::default();
        self.volume = defaults.volume;
        self.headstart = defaults.headstart;
        self.mic_volume = defaults.mic_volume;
        self.mic_feedback = defaults.mic_feedback;
        self.mic_delay = defaults.mic_delay;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeekRequest {
    /// Relative jump in seconds.
    Offset(f64),
    /// Absolute position in seconds.
    Position(f64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongListResponse {
    #[serde(default)]
    pub songs: Vec<SongSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueResponse {
    #[serde(default)]
    pub queue: Vec<QueueListItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddResponse {
    pub qid: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_entry_decodes_server_payload() {
        let json = r#"{
            "idx": 2, "id": 7, "qid": 41,
            "meta": {"title": "Song", "artist": null},
            "variants": [
                {"id": 0, "name": "Full", "default": false, "snippet": "la la"},
                {"id": 1, "name": "Instrumental", "default": true, "snippet": null}
            ],
            "channels": 2,
            "config": {"variant": 1, "channels": [3, 10], "speed": -2, "pitch": 1, "pause": false}
        }"#;
        let entry: QueueEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.qid, 41);
        assert_eq!(entry.title(), "Song");
        assert_eq!(entry.artist(), "");
        assert_eq!(entry.config.channels, vec![3, 10]);
        assert!(!entry.is_now_playing());
    }

    #[test]
    fn fresh_config_picks_default_variant() {
        let song = Song {
            id: 3,
            variants: vec![
                Variant { id: 0, default: false, ..Variant::default() },
                Variant { id: 1, default: true, ..Variant::default() },
            ],
            ..Song::default()
        };
        let config = PlaybackConfig::for_song(&song);
        assert_eq!(config.variant, 1);
        assert_eq!(config.channels, vec![DEFAULT_CHANNEL_LEVEL]);
        assert_eq!(PlaybackConfig::for_song(&Song::default()).variant, 0);
    }

    #[test]
    fn channel_levels_pad_and_clamp() {
        let mut config = PlaybackConfig::default();
        assert_eq!(config.channel_level(2), MAX_CHANNEL_LEVEL);
        config.set_channel_level(2, 14);
        assert_eq!(config.channels, vec![3, 10, 10]);
        config.set_channel_level(0, -1);
        assert_eq!(config.channels[0], 0);
    }

    #[test]
    fn settings_keep_unknown_fields() {
        let json = r#"{"volume": 40, "headstart": 30, "mic_channels": [0, 1], "mic_feedback": 20, "mic_delay": 12}"#;
        let mut settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.mic_volume, 0);
        assert!(settings.extra.contains_key("mic_channels"));

        settings.reset_to_defaults();
        assert_eq!(settings.volume, 50);
        assert_eq!(settings.mic_volume, 80);
        let echoed = serde_json::to_value(&settings).unwrap();
        assert_eq!(echoed["mic_channels"], serde_json::json!([0, 1]));
    }

    #[test]
    fn queue_ref_parses_now_and_numbers() {
        assert_eq!("now".parse::<QueueRef>(), Ok(QueueRef::Now));
        assert_eq!("17".parse::<QueueRef>(), Ok(QueueRef::Qid(17)));
        assert!("later".parse::<QueueRef>().is_err());
        assert_eq!(QueueRef::Qid(17).to_string(), "17");
        assert_eq!(QueueRef::Now.to_string(), "now");
    }

    #[test]
    fn seek_request_wire_shape() {
        assert_eq!(
            serde_json::to_value(SeekRequest::Offset(-10.0)).unwrap(),
            serde_json::json!({"offset": -10.0})
        );
        assert_eq!(
            serde_json::to_value(SeekRequest::Position(0.0)).unwrap(),
            serde_json::json!({"position": 0.0})
        );
    }
}

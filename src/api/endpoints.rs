//! Bindings between the views' synced resources and the HTTP client.

use crate::api::client::KaraokeClient;
use crate::api::models::{PlaybackConfig, QueueEntry, QueueRef, Settings};
use crate::sync::Endpoint;

/// One queue entry; only its playback config is written back.
pub struct QueueEntryEndpoint {
    client: KaraokeClient,
    entry: QueueRef,
}

impl QueueEntryEndpoint {
    pub fn new(client: KaraokeClient, entry: QueueRef) -> Self {
        Self { client, entry }
    }
}

impl Endpoint for QueueEntryEndpoint {
    type Snapshot = QueueEntry;
    type Editable = PlaybackConfig;

    fn editable(snapshot: &QueueEntry) -> &PlaybackConfig {
        &snapshot.config
    }

    async fn fetch(&self) -> Result<QueueEntry, String> {
        self.client.get_queue_entry(self.entry).await
    }

    async fn push(&self, snapshot: &QueueEntry) -> Result<(), String> {
        // "now" resolves to a concrete qid once fetched.
        self.client
            .change_queue_entry(snapshot.qid, &snapshot.config)
            .await
    }
}

pub struct SettingsEndpoint {
    client: KaraokeClient,
}

impl SettingsEndpoint {
    pub fn new(client: KaraokeClient) -> Self {
        Self { client }
    }
}

impl Endpoint for SettingsEndpoint {
    type Snapshot = Settings;
    type Editable = Settings;

    fn editable(snapshot: &Settings) -> &Settings {
        snapshot
    }

    async fn fetch(&self) -> Result<Settings, String> {
        self.client.get_settings().await
    }

    async fn push(&self, snapshot: &Settings) -> Result<(), String> {
        self.client.change_settings(snapshot).await
    }
}

use crate::api::models::*;
use crate::config::ApiConfig;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(build_http_client);

// Language and latin mode live in server cookies; browsers keep them for us.
#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(target_arch = "wasm32")]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::new()
}

#[derive(Debug, Clone, PartialEq)]
pub struct KaraokeClient {
    pub config: ApiConfig,
}

impl KaraokeClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub fn cover_url(&self, song_id: u32, size: u32) -> String {
        format!(
            "{}?{}",
            self.build_url(&format!("/song/{song_id}/cover/{size}")),
            self.config.cover_nonce
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let response = HTTP_CLIENT
            .get(self.build_url(path))
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;
        response.json::<T>().await.map_err(|e| e.to_string())
    }

    async fn get_ok(&self, path: &str) -> Result<(), String> {
        HTTP_CLIENT
            .get(self.build_url(path))
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, String> {
        let mut request = HTTP_CLIENT.post(self.build_url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())
    }

    pub async fn get_song_list(&self) -> Result<Vec<SongSummary>, String> {
        let list: SongListResponse = self.get_json("/songlist").await?;
        Ok(list.songs)
    }

    pub async fn get_song(&self, song_id: u32) -> Result<Song, String> {
        self.get_json(&format!("/song/{song_id}")).await
    }

    pub async fn get_queue(&self) -> Result<Vec<QueueListItem>, String> {
        let queue: QueueResponse = self.get_json("/queue").await?;
        Ok(queue.queue)
    }

    pub async fn get_queue_entry(&self, entry: QueueRef) -> Result<QueueEntry, String> {
        self.get_json(&format!("/queue/{entry}")).await
    }

    /// Enqueues a song with its initial configuration and returns the new qid.
    pub async fn add_to_queue(&self, song_id: u32, config: &PlaybackConfig) -> Result<u64, String> {
        let response = self
            .post(&format!("/queue/add/{song_id}"), Some(config))
            .await?;
        let added: AddResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(added.qid)
    }

    pub async fn change_queue_entry(&self, qid: u64, config: &PlaybackConfig) -> Result<(), String> {
        self.post(&format!("/queue/change/{qid}"), Some(config))
            .await
            .map(|_| ())
    }

    pub async fn remove_from_queue(&self, qid: u64) -> Result<(), String> {
        self.post::<()>(&format!("/queue/remove/{qid}"), None)
            .await
            .map(|_| ())
    }

    pub async fn seek(&self, request: SeekRequest) -> Result<(), String> {
        self.post("/queue/now/seek", Some(&request))
            .await
            .map(|_| ())
    }

    pub async fn get_settings(&self) -> Result<Settings, String> {
        self.get_json("/settings").await
    }

    pub async fn change_settings(&self, settings: &Settings) -> Result<(), String> {
        self.post("/settings/change", Some(settings))
            .await
            .map(|_| ())
    }

    pub async fn set_language(&self, lang: &str) -> Result<(), String> {
        self.get_ok(&format!("/cfg/lang/{}", urlencoding::encode(lang)))
            .await
    }

    pub async fn set_latin(&self, latin: bool) -> Result<(), String> {
        self.get_ok(&format!("/cfg/latin/{}", u8::from(latin))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_url_carries_size_and_nonce() {
        let client = KaraokeClient::new(ApiConfig::new("http://host:1/", 77));
        assert_eq!(client.cover_url(4, 105), "http://host:1/song/4/cover/105?77");
    }
}

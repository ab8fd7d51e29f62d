//! Tavus API video generator implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use mentorly_core::traits::{
    Conversation, ConversationRequest, Persona, Video, VideoGenerator, VideoRequest, VideoStatus,
};

use crate::error::ServiceError;
use crate::http::{self, key_is_usable};

pub const DEFAULT_BASE_URL: &str = "https://tavusapi.com";

/// Tavus conversational video and scripted video API.
pub struct TavusVideoGenerator {
    api_key: String,
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl TavusVideoGenerator {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, ServiceError> {
        if !key_is_usable(api_key) {
            return Err(ServiceError::not_configured(
                "tavus",
                "missing or placeholder API key",
            ));
        }

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout_secs,
            client: http::build_client(timeout_secs)?,
        })
    }

    fn get(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, endpoint))
            .header("x-api-key", &self.api_key)
    }

    fn post(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, endpoint))
            .header("x-api-key", &self.api_key)
    }
}

#[derive(Deserialize)]
struct PersonaList {
    #[serde(default)]
    data: Vec<Persona>,
}

#[async_trait]
impl VideoGenerator for TavusVideoGenerator {
    fn name(&self) -> &str {
        "tavus"
    }

    #[instrument(skip(self))]
    async fn list_personas(&self) -> anyhow::Result<Vec<Persona>> {
        let response = http::send(self.get("/v2/personas"), self.timeout_secs, "personas").await?;
        let list: PersonaList = http::json(response).await?;
        Ok(list.data)
    }

    #[instrument(skip(self, request), fields(persona = %request.persona_id))]
    async fn create_conversation(
        &self,
        request: &ConversationRequest,
    ) -> anyhow::Result<Conversation> {
        let response = http::send(
            self.post("/v2/conversations").json(request),
            self.timeout_secs,
            &format!("persona {}", request.persona_id),
        )
        .await?;
        Ok(http::json(response).await?)
    }

    #[instrument(skip(self, request), fields(persona = %request.persona_id))]
    async fn generate_video(&self, request: &VideoRequest) -> anyhow::Result<Video> {
        let response = http::send(
            self.post("/v2/videos").json(request),
            self.timeout_secs,
            &format!("persona {}", request.persona_id),
        )
        .await?;
        Ok(http::json(response).await?)
    }

    #[instrument(skip(self))]
    async fn get_video(&self, video_id: &str) -> anyhow::Result<Video> {
        let response = http::send(
            self.get(&format!("/v2/videos/{video_id}")),
            self.timeout_secs,
            &format!("video {video_id}"),
        )
        .await?;
        Ok(http::json(response).await?)
    }

    async fn wait_for_video(
        &self,
        video_id: &str,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> anyhow::Result<Video> {
        poll_until_complete(self, video_id, poll_interval, max_wait).await
    }
}

/// Poll a generator until a video completes, fails, or `max_wait` runs out.
pub async fn poll_until_complete<G: VideoGenerator + ?Sized>(
    generator: &G,
    video_id: &str,
    poll_interval: Duration,
    max_wait: Duration,
) -> anyhow::Result<Video> {
    let start = tokio::time::Instant::now();

    loop {
        let video = generator.get_video(video_id).await?;
        match video.status {
            VideoStatus::Completed => return Ok(video),
            VideoStatus::Failed => return Err(ServiceError::VideoFailed(video_id.to_string()).into()),
            VideoStatus::Pending | VideoStatus::Processing => {
                tracing::debug!(video_id, status = ?video.status, "video not ready");
            }
        }

        if start.elapsed() + poll_interval > max_wait {
            return Err(ServiceError::Timeout(max_wait.as_secs()).into());
        }
        tokio::time::sleep(poll_interval).await;
    }
}

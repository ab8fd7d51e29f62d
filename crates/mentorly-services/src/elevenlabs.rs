//! ElevenLabs text-to-speech and speech-to-text implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mentorly_core::traits::{SpeechRecognizer, SpeechSynthesizer, Voice, VoiceSettings};

use crate::error::ServiceError;
use crate::http::{self, key_is_usable};

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";
pub const DEFAULT_VOICE_ID: &str = "pNInz6obpgDQGcFmaJgB";
const TTS_MODEL: &str = "eleven_monolingual_v1";
const STT_MODEL: &str = "scribe_v1";

/// ElevenLabs speech API.
pub struct ElevenLabsSpeech {
    api_key: String,
    base_url: String,
    default_voice_id: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl ElevenLabsSpeech {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        default_voice_id: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, ServiceError> {
        if !key_is_usable(api_key) {
            return Err(ServiceError::not_configured(
                "elevenlabs",
                "missing or placeholder API key",
            ));
        }

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            default_voice_id: default_voice_id.unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
            timeout_secs,
            client: http::build_client(timeout_secs)?,
        })
    }
}

#[derive(Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'static str,
    voice_settings: &'a VoiceSettings,
}

#[derive(Deserialize)]
struct VoiceList {
    #[serde(default)]
    voices: Vec<Voice>,
}

#[derive(Deserialize)]
struct Transcript {
    text: String,
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSpeech {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    #[instrument(skip(self))]
    async fn list_voices(&self) -> anyhow::Result<Vec<Voice>> {
        let request = self
            .client
            .get(format!("{}/voices", self.base_url))
            .header("xi-api-key", &self.api_key);
        let response = http::send(request, self.timeout_secs, "voices").await?;
        let list: VoiceList = http::json(response).await?;
        Ok(list.voices)
    }

    #[instrument(skip(self, text, settings), fields(chars = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        voice_id: Option<&str>,
        settings: &VoiceSettings,
    ) -> anyhow::Result<Vec<u8>> {
        let voice = voice_id.unwrap_or(&self.default_voice_id);
        let body = TextToSpeechBody {
            text,
            model_id: TTS_MODEL,
            voice_settings: settings,
        };
        let request = self
            .client
            .post(format!("{}/text-to-speech/{voice}", self.base_url))
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&body);

        let response = http::send(request, self.timeout_secs, &format!("voice {voice}")).await?;
        let audio = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Unavailable(format!("failed to read audio: {e}")))?;
        Ok(audio.to_vec())
    }
}

#[async_trait]
impl SpeechRecognizer for ElevenLabsSpeech {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    #[instrument(skip(self, audio), fields(bytes = audio.len()))]
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> anyhow::Result<String> {
        let file = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name("audio")
            .mime_str(mime_type)
            .map_err(|e| ServiceError::ApiError {
                status: 0,
                message: format!("invalid audio MIME type {mime_type:?}: {e}"),
            })?;
        let form = reqwest::multipart::Form::new()
            .text("model_id", STT_MODEL)
            .part("file", file);

        let request = self
            .client
            .post(format!("{}/speech-to-text", self.base_url))
            .header("xi-api-key", &self.api_key)
            .multipart(form);
        let response = http::send(request, self.timeout_secs, "speech-to-text").await?;
        let transcript: Transcript = http::json(response).await?;
        Ok(transcript.text)
    }
}

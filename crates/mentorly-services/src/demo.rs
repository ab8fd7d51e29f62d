//! Demo service implementations.
//!
//! Deterministic stand-ins used when a service is configured in demo mode.
//! Ids come from a per-instance counter so repeated runs produce the same
//! values, and every call is recorded for inspection in tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use mentorly_core::traits::{
    BadgeMinter, CheckoutRequest, Conversation, ConversationRequest, ConversationStatus,
    MintReceipt, MintRequest, PaymentGateway, PaymentRequest, PaymentSession, Persona,
    SessionStatus, SpeechRecognizer, SpeechSynthesizer, SubscriptionState, SubscriptionStatus,
    Video, VideoGenerator, VideoRequest, VideoStatus, Voice, VoiceSettings, CAREER_COACH_PERSONA,
    LESSON_PERSONA,
};

use crate::elevenlabs::DEFAULT_VOICE_ID;
use crate::tavus::poll_until_complete;

/// Payment gateway that fabricates checkout sessions.
#[derive(Default)]
pub struct DemoPaymentGateway {
    counter: AtomicU32,
    last_checkout: Mutex<Option<CheckoutRequest>>,
}

impl DemoPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions handed out so far.
    pub fn call_count(&self) -> u32 {
        self.counter.load(Ordering::Relaxed)
    }

    /// The last checkout request received.
    pub fn last_checkout(&self) -> Option<CheckoutRequest> {
        self.last_checkout.lock().ok().and_then(|guard| guard.clone())
    }

    fn next_id(&self) -> u32 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn session(&self, prefix: &str) -> PaymentSession {
        let session_id = format!("{prefix}_{:04}", self.next_id());
        PaymentSession {
            url: format!("https://checkout.stripe.com/demo?session_id={session_id}"),
            session_id,
            status: SessionStatus::Pending,
        }
    }
}

#[async_trait]
impl PaymentGateway for DemoPaymentGateway {
    fn name(&self) -> &str {
        "demo"
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> anyhow::Result<PaymentSession> {
        if let Ok(mut last) = self.last_checkout.lock() {
            *last = Some(request.clone());
        }
        Ok(self.session("cs_demo"))
    }

    async fn create_payment_session(
        &self,
        request: &PaymentRequest,
    ) -> anyhow::Result<PaymentSession> {
        if request.amount_minor_units().is_none() {
            anyhow::bail!("invalid payment amount: {}", request.amount);
        }
        Ok(self.session("cs_demo_payment"))
    }

    async fn subscription_status(&self, _customer_id: &str) -> anyhow::Result<SubscriptionStatus> {
        Ok(SubscriptionStatus {
            is_active: false,
            plan: "basic".into(),
            status: SubscriptionState::Active,
            current_period_end: Utc::now() + chrono::Duration::days(30),
            cancel_at_period_end: false,
        })
    }

    async fn cancel_subscription(&self, _subscription_id: &str) -> anyhow::Result<()> {
        Ok(())
    }

    async fn update_subscription(
        &self,
        _subscription_id: &str,
        _new_price_id: &str,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    async fn create_portal_session(
        &self,
        _customer_id: &str,
        _return_url: &str,
    ) -> anyhow::Result<String> {
        Ok(format!(
            "https://billing.stripe.com/demo?session_id=bps_demo_{:04}",
            self.next_id()
        ))
    }
}

/// Video generator whose videos complete immediately.
#[derive(Default)]
pub struct DemoVideoGenerator {
    counter: AtomicU32,
}

impl DemoVideoGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u32 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl VideoGenerator for DemoVideoGenerator {
    fn name(&self) -> &str {
        "demo"
    }

    async fn list_personas(&self) -> anyhow::Result<Vec<Persona>> {
        Ok(vec![
            Persona {
                persona_id: CAREER_COACH_PERSONA.into(),
                persona_name: "Anna - Career Coach".into(),
                system_prompt: Some(
                    "You are Anna, an experienced career coach specializing in tech careers."
                        .into(),
                ),
                context: None,
            },
            Persona {
                persona_id: LESSON_PERSONA.into(),
                persona_name: "Marcus - Tech Lead".into(),
                system_prompt: Some(
                    "You are Marcus, a senior technical leader with expertise in software engineering."
                        .into(),
                ),
                context: None,
            },
        ])
    }

    async fn create_conversation(
        &self,
        _request: &ConversationRequest,
    ) -> anyhow::Result<Conversation> {
        let n = self.next_id();
        Ok(Conversation {
            conversation_id: format!("conv_demo_{n:04}"),
            conversation_url: format!("https://tavus.io/conversations/demo_{n:04}"),
            status: ConversationStatus::Active,
        })
    }

    async fn generate_video(&self, _request: &VideoRequest) -> anyhow::Result<Video> {
        Ok(Video {
            video_id: format!("video_demo_{:04}", self.next_id()),
            status: VideoStatus::Pending,
            video_url: None,
            thumbnail_url: None,
            duration: None,
        })
    }

    async fn get_video(&self, video_id: &str) -> anyhow::Result<Video> {
        Ok(Video {
            video_id: video_id.to_string(),
            status: VideoStatus::Completed,
            video_url: Some(format!("https://tavus.io/videos/demo_{video_id}.mp4")),
            thumbnail_url: Some(format!("https://tavus.io/thumbnails/demo_{video_id}.jpg")),
            duration: Some(120),
        })
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

const DEMO_AUDIO_PREFIX: &str = "demo-audio:";

/// Speech backend that "synthesizes" text into a tagged byte string and
/// transcribes such strings back.
#[derive(Debug, Default)]
pub struct DemoSpeech;

#[async_trait]
impl SpeechSynthesizer for DemoSpeech {
    fn name(&self) -> &str {
        "demo"
    }

    async fn list_voices(&self) -> anyhow::Result<Vec<Voice>> {
        Ok(vec![Voice {
            voice_id: DEFAULT_VOICE_ID.into(),
            name: "Adam".into(),
            category: "premade".into(),
            description: None,
            preview_url: None,
        }])
    }

    async fn synthesize(
        &self,
        text: &str,
        voice_id: Option<&str>,
        _settings: &VoiceSettings,
    ) -> anyhow::Result<Vec<u8>> {
        let voice = voice_id.unwrap_or(DEFAULT_VOICE_ID);
        Ok(format!("{DEMO_AUDIO_PREFIX}{voice}:{text}").into_bytes())
    }
}

#[async_trait]
impl SpeechRecognizer for DemoSpeech {
    fn name(&self) -> &str {
        "demo"
    }

    async fn transcribe(&self, audio: &[u8], _mime_type: &str) -> anyhow::Result<String> {
        let decoded = String::from_utf8_lossy(audio);
        Ok(decoded
            .strip_prefix(DEMO_AUDIO_PREFIX)
            .and_then(|rest| rest.split_once(':'))
            .map(|(_, text)| text.to_string())
            .unwrap_or_default())
    }
}

/// Badge minter that simulates an on-chain mint after a delay.
pub struct SimulatedBadgeMinter {
    delay: Duration,
    network: String,
}

impl SimulatedBadgeMinter {
    pub fn new(delay: Duration, network: impl Into<String>) -> Self {
        Self {
            delay,
            network: network.into(),
        }
    }
}

#[async_trait]
impl BadgeMinter for SimulatedBadgeMinter {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn mint(&self, request: &MintRequest) -> anyhow::Result<MintReceipt> {
        if !request.is_eligible() {
            anyhow::bail!(
                "course {} is {}% complete; badges require 100%",
                request.course_id,
                request.progress
            );
        }

        tracing::info!(
            badge = %request.badge_name,
            recipient = %request.recipient,
            "minting badge"
        );
        tokio::time::sleep(self.delay).await;

        let id = Uuid::new_v4().simple().to_string();
        let transaction_id = format!("ALGO_{}", id[..16].to_ascii_uppercase());
        Ok(MintReceipt {
            asset_id: format!("0x{}", &id[16..24]),
            explorer_url: format!(
                "https://{}.algoexplorer.io/tx/{transaction_id}",
                self.network
            ),
            transaction_id,
            minted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout() -> CheckoutRequest {
        CheckoutRequest {
            price_id: "price_professional_monthly".into(),
            success_url: "https://app.example.com/success".into(),
            cancel_url: "https://app.example.com/pricing".into(),
            customer_email: None,
        }
    }

    #[tokio::test]
    async fn demo_sessions_are_deterministic() {
        let gateway = DemoPaymentGateway::new();
        let first = gateway.create_checkout_session(&checkout()).await.unwrap();
        let second = gateway.create_checkout_session(&checkout()).await.unwrap();

        assert_eq!(first.session_id, "cs_demo_0001");
        assert_eq!(second.session_id, "cs_demo_0002");
        assert_eq!(
            first.url,
            "https://checkout.stripe.com/demo?session_id=cs_demo_0001"
        );
        assert_eq!(gateway.call_count(), 2);
        assert_eq!(
            gateway.last_checkout().unwrap().price_id,
            "price_professional_monthly"
        );
    }

    #[tokio::test]
    async fn demo_payment_rejects_negative_amount() {
        let gateway = DemoPaymentGateway::new();
        let request = PaymentRequest {
            amount: -3.0,
            currency: "usd".into(),
            description: "refund?".into(),
            success_url: String::new(),
            cancel_url: String::new(),
        };
        assert!(gateway.create_payment_session(&request).await.is_err());
    }

    #[tokio::test]
    async fn demo_video_completes() {
        let generator = DemoVideoGenerator::new();
        let request = mentorly_core::traits::lesson_video_request("ML 101", "Intro", "Hi", None);
        let video = generator.generate_video(&request).await.unwrap();
        assert_eq!(video.status, VideoStatus::Pending);

        let done = generator
            .wait_for_video(&video.video_id, Duration::from_millis(1), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(done.status, VideoStatus::Completed);
        assert_eq!(done.duration, Some(120));
    }

    #[tokio::test]
    async fn demo_speech_round_trip() {
        let speech = DemoSpeech;
        let audio = speech
            .synthesize("Tell me about Rust jobs", None, &VoiceSettings::default())
            .await
            .unwrap();
        let text = speech.transcribe(&audio, "audio/mpeg").await.unwrap();
        assert_eq!(text, "Tell me about Rust jobs");

        assert_eq!(speech.transcribe(b"\x00\x01", "audio/wav").await.unwrap(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_mint_waits_then_issues_receipt() {
        let minter = SimulatedBadgeMinter::new(Duration::from_secs(3), "testnet");
        let request = MintRequest {
            course_id: "ml-fundamentals".into(),
            badge_name: "ML Practitioner".into(),
            recipient: "sam@example.com".into(),
            progress: 100,
        };

        let start = tokio::time::Instant::now();
        let receipt = minter.mint(&request).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert!(receipt.transaction_id.starts_with("ALGO_"));
        assert!(receipt.asset_id.starts_with("0x"));
        assert_eq!(receipt.asset_id.len(), 10);
        assert!(receipt
            .explorer_url
            .ends_with(&format!("/tx/{}", receipt.transaction_id)));
    }

    #[tokio::test]
    async fn incomplete_course_cannot_mint() {
        let minter = SimulatedBadgeMinter::new(Duration::ZERO, "testnet");
        let request = MintRequest {
            course_id: "ml-fundamentals".into(),
            badge_name: "ML Practitioner".into(),
            recipient: "sam@example.com".into(),
            progress: 80,
        };
        let err = minter.mint(&request).await.unwrap_err();
        assert!(err.to_string().contains("80% complete"));
    }
}

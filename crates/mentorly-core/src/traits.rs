//! Capability traits for the third-party services mentorly relies on.
//!
//! These async traits are implemented by the `mentorly-services` crate, both
//! against the real HTTP APIs and as deterministic demo stand-ins.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::course::Course;

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// Trait for the payment backend that fronts the card processor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Human-readable backend name (e.g. "stripe").
    fn name(&self) -> &str;

    /// Start a subscription checkout for a plan's price id.
    async fn create_checkout_session(&self, request: &CheckoutRequest)
        -> anyhow::Result<PaymentSession>;

    /// Start a one-time payment. Amounts are major units; implementations
    /// send minor units on the wire.
    async fn create_payment_session(&self, request: &PaymentRequest)
        -> anyhow::Result<PaymentSession>;

    async fn subscription_status(&self, customer_id: &str) -> anyhow::Result<SubscriptionStatus>;

    async fn cancel_subscription(&self, subscription_id: &str) -> anyhow::Result<()>;

    async fn update_subscription(&self, subscription_id: &str, new_price_id: &str)
        -> anyhow::Result<()>;

    /// Billing portal URL for a customer.
    async fn create_portal_session(&self, customer_id: &str, return_url: &str)
        -> anyhow::Result<String>;
}

/// Request to start a subscription checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// Request to start a one-time payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Amount in major currency units.
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl PaymentRequest {
    /// The amount in minor units (cents), or `None` for negative or
    /// non-finite amounts.
    pub fn amount_minor_units(&self) -> Option<u64> {
        let scaled = (self.amount * 100.0).round();
        if self.amount.is_finite() && self.amount >= 0.0 && scaled < u64::MAX as f64 {
            Some(scaled as u64)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Complete,
    Expired,
}

/// A checkout or payment session handed back to the learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub session_id: String,
    /// Where to send the learner to pay.
    pub url: String,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    Active,
    Canceled,
    PastDue,
    Incomplete,
}

/// A customer's current subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub is_active: bool,
    /// Plan id, e.g. "professional".
    pub plan: String,
    pub status: SubscriptionState,
    pub current_period_end: DateTime<Utc>,
    pub cancel_at_period_end: bool,
}

// ---------------------------------------------------------------------------
// Video mentoring
// ---------------------------------------------------------------------------

/// Trait for conversational video avatars and scripted video generation.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn list_personas(&self) -> anyhow::Result<Vec<Persona>>;

    /// Open a live conversation with a persona.
    async fn create_conversation(&self, request: &ConversationRequest)
        -> anyhow::Result<Conversation>;

    /// Queue a scripted video for rendering.
    async fn generate_video(&self, request: &VideoRequest) -> anyhow::Result<Video>;

    async fn get_video(&self, video_id: &str) -> anyhow::Result<Video>;

    /// Poll [`get_video`](Self::get_video) until the video completes.
    ///
    /// Fails when rendering fails or `max_wait` elapses first.
    async fn wait_for_video(
        &self,
        video_id: &str,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> anyhow::Result<Video>;
}

/// An AI mentor persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub persona_id: String,
    pub persona_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Request to open a live conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRequest {
    pub persona_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversational_context: Option<String>,
    #[serde(default)]
    pub properties: ConversationProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationProperties {
    /// Maximum call length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_call_duration: Option<u32>,
    #[serde(default)]
    pub enable_recording: bool,
    #[serde(default)]
    pub enable_transcription: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    Ended,
    Failed,
}

/// A live conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    pub conversation_url: String,
    pub status: ConversationStatus,
}

/// Request to render a scripted video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRequest {
    pub script: String,
    pub persona_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// A scripted video and its rendering state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub video_id: String,
    pub status: VideoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Length in seconds, once rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// Persona used for career coaching conversations.
pub const CAREER_COACH_PERSONA: &str = "anna-career-coach";
/// Persona used for lesson videos.
pub const LESSON_PERSONA: &str = "marcus-tech-lead";

/// What the mentor knows about the learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub name: String,
    pub role: String,
    pub experience: String,
    #[serde(default)]
    pub goals: Vec<String>,
}

/// Build a 30-minute recorded career coaching conversation about `topic`.
pub fn career_mentor_request(profile: &LearnerProfile, topic: &str) -> ConversationRequest {
    let context = format!(
        "User Profile:\n\
         - Name: {}\n\
         - Current Role: {}\n\
         - Experience: {}\n\
         - Goals: {}\n\n\
         Topic: {topic}\n\n\
         Please provide personalized career advice based on this user's profile and goals.",
        profile.name,
        profile.role,
        profile.experience,
        profile.goals.join(", "),
    );

    ConversationRequest {
        persona_id: CAREER_COACH_PERSONA.into(),
        conversation_name: Some(format!("Career Coaching: {topic}")),
        conversational_context: Some(context),
        properties: ConversationProperties {
            max_call_duration: Some(1800),
            enable_recording: true,
            enable_transcription: true,
            language: Some("en".into()),
        },
    }
}

/// Wrap lesson content in the instructor's opening and closing lines.
pub fn lesson_script(course_title: &str, lesson_title: &str, content: &str) -> String {
    format!(
        "Hello! Welcome to {course_title}. I'm your AI instructor, and today we're exploring {lesson_title}.\n\n\
         {content}\n\n\
         Let me break this down for you with practical examples that you can apply immediately in your career.\n\n\
         The key concepts we've covered today will form the foundation for more advanced topics in upcoming lessons.\n\n\
         Remember, mastering this material requires practice. I encourage you to complete the hands-on exercises and reach out if you have any questions.\n\n\
         Keep up the excellent work, and I'll see you in the next lesson!",
        content = content.trim(),
    )
}

/// A lesson video request for the default instructor persona.
pub fn lesson_video_request(
    course_title: &str,
    lesson_title: &str,
    content: &str,
    persona_id: Option<&str>,
) -> VideoRequest {
    VideoRequest {
        script: lesson_script(course_title, lesson_title, content),
        persona_id: persona_id.unwrap_or(LESSON_PERSONA).to_string(),
        background: Some("professional-classroom".into()),
    }
}

// ---------------------------------------------------------------------------
// Speech
// ---------------------------------------------------------------------------

/// Trait for text-to-speech backends.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn name(&self) -> &str;

    async fn list_voices(&self) -> anyhow::Result<Vec<Voice>>;

    /// Render `text` to encoded audio (MPEG). `voice_id` falls back to the
    /// backend's configured default.
    async fn synthesize(
        &self,
        text: &str,
        voice_id: Option<&str>,
        settings: &VoiceSettings,
    ) -> anyhow::Result<Vec<u8>>;
}

/// Trait for speech-to-text backends.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    fn name(&self) -> &str;

    /// Transcribe encoded audio of the given MIME type.
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> anyhow::Result<String>;
}

/// A synthesis voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

/// Voice tuning passed with every synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
    pub style: f64,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Credential badges
// ---------------------------------------------------------------------------

/// Trait for minting course completion badges as on-chain credentials.
#[async_trait]
pub trait BadgeMinter: Send + Sync {
    fn name(&self) -> &str;

    async fn mint(&self, request: &MintRequest) -> anyhow::Result<MintReceipt>;
}

/// Request to mint a completion badge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintRequest {
    pub course_id: String,
    pub badge_name: String,
    /// Learner or wallet receiving the badge.
    pub recipient: String,
    /// Course completion percent.
    pub progress: u32,
}

impl MintRequest {
    /// Request the course's own badge at its current progress.
    pub fn for_course(course: &Course, recipient: &str) -> Self {
        Self {
            course_id: course.id.clone(),
            badge_name: course.badge_name.clone(),
            recipient: recipient.into(),
            progress: course.progress(),
        }
    }

    /// Only completed courses earn a badge.
    pub fn is_eligible(&self) -> bool {
        self.progress >= 100
    }
}

/// Proof that a badge was minted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintReceipt {
    pub asset_id: String,
    pub transaction_id: String,
    pub explorer_url: String,
    pub minted_at: DateTime<Utc>,
}

/// Share text announcing a minted badge.
pub fn share_text(badge_name: &str) -> String {
    format!(
        "I just earned my \"{badge_name}\" blockchain certificate! \u{1F393} #BlockchainEducation #PocketMentor"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units() {
        let request = |amount| PaymentRequest {
            amount,
            currency: "usd".into(),
            description: "course".into(),
            success_url: String::new(),
            cancel_url: String::new(),
        };
        assert_eq!(request(49.99).amount_minor_units(), Some(4999));
        assert_eq!(request(0.0).amount_minor_units(), Some(0));
        assert_eq!(request(-1.0).amount_minor_units(), None);
        assert_eq!(request(f64::INFINITY).amount_minor_units(), None);
        assert_eq!(request(1e18).amount_minor_units(), None);
    }

    #[test]
    fn career_mentor_request_carries_profile() {
        let profile = LearnerProfile {
            name: "Sam".into(),
            role: "Data Analyst".into(),
            experience: "3 years".into(),
            goals: vec!["Move into ML".into(), "Lead a team".into()],
        };
        let request = career_mentor_request(&profile, "Interview prep");

        assert_eq!(request.persona_id, CAREER_COACH_PERSONA);
        assert_eq!(
            request.conversation_name.as_deref(),
            Some("Career Coaching: Interview prep")
        );
        let context = request.conversational_context.unwrap();
        assert!(context.contains("- Current Role: Data Analyst"));
        assert!(context.contains("- Goals: Move into ML, Lead a team"));
        assert_eq!(request.properties.max_call_duration, Some(1800));
        assert!(request.properties.enable_recording);
    }

    #[test]
    fn lesson_video_defaults_persona() {
        let request = lesson_video_request("ML 101", "Gradient Descent", "  Step downhill.  ", None);
        assert_eq!(request.persona_id, LESSON_PERSONA);
        assert!(request.script.starts_with("Hello! Welcome to ML 101."));
        assert!(request.script.contains("exploring Gradient Descent.\n\nStep downhill.\n\n"));
        assert!(request.script.ends_with("see you in the next lesson!"));

        let custom = lesson_video_request("ML 101", "Intro", "x", Some("anna-career-coach"));
        assert_eq!(custom.persona_id, "anna-career-coach");
    }

    #[test]
    fn video_status_wire_format() {
        let video: Video =
            serde_json::from_str(r#"{"video_id": "v1", "status": "processing"}"#).unwrap();
        assert_eq!(video.status, VideoStatus::Processing);
        assert!(video.video_url.is_none());
    }

    #[test]
    fn default_voice_settings() {
        let settings = VoiceSettings::default();
        assert_eq!(settings.stability, 0.5);
        assert_eq!(settings.similarity_boost, 0.75);
        assert!(settings.use_speaker_boost);
    }

    #[test]
    fn mint_eligibility() {
        let mut request = MintRequest {
            course_id: "ml-fundamentals".into(),
            badge_name: "ML Practitioner".into(),
            recipient: "sam@example.com".into(),
            progress: 99,
        };
        assert!(!request.is_eligible());
        request.progress = 100;
        assert!(request.is_eligible());
        assert!(share_text(&request.badge_name).contains("\"ML Practitioner\""));
    }

    #[test]
    fn mint_request_follows_course_progress() {
        let mut course = crate::catalog::sample_course("devops-mastery").unwrap();
        course.complete_activity("devops-intro").unwrap();

        let request = MintRequest::for_course(&course, "sam");
        assert_eq!(request.course_id, "devops-mastery");
        assert_eq!(request.badge_name, "DevOps Engineer Certified");
        assert_eq!(request.progress, 33);
        assert!(!request.is_eligible());
    }
}

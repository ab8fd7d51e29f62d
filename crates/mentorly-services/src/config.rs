//! Service configuration and factories.
//!
//! Each service runs in `demo` or `live` mode. The mode is chosen here, up
//! front; a live service that fails at runtime reports the failure instead
//! of quietly switching to demo data.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mentorly_core::traits::{
    BadgeMinter, PaymentGateway, SpeechRecognizer, SpeechSynthesizer, VideoGenerator,
};

use crate::demo::{DemoPaymentGateway, DemoSpeech, DemoVideoGenerator, SimulatedBadgeMinter};
use crate::elevenlabs::ElevenLabsSpeech;
use crate::error::ServiceError;
use crate::http::DEFAULT_TIMEOUT_SECS;
use crate::stripe::StripeGateway;
use crate::tavus::TavusVideoGenerator;

/// Whether a service talks to the real API or returns demo data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    #[default]
    Demo,
    Live,
}

/// Payment backend settings.
///
/// Note: Custom Debug impl masks the key to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct PaymentsConfig {
    #[serde(default)]
    pub mode: ServiceMode,
    #[serde(default)]
    pub publishable_key: String,
    /// Base URL of the checkout backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_success_url")]
    pub success_url: String,
    #[serde(default = "default_cancel_url")]
    pub cancel_url: String,
}

/// Tavus settings.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct VideoConfig {
    #[serde(default)]
    pub mode: ServiceMode,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// ElevenLabs settings.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub mode: ServiceMode,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
}

/// Simulated badge minting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeConfig {
    /// Simulated confirmation delay in milliseconds.
    #[serde(default = "default_mint_delay")]
    pub mint_delay_ms: u64,
    #[serde(default = "default_network")]
    pub network: String,
}

impl std::fmt::Debug for PaymentsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentsConfig")
            .field("mode", &self.mode)
            .field("publishable_key", &mask(&self.publishable_key))
            .field("backend_url", &self.backend_url)
            .field("success_url", &self.success_url)
            .field("cancel_url", &self.cancel_url)
            .finish()
    }
}

impl std::fmt::Debug for VideoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoConfig")
            .field("mode", &self.mode)
            .field("api_key", &mask(&self.api_key))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("mode", &self.mode)
            .field("api_key", &mask(&self.api_key))
            .field("base_url", &self.base_url)
            .field("voice_id", &self.voice_id)
            .finish()
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "***"
    }
}

fn default_backend_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_success_url() -> String {
    "http://localhost:5173/payment-success".to_string()
}
fn default_cancel_url() -> String {
    "http://localhost:5173/pricing".to_string()
}
fn default_mint_delay() -> u64 {
    3000
}
fn default_network() -> String {
    "testnet".to_string()
}
fn default_currency() -> String {
    "USD".to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            mode: ServiceMode::Demo,
            publishable_key: String::new(),
            backend_url: default_backend_url(),
            success_url: default_success_url(),
            cancel_url: default_cancel_url(),
        }
    }
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            mint_delay_ms: default_mint_delay(),
            network: default_network(),
        }
    }
}

/// Top-level mentorly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorlyConfig {
    #[serde(default)]
    pub payments: PaymentsConfig,
    #[serde(default)]
    pub video: VideoConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub badges: BadgeConfig,
    /// Currency used for price display.
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// HTTP request timeout for live services.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for MentorlyConfig {
    fn default() -> Self {
        Self {
            payments: PaymentsConfig::default(),
            video: VideoConfig::default(),
            speech: SpeechConfig::default(),
            badges: BadgeConfig::default(),
            default_currency: default_currency(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

impl MentorlyConfig {
    fn resolve_env_vars(&mut self) {
        self.payments.publishable_key = resolve_env_vars(&self.payments.publishable_key);
        self.payments.backend_url = resolve_env_vars(&self.payments.backend_url);
        self.video.api_key = resolve_env_vars(&self.video.api_key);
        self.video.base_url = self.video.base_url.as_deref().map(resolve_env_vars);
        self.speech.api_key = resolve_env_vars(&self.speech.api_key);
        self.speech.base_url = self.speech.base_url.as_deref().map(resolve_env_vars);
    }

    /// Apply `MENTORLY_*_KEY` overrides; a key set this way also switches
    /// that service to live mode.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("MENTORLY_STRIPE_KEY") {
            self.payments.publishable_key = key;
            self.payments.mode = ServiceMode::Live;
        }
        if let Ok(key) = std::env::var("MENTORLY_TAVUS_KEY") {
            self.video.api_key = key;
            self.video.mode = ServiceMode::Live;
        }
        if let Ok(key) = std::env::var("MENTORLY_ELEVENLABS_KEY") {
            self.speech.api_key = key;
            self.speech.mode = ServiceMode::Live;
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mentorly.toml` in the current directory
/// 2. `~/.config/mentorly/config.toml`
///
/// Environment variable overrides: `MENTORLY_STRIPE_KEY`, `MENTORLY_TAVUS_KEY`,
/// `MENTORLY_ELEVENLABS_KEY`.
pub fn load_config() -> Result<MentorlyConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MentorlyConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mentorly.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_str(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MentorlyConfig::default(),
    };

    config.apply_env_overrides();
    config.resolve_env_vars();

    Ok(config)
}

/// Parse a config TOML string without consulting the environment overrides.
pub fn parse_config_str(content: &str) -> Result<MentorlyConfig> {
    Ok(toml::from_str::<MentorlyConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mentorly"))
}

/// Create the payment gateway for the configured mode.
pub fn create_payment_gateway(
    config: &PaymentsConfig,
    timeout_secs: u64,
) -> Result<Box<dyn PaymentGateway>, ServiceError> {
    match config.mode {
        ServiceMode::Demo => Ok(Box::new(DemoPaymentGateway::new())),
        ServiceMode::Live => Ok(Box::new(StripeGateway::new(
            &config.publishable_key,
            &config.backend_url,
            timeout_secs,
        )?)),
    }
}

/// Create the video generator for the configured mode.
pub fn create_video_generator(
    config: &VideoConfig,
    timeout_secs: u64,
) -> Result<Box<dyn VideoGenerator>, ServiceError> {
    match config.mode {
        ServiceMode::Demo => Ok(Box::new(DemoVideoGenerator::new())),
        ServiceMode::Live => Ok(Box::new(TavusVideoGenerator::new(
            &config.api_key,
            config.base_url.clone(),
            timeout_secs,
        )?)),
    }
}

fn create_elevenlabs(config: &SpeechConfig, timeout_secs: u64) -> Result<ElevenLabsSpeech, ServiceError> {
    ElevenLabsSpeech::new(
        &config.api_key,
        config.base_url.clone(),
        config.voice_id.clone(),
        timeout_secs,
    )
}

/// Create the text-to-speech backend for the configured mode.
pub fn create_speech_synthesizer(
    config: &SpeechConfig,
    timeout_secs: u64,
) -> Result<Box<dyn SpeechSynthesizer>, ServiceError> {
    match config.mode {
        ServiceMode::Demo => Ok(Box::new(DemoSpeech)),
        ServiceMode::Live => Ok(Box::new(create_elevenlabs(config, timeout_secs)?)),
    }
}

/// Create the speech-to-text backend for the configured mode.
pub fn create_speech_recognizer(
    config: &SpeechConfig,
    timeout_secs: u64,
) -> Result<Box<dyn SpeechRecognizer>, ServiceError> {
    match config.mode {
        ServiceMode::Demo => Ok(Box::new(DemoSpeech)),
        ServiceMode::Live => Ok(Box::new(create_elevenlabs(config, timeout_secs)?)),
    }
}

/// Badges are always minted by the simulator.
pub fn create_badge_minter(config: &BadgeConfig) -> Box<dyn BadgeMinter> {
    Box::new(SimulatedBadgeMinter::new(
        Duration::from_millis(config.mint_delay_ms),
        config.network.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MENTORLY_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_MENTORLY_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_MENTORLY_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_MENTORLY_TEST_VAR");
    }

    #[test]
    fn default_config_is_all_demo() {
        let config = MentorlyConfig::default();
        assert_eq!(config.payments.mode, ServiceMode::Demo);
        assert_eq!(config.video.mode, ServiceMode::Demo);
        assert_eq!(config.speech.mode, ServiceMode::Demo);
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.badges.mint_delay_ms, 3000);
    }

    #[test]
    fn parse_service_config() {
        let toml_str = r#"
default_currency = "EUR"

[payments]
mode = "live"
publishable_key = "pk_test_abc"
backend_url = "https://api.example.com"

[video]
mode = "demo"

[speech]
mode = "live"
api_key = "xi-123"
voice_id = "custom-voice"

[badges]
mint_delay_ms = 0
"#;
        let config = parse_config_str(toml_str).unwrap();
        assert_eq!(config.payments.mode, ServiceMode::Live);
        assert_eq!(config.payments.backend_url, "https://api.example.com");
        assert_eq!(config.payments.success_url, default_success_url());
        assert_eq!(config.speech.voice_id.as_deref(), Some("custom-voice"));
        assert_eq!(config.badges.mint_delay_ms, 0);
        assert_eq!(config.badges.network, "testnet");
        assert_eq!(config.default_currency, "EUR");
    }

    #[test]
    fn debug_masks_keys() {
        let config = parse_config_str(
            r#"
[payments]
publishable_key = "pk_live_secret"

[video]
api_key = "tavus-secret"
"#,
        )
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("pk_live_secret"));
        assert!(!debug.contains("tavus-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mentorly.toml");
        std::fs::write(&path, "default_currency = \"GBP\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_currency, "GBP");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn demo_mode_yields_demo_services() {
        let config = MentorlyConfig::default();
        let payments = create_payment_gateway(&config.payments, 5).unwrap();
        assert_eq!(payments.name(), "demo");
        let video = create_video_generator(&config.video, 5).unwrap();
        assert_eq!(video.name(), "demo");
        let tts = create_speech_synthesizer(&config.speech, 5).unwrap();
        assert_eq!(tts.name(), "demo");
        assert_eq!(create_badge_minter(&config.badges).name(), "simulated");
    }

    #[test]
    fn live_mode_without_key_is_not_configured() {
        let payments = PaymentsConfig {
            mode: ServiceMode::Live,
            publishable_key: "your_stripe_publishable_key".into(),
            ..PaymentsConfig::default()
        };
        assert!(matches!(
            create_payment_gateway(&payments, 5),
            Err(ServiceError::NotConfigured { .. })
        ));

        let video = VideoConfig {
            mode: ServiceMode::Live,
            ..VideoConfig::default()
        };
        assert!(matches!(
            create_video_generator(&video, 5),
            Err(ServiceError::NotConfigured { .. })
        ));

        let speech = SpeechConfig {
            mode: ServiceMode::Live,
            ..SpeechConfig::default()
        };
        assert!(matches!(
            create_speech_recognizer(&speech, 5),
            Err(ServiceError::NotConfigured { .. })
        ));
    }

    #[test]
    fn live_mode_with_key_yields_real_services() {
        let payments = PaymentsConfig {
            mode: ServiceMode::Live,
            publishable_key: "pk_test_123".into(),
            ..PaymentsConfig::default()
        };
        assert_eq!(create_payment_gateway(&payments, 5).unwrap().name(), "stripe");

        let speech = SpeechConfig {
            mode: ServiceMode::Live,
            api_key: "xi-123".into(),
            ..SpeechConfig::default()
        };
        assert_eq!(create_speech_synthesizer(&speech, 5).unwrap().name(), "elevenlabs");
    }
}

//! mentorly-services: third-party service integrations.
//!
//! Implements the capability traits from `mentorly-core` against the payment
//! backend, Tavus and ElevenLabs, plus demo stand-ins and a simulated badge
//! minter. Configuration decides which implementation each service gets.

pub mod config;
pub mod demo;
pub mod elevenlabs;
pub mod error;
mod http;
pub mod stripe;
pub mod tavus;

pub use config::{
    create_badge_minter, create_payment_gateway, create_speech_recognizer,
    create_speech_synthesizer, create_video_generator, load_config, load_config_from,
    MentorlyConfig, ServiceMode,
};
pub use error::ServiceError;

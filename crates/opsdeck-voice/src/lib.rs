//! Voice infrastructure for the Opsdeck co-pilot.
//!
//! Turns one recorded utterance into one spoken reply: decode and resample
//! the compressed audio (ffmpeg subprocess), transcribe it (external
//! speech-to-text API), run the agent turn, and hand the reply text back
//! for synthesis (external text-to-speech API). The pipeline is stateless
//! per call and never errors outward — every failure becomes a fixed
//! apology the session can still speak.
//!
//! Playback-duration measurement (ffprobe subprocess) lives here too; the
//! session handler uses it to defer the navigation signal until the reply
//! has finished playing client-side.

mod audio;
mod config;
mod error;
mod pipeline;
mod stt;
mod tts;

pub use audio::AudioConverter;
pub use config::SpeechConfig;
pub use error::VoiceError;
pub use pipeline::{PipelineReply, VoicePipeline, PROCESSING_APOLOGY};
pub use stt::SttClient;
pub use tts::TtsClient;

//! The per-turn audio pipeline: decode → transcribe → agent.

use crate::audio::AudioConverter;
use crate::stt::SttClient;
use opsdeck_agent::CopilotAgent;
use std::sync::Arc;

/// The fixed reply spoken when any pipeline stage fails. The user always
/// hears something; silence is never an outcome of an error.
pub const PROCESSING_APOLOGY: &str = "Sorry, I encountered an error processing your request.";

/// What one utterance produced.
#[derive(Debug, Clone)]
pub struct PipelineReply {
    /// Text to synthesize and speak back.
    pub text: String,
    /// True when the turn actually emitted a `navigate` instruction — the
    /// session handler defers the navigation signal until playback ends.
    pub navigate: bool,
}

impl PipelineReply {
    fn apology() -> Self {
        Self {
            text: PROCESSING_APOLOGY.to_string(),
            navigate: false,
        }
    }
}

/// Stateless per-call pipeline over the audio converter, the transcription
/// client, and the agent.
pub struct VoicePipeline {
    converter: AudioConverter,
    stt: SttClient,
    agent: Arc<CopilotAgent>,
}

impl VoicePipeline {
    pub fn new(converter: AudioConverter, stt: SttClient, agent: Arc<CopilotAgent>) -> Self {
        Self { converter, stt, agent }
    }

    /// Runs one utterance through decode, transcription, and the agent.
    ///
    /// Infallible by design: any stage failure is logged and collapsed
    /// into the fixed apology with `navigate = false`.
    pub async fn process_turn(&self, session_id: &str, utterance: &[u8]) -> PipelineReply {
        tracing::info!(
            session_id = %session_id,
            bytes = utterance.len(),
            "processing audio input"
        );

        let wav = match self.converter.transcode_to_wav(utterance).await {
            Ok(wav) => wav,
            Err(e) => {
                tracing::error!(session_id = %session_id, "audio decode failed: {}", e);
                return PipelineReply::apology();
            }
        };

        let transcript = match self.stt.transcribe(&wav).await {
            Ok(transcript) => transcript,
            Err(e) => {
                tracing::error!(session_id = %session_id, "transcription failed: {}", e);
                return PipelineReply::apology();
            }
        };
        tracing::info!(session_id = %session_id, transcript = %transcript, "transcribed utterance");

        match self.agent.run_turn(session_id, &transcript).await {
            Ok(reply) => {
                tracing::info!(
                    session_id = %session_id,
                    navigate = reply.navigated,
                    reply = %reply.text,
                    "agent turn complete"
                );
                PipelineReply {
                    text: reply.text,
                    navigate: reply.navigated,
                }
            }
            Err(e) => {
                tracing::error!(session_id = %session_id, "agent turn failed: {}", e);
                PipelineReply::apology()
            }
        }
    }
}

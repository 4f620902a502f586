//! Batch analysis endpoint
//!
//! Accepts one complete audio recording plus a child id and runs the full
//! pipeline once. Unsupported file extensions are rejected before any audio
//! is decoded or any backend is called.

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use domain::{Analysis, ChildId, InteractionFailure, ResponseSource};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// File extensions accepted by the batch endpoint
const ALLOWED_EXTENSIONS: [&str; 3] = ["mp3", "wav", "m4a"];

/// Batch analysis request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Child profile id
    pub child_id: String,
    /// Original file name, used only for the extension check
    pub filename: String,
    /// Base64 audio bytes
    pub audio: String,
}

/// Batch analysis response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Recognized text
    pub transcription: String,
    /// Recognition confidence
    pub confidence: f32,
    /// Classification attached to the transcript
    pub analysis: Analysis,
    /// Coaching response text
    pub response_text: String,
    /// Strategy that produced the response
    pub response_source: ResponseSource,
    /// Base64 MP3 bytes, empty when synthesis failed
    pub audio_data: String,
    /// Whether the synthesis cache served the audio
    pub cache_hit: bool,
    /// Pipeline time in fractional seconds
    pub processing_time: f64,
    /// "good" or "slow" against the latency goal
    pub latency_status: String,
}

fn extension_of(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}

/// Run the pipeline once over a complete recording
#[instrument(skip(state, request), fields(child_id = %request.child_id, filename = %request.filename))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let extension = extension_of(&request.filename)
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ApiError::invalid_message("File name has no extension"))?;
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::invalid_message(format!(
            "Unsupported file extension .{extension}; allowed: .mp3, .wav, .m4a"
        )));
    }

    let id = ChildId::parse(&request.child_id)
        .map_err(|_| ApiError::user_not_found(&request.child_id))?;
    let profile = state
        .profiles
        .find(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::user_not_found(&request.child_id))?;

    let audio = BASE64
        .decode(&request.audio)
        .map_err(|err| ApiError::audio_processing_failed(format!("Invalid base64: {err}")))?;
    if audio.is_empty() {
        return Err(ApiError::audio_processing_failed("Empty audio payload"));
    }

    match state.interactions.process_audio(&profile, &audio).await {
        Ok(interaction) => Ok(Json(AnalyzeResponse {
            transcription: interaction.transcript.clone(),
            confidence: interaction.confidence,
            analysis: interaction.analysis.clone(),
            response_text: interaction.response_text.clone(),
            response_source: interaction.response_source,
            audio_data: BASE64.encode(&interaction.response_audio),
            cache_hit: interaction.synthesis_cache_hit,
            processing_time: interaction.processing_time_secs(),
            latency_status: interaction.latency_status.as_str().to_string(),
        })),
        Err(InteractionFailure::TranscriptionFailed { reason }) => {
            Err(ApiError::speech_processing_failed(reason))
        },
        Err(InteractionFailure::SynthesisFailed {
            reason,
            response_text,
        }) => {
            // The generated text still reaches the caller inside the error.
            Err(ApiError::speech_processing_failed(format!(
                "Synthesis failed ({reason}); generated response: {response_text}"
            )))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_parsing() {
        assert_eq!(extension_of("clip.mp3"), Some("mp3"));
        assert_eq!(extension_of("clip.backup.WAV"), Some("WAV"));
        assert_eq!(extension_of("noext"), None);
    }
}

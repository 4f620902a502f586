//! WebSocket session endpoint
//!
//! One socket per child session. Inbound messages carry base64 audio chunks
//! or plain text; outbound messages report the transcription with its
//! analysis, then the synthesized response. Faults answer the session with a
//! typed error message and never tear down other sessions.

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use application::services::AudioChunk;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use domain::{Analysis, ChildProfile, Interaction, InteractionFailure, SessionId};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Incoming WebSocket message from a client
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsIncoming {
    /// One audio chunk, base64-encoded
    AudioData {
        /// Base64 audio bytes
        data: String,
        /// Client capture timestamp, milliseconds
        #[serde(default)]
        timestamp: Option<u64>,
    },
    /// A typed message that skips transcription
    TextMessage {
        /// What the child (or caregiver) typed
        text: String,
        /// Client timestamp, milliseconds
        #[serde(default)]
        timestamp: Option<u64>,
    },
}

/// Outgoing WebSocket message to a client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsOutgoing {
    /// Transcription plus its classification
    Transcription {
        /// Recognized text
        text: String,
        /// Recognition confidence
        confidence: f32,
        /// Classification attached to the transcript
        analysis: Analysis,
        /// Server timestamp, milliseconds
        timestamp: u64,
    },
    /// Synthesized coaching response; `audio_data` is empty when synthesis
    /// failed and the text is delivered on its own
    TtsResponse {
        /// Base64 MP3 bytes, possibly empty
        #[serde(rename = "audioData")]
        audio_data: String,
        /// Coaching response text
        text: String,
        /// Server timestamp, milliseconds
        timestamp: u64,
        /// Pipeline time in fractional seconds
        processing_time: f64,
        /// "good" or "slow" against the latency goal
        latency_status: String,
        /// Whether the synthesis cache served the audio
        cache_hit: bool,
    },
    /// Typed session-level fault
    Error {
        /// Stable machine-readable code
        code: String,
        /// Human-readable description
        message: String,
        /// Server timestamp, milliseconds
        timestamp: u64,
    },
}

impl WsOutgoing {
    fn error(code: &str, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.into(),
            timestamp: now_ms(),
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Handle a WebSocket upgrade for one child session
pub async fn ws_handler(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, child_id))
}

async fn handle_socket(socket: WebSocket, state: AppState, child_id: String) {
    let (mut sink, mut stream) = socket.split();

    let profile = match resolve_profile(&state, &child_id).await {
        Ok(profile) => profile,
        Err(message) => {
            let reply = WsOutgoing::error("USER_NOT_FOUND", message);
            if let Ok(text) = serde_json::to_string(&reply) {
                let _ = sink.send(Message::Text(text.into())).await;
            }
            return;
        },
    };

    let session_id = SessionId::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsOutgoing>();
    state.sessions.connect(session_id, tx);
    info!(session_id = %session_id, child_id = %profile.id, "Session connected");

    // Forward queued outbound messages to the socket.
    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match serde_json::to_string(&message) {
                Ok(text) => {
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                },
                Err(err) => warn!(error = %err, "Failed to serialize outbound message"),
            }
        }
    });

    let recv_state = state.clone();
    let recv_profile = profile.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = stream.next().await {
            match message {
                Message::Text(text) => {
                    handle_client_message(&recv_state, &recv_profile, session_id, text.as_str())
                        .await;
                },
                Message::Close(_) => break,
                // Binary frames and pings are not part of the protocol.
                _ => {},
            }
        }
    });

    // Whichever side finishes first ends the session.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.sessions.disconnect(session_id);
    info!(session_id = %session_id, "Session closed");
}

async fn resolve_profile(state: &AppState, child_id: &str) -> Result<ChildProfile, String> {
    let id = domain::ChildId::parse(child_id)
        .map_err(|_| format!("Invalid child id: {child_id}"))?;
    match state.profiles.find(id).await {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(format!("No child profile for id {child_id}")),
        Err(err) => Err(err.to_string()),
    }
}

async fn handle_client_message(
    state: &AppState,
    profile: &ChildProfile,
    session_id: SessionId,
    raw: &str,
) {
    let incoming: WsIncoming = match serde_json::from_str(raw) {
        Ok(incoming) => incoming,
        Err(err) => {
            debug!(error = %err, "Unparseable client message");
            state.sessions.send(
                session_id,
                WsOutgoing::error("INVALID_MESSAGE_TYPE", "Unsupported or malformed message"),
            );
            return;
        },
    };

    match incoming {
        WsIncoming::AudioData { data, timestamp } => {
            handle_audio(state, profile, session_id, &data, timestamp).await;
        },
        WsIncoming::TextMessage { text, .. } => {
            handle_text(state, profile, session_id, text).await;
        },
    }
}

async fn handle_audio(
    state: &AppState,
    profile: &ChildProfile,
    session_id: SessionId,
    data: &str,
    timestamp: Option<u64>,
) {
    let bytes = match BASE64.decode(data) {
        Ok(bytes) => bytes,
        Err(err) => {
            state.sessions.send(
                session_id,
                WsOutgoing::error("AUDIO_PROCESSING_FAILED", format!("Invalid base64: {err}")),
            );
            return;
        },
    };

    let chunk = AudioChunk {
        data: bytes,
        timestamp_ms: timestamp.unwrap_or_else(now_ms),
    };
    let dispatched = match state.sessions.push_chunk(session_id, chunk) {
        Ok(dispatched) => dispatched,
        Err(err) => {
            warn!(session_id = %session_id, error = %err, "Chunk for dead session dropped");
            return;
        },
    };

    let Some(audio) = dispatched else {
        // Still buffering below the dispatch threshold.
        return;
    };

    let Ok(lock) = state.sessions.pipeline_lock(session_id) else {
        return;
    };
    let _guard = lock.lock().await;
    let started = Instant::now();

    match state.interactions.process_audio(profile, &audio).await {
        Ok(interaction) => deliver_interaction(state, session_id, &interaction),
        Err(InteractionFailure::TranscriptionFailed { reason }) => {
            state.sessions.send(
                session_id,
                WsOutgoing::error("SPEECH_PROCESSING_FAILED", reason),
            );
        },
        Err(InteractionFailure::SynthesisFailed { response_text, .. }) => {
            deliver_text_only(state, session_id, response_text, started.elapsed().as_secs_f64());
        },
    }
}

async fn handle_text(
    state: &AppState,
    profile: &ChildProfile,
    session_id: SessionId,
    text: String,
) {
    if text.trim().is_empty() {
        state.sessions.send(
            session_id,
            WsOutgoing::error("TEXT_PROCESSING_FAILED", "Empty text message"),
        );
        return;
    }

    let Ok(lock) = state.sessions.pipeline_lock(session_id) else {
        return;
    };
    let _guard = lock.lock().await;
    let started = Instant::now();

    match state.interactions.process_text(profile, text).await {
        Ok(interaction) => deliver_interaction(state, session_id, &interaction),
        Err(InteractionFailure::TranscriptionFailed { reason }) => {
            state.sessions.send(
                session_id,
                WsOutgoing::error("TEXT_PROCESSING_FAILED", reason),
            );
        },
        Err(InteractionFailure::SynthesisFailed { response_text, .. }) => {
            deliver_text_only(state, session_id, response_text, started.elapsed().as_secs_f64());
        },
    }
}

/// Send the transcription/analysis message followed by the audio response
fn deliver_interaction(state: &AppState, session_id: SessionId, interaction: &Interaction) {
    state.sessions.send(
        session_id,
        WsOutgoing::Transcription {
            text: interaction.transcript.clone(),
            confidence: interaction.confidence,
            analysis: interaction.analysis.clone(),
            timestamp: now_ms(),
        },
    );
    state.sessions.send(
        session_id,
        WsOutgoing::TtsResponse {
            audio_data: BASE64.encode(&interaction.response_audio),
            text: interaction.response_text.clone(),
            timestamp: now_ms(),
            processing_time: interaction.processing_time_secs(),
            latency_status: interaction.latency_status.as_str().to_string(),
            cache_hit: interaction.synthesis_cache_hit,
        },
    );
}

/// Degraded delivery when synthesis failed: the coaching text without audio
fn deliver_text_only(
    state: &AppState,
    session_id: SessionId,
    response_text: String,
    elapsed_secs: f64,
) {
    state.sessions.send(
        session_id,
        WsOutgoing::TtsResponse {
            audio_data: String::new(),
            text: response_text,
            timestamp: now_ms(),
            processing_time: elapsed_secs,
            latency_status: domain::LatencyStatus::from_elapsed(
                std::time::Duration::from_secs_f64(elapsed_secs),
            )
            .as_str()
            .to_string(),
            cache_hit: false,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_audio_message_parses() {
        let raw = r#"{"type":"audio_data","data":"YWJj","timestamp":1700000000000}"#;
        let incoming: WsIncoming = serde_json::from_str(raw).unwrap();
        match incoming {
            WsIncoming::AudioData { data, timestamp } => {
                assert_eq!(data, "YWJj");
                assert_eq!(timestamp, Some(1_700_000_000_000));
            },
            WsIncoming::TextMessage { .. } => unreachable!("wrong variant"),
        }
    }

    #[test]
    fn unknown_type_fails_to_parse() {
        let raw = r#"{"type":"video_data","data":"x"}"#;
        assert!(serde_json::from_str::<WsIncoming>(raw).is_err());
    }

    #[test]
    fn tts_response_serializes_with_camel_case_audio_field() {
        let message = WsOutgoing::TtsResponse {
            audio_data: "YWJj".to_string(),
            text: "물 줄까?".to_string(),
            timestamp: 1,
            processing_time: 0.5,
            latency_status: "good".to_string(),
            cache_hit: true,
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "tts_response");
        assert_eq!(json["audioData"], "YWJj");
        assert_eq!(json["cache_hit"], true);
    }

    #[test]
    fn error_message_carries_code_and_timestamp() {
        let message = WsOutgoing::error("USER_NOT_FOUND", "nope");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], "USER_NOT_FOUND");
        assert!(json["timestamp"].as_u64().is_some());
    }
}

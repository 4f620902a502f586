//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::sync::Arc;

use ai_speech::{Language, SpeechError, SpeedMode, TextToSpeech};
use application::error::ApplicationError;
use application::ports::{
    ChildProfileStore, CoachingContext, CoachingPort, SynthesisPort, TranscriptionPort,
    TranscriptionResult,
};
use application::services::{InteractionService, ResponseGenerator, SessionManager};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use domain::{ChildId, ChildProfile};
use infrastructure::adapters::SynthesisAdapter;
use infrastructure::cache::{SynthesisCache, SynthesisCacheConfig};
use infrastructure::config::ProfileSeed;
use infrastructure::persistence::{seed_profiles, InMemoryProfileStore};
use infrastructure::AppConfig;
use presentation_http::{create_router, AppState};
use serde_json::json;
use tempfile::TempDir;

/// Recognizer that returns a fixed transcript
struct FixedRecognizer {
    text: &'static str,
    configured: bool,
}

#[async_trait]
impl TranscriptionPort for FixedRecognizer {
    async fn transcribe(&self, _audio: &[u8]) -> Result<TranscriptionResult, ApplicationError> {
        if self.configured {
            Ok(TranscriptionResult {
                text: self.text.to_string(),
                confidence: 0.92,
            })
        } else {
            Err(ApplicationError::Configuration(
                "recognition credentials absent".to_string(),
            ))
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Coaching backend that is never configured; the generator falls back to
/// its built-in templates, which keeps responses deterministic.
struct NoCoaching;

#[async_trait]
impl CoachingPort for NoCoaching {
    async fn coach(&self, _context: &CoachingContext) -> Result<String, ApplicationError> {
        Err(ApplicationError::Configuration(
            "coaching key absent".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Synthesis backend returning audio derived from the input text
struct EchoSynthesizer;

#[async_trait]
impl TextToSpeech for EchoSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        _language: Language,
        _speed: SpeedMode,
    ) -> Result<Vec<u8>, SpeechError> {
        Ok(text.as_bytes().to_vec())
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// Build a server with a seeded child profile and working fake backends.
///
/// The `TempDir` must stay alive for the durable cache directory to exist.
async fn create_test_server() -> (TestServer, TempDir, ChildId) {
    create_server_with_recognizer(FixedRecognizer {
        text: "물",
        configured: true,
    })
    .await
}

async fn create_server_with_recognizer(
    recognizer: FixedRecognizer,
) -> (TestServer, TempDir, ChildId) {
    let child_id = ChildId::new();
    let profiles: Arc<dyn ChildProfileStore> = Arc::new(InMemoryProfileStore::with_profiles([
        ChildProfile::new(child_id, "아란", 20),
    ]));
    let (server, dir) = create_server_with_store(recognizer, profiles).await;
    (server, dir, child_id)
}

async fn create_server_with_store(
    recognizer: FixedRecognizer,
    profiles: Arc<dyn ChildProfileStore>,
) -> (TestServer, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let cache = Arc::new(
        SynthesisCache::open(SynthesisCacheConfig {
            dir: dir.path().to_path_buf(),
            max_capacity_mb: 8,
        })
        .await
        .expect("cache"),
    );

    let transcription: Arc<dyn TranscriptionPort> = Arc::new(recognizer);
    let synthesis: Arc<dyn SynthesisPort> = Arc::new(SynthesisAdapter::with_synthesizer(
        Arc::new(EchoSynthesizer),
        cache,
        Language::Ko,
    ));
    let generator = ResponseGenerator::new(Arc::new(NoCoaching));

    let state = AppState {
        interactions: Arc::new(InteractionService::new(
            transcription,
            Arc::clone(&synthesis),
            generator,
        )),
        sessions: Arc::new(SessionManager::new()),
        profiles,
        synthesis,
        config: Arc::new(AppConfig::default()),
    };

    let server = TestServer::new(create_router(state)).expect("Failed to create test server");
    (server, dir)
}

fn analyze_body(child_id: ChildId, filename: &str) -> serde_json::Value {
    json!({
        "child_id": child_id.to_string(),
        "filename": filename,
        "audio": BASE64.encode(b"fake pcm bytes"),
    })
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (server, _dir, _child) = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    assert_eq!(body["active_sessions"], 0);
    // The default config carries no credentials.
    assert_eq!(body["backends"]["recognition"], false);
    assert_eq!(body["backends"]["synthesis"], false);
    assert_eq!(body["backends"]["coaching"], false);
}

// ============ Batch Analysis Tests ============

#[tokio::test]
async fn analyze_runs_the_full_pipeline() {
    let (server, _dir, child_id) = create_test_server().await;

    let response = server
        .post("/v1/analyze")
        .json(&analyze_body(child_id, "clip.mp3"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["transcription"], "물");
    assert_eq!(body["analysis"]["intent"], "item_request");
    assert_eq!(body["analysis"]["age_appropriate"], true);
    // Coaching is unavailable, so the response comes from a template.
    assert_eq!(body["response_source"], "template");
    assert!(body["response_text"].as_str().expect("text").contains("물"));
    assert!(!body["audio_data"].as_str().expect("audio").is_empty());
    assert_eq!(body["cache_hit"], false);
    assert!(body["processing_time"].is_number());
    assert!(body["latency_status"].is_string());
}

#[tokio::test]
async fn analyze_second_identical_request_hits_the_cache() {
    let (server, _dir, child_id) = create_test_server().await;

    let first = server
        .post("/v1/analyze")
        .json(&analyze_body(child_id, "clip.mp3"))
        .await;
    first.assert_status_ok();
    let first_body: serde_json::Value = first.json();
    assert_eq!(first_body["cache_hit"], false);

    let second = server
        .post("/v1/analyze")
        .json(&analyze_body(child_id, "clip.mp3"))
        .await;
    second.assert_status_ok();
    let second_body: serde_json::Value = second.json();
    assert_eq!(second_body["cache_hit"], true);
    assert_eq!(second_body["audio_data"], first_body["audio_data"]);
}

#[tokio::test]
async fn config_provisioned_child_reaches_the_pipeline() {
    // Same provisioning path the server binary runs at startup: an empty
    // store seeded from configured profiles, then a request by the
    // configured id.
    let child_id = ChildId::new();
    let profiles: Arc<dyn ChildProfileStore> = Arc::new(InMemoryProfileStore::new());
    seed_profiles(
        profiles.as_ref(),
        &[ProfileSeed {
            id: Some(child_id.to_string()),
            name: "아란".to_string(),
            age_months: 20,
        }],
    )
    .await
    .expect("seeding");

    let (server, _dir) = create_server_with_store(
        FixedRecognizer {
            text: "물",
            configured: true,
        },
        profiles,
    )
    .await;

    let response = server
        .post("/v1/analyze")
        .json(&analyze_body(child_id, "clip.mp3"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["transcription"], "물");
}

#[tokio::test]
async fn analyze_rejects_unsupported_extension() {
    let (server, _dir, child_id) = create_test_server().await;

    let response = server
        .post("/v1/analyze")
        .json(&analyze_body(child_id, "clip.ogg"))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_MESSAGE_TYPE");
}

#[tokio::test]
async fn analyze_accepts_uppercase_extension() {
    let (server, _dir, child_id) = create_test_server().await;

    let response = server
        .post("/v1/analyze")
        .json(&analyze_body(child_id, "clip.WAV"))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn analyze_rejects_unknown_child() {
    let (server, _dir, _child) = create_test_server().await;

    let response = server
        .post("/v1/analyze")
        .json(&analyze_body(ChildId::new(), "clip.mp3"))
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn analyze_rejects_malformed_child_id() {
    let (server, _dir, _child) = create_test_server().await;

    let response = server
        .post("/v1/analyze")
        .json(&json!({
            "child_id": "not-a-uuid",
            "filename": "clip.mp3",
            "audio": BASE64.encode(b"bytes"),
        }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn analyze_rejects_invalid_base64() {
    let (server, _dir, child_id) = create_test_server().await;

    let response = server
        .post("/v1/analyze")
        .json(&json!({
            "child_id": child_id.to_string(),
            "filename": "clip.mp3",
            "audio": "!!! not base64 !!!",
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "AUDIO_PROCESSING_FAILED");
}

#[tokio::test]
async fn analyze_reports_recognition_failure_as_speech_error() {
    let (server, _dir, child_id) = create_server_with_recognizer(FixedRecognizer {
        text: "",
        configured: false,
    })
    .await;

    let response = server
        .post("/v1/analyze")
        .json(&analyze_body(child_id, "clip.mp3"))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "SPEECH_PROCESSING_FAILED");
}

// ============ Cache Maintenance Tests ============

#[tokio::test]
async fn cache_stats_start_empty_and_grow() {
    let (server, _dir, child_id) = create_test_server().await;

    let before: serde_json::Value = server.get("/v1/cache/stats").await.json();
    assert_eq!(before["entries"], 0);

    server
        .post("/v1/analyze")
        .json(&analyze_body(child_id, "clip.mp3"))
        .await
        .assert_status_ok();

    let after: serde_json::Value = server.get("/v1/cache/stats").await.json();
    assert_eq!(after["entries"], 1);
    assert!(after["total_bytes"].as_u64().expect("bytes") > 0);
}

#[tokio::test]
async fn cache_clear_removes_every_entry() {
    let (server, _dir, child_id) = create_test_server().await;

    server
        .post("/v1/analyze")
        .json(&analyze_body(child_id, "clip.mp3"))
        .await
        .assert_status_ok();

    let cleared: serde_json::Value = server.post("/v1/cache/clear").await.json();
    assert_eq!(cleared["cleared_entries"], 1);

    let stats: serde_json::Value = server.get("/v1/cache/stats").await.json();
    assert_eq!(stats["entries"], 0);
}

// ============ Route Tests ============

#[tokio::test]
async fn unknown_route_returns_404() {
    let (server, _dir, _child) = create_test_server().await;

    server.get("/unknown/path").await.assert_status_not_found();
}

#[tokio::test]
async fn missing_required_field_returns_error() {
    let (server, _dir, _child) = create_test_server().await;

    let response = server.post("/v1/analyze").json(&json!({})).await;

    response.assert_status_not_ok();
}

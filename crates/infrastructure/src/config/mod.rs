//! Application configuration
//!
//! Layered loading in the usual order: built-in defaults, then an optional
//! `config.toml`, then `WORDSPROUT_*` environment variables (for example
//! `WORDSPROUT_SERVER__PORT`). Provider sections deserialize directly into
//! the `ai_speech` and `ai_coach` config types so defaults live with the
//! adapters that use them.

use ai_coach::CoachConfig;
use ai_speech::{RecognitionConfig, SynthesisConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Pipeline behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// When true, no raw audio or transcript leaves the pipeline core
    #[serde(default = "default_true")]
    pub privacy_mode: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { privacy_mode: true }
    }
}

/// One child profile provisioned at startup.
///
/// Profile management proper (registration, accounts) lives outside this
/// system; operators list the children a deployment serves in `config.toml`
/// and the server seeds the store from it on boot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSeed {
    /// Fixed child id (UUID). When absent a fresh id is generated and
    /// logged at startup.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Age in months
    pub age_months: u32,
}

/// Synthesis cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Directory for the durable audio store
    #[serde(default = "default_cache_dir")]
    pub dir: String,
    /// In-memory front capacity in megabytes
    #[serde(default = "default_cache_capacity_mb")]
    pub max_capacity_mb: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            max_capacity_mb: default_cache_capacity_mb(),
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Speech recognition backend
    #[serde(default)]
    pub recognition: RecognitionConfig,
    /// Speech synthesis backend
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    /// Generative coaching backend
    #[serde(default)]
    pub coaching: CoachConfig,
    /// Pipeline behavior
    #[serde(default)]
    pub pipeline: PipelineSettings,
    /// Synthesis cache
    #[serde(default)]
    pub cache: CacheSettings,
    /// Child profiles provisioned at startup
    #[serde(default)]
    pub profiles: Vec<ProfileSeed>,
}

impl AppConfig {
    /// Load configuration from defaults, `config.toml` and `WORDSPROUT_*`
    /// environment variables.
    ///
    /// Nesting in env keys uses a double underscore so underscore-named
    /// fields stay addressable: `WORDSPROUT_SERVER__PORT`,
    /// `WORDSPROUT_PIPELINE__PRIVACY_MODE`,
    /// `WORDSPROUT_RECOGNITION__CLIENT_ID`.
    ///
    /// # Errors
    ///
    /// Returns a `config::ConfigError` when a source is malformed or a value
    /// fails to deserialize.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(Self::environment_source());

        let config: Self = builder.build()?.try_deserialize()?;
        config.warn_on_missing_credentials();
        Ok(config)
    }

    fn environment_source() -> config::Environment {
        config::Environment::with_prefix("WORDSPROUT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Log which backends will degrade because credentials are absent
    fn warn_on_missing_credentials(&self) {
        if !self.recognition.has_credentials() {
            warn!("Recognition credentials absent; audio messages will fail with a typed error");
        }
        if !self.synthesis.has_credentials() {
            warn!("Synthesis API key absent; responses will be delivered as text only");
        }
        if !self.coaching.has_credentials() {
            warn!("Coaching API key absent; responses fall back to templates");
        }
        if self.profiles.is_empty() {
            warn!("No child profiles configured; every session will fail with USER_NOT_FOUND");
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_true() -> bool {
    true
}

fn default_cache_dir() -> String {
    "cache/tts".to_string()
}

const fn default_cache_capacity_mb() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_private_and_uncredentialed() {
        let config = AppConfig::default();
        assert!(config.pipeline.privacy_mode);
        assert!(!config.recognition.has_credentials());
        assert!(!config.synthesis.has_credentials());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn toml_sections_deserialize() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [recognition]
            client_id = "id"
            client_secret = "secret"

            [pipeline]
            privacy_mode = false

            [cache]
            dir = "/tmp/tts"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.recognition.has_credentials());
        assert!(!config.pipeline.privacy_mode);
        assert_eq!(config.cache.dir, "/tmp/tts");
    }

    #[test]
    fn profile_seeds_deserialize() {
        let config: AppConfig = toml::from_str(
            r#"
            [[profiles]]
            id = "8c0fb12a-93f2-4634-b11a-655ecb0b4b0a"
            name = "아란"
            age_months = 20

            [[profiles]]
            name = "두리"
            age_months = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.profiles.len(), 2);
        assert_eq!(
            config.profiles[0].id.as_deref(),
            Some("8c0fb12a-93f2-4634-b11a-655ecb0b4b0a")
        );
        assert_eq!(config.profiles[1].id, None);
        assert_eq!(config.profiles[1].age_months, 30);
    }

    #[test]
    fn env_overrides_reach_underscore_named_fields() {
        // Injected source instead of process env so the test stays hermetic.
        let vars = std::collections::HashMap::from([
            (
                "WORDSPROUT_PIPELINE__PRIVACY_MODE".to_string(),
                "false".to_string(),
            ),
            (
                "WORDSPROUT_CACHE__MAX_CAPACITY_MB".to_string(),
                "5".to_string(),
            ),
            (
                "WORDSPROUT_RECOGNITION__CLIENT_ID".to_string(),
                "env-id".to_string(),
            ),
            ("WORDSPROUT_SERVER__PORT".to_string(), "9000".to_string()),
        ]);

        let config: AppConfig = config::Config::builder()
            .add_source(AppConfig::environment_source().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(!config.pipeline.privacy_mode);
        assert_eq!(config.cache.max_capacity_mb, 5);
        assert_eq!(config.recognition.client_id.as_deref(), Some("env-id"));
        assert_eq!(config.server.port, 9000);
    }
}

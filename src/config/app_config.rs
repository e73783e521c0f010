use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub inference: InferenceConfig,
    pub search: SearchConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Inference service settings. Defaults match the free tier of the hosted
/// endpoint: 10 requests per minute.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub requests_per_minute: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub base_url: String,
    /// Evidence records requested per claim.
    pub max_results: usize,
    /// Excerpt budget per search result, in characters.
    pub excerpt_max_chars: usize,
    /// Character budget for the rendered evidence digest.
    pub digest_max_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub max_claims: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            inference: InferenceConfig::default(),
            search: SearchConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cerebras.ai".to_string(),
            model: "zai-glm-4.7".to_string(),
            temperature: 1.0,
            top_p: 0.95,
            max_tokens: 4096,
            requests_per_minute: 10,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.parallel.ai".to_string(),
            max_results: 6,
            excerpt_max_chars: 8000,
            digest_max_chars: 8000,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { max_claims: 6 }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

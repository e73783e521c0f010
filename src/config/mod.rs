mod app_config;

pub use app_config::{
    AppConfig, InferenceConfig, LogFormat, LoggingConfig, PipelineConfig, SearchConfig,
    ServerConfig,
};

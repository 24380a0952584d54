// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub analyzer_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment. `ANALYZER_SERVICE_URL`
    /// overrides whatever the file says.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = Self::load_from_file(&environment)?;
        if let Ok(url) = std::env::var("ANALYZER_SERVICE_URL") {
            config.analyzer_url = url;
        }
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("RESUMESCAN_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Self> {
        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            // The original client hardcoded its backend address; that
            // stays the fallback when no config file is around.
            return Ok(Self::default_local());
        }

        let config_content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;

        let config_file: ConfigFile =
            serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(env_config)
    }

    fn default_local() -> Self {
        Self {
            analyzer_url: "http://127.0.0.1:5001".to_string(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

use std::env;

use auth::HashingCost;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Upper bound for `token.ttl_secs` (one year).
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub grpc: GrpcConfig,
    pub token: TokenConfig,
    pub hashing: HashingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GrpcConfig {
    pub port: u16,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub ttl_secs: i64,
}

/// Argon2id work factor and the number of hashing jobs allowed in parallel.
#[derive(Debug, Deserialize, Clone)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub max_concurrency: usize,
}

impl From<&HashingConfig> for HashingCost {
    fn from(config: &HashingConfig) -> Self {
        Self {
            memory_kib: config.memory_kib,
            iterations: config.iterations,
            parallelism: config.parallelism,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (STORAGE__URL, GRPC__PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // STORAGE__URL=sqlite://... overrides storage.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Lifetime of issued session tokens.
    ///
    /// # Errors
    /// * `Message` - `token.ttl_secs` is not in `1..=MAX_TOKEN_TTL_SECS`
    pub fn token_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        let ttl_secs = self.token.ttl_secs;

        if !(1..=MAX_TOKEN_TTL_SECS).contains(&ttl_secs) {
            return Err(ConfigError::Message(format!(
                "token.ttl_secs must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_SECS, ttl_secs
            )));
        }

        chrono::Duration::try_seconds(ttl_secs).ok_or_else(|| {
            ConfigError::Message(format!("token.ttl_secs is out of range: {}", ttl_secs))
        })
    }
}

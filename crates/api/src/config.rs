/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        }
    }
}

/// Third-party provider configuration loaded from environment variables.
///
/// Unlike [`ServerConfig`] there are no defaults: every key is required,
/// and a missing one fails fast at startup.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// PlantNet identification API key (`PLANTNET_API_KEY`).
    pub plantnet_api_key: String,
    /// OpenAI API key for image synthesis and translation (`OPENAI_API_KEY`).
    pub openai_api_key: String,
    /// remove.bg API key (`REMOVEBG_API_KEY`).
    pub removebg_api_key: String,
    /// S3 bucket for generated images (`S3_BUCKET_NAME`).
    pub s3_bucket: String,
    /// AWS region the bucket lives in (`AWS_REGION`).
    pub aws_region: String,
}

impl ProviderConfig {
    /// Load provider keys from environment variables, panicking on any
    /// missing value.
    pub fn from_env() -> Self {
        Self {
            plantnet_api_key: require("PLANTNET_API_KEY"),
            openai_api_key: require("OPENAI_API_KEY"),
            removebg_api_key: require("REMOVEBG_API_KEY"),
            s3_bucket: require("S3_BUCKET_NAME"),
            aws_region: require("AWS_REGION"),
        }
    }
}

fn require(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}

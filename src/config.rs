use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Perplexity API key (bearer token)
    pub perplexity_api_key: String,

    /// Perplexity API base URL
    #[serde(default = "default_perplexity_api_url")]
    pub perplexity_api_url: String,

    /// Perplexity model identifier
    #[serde(default = "default_perplexity_model")]
    pub perplexity_model: String,

    /// Total request timeout for upstream calls, in seconds
    #[serde(default = "default_perplexity_timeout_secs")]
    pub perplexity_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_perplexity_api_url() -> String {
    "https://api.perplexity.ai".to_string()
}

fn default_perplexity_model() -> String {
    "sonar".to_string()
}

fn default_perplexity_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

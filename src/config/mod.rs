use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,
    /// Base URL of the postal-code lookup service
    #[serde(default = "default_cep_api_url")]
    pub cep_api_url: String,
    /// Response format segment appended to every lookup
    #[serde(default = "default_cep_response_format")]
    pub cep_response_format: String,
    /// Directory printed client sheets are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Log destination; the terminal UI owns stdout
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_cep_api_url() -> String {
    "https://viacep.com.br/ws".to_string()
}

fn default_cep_response_format() -> String {
    "json".to_string()
}

fn default_output_dir() -> String {
    "documents".to_string()
}

fn default_log_file() -> String {
    "client_registry.log".to_string()
}

impl Config {
    /// Load configuration from environment variables
    /// 
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Deserialize configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)?;

        Ok(config)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Load configuration; `.env` is read once, inside `Config::load`
pub fn init() -> Result<Config> {
    let config = Config::load()?;
    
    Ok(config)
}

//! Application configuration loaded from environment variables.

use secrecy::SecretString;
use std::env;
use std::path::PathBuf;

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8000;
    pub const DEV_BOOKS_DIR: &str = "./books";
    pub const DEV_WEBAPP_URL: &str = "http://localhost:8000/";
    pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Library root: shared PDFs at the top level, per-user PDFs under `users/<id>/`
    pub books_dir: PathBuf,
    /// Telegram bot token; every remote file operation fails without it
    pub bot_token: Option<SecretString>,
    /// Base URL of the Telegram Bot API (overridable for self-hosted API servers and tests)
    pub telegram_api_base: String,
    /// Public base URL of the web surface (what the bot hands out to users)
    pub webapp_url: String,
    /// Directory for static frontend assets (optional)
    pub static_dir: Option<PathBuf>,
    /// Per-user cap on registered remote files (None = unbounded)
    pub max_files_per_user: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development):
    /// - All variables have sensible defaults
    /// - Only RUST_ENV is required
    ///
    /// In production mode (RUST_ENV=production):
    /// - BOT_TOKEN is required
    /// - WEBAPP_URL must not be the localhost default
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `BOOKREADER_HOST`: Server host (default: 127.0.0.1)
    /// - `BOOKREADER_PORT`: Server port (default: 8000)
    /// - `BOOKS_DIR`: Library root directory (default: ./books)
    /// - `BOT_TOKEN`: Telegram bot token (required in production)
    /// - `TELEGRAM_API_BASE`: Bot API base URL (default: https://api.telegram.org)
    /// - `WEBAPP_URL`: Public base URL of the web surface
    /// - `BOOKREADER_STATIC_DIR`: Static assets directory (optional)
    /// - `BOOKREADER_MAX_FILES_PER_USER`: Per-user remote registry cap (default: unbounded)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Parse environment - required
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        // Load values with defaults
        let host = env::var("BOOKREADER_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("BOOKREADER_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("BOOKREADER_PORT must be a valid port number"))?;

        let books_dir = PathBuf::from(
            env::var("BOOKS_DIR").unwrap_or_else(|_| defaults::DEV_BOOKS_DIR.to_string()),
        );

        // Empty BOT_TOKEN is treated the same as unset
        let bot_token = env::var("BOT_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        let telegram_api_base = env::var("TELEGRAM_API_BASE")
            .unwrap_or_else(|_| defaults::TELEGRAM_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let webapp_url =
            env::var("WEBAPP_URL").unwrap_or_else(|_| defaults::DEV_WEBAPP_URL.to_string());

        let static_dir = env::var("BOOKREADER_STATIC_DIR").ok().map(PathBuf::from);

        let max_files_per_user = match env::var("BOOKREADER_MAX_FILES_PER_USER") {
            Ok(v) => Some(v.parse::<usize>().map_err(|_| {
                ConfigError::InvalidValue("BOOKREADER_MAX_FILES_PER_USER must be a valid number")
            })?),
            Err(_) => None,
        };

        let config = Config {
            environment,
            host,
            port,
            books_dir,
            bot_token,
            telegram_api_base,
            webapp_url,
            static_dir,
            max_files_per_user,
        };

        // Validate production configuration
        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration is complete and does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.bot_token.is_none() {
            errors.push(
                "BOT_TOKEN is not set. Remote file streaming cannot work without it.".to_string(),
            );
        }

        if self.webapp_url == defaults::DEV_WEBAPP_URL {
            errors.push(format!(
                "WEBAPP_URL is using development default '{}'. Set the public URL of this server.",
                defaults::DEV_WEBAPP_URL
            ));
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Per-user library subtree root (`<books_dir>/users`).
    pub fn user_books_dir(&self) -> PathBuf {
        self.books_dir.join("users")
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}

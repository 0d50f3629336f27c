use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub limits: LimitsConfig,
    /// JWT authentication configuration
    pub jwt: JwtAuthConfig,
    /// OAuth sign-in configuration
    #[serde(default)]
    pub oauth: OAuthConfig,
    /// Hosted checkout configuration
    #[serde(default)]
    pub payments: PaymentsConfig,
    /// Audio upload storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Email service configuration
    #[serde(default)]
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// The persistence-layer pool configuration.
    pub fn pool_config(&self) -> persistence::db::DatabaseConfig {
        persistence::db::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_secs: self.connect_timeout_secs,
            idle_timeout_secs: self.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted audio upload size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_bytes: usize,

    /// Password reset token lifetime in minutes.
    #[serde(default = "default_reset_token_expiry")]
    pub reset_token_expiry_mins: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtAuthConfig {
    /// RSA private key in PEM format for signing tokens
    pub private_key: String,

    /// RSA public key in PEM format for verifying tokens
    pub public_key: String,

    /// Access token expiration in seconds (default: 3600 = 1 hour)
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: i64,

    /// Refresh token expiration in seconds (default: 2592000 = 30 days)
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: i64,

    /// Leeway in seconds for clock skew tolerance (default: 30)
    #[serde(default = "default_jwt_leeway")]
    pub leeway_secs: u64,
}

/// OAuth sign-in configuration. An empty client id disables the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthConfig {
    #[serde(default)]
    pub google_client_id: String,
}

/// Hosted checkout provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsConfig {
    /// Whether checkout is enabled at all
    #[serde(default)]
    pub enabled: bool,

    /// Provider API base URL
    #[serde(default = "default_payments_api_base")]
    pub api_base_url: String,

    /// Provider API secret key
    #[serde(default)]
    pub secret_key: String,

    /// Price id of the premium subscription plan
    #[serde(default)]
    pub price_id: String,

    /// Where the provider redirects after a successful checkout
    #[serde(default)]
    pub success_url: String,

    /// Where the provider redirects after an abandoned checkout
    #[serde(default)]
    pub cancel_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_payments_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base_url: default_payments_api_base(),
            secret_key: String::new(),
            price_id: String::new(),
            success_url: String::new(),
            cancel_url: String::new(),
            timeout_ms: default_payments_timeout_ms(),
        }
    }
}

/// Audio upload storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded audio files are written.
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
        }
    }
}

/// Email service configuration for password reset emails.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Whether email sending is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Email provider: console (logs emails, for development)
    #[serde(default = "default_email_provider")]
    pub provider: String,

    /// Sender email address (From header)
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Sender name (From header)
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Base URL for email links (e.g., https://app.lingora.app)
    #[serde(default)]
    pub base_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_email_provider(),
            sender_email: default_sender_email(),
            sender_name: default_sender_name(),
            base_url: String::new(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_rate_limit() -> u32 {
    100
}
fn default_max_upload_size() -> usize {
    25 * 1024 * 1024
}
fn default_reset_token_expiry() -> i64 {
    60
}
fn default_access_token_expiry() -> i64 {
    3600 // 1 hour
}
fn default_refresh_token_expiry() -> i64 {
    2592000 // 30 days
}
fn default_jwt_leeway() -> u64 {
    30 // 30 seconds for clock skew tolerance
}
fn default_payments_api_base() -> String {
    "https://api.checkout.example.com".to_string()
}
fn default_payments_timeout_ms() -> u64 {
    10000
}
fn default_audio_dir() -> String {
    "data/audio".to_string()
}
fn default_email_provider() -> String {
    "console".to_string() // Default to console logging for development
}
fn default_sender_email() -> String {
    "noreply@lingora.app".to_string()
}
fn default_sender_name() -> String {
    "Lingora".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with LINGORA__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("LINGORA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_pool_config_conversion() {
        let db = DatabaseConfig {
            url: "postgres://localhost/lingora".to_string(),
            max_connections: 7,
            min_connections: 2,
            connect_timeout_secs: 5,
            idle_timeout_secs: 300,
        };

        let pool = db.pool_config();
        assert_eq!(pool.url, db.url);
        assert_eq!(pool.max_connections, 7);
        assert_eq!(pool.min_connections, 2);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(default_port(), 8080);
        assert_eq!(default_rate_limit(), 100);
        assert_eq!(default_email_provider(), "console");
        assert!(!PaymentsConfig::default().enabled);
        assert_eq!(StorageConfig::default().audio_dir, "data/audio");
    }
}

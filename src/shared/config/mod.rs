//! Application configuration module
//!
//! Provides the immutable configuration the server is built from. It is
//! constructed once at start-up (from the environment via [`AppConfig::from_env`],
//! or through [`AppConfig::builder`] in tests), validated, and then shared
//! read-only through the application state.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default lifetime of an access token (15 minutes)
pub const DEFAULT_JWT_EXPIRY: Duration = Duration::from_secs(15 * 60);

/// Default maximum age of an email verification token (24 hours)
pub const DEFAULT_VERIFICATION_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

const DEFAULT_DATABASE_URL: &str = "sqlite://bookshelf.db?mode=rwc";
const DEFAULT_SERVER_PORT: u16 = 5000;
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_UPLOAD_FOLDER: &str = "images";
const DEFAULT_SMTP_PORT: u16 = 587;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;
const MAX_JWT_EXPIRY: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// SMTP relay settings
#[derive(Clone)]
pub struct SmtpConfig {
    /// Relay hostname (e.g. smtp.gmail.com)
    pub host: String,
    /// Relay port (587 for STARTTLS)
    pub port: u16,
    /// Login for the relay
    pub username: String,
    /// Password or app-specific password
    pub password: String,
    /// `From` mailbox used for outgoing mail
    pub from: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// sqlx connection URL for the SQLite database
    pub database_url: String,
    /// Port the HTTP server listens on
    pub server_port: u16,
    /// Externally visible base URL, used to build confirmation and avatar links
    pub public_base_url: String,
    /// Secret used to sign email verification tokens
    pub secret_key: String,
    /// Fixed salt mixed into the verification token signing key
    pub security_password_salt: String,
    /// Secret used to sign JWT access tokens
    pub jwt_secret_key: String,
    /// Lifetime of issued access tokens
    pub jwt_expiry: Duration,
    /// Maximum accepted age of a verification token
    pub verification_max_age: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Directory avatar uploads are written to
    pub upload_folder: PathBuf,
    /// SMTP relay; `None` means outgoing mail is only logged
    pub smtp: Option<SmtpConfig>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("server_port", &self.server_port)
            .field("public_base_url", &self.public_base_url)
            .field("secret_key", &"<redacted>")
            .field("security_password_salt", &"<redacted>")
            .field("jwt_secret_key", &"<redacted>")
            .field("jwt_expiry", &self.jwt_expiry)
            .field("verification_max_age", &self.verification_max_age)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("upload_folder", &self.upload_folder)
            .field("smtp", &self.smtp)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load the configuration from environment variables
    ///
    /// `SECRET_KEY`, `SECURITY_PASSWORD_SALT` and `JWT_SECRET_KEY` are required;
    /// everything else falls back to a development default. SMTP is enabled
    /// only when `SMTP_HOST` is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Some(url) = env_var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = env_parse::<u16>("SERVER_PORT")? {
            builder = builder.server_port(port);
        }
        if let Some(url) = env_var("PUBLIC_BASE_URL") {
            builder = builder.public_base_url(url);
        }
        if let Some(secret) = env_var("SECRET_KEY") {
            builder = builder.secret_key(secret);
        }
        if let Some(salt) = env_var("SECURITY_PASSWORD_SALT") {
            builder = builder.security_password_salt(salt);
        }
        if let Some(secret) = env_var("JWT_SECRET_KEY") {
            builder = builder.jwt_secret_key(secret);
        }
        if let Some(secs) = env_parse::<u64>("JWT_EXPIRY_SECONDS")? {
            builder = builder.jwt_expiry(Duration::from_secs(secs));
        }
        if let Some(secs) = env_parse::<u64>("VERIFICATION_MAX_AGE_SECONDS")? {
            builder = builder.verification_max_age(Duration::from_secs(secs));
        }
        if let Some(cost) = env_parse::<u32>("BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(folder) = env_var("UPLOAD_FOLDER") {
            builder = builder.upload_folder(folder);
        }

        if let Some(host) = env_var("SMTP_HOST") {
            let username = env_var("SMTP_USERNAME").ok_or(ConfigError::MissingValue("SMTP_USERNAME"))?;
            let password = env_var("SMTP_PASSWORD").ok_or(ConfigError::MissingValue("SMTP_PASSWORD"))?;
            let from = env_var("MAIL_FROM").unwrap_or_else(|| username.clone());
            let port = env_parse::<u16>("SMTP_PORT")?.unwrap_or(DEFAULT_SMTP_PORT);
            builder = builder.smtp(SmtpConfig {
                host,
                port,
                username,
                password,
                from,
            });
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                name: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if !self.public_base_url.starts_with("http://") && !self.public_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.public_base_url.clone()));
        }
        if self.jwt_expiry.is_zero() || self.jwt_expiry > MAX_JWT_EXPIRY {
            return Err(ConfigError::InvalidValue {
                name: "JWT_EXPIRY_SECONDS",
                value: self.jwt_expiry.as_secs().to_string(),
            });
        }
        if self.verification_max_age.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "VERIFICATION_MAX_AGE_SECONDS",
                value: "0".to_string(),
            });
        }
        for (name, value) in [
            ("SECRET_KEY", &self.secret_key),
            ("SECURITY_PASSWORD_SALT", &self.security_password_salt),
            ("JWT_SECRET_KEY", &self.jwt_secret_key),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingValue(name));
            }
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    server_port: Option<u16>,
    public_base_url: Option<String>,
    secret_key: Option<String>,
    security_password_salt: Option<String>,
    jwt_secret_key: Option<String>,
    jwt_expiry: Option<Duration>,
    verification_max_age: Option<Duration>,
    bcrypt_cost: Option<u32>,
    upload_folder: Option<PathBuf>,
    smtp: Option<SmtpConfig>,
}

impl AppConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listen port
    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    /// Set the public base URL
    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    /// Set the verification token secret
    pub fn secret_key(mut self, secret: impl Into<String>) -> Self {
        self.secret_key = Some(secret.into());
        self
    }

    /// Set the verification token salt
    pub fn security_password_salt(mut self, salt: impl Into<String>) -> Self {
        self.security_password_salt = Some(salt.into());
        self
    }

    /// Set the JWT signing secret
    pub fn jwt_secret_key(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret_key = Some(secret.into());
        self
    }

    /// Set the access token lifetime
    pub fn jwt_expiry(mut self, expiry: Duration) -> Self {
        self.jwt_expiry = Some(expiry);
        self
    }

    /// Set the verification token max age
    pub fn verification_max_age(mut self, max_age: Duration) -> Self {
        self.verification_max_age = Some(max_age);
        self
    }

    /// Set the bcrypt cost
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the avatar upload folder
    pub fn upload_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.upload_folder = Some(folder.into());
        self
    }

    /// Configure the SMTP relay
    pub fn smtp(mut self, smtp: SmtpConfig) -> Self {
        self.smtp = Some(smtp);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            database_url: self.database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
            public_base_url: self
                .public_base_url
                .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string()),
            secret_key: self.secret_key.ok_or(ConfigError::MissingValue("SECRET_KEY"))?,
            security_password_salt: self
                .security_password_salt
                .ok_or(ConfigError::MissingValue("SECURITY_PASSWORD_SALT"))?,
            jwt_secret_key: self.jwt_secret_key.ok_or(ConfigError::MissingValue("JWT_SECRET_KEY"))?,
            jwt_expiry: self.jwt_expiry.unwrap_or(DEFAULT_JWT_EXPIRY),
            verification_max_age: self.verification_max_age.unwrap_or(DEFAULT_VERIFICATION_MAX_AGE),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST),
            upload_folder: self
                .upload_folder
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_FOLDER)),
            smtp: self.smtp,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env_var(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        None => Ok(None),
    }
}

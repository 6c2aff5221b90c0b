//! Process configuration.
//!
//! Values come from the environment (after `.env` is loaded by the binary),
//! and command line flags override them through the `with_*` builders.
//! Precedence: CLI flag > env var > default.

use std::env;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://app.itsdart.com/api/v0/public";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("DART_TOKEN environment variable is required")]
    #[diagnostic(
        code(dart_mcp::config::missing_token),
        help("Create a token at https://app.itsdart.com/?settings=account and export it as DART_TOKEN, or put it in a .env file")
    )]
    MissingToken,

    #[error("Invalid value for {name}: '{value}' ({reason})")]
    #[diagnostic(code(dart_mcp::config::invalid_value))]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration shared by both binaries.
#[derive(Clone)]
pub struct Config {
    token: String,
    base_url: String,
    host: IpAddr,
    port: u16,
    timeout: Duration,
}

// Token is redacted
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                name,
                value: raw.clone(),
                reason: e.to_string(),
            }),
        _ => Ok(None),
    }
}

impl Config {
    /// Configuration with the given token and every other value defaulted.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read `DART_TOKEN`, `DART_HOST`, `HOST`, `PORT` and `DART_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var("DART_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let mut config = Self::new(token);
        if let Some(base_url) = parse_var::<String>("DART_HOST")? {
            config = config.with_base_url(base_url);
        }
        if let Some(host) = parse_var::<IpAddr>("HOST")? {
            config = config.with_host(host);
        }
        if let Some(port) = parse_var::<u16>("PORT")? {
            config = config.with_port(port);
        }
        if let Some(secs) = parse_var::<u64>("DART_TIMEOUT_SECS")? {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

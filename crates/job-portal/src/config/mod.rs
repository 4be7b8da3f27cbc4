use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_INTERVIEWS_CSV: &str = "interviews.csv";
const DEFAULT_REFRESH_SECS: u64 = 60;
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub portal: PortalConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let interviews_csv = env::var("PORTAL_INTERVIEWS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_INTERVIEWS_CSV));
        let refresh_secs = positive_secs("PORTAL_REFRESH_SECS", DEFAULT_REFRESH_SECS)
            .ok_or(ConfigError::InvalidRefreshInterval)?;
        let session_ttl_secs = positive_secs("PORTAL_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)
            .ok_or(ConfigError::InvalidSessionTtl)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            portal: PortalConfig {
                interviews_csv,
                refresh_interval: Duration::from_secs(refresh_secs),
                session_ttl: Duration::from_secs(session_ttl_secs),
            },
        })
    }
}

/// `default` when unset, `None` when set to anything but a positive integer.
fn positive_secs(key: &str, default: u64) -> Option<u64> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0),
        Err(_) => Some(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the interview listing lives, how often it is re-read, and how long
/// an idle session is kept.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub interviews_csv: PathBuf,
    pub refresh_interval: Duration,
    pub session_ttl: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            interviews_csv: PathBuf::from(DEFAULT_INTERVIEWS_CSV),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRefreshInterval,
    InvalidSessionTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRefreshInterval => {
                write!(f, "PORTAL_REFRESH_SECS must be a positive number of seconds")
            }
            ConfigError::InvalidSessionTtl => {
                write!(f, "PORTAL_SESSION_TTL_SECS must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidRefreshInterval
            | ConfigError::InvalidSessionTtl => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("PORTAL_INTERVIEWS_CSV");
        env::remove_var("PORTAL_REFRESH_SECS");
        env::remove_var("PORTAL_SESSION_TTL_SECS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.portal.interviews_csv, PathBuf::from("interviews.csv"));
        assert_eq!(config.portal.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.portal.session_ttl, Duration::from_secs(1800));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn portal_settings_follow_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PORTAL_INTERVIEWS_CSV", "/srv/portal/interviews.csv");
        env::set_var("PORTAL_REFRESH_SECS", "15");
        env::set_var("PORTAL_SESSION_TTL_SECS", "600");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.portal.interviews_csv,
            PathBuf::from("/srv/portal/interviews.csv")
        );
        assert_eq!(config.portal.refresh_interval, Duration::from_secs(15));
        assert_eq!(config.portal.session_ttl, Duration::from_secs(600));
        reset_env();
    }

    #[test]
    fn rejects_zero_refresh_interval() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PORTAL_REFRESH_SECS", "0");
        let err = AppConfig::load().expect_err("zero interval rejected");
        assert!(matches!(err, ConfigError::InvalidRefreshInterval));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_session_ttl() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PORTAL_SESSION_TTL_SECS", "half an hour");
        let err = AppConfig::load().expect_err("ttl rejected");
        assert!(matches!(err, ConfigError::InvalidSessionTtl));
        reset_env();
    }
}

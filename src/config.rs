//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` (reachable from outside a container or VPS) |
//! | `PORT` | `8080` |
//! | `UPLOAD_DIR` | `uploads` |
//! | `SESSION_TTL_SECS` | `86400` |
//! | `ADMIN_USERNAME` | `admin` |
//! | `ADMIN_PASSWORD` | unset: no administrator is created |

use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    /// Sessions idle for longer than this are dropped.
    pub session_ttl: Duration,
    pub admin_username: String,
    pub admin_password: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 3600;

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upload_dir: PathBuf::from("uploads"),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            admin_username: "admin".to_string(),
            admin_password: None,
        }
    }
}

/// Parse a numeric variable; unset keeps the default, garbage keeps it too but warns.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring {}={:?}: not a valid number", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            session_ttl: Duration::from_secs(parse_var("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or(defaults.admin_username),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
        }
    }
}

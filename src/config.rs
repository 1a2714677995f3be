//! Server configuration from the environment.
//!
//! - `HOST` (default `0.0.0.0`) and `PORT` (default `8080`)
//! - `SESSION_SECRET`: at least 32 bytes; a random key is used otherwise,
//!   which signs everyone out on restart
//! - `WORKSPACE_IDLE_HOURS` (default 12): drop workspaces idle this long
//! - `AUTH_CALLBACK_SECRET`: shared with the identity provider's callback;
//!   sign-in is refused while it is unset

use actix_web::cookie::Key;
use std::time::Duration;

/// Smallest secret `Key::derive_from` accepts.
const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub session_secret: Option<String>,
    pub callback_secret: Option<String>,
    pub idle_timeout: Duration,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_idle_hours() -> u64 {
    12
}

fn idle_timeout(hours: u64) -> Duration {
    let secs = hours
        .checked_mul(3600)
        .unwrap_or_else(|| default_idle_hours() * 3600);
    Duration::from_secs(secs)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_secret: None,
            callback_secret: None,
            idle_timeout: idle_timeout(default_idle_hours()),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let idle_hours = lookup("WORKSPACE_IDLE_HOURS")
            .and_then(|h| h.parse().ok())
            .unwrap_or_else(default_idle_hours);
        Self {
            host,
            port,
            session_secret: lookup("SESSION_SECRET").filter(|s| !s.is_empty()),
            callback_secret: lookup("AUTH_CALLBACK_SECRET").filter(|s| !s.is_empty()),
            idle_timeout: idle_timeout(idle_hours),
        }
    }

    /// Cookie signing key for the session middleware.
    pub fn session_key(&self) -> Key {
        match self.session_secret.as_deref() {
            Some(secret) if secret.len() >= MIN_SECRET_LEN => Key::derive_from(secret.as_bytes()),
            Some(_) => {
                log::warn!(
                    "SESSION_SECRET shorter than {} bytes; using a random session key",
                    MIN_SECRET_LEN
                );
                Key::generate()
            }
            None => Key::generate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset_or_garbage() {
        let vars: HashMap<&str, &str> = [("PORT", "not-a-port")].into_iter().collect();
        let cfg = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.idle_timeout, Duration::from_secs(12 * 3600));
        assert!(cfg.session_secret.is_none());
        assert!(cfg.callback_secret.is_none());
    }

    #[test]
    fn huge_idle_hours_fall_back_to_default() {
        let huge = u64::MAX.to_string();
        let cfg = ServerConfig::from_lookup(|k| (k == "WORKSPACE_IDLE_HOURS").then(|| huge.clone()));
        assert_eq!(cfg.idle_timeout, Duration::from_secs(12 * 3600));
    }

    #[test]
    fn reads_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("WORKSPACE_IDLE_HOURS", "1"),
            ("SESSION_SECRET", "0123456789abcdef0123456789abcdef"),
            ("AUTH_CALLBACK_SECRET", "hook"),
        ]
        .into_iter()
        .collect();
        let cfg = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.idle_timeout, Duration::from_secs(3600));
        assert_eq!(cfg.callback_secret.as_deref(), Some("hook"));
        let _ = cfg.session_key();
    }
}

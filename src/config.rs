use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use thiserror::Error;

pub const DEFAULT_HOST: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Process-wide settings, read once at startup and passed down explicitly.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the hosted database service (e.g. `https://xyz.supabase.co`)
    pub supabase_url: String,
    /// Privileged key sent on every request to the REST facade
    pub service_role_key: String,
    /// When set, reads go to a local SQLite mirror instead of the hosted service
    pub local_database_url: Option<String>,
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let supabase_url = required("SUPABASE_URL")?.trim_end_matches('/').to_string();
        let service_role_key = required("SUPABASE_SERVICE_ROLE_KEY")?;

        let local_database_url = lookup("LOCAL_DATABASE_URL").filter(|v| !v.trim().is_empty());

        let host = match lookup("HOST") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "HOST", value })?,
            None => DEFAULT_HOST,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            supabase_url,
            service_role_key,
            local_database_url,
            host,
            port,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("supabase_url", &self.supabase_url)
            .field("service_role_key", &"<redacted>")
            .field("local_database_url", &self.local_database_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn requires_service_url() {
        let err = Config::from_lookup(lookup_from(&[("SUPABASE_SERVICE_ROLE_KEY", "k")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("SUPABASE_URL"));
    }

    #[test]
    fn requires_service_role_key() {
        let err = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://db.example.com"),
            ("SUPABASE_SERVICE_ROLE_KEY", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"));
    }

    #[test]
    fn applies_defaults_and_trims_url() {
        let config = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://db.example.com/"),
            ("SUPABASE_SERVICE_ROLE_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.supabase_url, "https://db.example.com");
        assert_eq!(config.local_database_url, None);
        assert_eq!(config.addr(), SocketAddr::from((DEFAULT_HOST, DEFAULT_PORT)));
    }

    #[test]
    fn rejects_bad_port() {
        let err = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://db.example.com"),
            ("SUPABASE_SERVICE_ROLE_KEY", "secret"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn debug_output_hides_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://db.example.com"),
            ("SUPABASE_SERVICE_ROLE_KEY", "super-secret-key"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-key"));
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
    }
}

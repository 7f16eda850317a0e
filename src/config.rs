use std::env;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Rest {
        url: String,
        key: String,
        timeout: Duration,
    },
    Sqlite {
        url: String,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    pub backend: Backend,
}

impl Settings {
    /// Reads settings from the process environment after loading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let kind = match get("STORE_BACKEND") {
            Some(kind) => kind.trim().to_ascii_lowercase(),
            None if get("STORE_URL").is_some() => "rest".to_string(),
            None if get("DATABASE_URL").is_some() => "sqlite".to_string(),
            None => return Err(ConfigError::Missing("STORE_URL")),
        };

        let backend = match kind.as_str() {
            "rest" => {
                let timeout = match get("STORE_TIMEOUT_SECS") {
                    Some(raw) => raw
                        .trim()
                        .parse()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .ok_or(ConfigError::Invalid {
                            key: "STORE_TIMEOUT_SECS",
                            value: raw,
                        })?,
                    None => DEFAULT_TIMEOUT_SECS,
                };
                Backend::Rest {
                    url: get("STORE_URL").ok_or(ConfigError::Missing("STORE_URL"))?,
                    key: get("STORE_KEY").ok_or(ConfigError::Missing("STORE_KEY"))?,
                    timeout: Duration::from_secs(timeout),
                }
            }
            "sqlite" => Backend::Sqlite {
                url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            "memory" => Backend::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: kind,
                });
            }
        };

        Ok(Settings { port, backend })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn store_url_selects_rest() {
        let s = settings(&[("STORE_URL", "https://x.example"), ("STORE_KEY", "k")]).unwrap();
        assert_eq!(s.port, 3000);
        assert_eq!(
            s.backend,
            Backend::Rest {
                url: "https://x.example".into(),
                key: "k".into(),
                timeout: Duration::from_secs(10),
            }
        );
    }

    #[test]
    fn rest_needs_key() {
        let err = settings(&[("STORE_URL", "https://x.example")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("STORE_KEY")));
        let err = settings(&[("STORE_URL", "https://x.example"), ("STORE_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("STORE_KEY")));
    }

    #[test]
    fn database_url_selects_sqlite() {
        let s = settings(&[("DATABASE_URL", "sqlite://classes.db"), ("PORT", "8080")]).unwrap();
        assert_eq!(s.port, 8080);
        assert_eq!(
            s.backend,
            Backend::Sqlite {
                url: "sqlite://classes.db".into()
            }
        );
    }

    #[test]
    fn explicit_backend_wins() {
        let s = settings(&[("STORE_BACKEND", "Memory"), ("STORE_URL", "https://x.example")]).unwrap();
        assert_eq!(s.backend, Backend::Memory);
    }

    #[test]
    fn nothing_configured_is_an_error() {
        assert!(matches!(settings(&[]), Err(ConfigError::Missing("STORE_URL"))));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            settings(&[("STORE_BACKEND", "mongo")]),
            Err(ConfigError::Invalid { key: "STORE_BACKEND", .. })
        ));
        assert!(matches!(
            settings(&[("STORE_BACKEND", "memory"), ("PORT", "http")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            settings(&[("STORE_URL", "u"), ("STORE_KEY", "k"), ("STORE_TIMEOUT_SECS", "0")]),
            Err(ConfigError::Invalid { key: "STORE_TIMEOUT_SECS", .. })
        ));
    }
}

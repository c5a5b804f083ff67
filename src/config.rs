use anyhow::{anyhow, bail, Context, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://board.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// The cookie signing key is derived from this; shorter secrets are refused.
const SECRET_KEY_MIN_LEN: usize = 32;

/// Runtime settings, read from the environment once at boot.
#[derive(Clone, Debug)]
pub struct BoardConfig {
    /// Shared board password. Plain text or an Argon2 PHC string.
    pub password: String,
    pub secret_key: String,
    pub database_url: String,
    pub bind_addr: String,
}

impl BoardConfig {
    /// Reads the process environment. Call `dotenv` beforehand to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let password = lookup("BOARD_PASSWORD")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow!("BOARD_PASSWORD must be set"))?;
        let secret_key = lookup("SECRET_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow!("SECRET_KEY must be set"))?;

        if secret_key.len() < SECRET_KEY_MIN_LEN {
            bail!(
                "SECRET_KEY must be at least {} bytes long, got {}",
                SECRET_KEY_MIN_LEN,
                secret_key.len()
            );
        }

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        bind_addr
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("BIND_ADDR {:?} is not a socket address", bind_addr))?;

        Ok(Self {
            password,
            secret_key,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn config_from(pairs: &[(&str, &str)]) -> Result<BoardConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BoardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[
            ("BOARD_PASSWORD", "hunter2"),
            ("SECRET_KEY", SECRET),
        ])
        .unwrap();

        assert_eq!(config.password, "hunter2");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_missing_values() {
        assert!(config_from(&[("SECRET_KEY", SECRET)]).is_err());
        assert!(config_from(&[("BOARD_PASSWORD", "hunter2")]).is_err());
        assert!(config_from(&[("BOARD_PASSWORD", ""), ("SECRET_KEY", SECRET)]).is_err());
    }

    #[test]
    fn test_short_secret() {
        let err = config_from(&[("BOARD_PASSWORD", "hunter2"), ("SECRET_KEY", "short")])
            .unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));
    }

    #[test]
    fn test_bad_bind_addr() {
        assert!(config_from(&[
            ("BOARD_PASSWORD", "hunter2"),
            ("SECRET_KEY", SECRET),
            ("BIND_ADDR", "nowhere"),
        ])
        .is_err());
    }
}

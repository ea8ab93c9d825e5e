use std::fmt;

pub const DEFAULT_MAX_SKIPS: u32 = 1;
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Runtime settings, read from the Lambda environment once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub games_table: String,
    pub users_table: String,
    pub invites_table: String,
    pub jwt_secret: String,
    pub max_skips: u32,
    pub token_ttl_hours: i64,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} environment variable must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let max_skips = match lookup("MAX_SKIPS_PER_PARTICIPANT") {
            Some(value) => value.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
                key: "MAX_SKIPS_PER_PARTICIPANT",
                value,
            })?,
            None => DEFAULT_MAX_SKIPS,
        };

        let token_ttl_hours = match lookup("TOKEN_TTL_HOURS") {
            Some(value) => match value.trim().parse::<i64>() {
                Ok(hours) if hours > 0 => hours,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "TOKEN_TTL_HOURS",
                        value,
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        Ok(AppConfig {
            games_table: required("GAMES_TABLE")?,
            users_table: required("USERS_TABLE")?,
            invites_table: required("INVITES_TABLE")?,
            jwt_secret: required("JWT_SECRET")?,
            max_skips,
            token_ttl_hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const BASE: [(&str, &str); 4] = [
        ("GAMES_TABLE", "games"),
        ("USERS_TABLE", "users"),
        ("INVITES_TABLE", "invites"),
        ("JWT_SECRET", "secret"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&BASE)).unwrap();

        assert_eq!(config.games_table, "games");
        assert_eq!(config.users_table, "users");
        assert_eq!(config.invites_table, "invites");
        assert_eq!(config.max_skips, DEFAULT_MAX_SKIPS);
        assert_eq!(config.token_ttl_hours, DEFAULT_TOKEN_TTL_HOURS);
    }

    #[test]
    fn test_missing_required_value() {
        let result = AppConfig::from_lookup(lookup_from(&BASE[..3]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));

        let without_invites: Vec<_> = BASE
            .iter()
            .copied()
            .filter(|(key, _)| *key != "INVITES_TABLE")
            .collect();
        let result = AppConfig::from_lookup(lookup_from(&without_invites));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("INVITES_TABLE"));
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let mut pairs = BASE.to_vec();
        pairs.push(("MAX_SKIPS_PER_PARTICIPANT", "2"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.max_skips, 2);

        let mut pairs = BASE.to_vec();
        pairs.push(("TOKEN_TTL_HOURS", "-3"));
        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TOKEN_TTL_HOURS", .. }));
    }
}

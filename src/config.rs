use crate::theme::{DEFAULT_TRANSITION, Theme};
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/history.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub transition: Duration,
    pub default_theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            transition: DEFAULT_TRANSITION,
            default_theme: Theme::None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `lookup`, keeping defaults for missing or invalid
    /// values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            transition: parsed(&lookup, "THEME_TRANSITION_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.transition),
            default_theme: parsed(&lookup, "DEFAULT_THEME").unwrap_or(defaults.default_theme),
        }
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("ignoring {key}={raw:?}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/history.json"));
        assert_eq!(config.transition, Duration::from_millis(700));
        assert_eq!(config.default_theme, Theme::None);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("PORT", "9090"),
            ("APP_DATA_PATH", "/tmp/moods.json"),
            ("THEME_TRANSITION_MS", "250"),
            ("DEFAULT_THEME", "calm"),
        ]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.data_path, PathBuf::from("/tmp/moods.json"));
        assert_eq!(config.transition, Duration::from_millis(250));
        assert_eq!(config.default_theme, Theme::Calm);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config(&[("PORT", "eighty"), ("DEFAULT_THEME", "sepia")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_theme, Theme::None);
    }
}

use crate::chart::AlignPolicy;
use std::{env, net::SocketAddr, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/dataset.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub week_policy: AlignPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().unwrap_or_else(|_| {
                warn!("ignoring invalid PORT '{value}', using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let week_policy = match lookup("CHART_WEEK_POLICY") {
            Some(value) => value.parse().unwrap_or_else(|err| {
                warn!("{err}, using {}", AlignPolicy::default());
                AlignPolicy::default()
            }),
            None => AlignPolicy::default(),
        };

        Self {
            port,
            data_path,
            week_policy,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/dataset.json"));
        assert_eq!(config.week_policy, AlignPolicy::Sparse);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "9191"),
            ("APP_DATA_PATH", "/tmp/gest.json"),
            ("CHART_WEEK_POLICY", "frame"),
        ]);
        assert_eq!(config.port, 9191);
        assert_eq!(config.data_path, PathBuf::from("/tmp/gest.json"));
        assert_eq!(config.week_policy, AlignPolicy::WeekFrame);
        assert_eq!(config.addr().port(), 9191);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[("PORT", "http"), ("CHART_WEEK_POLICY", "dense")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.week_policy, AlignPolicy::Sparse);
    }
}

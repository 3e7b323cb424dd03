use crate::poller::POLL_PERIOD;
use std::{env, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";
pub const DEFAULT_STORE_PATH: &str = "data/storage.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub store_path: PathBuf,
    pub poll_period: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let endpoint = lookup("SURVEY_ENDPOINT").unwrap_or_else(|| {
            info!("SURVEY_ENDPOINT not set, using default: {DEFAULT_ENDPOINT}");
            DEFAULT_ENDPOINT.to_string()
        });
        let store_path = lookup("SURVEY_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
        let poll_period = lookup("SURVEY_POLL_SECS")
            .map(|raw| parse_period(&raw))
            .unwrap_or(POLL_PERIOD);

        Self {
            endpoint,
            store_path,
            poll_period,
        }
    }
}

fn parse_period(raw: &str) -> Duration {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        Ok(_) => {
            warn!("SURVEY_POLL_SECS must be positive, using default");
            POLL_PERIOD
        }
        Err(err) => {
            warn!("invalid SURVEY_POLL_SECS value {raw:?}: {err}");
            POLL_PERIOD
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(config.poll_period, Duration::from_secs(60));
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("SURVEY_ENDPOINT", "http://survey.local:8080"),
            ("SURVEY_STORE_PATH", "/tmp/survey.json"),
            ("SURVEY_POLL_SECS", "5"),
        ]);
        assert_eq!(config.endpoint, "http://survey.local:8080");
        assert_eq!(config.store_path, PathBuf::from("/tmp/survey.json"));
        assert_eq!(config.poll_period, Duration::from_secs(5));
    }

    #[test]
    fn bad_poll_period_falls_back() {
        assert_eq!(config(&[("SURVEY_POLL_SECS", "0")]).poll_period, POLL_PERIOD);
        assert_eq!(config(&[("SURVEY_POLL_SECS", "soon")]).poll_period, POLL_PERIOD);
    }
}

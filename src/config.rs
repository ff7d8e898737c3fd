// Runtime settings, read from the environment once at startup.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const LOG_FILTER_VAR: &str = "TASKDESK_LOG";
pub const LOG_DIR_VAR: &str = "TASKDESK_LOG_DIR";
pub const TICK_MS_VAR: &str = "TASKDESK_TICK_MS";

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_TICK_MS: u64 = 250;
const MIN_TICK_MS: u64 = 16;
const MAX_TICK_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_filter: String,
    // `None` when no directory could be resolved; logging is then off.
    pub log_dir: Option<PathBuf>,
    pub tick_rate: Duration,
    // Problems found while reading the environment, logged once logging is up.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_dir: default_log_dir(),
            tick_rate: Duration::from_millis(DEFAULT_TICK_MS),
            warnings: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Builds a config from any key lookup. Bad values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter.trim().to_string();
        }

        if let Some(dir) = lookup(LOG_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_dir = Some(PathBuf::from(dir.trim()));
        }

        if let Some(raw) = lookup(TICK_MS_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => {
                    let clamped = ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
                    if clamped != ms {
                        config.warnings.push(format!(
                            "{TICK_MS_VAR}={ms} out of range, using {clamped}"
                        ));
                    }
                    config.tick_rate = Duration::from_millis(clamped);
                }
                Err(_) => config.warnings.push(format!(
                    "{TICK_MS_VAR}={raw:?} is not a number, using {DEFAULT_TICK_MS}"
                )),
            }
        }

        config
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join("taskdesk.log"))
    }
}

fn default_log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("taskdesk"))
}

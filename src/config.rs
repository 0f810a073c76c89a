use std::env;
use std::path::PathBuf;
use std::time::Duration;

use simplelog::LevelFilter;

const TICK_RATE: Duration = Duration::from_millis(100);
const LOG_FILE: &str = "snake.log";
const LOG_LEVEL_VAR: &str = "SNAKE_LOG";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub tick_rate: Duration,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tick_rate: TICK_RATE,
            log_file: PathBuf::from(LOG_FILE),
            log_level: LevelFilter::Info,
        }
    }
}

impl Settings {
    /// Defaults, with the log level taken from `SNAKE_LOG` when set.
    pub fn from_env() -> Self {
        Settings {
            log_level: parse_level(env::var(LOG_LEVEL_VAR).ok().as_deref()),
            ..Settings::default()
        }
    }
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

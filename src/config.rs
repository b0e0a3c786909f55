use std::env;

use chrono::Duration;

pub const MAX_ALERT_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub alert_window_days: i64,
    pub max_upload_bytes: usize,
    pub attendance_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_address: "0.0.0.0:8000".to_string(),
            alert_window_days: 7,
            max_upload_bytes: 10 * 1024 * 1024,
            attendance_threshold: 75.0,
        }
    }
}

impl Config {
    // Reads the environment; call dotenv() first so .env values are visible.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Config {
            server_address: lookup("SERVER_ADDRESS").unwrap_or(defaults.server_address),
            alert_window_days: parse_var(&lookup, "ALERT_WINDOW_DAYS", defaults.alert_window_days, |days| {
                (0..=MAX_ALERT_WINDOW_DAYS).contains(days)
            })?,
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes, |bytes| {
                *bytes > 0
            })?,
            attendance_threshold: parse_var(
                &lookup,
                "ATTENDANCE_THRESHOLD",
                defaults.attendance_threshold,
                |pct| pct.is_finite() && (0.0..=100.0).contains(pct),
            )?,
        })
    }

    pub fn alert_window(&self) -> Duration {
        Duration::days(self.alert_window_days)
    }
}

// Values that parse but fail `valid` are rejected the same way as garbage.
fn parse_var<F, T, V>(lookup: &F, key: &'static str, default: T, valid: V) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    V: Fn(&T) -> bool,
{
    match lookup(key) {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) if valid(&parsed) => Ok(parsed),
            _ => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(default),
    }
}

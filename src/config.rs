use std::env;

const DEFAULT_SAMPLE_PERIOD_SECS: u64 = 60;
const DEFAULT_HISTORY_WINDOW_HOURS: u64 = 24;
const DEFAULT_TABLE_LIMIT: usize = 10;
const DEFAULT_ROLLING_WINDOW: usize = 100;
const DEFAULT_SUMMARY_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub sample_period_secs: u64,
    pub history_window_hours: u64,
    pub table_limit: usize,
    pub rolling_window: usize,
    pub summary_interval_secs: u64,
}

impl MonitorConfig {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = MonitorConfig {
            sample_period_secs: parse_var(&lookup, "SAMPLE_PERIOD_SECS", DEFAULT_SAMPLE_PERIOD_SECS)?,
            history_window_hours: parse_var(
                &lookup,
                "HISTORY_WINDOW_HOURS",
                DEFAULT_HISTORY_WINDOW_HOURS,
            )?,
            table_limit: parse_var(&lookup, "TABLE_LIMIT", DEFAULT_TABLE_LIMIT)?,
            rolling_window: parse_var(&lookup, "ROLLING_WINDOW", DEFAULT_ROLLING_WINDOW)?,
            summary_interval_secs: parse_var(
                &lookup,
                "SUMMARY_INTERVAL_SECS",
                DEFAULT_SUMMARY_INTERVAL_SECS,
            )?,
        };

        match config.checked_capacity() {
            None => return Err("HISTORY_WINDOW_HOURS is too large".into()),
            Some(0) => {
                return Err("HISTORY_WINDOW_HOURS is shorter than one SAMPLE_PERIOD_SECS".into())
            }
            Some(_) => {}
        }

        Ok(config)
    }

    /// Readings kept in history: the configured window at the raw sample period
    pub fn history_capacity(&self) -> usize {
        self.checked_capacity().unwrap_or(usize::MAX)
    }

    fn checked_capacity(&self) -> Option<usize> {
        let window_secs = self.history_window_hours.checked_mul(3600)?;
        let readings = window_secs.checked_div(self.sample_period_secs)?;
        usize::try_from(readings).ok()
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialEq + Default,
{
    let value = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a positive integer, got '{}'", key, raw))?,
        None => return Ok(default),
    };

    if value == T::default() {
        return Err(format!("{} must be greater than zero", key).into());
    }

    Ok(value)
}

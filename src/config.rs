use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Runtime settings for the tracking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Seconds between progression sweeps.
    pub sweep_interval_secs: u64,
    /// Flat fee added to every order.
    pub service_fee: Decimal,
    /// Quoted when a menu item has no profile.
    pub default_prep_minutes: u32,
    /// Channel capacity of each resource actor.
    pub actor_buffer: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 30,
            service_fee: Decimal::new(150, 2),
            default_prep_minutes: 10,
            actor_buffer: 32,
        }
    }
}

impl TrackerConfig {
    /// Reads overrides from the environment.
    ///
    /// Unset values keep their default; values that do not parse or are out of range are
    /// logged and replaced by the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TrackerConfig::from_env`], reading from `lookup` instead of the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            sweep_interval_secs: setting(
                &lookup,
                "TRACKER_SWEEP_INTERVAL_SECS",
                defaults.sweep_interval_secs,
                |secs: &u64| *secs > 0,
            ),
            service_fee: setting(
                &lookup,
                "TRACKER_SERVICE_FEE",
                defaults.service_fee,
                |fee: &Decimal| !fee.is_sign_negative(),
            ),
            default_prep_minutes: setting(
                &lookup,
                "TRACKER_DEFAULT_PREP_MINUTES",
                defaults.default_prep_minutes,
                |_: &u32| true,
            ),
            actor_buffer: setting(
                &lookup,
                "TRACKER_ACTOR_BUFFER",
                defaults.actor_buffer,
                |size: &usize| *size > 0,
            ),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn setting<T: FromStr + Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            warn!(key, value = %raw, %default, "Invalid setting, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.sweep_interval(), Duration::from_secs(30));
        assert_eq!(config.service_fee.to_string(), "1.50");
        assert_eq!(config.default_prep_minutes, 10);
    }

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = TrackerConfig::from_lookup(lookup(&[
            ("TRACKER_SWEEP_INTERVAL_SECS", "5"),
            ("TRACKER_SERVICE_FEE", "0.75"),
            ("TRACKER_DEFAULT_PREP_MINUTES", " 12 "),
            ("TRACKER_ACTOR_BUFFER", "64"),
        ]));
        assert_eq!(config.sweep_interval(), Duration::from_secs(5));
        assert_eq!(config.service_fee, Decimal::new(75, 2));
        assert_eq!(config.default_prep_minutes, 12);
        assert_eq!(config.actor_buffer, 64);
    }

    #[test]
    fn test_from_lookup_falls_back_on_invalid_values() {
        let config = TrackerConfig::from_lookup(lookup(&[
            ("TRACKER_SWEEP_INTERVAL_SECS", "0"),
            ("TRACKER_SERVICE_FEE", "-1"),
            ("TRACKER_DEFAULT_PREP_MINUTES", "ten"),
            ("TRACKER_ACTOR_BUFFER", "0"),
        ]));
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_from_lookup_without_overrides_is_default() {
        assert_eq!(TrackerConfig::from_lookup(|_| None), TrackerConfig::default());
    }
}

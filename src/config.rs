use std::env;
use std::str::FromStr;

use crate::utils::fare::SURGE_ALERT_THRESHOLD;

/// Default sizes of a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub drivers: u32,
    pub riders: u32,
    pub rides: u32,
    pub zones: u32,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            drivers: 12,
            riders: 12,
            rides: 15,
            zones: 12,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Applied to connecting, pool acquisition and liveness checks.
    pub db_timeout_secs: u64,
    pub seed_on_empty: bool,
    pub seed_counts: SeedCounts,
    pub seed_rng: Option<u64>,
    pub surge_alert_threshold: f64,
}

fn var_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = SeedCounts::default();

        Self {
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: var_or("SERVER_PORT", 3000),
            db_timeout_secs: var_or("DB_TIMEOUT_SECS", 3),
            seed_on_empty: var_or("SEED_ON_EMPTY", true),
            seed_counts: SeedCounts {
                drivers: var_or("SEED_DRIVERS", defaults.drivers),
                riders: var_or("SEED_RIDERS", defaults.riders),
                rides: var_or("SEED_RIDES", defaults.rides),
                zones: var_or("SEED_ZONES", defaults.zones),
            },
            seed_rng: env::var("SEED_RNG")
                .ok()
                .map(|raw| raw.parse().expect("SEED_RNG must be a number")),
            surge_alert_threshold: var_or("SURGE_ALERT_THRESHOLD", SURGE_ALERT_THRESHOLD),
        }
    }

    /// Configuration for a given storage URL with every other setting at its
    /// default. Used by tests and tooling that do not read the environment.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            db_timeout_secs: 3,
            seed_on_empty: false,
            seed_counts: SeedCounts::default(),
            seed_rng: None,
            surge_alert_threshold: SURGE_ALERT_THRESHOLD,
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

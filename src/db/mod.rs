use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Idle and lifetime limits for the single in-memory connection. Recycling it
/// would open a new, empty database.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

pub fn connect_options(config: &Config) -> ConnectOptions {
    let timeout = Duration::from_secs(config.db_timeout_secs);

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(false);

    // Every pooled connection to an in-memory SQLite database would get its own
    // empty database.
    if config.database_url.contains(":memory:") {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(MEMORY_CONNECTION_LIFETIME)
            .max_lifetime(MEMORY_CONNECTION_LIFETIME);
    }

    options
}

pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    Database::connect(connect_options(config))
        .await
        .map_err(|e| AppError::Connectivity(format!("Failed to connect to database: {}", e)))
}

/// Liveness check bounded by the configured timeout.
pub async fn ping(db: &DatabaseConnection, timeout_secs: u64) -> AppResult<()> {
    match tokio::time::timeout(Duration::from_secs(timeout_secs), db.ping()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::Connectivity(format!("Ping failed: {}", e))),
        Err(_) => Err(AppError::Connectivity(format!(
            "Ping timed out after {}s",
            timeout_secs
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_database_keeps_its_connection() {
        let options = connect_options(&Config::for_database("sqlite::memory:"));

        assert_eq!(options.get_max_connections(), Some(1));
        assert_eq!(options.get_min_connections(), Some(1));
        assert!(options.get_idle_timeout().is_some());
        assert!(options.get_max_lifetime().is_some());
    }

    #[test]
    fn test_server_database_uses_pool_defaults() {
        let options = connect_options(&Config::for_database("postgres://localhost/rides"));

        assert_eq!(options.get_max_connections(), None);
        assert!(options.get_max_lifetime().is_none());
        assert_eq!(options.get_connect_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(options.get_acquire_timeout(), Some(Duration::from_secs(3)));
    }
}

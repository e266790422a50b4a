use core_config::{AppInfo, FromEnv, app_info, env_or_default, env_parse_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Prefix for every href in HAL responses; empty yields relative links
    pub public_base_url: String,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let public_base_url = env_or_default("PUBLIC_BASE_URL", "");
        let run_migrations = env_parse_or_default("RUN_MIGRATIONS", "true")?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            public_base_url,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/events")),
                ("PUBLIC_BASE_URL", None),
                ("RUN_MIGRATIONS", None),
                ("PORT", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "events_api");
                assert_eq!(config.database.url(), "postgres://localhost/events");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.environment, Environment::Development);
                assert!(config.public_base_url.is_empty());
                assert!(config.run_migrations);
            },
        );
    }

    #[test]
    fn test_from_env_overrides() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://db/events")),
                ("PUBLIC_BASE_URL", Some("https://events.example.com")),
                ("RUN_MIGRATIONS", Some("false")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.public_base_url, "https://events.example.com");
                assert!(!config.run_migrations);
                assert!(config.environment.is_production());
            },
        );
    }

    #[test]
    fn test_from_env_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_from_env_rejects_bad_flag() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://db/events")),
                ("RUN_MIGRATIONS", Some("sometimes")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}

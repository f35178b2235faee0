use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("mongodb://localhost:27017")),
                ("DATABASE_NAME", Some("shop")),
                ("PORT", None),
                ("HOST", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 8000);
                assert_eq!(config.mongodb.database(), "shop");
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.app.name, "storefront_api");
            },
        );
    }

    #[test]
    fn test_config_from_env_requires_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", None::<&str>),
                ("MONGODB_URL", None),
                ("DATABASE_NAME", Some("shop")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("DATABASE_URL"));
            },
        );
    }

    #[test]
    fn test_config_from_env_rejects_bad_port() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("mongodb://localhost:27017")),
                ("DATABASE_NAME", Some("shop")),
                ("PORT", Some("eighty")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}

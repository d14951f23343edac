//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::{DatabaseConfig, JwtConfig};

/// Where uploaded images are written and how they are addressed.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub root: String,
    pub public_prefix: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs against a private in-memory SQLite database.
    pub database: Option<DatabaseConfig>,
    pub images: ImageConfig,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };

        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 100),
            min_connections: parsed("DB_MIN_CONNECTIONS", 10),
        });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            images: ImageConfig {
                root: lookup("IMAGE_ROOT").unwrap_or_else(|| "wwwroot/images".to_string()),
                public_prefix: lookup("IMAGE_PUBLIC_PREFIX")
                    .unwrap_or_else(|| "/images".to_string()),
            },
            jwt: JwtConfig::from_lookup(&lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.images.root, "wwwroot/images");
        assert_eq!(config.images.public_prefix, "/images");
        assert_eq!(config.jwt.issuer, "blog-api");
        assert_eq!(config.jwt.expiration_hours, 24);
    }

    #[test]
    fn test_database_settings() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://blog@localhost/blog"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("DB_MIN_CONNECTIONS", "not-a-number"),
        ]);

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://blog@localhost/blog");
        assert_eq!(database.max_connections, 20);
        assert_eq!(database.min_connections, 10);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("IMAGE_ROOT", "/srv/images"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_ISSUER", "blog-test"),
        ]);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.images.root, "/srv/images");
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.jwt.issuer, "blog-test");
    }
}

//! Environment configuration
//!
//! Reads the service settings from process environment variables. `.env`
//! files are loaded by `main` through `dotenvy` before this runs.

use std::env;
use std::str::FromStr;

use super::ConfigError;

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    /// Lifetime of the `access_token` cookie in seconds.
    pub cookie_max_age: i64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub run_migrations: bool,
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_or("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?,
            jwt_expiration: parse_or("JWT_EXPIRATION", 1800)?,
            cookie_max_age: parse_or("COOKIE_MAX_AGE", 86_400)?,
            bcrypt_cost: parse_or("BCRYPT_COST", 10)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or_default(),
            run_migrations: parse_or("RUN_MIGRATIONS", true)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_cors_origins() {
        let origins = split_origins(" http://localhost:5173 , https://fleet.example.com,, ");
        assert_eq!(
            origins,
            vec!["http://localhost:5173", "https://fleet.example.com"]
        );
    }

    #[test]
    fn rejects_unparseable_numbers() {
        env::set_var("FLEET_TEST_BAD_PORT", "eighty");
        let result: Result<u16, _> = parse_or("FLEET_TEST_BAD_PORT", 3000);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        env::remove_var("FLEET_TEST_BAD_PORT");
    }

    #[test]
    fn falls_back_to_default_when_unset() {
        let value: u64 = parse_or("FLEET_TEST_UNSET_VALUE", 1800).unwrap();
        assert_eq!(value, 1800);
    }
}

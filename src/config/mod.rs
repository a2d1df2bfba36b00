use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub rate_limit_capacity: f64,
    pub rate_limit_refill_per_sec: f64,
    pub rate_limit_idle_secs: u64,
    /// Whether `X-Forwarded-For` identifies the rate-limit client. Only safe
    /// behind a proxy that strips the inbound header; when false the peer
    /// address is used and the header is ignored.
    pub trust_forwarded_for: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_ttl_secs: i64,
    pub session_cookie: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("API_RATE_LIMIT_CAPACITY") {
            self.api.rate_limit_capacity = v.parse().unwrap_or(self.api.rate_limit_capacity);
        }
        if let Ok(v) = env::var("API_RATE_LIMIT_REFILL_PER_SEC") {
            self.api.rate_limit_refill_per_sec = v.parse().unwrap_or(self.api.rate_limit_refill_per_sec);
        }
        if let Ok(v) = env::var("API_RATE_LIMIT_IDLE_SECS") {
            self.api.rate_limit_idle_secs = v.parse().unwrap_or(self.api.rate_limit_idle_secs);
        }
        if let Ok(v) = env::var("API_TRUST_FORWARDED_FOR") {
            self.api.trust_forwarded_for = v.parse().unwrap_or(self.api.trust_forwarded_for);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_ISSUER") {
            self.security.jwt_issuer = v;
        }
        if let Ok(v) = env::var("JWT_TTL_SECS") {
            self.security.jwt_ttl_secs = v.parse().unwrap_or(self.security.jwt_ttl_secs);
        }

        self
    }

    fn base_security() -> SecurityConfig {
        SecurityConfig {
            // Always overridden by JWT_SECRET in any real deployment
            jwt_secret: "dev-secret-change-me".to_string(),
            jwt_issuer: "fintrack-api".to_string(),
            jwt_ttl_secs: 4 * 3600,
            session_cookie: "session".to_string(),
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            api: ApiConfig {
                rate_limit_capacity: 1000.0,
                rate_limit_refill_per_sec: 100.0,
                rate_limit_idle_secs: 600,
                trust_forwarded_for: true,
            },
            security: SecurityConfig {
                jwt_ttl_secs: 24 * 7 * 3600, // 1 week
                ..Self::base_security()
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            api: ApiConfig {
                rate_limit_capacity: 100.0,
                rate_limit_refill_per_sec: 5.0,
                rate_limit_idle_secs: 600,
                trust_forwarded_for: true,
            },
            security: SecurityConfig {
                jwt_ttl_secs: 24 * 3600,
                ..Self::base_security()
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            api: ApiConfig {
                rate_limit_capacity: 60.0,
                rate_limit_refill_per_sec: 1.0,
                rate_limit_idle_secs: 600,
                // Off until a deployment explicitly opts in via
                // API_TRUST_FORWARDED_FOR; a spoofed header must not mint
                // fresh rate-limit buckets
                trust_forwarded_for: false,
            },
            security: Self::base_security(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.rate_limit_capacity, 1000.0);
        assert_eq!(config.security.jwt_ttl_secs, 24 * 7 * 3600);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.api.rate_limit_capacity, 60.0);
        assert_eq!(config.api.rate_limit_idle_secs, 600);
        assert_eq!(config.security.jwt_ttl_secs, 4 * 3600);
        assert!(!config.api.trust_forwarded_for);
    }
}

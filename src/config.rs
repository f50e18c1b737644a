//! Runtime configuration, loaded from environment variables (optionally via
//! a `.env` file).

use crate::core_types::EpochSecond;

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Complete runtime configuration for the `orders_manager` service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub app_port: u16,

    /// Settlement connection details. All four are optional at the
    /// `AppConfig` level: when unset, the service falls back to a
    /// logging-only settlement executor rather than refusing to start. A
    /// chain-backed executor should call [`AppConfig::require_settlement_vars`]
    /// at construction time instead of unwrapping these directly, so a
    /// missing var fails fast with a clear message.
    pub db_uri: Option<String>,
    pub provider: Option<String>,
    pub private_key: Option<String>,
    pub chain_id: Option<u64>,

    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,

    /// How often the matching/settlement driver loop ticks.
    pub driver_interval_secs: EpochSecond,
}

impl AppConfig {
    /// Loads configuration from the process environment, first loading a
    /// `.env` file in the current directory if one is present (silently
    /// ignored if absent - this is a convenience for local runs, not a
    /// requirement).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            app_name: env_string("APP_NAME", "orders-manager"),
            app_port: env_u16("APP_PORT", 8002),

            db_uri: std::env::var("DB_URI").ok(),
            provider: std::env::var("PROVIDER").ok(),
            private_key: std::env::var("PRIVATE_KEY").ok(),
            chain_id: std::env::var("CHAIN_ID").ok().and_then(|v| v.parse().ok()),

            log_level: env_string("LOG_LEVEL", "info"),
            log_dir: env_string("LOG_DIR", "logs"),
            log_file: env_string("LOG_FILE", "orders-manager.log"),
            use_json: env_string("LOG_JSON", "false") == "true",
            rotation: env_string("LOG_ROTATION", "daily"),
            enable_tracing: env_string("LOG_TRACING", "true") == "true",

            driver_interval_secs: env_u64("DRIVER_INTERVAL_SECS", 10) as EpochSecond,
        }
    }

    /// Checks that every variable a chain-backed store/settlement executor
    /// would need is present, returning all missing names at once rather
    /// than failing on the first. A deployment that only ever uses the
    /// bundled in-memory store and logging executor never needs to call
    /// this; it exists so a real implementation fails fast at startup
    /// instead of panicking the first time a request needs a chain call.
    pub fn require_settlement_vars(&self) -> Result<(), MissingConfigError> {
        let mut missing = Vec::new();
        if self.db_uri.is_none() {
            missing.push("DB_URI");
        }
        if self.provider.is_none() {
            missing.push("PROVIDER");
        }
        if self.private_key.is_none() {
            missing.push("PRIVATE_KEY");
        }
        if self.chain_id.is_none() {
            missing.push("CHAIN_ID");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingConfigError {
                missing: missing.into_iter().map(str::to_string).collect(),
            })
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("missing required configuration: {}", missing.join(", "))]
pub struct MissingConfigError {
    pub missing: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_unset() {
        // SAFETY: test-only, and these keys are not used by any other test
        // running in this process.
        unsafe {
            std::env::remove_var("APP_PORT");
            std::env::remove_var("APP_NAME");
        }
        let config = AppConfig::from_env();
        assert_eq!(config.app_port, 8002);
        assert_eq!(config.app_name, "orders-manager");
    }

    #[test]
    fn missing_settlement_vars_surface_as_a_clear_error() {
        unsafe {
            std::env::remove_var("DB_URI");
            std::env::remove_var("PROVIDER");
            std::env::remove_var("PRIVATE_KEY");
            std::env::remove_var("CHAIN_ID");
        }
        let config = AppConfig::from_env();
        let err = config.require_settlement_vars().unwrap_err();
        assert!(err.missing.contains(&"DB_URI".to_string()));
        assert!(err.missing.contains(&"PROVIDER".to_string()));
        assert!(err.missing.contains(&"PRIVATE_KEY".to_string()));
        assert!(err.missing.contains(&"CHAIN_ID".to_string()));
    }

    #[test]
    fn present_settlement_vars_pass() {
        // SAFETY: test-only; these vars aren't read by any concurrently
        // running test in this process.
        unsafe {
            std::env::set_var("DB_URI", "postgres://localhost/test");
            std::env::set_var("PROVIDER", "http://localhost:8545");
            std::env::set_var("PRIVATE_KEY", "deadbeef");
            std::env::set_var("CHAIN_ID", "1");
        }
        let config = AppConfig::from_env();
        assert!(config.require_settlement_vars().is_ok());
        unsafe {
            std::env::remove_var("DB_URI");
            std::env::remove_var("PROVIDER");
            std::env::remove_var("PRIVATE_KEY");
            std::env::remove_var("CHAIN_ID");
        }
    }
}

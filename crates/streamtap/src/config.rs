use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// Service configuration loaded from `STREAMTAP_*` environment variables
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    // Streaming endpoint configuration
    /// Host of the streaming endpoint, e.g. "stream.example.com" (required)
    pub stream_host: String,

    /// Access key appended to the stream URL (required, never logged)
    pub access_key: String,

    // MongoDB configuration
    /// MongoDB connection string (required, never logged)
    pub mongo_url: String,

    /// Database holding ingested events
    #[serde(default = "default_mongo_database")]
    pub mongo_database: String,

    /// Collection holding ingested events
    #[serde(default = "default_mongo_collection")]
    pub mongo_collection: String,

    // Runtime configuration
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How long to wait for the ingestion loop after sending a close frame, in seconds
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

// Mongo defaults
fn default_mongo_database() -> String {
    "bigdata".to_string()
}

fn default_mongo_collection() -> String {
    "posts".to_string()
}

// Runtime defaults
fn default_log_level() -> String {
    "info".to_string()
}

fn default_shutdown_grace_secs() -> u64 {
    1
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("STREAMTAP"))
            .build()?
            .try_deserialize()
    }
}

/// Printed alongside configuration errors so operators know what to set
pub const USAGE: &str = "\
Required environment:
  STREAMTAP_STREAM_HOST  host of the streaming endpoint
  STREAMTAP_ACCESS_KEY   access key for the streaming endpoint
  STREAMTAP_MONGO_URL    MongoDB connection string

Optional environment:
  STREAMTAP_MONGO_DATABASE       event database (default: bigdata)
  STREAMTAP_MONGO_COLLECTION     event collection (default: posts)
  STREAMTAP_LOG_LEVEL            log level (default: info)
  STREAMTAP_SHUTDOWN_GRACE_SECS  close handshake grace period (default: 1)";

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure tests run serially and don't interfere with each other
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    fn set_required_vars() {
        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::set_var("STREAMTAP_STREAM_HOST", "stream.example.com");
            std::env::set_var("STREAMTAP_ACCESS_KEY", "test-key");
            std::env::set_var("STREAMTAP_MONGO_URL", "mongodb://localhost:27017");
        }
    }

    fn clear_vars() {
        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::remove_var("STREAMTAP_STREAM_HOST");
            std::env::remove_var("STREAMTAP_ACCESS_KEY");
            std::env::remove_var("STREAMTAP_MONGO_URL");
            std::env::remove_var("STREAMTAP_MONGO_DATABASE");
            std::env::remove_var("STREAMTAP_MONGO_COLLECTION");
            std::env::remove_var("STREAMTAP_LOG_LEVEL");
            std::env::remove_var("STREAMTAP_SHUTDOWN_GRACE_SECS");
        }
    }

    #[test]
    fn test_from_env_fails_without_required_values() {
        let _lock = TEST_LOCK.lock().unwrap();
        clear_vars();

        let result = ServiceConfig::from_env();

        assert!(result.is_err());
    }

    #[test]
    fn test_from_env_applies_defaults() {
        let _lock = TEST_LOCK.lock().unwrap();
        clear_vars();
        set_required_vars();

        let config = ServiceConfig::from_env().unwrap();

        assert_eq!(config.stream_host, "stream.example.com");
        assert_eq!(config.access_key, "test-key");
        assert_eq!(config.mongo_url, "mongodb://localhost:27017");
        assert_eq!(config.mongo_database, "bigdata");
        assert_eq!(config.mongo_collection, "posts");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.shutdown_grace_secs, 1);

        clear_vars();
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let _lock = TEST_LOCK.lock().unwrap();
        clear_vars();
        set_required_vars();
        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::set_var("STREAMTAP_MONGO_DATABASE", "firehose");
            std::env::set_var("STREAMTAP_LOG_LEVEL", "debug");
            std::env::set_var("STREAMTAP_SHUTDOWN_GRACE_SECS", "5");
        }

        let config = ServiceConfig::from_env().unwrap();

        assert_eq!(config.mongo_database, "firehose");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.shutdown_grace_secs, 5);

        clear_vars();
    }
}

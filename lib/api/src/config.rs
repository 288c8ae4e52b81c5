use dagcheck_core::{CycleChecker, Error, Result};

/// Origins the pipeline editor is served from during local development
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
];

/// Runtime settings for the REST server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub checker: CycleChecker,
    /// Maximum accepted JSON body size in bytes
    pub max_payload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            checker: CycleChecker::default(),
            max_payload_bytes: 2 * 1024 * 1024,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<()> {
        if self.allowed_origins.is_empty() {
            return Err(Error::InvalidConfig("at least one allowed origin is required".into()));
        }
        if let Some(origin) = self.allowed_origins.iter().find(|o| o.trim() == "*") {
            return Err(Error::InvalidConfig(format!(
                "wildcard origin '{}' cannot be combined with credentials",
                origin
            )));
        }
        let limits = self.checker.limits();
        if limits.max_nodes == 0 || limits.max_edges == 0 {
            return Err(Error::InvalidConfig("node and edge limits must be positive".into()));
        }
        if self.max_payload_bytes == 0 {
            return Err(Error::InvalidConfig("payload limit must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dagcheck_core::GraphLimits;

    #[test]
    fn test_default_is_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.allowed_origins.len(), 3);
    }

    #[test]
    fn test_rejects_bad_settings() {
        let mut config = ApiConfig::default();
        config.allowed_origins.clear();
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.allowed_origins.push("*".into());
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.checker = config.checker.with_limits(GraphLimits::new(0, 10));
        assert!(config.validate().is_err());

        let config = ApiConfig {
            max_payload_bytes: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

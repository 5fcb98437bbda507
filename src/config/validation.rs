//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Dev server origin must be an absolute `http` URI when proxying
//! - Root path must stay inside the content root
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HostConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::HostConfig;
use crate::proxy::options::ProxyOptions;
use crate::site::root::RootOptions;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("dev_server.origin is required when dev_server.proxy_to_dev_server is set")]
    MissingDevServer,

    #[error("dev_server.origin '{origin}' must be an absolute uri: {reason}")]
    InvalidDevServer { origin: String, reason: String },

    #[error("site.root_path '{0}' must be relative to the content root")]
    RootedRootPath(String),

    #[error("site.root_path '{0}' escapes the content root")]
    EscapingRootPath(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("{field} '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },
}

/// Check every semantic rule and collect all failures.
pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = ProxyOptions::from_config(&config.dev_server) {
        errors.push(e);
    }

    if let Err(e) = RootOptions::new(&config.site.root_path) {
        errors.push(e);
    }

    if config.dev_server.activity_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("dev_server.activity_timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&HostConfig::default()), Ok(()));
    }

    #[test]
    fn test_proxy_without_origin_fails() {
        let mut config = HostConfig::default();
        config.dev_server.proxy_to_dev_server = true;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingDevServer]);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = HostConfig::default();
        config.dev_server.proxy_to_dev_server = true;
        config.dev_server.origin = Some("localhost:3000".into());
        config.site.root_path = "/etc".into();
        config.timeouts.request_secs = 0;
        config.listener.bind_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::InvalidDevServer { .. }));
        assert_eq!(errors[1], ValidationError::RootedRootPath("/etc".into()));
        assert_eq!(errors[2], ValidationError::ZeroTimeout("timeouts.request_secs"));
        assert!(matches!(errors[3], ValidationError::InvalidAddress { .. }));
    }

    #[test]
    fn test_origin_ignored_when_not_proxying() {
        let mut config = HostConfig::default();
        config.dev_server.origin = Some("not a uri".into());
        assert_eq!(validate_config(&config), Ok(()));
    }
}

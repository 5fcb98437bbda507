//! Dev server proxy options.
//!
//! Validated once, at construction. A `ProxyOptions` in `ProxyAll` mode
//! always carries a usable origin.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::config::schema::DevServerConfig;
use crate::config::validation::ValidationError;

/// Whether inbound requests go to the dev server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyMode {
    #[default]
    Disabled,
    /// Every request, matched page or not, is forwarded.
    ProxyAll,
}

/// Scheme and authority of the dev server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevServerOrigin {
    configured: String,
    scheme: String,
    authority: String,
}

impl DevServerOrigin {
    /// Parse an absolute `http` URI. Path, query and fragment are ignored.
    pub fn parse(origin: &str) -> Result<Self, ValidationError> {
        let origin = origin.trim();
        let invalid = |reason: String| ValidationError::InvalidDevServer {
            origin: origin.to_string(),
            reason,
        };

        let url = Url::parse(origin).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" {
            return Err(invalid(format!(
                "unsupported scheme '{}', only http is supported",
                url.scheme()
            )));
        }
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("missing host".to_string()))?;

        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self {
            configured: origin.to_string(),
            scheme: url.scheme().to_string(),
            authority,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }
}

impl fmt::Display for DevServerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.configured)
    }
}

/// Validated dev server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOptions {
    origin: Option<DevServerOrigin>,
    mode: ProxyMode,
    activity_timeout: Duration,
}

impl ProxyOptions {
    pub const DEFAULT_ACTIVITY_TIMEOUT: Duration = Duration::from_secs(300);

    /// Build options for `mode`. The origin is required and validated only
    /// when proxying.
    pub fn new(origin: Option<&str>, mode: ProxyMode) -> Result<Self, ValidationError> {
        let origin = match mode {
            ProxyMode::Disabled => None,
            ProxyMode::ProxyAll => {
                let origin = origin
                    .filter(|o| !o.trim().is_empty())
                    .ok_or(ValidationError::MissingDevServer)?;
                Some(DevServerOrigin::parse(origin)?)
            }
        };

        Ok(Self {
            origin,
            mode,
            activity_timeout: Self::DEFAULT_ACTIVITY_TIMEOUT,
        })
    }

    pub fn from_config(config: &DevServerConfig) -> Result<Self, ValidationError> {
        let mode = if config.proxy_to_dev_server {
            ProxyMode::ProxyAll
        } else {
            ProxyMode::Disabled
        };

        Ok(Self::new(config.origin.as_deref(), mode)?
            .with_activity_timeout(Duration::from_secs(config.activity_timeout_secs)))
    }

    pub fn with_activity_timeout(mut self, timeout: Duration) -> Self {
        self.activity_timeout = timeout;
        self
    }

    pub fn mode(&self) -> ProxyMode {
        self.mode
    }

    /// The origin to forward to, present iff proxying.
    pub fn proxy_origin(&self) -> Option<&DevServerOrigin> {
        match self.mode {
            ProxyMode::ProxyAll => self.origin.as_ref(),
            ProxyMode::Disabled => None,
        }
    }

    pub fn activity_timeout(&self) -> Duration {
        self.activity_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_authority() {
        let origin = DevServerOrigin::parse("http://localhost:3000").unwrap();
        assert_eq!(origin.scheme(), "http");
        assert_eq!(origin.authority(), "localhost:3000");
        assert_eq!(origin.to_string(), "http://localhost:3000");

        let origin = DevServerOrigin::parse("http://127.0.0.1/ignored?x=1").unwrap();
        assert_eq!(origin.authority(), "127.0.0.1");

        let origin = DevServerOrigin::parse("http://[::1]:8000").unwrap();
        assert_eq!(origin.authority(), "[::1]:8000");
    }

    #[test]
    fn test_relative_origin_rejected() {
        for origin in ["localhost:3000", "/dev", "not a uri"] {
            let err = DevServerOrigin::parse(origin).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidDevServer { .. }),
                "{origin} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_https_origin_rejected() {
        let err = DevServerOrigin::parse("https://localhost:3000").unwrap_err();
        assert!(err.to_string().contains("only http is supported"));
    }

    #[test]
    fn test_proxy_requires_origin() {
        assert_eq!(
            ProxyOptions::new(None, ProxyMode::ProxyAll),
            Err(ValidationError::MissingDevServer)
        );
        assert_eq!(
            ProxyOptions::new(Some("  "), ProxyMode::ProxyAll),
            Err(ValidationError::MissingDevServer)
        );
    }

    #[test]
    fn test_disabled_has_no_origin() {
        let options = ProxyOptions::new(Some("http://localhost:3000"), ProxyMode::Disabled).unwrap();
        assert_eq!(options.mode(), ProxyMode::Disabled);
        assert!(options.proxy_origin().is_none());
    }

    #[test]
    fn test_from_config() {
        let config = DevServerConfig {
            proxy_to_dev_server: true,
            origin: Some("http://localhost:3000".into()),
            activity_timeout_secs: 5,
        };
        let options = ProxyOptions::from_config(&config).unwrap();
        assert_eq!(options.mode(), ProxyMode::ProxyAll);
        assert_eq!(options.proxy_origin().unwrap().authority(), "localhost:3000");
        assert_eq!(options.activity_timeout(), Duration::from_secs(5));
    }
}

//! Shared types used across the application.

use std::fmt;
use std::str::FromStr;

use crate::common::error::DispatchError;

/// A game server address that a player can be redirected to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = DispatchError;

    /// Parse `host:port`. IPv6 hosts must be bracketed (`[::1]:19132`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| DispatchError::invalid("endpoint", format!("'{}' has no port", s)))?;

        let host = match host.strip_prefix('[') {
            Some(inner) => inner.strip_suffix(']').ok_or_else(|| {
                DispatchError::invalid("endpoint", format!("'{}' has an unclosed bracket", s))
            })?,
            None if host.contains(':') => {
                return Err(DispatchError::invalid(
                    "endpoint",
                    format!("'{}' must bracket IPv6 hosts", s),
                ));
            }
            None => host,
        };

        if host.is_empty() {
            return Err(DispatchError::invalid(
                "endpoint",
                format!("'{}' has an empty host", s),
            ));
        }

        let port: u16 = port.parse().map_err(|_| {
            DispatchError::invalid("endpoint", format!("'{}' has an invalid port", s))
        })?;
        if port == 0 {
            return Err(DispatchError::invalid(
                "endpoint",
                format!("'{}' has port 0", s),
            ));
        }

        Ok(Self::new(host, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4_endpoint() {
        let endpoint: Endpoint = "10.0.0.5:19132".parse().unwrap();
        assert_eq!(endpoint, Endpoint::new("10.0.0.5", 19132));
        assert_eq!(endpoint.to_string(), "10.0.0.5:19132");
    }

    #[test]
    fn test_parse_hostname_with_whitespace() {
        let endpoint: Endpoint = "  play.example.net:19133 ".parse().unwrap();
        assert_eq!(endpoint.host, "play.example.net");
        assert_eq!(endpoint.port, 19133);
    }

    #[test]
    fn test_parse_bracketed_ipv6() {
        let endpoint: Endpoint = "[::1]:19132".parse().unwrap();
        assert_eq!(endpoint.host, "::1");
        assert_eq!(endpoint.to_string(), "[::1]:19132");
    }

    #[test]
    fn test_malformed_endpoints_rejected() {
        for bad in ["", "10.0.0.5", ":19132", "host:", "host:abc", "host:0", "host:70000", "::1:19132", "[::1:19132"] {
            let result = bad.parse::<Endpoint>();
            assert!(
                matches!(result, Err(DispatchError::InvalidInput { .. })),
                "expected '{}' to be rejected",
                bad
            );
        }
    }
}

//! Deployment shim configuration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

/// Environment variable holding the listen port
pub const PORT_ENV: &str = "PORT";
/// Port used when `PORT` is unset
pub const DEFAULT_PORT: u16 = 7860;

/// Startup failures of the shim; all of them are fatal
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Invalid {PORT_ENV} value '{value}': expected an integer between 0 and 65535")]
    InvalidPort { value: String },

    #[error("Failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Web server terminated with an error")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

/// Where the shim listens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServeConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServeConfig {
    /// Resolve from the process environment
    pub fn from_env() -> Result<Self, ServeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve through an arbitrary lookup
    ///
    /// Unset means the default port; a set but non-numeric value is an error
    /// rather than a silent fallback.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_ENV) {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ServeError::InvalidPort { value: raw })?,
        };

        Ok(Self {
            port,
            ..Self::default()
        })
    }

    /// All interfaces on the configured port
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

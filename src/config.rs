//! Server configuration from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{Ipv4Addr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort { value: String, source: ParseIntError },
    #[error("{var} is set but empty")]
    EmptyPath { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Static assets; `/` serves `index.html` from here.
    pub web_dir: PathBuf,
    /// wasm-pack output served under `/pkg`.
    pub pkg_dir: PathBuf,
}

impl ServerConfig {
    /// Read `PORT`, `WALL_WEB_DIR` and `WALL_PKG_DIR`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `PORT` is not a port number or a directory
    /// variable is set to an empty string.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ServerConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            port,
            web_dir: dir_var(&lookup, "WALL_WEB_DIR", "web")?,
            pkg_dir: dir_var(&lookup, "WALL_PKG_DIR", "wall/pkg")?,
        })
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Directory from `var`, or `default` relative to the crate root.
fn dir_var(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: &str) -> Result<PathBuf, ConfigError> {
    match lookup(var) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyPath { var }),
        Some(value) => Ok(PathBuf::from(value)),
        None => Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(default)),
    }
}

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use mergington::errors::{Report, WrapErr, eyre};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_STATIC_DIR: &str = "static";

/// Server settings, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl Config {
    /// Reads `HOST`, `PORT` and `STATIC_DIR`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, Report> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Report> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host
                .parse()
                .wrap_err_with(|| format!("HOST must be an IP address, got {host:?}"))?;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .wrap_err_with(|| format!("PORT must be a port number, got {port:?}"))?;
        }

        if let Some(static_dir) = lookup("STATIC_DIR") {
            if static_dir.trim().is_empty() {
                return Err(eyre!("STATIC_DIR must not be empty"));
            }
            config.static_dir = PathBuf::from(static_dir);
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

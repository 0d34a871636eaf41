use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Relational store in `data_dir/permd.db`.
    #[default]
    Sqlite,
    /// Process-local key-set store; nothing survives a restart.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(Error::Config(format!("unknown store backend `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Namespace whose `server_admins` group is checked at start-up.
    pub namespace: String,
    pub backend: StoreBackend,
    /// Raw principal ids seeded into `server_admins` at start-up.
    pub admins: Vec<String>,
}

impl ServerConfig {
    /// Loads a TOML config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(Error::Config("namespace cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Offline admin commands write to the database directly, which a
    /// memory-backed server never reads.
    pub fn require_persistent_backend(&self) -> Result<()> {
        if self.backend == StoreBackend::Memory {
            return Err(Error::Config(
                "the memory backend keeps no data between runs; offline admin commands need \
                 `backend = \"sqlite\"` (use the `admins` config key to seed a memory server)"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("permd.db")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            namespace: "default".to_string(),
            backend: StoreBackend::default(),
            admins: Vec::new(),
        }
    }
}

//! Deployment registry: contract name to deployed address, persisted per network.

use std::path::PathBuf;

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// A saved deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub block_number: Option<u64>,
    pub gas_used: u64,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Lookup and persistence of deployments by contract name.
pub trait DeploymentStore {
    fn get(&self, name: &str) -> Result<Deployment>;

    fn save(&self, name: &str, deployment: &Deployment) -> Result<()>;
}

/// Stores each deployment as `<dir>/<Name>.json`, where `dir` is already
/// specific to one network.
#[derive(Debug, Clone)]
pub struct FileDeploymentStore {
    network: String,
    dir: PathBuf,
}

impl FileDeploymentStore {
    pub fn new(network: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            network: network.into(),
            dir: dir.into(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl DeploymentStore for FileDeploymentStore {
    fn get(&self, name: &str) -> Result<Deployment> {
        let path = self.path(name);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::DeploymentNotFound {
                    name: name.to_string(),
                    network: self.network.clone(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, name: &str, deployment: &Deployment) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(name);
        std::fs::write(&path, serde_json::to_string_pretty(deployment)?)?;
        debug!(contract = name, path = %path.display(), "Saved deployment");
        Ok(())
    }
}

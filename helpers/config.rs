//! Script settings.

use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    error::Result,
    network::{NetworkTable, ResolvedNetwork},
};

/// Settings shared by the deploy and mint scripts.
///
/// Loaded from an optional `random-nft.{toml,json,yaml}` file, then from
/// `RANDOM_NFT_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "defaults::network")]
    pub network: String,

    #[serde(default = "defaults::rpc_url")]
    pub rpc_url: String,

    #[serde(default = "defaults::private_key")]
    pub private_key: String,

    #[serde(default = "defaults::deployments_dir")]
    pub deployments_dir: PathBuf,

    #[serde(default = "defaults::artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// JSON file replacing the built-in network table.
    #[serde(default)]
    pub networks_file: Option<PathBuf>,

    #[serde(default = "defaults::block_confirmations")]
    pub block_confirmations: u64,

    #[serde(default)]
    pub base_uri: Option<String>,

    #[serde(default)]
    pub not_revealed_uri: Option<String>,

    /// Comma separated. Empty runs every deploy step.
    #[serde(default)]
    pub deploy_tags: String,

    #[serde(default)]
    pub etherscan_api_key: Option<String>,

    #[serde(default = "defaults::etherscan_api_url")]
    pub etherscan_api_url: String,

    #[serde(default = "defaults::verify_poll_interval_ms")]
    pub verify_poll_interval_ms: u64,

    #[serde(default = "defaults::verify_max_polls")]
    pub verify_max_polls: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network: defaults::network(),
            rpc_url: defaults::rpc_url(),
            private_key: defaults::private_key(),
            deployments_dir: defaults::deployments_dir(),
            artifacts_dir: defaults::artifacts_dir(),
            networks_file: None,
            block_confirmations: defaults::block_confirmations(),
            base_uri: None,
            not_revealed_uri: None,
            deploy_tags: String::new(),
            etherscan_api_key: None,
            etherscan_api_url: defaults::etherscan_api_url(),
            verify_poll_interval_ms: defaults::verify_poll_interval_ms(),
            verify_max_polls: defaults::verify_max_polls(),
        }
    }
}

impl Settings {
    /// Loads settings from the optional file and the environment.
    ///
    /// `ETHERSCAN_API_KEY` is honored when `RANDOM_NFT_ETHERSCAN_API_KEY` is not set.
    pub fn load() -> Result<Self> {
        let settings: Settings = ::config::Config::builder()
            .add_source(::config::File::with_name("random-nft").required(false))
            .add_source(::config::Environment::with_prefix("RANDOM_NFT"))
            .build()?
            .try_deserialize()?;

        Ok(settings.with_fallback_api_key(std::env::var("ETHERSCAN_API_KEY").ok()))
    }

    fn with_fallback_api_key(mut self, fallback: Option<String>) -> Self {
        if self.etherscan_api_key.is_none() {
            self.etherscan_api_key = fallback;
        }
        self
    }

    /// The API key, if one is set and non-empty.
    pub fn verification_key(&self) -> Option<&str> {
        self.etherscan_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// The API key to verify deployments on `network` with. `None` on the
    /// development chains or without a usable key.
    pub fn verification_key_for(&self, network: &ResolvedNetwork) -> Option<&str> {
        if network.is_development() {
            return None;
        }
        self.verification_key()
    }

    pub fn network_table(&self) -> Result<NetworkTable> {
        match &self.networks_file {
            Some(path) => NetworkTable::load(path),
            None => Ok(NetworkTable::builtin()),
        }
    }

    pub fn tags(&self) -> Vec<&str> {
        self.deploy_tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Deployment records for the configured network live here.
    pub fn network_deployments_dir(&self) -> PathBuf {
        self.deployments_dir.join(&self.network)
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn network() -> String {
        "localhost".into()
    }

    pub fn rpc_url() -> String {
        "http://127.0.0.1:8545".into()
    }

    /// First account of the local development node.
    pub fn private_key() -> String {
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".into()
    }

    pub fn deployments_dir() -> PathBuf {
        "deployments".into()
    }

    pub fn artifacts_dir() -> PathBuf {
        "artifacts".into()
    }

    pub fn block_confirmations() -> u64 {
        1
    }

    pub fn etherscan_api_url() -> String {
        "https://api.etherscan.io/v2/api".into()
    }

    pub fn verify_poll_interval_ms() -> u64 {
        3_000
    }

    pub fn verify_max_polls() -> u32 {
        10
    }
}

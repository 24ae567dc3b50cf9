//! Common helpers for the deployment scripts and their tests

pub mod artifacts;
pub mod client;
pub mod config;
pub mod contracts;
pub mod deployments;
pub mod error;
pub mod network;
pub mod verify;

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use artifacts::{Artifact, Artifacts, BuildInfo};
pub use client::{
    ChainClient, DeployRequest, DeployedContract, EvmClient, MintReceipt, TxOutcome,
};
pub use self::config::Settings;
pub use deployments::{Deployment, DeploymentStore, FileDeploymentStore};
pub use error::{Error, Result};
pub use network::{
    ChainTarget, NetworkEntry, NetworkTable, RemoteOracle, ResolvedNetwork, SubscriptionId,
};
pub use verify::{EtherscanVerifier, SourceVerifier, VerificationOutcome};

/// Installs the fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Everything a script needs, wired from [`Settings`].
pub struct ScriptSetup {
    pub settings: Settings,
    pub client: EvmClient,
    pub network: ResolvedNetwork,
    pub deployments: FileDeploymentStore,
    pub artifacts: Artifacts,
}

impl ScriptSetup {
    /// Etherscan verifier for this network. `None` on the development chains
    /// or when no API key is configured.
    pub fn verifier(&self) -> Option<EtherscanVerifier> {
        let key = self.settings.verification_key_for(&self.network)?;
        Some(
            EtherscanVerifier::new(
                self.settings.etherscan_api_url.clone(),
                key,
                self.network.chain_id,
                self.artifacts.clone(),
            )
            .with_polling(
                Duration::from_millis(self.settings.verify_poll_interval_ms),
                self.settings.verify_max_polls,
            ),
        )
    }
}

/// Loads `.env` and settings, connects to the RPC endpoint and resolves the
/// target network once.
pub async fn setup_script() -> Result<ScriptSetup> {
    dotenvy::dotenv().ok();
    let settings = Settings::load()?;

    let client = EvmClient::connect(
        &settings.rpc_url,
        &settings.private_key,
        settings.block_confirmations,
    )
    .await?;

    let chain_id = client.chain_id().await?;
    let table = settings.network_table()?;
    let network = ResolvedNetwork::resolve(&settings.network, chain_id, &table)?;
    info!(
        network = %network.name,
        chain_id,
        deployer = %client.deployer(),
        local = network.target.is_local(),
        "Network resolved"
    );

    let deployments =
        FileDeploymentStore::new(settings.network.clone(), settings.network_deployments_dir());
    let artifacts = Artifacts::new(settings.artifacts_dir.clone());

    Ok(ScriptSetup {
        settings,
        client,
        network,
        deployments,
        artifacts,
    })
}

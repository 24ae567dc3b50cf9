//! Deployment and interaction procedures for the RandomNFT project.
//!
//! Each procedure takes its collaborators explicitly so it can run against a
//! live node or an in-memory chain.

pub mod deploy_mocks;
pub mod deploy_random_nft;
pub mod mint;

use alloy::primitives::Bytes;
use helpers::{
    Artifacts, ChainClient, DeployRequest, Deployment, DeploymentStore, ResolvedNetwork, Result,
};

pub use deploy_mocks::deploy_mocks;
pub use deploy_random_nft::{deploy_random_nft, DeployOptions};
pub use mint::{exit_status, mint_nft};

/// Collaborators shared by the deploy steps.
pub struct DeployEnv<'a, C, S> {
    pub client: &'a C,
    pub deployments: &'a S,
    pub artifacts: &'a Artifacts,
    pub network: &'a ResolvedNetwork,
}

impl<C, S> Clone for DeployEnv<'_, C, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, S> Copy for DeployEnv<'_, C, S> {}

/// Whether a step carrying `step_tags` runs when `requested` tags were asked
/// for. No requested tags runs everything.
pub fn selected(step_tags: &[&str], requested: &[&str]) -> bool {
    requested.is_empty() || step_tags.iter().any(|tag| requested.contains(tag))
}

/// Deploys `contract` from its artifact and records it under its name.
pub async fn deploy_contract<C, S>(
    env: DeployEnv<'_, C, S>,
    contract: &str,
    constructor_args: Bytes,
    display_args: Vec<String>,
) -> Result<Deployment>
where
    C: ChainClient,
    S: DeploymentStore,
{
    let artifact = env.artifacts.load(contract)?;
    let request = DeployRequest {
        contract: contract.to_string(),
        bytecode: artifact.bytecode,
        constructor_args,
    };

    let deployed = env.client.deploy(&request).await?;
    let deployment = Deployment {
        address: deployed.address,
        transaction_hash: deployed.outcome.tx_hash,
        block_number: deployed.outcome.block_number,
        gas_used: deployed.outcome.gas_used,
        args: display_args,
    };
    env.deployments.save(contract, &deployment)?;
    Ok(deployment)
}

use helpers::{
    contracts::{coordinator_mock_args, MOCK_BASE_FEE, MOCK_GAS_PRICE_LINK, VRF_COORDINATOR_V2_MOCK},
    ChainClient, Deployment, DeploymentStore, Result,
};
use tracing::{debug, info};

use crate::{deploy_contract, DeployEnv};

pub const TAGS: &[&str] = &["all", "mocks"];

/// Deploys the VRF coordinator mock on the local chain. Does nothing elsewhere.
pub async fn deploy_mocks<C, S>(env: DeployEnv<'_, C, S>) -> Result<Option<Deployment>>
where
    C: ChainClient,
    S: DeploymentStore,
{
    if !env.network.target.is_local() {
        debug!(network = %env.network.name, "Live oracle, no mocks needed");
        return Ok(None);
    }

    info!("Local network detected! Deploying mocks...");
    let deployment = deploy_contract(
        env,
        VRF_COORDINATOR_V2_MOCK,
        coordinator_mock_args(),
        vec![MOCK_BASE_FEE.to_string(), MOCK_GAS_PRICE_LINK.to_string()],
    )
    .await?;
    info!(address = %deployment.address, "Mocks deployed!");
    info!("----------------------------------------------------");

    Ok(Some(deployment))
}

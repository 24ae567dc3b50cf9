//! Deploys RandomNFT wired to the chain's VRF coordinator.

use alloy::primitives::Address;
use helpers::{
    contracts::{RandomNftArgs, FUND_AMOUNT, RANDOM_NFT, VRF_COORDINATOR_V2_MOCK},
    ChainClient, ChainTarget, Deployment, DeploymentStore, Result, Settings, SourceVerifier,
    SubscriptionId, VerificationOutcome,
};
use tracing::{error, info, warn};

use crate::{deploy_contract, DeployEnv};

pub const TAGS: &[&str] = &["all", "random", "main"];

/// Token URIs passed to the constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployOptions {
    pub init_base_uri: String,
    pub init_not_revealed_uri: String,
}

impl DeployOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        let uri = |value: &Option<String>, key: &str| match value {
            Some(uri) => uri.clone(),
            None => {
                warn!("{key} is not set, deploying with an empty string");
                String::new()
            }
        };
        Self {
            init_base_uri: uri(&settings.base_uri, "base_uri"),
            init_not_revealed_uri: uri(&settings.not_revealed_uri, "not_revealed_uri"),
        }
    }
}

/// Deploys RandomNFT.
///
/// On the local chain a fresh subscription is created on the coordinator mock,
/// funded with [`FUND_AMOUNT`], and the new contract is registered as its
/// consumer. Elsewhere the coordinator and subscription come from the network
/// table. The source is verified when `verifier` is given, which callers only
/// do off the development chains (see `Settings::verification_key_for`). A
/// failed verification is logged and does not fail the deploy.
pub async fn deploy_random_nft<C, S, V>(
    env: DeployEnv<'_, C, S>,
    options: &DeployOptions,
    verifier: Option<&V>,
) -> Result<Deployment>
where
    C: ChainClient,
    S: DeploymentStore,
    V: SourceVerifier,
{
    let (coordinator, subscription_id) = oracle_subscription(env).await?;

    info!("----------------------------------------------------");
    let args = RandomNftArgs {
        vrf_coordinator_v2: coordinator,
        subscription_id,
        gas_lane: env.network.entry.gas_lane,
        callback_gas_limit: env.network.entry.callback_gas_limit,
        init_base_uri: options.init_base_uri.clone(),
        init_not_revealed_uri: options.init_not_revealed_uri.clone(),
    };
    let constructor_args = args.abi_encode();
    let deployment =
        deploy_contract(env, RANDOM_NFT, constructor_args.clone(), args.display()).await?;

    if env.network.target.is_local() {
        env.client
            .add_consumer(coordinator, subscription_id, deployment.address)
            .await?;
        info!(%subscription_id, consumer = %deployment.address, "Consumer added");
    }

    if let Some(verifier) = verifier {
        info!("Verifying...");
        match verifier
            .verify(RANDOM_NFT, deployment.address, &constructor_args)
            .await
        {
            Ok(VerificationOutcome::Verified) => info!(address = %deployment.address, "Verified"),
            Ok(VerificationOutcome::AlreadyVerified) => info!("Already verified!"),
            Err(e) => error!(address = %deployment.address, "Verification failed: {e}"),
        }
    }

    Ok(deployment)
}

async fn oracle_subscription<C, S>(env: DeployEnv<'_, C, S>) -> Result<(Address, SubscriptionId)>
where
    C: ChainClient,
    S: DeploymentStore,
{
    match env.network.target {
        ChainTarget::Local => {
            let coordinator = env.deployments.get(VRF_COORDINATOR_V2_MOCK)?.address;
            let subscription_id = env.client.create_subscription(coordinator).await?;
            info!(%subscription_id, %coordinator, "Subscription created");
            env.client
                .fund_subscription(coordinator, subscription_id, FUND_AMOUNT)
                .await?;
            info!(%subscription_id, amount = %FUND_AMOUNT, "Subscription funded");
            Ok((coordinator, subscription_id))
        }
        ChainTarget::Remote(oracle) => Ok((oracle.coordinator, oracle.subscription_id)),
    }
}

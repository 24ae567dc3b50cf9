use helpers::{init_tracing, setup_script, EtherscanVerifier};
use scripts::{deploy_mocks, deploy_random_nft, selected, DeployEnv, DeployOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let setup = setup_script().await?;
    let requested = setup.settings.tags();

    let env = DeployEnv {
        client: &setup.client,
        deployments: &setup.deployments,
        artifacts: &setup.artifacts,
        network: &setup.network,
    };

    if selected(scripts::deploy_mocks::TAGS, &requested) {
        deploy_mocks(env).await?;
    }

    if selected(scripts::deploy_random_nft::TAGS, &requested) {
        let options = DeployOptions::from_settings(&setup.settings);
        let verifier: Option<EtherscanVerifier> = setup.verifier();
        deploy_random_nft(env, &options, verifier.as_ref()).await?;
    }

    Ok(())
}

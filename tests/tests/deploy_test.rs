use helpers::{
    contracts::{
        coordinator_mock_args, RandomNftArgs, FUND_AMOUNT, RANDOM_NFT, VRF_COORDINATOR_V2_MOCK,
    },
    network::LOCAL_CHAIN_ID,
    Artifacts, DeploymentStore, Error, FileDeploymentStore, NetworkTable, ResolvedNetwork,
    Settings, SubscriptionId,
};
use scripts::{deploy_mocks, deploy_random_nft, DeployEnv, DeployOptions};
use tempfile::TempDir;
use tests::{write_artifacts, Call, FakeChain, FakeVerifier};

const SEPOLIA: u64 = 11_155_111;

struct Fixture {
    _dir: TempDir,
    artifacts: Artifacts,
    deployments: FileDeploymentStore,
    network: ResolvedNetwork,
}

impl Fixture {
    fn new(name: &str, chain_id: u64) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        write_artifacts(dir.path())?;
        Ok(Self {
            artifacts: Artifacts::new(dir.path()),
            deployments: FileDeploymentStore::new(name, dir.path().join("deployments").join(name)),
            network: ResolvedNetwork::resolve(name, chain_id, &NetworkTable::builtin())?,
            _dir: dir,
        })
    }

    fn env<'a>(&'a self, chain: &'a FakeChain) -> DeployEnv<'a, FakeChain, FileDeploymentStore> {
        DeployEnv {
            client: chain,
            deployments: &self.deployments,
            artifacts: &self.artifacts,
            network: &self.network,
        }
    }
}

fn settings_with_key(network: &str) -> Settings {
    Settings {
        network: network.into(),
        etherscan_api_key: Some("KEY".into()),
        ..Default::default()
    }
}

fn options() -> DeployOptions {
    DeployOptions {
        init_base_uri: "ipfs://base/".into(),
        init_not_revealed_uri: "ipfs://hidden".into(),
    }
}

#[tokio::test]
async fn local_deploy_creates_funds_and_registers_one_subscription() -> anyhow::Result<()> {
    let fixture = Fixture::new("localhost", LOCAL_CHAIN_ID)?;
    let chain = FakeChain::new(LOCAL_CHAIN_ID);
    let env = fixture.env(&chain);

    let mock = deploy_mocks(env)
        .await?
        .ok_or_else(|| anyhow::anyhow!("mock not deployed on the local chain"))?;
    let nft = deploy_random_nft(env, &options(), None::<&FakeVerifier>).await?;

    let subscription_id = SubscriptionId(1);
    let expected_args = RandomNftArgs {
        vrf_coordinator_v2: mock.address,
        subscription_id,
        gas_lane: fixture.network.entry.gas_lane,
        callback_gas_limit: fixture.network.entry.callback_gas_limit,
        init_base_uri: "ipfs://base/".into(),
        init_not_revealed_uri: "ipfs://hidden".into(),
    };
    assert_eq!(
        chain.calls(),
        vec![
            Call::Deploy {
                contract: VRF_COORDINATOR_V2_MOCK.into(),
                constructor_args: coordinator_mock_args(),
            },
            Call::CreateSubscription {
                coordinator: mock.address,
            },
            Call::FundSubscription {
                coordinator: mock.address,
                subscription_id,
                amount: FUND_AMOUNT,
            },
            Call::Deploy {
                contract: RANDOM_NFT.into(),
                constructor_args: expected_args.abi_encode(),
            },
            Call::AddConsumer {
                coordinator: mock.address,
                subscription_id,
                consumer: nft.address,
            },
        ]
    );

    assert_eq!(fixture.deployments.get(RANDOM_NFT)?, nft);
    assert_eq!(nft.args, expected_args.display());
    Ok(())
}

#[tokio::test]
async fn local_deploy_never_verifies() -> anyhow::Result<()> {
    for name in ["hardhat", "localhost"] {
        let fixture = Fixture::new(name, LOCAL_CHAIN_ID)?;
        let chain = FakeChain::new(LOCAL_CHAIN_ID);
        let settings = settings_with_key(name);
        let verifier = settings
            .verification_key_for(&fixture.network)
            .map(|_| FakeVerifier::accepting());
        assert!(verifier.is_none(), "{name} must not get a verifier");

        deploy_mocks(fixture.env(&chain)).await?;
        let nft = deploy_random_nft(fixture.env(&chain), &options(), verifier.as_ref()).await?;
        assert_eq!(fixture.deployments.get(RANDOM_NFT)?, nft);
    }
    Ok(())
}

#[tokio::test]
async fn live_deploy_with_key_is_verified_through_the_settings_gate() -> anyhow::Result<()> {
    let fixture = Fixture::new("sepolia", SEPOLIA)?;
    let chain = FakeChain::new(SEPOLIA);
    let settings = settings_with_key("sepolia");
    let verifier = settings
        .verification_key_for(&fixture.network)
        .map(|_| FakeVerifier::accepting())
        .ok_or_else(|| anyhow::anyhow!("sepolia with a key must get a verifier"))?;

    let nft = deploy_random_nft(fixture.env(&chain), &options(), Some(&verifier)).await?;

    assert_eq!(verifier.submissions().len(), 1);
    assert_eq!(verifier.submissions()[0].1, nft.address);
    Ok(())
}

#[tokio::test]
async fn local_deploy_without_mock_fails_before_any_transaction() -> anyhow::Result<()> {
    let fixture = Fixture::new("localhost", LOCAL_CHAIN_ID)?;
    let chain = FakeChain::new(LOCAL_CHAIN_ID);

    let err = deploy_random_nft(fixture.env(&chain), &options(), None::<&FakeVerifier>)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::DeploymentNotFound { ref name, .. } if name == VRF_COORDINATOR_V2_MOCK
    ));
    assert!(chain.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn remote_deploy_uses_configured_subscription_and_verifies() -> anyhow::Result<()> {
    let fixture = Fixture::new("sepolia", SEPOLIA)?;
    let chain = FakeChain::new(SEPOLIA);
    let verifier = FakeVerifier::accepting();

    assert!(deploy_mocks(fixture.env(&chain)).await?.is_none());
    let nft = deploy_random_nft(fixture.env(&chain), &options(), Some(&verifier)).await?;

    let entry = &fixture.network.entry;
    let expected_args = RandomNftArgs {
        vrf_coordinator_v2: entry.vrf_coordinator_v2.expect("sepolia has a coordinator"),
        subscription_id: entry.subscription_id.expect("sepolia has a subscription"),
        gas_lane: entry.gas_lane,
        callback_gas_limit: entry.callback_gas_limit,
        init_base_uri: "ipfs://base/".into(),
        init_not_revealed_uri: "ipfs://hidden".into(),
    };
    assert_eq!(
        chain.calls(),
        vec![Call::Deploy {
            contract: RANDOM_NFT.into(),
            constructor_args: expected_args.abi_encode(),
        }]
    );
    assert_eq!(nft.args[1], "1002");
    assert_eq!(
        verifier.submissions(),
        vec![(RANDOM_NFT.to_string(), nft.address, expected_args.abi_encode())]
    );
    Ok(())
}

#[tokio::test]
async fn remote_deploy_without_verifier_skips_verification() -> anyhow::Result<()> {
    let fixture = Fixture::new("sepolia", SEPOLIA)?;
    let chain = FakeChain::new(SEPOLIA);

    let nft = deploy_random_nft(fixture.env(&chain), &options(), None::<&FakeVerifier>).await?;

    assert_eq!(fixture.deployments.get(RANDOM_NFT)?.address, nft.address);
    assert_eq!(chain.calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_verification_does_not_fail_the_deploy() -> anyhow::Result<()> {
    let fixture = Fixture::new("sepolia", SEPOLIA)?;
    let chain = FakeChain::new(SEPOLIA);
    let verifier = FakeVerifier::failing("Invalid API Key");

    let nft = deploy_random_nft(fixture.env(&chain), &options(), Some(&verifier)).await?;

    assert_eq!(verifier.submissions().len(), 1);
    assert_eq!(fixture.deployments.get(RANDOM_NFT)?, nft);
    Ok(())
}

#[tokio::test]
async fn rejected_local_deploy_skips_consumer_registration() -> anyhow::Result<()> {
    let fixture = Fixture::new("localhost", LOCAL_CHAIN_ID)?;
    let chain = FakeChain::new(LOCAL_CHAIN_ID).rejecting_deploy_of(RANDOM_NFT);

    deploy_mocks(fixture.env(&chain)).await?;
    let err = deploy_random_nft(fixture.env(&chain), &options(), None::<&FakeVerifier>)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Reverted(_)));
    assert!(!chain
        .calls()
        .iter()
        .any(|call| matches!(call, Call::AddConsumer { .. })));
    assert!(matches!(
        fixture.deployments.get(RANDOM_NFT),
        Err(Error::DeploymentNotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn rejected_remote_deploy_skips_verification() -> anyhow::Result<()> {
    let fixture = Fixture::new("sepolia", SEPOLIA)?;
    let chain = FakeChain::new(SEPOLIA).rejecting_deploy_of(RANDOM_NFT);
    let verifier = FakeVerifier::accepting();

    let result = deploy_random_nft(fixture.env(&chain), &options(), Some(&verifier)).await;

    assert!(result.is_err());
    assert!(verifier.submissions().is_empty());
    Ok(())
}

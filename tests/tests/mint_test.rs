use std::time::Duration;

use alloy::primitives::{Address, TxHash};
use helpers::{
    contracts::{MINT_FEE, RANDOM_NFT},
    Deployment, DeploymentStore, Error, FileDeploymentStore,
};
use scripts::{exit_status, mint_nft};
use tests::{Call, FakeChain};

const SEPOLIA: u64 = 11_155_111;

fn deployed_nft() -> Deployment {
    Deployment {
        address: Address::repeat_byte(0x42),
        transaction_hash: TxHash::repeat_byte(0x01),
        block_number: Some(10),
        gas_used: 3_000_000,
        args: Vec::new(),
    }
}

#[tokio::test]
async fn mint_pays_the_fee_once_to_the_registered_contract() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let deployments = FileDeploymentStore::new("sepolia", dir.path());
    deployments.save(RANDOM_NFT, &deployed_nft())?;
    let chain = FakeChain::new(SEPOLIA);

    let receipt = mint_nft(&chain, &deployments).await?;

    assert_eq!(
        chain.calls(),
        vec![Call::RequestNft {
            nft: Address::repeat_byte(0x42),
            value: MINT_FEE,
        }]
    );
    assert!(receipt.request_id.is_some());
    Ok(())
}

#[tokio::test]
async fn mint_returns_only_after_confirmation() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let deployments = FileDeploymentStore::new("sepolia", dir.path());
    deployments.save(RANDOM_NFT, &deployed_nft())?;
    let chain = FakeChain::new(SEPOLIA).holding_mints();

    let mint = mint_nft(&chain, &deployments);
    tokio::pin!(mint);
    assert!(
        tokio::time::timeout(Duration::from_millis(50), &mut mint)
            .await
            .is_err(),
        "mint finished before the transaction was confirmed"
    );
    assert_eq!(chain.calls().len(), 1);

    chain.confirm_mint();
    mint.await?;
    assert_eq!(chain.calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn mint_without_deployment_sends_nothing() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let deployments = FileDeploymentStore::new("localhost", dir.path());
    let chain = FakeChain::new(31337);

    let err = mint_nft(&chain, &deployments).await.unwrap_err();

    assert!(matches!(err, Error::DeploymentNotFound { ref name, .. } if name == RANDOM_NFT));
    assert!(chain.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn mint_exit_status_is_one_on_failure_and_zero_on_success() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let deployments = FileDeploymentStore::new("sepolia", dir.path());
    let chain = FakeChain::new(SEPOLIA);

    assert_eq!(exit_status(mint_nft(&chain, &deployments).await), 1);
    assert!(chain.calls().is_empty());

    deployments.save(RANDOM_NFT, &deployed_nft())?;
    assert_eq!(exit_status(mint_nft(&chain, &deployments).await), 0);
    assert_eq!(chain.calls().len(), 1);
    Ok(())
}

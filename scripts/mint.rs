use helpers::{
    contracts::{MINT_FEE, RANDOM_NFT},
    ChainClient, DeploymentStore, MintReceipt, Result,
};
use tracing::{error, info};

/// Pays [`MINT_FEE`] into `requestNft` on the deployed RandomNFT and waits
/// for the transaction to be mined.
pub async fn mint_nft<C, S>(client: &C, deployments: &S) -> Result<MintReceipt>
where
    C: ChainClient,
    S: DeploymentStore,
{
    let nft = deployments.get(RANDOM_NFT)?;
    info!("Got contract {RANDOM_NFT} at {}", nft.address);

    info!("Minting NFT...");
    let receipt = client.request_nft(nft.address, MINT_FEE).await?;
    match receipt.request_id {
        Some(request_id) => info!(tx = %receipt.outcome.tx_hash, %request_id, "Minted!"),
        None => info!(tx = %receipt.outcome.tx_hash, "Minted!"),
    }

    Ok(receipt)
}

/// Process exit status for a script outcome: 0 on success, 1 after logging
/// the error.
pub fn exit_status<T>(result: Result<T>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            error!("{e}");
            1
        }
    }
}

//! Typed chain access used by the procedures.
//!
//! [`ChainClient`] is the seam between the procedures and the network: the
//! scripts run against [`EvmClient`], the tests against an in-memory fake.

use alloy::{
    network::{Ethereum, ReceiptResponse, TransactionBuilder},
    primitives::{aliases::U96, Address, Bytes, TxHash, U256},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
};
use tracing::{debug, info};

use crate::{
    contracts::{RandomNFT, VRFCoordinatorV2Mock},
    error::{Error, Result},
    network::SubscriptionId,
};

/// A contract creation: bytecode plus ABI-encoded constructor arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub contract: String,
    pub bytecode: Bytes,
    pub constructor_args: Bytes,
}

impl DeployRequest {
    pub fn creation_code(&self) -> Bytes {
        [self.bytecode.as_ref(), self.constructor_args.as_ref()]
            .concat()
            .into()
    }
}

/// What the caller needs from a confirmed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub outcome: TxOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintReceipt {
    pub outcome: TxOutcome,
    /// Oracle request id from the `NftRequested` log, when emitted.
    pub request_id: Option<U256>,
}

/// Chain operations the procedures perform. Every transaction-sending method
/// returns only once the transaction is confirmed.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    async fn chain_id(&self) -> Result<u64>;

    /// Account that signs and pays for every transaction.
    fn deployer(&self) -> Address;

    async fn deploy(&self, request: &DeployRequest) -> Result<DeployedContract>;

    async fn create_subscription(&self, coordinator: Address) -> Result<SubscriptionId>;

    async fn fund_subscription(
        &self,
        coordinator: Address,
        subscription_id: SubscriptionId,
        amount: U96,
    ) -> Result<TxOutcome>;

    async fn add_consumer(
        &self,
        coordinator: Address,
        subscription_id: SubscriptionId,
        consumer: Address,
    ) -> Result<TxOutcome>;

    async fn request_nft(&self, nft: Address, value: U256) -> Result<MintReceipt>;
}

/// [`ChainClient`] over JSON-RPC with a local signing key.
#[derive(Clone)]
pub struct EvmClient {
    provider: DynProvider,
    deployer: Address,
    confirmations: u64,
}

impl EvmClient {
    pub async fn connect(rpc_url: &str, private_key: &str, confirmations: u64) -> Result<Self> {
        let signer: PrivateKeySigner = private_key.parse()?;
        let deployer = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect(rpc_url)
            .await?
            .erased();

        Ok(Self {
            provider,
            deployer,
            confirmations: confirmations.max(1),
        })
    }

    async fn confirm(
        &self,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> Result<TransactionReceipt> {
        let tx_hash = *pending.tx_hash();
        debug!(tx = %tx_hash, confirmations = self.confirmations, "Waiting for receipt");
        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(Error::Reverted(tx_hash));
        }
        Ok(receipt)
    }
}

fn outcome(receipt: &TransactionReceipt) -> TxOutcome {
    TxOutcome {
        tx_hash: receipt.transaction_hash(),
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
    }
}

impl ChainClient for EvmClient {
    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    fn deployer(&self) -> Address {
        self.deployer
    }

    async fn deploy(&self, request: &DeployRequest) -> Result<DeployedContract> {
        let tx = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(request.creation_code());
        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        info!("deploying \"{}\" (tx: {})...", request.contract, tx_hash);

        let receipt = self.confirm(pending).await?;
        let address = receipt.contract_address().ok_or(Error::MissingReceiptData {
            tx: tx_hash,
            what: "contract address",
        })?;
        let outcome = outcome(&receipt);
        info!(
            "deployed \"{}\" at {} with {} gas",
            request.contract, address, outcome.gas_used
        );

        Ok(DeployedContract { address, outcome })
    }

    async fn create_subscription(&self, coordinator: Address) -> Result<SubscriptionId> {
        let mock = VRFCoordinatorV2Mock::new(coordinator, self.provider.clone());
        let pending = mock.createSubscription().send().await?;
        let receipt = self.confirm(pending).await?;

        receipt
            .inner
            .logs()
            .iter()
            .find_map(|log| {
                log.log_decode::<VRFCoordinatorV2Mock::SubscriptionCreated>()
                    .ok()
            })
            .map(|log| SubscriptionId(log.inner.data.subId))
            .ok_or(Error::MissingReceiptData {
                tx: receipt.transaction_hash,
                what: "SubscriptionCreated event",
            })
    }

    async fn fund_subscription(
        &self,
        coordinator: Address,
        subscription_id: SubscriptionId,
        amount: U96,
    ) -> Result<TxOutcome> {
        let mock = VRFCoordinatorV2Mock::new(coordinator, self.provider.clone());
        let pending = mock
            .fundSubscription(subscription_id.get(), amount)
            .send()
            .await?;
        Ok(outcome(&self.confirm(pending).await?))
    }

    async fn add_consumer(
        &self,
        coordinator: Address,
        subscription_id: SubscriptionId,
        consumer: Address,
    ) -> Result<TxOutcome> {
        let mock = VRFCoordinatorV2Mock::new(coordinator, self.provider.clone());
        let pending = mock
            .addConsumer(subscription_id.get(), consumer)
            .send()
            .await?;
        Ok(outcome(&self.confirm(pending).await?))
    }

    async fn request_nft(&self, nft: Address, value: U256) -> Result<MintReceipt> {
        let contract = RandomNFT::new(nft, self.provider.clone());
        let pending = contract.requestNft().value(value).send().await?;
        let receipt = self.confirm(pending).await?;

        let request_id = receipt.inner.logs().iter().find_map(|log| {
            log.log_decode::<RandomNFT::NftRequested>()
                .ok()
                .map(|log| log.inner.data.requestId)
        });

        Ok(MintReceipt {
            outcome: outcome(&receipt),
            request_id,
        })
    }
}

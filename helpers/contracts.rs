//! Call bindings and constructor arguments for the project's contracts.

use alloy::{
    primitives::{aliases::U96, Address, Bytes, B256, U256},
    sol,
    sol_types::SolConstructor,
};

use crate::network::SubscriptionId;

pub const RANDOM_NFT: &str = "RandomNFT";
pub const VRF_COORDINATOR_V2_MOCK: &str = "VRFCoordinatorV2Mock";

/// 1000 LINK, used to fund a freshly created local subscription.
pub const FUND_AMOUNT: U96 = U96::from_limbs([0x35c9_adc5_dea0_0000, 0x36]);

/// 0.001 ether, the price of one `requestNft` call.
pub const MINT_FEE: U256 = U256::from_limbs([1_000_000_000_000_000, 0, 0, 0]);

/// Premium charged by the mock coordinator per request: 0.25 LINK.
pub const MOCK_BASE_FEE: U96 = U96::from_limbs([250_000_000_000_000_000, 0]);

/// LINK per gas charged by the mock coordinator.
pub const MOCK_GAS_PRICE_LINK: U96 = U96::from_limbs([1_000_000_000, 0]);

sol! {
    #[sol(rpc)]
    contract VRFCoordinatorV2Mock {
        constructor(uint96 baseFee, uint96 gasPriceLink);

        event SubscriptionCreated(uint64 indexed subId, address owner);

        function createSubscription() external returns (uint64 subId);
        function fundSubscription(uint64 subId, uint96 amount) external;
        function addConsumer(uint64 subId, address consumer) external;
    }

    #[sol(rpc)]
    contract RandomNFT {
        constructor(
            address vrfCoordinatorV2,
            uint64 subscriptionId,
            bytes32 gasLane,
            uint32 callbackGasLimit,
            string initBaseURI,
            string initNotRevealedUri
        );

        event NftRequested(uint256 indexed requestId, address requester);

        function requestNft() external payable returns (uint256 requestId);
    }
}

/// Constructor arguments of `RandomNFT`, in constructor order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomNftArgs {
    pub vrf_coordinator_v2: Address,
    pub subscription_id: SubscriptionId,
    pub gas_lane: B256,
    pub callback_gas_limit: u32,
    pub init_base_uri: String,
    pub init_not_revealed_uri: String,
}

impl RandomNftArgs {
    pub fn abi_encode(&self) -> Bytes {
        RandomNFT::constructorCall {
            vrfCoordinatorV2: self.vrf_coordinator_v2,
            subscriptionId: self.subscription_id.get(),
            gasLane: self.gas_lane,
            callbackGasLimit: self.callback_gas_limit,
            initBaseURI: self.init_base_uri.clone(),
            initNotRevealedUri: self.init_not_revealed_uri.clone(),
        }
        .abi_encode()
        .into()
    }

    /// Readable form stored alongside the deployment record.
    pub fn display(&self) -> Vec<String> {
        vec![
            self.vrf_coordinator_v2.to_string(),
            self.subscription_id.to_string(),
            self.gas_lane.to_string(),
            self.callback_gas_limit.to_string(),
            self.init_base_uri.clone(),
            self.init_not_revealed_uri.clone(),
        ]
    }
}

/// ABI-encoded constructor arguments of the coordinator mock.
pub fn coordinator_mock_args() -> Bytes {
    VRFCoordinatorV2Mock::constructorCall {
        baseFee: MOCK_BASE_FEE,
        gasPriceLink: MOCK_GAS_PRICE_LINK,
    }
    .abi_encode()
    .into()
}

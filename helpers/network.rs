//! Network table and chain target resolution.
//!
//! The table is static configuration keyed by chain id. A run resolves it once
//! into a [`ResolvedNetwork`], whose [`ChainTarget`] decides whether the oracle
//! is a local mock the procedures must drive or a live coordinator with a
//! pre-existing subscription.

use std::{collections::BTreeMap, fmt, path::Path};

use alloy::primitives::{address, b256, Address, B256};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Chain id of the local development node.
pub const LOCAL_CHAIN_ID: u64 = 31337;

/// Network names that never get source verification.
pub const DEVELOPMENT_CHAINS: &[&str] = &["hardhat", "localhost"];

/// Any key hash works against the coordinator mock.
const LOCAL_GAS_LANE: B256 =
    b256!("0x787d74caea10b2b357790d5b5247c2f63d1d91572a9846f780606e4d953677ae");

/// 150 gwei key hash registered on the Sepolia VRF v2 coordinator.
const SEPOLIA_V2_GAS_LANE: B256 =
    b256!("0x474e34a077df58807dbe9c96d3c009b23b3c6d0cce433e59bbf5b34f823bc56c");

const DEFAULT_CALLBACK_GAS_LIMIT: u32 = 500_000;

/// Identifier of a VRF subscription on a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub u64);

impl SubscriptionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Oracle and gas parameters for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEntry {
    pub chain_id: u64,
    pub name: String,
    #[serde(default)]
    pub vrf_coordinator_v2: Option<Address>,
    #[serde(default)]
    pub subscription_id: Option<SubscriptionId>,
    pub gas_lane: B256,
    pub callback_gas_limit: u32,
}

/// Read-only map from chain id to [`NetworkEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTable {
    entries: BTreeMap<u64, NetworkEntry>,
}

impl NetworkTable {
    pub fn new(entries: impl IntoIterator<Item = NetworkEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.chain_id, e)).collect(),
        }
    }

    /// The table shipped with the project: the local node and Sepolia.
    pub fn builtin() -> Self {
        Self::new([
            NetworkEntry {
                chain_id: LOCAL_CHAIN_ID,
                name: "localhost".into(),
                vrf_coordinator_v2: None,
                subscription_id: None,
                gas_lane: LOCAL_GAS_LANE,
                callback_gas_limit: DEFAULT_CALLBACK_GAS_LIMIT,
            },
            NetworkEntry {
                chain_id: 11_155_111,
                name: "sepolia".into(),
                vrf_coordinator_v2: Some(address!("0x8103B0A8A00be2DDC778e6e7eaa21791Cd364625")),
                subscription_id: Some(SubscriptionId(1002)),
                gas_lane: SEPOLIA_V2_GAS_LANE,
                callback_gas_limit: DEFAULT_CALLBACK_GAS_LIMIT,
            },
        ])
    }

    /// Loads a table from a JSON array of entries.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<NetworkEntry> = serde_json::from_str(&raw)?;
        Ok(Self::new(entries))
    }

    pub fn get(&self, chain_id: u64) -> Option<&NetworkEntry> {
        self.entries.get(&chain_id)
    }
}

impl Default for NetworkTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A live coordinator and the subscription the contract will draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteOracle {
    pub coordinator: Address,
    pub subscription_id: SubscriptionId,
}

/// Where randomness comes from on the target chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainTarget {
    /// Local node: the coordinator is a mock and the subscription is created on the fly.
    Local,
    Remote(RemoteOracle),
}

impl ChainTarget {
    pub fn is_local(&self) -> bool {
        matches!(self, ChainTarget::Local)
    }
}

/// Everything a procedure needs to know about the network it runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNetwork {
    pub name: String,
    pub chain_id: u64,
    pub entry: NetworkEntry,
    pub target: ChainTarget,
}

impl ResolvedNetwork {
    /// Resolves `chain_id` against `table`. `name` is the configured network
    /// name, which may differ from the entry's (e.g. `hardhat` vs `localhost`).
    pub fn resolve(name: &str, chain_id: u64, table: &NetworkTable) -> Result<Self> {
        let entry = table.get(chain_id).cloned().ok_or(Error::UnknownChain(chain_id))?;

        let target = if chain_id == LOCAL_CHAIN_ID {
            ChainTarget::Local
        } else {
            let coordinator = entry.vrf_coordinator_v2.ok_or_else(|| Error::IncompleteNetwork {
                name: entry.name.clone(),
                chain_id,
                field: "vrfCoordinatorV2",
            })?;
            let subscription_id = entry.subscription_id.ok_or_else(|| Error::IncompleteNetwork {
                name: entry.name.clone(),
                chain_id,
                field: "subscriptionId",
            })?;
            ChainTarget::Remote(RemoteOracle {
                coordinator,
                subscription_id,
            })
        };

        Ok(Self {
            name: name.to_string(),
            chain_id,
            entry,
            target,
        })
    }

    pub fn is_development(&self) -> bool {
        DEVELOPMENT_CHAINS.contains(&self.name.as_str())
    }
}

use std::collections::BTreeMap;
use std::str::FromStr;

use alloy_primitives::Address;
use thiserror::Error;

/// Name of the funding contract, as known to the compiler output.
pub const FUND_ME_CONTRACT: &str = "FundMe";

/// Name of the mock price-feed aggregator deployed on development chains.
pub const MOCK_AGGREGATOR_CONTRACT: &str = "MockV3Aggregator";

/// Decimals reported by the mock aggregator.
pub const MOCK_DECIMALS: u8 = 8;

/// Initial answer of the mock aggregator: 2000 USD per ETH at 8 decimals.
pub const MOCK_INITIAL_ANSWER: u64 = 200_000_000_000;

/// Confirmations to wait for when the network config does not override them.
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

/// Chain id shared by all local development nodes (anvil, hardhat).
pub const DEVELOPMENT_CHAIN_ID: u64 = 31337;

/// Network names treated as local development chains.
pub const DEVELOPMENT_CHAINS: [&str; 3] = ["anvil", "hardhat", "localhost"];

pub mod eth_usd_feeds {
    //! Chainlink ETH/USD aggregator addresses.
    //! https://docs.chain.link/data-feeds/price-feeds/addresses
    use hex_literal::hex;

    pub const MAINNET: [u8; 20] = hex!("5f4eC3Df9cbd43714FE2740f5E3616155c5b8419");
    pub const SEPOLIA: [u8; 20] = hex!("694AA1769357215DE4FAC081bf1f309aDC325306");
    pub const POLYGON: [u8; 20] = hex!("F9680D99D6C9589e2a93a78A04A279e509205945");
}

/// Per-network deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub eth_usd_price_feed: Address,
    /// Override for the confirmation wait; [`DEFAULT_CONFIRMATIONS`] when absent.
    pub block_confirmations: Option<u64>,
}

pub trait NetworkInfo {
    fn as_str(&self) -> String;
    fn chain_id(&self) -> u64;
    fn is_development(&self) -> bool;
}

/// Live networks with a real Chainlink price feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Sepolia,
    Polygon,
}

impl NetworkInfo for Network {
    fn as_str(&self) -> String {
        let val = match self {
            Self::Mainnet => "mainnet",
            Self::Sepolia => "sepolia",
            Self::Polygon => "polygon",
        };
        val.to_owned()
    }

    fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Sepolia => 11155111,
            Self::Polygon => 137,
        }
    }

    fn is_development(&self) -> bool {
        false
    }
}

/// Local development chains, served by locally deployed mocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevChain {
    Anvil,
    Hardhat,
    Localhost,
}

impl DevChain {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Anvil => "anvil",
            Self::Hardhat => "hardhat",
            Self::Localhost => "localhost",
        }
    }
}

/// A deployment target: either a local development chain or a live network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrappedNetwork {
    Dev(DevChain),
    Id(Network),
}

impl NetworkInfo for WrappedNetwork {
    fn as_str(&self) -> String {
        match self {
            Self::Dev(chain) => chain.as_str().to_owned(),
            Self::Id(network) => network.as_str(),
        }
    }

    fn chain_id(&self) -> u64 {
        match self {
            Self::Dev(_) => DEVELOPMENT_CHAIN_ID,
            Self::Id(network) => network.chain_id(),
        }
    }

    fn is_development(&self) -> bool {
        matches!(self, Self::Dev(_))
    }
}

#[derive(Debug, Error)]
#[error("Unknown network {0}")]
pub struct NetworkParseError(String);

impl FromStr for WrappedNetwork {
    type Err = NetworkParseError;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        let network = match val.to_lowercase().as_str() {
            "mainnet" => Self::Id(Network::Mainnet),
            "sepolia" => Self::Id(Network::Sepolia),
            "polygon" => Self::Id(Network::Polygon),
            "anvil" => Self::Dev(DevChain::Anvil),
            "hardhat" => Self::Dev(DevChain::Hardhat),
            "localhost" => Self::Dev(DevChain::Localhost),
            _ => return Err(NetworkParseError(val.to_owned())),
        };
        Ok(network)
    }
}

/// Registry of per-network configuration, keyed by chain id.
///
/// Built once at process start and read-only afterwards. [`Default`] carries
/// the known live networks; tests inject their own fixtures.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    configs: BTreeMap<u64, NetworkConfig>,
}

impl NetworkRegistry {
    pub fn new(configs: BTreeMap<u64, NetworkConfig>) -> Self {
        Self { configs }
    }

    pub fn lookup(&self, chain_id: u64) -> Option<&NetworkConfig> {
        self.configs.get(&chain_id)
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        let configs = BTreeMap::from([
            (
                1,
                NetworkConfig {
                    chain_id: 1,
                    eth_usd_price_feed: Address::from(eth_usd_feeds::MAINNET),
                    block_confirmations: Some(6),
                },
            ),
            (
                11155111,
                NetworkConfig {
                    chain_id: 11155111,
                    eth_usd_price_feed: Address::from(eth_usd_feeds::SEPOLIA),
                    block_confirmations: Some(6),
                },
            ),
            (
                137,
                NetworkConfig {
                    chain_id: 137,
                    eth_usd_price_feed: Address::from(eth_usd_feeds::POLYGON),
                    block_confirmations: None,
                },
            ),
        ]);
        Self { configs }
    }
}

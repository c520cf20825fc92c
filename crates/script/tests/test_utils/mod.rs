#![allow(dead_code)]
use std::collections::BTreeMap;
use std::sync::Mutex;

use alloy_primitives::{Address, TxHash};
use fund_me_scripts::consts::{DevChain, Network, NetworkConfig, NetworkRegistry, WrappedNetwork};
use fund_me_scripts::deployer::{DeployOptions, Deployer, DeploymentRecord, Error as DeployerError};
use fund_me_scripts::verify::{Error as VerifyError, Verifier};

pub const MOCK_FEED: Address = Address::repeat_byte(0x0c);
pub const SEPOLIA_FEED: Address = Address::repeat_byte(0xfe);
pub const DEPLOYED_AT: Address = Address::repeat_byte(0xf1);
pub const DEPLOYER_ADDRESS: Address = Address::repeat_byte(0xde);

pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

pub fn dev_network() -> WrappedNetwork {
    WrappedNetwork::Dev(DevChain::Hardhat)
}

pub fn live_network() -> WrappedNetwork {
    WrappedNetwork::Id(Network::Sepolia)
}

pub fn empty_registry() -> NetworkRegistry {
    NetworkRegistry::new(BTreeMap::new())
}

pub fn sepolia_registry(feed: Address, block_confirmations: Option<u64>) -> NetworkRegistry {
    NetworkRegistry::new(BTreeMap::from([(
        SEPOLIA_CHAIN_ID,
        NetworkConfig {
            chain_id: SEPOLIA_CHAIN_ID,
            eth_usd_price_feed: feed,
            block_confirmations,
        },
    )]))
}

/// Deployer double: records every call, serves prior deployments from a
/// fixed list, and reports all deployments at [`DEPLOYED_AT`].
#[derive(Default)]
pub struct FakeDeployer {
    prior: Vec<(String, DeploymentRecord)>,
    deploys: Mutex<Vec<(String, DeployOptions)>>,
    gets: Mutex<Vec<String>>,
}

impl FakeDeployer {
    pub fn with_prior(mut self, name: &str, address: Address) -> Self {
        self.prior.push((
            name.to_owned(),
            DeploymentRecord {
                address,
                tx_hash: Some(TxHash::repeat_byte(0xaa)),
            },
        ));
        self
    }

    pub fn recorded_deploys(&self) -> Vec<(String, DeployOptions)> {
        self.deploys.lock().unwrap().clone()
    }

    pub fn recorded_gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }
}

impl Deployer for FakeDeployer {
    async fn deploy(&self, name: &str, options: &DeployOptions) -> Result<DeploymentRecord, DeployerError> {
        self.deploys.lock().unwrap().push((name.to_owned(), options.clone()));
        Ok(DeploymentRecord {
            address: DEPLOYED_AT,
            tx_hash: Some(TxHash::repeat_byte(0x11)),
        })
    }

    async fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, DeployerError> {
        self.gets.lock().unwrap().push(name.to_owned());
        Ok(self
            .prior
            .iter()
            .find(|(prior_name, _)| prior_name == name)
            .map(|(_, record)| record.clone()))
    }
}

/// Verifier double: records every call, optionally failing each one.
#[derive(Default)]
pub struct FakeVerifier {
    pub fail: bool,
    calls: Mutex<Vec<(String, Address, Vec<u8>)>>,
}

impl FakeVerifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn recorded_calls(&self) -> Vec<(String, Address, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Verifier for FakeVerifier {
    async fn verify(&self, contract: &str, address: Address, constructor_args: &[u8]) -> Result<(), VerifyError> {
        self.calls
            .lock()
            .unwrap()
            .push((contract.to_owned(), address, constructor_args.to_vec()));
        if self.fail {
            Err(VerifyError::Command(std::io::Error::other("explorer unreachable")))
        } else {
            Ok(())
        }
    }
}

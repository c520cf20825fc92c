use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use alloy::network::{Ethereum, TransactionBuilder};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy_primitives::{Address, Bytes, TxHash};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils;

/// Named account under which deployments are sent.
pub const DEPLOYER_ACCOUNT: &str = "deployer";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read artifact for {contract}: {source}")]
    ArtifactRead {
        contract: String,
        #[source]
        source: utils::Error,
    },

    #[error("Artifact for {contract} has no deployable bytecode")]
    ArtifactBytecode { contract: String },

    #[error("Failed to submit deployment transaction: {0:#?}")]
    TransactionSubmission(alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error("Transaction error: {0:#?}")]
    Transaction(#[from] alloy::providers::PendingTransactionError),

    #[error("Deployment transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },

    #[error("Deployment transaction {tx_hash} produced no contract address")]
    NoContractAddress { tx_hash: TxHash },

    #[error("Failed to read deployments registry: {0}")]
    RegistryRead(utils::Error),

    #[error("Failed to write deployments registry: {0}")]
    RegistryWrite(utils::Error),

    #[error("Unknown account {0}")]
    UnknownAccount(String),
}

/// Resolves named accounts to sender addresses.
pub trait AccountProvider {
    fn resolve(&self, name: &str) -> Result<Address, Error>;
}

/// Account provider backed by the signer attached to the RPC provider.
pub struct SignerAccounts {
    deployer: Address,
}

impl SignerAccounts {
    pub fn new(deployer: Address) -> Self {
        Self { deployer }
    }
}

impl AccountProvider for SignerAccounts {
    fn resolve(&self, name: &str) -> Result<Address, Error> {
        if name == DEPLOYER_ACCOUNT {
            Ok(self.deployer)
        } else {
            Err(Error::UnknownAccount(name.to_owned()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    pub from: Address,
    /// ABI-encoded constructor arguments, appended to the creation code.
    pub constructor_args: Vec<u8>,
    pub confirmations: u64,
}

/// A completed deployment, as recorded in the deployments registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub address: Address,
    pub tx_hash: Option<TxHash>,
}

/// Capability to deploy contracts and look up prior deployments.
pub trait Deployer {
    async fn deploy(&self, name: &str, options: &DeployOptions) -> Result<DeploymentRecord, Error>;
    async fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, Error>;
}

#[derive(Deserialize)]
struct ForgeArtifact {
    bytecode: ArtifactBytecode,
}

#[derive(Deserialize)]
struct ArtifactBytecode {
    object: String,
}

/// Reads the creation bytecode from a forge output artifact
/// (`<artifacts_dir>/<Name>.sol/<Name>.json`).
fn load_creation_code(artifacts_dir: &Path, contract: &str) -> Result<Vec<u8>, Error> {
    let path = artifacts_dir
        .join(format!("{contract}.sol"))
        .join(format!("{contract}.json"));
    let artifact: ForgeArtifact = utils::read_json(&path).map_err(|e| Error::ArtifactRead {
        contract: contract.to_owned(),
        source: e,
    })?;

    let object = artifact.bytecode.object.trim_start_matches("0x");
    if object.is_empty() {
        return Err(Error::ArtifactBytecode {
            contract: contract.to_owned(),
        });
    }
    hex::decode(object).map_err(|_e| Error::ArtifactBytecode {
        contract: contract.to_owned(),
    })
}

/// Deployment executor submitting create transactions through an alloy
/// provider and recording results in a per-network registry file.
pub struct EthDeployer<P>
where
    P: Provider<Ethereum> + Clone,
{
    provider: Arc<P>,
    artifacts_dir: PathBuf,
    deployments_file: PathBuf,
}

impl<P> EthDeployer<P>
where
    P: Provider<Ethereum> + Clone,
{
    pub fn new(provider: Arc<P>, artifacts_dir: PathBuf, deployments_file: PathBuf) -> Self {
        Self {
            provider,
            artifacts_dir,
            deployments_file,
        }
    }

    fn read_registry(&self) -> Result<BTreeMap<String, DeploymentRecord>, Error> {
        if !self.deployments_file.exists() {
            return Ok(BTreeMap::new());
        }
        utils::read_json(&self.deployments_file).map_err(Error::RegistryRead)
    }

    fn record(&self, name: &str, record: &DeploymentRecord) -> Result<(), Error> {
        let mut registry = self.read_registry()?;
        registry.insert(name.to_owned(), record.clone());
        utils::write_json(&self.deployments_file, &registry).map_err(Error::RegistryWrite)
    }
}

impl<P> Deployer for EthDeployer<P>
where
    P: Provider<Ethereum> + Clone,
{
    async fn deploy(&self, name: &str, options: &DeployOptions) -> Result<DeploymentRecord, Error> {
        let mut code = load_creation_code(&self.artifacts_dir, name)?;
        code.extend_from_slice(&options.constructor_args);

        tracing::info!(contract = name, from = %options.from, "Deploying contract");
        let tx = TransactionRequest::default()
            .with_from(options.from)
            .with_deploy_code(Bytes::from(code));

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(Error::TransactionSubmission)?;
        let tx_hash = *pending.tx_hash();

        tracing::debug!(
            contract = name,
            tx_hash = %tx_hash,
            confirmations = options.confirmations,
            "Waiting for deployment transaction"
        );
        let receipt = pending
            .with_required_confirmations(options.confirmations)
            .get_receipt()
            .await
            .inspect_err(|err| tracing::error!(contract = name, "Deployment transaction failed {err:?}"))?;

        if !receipt.status() {
            tracing::error!(contract = name, tx_hash = %tx_hash, "Deployment transaction reverted");
            return Err(Error::Reverted { tx_hash });
        }
        let address = receipt.contract_address.ok_or(Error::NoContractAddress { tx_hash })?;

        let record = DeploymentRecord {
            address,
            tx_hash: Some(tx_hash),
        };
        self.record(name, &record)?;
        tracing::info!(contract = name, address = %address, "Contract deployed");
        Ok(record)
    }

    async fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, Error> {
        let registry = self.read_registry()?;
        Ok(registry.get(name).cloned())
    }
}

use alloy_primitives::Address;
use alloy_sol_types::SolValue;

use crate::consts::{
    NetworkInfo, NetworkRegistry, WrappedNetwork, DEFAULT_CONFIRMATIONS, FUND_ME_CONTRACT, MOCK_AGGREGATOR_CONTRACT,
};
use crate::deployer::{self, AccountProvider, DeployOptions, Deployer, DeploymentRecord, DEPLOYER_ACCOUNT};
use crate::scripts::prelude::ScriptRuntime;
use crate::scripts::SEPARATOR;
use crate::verify::Verifier;

/// Selection labels advertised to the host runner.
pub const TAGS: &[&str] = &["all", "fundme"];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No price feed configured for chain id {chain_id}")]
    UnsupportedNetwork { chain_id: u64 },

    #[error("No {0} deployment found; deploy mocks first on a development chain")]
    MockNotDeployed(&'static str),

    #[error(transparent)]
    Deployer(#[from] deployer::Error),
}

/// The price feed chosen for the target network, together with the
/// confirmation wait that applies there.
pub struct ResolvedFeed {
    pub address: Address,
    pub confirmations: u64,
}

/// Picks the ETH/USD feed for the target network: the previously deployed
/// mock on development chains, the configured Chainlink feed otherwise.
/// Exactly one of the two sources is consulted.
pub async fn resolve_price_feed(
    network: &WrappedNetwork,
    registry: &NetworkRegistry,
    deployer: &impl Deployer,
) -> Result<ResolvedFeed, Error> {
    match network {
        WrappedNetwork::Dev(_) => {
            let mock = deployer
                .get(MOCK_AGGREGATOR_CONTRACT)
                .await?
                .ok_or(Error::MockNotDeployed(MOCK_AGGREGATOR_CONTRACT))?;
            tracing::debug!(address = %mock.address, "Using locally deployed mock price feed");
            Ok(ResolvedFeed {
                address: mock.address,
                confirmations: DEFAULT_CONFIRMATIONS,
            })
        }
        WrappedNetwork::Id(_) => {
            let chain_id = network.chain_id();
            let config = registry.lookup(chain_id).ok_or(Error::UnsupportedNetwork { chain_id })?;
            Ok(ResolvedFeed {
                address: config.eth_usd_price_feed,
                confirmations: config.block_confirmations.unwrap_or(DEFAULT_CONFIRMATIONS),
            })
        }
    }
}

pub async fn run(runtime: &ScriptRuntime) -> Result<DeploymentRecord, Error> {
    deploy_and_verify(
        &runtime.network,
        &runtime.network_registry,
        &runtime.accounts,
        &runtime.deployer,
        runtime.verifier.as_ref(),
    )
    .await
}

/// Deploys FundMe wired to the resolved price feed and, when the host
/// injected a verifier, submits the deployment for source verification.
pub async fn deploy_and_verify(
    network: &WrappedNetwork,
    registry: &NetworkRegistry,
    accounts: &impl AccountProvider,
    deployer: &impl Deployer,
    verifier: Option<&impl Verifier>,
) -> Result<DeploymentRecord, Error> {
    let feed = resolve_price_feed(network, registry, deployer).await?;
    tracing::info!(
        network = network.as_str(),
        price_feed = %feed.address,
        "Resolved ETH/USD price feed"
    );

    // Encoded once, so deployment and verification always see the same args.
    let constructor_args = feed.address.abi_encode();

    let options = DeployOptions {
        from: accounts.resolve(DEPLOYER_ACCOUNT)?,
        constructor_args: constructor_args.clone(),
        confirmations: feed.confirmations,
    };
    let deployed = deployer.deploy(FUND_ME_CONTRACT, &options).await?;

    match verifier {
        Some(verifier) if !network.is_development() => {
            if let Err(err) = verifier.verify(FUND_ME_CONTRACT, deployed.address, &constructor_args).await {
                // The contract is live at this point; a failed verification
                // submission does not undo the deployment.
                tracing::warn!(error = ?err, "Source verification failed, continuing");
            }
        }
        _ => {}
    }

    tracing::info!("{SEPARATOR}");
    Ok(deployed)
}

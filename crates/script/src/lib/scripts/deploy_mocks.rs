use alloy_primitives::{I256, U256};
use alloy_sol_types::SolValue;

use crate::consts::{
    NetworkInfo, WrappedNetwork, DEFAULT_CONFIRMATIONS, MOCK_AGGREGATOR_CONTRACT, MOCK_DECIMALS, MOCK_INITIAL_ANSWER,
};
use crate::deployer::{self, AccountProvider, DeployOptions, Deployer, DeploymentRecord, DEPLOYER_ACCOUNT};
use crate::scripts::prelude::ScriptRuntime;
use crate::scripts::SEPARATOR;

/// Selection labels advertised to the host runner.
pub const TAGS: &[&str] = &["all", "mocks"];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Deployer(#[from] deployer::Error),
}

pub async fn run(runtime: &ScriptRuntime) -> Result<Option<DeploymentRecord>, Error> {
    deploy_mocks(&runtime.network, &runtime.accounts, &runtime.deployer).await
}

/// Deploys the MockV3Aggregator price feed on development chains; a no-op on
/// live networks, where the real Chainlink feed is used instead.
pub async fn deploy_mocks(
    network: &WrappedNetwork,
    accounts: &impl AccountProvider,
    deployer: &impl Deployer,
) -> Result<Option<DeploymentRecord>, Error> {
    if !network.is_development() {
        tracing::info!(network = network.as_str(), "Live network, mocks are not needed");
        return Ok(None);
    }

    tracing::info!("Local network detected, deploying mocks");
    // Constructor of MockV3Aggregator: (uint8 _decimals, int256 _initialAnswer).
    let initial_answer = I256::from_raw(U256::from(MOCK_INITIAL_ANSWER));
    let constructor_args = (MOCK_DECIMALS, initial_answer).abi_encode_params();

    let options = DeployOptions {
        from: accounts.resolve(DEPLOYER_ACCOUNT)?,
        constructor_args,
        confirmations: DEFAULT_CONFIRMATIONS,
    };
    let deployed = deployer.deploy(MOCK_AGGREGATOR_CONTRACT, &options).await?;

    tracing::info!("Mocks deployed");
    tracing::info!("{SEPARATOR}");
    Ok(Some(deployed))
}

use std::path::PathBuf;
use std::sync::Arc;

use alloy::providers::WalletProvider;
use alloy::transports::http::reqwest::Url;
use thiserror::Error;

use crate::consts::{self, NetworkInfo, NetworkRegistry, WrappedNetwork};
use crate::deployer::{EthDeployer, SignerAccounts};
use crate::eth_client::{DefaultProvider, ProviderError, ProviderFactory};
use crate::verify::ForgeVerifier;

const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";
const DEFAULT_ARTIFACTS_DIR: &str = "contracts/out";
const DEFAULT_CONTRACTS_DIR: &str = "contracts";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read network from env var: {0:?}")]
    FailedToParseNetwork(#[from] consts::NetworkParseError),

    #[error("Failed to parse URL from env var {0}")]
    FailedToParseUrl(&'static str),

    #[error("Failed to initialize provider: {0:?}")]
    ProviderInitialization(#[from] ProviderError),
}

pub mod env_vars {
    use std::env;
    use std::fmt::Debug;

    #[derive(Clone)]
    pub struct EnvVarValue<TVal> {
        pub name: &'static str,
        pub sensitive: bool,
        pub value: TVal,
    }

    impl<TVal: Debug> Debug for EnvVarValue<TVal> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let value_print = if self.sensitive {
                "***".to_string()
            } else {
                format!("{:?}", self.value)
            };
            f.debug_struct("EnvVarValue")
                .field("name", &self.name)
                .field("value", &value_print)
                .finish()
        }
    }

    /// Snapshot of the environment the deploy scripts read, taken once at
    /// process start.
    #[derive(Debug, Clone)]
    pub struct EnvVars {
        pub evm_chain: EnvVarValue<String>,
        pub execution_layer_rpc: EnvVarValue<String>,
        pub deployments_file: EnvVarValue<Option<String>>,
        pub artifacts_dir: EnvVarValue<Option<String>>,
        pub contracts_dir: EnvVarValue<Option<String>>,
        // sensitive
        pub etherscan_api_key: EnvVarValue<Option<String>>,
        pub private_key: EnvVarValue<String>,
    }

    impl EnvVars {
        fn optional(key: &'static str, sensitive: bool) -> EnvVarValue<Option<String>> {
            let value = match env::var(key) {
                Ok(value) => Some(value),
                Err(_) => None,
            };
            EnvVarValue {
                name: key,
                sensitive,
                value,
            }
        }

        fn required(key: &'static str, sensitive: bool) -> EnvVarValue<String> {
            let value = env::var(key).unwrap_or_else(|e| panic!("Failed to read env var {key}: {e:?}"));
            EnvVarValue {
                name: key,
                sensitive,
                value,
            }
        }

        pub fn init_from_env() -> Self {
            Self {
                evm_chain: Self::required("EVM_CHAIN", false),
                execution_layer_rpc: Self::required("EXECUTION_LAYER_RPC", true),
                deployments_file: Self::optional("DEPLOYMENTS_FILE", false),
                artifacts_dir: Self::optional("ARTIFACTS_DIR", false),
                contracts_dir: Self::optional("CONTRACTS_DIR", false),
                etherscan_api_key: Self::optional("ETHERSCAN_API_KEY", true),
                private_key: Self::required("PRIVATE_KEY", true),
            }
        }
    }

}

/// The verification guard, computed once per run by the host: verification
/// applies only on live networks and only when an explorer credential is
/// configured (non-empty).
pub fn verification_enabled(network: &impl NetworkInfo, etherscan_api_key: Option<&str>) -> bool {
    !network.is_development() && etherscan_api_key.is_some_and(|key| !key.is_empty())
}

/// Concrete capabilities wired together for a deployment run.
pub struct ScriptRuntime {
    pub network: WrappedNetwork,
    pub network_registry: NetworkRegistry,
    pub provider: Arc<DefaultProvider>,
    pub deployer: EthDeployer<DefaultProvider>,
    pub accounts: SignerAccounts,
    pub verifier: Option<ForgeVerifier>,
    pub env_vars: Option<env_vars::EnvVars>,
}

impl ScriptRuntime {
    pub fn init(env_vars: env_vars::EnvVars) -> Result<Self, Error> {
        let network: WrappedNetwork = env_vars.evm_chain.value.parse()?;
        let endpoint: Url = env_vars
            .execution_layer_rpc
            .value
            .parse()
            .map_err(|_e| Error::FailedToParseUrl(env_vars.execution_layer_rpc.name))?;
        let provider = Arc::new(ProviderFactory::create_provider_decode_key(
            &env_vars.private_key.value,
            endpoint,
        )?);

        let deployments_file = env_vars
            .deployments_file
            .value
            .clone()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEPLOYMENTS_DIR).join(format!("{}.json", network.as_str())));
        let artifacts_dir = PathBuf::from(
            env_vars
                .artifacts_dir
                .value
                .clone()
                .unwrap_or_else(|| DEFAULT_ARTIFACTS_DIR.to_owned()),
        );
        let contracts_dir = PathBuf::from(
            env_vars
                .contracts_dir
                .value
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTRACTS_DIR.to_owned()),
        );

        let deployer = EthDeployer::new(Arc::clone(&provider), artifacts_dir, deployments_file);
        let accounts = SignerAccounts::new(provider.default_signer_address());

        let verifier = match env_vars.etherscan_api_key.value.as_deref() {
            Some(key) if verification_enabled(&network, Some(key)) => Some(ForgeVerifier {
                contracts_dir,
                chain_id: network.chain_id(),
                api_key: key.to_owned(),
            }),
            _ => None,
        };

        Ok(Self {
            network,
            network_registry: NetworkRegistry::default(),
            provider,
            deployer,
            accounts,
            verifier,
            env_vars: Some(env_vars),
        })
    }

    pub fn init_from_env() -> Result<Self, Error> {
        let env_vars = env_vars::EnvVars::init_from_env();
        Self::init(env_vars)
    }

    pub fn network(&self) -> &impl NetworkInfo {
        &self.network
    }
}

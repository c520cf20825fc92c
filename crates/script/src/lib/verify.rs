use std::path::PathBuf;
use std::process::Command;

use alloy_primitives::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to run verification command: {0:#?}")]
    Command(#[from] std::io::Error),

    #[error("Verification command exited with {0}")]
    CommandFailed(std::process::ExitStatus),
}

/// Capability to submit a deployed contract for source verification on a
/// block-explorer service.
pub trait Verifier {
    async fn verify(&self, contract: &str, address: Address, constructor_args: &[u8]) -> Result<(), Error>;
}

/// Verifier shelling out to `forge verify-contract`.
///
/// The explorer credential is passed on the command line; construction is
/// expected to happen only once the host has decided verification applies.
pub struct ForgeVerifier {
    pub contracts_dir: PathBuf,
    pub chain_id: u64,
    pub api_key: String,
}

impl Verifier for ForgeVerifier {
    async fn verify(&self, contract: &str, address: Address, constructor_args: &[u8]) -> Result<(), Error> {
        tracing::info!(
            contract,
            address = %address,
            chain_id = self.chain_id,
            "Verifying contract source"
        );
        tracing::debug!("Contracts folder {:#?}", self.contracts_dir.as_os_str());

        let mut command = Command::new("forge");
        command
            .current_dir(&self.contracts_dir)
            .arg("verify-contract")
            .arg(address.to_string())
            .arg(contract)
            .args(["--chain-id", &self.chain_id.to_string()])
            .args(["--etherscan-api-key", &self.api_key])
            .args(["--constructor-args", &format!("0x{}", hex::encode(constructor_args))])
            .arg("--watch");

        let status = command.status()?;
        if !status.success() {
            return Err(Error::CommandFailed(status));
        }
        tracing::info!(contract, "Verified successfully");
        Ok(())
    }
}

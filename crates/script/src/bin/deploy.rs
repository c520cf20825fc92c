use clap::Parser;

use fund_me_scripts::consts::NetworkInfo;
use fund_me_scripts::scripts::{self, prelude::ScriptRuntime};
use fund_me_scripts::tracing::{setup_logger, LogFormat, LoggingConfig};
use fund_me_scripts::utils;

/*
Run variants:
* Deploy mocks and FundMe on a local node:
EVM_CHAIN=anvil cargo run --bin deploy

* Deploy FundMe only, against sepolia (verifies when ETHERSCAN_API_KEY is set):
EVM_CHAIN=sepolia cargo run --bin deploy -- --tags fundme
*/

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Selection labels of the deployment scripts to run
    #[clap(long, default_value = "all", value_delimiter = ',', num_args = 1..)]
    tags: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_format = utils::read_env("LOG_FORMAT", LogFormat::Plain);
    setup_logger(LoggingConfig::default().use_format(log_format));

    let runtime = ScriptRuntime::init_from_env()?;
    tracing::info!(
        network = runtime.network().as_str(),
        tags = ?args.tags,
        "Running deployment scripts"
    );

    if scripts::tags_match(scripts::deploy_mocks::TAGS, &args.tags) {
        if let Some(mock) = scripts::deploy_mocks::run(&runtime).await? {
            tracing::debug!(address = %mock.address, "Mock price feed available");
        }
    }
    if scripts::tags_match(scripts::deploy_fund_me::TAGS, &args.tags) {
        let deployed = scripts::deploy_fund_me::run(&runtime).await?;
        tracing::info!(address = %deployed.address, "FundMe is live");
    }

    Ok(())
}

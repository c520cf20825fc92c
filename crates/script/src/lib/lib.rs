pub mod consts;
pub mod deployer;
pub mod eth_client;
pub mod scripts;
pub mod tracing;
pub mod utils;
pub mod verify;

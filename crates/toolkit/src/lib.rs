pub mod config;
pub mod contracts;
pub mod errors;
pub mod finality;
pub mod poll;
pub mod rpc;
pub mod storage;
pub mod substrate;
pub mod token;
pub mod transfer;
pub mod xcm;

pub use config::{DevAccount, NetworkConfig};
pub use errors::{ConfigError, PollError, ToolkitError};
pub use finality::EthFinality;
pub use poll::{poll_until_ready, Poller};
pub use storage::AccountInfo;
pub use substrate::{RuntimeVersion, SubstrateChain, SubstrateHeader};
pub use token::{fetch_token_metadata, TokenMetadata};
pub use xcm::XcmMessage;

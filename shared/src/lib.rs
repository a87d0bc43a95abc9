pub mod balance;
pub mod coin;
pub mod crawler;
pub mod error;
pub mod log_config;
pub mod rpc;
pub mod snapshot;

pub mod registry;
pub mod resolver;
pub mod snapshot;
pub mod wallet;

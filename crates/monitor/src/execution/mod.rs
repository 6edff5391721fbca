pub mod chain_reader;
pub mod contracts;
pub mod reader;

pub use chain_reader::{HttpProvider, OnChainReader};
pub use reader::ContractReader;

//! ContractNL Core: the query result model plus its configuration and errors.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ContractNlConfig, PipelineConfig};
pub use error::{Error, Result};
pub use types::*;

//! API-contract adapters

pub mod openapi;

pub use openapi::{OpenApiContractReader, parse_contract};

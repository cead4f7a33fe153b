pub mod address;
pub mod builders;
pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod signer;
pub mod transaction;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};

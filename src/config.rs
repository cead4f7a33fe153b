use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	pub network: NetworkConfig,
	pub wallet: WalletConfig,
	pub contract: ContractConfig,
	pub gas: GasConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
	pub default: String,
	pub devnet_gateway: String,
	pub testnet_gateway: String,
	pub mainnet_gateway: String,
	pub gas_price: u64,
	/// How long to wait for a sent transaction to reach a final status.
	pub finality_timeout_secs: u64,
	pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
	/// PEM file holding the operator's key.
	pub pem: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
	/// Minter address used when the output record does not name one.
	pub address: Option<String>,
	/// JSON file that collects derived facts (token id, selling price).
	pub output: PathBuf,
}

/// Gas limits and fixed call values for every state-changing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasConfig {
	pub issue_token: u64,
	/// EGLD paid to the protocol for issuing the collection token.
	pub issue_token_value: String,
	pub assign_roles: u64,
	pub mint_base: u64,
	pub giveaway_base: u64,
	pub claim_sc_funds: u64,
	pub set_unset_drop: u64,
	pub pause_unpause: u64,
	pub set_new_price: u64,
	pub claim_dev_rewards: u64,
	pub shuffle: u64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			default: "devnet".into(),
			devnet_gateway: "https://devnet-gateway.multiversx.com".into(),
			testnet_gateway: "https://testnet-gateway.multiversx.com".into(),
			mainnet_gateway: "https://gateway.multiversx.com".into(),
			gas_price: 1_000_000_000,
			finality_timeout_secs: 180,
			poll_interval_secs: 6,
		}
	}
}

impl Default for WalletConfig {
	fn default() -> Self {
		Self { pem: PathBuf::from("walletKey.pem") }
	}
}

impl Default for ContractConfig {
	fn default() -> Self {
		Self {
			address: None,
			output: PathBuf::from("output.json"),
		}
	}
}

impl Default for GasConfig {
	fn default() -> Self {
		Self {
			issue_token: 60_000_000,
			issue_token_value: "0.05".into(),
			assign_roles: 60_000_000,
			mint_base: 14_000_000,
			giveaway_base: 14_000_000,
			claim_sc_funds: 6_000_000,
			set_unset_drop: 6_000_000,
			pause_unpause: 5_000_000,
			set_new_price: 5_000_000,
			claim_dev_rewards: 6_000_000,
			shuffle: 5_000_000,
		}
	}
}

impl Config {
	/// Directory where CLI state is stored (~/.nft-minter/).
	pub fn dir() -> Result<PathBuf> {
		dirs::home_dir()
			.map(|home| home.join(".nft-minter"))
			.ok_or_else(|| Error::Config("could not determine home directory".into()))
	}

	/// Path to the default config file.
	pub fn path() -> Result<PathBuf> {
		Ok(Self::dir()?.join("config.toml"))
	}

	/// Load config from `path` (or the default location), falling back to
	/// defaults if no file exists.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let path = match path {
			Some(p) => p.to_path_buf(),
			None => Self::path()?,
		};
		if path.exists() {
			let content = std::fs::read_to_string(&path)?;
			toml::from_str(&content)
				.map_err(|e| Error::Config(format!("{}: {e}", path.display())))
		} else {
			Ok(Self::default())
		}
	}

	/// Persist the config to `path`, creating the directory if needed.
	pub fn save(&self, path: &Path) -> Result<()> {
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		let content =
			toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
		std::fs::write(path, content)?;
		Ok(())
	}

	/// Return the gateway URL for the given network name.
	pub fn gateway_url(&self, network: &str) -> &str {
		match network {
			"mainnet" => &self.network.mainnet_gateway,
			"testnet" => &self.network.testnet_gateway,
			_ => &self.network.devnet_gateway,
		}
	}

	/// Chain id stamped on every transaction for the given network.
	pub fn chain_id(network: &str) -> &'static str {
		match network {
			"mainnet" => "1",
			"testnet" => "T",
			_ => "D",
		}
	}
}

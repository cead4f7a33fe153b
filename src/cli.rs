use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Exit status for usage-only invocations and rejected input.
pub const USAGE_EXIT_CODE: u8 = 9;

#[derive(Parser)]
#[command(
	name = "nft-minter",
	about = "Operator CLI for a deployed NFT minter smart contract.",
	version,
	disable_help_flag = true
)]
pub struct Cli {
	/// Network to connect to.
	#[arg(long, global = true)]
	pub network: Option<Network>,

	/// Override gateway URL.
	#[arg(long, global = true)]
	pub gateway: Option<String>,

	/// Wallet PEM file.
	#[arg(long, global = true)]
	pub pem: Option<PathBuf>,

	/// Minter contract address (erd1…).
	#[arg(long, global = true)]
	pub contract: Option<String>,

	/// Output record file.
	#[arg(long, global = true)]
	pub output: Option<PathBuf>,

	/// Config file (defaults to ~/.nft-minter/config.toml).
	#[arg(long, global = true)]
	pub config: Option<PathBuf>,

	/// Log debug details to stderr.
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// One of the commands listed by `--help`.
	#[arg(allow_hyphen_values = true)]
	pub command: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum Network {
	Devnet,
	Testnet,
	Mainnet,
}

impl Network {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Devnet => "devnet",
			Self::Testnet => "testnet",
			Self::Mainnet => "mainnet",
		}
	}
}

/// The closed set of minter commands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
	IssueCollectionToken,
	SetRoles,
	Mint,
	Giveaway,
	ClaimScFunds,
	SetDrop,
	UnsetDrop,
	PauseMinting,
	StartMinting,
	SetNewPrice,
	ClaimDevRewards,
	Shuffle,
	GetTotalTokensLeft,
	GetProvenanceHash,
	GetDropTokensLeft,
	GetNftPrice,
	GetNftTokenId,
	GetNftTokenName,
}

impl Command {
	pub const ALL: [Command; 18] = [
		Self::IssueCollectionToken,
		Self::SetRoles,
		Self::Mint,
		Self::Giveaway,
		Self::ClaimScFunds,
		Self::SetDrop,
		Self::UnsetDrop,
		Self::PauseMinting,
		Self::StartMinting,
		Self::SetNewPrice,
		Self::ClaimDevRewards,
		Self::Shuffle,
		Self::GetTotalTokensLeft,
		Self::GetProvenanceHash,
		Self::GetDropTokensLeft,
		Self::GetNftPrice,
		Self::GetNftTokenId,
		Self::GetNftTokenName,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::IssueCollectionToken => "issue-collection-token",
			Self::SetRoles => "set-roles",
			Self::Mint => "mint",
			Self::Giveaway => "giveaway",
			Self::ClaimScFunds => "claim-sc-funds",
			Self::SetDrop => "set-drop",
			Self::UnsetDrop => "unset-drop",
			Self::PauseMinting => "pause-minting",
			Self::StartMinting => "start-minting",
			Self::SetNewPrice => "set-new-price",
			Self::ClaimDevRewards => "claim-dev-rewards",
			Self::Shuffle => "shuffle",
			Self::GetTotalTokensLeft => "get-total-tokens-left",
			Self::GetProvenanceHash => "get-provenance-hash",
			Self::GetDropTokensLeft => "get-drop-tokens-left",
			Self::GetNftPrice => "get-nft-price",
			Self::GetNftTokenId => "get-nft-token-id",
			Self::GetNftTokenName => "get-nft-token-name",
		}
	}

	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|c| c.as_str() == name)
	}
}

impl fmt::Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// What the dispatcher decided to do with the raw subcommand.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
	/// `-h` / `--help`.
	Help,
	/// Missing or unknown subcommand.
	Invalid,
	Run(Command),
}

pub fn resolve(subcommand: Option<&str>) -> Dispatch {
	match subcommand {
		Some("-h" | "--help") => Dispatch::Help,
		Some(name) => Command::from_name(name).map_or(Dispatch::Invalid, Dispatch::Run),
		None => Dispatch::Invalid,
	}
}

/// Listing printed for [`Dispatch::Help`] and [`Dispatch::Invalid`].
pub fn usage(dispatch: &Dispatch) -> String {
	let banner = match dispatch {
		Dispatch::Help => "Available commands:",
		_ => "Please provide a proper command. Available commands:",
	};
	let rule = "=".repeat(banner.len());
	let names: Vec<&str> = Command::ALL.iter().map(Command::as_str).collect();
	format!("{rule}\n{banner}\n{rule}\n{}", names.join("\n"))
}

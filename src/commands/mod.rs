pub mod admin;
pub mod collection;
pub mod drops;
pub mod mint;
pub mod query;

use crate::address::Address;
use crate::cli::{Cli, Command, USAGE_EXIT_CODE};
use crate::config::{Config, GasConfig};
use crate::error::{Error, Result};
use crate::output::{self, OutputRecord};
use crate::pipeline::{self, Finality};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::session::{Connect, NetworkConnector, Session};
use crate::transaction::{ChainParams, Transaction};

/// Resolve the network name from CLI flag or config.
pub fn resolve_network(cli: &Cli, config: &Config) -> String {
	cli.network
		.map(|n| n.as_str().to_owned())
		.unwrap_or_else(|| config.network.default.clone())
}

/// Resolve the gateway URL from CLI flag or config.
pub fn resolve_gateway(cli: &Cli, config: &Config, network: &str) -> String {
	cli.gateway
		.clone()
		.unwrap_or_else(|| config.gateway_url(network).to_owned())
}

/// Wire up the real gateway, PEM wallet and terminal from flags + config.
pub fn build_context(cli: &Cli, config: Config) -> Context {
	let network = resolve_network(cli, &config);
	let gateway = resolve_gateway(cli, &config, &network);
	let pem = cli.pem.clone().unwrap_or_else(|| config.wallet.pem.clone());
	let output = cli.output.clone().unwrap_or_else(|| config.contract.output.clone());
	let chain = ChainParams {
		chain_id: Config::chain_id(&network).to_owned(),
		gas_price: config.network.gas_price,
	};
	tracing::debug!(%network, %gateway, pem = %pem.display(), "resolved settings");

	Context {
		finality: Finality::from_secs(
			config.network.finality_timeout_secs,
			config.network.poll_interval_secs,
		),
		output: OutputRecord::new(output),
		contract_flag: cli.contract.clone(),
		contract_config: config.contract.address,
		connector: Box::new(NetworkConnector::new(&gateway, pem, chain)),
		prompter: Box::new(TerminalPrompter),
		gas: config.gas,
	}
}

/// Everything a handler needs, resolved once at startup.
pub struct Context {
	pub gas: GasConfig,
	pub finality: Finality,
	pub output: OutputRecord,
	/// Address from `--contract`; wins over everything else.
	pub contract_flag: Option<String>,
	/// Address from the config file; used when the output record has none.
	pub contract_config: Option<String>,
	pub connector: Box<dyn Connect>,
	pub prompter: Box<dyn Prompter>,
}

impl Context {
	/// Minter address from the flag, the output record, or the config, in
	/// that order.
	pub fn contract_address(&self) -> Result<Address> {
		let raw = match &self.contract_flag {
			Some(flag) => flag.clone(),
			None => match self.output.get_str(output::SC_ADDRESS)? {
				Some(recorded) => recorded,
				None => self.contract_config.clone().ok_or_else(|| {
					Error::Setup(
						"no minter address: pass --contract, add nftMinterScAddress to the \
						 output file, or set contract.address in the config"
							.into(),
					)
				})?,
			},
		};
		let address: Address = raw
			.parse()
			.map_err(|e| Error::Setup(format!("bad minter address: {e}")))?;
		if !address.is_contract() {
			return Err(Error::Setup(format!("{address} is not a contract address")));
		}
		Ok(address)
	}

	pub fn prompter(&self) -> &dyn Prompter {
		self.prompter.as_ref()
	}

	async fn connect(&self, contract: Address) -> Result<Session> {
		self.connector.connect(contract).await
	}

	/// Run `tx` through the common pipeline with this session's handles.
	async fn send(&self, session: &mut Session, tx: Transaction) -> Result<String> {
		pipeline::send(
			tx,
			&mut session.account,
			session.signer.as_ref(),
			session.provider.as_ref(),
			&self.finality,
		)
		.await
	}
}

/// Dispatch one command to its handler.
pub async fn run(ctx: &Context, command: Command) -> Result<()> {
	match command {
		Command::IssueCollectionToken => collection::issue_collection_token(ctx).await,
		Command::SetRoles => collection::set_roles(ctx).await,
		Command::Mint => mint::mint(ctx).await,
		Command::Giveaway => mint::giveaway(ctx).await,
		Command::ClaimScFunds => admin::claim_sc_funds(ctx).await,
		Command::SetDrop => drops::set_drop(ctx).await,
		Command::UnsetDrop => drops::unset_drop(ctx).await,
		Command::PauseMinting => admin::pause_minting(ctx).await,
		Command::StartMinting => admin::start_minting(ctx).await,
		Command::SetNewPrice => admin::set_new_price(ctx).await,
		Command::ClaimDevRewards => admin::claim_dev_rewards(ctx).await,
		Command::Shuffle => admin::shuffle(ctx).await,
		Command::GetTotalTokensLeft => query::run(ctx, &query::TOTAL_TOKENS_LEFT).await,
		Command::GetProvenanceHash => query::run(ctx, &query::PROVENANCE_HASH).await,
		Command::GetDropTokensLeft => query::run(ctx, &query::DROP_TOKENS_LEFT).await,
		Command::GetNftPrice => query::run(ctx, &query::NFT_PRICE).await,
		Command::GetNftTokenId => query::run(ctx, &query::NFT_TOKEN_ID).await,
		Command::GetNftTokenName => query::run(ctx, &query::NFT_TOKEN_NAME).await,
	}
}

/// Failure boundary around a single command. Errors are logged and
/// printed, never propagated; the return value is the process exit code.
pub async fn execute(ctx: &Context, command: Command) -> u8 {
	match run(ctx, command).await {
		Ok(()) => 0,
		Err(e) => {
			tracing::debug!(%command, error = ?e, "command failed");
			eprintln!("Error: {e}");
			if e.is_usage() {
				USAGE_EXIT_CODE
			} else {
				0
			}
		}
	}
}

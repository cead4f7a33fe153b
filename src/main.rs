use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nft_minter_cli::cli::{self, Cli, Dispatch};
use nft_minter_cli::commands;
use nft_minter_cli::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	let command = match cli::resolve(cli.command.as_deref()) {
		Dispatch::Run(command) => command,
		other => {
			println!("{}", cli::usage(&other));
			return Ok(ExitCode::from(cli::USAGE_EXIT_CODE));
		}
	};

	let config = Config::load(cli.config.as_deref())?;
	let ctx = commands::build_context(&cli, config);
	Ok(ExitCode::from(commands::execute(&ctx, command).await))
}

fn init_tracing(verbose: bool) {
	let fallback = if verbose { "nft_minter_cli=debug" } else { "nft_minter_cli=warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

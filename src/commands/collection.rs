use serde_json::json;

use super::Context;
use crate::builders;
use crate::codec;
use crate::error::{Error, Result};
use crate::output;
use crate::pipeline;
use crate::prompt::{self, COLLECTION_TOKEN_NAME, COLLECTION_TOKEN_TICKER};

/// Issue the collection token, then read back its id and record it.
pub async fn issue_collection_token(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;

	let name = prompt::ask(ctx.prompter(), COLLECTION_TOKEN_NAME, prompt::token_name)?;
	let ticker = prompt::ask(ctx.prompter(), COLLECTION_TOKEN_TICKER, prompt::token_ticker)?;
	let value = codec::parse_egld(&ctx.gas.issue_token_value)
		.map_err(|e| Error::Config(format!("gas.issue_token_value: {e}")))?;

	let mut session = ctx.connect(contract).await?;
	let tx = builders::issue_collection_token(
		&session.contract,
		ctx.gas.issue_token,
		value,
		&name,
		&ticker,
	);
	ctx.send(&mut session, tx).await?;

	println!("Acquiring the token info...");
	let raw = pipeline::query_first(
		session.provider.as_ref(),
		&contract,
		super::query::NFT_TOKEN_ID.function,
	)
	.await?;
	let token_id = codec::decode_string(&raw)?;

	println!("Your collection token id: {token_id}");
	ctx.output.update([(output::TOKEN_ID, json!(token_id))])?;
	println!("Also saved in the {} file.", ctx.output.path().display());
	Ok(())
}

/// Assign the NFT create role to the minter contract.
pub async fn set_roles(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;
	let mut session = ctx.connect(contract).await?;
	let tx = builders::assign_roles(&session.contract, ctx.gas.assign_roles);
	ctx.send(&mut session, tx).await?;
	Ok(())
}

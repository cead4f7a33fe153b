use num_bigint::BigUint;

use super::Context;
use crate::address::Address;
use crate::builders;
use crate::codec;
use crate::error::{Error, Result};
use crate::output;
use crate::pipeline;
use crate::prompt::{self, AMOUNT_OF_TOKENS, GIVEAWAY_ADDRESS, GIVEAWAY_TOKENS_AMOUNT};
use crate::session::Session;

pub async fn mint(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;

	let amount = prompt::ask(ctx.prompter(), AMOUNT_OF_TOKENS, prompt::positive_amount)?;
	let amount = prompt::parse_amount(&amount)?;
	prompt::are_you_sure(ctx.prompter())?;

	let mut session = ctx.connect(contract).await?;
	let price = unit_price(ctx, &session).await?;
	tracing::debug!(amount, price = %codec::format_egld(&price), "minting");

	let tx = builders::mint(&session.contract, ctx.gas.mint_base, amount, &price);
	ctx.send(&mut session, tx).await?;
	Ok(())
}

pub async fn giveaway(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;

	let receiver = prompt::ask(ctx.prompter(), GIVEAWAY_ADDRESS, prompt::address)?;
	let receiver: Address = receiver.parse()?;
	let amount = prompt::ask(ctx.prompter(), GIVEAWAY_TOKENS_AMOUNT, prompt::positive_amount)?;
	let amount = prompt::parse_amount(&amount)?;
	prompt::are_you_sure(ctx.prompter())?;

	let mut session = ctx.connect(contract).await?;
	let tx = builders::giveaway(&session.contract, ctx.gas.giveaway_base, receiver, amount);
	ctx.send(&mut session, tx).await?;
	Ok(())
}

/// Price per token in atomic units: the recorded selling price if there is
/// one, otherwise whatever the contract currently asks.
async fn unit_price(ctx: &Context, session: &Session) -> Result<BigUint> {
	if let Some(recorded) = ctx.output.get_str(output::SELLING_PRICE)? {
		return codec::parse_egld(&recorded).map_err(|e| {
			Error::Config(format!("{}: bad sellingPrice: {e}", ctx.output.path().display()))
		});
	}
	let raw = pipeline::query_first(
		session.provider.as_ref(),
		session.contract.address(),
		super::query::NFT_PRICE.function,
	)
	.await?;
	Ok(codec::decode_number(&raw))
}

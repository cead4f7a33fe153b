use serde_json::json;

use super::Context;
use crate::builders;
use crate::codec;
use crate::error::Result;
use crate::output;
use crate::prompt::{self, SELLING_PRICE};

pub async fn pause_minting(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;
	prompt::are_you_sure(ctx.prompter())?;

	let mut session = ctx.connect(contract).await?;
	let tx = builders::pause_minting(&session.contract, ctx.gas.pause_unpause);
	ctx.send(&mut session, tx).await?;
	Ok(())
}

pub async fn start_minting(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;
	prompt::are_you_sure(ctx.prompter())?;

	let mut session = ctx.connect(contract).await?;
	let tx = builders::unpause_minting(&session.contract, ctx.gas.pause_unpause);
	ctx.send(&mut session, tx).await?;
	Ok(())
}

/// Change the per-token price and remember it for later mints.
pub async fn set_new_price(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;

	let price = prompt::ask(ctx.prompter(), SELLING_PRICE, prompt::price)?;
	let atomic = codec::parse_egld(&price)?;
	prompt::are_you_sure(ctx.prompter())?;

	let mut session = ctx.connect(contract).await?;
	let tx = builders::set_new_price(&session.contract, ctx.gas.set_new_price, atomic);
	ctx.send(&mut session, tx).await?;

	ctx.output.update([(output::SELLING_PRICE, json!(price))])?;
	Ok(())
}

/// Withdraw the contract's accumulated sales to the owner.
pub async fn claim_sc_funds(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;
	let mut session = ctx.connect(contract).await?;
	let tx = builders::claim_sc_funds(&session.contract, ctx.gas.claim_sc_funds);
	ctx.send(&mut session, tx).await?;
	Ok(())
}

pub async fn claim_dev_rewards(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;
	let mut session = ctx.connect(contract).await?;
	let tx = builders::claim_dev_rewards(&session.contract, ctx.gas.claim_dev_rewards);
	ctx.send(&mut session, tx).await?;
	Ok(())
}

/// Re-randomize which metadata the next mint gets.
pub async fn shuffle(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;
	let mut session = ctx.connect(contract).await?;
	let tx = builders::shuffle(&session.contract, ctx.gas.shuffle);
	ctx.send(&mut session, tx).await?;
	Ok(())
}

use super::Context;
use crate::builders;
use crate::error::Result;
use crate::prompt::{self, DROP_TOKENS_AMOUNT};

/// Open a limited drop of the given size.
pub async fn set_drop(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;

	let amount = prompt::ask(ctx.prompter(), DROP_TOKENS_AMOUNT, prompt::positive_amount)?;
	let amount = prompt::parse_amount(&amount)?;

	let mut session = ctx.connect(contract).await?;
	let tx = builders::set_drop(&session.contract, ctx.gas.set_unset_drop, amount);
	ctx.send(&mut session, tx).await?;
	Ok(())
}

pub async fn unset_drop(ctx: &Context) -> Result<()> {
	let contract = ctx.contract_address()?;
	let mut session = ctx.connect(contract).await?;
	let tx = builders::unset_drop(&session.contract, ctx.gas.set_unset_drop);
	ctx.send(&mut session, tx).await?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;
	use crate::testing::Harness;

	#[tokio::test]
	async fn set_drop_sends_prompted_amount() {
		let h = Harness::new(["100"], []);
		let ctx = h.context();

		set_drop(&ctx).await.unwrap();

		let sent = h.net.sent();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].function(), builders::SET_DROP);
		assert_eq!(sent[0].gas_limit(), ctx.gas.set_unset_drop);
		assert_eq!(sent[0].args(), vec!["64"]);
	}

	#[tokio::test]
	async fn zero_drop_is_rejected() {
		let h = Harness::new(["0"], []);
		let ctx = h.context();

		assert!(matches!(set_drop(&ctx).await, Err(Error::InputValidation(_))));
		assert_eq!(h.connects(), 0);
	}

	#[tokio::test]
	async fn unset_drop_needs_no_input() {
		let h = Harness::new([], []);
		let ctx = h.context();

		unset_drop(&ctx).await.unwrap();
		assert_eq!(h.net.sent()[0].data(), builders::UNSET_DROP);
	}
}

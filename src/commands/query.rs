use super::Context;
use crate::error::Result;
use crate::pipeline::{self, QuerySpec, ResultType};

pub const TOTAL_TOKENS_LEFT: QuerySpec = QuerySpec {
	function: "getTotalTokensLeft",
	label: "Total tokens left",
	result_type: ResultType::Number,
};

pub const PROVENANCE_HASH: QuerySpec = QuerySpec {
	function: "getProvenanceHash",
	label: "Provenance hash of the collection",
	result_type: ResultType::String,
};

pub const DROP_TOKENS_LEFT: QuerySpec = QuerySpec {
	function: "getDropTokensLeft",
	label: "Tokens left for the current drop",
	result_type: ResultType::Number,
};

pub const NFT_PRICE: QuerySpec = QuerySpec {
	function: "getNftPrice",
	label: "Current NFT price is",
	result_type: ResultType::Number,
};

pub const NFT_TOKEN_ID: QuerySpec = QuerySpec {
	function: "getNftTokenId",
	label: "NFT token id",
	result_type: ResultType::String,
};

pub const NFT_TOKEN_NAME: QuerySpec = QuerySpec {
	function: "getNftTokenName",
	label: "NFT token name",
	result_type: ResultType::String,
};

/// Read-only commands need no wallet, only a provider.
pub async fn run(ctx: &Context, spec: &QuerySpec) -> Result<()> {
	let contract = ctx.contract_address()?;
	let provider = ctx.connector.provider();
	pipeline::print_query(provider.as_ref(), &contract, spec).await?;
	Ok(())
}

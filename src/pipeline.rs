//! The two shared routines every command funnels through: sending a
//! state-changing transaction and running a read-only query.

use std::fmt;
use std::time::Duration;

use indicatif::ProgressBar;
use num_bigint::BigUint;

use crate::address::Address;
use crate::codec;
use crate::error::{Error, Result};
use crate::provider::{ContractQuery, Provider, TxStatus};
use crate::signer::Signer;
use crate::transaction::{Account, Transaction};

/// Bounds on waiting for a broadcast transaction to become final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finality {
	pub timeout: Duration,
	pub poll_interval: Duration,
}

impl Finality {
	pub fn from_secs(timeout: u64, poll_interval: u64) -> Self {
		Self {
			timeout: Duration::from_secs(timeout),
			poll_interval: Duration::from_secs(poll_interval),
		}
	}
}

/// Stamp, sign, broadcast and await `tx`, then print its hash.
///
/// The account's local nonce is incremented as soon as it is stamped, so a
/// second call in the same process uses the next nonce without asking the
/// network. A transaction that ends `fail` or `invalid` is an error.
pub async fn send(
	mut tx: Transaction,
	account: &mut Account,
	signer: &dyn Signer,
	provider: &dyn Provider,
	finality: &Finality,
) -> Result<String> {
	tx.set_nonce(account.nonce);
	tx.set_sender(account.address);
	account.increment_nonce();
	tracing::debug!(nonce = tx.nonce(), function = tx.function(), "nonce assigned");

	signer.sign_transaction(&mut tx).await?;
	tracing::debug!("transaction signed");

	let spinner = spinner("Processing transaction...");
	let result = broadcast_and_await(&tx, provider, finality).await;
	spinner.finish_and_clear();
	let (tx_hash, status) = result?;

	println!("Transaction hash: {tx_hash}");

	match status {
		TxStatus::Fail | TxStatus::Invalid => Err(Error::Contract {
			tx_hash,
			status: status.as_str().to_owned(),
		}),
		_ => Ok(tx_hash),
	}
}

async fn broadcast_and_await(
	tx: &Transaction,
	provider: &dyn Provider,
	finality: &Finality,
) -> Result<(String, TxStatus)> {
	let tx_hash = provider.send_transaction(tx).await?;
	tracing::info!(%tx_hash, "transaction sent");

	let status = await_final(provider, &tx_hash, finality).await?;
	tracing::info!(%tx_hash, status = status.as_str(), "transaction final");
	Ok((tx_hash, status))
}

async fn await_final(
	provider: &dyn Provider,
	tx_hash: &str,
	finality: &Finality,
) -> Result<TxStatus> {
	let poll = async {
		loop {
			let status = provider.get_transaction_status(tx_hash).await?;
			if status.is_final() {
				return Ok::<_, Error>(status);
			}
			tracing::debug!(%tx_hash, "still pending");
			tokio::time::sleep(finality.poll_interval).await;
		}
	};

	tokio::time::timeout(finality.timeout, poll)
		.await
		.map_err(|_| Error::Timeout {
			tx_hash: tx_hash.to_owned(),
			secs: finality.timeout.as_secs(),
		})?
}

fn spinner(message: &'static str) -> ProgressBar {
	let pb = ProgressBar::new_spinner();
	pb.set_message(message);
	pb.enable_steady_tick(Duration::from_millis(120));
	pb
}

// -- Queries --

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
	Number,
	String,
}

/// A view function and how to present its first return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySpec {
	pub function: &'static str,
	pub label: &'static str,
	pub result_type: ResultType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
	Number(BigUint),
	Text(String),
}

impl fmt::Display for QueryValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Text(s) => f.write_str(s),
		}
	}
}

/// Call `function` and return the raw bytes of its first return value.
pub async fn query_first(
	provider: &dyn Provider,
	contract: &Address,
	function: &str,
) -> Result<Vec<u8>> {
	let query = ContractQuery {
		contract: *contract,
		function: function.to_owned(),
		args: Vec::new(),
	};
	let resp = provider.query_contract(&query).await.map_err(|e| match e {
		Error::Network(msg) => Error::Query(msg),
		other => other,
	})?;

	if !resp.is_ok() {
		return Err(Error::Query(format!(
			"{function} returned `{}`: {}",
			resp.return_code, resp.return_message
		)));
	}
	let first = resp
		.return_data
		.first()
		.ok_or_else(|| Error::Query(format!("{function} returned no data")))?;
	codec::decode_base64(first)
}

pub async fn query(
	provider: &dyn Provider,
	contract: &Address,
	spec: &QuerySpec,
) -> Result<QueryValue> {
	let bytes = query_first(provider, contract, spec.function).await?;
	Ok(match spec.result_type {
		ResultType::Number => QueryValue::Number(codec::decode_number(&bytes)),
		ResultType::String => QueryValue::Text(codec::decode_string(&bytes)?),
	})
}

/// Run `spec` and print `{label}: {value}`.
pub async fn print_query(
	provider: &dyn Provider,
	contract: &Address,
	spec: &QuerySpec,
) -> Result<QueryValue> {
	let value = query(provider, contract, spec).await?;
	println!("{}: {value}", spec.label);
	Ok(value)
}

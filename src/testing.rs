//! In-memory network, wallet and operator for exercising handlers.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use num_bigint::BigUint;

use crate::address::Address;
use crate::commands::Context;
use crate::config::GasConfig;
use crate::error::{Error, Result};
use crate::output::OutputRecord;
use crate::pipeline::Finality;
use crate::prompt::{Prompter, Validator};
use crate::provider::{AccountOnNetwork, ContractQuery, Provider, QueryResponse, TxStatus};
use crate::session::{Connect, Session};
use crate::signer::Signer;
use crate::transaction::{Account, ChainParams, SmartContract, Transaction};

pub fn operator() -> Address {
	Address::from_bytes([0xaa; 32])
}

pub fn contract_with_tail(tail: u8) -> Address {
	let mut bytes = [0u8; 32];
	bytes[8] = 5;
	bytes[31] = tail;
	Address::from_bytes(bytes)
}

pub fn chain() -> ChainParams {
	ChainParams { chain_id: "D".into(), gas_price: 1_000_000_000 }
}

pub fn contract() -> SmartContract {
	SmartContract::new(contract_with_tail(0xc0), chain())
}

pub fn account(nonce: u64) -> Account {
	Account::new(operator(), nonce, BigUint::from(10u64.pow(19)))
}

// -- Network --

#[derive(Default)]
struct NetState {
	account_nonce: u64,
	sent: Vec<Transaction>,
	hashes: Vec<String>,
	pending_polls: usize,
	status_polls: usize,
	final_status: Option<TxStatus>,
	fail_sends: bool,
	queries: HashMap<String, QueryResponse>,
}

/// Shared-state fake of the gateway. Clones see the same state.
#[derive(Clone, Default)]
pub struct MockNetwork(Arc<Mutex<NetState>>);

impl MockNetwork {
	pub fn new() -> Self {
		Self::default()
	}

	fn state(&self) -> std::sync::MutexGuard<'_, NetState> {
		self.0.lock().unwrap()
	}

	pub fn set_account_nonce(&self, nonce: u64) {
		self.state().account_nonce = nonce;
	}

	/// Report `pending` this many times before the final status.
	pub fn set_pending_polls(&self, polls: usize) {
		self.state().pending_polls = polls;
	}

	pub fn set_final_status(&self, status: TxStatus) {
		self.state().final_status = Some(status);
	}

	pub fn fail_sends(&self) {
		self.state().fail_sends = true;
	}

	pub fn set_query(&self, function: &str, return_data: Vec<String>) {
		self.set_query_response(
			function,
			QueryResponse {
				return_data,
				return_code: "ok".into(),
				return_message: String::new(),
			},
		);
	}

	pub fn set_query_response(&self, function: &str, response: QueryResponse) {
		self.state().queries.insert(function.to_owned(), response);
	}

	pub fn sent(&self) -> Vec<Transaction> {
		self.state().sent.clone()
	}

	pub fn broadcasts(&self) -> usize {
		self.state().sent.len()
	}

	pub fn status_polls(&self) -> usize {
		self.state().status_polls
	}

	pub fn last_hash(&self) -> Option<String> {
		self.state().hashes.last().cloned()
	}
}

#[async_trait::async_trait]
impl Provider for MockNetwork {
	async fn get_account(&self, _address: &Address) -> Result<AccountOnNetwork> {
		Ok(AccountOnNetwork {
			nonce: self.state().account_nonce,
			balance: BigUint::from(10u64.pow(19)),
		})
	}

	async fn send_transaction(&self, tx: &Transaction) -> Result<String> {
		let mut state = self.state();
		if state.fail_sends {
			return Err(Error::Network("connection refused".into()));
		}
		state.sent.push(tx.clone());
		let hash = format!("{:064x}", state.sent.len());
		state.hashes.push(hash.clone());
		Ok(hash)
	}

	async fn get_transaction_status(&self, _tx_hash: &str) -> Result<TxStatus> {
		let mut state = self.state();
		state.status_polls += 1;
		if state.pending_polls > 0 {
			state.pending_polls -= 1;
			return Ok(TxStatus::Pending);
		}
		Ok(state.final_status.clone().unwrap_or(TxStatus::Success))
	}

	async fn query_contract(&self, query: &ContractQuery) -> Result<QueryResponse> {
		self.state()
			.queries
			.get(&query.function)
			.cloned()
			.ok_or_else(|| Error::Network(format!("no route to {}", query.function)))
	}
}

// -- Wallet --

pub struct MockSigner {
	address: Address,
	fail: bool,
}

impl MockSigner {
	pub fn new(address: Address) -> Self {
		Self { address, fail: false }
	}

	pub fn failing(address: Address) -> Self {
		Self { address, fail: true }
	}
}

#[async_trait::async_trait]
impl Signer for MockSigner {
	fn address(&self) -> &Address {
		&self.address
	}

	async fn sign_transaction(&self, tx: &mut Transaction) -> Result<()> {
		if self.fail {
			return Err(Error::Signing("device unplugged".into()));
		}
		assert_eq!(tx.sender(), Some(&self.address), "pipeline must stamp the sender");
		tx.apply_signature(vec![1u8; 64]);
		Ok(())
	}
}

struct MockConnector {
	net: MockNetwork,
	connects: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Connect for MockConnector {
	async fn connect(&self, contract: Address) -> Result<Session> {
		self.connects.fetch_add(1, Ordering::SeqCst);
		let on_network = self.net.get_account(&operator()).await?;
		Ok(Session {
			contract: SmartContract::new(contract, chain()),
			account: Account::new(operator(), on_network.nonce, on_network.balance),
			signer: Box::new(MockSigner::new(operator())),
			provider: Box::new(self.net.clone()),
		})
	}

	fn provider(&self) -> Box<dyn Provider> {
		Box::new(self.net.clone())
	}
}

// -- Operator --

/// Answers prompts from a fixed script. Running out of text answers is a
/// missing answer; running out of confirmations is a "no".
pub struct ScriptedPrompter {
	texts: Mutex<VecDeque<String>>,
	confirms: Mutex<VecDeque<bool>>,
}

impl ScriptedPrompter {
	pub fn new<'a>(
		texts: impl IntoIterator<Item = &'a str>,
		confirms: impl IntoIterator<Item = bool>,
	) -> Self {
		Self {
			texts: Mutex::new(texts.into_iter().map(str::to_owned).collect()),
			confirms: Mutex::new(confirms.into_iter().collect()),
		}
	}
}

impl Prompter for ScriptedPrompter {
	fn text(&self, _label: &str, _validate: Validator) -> Result<String> {
		self.texts
			.lock()
			.unwrap()
			.pop_front()
			.ok_or_else(|| Error::InputValidation("no answer given".into()))
	}

	fn confirm(&self, _message: &str) -> Result<bool> {
		Ok(self.confirms.lock().unwrap().pop_front().unwrap_or(false))
	}
}

// -- Whole-handler harness --

/// One fake network plus a scripted operator, with a scratch directory for
/// the output record.
pub struct Harness {
	pub net: MockNetwork,
	connects: Arc<AtomicUsize>,
	texts: Vec<String>,
	confirms: Vec<bool>,
	dir: tempfile::TempDir,
}

impl Harness {
	pub fn new<'a>(
		texts: impl IntoIterator<Item = &'a str>,
		confirms: impl IntoIterator<Item = bool>,
	) -> Self {
		Self {
			net: MockNetwork::new(),
			connects: Arc::new(AtomicUsize::new(0)),
			texts: texts.into_iter().map(str::to_owned).collect(),
			confirms: confirms.into_iter().collect(),
			dir: tempfile::tempdir().unwrap(),
		}
	}

	pub fn context(&self) -> Context {
		Context {
			gas: GasConfig::default(),
			finality: Finality {
				timeout: Duration::from_secs(5),
				poll_interval: Duration::from_millis(1),
			},
			output: OutputRecord::new(self.dir.path().join("output.json")),
			contract_flag: Some(contract().address().to_string()),
			contract_config: None,
			connector: Box::new(MockConnector {
				net: self.net.clone(),
				connects: Arc::clone(&self.connects),
			}),
			prompter: Box::new(ScriptedPrompter::new(
				self.texts.iter().map(String::as_str),
				self.confirms.iter().copied(),
			)),
		}
	}

	/// How many sessions handlers opened.
	pub fn connects(&self) -> usize {
		self.connects.load(Ordering::SeqCst)
	}
}

use base64::{engine::general_purpose::STANDARD, Engine as _};
use num_bigint::BigUint;
use serde::Serialize;

use crate::address::Address;
use crate::codec::{self, Arg};

pub const TX_VERSION: u32 = 1;

/// Chain-wide parameters stamped on every transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
	pub chain_id: String,
	pub gas_price: u64,
}

/// Handle on the deployed minter contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartContract {
	address: Address,
	chain: ChainParams,
}

impl SmartContract {
	pub fn new(address: Address, chain: ChainParams) -> Self {
		Self { address, chain }
	}

	pub fn address(&self) -> &Address {
		&self.address
	}

	pub fn chain(&self) -> &ChainParams {
		&self.chain
	}

	/// Start building a call to `function` on this contract.
	pub fn call(&self, function: &str) -> ContractCall<'_> {
		ContractCall {
			contract: self,
			function: function.to_owned(),
			args: Vec::new(),
			gas_limit: 0,
			value: BigUint::default(),
		}
	}
}

/// Builder for a contract-call transaction.
#[must_use]
pub struct ContractCall<'a> {
	contract: &'a SmartContract,
	function: String,
	args: Vec<Arg>,
	gas_limit: u64,
	value: BigUint,
}

impl ContractCall<'_> {
	pub fn arg(mut self, arg: Arg) -> Self {
		self.args.push(arg);
		self
	}

	pub fn gas_limit(mut self, gas_limit: u64) -> Self {
		self.gas_limit = gas_limit;
		self
	}

	pub fn value(mut self, value: BigUint) -> Self {
		self.value = value;
		self
	}

	/// Produce the unsigned transaction. Nonce and sender are stamped later
	/// by the pipeline.
	pub fn build(self) -> Transaction {
		Transaction {
			nonce: 0,
			value: self.value,
			receiver: *self.contract.address(),
			sender: None,
			gas_price: self.contract.chain.gas_price,
			gas_limit: self.gas_limit,
			data: codec::call_data(&self.function, &self.args),
			chain_id: self.contract.chain.chain_id.clone(),
			version: TX_VERSION,
			signature: None,
		}
	}
}

/// A single transaction. Built unsigned, stamped with a nonce and sender,
/// signed in place, then sent once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
	nonce: u64,
	value: BigUint,
	receiver: Address,
	sender: Option<Address>,
	gas_price: u64,
	gas_limit: u64,
	data: String,
	chain_id: String,
	version: u32,
	signature: Option<Vec<u8>>,
}

/// JSON shape the gateway accepts and the signature covers. Field order is
/// significant.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Wire<'a> {
	nonce: u64,
	value: String,
	receiver: String,
	sender: String,
	gas_price: u64,
	gas_limit: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<String>,
	#[serde(rename = "chainID")]
	chain_id: &'a str,
	version: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	signature: Option<String>,
}

impl Transaction {
	pub fn nonce(&self) -> u64 {
		self.nonce
	}

	pub fn set_nonce(&mut self, nonce: u64) {
		self.nonce = nonce;
	}

	pub fn sender(&self) -> Option<&Address> {
		self.sender.as_ref()
	}

	pub fn set_sender(&mut self, sender: Address) {
		self.sender = Some(sender);
	}

	pub fn receiver(&self) -> &Address {
		&self.receiver
	}

	pub fn value(&self) -> &BigUint {
		&self.value
	}

	pub fn gas_limit(&self) -> u64 {
		self.gas_limit
	}

	/// Raw call data, `function@arg@arg…`.
	pub fn data(&self) -> &str {
		&self.data
	}

	pub fn function(&self) -> &str {
		self.data.split('@').next().unwrap_or_default()
	}

	/// Hex-encoded arguments, in call order.
	pub fn args(&self) -> Vec<&str> {
		self.data.split('@').skip(1).collect()
	}

	pub fn signature(&self) -> Option<&[u8]> {
		self.signature.as_deref()
	}

	pub fn apply_signature(&mut self, signature: Vec<u8>) {
		self.signature = Some(signature);
	}

	/// Bytes the signer signs: the canonical JSON without a signature.
	pub fn signing_bytes(&self) -> Vec<u8> {
		let wire = self.wire(false);
		serde_json::to_vec(&wire).unwrap_or_default()
	}

	/// Full JSON body for broadcasting, signature included.
	pub fn to_json(&self) -> serde_json::Value {
		serde_json::to_value(self.wire(true)).unwrap_or_default()
	}

	fn wire(&self, with_signature: bool) -> Wire<'_> {
		Wire {
			nonce: self.nonce,
			value: self.value.to_str_radix(10),
			receiver: self.receiver.to_string(),
			sender: self.sender.map(|s| s.to_string()).unwrap_or_default(),
			gas_price: self.gas_price,
			gas_limit: self.gas_limit,
			data: (!self.data.is_empty()).then(|| STANDARD.encode(&self.data)),
			chain_id: &self.chain_id,
			version: self.version,
			signature: if with_signature {
				self.signature.as_ref().map(hex::encode)
			} else {
				None
			},
		}
	}
}

/// The operator's account as seen at session setup. The nonce is a local
/// counter from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
	pub address: Address,
	pub nonce: u64,
	pub balance: BigUint,
}

impl Account {
	pub fn new(address: Address, nonce: u64, balance: BigUint) -> Self {
		Self { address, nonce, balance }
	}

	pub fn increment_nonce(&mut self) {
		self.nonce += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn contract() -> SmartContract {
		let mut bytes = [0u8; 32];
		bytes[8] = 5;
		bytes[31] = 1;
		SmartContract::new(
			Address::from_bytes(bytes),
			ChainParams { chain_id: "D".into(), gas_price: 1_000_000_000 },
		)
	}

	#[test]
	fn call_builder_sets_fields() {
		let c = contract();
		let tx = c
			.call("setDrop")
			.arg(Arg::U32(100))
			.gas_limit(6_000_000)
			.build();

		assert_eq!(tx.function(), "setDrop");
		assert_eq!(tx.args(), vec!["64"]);
		assert_eq!(tx.gas_limit(), 6_000_000);
		assert_eq!(tx.receiver(), c.address());
		assert_eq!(tx.value(), &BigUint::from(0u8));
		assert!(tx.sender().is_none());
		assert!(tx.signature().is_none());
	}

	#[test]
	fn signing_bytes_follow_wire_order() {
		let c = contract();
		let mut tx = c.call("shuffle").gas_limit(5_000_000).build();
		tx.set_nonce(7);
		tx.set_sender(Address::from_bytes([2u8; 32]));

		let json = String::from_utf8(tx.signing_bytes()).unwrap();
		let order = ["\"nonce\":7", "\"value\":\"0\"", "\"receiver\"", "\"sender\"", "\"gasPrice\"",
			"\"gasLimit\":5000000", "\"data\":\"c2h1ZmZsZQ==\"", "\"chainID\":\"D\"", "\"version\":1"];
		let mut last = 0;
		for field in order {
			let pos = json.find(field).unwrap_or_else(|| panic!("missing {field} in {json}"));
			assert!(pos >= last, "{field} out of order in {json}");
			last = pos;
		}
		assert!(!json.contains("signature"));
	}

	#[test]
	fn broadcast_json_carries_hex_signature() {
		let mut tx = contract().call("shuffle").build();
		tx.apply_signature(vec![0xab; 64]);
		let json = tx.to_json();
		assert_eq!(json["signature"].as_str().unwrap(), "ab".repeat(64));
	}

	#[test]
	fn account_nonce_increments() {
		let mut acc = Account::new(Address::from_bytes([1u8; 32]), 41, BigUint::default());
		acc.increment_nonce();
		assert_eq!(acc.nonce, 42);
	}
}

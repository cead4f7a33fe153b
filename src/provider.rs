use num_bigint::BigUint;
use serde_json::{json, Value};

use crate::address::Address;
use crate::error::{Error, Result};
use crate::transaction::Transaction;

/// Account state as reported by the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOnNetwork {
	pub nonce: u64,
	pub balance: BigUint,
}

/// Lifecycle of a broadcast transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
	Pending,
	Success,
	Fail,
	Invalid,
}

impl TxStatus {
	pub fn from_gateway(status: &str) -> Self {
		match status {
			"success" | "executed" => Self::Success,
			"fail" => Self::Fail,
			"invalid" => Self::Invalid,
			// "pending", "received", "partially-executed" and anything new.
			_ => Self::Pending,
		}
	}

	pub fn is_final(&self) -> bool {
		!matches!(self, Self::Pending)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Success => "success",
			Self::Fail => "fail",
			Self::Invalid => "invalid",
		}
	}
}

/// A read-only call against a contract view function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractQuery {
	pub contract: Address,
	pub function: String,
	/// Hex-encoded arguments.
	pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryResponse {
	/// Base64-encoded return values; an absent value is the empty string.
	pub return_data: Vec<String>,
	pub return_code: String,
	pub return_message: String,
}

impl QueryResponse {
	pub fn is_ok(&self) -> bool {
		self.return_code == "ok"
	}
}

/// Everything the minter needs from the network.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
	async fn get_account(&self, address: &Address) -> Result<AccountOnNetwork>;

	/// Broadcast a signed transaction and return its hash.
	async fn send_transaction(&self, tx: &Transaction) -> Result<String>;

	async fn get_transaction_status(&self, tx_hash: &str) -> Result<TxStatus>;

	async fn query_contract(&self, query: &ContractQuery) -> Result<QueryResponse>;
}

/// Provider backed by a MultiversX gateway's REST API.
///
/// Every response is wrapped in `{ "data": …, "error": "…", "code": "…" }`;
/// anything but `code == "successful"` is an error.
pub struct GatewayProvider {
	url: String,
	http: reqwest::Client,
}

impl GatewayProvider {
	pub fn new(url: &str) -> Self {
		Self {
			url: url.trim_end_matches('/').to_owned(),
			http: reqwest::Client::new(),
		}
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	async fn get(&self, path: &str) -> Result<Value> {
		tracing::debug!(url = %self.url, path, "gateway GET");
		let resp: Value = self
			.http
			.get(format!("{}{path}", self.url))
			.send()
			.await?
			.json()
			.await?;
		unwrap_envelope(resp)
	}

	async fn post(&self, path: &str, body: &Value) -> Result<Value> {
		tracing::debug!(url = %self.url, path, "gateway POST");
		let resp: Value = self
			.http
			.post(format!("{}{path}", self.url))
			.json(body)
			.send()
			.await?
			.json()
			.await?;
		unwrap_envelope(resp)
	}
}

#[async_trait::async_trait]
impl Provider for GatewayProvider {
	async fn get_account(&self, address: &Address) -> Result<AccountOnNetwork> {
		let data = self.get(&format!("/address/{address}")).await?;
		parse_account(&data)
	}

	async fn send_transaction(&self, tx: &Transaction) -> Result<String> {
		let data = self.post("/transaction/send", &tx.to_json()).await?;
		data.get("txHash")
			.and_then(Value::as_str)
			.map(str::to_owned)
			.ok_or_else(|| Error::Decode("send response has no txHash".into()))
	}

	async fn get_transaction_status(&self, tx_hash: &str) -> Result<TxStatus> {
		let data = self.get(&format!("/transaction/{tx_hash}/status")).await?;
		data.get("status")
			.and_then(Value::as_str)
			.map(TxStatus::from_gateway)
			.ok_or_else(|| Error::Decode("status response has no status".into()))
	}

	async fn query_contract(&self, query: &ContractQuery) -> Result<QueryResponse> {
		let body = json!({
			"scAddress": query.contract.to_string(),
			"funcName": query.function,
			"args": query.args,
		});
		let data = self
			.post("/vm-values/query", &body)
			.await
			.map_err(|e| Error::Query(e.to_string()))?;
		parse_query(&data)
	}
}

// -- Response parsing --

fn unwrap_envelope(resp: Value) -> Result<Value> {
	let code = resp.get("code").and_then(Value::as_str).unwrap_or_default();
	if code == "successful" {
		return Ok(resp.get("data").cloned().unwrap_or(Value::Null));
	}
	let err = resp
		.get("error")
		.and_then(Value::as_str)
		.filter(|e| !e.is_empty())
		.unwrap_or("no error message");
	Err(Error::Network(format!("gateway returned `{code}`: {err}")))
}

fn parse_account(data: &Value) -> Result<AccountOnNetwork> {
	let nonce = data
		.pointer("/account/nonce")
		.and_then(Value::as_u64)
		.ok_or_else(|| Error::Decode("account response has no nonce".into()))?;
	let balance = data
		.pointer("/account/balance")
		.and_then(Value::as_str)
		.and_then(|b| BigUint::parse_bytes(b.as_bytes(), 10))
		.unwrap_or_default();
	Ok(AccountOnNetwork { nonce, balance })
}

fn parse_query(data: &Value) -> Result<QueryResponse> {
	let inner = data
		.get("data")
		.ok_or_else(|| Error::Query("query response has no data".into()))?;
	let return_data = inner
		.get("returnData")
		.and_then(Value::as_array)
		.map(|items| {
			items
				.iter()
				.map(|v| v.as_str().unwrap_or_default().to_owned())
				.collect()
		})
		.unwrap_or_default();
	let field = |name: &str| {
		inner
			.get(name)
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_owned()
	};
	Ok(QueryResponse {
		return_data,
		return_code: field("returnCode"),
		return_message: field("returnMessage"),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_mapping() {
		assert_eq!(TxStatus::from_gateway("success"), TxStatus::Success);
		assert_eq!(TxStatus::from_gateway("executed"), TxStatus::Success);
		assert_eq!(TxStatus::from_gateway("fail"), TxStatus::Fail);
		assert_eq!(TxStatus::from_gateway("invalid"), TxStatus::Invalid);
		assert!(!TxStatus::from_gateway("pending").is_final());
		assert!(!TxStatus::from_gateway("partially-executed").is_final());
		assert!(TxStatus::Fail.is_final());
	}

	#[test]
	fn envelope_errors_surface_message() {
		let err = unwrap_envelope(json!({
			"data": null,
			"error": "transaction generation failed: invalid nonce",
			"code": "bad_request"
		}))
		.unwrap_err();
		assert!(err.to_string().contains("invalid nonce"));

		let ok = unwrap_envelope(json!({ "data": { "txHash": "ab" }, "error": "", "code": "successful" }))
			.unwrap();
		assert_eq!(ok["txHash"], "ab");
	}

	#[test]
	fn parses_account() {
		let acc = parse_account(&json!({
			"account": { "address": "erd1…", "nonce": 12, "balance": "1000000000000000000" }
		}))
		.unwrap();
		assert_eq!(acc.nonce, 12);
		assert_eq!(acc.balance, BigUint::from(10u64.pow(18)));
		assert!(parse_account(&json!({ "account": {} })).is_err());
	}

	#[test]
	fn parses_query_with_null_entries() {
		let resp = parse_query(&json!({
			"data": {
				"returnData": ["ZA==", null],
				"returnCode": "ok",
				"returnMessage": ""
			}
		}))
		.unwrap();
		assert!(resp.is_ok());
		assert_eq!(resp.return_data, vec!["ZA==".to_owned(), String::new()]);

		let missing = parse_query(&json!({ "data": { "returnCode": "user error" } })).unwrap();
		assert!(missing.return_data.is_empty());
		assert!(!missing.is_ok());
	}

	#[test]
	fn trims_trailing_slash() {
		assert_eq!(GatewayProvider::new("https://gw.example/").url(), "https://gw.example");
	}
}

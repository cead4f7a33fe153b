use thiserror::Error;

/// Everything that can stop a minter operation.
///
/// Each handler returns one of these to its own boundary in
/// [`crate::commands::run`]; nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
	/// A prompt answer was missing or did not pass validation.
	#[error("invalid input: {0}")]
	InputValidation(String),

	/// The operator declined the confirmation prompt.
	#[error("aborted")]
	Aborted,

	/// The session (wallet, gateway, account) could not be established.
	#[error("setup failed: {0}")]
	Setup(String),

	#[error("signing failed: {0}")]
	Signing(String),

	/// Broadcast or status polling failed at the transport level.
	#[error("network error: {0}")]
	Network(String),

	/// A view call failed or returned nothing.
	#[error("query failed: {0}")]
	Query(String),

	#[error("unexpected response: {0}")]
	Decode(String),

	#[error("transaction {tx_hash} not final after {secs}s")]
	Timeout { tx_hash: String, secs: u64 },

	/// The transaction was included but the contract rejected it.
	#[error("transaction {tx_hash} finished with status `{status}`")]
	Contract { tx_hash: String, status: String },

	#[error("config error: {0}")]
	Config(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Failures caused by the operator's own input rather than the chain.
	pub fn is_usage(&self) -> bool {
		matches!(self, Self::InputValidation(_) | Self::Aborted)
	}
}

impl From<reqwest::Error> for Error {
	fn from(e: reqwest::Error) -> Self {
		Self::Network(e.to_string())
	}
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn usage_errors_are_distinguished() {
		assert!(Error::InputValidation("x".into()).is_usage());
		assert!(Error::Aborted.is_usage());
		assert!(!Error::Network("down".into()).is_usage());
		assert!(!Error::Timeout { tx_hash: "ab".into(), secs: 5 }.is_usage());
	}

	#[test]
	fn contract_error_names_status() {
		let e = Error::Contract { tx_hash: "abc".into(), status: "fail".into() };
		assert_eq!(e.to_string(), "transaction abc finished with status `fail`");
	}
}

use std::path::PathBuf;

use crate::address::Address;
use crate::error::{Error, Result};
use crate::provider::{GatewayProvider, Provider};
use crate::signer::{self, Signer};
use crate::transaction::{Account, ChainParams, SmartContract};

/// Handles needed to run one operation against the minter.
pub struct Session {
	pub contract: SmartContract,
	pub account: Account,
	pub signer: Box<dyn Signer>,
	pub provider: Box<dyn Provider>,
}

/// Establishes a [`Session`] for a contract address.
#[async_trait::async_trait]
pub trait Connect: Send + Sync {
	async fn connect(&self, contract: Address) -> Result<Session>;

	/// A provider for read-only calls; needs no wallet.
	fn provider(&self) -> Box<dyn Provider>;
}

/// Connects to a gateway with a PEM wallet.
pub struct NetworkConnector {
	gateway_url: String,
	pem: PathBuf,
	chain: ChainParams,
}

impl NetworkConnector {
	pub fn new(gateway_url: &str, pem: PathBuf, chain: ChainParams) -> Self {
		Self {
			gateway_url: gateway_url.to_owned(),
			pem,
			chain,
		}
	}
}

#[async_trait::async_trait]
impl Connect for NetworkConnector {
	async fn connect(&self, contract: Address) -> Result<Session> {
		let signer = signer::from_pem_file(&self.pem)?;
		let provider = self.provider();

		let address = *signer.address();
		tracing::debug!(%address, gateway = %self.gateway_url, "fetching account");
		let on_network = provider
			.get_account(&address)
			.await
			.map_err(|e| Error::Setup(format!("cannot load account {address}: {e}")))?;
		tracing::debug!(nonce = on_network.nonce, "account loaded");

		Ok(Session {
			contract: SmartContract::new(contract, self.chain.clone()),
			account: Account::new(address, on_network.nonce, on_network.balance),
			signer,
			provider,
		})
	}

	fn provider(&self) -> Box<dyn Provider> {
		Box::new(GatewayProvider::new(&self.gateway_url))
	}
}

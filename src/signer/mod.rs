pub mod pem;

use std::path::Path;

use crate::address::Address;
use crate::error::Result;
use crate::transaction::Transaction;

/// Produces signatures for the operator's account.
#[async_trait::async_trait]
pub trait Signer: Send + Sync {
	/// The address this signer controls.
	fn address(&self) -> &Address;

	/// Sign `tx` in place. The transaction's sender must already be this
	/// signer's address.
	async fn sign_transaction(&self, tx: &mut Transaction) -> Result<()>;
}

/// Load the signer stored in a PEM wallet file.
pub fn from_pem_file(path: &Path) -> Result<Box<dyn Signer>> {
	Ok(Box::new(pem::PemSigner::from_file(path)?))
}

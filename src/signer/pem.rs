use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signer as _, SigningKey};

use crate::address::Address;
use crate::error::{Error, Result};
use crate::transaction::Transaction;

/// Signs with an ed25519 key read from a wallet PEM file.
///
/// The PEM body is base64 of the hex-encoded 32-byte seed, usually followed
/// by the 32-byte public key.
pub struct PemSigner {
	key: SigningKey,
	address: Address,
}

impl PemSigner {
	pub fn from_file(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path)
			.map_err(|e| Error::Setup(format!("cannot read wallet {}: {e}", path.display())))?;
		Self::from_pem(&text)
	}

	pub fn from_pem(text: &str) -> Result<Self> {
		let body: String = text
			.lines()
			.map(str::trim)
			.filter(|l| !l.is_empty() && !l.starts_with("-----"))
			.collect();
		let hex_key = STANDARD
			.decode(body)
			.map_err(|e| Error::Setup(format!("wallet PEM is not base64: {e}")))?;
		let raw = hex::decode(&hex_key)
			.map_err(|e| Error::Setup(format!("wallet PEM does not hold a hex key: {e}")))?;
		if raw.len() != 32 && raw.len() != 64 {
			return Err(Error::Setup(format!(
				"wallet key is {} bytes, expected 32 or 64",
				raw.len()
			)));
		}

		let mut seed = [0u8; 32];
		seed.copy_from_slice(&raw[..32]);
		let key = SigningKey::from_bytes(&seed);
		let public = key.verifying_key().to_bytes();
		if raw.len() == 64 && raw[32..] != public {
			return Err(Error::Setup("wallet public key does not match its seed".into()));
		}

		Ok(Self { key, address: Address::from_bytes(public) })
	}
}

#[async_trait::async_trait]
impl super::Signer for PemSigner {
	fn address(&self) -> &Address {
		&self.address
	}

	async fn sign_transaction(&self, tx: &mut Transaction) -> Result<()> {
		match tx.sender() {
			Some(sender) if *sender == self.address => {}
			Some(sender) => {
				return Err(Error::Signing(format!(
					"transaction sender {sender} is not the wallet address {}",
					self.address
				)))
			}
			None => return Err(Error::Signing("transaction has no sender".into())),
		}
		let signature = self.key.sign(&tx.signing_bytes());
		tx.apply_signature(signature.to_bytes().to_vec());
		Ok(())
	}
}

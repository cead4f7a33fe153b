use std::fmt;
use std::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};

use crate::error::Error;

/// Human-readable part of every MultiversX address.
pub const HRP: &str = "erd";

/// A 32-byte account or contract address, shown in bech32 (`erd1…`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 32]);

impl Address {
	pub fn from_bytes(bytes: [u8; 32]) -> Self {
		Self(bytes)
	}

	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}

	pub fn to_hex(&self) -> String {
		hex::encode(self.0)
	}

	/// Contract addresses start with eight zero bytes.
	pub fn is_contract(&self) -> bool {
		self.0[..8].iter().all(|b| *b == 0)
	}
}

impl FromStr for Address {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (hrp, data, variant) = bech32::decode(s.trim())
			.map_err(|e| Error::InputValidation(format!("invalid address `{s}`: {e}")))?;
		if hrp != HRP || variant != Variant::Bech32 {
			return Err(Error::InputValidation(format!(
				"invalid address `{s}`: expected an `{HRP}1…` bech32 address"
			)));
		}
		let bytes = Vec::<u8>::from_base32(&data)
			.map_err(|e| Error::InputValidation(format!("invalid address `{s}`: {e}")))?;
		let bytes: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
			Error::InputValidation(format!("invalid address `{s}`: {} bytes, expected 32", v.len()))
		})?;
		Ok(Self(bytes))
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let encoded =
			bech32::encode(HRP, self.0.to_base32(), Variant::Bech32).map_err(|_| fmt::Error)?;
		f.write_str(&encoded)
	}
}

impl fmt::Debug for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Address({self})")
	}
}

//! Contract argument encoding and query result decoding.
//!
//! Call data is `function@arg@arg…`, each argument in its top-level hex
//! form: unsigned numbers as minimal big-endian bytes (zero is the empty
//! string), byte strings and addresses as their raw bytes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use num_bigint::BigUint;

use crate::address::Address;
use crate::error::{Error, Result};

/// Decimal places of one EGLD.
pub const DENOMINATION: usize = 18;

/// A typed argument to a contract function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
	U32(u32),
	BigUint(BigUint),
	Bytes(Vec<u8>),
	Address(Address),
}

impl Arg {
	pub fn string(s: &str) -> Self {
		Self::Bytes(s.as_bytes().to_vec())
	}

	pub fn to_hex(&self) -> String {
		match self {
			Self::U32(n) => hex::encode(trim_leading_zeros(&n.to_be_bytes())),
			Self::BigUint(n) => hex::encode(trim_leading_zeros(&n.to_bytes_be())),
			Self::Bytes(b) => hex::encode(b),
			Self::Address(a) => a.to_hex(),
		}
	}
}

/// Join a function name and its arguments into transaction data.
pub fn call_data(function: &str, args: &[Arg]) -> String {
	let mut data = function.to_owned();
	for arg in args {
		data.push('@');
		data.push_str(&arg.to_hex());
	}
	data
}

fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
	let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
	&bytes[first..]
}

// -- Query results --

pub fn decode_base64(raw: &str) -> Result<Vec<u8>> {
	STANDARD
		.decode(raw)
		.map_err(|e| Error::Decode(format!("return data is not base64: {e}")))
}

/// Big-endian unsigned integer; empty bytes are zero.
pub fn decode_number(bytes: &[u8]) -> BigUint {
	BigUint::from_bytes_be(bytes)
}

pub fn decode_string(bytes: &[u8]) -> Result<String> {
	String::from_utf8(bytes.to_vec())
		.map_err(|e| Error::Decode(format!("return data is not UTF-8: {e}")))
}

// -- Denomination --

/// Parse a decimal EGLD amount (`"0.5"`) into atomic units.
pub fn parse_egld(input: &str) -> Result<BigUint> {
	let input = input.trim();
	let invalid = || Error::InputValidation(format!("`{input}` is not a valid EGLD amount"));

	let (int, frac) = match input.split_once('.') {
		Some((int, frac)) => (int, frac),
		None => (input, ""),
	};
	if int.is_empty() && frac.is_empty() {
		return Err(invalid());
	}
	if !int.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
		return Err(invalid());
	}
	if frac.len() > DENOMINATION {
		return Err(Error::InputValidation(format!(
			"`{input}` has more than {DENOMINATION} decimals"
		)));
	}

	let digits = format!("{int}{frac:0<width$}", width = DENOMINATION);
	BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)
}

/// Render atomic units as a decimal EGLD amount without trailing zeros.
pub fn format_egld(amount: &BigUint) -> String {
	let digits = format!("{:0>width$}", amount.to_str_radix(10), width = DENOMINATION + 1);
	let (int, frac) = digits.split_at(digits.len() - DENOMINATION);
	let frac = frac.trim_end_matches('0');
	if frac.is_empty() {
		int.to_owned()
	} else {
		format!("{int}.{frac}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn numbers_use_minimal_big_endian() {
		assert_eq!(Arg::U32(100).to_hex(), "64");
		assert_eq!(Arg::U32(256).to_hex(), "0100");
		assert_eq!(Arg::U32(0).to_hex(), "");
		assert_eq!(Arg::BigUint(BigUint::from(0u8)).to_hex(), "");
		assert_eq!(
			Arg::BigUint(BigUint::from(50_000_000_000_000_000u64)).to_hex(),
			"b1a2bc2ec50000"
		);
	}

	#[test]
	fn call_data_joins_with_at() {
		let data = call_data("issueToken", &[Arg::string("MyCollection"), Arg::string("MYC")]);
		assert_eq!(data, "issueToken@4d79436f6c6c656374696f6e@4d5943");
		assert_eq!(call_data("shuffle", &[]), "shuffle");
	}

	#[test]
	fn zero_and_empty_decode() {
		let empty = decode_base64("").unwrap();
		assert!(empty.is_empty());
		assert_eq!(decode_number(&empty), BigUint::from(0u8));
		assert_eq!(decode_string(&empty).unwrap(), "");
		// An explicit zero byte is still zero.
		assert_eq!(decode_number(&decode_base64("AA==").unwrap()), BigUint::from(0u8));
	}

	#[test]
	fn decodes_values() {
		// "ZA==" is 0x64.
		assert_eq!(decode_number(&decode_base64("ZA==").unwrap()), BigUint::from(100u8));
		// "TVlDLTEyMzQ1Ng==" is "MYC-123456".
		let s = decode_string(&decode_base64("TVlDLTEyMzQ1Ng==").unwrap()).unwrap();
		assert_eq!(s, "MYC-123456");
	}

	#[test]
	fn bad_base64_is_decode_error() {
		assert!(matches!(decode_base64("!!!"), Err(Error::Decode(_))));
	}

	#[test]
	fn egld_parsing() {
		assert_eq!(parse_egld("1").unwrap(), BigUint::from(10u64.pow(18)));
		assert_eq!(parse_egld("0.5").unwrap(), BigUint::from(5 * 10u64.pow(17)));
		assert_eq!(parse_egld(".05").unwrap(), BigUint::from(5 * 10u64.pow(16)));
		assert_eq!(parse_egld("0").unwrap(), BigUint::from(0u8));
		assert!(parse_egld("").is_err());
		assert!(parse_egld("-1").is_err());
		assert!(parse_egld("1.2.3").is_err());
		assert!(parse_egld("abc").is_err());
		assert!(parse_egld("0.0000000000000000001").is_err());
	}

	#[test]
	fn egld_formatting() {
		assert_eq!(format_egld(&BigUint::from(10u64.pow(18))), "1");
		assert_eq!(format_egld(&BigUint::from(5 * 10u64.pow(17))), "0.5");
		assert_eq!(format_egld(&BigUint::from(0u8)), "0");
		assert_eq!(format_egld(&BigUint::from(1u8)), "0.000000000000000001");
		assert_eq!(format_egld(&parse_egld("12.25").unwrap()), "12.25");
	}
}

//! One unsigned transaction per minter operation.
//!
//! Builders do no I/O and never validate their arguments; handlers check
//! prompt answers before calling them.

use num_bigint::BigUint;

use crate::address::Address;
use crate::codec::Arg;
use crate::transaction::{SmartContract, Transaction};

pub const ISSUE_TOKEN: &str = "issueToken";
pub const SET_LOCAL_ROLES: &str = "setLocalRoles";
pub const MINT: &str = "mint";
pub const GIVEAWAY: &str = "giveaway";
pub const CLAIM_SC_FUNDS: &str = "claimScFunds";
pub const SET_DROP: &str = "setDrop";
pub const UNSET_DROP: &str = "unsetDrop";
pub const PAUSE_MINTING: &str = "pauseMinting";
pub const START_MINTING: &str = "startMinting";
pub const SET_NEW_PRICE: &str = "setNewPrice";
pub const CLAIM_DEVELOPER_REWARDS: &str = "ClaimDeveloperRewards";
pub const SHUFFLE: &str = "shuffle";

pub fn issue_collection_token(
	contract: &SmartContract,
	gas_limit: u64,
	value: BigUint,
	name: &str,
	ticker: &str,
) -> Transaction {
	contract
		.call(ISSUE_TOKEN)
		.arg(Arg::string(name))
		.arg(Arg::string(ticker))
		.gas_limit(gas_limit)
		.value(value)
		.build()
}

pub fn assign_roles(contract: &SmartContract, gas_limit: u64) -> Transaction {
	contract.call(SET_LOCAL_ROLES).gas_limit(gas_limit).build()
}

/// Mint `amount` tokens, paying `unit_price` (atomic units) for each.
pub fn mint(
	contract: &SmartContract,
	base_gas_limit: u64,
	amount: u32,
	unit_price: &BigUint,
) -> Transaction {
	contract
		.call(MINT)
		.arg(Arg::U32(amount))
		.gas_limit(scaled_gas_limit(base_gas_limit, amount))
		.value(unit_price * BigUint::from(amount))
		.build()
}

pub fn giveaway(
	contract: &SmartContract,
	base_gas_limit: u64,
	receiver: Address,
	amount: u32,
) -> Transaction {
	contract
		.call(GIVEAWAY)
		.arg(Arg::Address(receiver))
		.arg(Arg::U32(amount))
		.gas_limit(scaled_gas_limit(base_gas_limit, amount))
		.build()
}

pub fn claim_sc_funds(contract: &SmartContract, gas_limit: u64) -> Transaction {
	contract.call(CLAIM_SC_FUNDS).gas_limit(gas_limit).build()
}

pub fn set_drop(contract: &SmartContract, gas_limit: u64, amount: u32) -> Transaction {
	contract
		.call(SET_DROP)
		.arg(Arg::U32(amount))
		.gas_limit(gas_limit)
		.build()
}

pub fn unset_drop(contract: &SmartContract, gas_limit: u64) -> Transaction {
	contract.call(UNSET_DROP).gas_limit(gas_limit).build()
}

pub fn pause_minting(contract: &SmartContract, gas_limit: u64) -> Transaction {
	contract.call(PAUSE_MINTING).gas_limit(gas_limit).build()
}

pub fn unpause_minting(contract: &SmartContract, gas_limit: u64) -> Transaction {
	contract.call(START_MINTING).gas_limit(gas_limit).build()
}

/// `price` is in atomic units.
pub fn set_new_price(contract: &SmartContract, gas_limit: u64, price: BigUint) -> Transaction {
	contract
		.call(SET_NEW_PRICE)
		.arg(Arg::BigUint(price))
		.gas_limit(gas_limit)
		.build()
}

/// Protocol built-in; only the contract owner can claim.
pub fn claim_dev_rewards(contract: &SmartContract, gas_limit: u64) -> Transaction {
	contract.call(CLAIM_DEVELOPER_REWARDS).gas_limit(gas_limit).build()
}

pub fn shuffle(contract: &SmartContract, gas_limit: u64) -> Transaction {
	contract.call(SHUFFLE).gas_limit(gas_limit).build()
}

/// Each token past the first costs roughly `base / 1.4` extra gas.
fn scaled_gas_limit(base: u64, amount: u32) -> u64 {
	let extra = u64::from(amount.saturating_sub(1));
	base + base * 5 / 7 * extra
}

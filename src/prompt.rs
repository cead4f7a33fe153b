use inquire::validator::Validation;
use inquire::{Confirm, InquireError, Text};

use crate::address::Address;
use crate::codec;
use crate::error::{Error, Result};

pub const COLLECTION_TOKEN_NAME: &str =
	"Enter the name for the collection token (ex. MyName1, 3-20 alphanumeric characters, no spaces):";
pub const COLLECTION_TOKEN_TICKER: &str =
	"Enter the ticker for the collection token (ex. MYTICKER, 3-10 uppercase alphanumeric characters):";
pub const AMOUNT_OF_TOKENS: &str = "How many tokens do you want to mint?";
pub const GIVEAWAY_ADDRESS: &str = "Provide the address for the giveaway:";
pub const GIVEAWAY_TOKENS_AMOUNT: &str = "How many tokens should be given away?";
pub const DROP_TOKENS_AMOUNT: &str = "Provide the amount of tokens for the drop:";
pub const SELLING_PRICE: &str = "Provide the selling price (ex. 0.5 for 0.5 EGLD):";
pub const ARE_YOU_SURE: &str = "Are you sure?";

/// Checks one answer; `Err` carries the message shown to the operator.
pub type Validator = fn(&str) -> std::result::Result<(), String>;

/// Source of operator input.
pub trait Prompter: Send + Sync {
	/// Ask for a line of text, re-asking until `validate` accepts it when
	/// the front end supports that.
	fn text(&self, label: &str, validate: Validator) -> Result<String>;

	fn confirm(&self, message: &str) -> Result<bool>;
}

/// Ask `label` and validate the answer regardless of what the prompter did.
pub fn ask(prompter: &dyn Prompter, label: &str, validate: Validator) -> Result<String> {
	let answer = prompter.text(label, validate)?;
	let answer = answer.trim().to_owned();
	validate(&answer).map_err(Error::InputValidation)?;
	Ok(answer)
}

/// Confirmation guard in front of costly or irreversible calls.
pub fn are_you_sure(prompter: &dyn Prompter) -> Result<()> {
	if prompter.confirm(ARE_YOU_SURE)? {
		Ok(())
	} else {
		println!("Aborted!");
		Err(Error::Aborted)
	}
}

// -- Validators --

pub fn required(input: &str) -> std::result::Result<(), String> {
	if input.trim().is_empty() {
		Err("Required!".into())
	} else {
		Ok(())
	}
}

pub fn token_name(input: &str) -> std::result::Result<(), String> {
	required(input)?;
	let ok = (3..=20).contains(&input.len()) && input.bytes().all(|b| b.is_ascii_alphanumeric());
	if ok {
		Ok(())
	} else {
		Err("Use 3-20 alphanumeric characters!".into())
	}
}

pub fn token_ticker(input: &str) -> std::result::Result<(), String> {
	required(input)?;
	let ok = (3..=10).contains(&input.len())
		&& input.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
	if ok {
		Ok(())
	} else {
		Err("Use 3-10 uppercase alphanumeric characters!".into())
	}
}

pub fn positive_amount(input: &str) -> std::result::Result<(), String> {
	match input.trim().parse::<u32>() {
		Ok(n) if n > 0 => Ok(()),
		_ => Err("Required and must be a whole number greater than 0!".into()),
	}
}

pub fn price(input: &str) -> std::result::Result<(), String> {
	match codec::parse_egld(input) {
		Ok(p) if p.bits() > 0 => Ok(()),
		_ => Err("Required and must be greater than 0!".into()),
	}
}

pub fn address(input: &str) -> std::result::Result<(), String> {
	input.trim().parse::<Address>().map(|_| ()).map_err(|e| e.to_string())
}

/// Parse an answer already accepted by [`positive_amount`].
pub fn parse_amount(input: &str) -> Result<u32> {
	input
		.trim()
		.parse()
		.map_err(|_| Error::InputValidation(format!("`{input}` is not a valid amount")))
}

// -- Terminal front end --

/// Interactive prompts on the controlling terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
	fn text(&self, label: &str, validate: Validator) -> Result<String> {
		Text::new(label)
			.with_validator(move |input: &str| {
				Ok(match validate(input.trim()) {
					Ok(()) => Validation::Valid,
					Err(msg) => Validation::Invalid(msg.into()),
				})
			})
			.prompt()
			.map_err(prompt_error)
	}

	fn confirm(&self, message: &str) -> Result<bool> {
		Confirm::new(message)
			.with_default(false)
			.prompt()
			.map_err(prompt_error)
	}
}

fn prompt_error(e: InquireError) -> Error {
	match e {
		InquireError::OperationCanceled | InquireError::OperationInterrupted => {
			Error::InputValidation("no answer given".into())
		}
		InquireError::IO(io) => Error::Io(io),
		other => Error::InputValidation(other.to_string()),
	}
}

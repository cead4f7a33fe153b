use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub const SC_ADDRESS: &str = "nftMinterScAddress";
pub const TOKEN_ID: &str = "tokenId";
pub const SELLING_PRICE: &str = "sellingPrice";

/// JSON file of facts learned from the chain. Writes merge into whatever is
/// already there.
#[derive(Debug, Clone)]
pub struct OutputRecord {
	path: PathBuf,
}

impl OutputRecord {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Current contents; a missing file is an empty record.
	pub fn load(&self) -> Result<Map<String, Value>> {
		if !self.path.exists() {
			return Ok(Map::new());
		}
		let content = std::fs::read_to_string(&self.path)?;
		if content.trim().is_empty() {
			return Ok(Map::new());
		}
		match serde_json::from_str(&content) {
			Ok(Value::Object(map)) => Ok(map),
			Ok(_) => Err(Error::Config(format!(
				"{} does not hold a JSON object",
				self.path.display()
			))),
			Err(e) => Err(Error::Config(format!("{}: {e}", self.path.display()))),
		}
	}

	pub fn get_str(&self, key: &str) -> Result<Option<String>> {
		Ok(self
			.load()?
			.get(key)
			.and_then(Value::as_str)
			.map(str::to_owned))
	}

	/// Merge `fields` into the record and write it back.
	pub fn update<I, K>(&self, fields: I) -> Result<()>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let mut record = self.load()?;
		for (key, value) in fields {
			record.insert(key.into(), value);
		}
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent)?;
		}
		let content = serde_json::to_string_pretty(&Value::Object(record))
			.map_err(|e| Error::Config(e.to_string()))?;
		std::fs::write(&self.path, content)?;
		tracing::debug!(path = %self.path.display(), "output record updated");
		Ok(())
	}
}

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::row::compression::decode_bytes;
use crate::row::{Compression, QueryResult, ResultSet, Result};

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;

/// Limits applied while loading result dumps.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
	/// Ceiling for zstd-decompressed dump size.
	pub max_decompressed_bytes: usize,
}

impl Default for LoadOptions {
	fn default() -> Self {
		Self {
			max_decompressed_bytes: MAX_DECOMPRESSED_BYTES,
		}
	}
}

/// On-disk form of a materialized query result.
#[derive(Debug, Serialize, Deserialize)]
struct ResultDump {
	result_sets: Vec<ResultSet>,
}

impl QueryResult {
	/// Load a JSON result dump, optionally zstd-compressed.
	pub fn open(path: impl AsRef<Path>, options: &LoadOptions) -> Result<(Compression, Self)> {
		let path = path.as_ref();
		let raw = fs::read(path)?;
		let (compression, bytes) = decode_bytes(raw, options.max_decompressed_bytes)?;
		tracing::debug!(path = %path.display(), compression = compression.as_str(), bytes = bytes.len(), "loaded result dump");
		Ok((compression, Self::from_slice(&bytes)?))
	}

	/// Parse an uncompressed JSON result dump.
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		let dump: ResultDump = serde_json::from_slice(bytes)?;
		tracing::debug!(result_sets = dump.result_sets.len(), "parsed result dump");
		Self::new(dump.result_sets)
	}

	/// Serialize all result sets back into dump JSON.
	pub fn to_json(&self) -> Result<String> {
		let dump = ResultDump {
			result_sets: self.result_sets().to_vec(),
		};
		Ok(serde_json::to_string_pretty(&dump)?)
	}
}

#[cfg(test)]
mod tests;

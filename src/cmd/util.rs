use std::path::Path;

use serde::Serialize;
use ydbrow::row::{LoadOptions, QueryResult, Result};

/// Load a result dump, applying an optional decompression ceiling.
pub(crate) fn open_dump(path: &Path, max_decompressed_bytes: Option<usize>) -> Result<QueryResult> {
	let mut options = LoadOptions::default();
	if let Some(limit) = max_decompressed_bytes {
		options.max_decompressed_bytes = limit;
	}

	let (compression, result) = QueryResult::open(path, &options)?;
	tracing::info!(
		path = %path.display(),
		compression = compression.as_str(),
		result_sets = result.result_set_count(),
		"opened result dump"
	);
	Ok(result)
}

/// Print `payload` as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

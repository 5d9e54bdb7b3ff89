use std::path::PathBuf;

use serde_json::{Map, Value as JsonValue};
use ydbrow::row::{JsonScanner, RenderOptions, Result};

use crate::cmd::util::{emit_json, open_dump};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<usize>,
	#[arg(long = "max-decompressed-bytes")]
	pub max_decompressed_bytes: Option<usize>,
}

/// Decode every row of every result set through the generic JSON decoder.
///
/// Columns that fail to decode render as `null`; the first failure is
/// reported after all rows have been printed.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		json,
		max_depth,
		max_decompressed_bytes,
	} = args;

	let mut options = RenderOptions::default();
	if let Some(depth) = max_depth {
		options.max_depth = depth;
	}

	let mut result = open_dump(&path, max_decompressed_bytes)?;
	let mut sets = Vec::new();

	while result.next_result_set() {
		let names: Vec<String> = result.columns().iter().map(|column| column.name.clone()).collect();
		let mut rows = Vec::with_capacity(result.row_count());

		while result.next_row() {
			let mut row = Map::new();
			for name in &names {
				let mut scanner = JsonScanner::new(options);
				let value = match result.scan(&mut scanner) {
					Ok(()) => scanner.value,
					Err(err) => {
						tracing::warn!(column = %name, error = %err, "column failed to decode");
						JsonValue::Null
					}
				};
				row.insert(name.clone(), value);
			}
			rows.push(JsonValue::Object(row));
		}

		sets.push(SetJson { columns: names, rows });
	}

	if json {
		emit_json(&ShowJson {
			path: path.display().to_string(),
			result_sets: sets,
		})?;
	} else {
		for (idx, set) in sets.iter().enumerate() {
			println!("result set {idx} ({} rows)", set.rows.len());
			for row in &set.rows {
				println!("  {row}");
			}
		}
	}

	match result.err() {
		Some(err) => Err(err.clone()),
		None => Ok(()),
	}
}

#[derive(serde::Serialize)]
struct SetJson {
	columns: Vec<String>,
	rows: Vec<JsonValue>,
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	result_sets: Vec<SetJson>,
}

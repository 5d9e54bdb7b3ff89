use std::path::PathBuf;

use serde_json::{Value as JsonValue, json};
use ydbrow::row::{Result, ScanError, Scanner, ValueCursor};

use crate::cmd::util::{emit_json, open_dump};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-decompressed-bytes")]
	pub max_decompressed_bytes: Option<usize>,
}

/// Decode the first row of each result set with the matching example decoder.
///
/// Result sets are paired with decoders in order: list, tuple, dict, struct,
/// struct variant, tuple variant. Sets beyond the sixth are skipped.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		json,
		max_decompressed_bytes,
	} = args;

	let mut result = open_dump(&path, max_decompressed_bytes)?;
	let mut reports = Vec::new();

	let mut set = 0;
	while result.next_result_set() {
		let Some(mut decoder) = decoder_for(set) else {
			tracing::warn!(set, "no example decoder for result set, skipping");
			set += 1;
			continue;
		};
		set += 1;

		if !result.next_row() {
			tracing::warn!(set = set - 1, decoder = decoder.label(), "result set has no rows");
			continue;
		}
		result.scan(&mut *decoder)?;
		reports.push(decoder.report(set - 1));
	}

	if json {
		return emit_json(&ContainersJson {
			path: path.display().to_string(),
			result_sets: reports,
		});
	}

	for report in &reports {
		println!("set {} {} {}", report.set, report.decoder, report.ty);
		for entry in &report.entries {
			match &entry.key {
				Some(key) => println!("  {} {key} = {}", entry.path, entry.value),
				None => println!("  {} = {}", entry.path, entry.value),
			}
		}
	}
	Ok(())
}

fn decoder_for(set: usize) -> Option<Box<dyn Example>> {
	let decoder: Box<dyn Example> = match set {
		0 => Box::new(ListExample::default()),
		1 => Box::new(TupleExample::default()),
		2 => Box::new(DictExample::default()),
		3 => Box::new(StructExample::default()),
		4 => Box::new(StructVariantExample::default()),
		5 => Box::new(TupleVariantExample::default()),
		_ => return None,
	};
	Some(decoder)
}

/// Decoder that records what it saw for reporting.
trait Example: Scanner {
	fn label(&self) -> &'static str;
	fn log(&self) -> &Log;

	fn report(&self, set: usize) -> ReportJson {
		let log = self.log();
		ReportJson {
			set,
			decoder: self.label(),
			ty: log.ty.clone(),
			entries: log.entries.clone(),
		}
	}
}

#[derive(Debug, Default)]
struct Log {
	ty: String,
	entries: Vec<EntryJson>,
}

impl Log {
	fn start(&mut self, label: &'static str, value: &ValueCursor<'_>) {
		self.ty = value.current_type().map(ToString::to_string).unwrap_or_default();
		tracing::info!(decoder = label, ty = %self.ty, "decoding");
	}

	fn record(&mut self, label: &'static str, value: &ValueCursor<'_>, key: Option<String>, decoded: JsonValue) {
		let path = value.path().to_string();
		match &key {
			Some(key) => tracing::info!(decoder = label, path = %path, key = %key, value = %decoded, "decoded element"),
			None => tracing::info!(decoder = label, path = %path, value = %decoded, "decoded element"),
		}
		self.entries.push(EntryJson { path, key, value: decoded });
	}
}

#[derive(Debug, Default)]
struct ListExample {
	log: Log,
}

impl Scanner for ListExample {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> std::result::Result<(), ScanError> {
		self.log.start("list", value);
		for idx in 0..value.enter_list() {
			value.list_item(idx);
			let item = value.utf8();
			self.log.record("list", value, None, json!(item));
		}
		value.exit_list();
		value.result()
	}
}

impl Example for ListExample {
	fn label(&self) -> &'static str {
		"list"
	}

	fn log(&self) -> &Log {
		&self.log
	}
}

#[derive(Debug, Default)]
struct TupleExample {
	log: Log,
}

impl Scanner for TupleExample {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> std::result::Result<(), ScanError> {
		self.log.start("tuple", value);
		for idx in 0..value.enter_tuple() {
			value.tuple_item(idx);
			match idx {
				0 => {
					let item = value.int32();
					self.log.record("tuple", value, None, json!(item));
				}
				1 => {
					let item = value.utf8();
					self.log.record("tuple", value, None, json!(item));
				}
				2 => {
					for inner in 0..value.enter_list() {
						value.list_item(inner);
						let item = value.int32();
						self.log.record("tuple", value, None, json!(item));
					}
					value.exit_list();
				}
				_ => {}
			}
		}
		value.exit_tuple();
		value.result()
	}
}

impl Example for TupleExample {
	fn label(&self) -> &'static str {
		"tuple"
	}

	fn log(&self) -> &Log {
		&self.log
	}
}

#[derive(Debug, Default)]
struct DictExample {
	log: Log,
}

impl Scanner for DictExample {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> std::result::Result<(), ScanError> {
		self.log.start("dict", value);
		for idx in 0..value.enter_dict() {
			value.dict_key(idx);
			let key = value.utf8();
			value.dict_payload(idx);
			let payload = value.int32();
			self.log.record("dict", value, Some(key.to_owned()), json!(payload));
		}
		value.exit_dict();
		value.result()
	}
}

impl Example for DictExample {
	fn label(&self) -> &'static str {
		"dict"
	}

	fn log(&self) -> &Log {
		&self.log
	}
}

#[derive(Debug, Default)]
struct StructExample {
	log: Log,
}

impl Scanner for StructExample {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> std::result::Result<(), ScanError> {
		self.log.start("struct", value);
		for idx in 0..value.enter_struct() {
			let name = value.struct_field(idx);
			let field = value.int32();
			self.log.record("struct", value, Some(name.to_owned()), json!(field));
		}
		value.exit_struct();
		value.result()
	}
}

impl Example for StructExample {
	fn label(&self) -> &'static str {
		"struct"
	}

	fn log(&self) -> &Log {
		&self.log
	}
}

#[derive(Debug, Default)]
struct StructVariantExample {
	log: Log,
}

impl Scanner for StructVariantExample {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> std::result::Result<(), ScanError> {
		self.log.start("struct variant", value);
		let (name, index) = value.variant();
		let decoded = match name {
			"foo" => json!(value.uint32()),
			"bar" => json!(value.utf8()),
			"baz" => json!(value.int64()),
			_ => JsonValue::Null,
		};
		let branch = json!({ "name": name, "index": index, "type": type_text(value), "value": decoded });
		self.log.record("struct variant", value, None, branch);
		value.result()
	}
}

impl Example for StructVariantExample {
	fn label(&self) -> &'static str {
		"struct variant"
	}

	fn log(&self) -> &Log {
		&self.log
	}
}

#[derive(Debug, Default)]
struct TupleVariantExample {
	log: Log,
}

impl Scanner for TupleVariantExample {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> std::result::Result<(), ScanError> {
		self.log.start("tuple variant", value);
		let (_, index) = value.variant();
		let decoded = match index {
			0 => json!(value.uint32()),
			1 => json!(value.utf8()),
			2 => json!(value.int64()),
			_ => JsonValue::Null,
		};
		let branch = json!({ "index": index, "type": type_text(value), "value": decoded });
		self.log.record("tuple variant", value, None, branch);
		value.result()
	}
}

impl Example for TupleVariantExample {
	fn label(&self) -> &'static str {
		"tuple variant"
	}

	fn log(&self) -> &Log {
		&self.log
	}
}

fn type_text(value: &ValueCursor<'_>) -> String {
	value.current_type().map(ToString::to_string).unwrap_or_default()
}

#[derive(Debug, Clone, serde::Serialize)]
struct EntryJson {
	path: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	key: Option<String>,
	value: JsonValue,
}

#[derive(serde::Serialize)]
struct ReportJson {
	set: usize,
	decoder: &'static str,
	#[serde(rename = "type")]
	ty: String,
	entries: Vec<EntryJson>,
}

#[derive(serde::Serialize)]
struct ContainersJson {
	path: String,
	result_sets: Vec<ReportJson>,
}

#[cfg(test)]
mod tests;

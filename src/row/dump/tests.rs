use std::fs;
use std::path::PathBuf;

use crate::row::{Compression, LoadOptions, Primitive, QueryResult, RowError, Type};

const LIST_DUMP: &str = r#"{
	"result_sets": [
		{
			"columns": [{ "name": "column0", "type": { "list": "utf8" } }],
			"rows": [[{ "items": [{ "text": "foo" }, { "text": "bar" }] }]]
		}
	]
}"#;

fn temp_dump(name: &str, bytes: &[u8]) -> PathBuf {
	let path = std::env::temp_dir().join(format!("ydbrow-{}-{name}", std::process::id()));
	fs::write(&path, bytes).expect("temp dump writes");
	path
}

#[test]
fn from_slice_parses_columns_and_rows() {
	let mut result = QueryResult::from_slice(LIST_DUMP.as_bytes()).expect("dump parses");

	assert_eq!(result.result_set_count(), 1);
	assert!(result.next_result_set());
	assert_eq!(result.columns()[0].ty, Type::list(Primitive::Utf8.into()));
	assert!(result.next_row());

	let mut out = Vec::<String>::new();
	result.scan(&mut out).expect("list scans");
	assert_eq!(out, ["foo", "bar"]);
}

#[test]
fn to_json_round_trips_through_from_slice() {
	let result = QueryResult::from_slice(LIST_DUMP.as_bytes()).expect("dump parses");

	let text = result.to_json().expect("dump serializes");
	let again = QueryResult::from_slice(text.as_bytes()).expect("dump reparses");

	assert_eq!(again.result_sets(), result.result_sets());
}

#[test]
fn open_detects_plain_json() {
	let path = temp_dump("plain.json", LIST_DUMP.as_bytes());

	let (compression, result) = QueryResult::open(&path, &LoadOptions::default()).expect("plain dump opens");
	let _ = fs::remove_file(&path);

	assert_eq!(compression, Compression::None);
	assert_eq!(result.result_set_count(), 1);
}

#[test]
fn open_decompresses_zstd() {
	let packed = zstd::encode_all(LIST_DUMP.as_bytes(), 3).expect("zstd encodes");
	let path = temp_dump("packed.json.zst", &packed);

	let (compression, result) = QueryResult::open(&path, &LoadOptions::default()).expect("zstd dump opens");
	let _ = fs::remove_file(&path);

	assert_eq!(compression, Compression::Zstd);
	assert_eq!(result.result_sets()[0].rows.len(), 1);
}

#[test]
fn open_enforces_decompression_limit() {
	let packed = zstd::encode_all(LIST_DUMP.as_bytes(), 3).expect("zstd encodes");
	let path = temp_dump("limit.json.zst", &packed);

	let err = QueryResult::open(&path, &LoadOptions { max_decompressed_bytes: 16 }).expect_err("limit trips");
	let _ = fs::remove_file(&path);

	assert!(matches!(err, RowError::DecompressedTooLarge { limit: 16 }));
}

#[test]
fn open_rejects_unknown_magic() {
	let path = temp_dump("garbage.bin", b"PK\x03\x04rest");

	let err = QueryResult::open(&path, &LoadOptions::default()).expect_err("garbage is rejected");
	let _ = fs::remove_file(&path);

	assert!(matches!(err, RowError::UnknownMagic { magic } if &magic == b"PK\x03\x04"));
}

#[test]
fn zstd_without_json_inside_is_rejected() {
	let packed = zstd::encode_all(&b"not json"[..], 3).expect("zstd encodes");
	let path = temp_dump("notjson.zst", &packed);

	let err = QueryResult::open(&path, &LoadOptions::default()).expect_err("payload is not json");
	let _ = fs::remove_file(&path);

	assert!(matches!(err, RowError::NotJsonAfterDecompress));
}

#[test]
fn ragged_dump_is_rejected() {
	let text = r#"{"result_sets":[{"columns":[{"name":"a","type":"int32"}],"rows":[[{"int32":1},{"int32":2}]]}]}"#;

	let err = QueryResult::from_slice(text.as_bytes()).expect_err("row width mismatch");

	assert!(matches!(err, RowError::RowWidthMismatch { set: 0, row: 0, expected: 1, got: 2 }));
}

#[test]
fn null_and_variant_values_parse() {
	let text = r#"{"result_sets":[{"columns":[
		{"name":"maybe","type":{"optional":"int32"}},
		{"name":"pick","type":{"variant":{"tuple":["uint32","utf8","int64"]}}}
	],"rows":[["null",{"variant":{"index":2,"value":{"int64":42}}}]]}]}"#;

	let mut result = QueryResult::from_slice(text.as_bytes()).expect("dump parses");
	result.next_result_set();
	result.next_row();

	let mut maybe = Some(1_i32);
	result.scan(&mut maybe).expect("optional scans");
	let mut pick = crate::row::JsonScanner::default();
	result.scan(&mut pick).expect("variant scans");

	assert_eq!(maybe, None);
	assert_eq!(pick.value, serde_json::json!({ "branch": null, "index": 2, "value": 42 }));
}

#[test]
fn missing_file_is_io_error() {
	let path = std::env::temp_dir().join("ydbrow-definitely-missing.json");

	let err = QueryResult::open(&path, &LoadOptions::default()).expect_err("missing file fails");

	assert!(matches!(err, RowError::Io(_)));
}

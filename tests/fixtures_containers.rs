#![allow(missing_docs)]

use std::collections::HashMap;

use ydbrow::row::{Compression, LoadOptions, QueryResult, RowError, ScanError, Scanner, ValueCursor};
use ydbrow_testkit::{fixture_json, fixture_path};

fn open_containers() -> QueryResult {
	let (compression, result) = QueryResult::open(fixture_path("containers.json"), &LoadOptions::default()).expect("fixture opens");
	assert_eq!(compression, Compression::None);
	result
}

fn first_row(result: &mut QueryResult) {
	assert!(result.next_result_set(), "expected another result set");
	assert!(result.next_row(), "expected a row");
}

#[derive(Default)]
struct Tuple {
	id: i32,
	name: String,
	list: Vec<i32>,
}

impl Scanner for Tuple {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError> {
		value.enter_tuple();
		value.tuple_item(0);
		self.id.scan_value(value)?;
		value.tuple_item(1);
		self.name.scan_value(value)?;
		value.tuple_item(2);
		self.list.scan_value(value)?;
		value.exit_tuple();
		value.result()
	}
}

#[derive(Default)]
struct Fields(Vec<(String, i32)>);

impl Scanner for Fields {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError> {
		for idx in 0..value.enter_struct() {
			let name = value.struct_field(idx).to_owned();
			self.0.push((name, value.int32()));
		}
		value.exit_struct();
		value.result()
	}
}

#[derive(Default)]
struct Picked {
	name: String,
	index: u32,
	payload: i64,
}

impl Scanner for Picked {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError> {
		let (name, index) = value.variant();
		self.name = name.to_owned();
		self.index = index;
		if index == 2 {
			self.payload = value.int64();
		}
		value.result()
	}
}

#[test]
fn containers_fixture_decodes_all_six_sets() {
	let mut result = open_containers();
	assert_eq!(result.result_set_count(), 6);

	first_row(&mut result);
	let mut list = Vec::<String>::new();
	result.scan(&mut list).expect("list scans");
	assert_eq!(list, ["foo", "bar", "baz"]);

	first_row(&mut result);
	let mut tuple = Tuple::default();
	result.scan(&mut tuple).expect("tuple scans");
	assert_eq!((tuple.id, tuple.name.as_str(), tuple.list.as_slice()), (42, "foo", &[41, 42, 43][..]));

	first_row(&mut result);
	let mut dict = HashMap::<String, i32>::new();
	result.scan(&mut dict).expect("dict scans");
	assert_eq!(dict, HashMap::from([("foo".to_owned(), 10), ("bar".to_owned(), 20), ("baz".to_owned(), 30)]));

	first_row(&mut result);
	let mut fields = Fields::default();
	result.scan(&mut fields).expect("struct scans");
	assert_eq!(fields.0, [("foo".to_owned(), 41), ("bar".to_owned(), 42), ("baz".to_owned(), 43)]);

	first_row(&mut result);
	let mut named = Picked::default();
	result.scan(&mut named).expect("struct variant scans");
	assert_eq!((named.name.as_str(), named.index, named.payload), ("baz", 2, 42));

	first_row(&mut result);
	let mut positional = Picked::default();
	result.scan(&mut positional).expect("tuple variant scans");
	assert_eq!((positional.name.as_str(), positional.index, positional.payload), ("", 2, 42));

	assert!(!result.next_result_set());
	assert!(result.err().is_none());
}

#[test]
fn wrong_decoder_for_set_is_reported_with_location() {
	let mut result = open_containers();
	first_row(&mut result);

	let mut wrong = HashMap::<String, i32>::new();
	let err = result.scan(&mut wrong).expect_err("dict decoder on a list fails");

	assert_eq!(err.to_string(), "scan result set 0 row 0 column column0: expected Dict, found List<Utf8> at $");
	assert!(matches!(result.err(), Some(RowError::Scan { set: 0, .. })));

	first_row(&mut result);
	let mut tuple = Tuple::default();
	result.scan(&mut tuple).expect("later sets still decode");
	assert_eq!(tuple.id, 42);
}

#[test]
fn zstd_fixture_copy_decodes_identically() {
	let plain = std::fs::read(fixture_path("containers.json")).expect("fixture reads");
	let packed = zstd::encode_all(plain.as_slice(), 0).expect("zstd encodes");
	let path = ydbrow_testkit::scratch_path("containers.json.zst");
	std::fs::write(&path, packed).expect("scratch writes");

	let (compression, packed) = QueryResult::open(&path, &LoadOptions::default()).expect("zstd fixture opens");
	let _ = std::fs::remove_file(&path);

	assert_eq!(compression, Compression::Zstd);
	assert_eq!(packed.result_sets(), open_containers().result_sets());
}

#[test]
fn dump_round_trip_preserves_fixture_json() {
	let result = open_containers();

	let text = result.to_json().expect("dump serializes");
	let reparsed: serde_json::Value = serde_json::from_str(&text).expect("dump json parses");

	assert_eq!(reparsed, fixture_json("containers.json"));
}

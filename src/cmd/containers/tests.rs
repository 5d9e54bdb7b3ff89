use serde_json::json;
use ydbrow::row::{Member, Pair, Primitive, Scanner, Type, Value, ValueCursor, VariantType};

use super::{DictExample, Example, ListExample, StructVariantExample, TupleExample, TupleVariantExample, decoder_for};

fn text(value: &str) -> Value {
	Value::Text(value.to_owned())
}

fn decode(decoder: &mut dyn Example, ty: &Type, value: &Value) {
	let mut cursor = ValueCursor::new(ty, value);
	decoder.scan_value(&mut cursor).expect("example decodes");
}

#[test]
fn list_example_records_each_element_path() {
	let ty = Type::list(Primitive::Utf8.into());
	let value = Value::Items(vec![text("foo"), text("bar"), text("baz")]);

	let mut decoder = ListExample::default();
	decode(&mut decoder, &ty, &value);

	let report = decoder.report(0);
	assert_eq!(report.ty, "List<Utf8>");
	let paths: Vec<_> = report.entries.iter().map(|entry| entry.path.as_str()).collect();
	assert_eq!(paths, ["$[0]", "$[1]", "$[2]"]);
	assert_eq!(report.entries[2].value, json!("baz"));
}

#[test]
fn tuple_example_flattens_nested_list() {
	let ty = Type::Tuple(vec![Primitive::Int32.into(), Primitive::Utf8.into(), Type::list(Primitive::Int32.into())]);
	let value = Value::Items(vec![
		Value::Int32(42),
		text("foo"),
		Value::Items(vec![Value::Int32(41), Value::Int32(42), Value::Int32(43)]),
	]);

	let mut decoder = TupleExample::default();
	decode(&mut decoder, &ty, &value);

	let entries = decoder.report(1).entries;
	let values: Vec<_> = entries.iter().map(|entry| entry.value.clone()).collect();
	assert_eq!(values, [json!(42), json!("foo"), json!(41), json!(42), json!(43)]);
	assert_eq!(entries[4].path, "$[2][2]");
}

#[test]
fn dict_example_keys_entries() {
	let ty = Type::dict(Primitive::Utf8.into(), Primitive::Int32.into());
	let value = Value::Pairs(vec![Pair {
		key: text("foo"),
		payload: Value::Int32(10),
	}]);

	let mut decoder = DictExample::default();
	decode(&mut decoder, &ty, &value);

	let entries = decoder.report(2).entries;
	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0].key.as_deref(), Some("foo"));
	assert_eq!(entries[0].path, "${0}.payload");
	assert_eq!(entries[0].value, json!(10));
}

#[test]
fn variant_examples_report_branch_type_and_value() {
	let members = vec![
		Member::new("foo", Primitive::Uint32),
		Member::new("bar", Primitive::Utf8),
		Member::new("baz", Primitive::Int64),
	];
	let items = members.iter().map(|member| member.ty.clone()).collect();
	let by_name = Type::Variant(VariantType::Struct(members));
	let by_index = Type::Variant(VariantType::Tuple(items));
	let value = Value::Variant {
		index: 2,
		value: Box::new(Value::Int64(42)),
	};

	let mut named = StructVariantExample::default();
	decode(&mut named, &by_name, &value);
	let mut positional = TupleVariantExample::default();
	decode(&mut positional, &by_index, &value);

	let named = named.report(4);
	assert_eq!(named.entries[0].path, "$<baz>");
	assert_eq!(named.entries[0].value, json!({ "name": "baz", "index": 2, "type": "Int64", "value": 42 }));

	let positional = positional.report(5);
	assert_eq!(positional.entries[0].path, "$<2>");
	assert_eq!(positional.entries[0].value, json!({ "index": 2, "type": "Int64", "value": 42 }));
}

#[test]
fn wrong_shape_surfaces_latched_error() {
	let ty = Type::from(Primitive::Utf8);
	let value = text("flat");

	let mut decoder = ListExample::default();
	let mut cursor = ValueCursor::new(&ty, &value);
	let err = decoder.scan_value(&mut cursor).expect_err("utf8 is not a list");

	assert_eq!(err.to_string(), "expected List, found Utf8 at $");
	assert!(decoder.report(0).entries.is_empty());
}

#[test]
fn decoders_pair_with_the_first_six_sets() {
	let labels: Vec<_> = (0..7).map(|set| decoder_for(set).map(|decoder| decoder.label())).collect();

	assert_eq!(
		labels,
		[
			Some("list"),
			Some("tuple"),
			Some("dict"),
			Some("struct"),
			Some("struct variant"),
			Some("tuple variant"),
			None
		]
	);
}

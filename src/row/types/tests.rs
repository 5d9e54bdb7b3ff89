use crate::row::{Member, Primitive, Shape, Type, VariantType};

fn containers_struct() -> Type {
	Type::Struct(vec![
		Member::new("foo", Primitive::Int32),
		Member::new("bar", Primitive::Int32),
		Member::new("baz", Primitive::Int32),
	])
}

#[test]
fn display_uses_yql_type_syntax() {
	let tuple = Type::Tuple(vec![Primitive::Int32.into(), Primitive::Utf8.into(), Type::list(Primitive::Int32.into())]);
	assert_eq!(tuple.to_string(), "Tuple<Int32,Utf8,List<Int32>>");

	let dict = Type::dict(Primitive::Utf8.into(), Type::optional(Primitive::Int32.into()));
	assert_eq!(dict.to_string(), "Dict<Utf8,Optional<Int32>>");

	assert_eq!(containers_struct().to_string(), "Struct<'foo':Int32,'bar':Int32,'baz':Int32>");
	assert_eq!(Type::Decimal { precision: 22, scale: 9 }.to_string(), "Decimal(22,9)");

	let variant = Type::Variant(VariantType::Tuple(vec![Primitive::Uint32.into(), Primitive::Int64.into()]));
	assert_eq!(variant.to_string(), "Variant<Uint32,Int64>");
}

#[test]
fn shape_ignores_element_types() {
	assert_eq!(Type::from(Primitive::Uuid).shape(), Shape::Scalar);
	assert_eq!(Type::Decimal { precision: 1, scale: 0 }.shape(), Shape::Scalar);
	assert_eq!(Type::optional(containers_struct()).shape(), Shape::Optional);
	assert_eq!(containers_struct().shape(), Shape::Struct);
	assert_eq!(Type::Variant(VariantType::Struct(Vec::new())).shape(), Shape::Variant);
}

#[test]
fn accessors_match_only_their_shape() {
	let list = Type::list(Primitive::Utf8.into());
	assert_eq!(list.list_item(), Some(&Type::Primitive(Primitive::Utf8)));
	assert!(list.tuple_items().is_none());
	assert!(list.struct_members().is_none());

	let dict = Type::dict(Primitive::Utf8.into(), Primitive::Int32.into());
	let (key, payload) = dict.dict_types().expect("dict types");
	assert_eq!(key.primitive(), Some(Primitive::Utf8));
	assert_eq!(payload.primitive(), Some(Primitive::Int32));
	assert!(dict.optional_item().is_none());
}

#[test]
fn type_json_keeps_primitives_as_bare_strings() {
	let ty = Type::Tuple(vec![Primitive::Utf8.into(), Type::list(Primitive::JsonDocument.into())]);

	let text = serde_json::to_string(&ty).expect("type serializes");
	assert_eq!(text, r#"{"tuple":["utf8",{"list":"json_document"}]}"#);

	let back: Type = serde_json::from_str(&text).expect("type parses");
	assert_eq!(back, ty);
}

#[test]
fn type_json_parses_named_forms() {
	let text = r#"{"variant":{"struct":[{"name":"foo","type":"uint32"},{"name":"baz","type":{"decimal":{"precision":22,"scale":9}}}]}}"#;

	let ty: Type = serde_json::from_str(text).expect("variant type parses");

	let variant = ty.variant().expect("variant table");
	assert_eq!(variant.len(), 2);
	let baz = variant.branch(1).expect("second branch");
	assert_eq!(baz.name, Some("baz"));
	assert_eq!(baz.ty, &Type::Decimal { precision: 22, scale: 9 });
}

#[test]
fn unknown_primitive_name_is_rejected() {
	let err = serde_json::from_str::<Type>(r#""int128""#);
	assert!(err.is_err());
}

mod variant_branches {

	use crate::row::{Member, Primitive, VariantType};

	fn struct_variant() -> VariantType {
		VariantType::Struct(vec![
			Member::new("foo", Primitive::Uint32),
			Member::new("bar", Primitive::Utf8),
			Member::new("baz", Primitive::Int64),
		])
	}

	#[test]
	fn branch_resolves_by_index_and_name() {
		let variant = struct_variant();

		let by_index = variant.branch(2).expect("branch 2");
		let by_name = variant.branch_by_name("baz").expect("branch baz");

		assert_eq!(by_index, by_name);
		assert_eq!(by_index.index, 2);
		assert_eq!(by_index.ty.primitive(), Some(Primitive::Int64));
	}

	#[test]
	fn out_of_range_branch_is_none() {
		assert!(struct_variant().branch(3).is_none());
		assert!(struct_variant().branch_by_name("qux").is_none());
	}

	#[test]
	fn tuple_branches_have_no_names() {
		let variant = VariantType::Tuple(vec![Primitive::Uint32.into(), Primitive::Utf8.into()]);

		let names: Vec<_> = variant.branches().map(|branch| branch.name).collect();

		assert_eq!(names, [None, None]);
		assert!(variant.branch_by_name("foo").is_none());
		assert!(!variant.is_empty());
	}
}

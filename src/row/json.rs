use serde_json::{Map, Value as JsonValue, json};

use crate::row::{Primitive, ScanError, Scanner, Shape, Type, ValueCursor};

/// Limits for type-driven JSON rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
	/// Maximum container nesting depth.
	pub max_depth: usize,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self { max_depth: 32 }
	}
}

/// Generic decoder turning any result value into `serde_json::Value`.
///
/// The walk is driven entirely by [`ValueCursor::current_type`], so it works
/// for values whose shape is only known at run time.
///
/// Rendering rules: struct -> object, list/tuple -> array, dict -> array of
/// `{"key", "payload"}` objects (keys need not be strings), variant ->
/// `{"branch", "index", "value"}`, null optional -> `null`, byte strings ->
/// string when valid UTF-8 and an array of bytes otherwise, uuid -> hex,
/// decimal -> string.
#[derive(Debug, Clone, Default)]
pub struct JsonScanner {
	/// Rendering limits.
	pub options: RenderOptions,
	/// Last decoded value.
	pub value: JsonValue,
}

impl JsonScanner {
	/// Create a scanner with explicit limits.
	pub fn new(options: RenderOptions) -> Self {
		Self {
			options,
			value: JsonValue::Null,
		}
	}
}

impl Scanner for JsonScanner {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError> {
		self.value = render(value, self.options, 0)?;
		value.result()
	}
}

fn render(cursor: &mut ValueCursor<'_>, options: RenderOptions, depth: usize) -> Result<JsonValue, ScanError> {
	if depth > options.max_depth {
		return Err(ScanError::DepthExceeded {
			max_depth: options.max_depth,
			path: cursor.path().to_string(),
		});
	}
	let Some(ty) = cursor.current_type() else {
		cursor.result()?;
		return Err(ScanError::custom(format!("no value to render at {}", cursor.path())));
	};

	let out = match ty.shape() {
		Shape::Scalar => render_scalar(cursor, ty),
		Shape::Optional => {
			if cursor.unwrap() {
				render(cursor, options, depth + 1)?
			} else {
				JsonValue::Null
			}
		}
		Shape::List => {
			let count = cursor.enter_list();
			let mut items = Vec::with_capacity(count);
			for idx in 0..count {
				cursor.list_item(idx);
				items.push(render(cursor, options, depth + 1)?);
			}
			cursor.exit_list();
			JsonValue::Array(items)
		}
		Shape::Tuple => {
			let count = cursor.enter_tuple();
			let mut items = Vec::with_capacity(count);
			for idx in 0..count {
				cursor.tuple_item(idx);
				items.push(render(cursor, options, depth + 1)?);
			}
			cursor.exit_tuple();
			JsonValue::Array(items)
		}
		Shape::Struct => {
			let count = cursor.enter_struct();
			let mut fields = Map::new();
			for idx in 0..count {
				let name = cursor.struct_field(idx);
				fields.insert(name.to_owned(), render(cursor, options, depth + 1)?);
			}
			cursor.exit_struct();
			JsonValue::Object(fields)
		}
		Shape::Dict => {
			let count = cursor.enter_dict();
			let mut pairs = Vec::with_capacity(count);
			for idx in 0..count {
				cursor.dict_key(idx);
				let key = render(cursor, options, depth + 1)?;
				cursor.dict_payload(idx);
				let payload = render(cursor, options, depth + 1)?;
				pairs.push(json!({ "key": key, "payload": payload }));
			}
			cursor.exit_dict();
			JsonValue::Array(pairs)
		}
		Shape::Variant => {
			let (name, index) = cursor.variant();
			let branch = if name.is_empty() { JsonValue::Null } else { json!(name) };
			let value = render(cursor, options, depth + 1)?;
			json!({ "branch": branch, "index": index, "value": value })
		}
	};

	cursor.result()?;
	Ok(out)
}

fn render_scalar(cursor: &mut ValueCursor<'_>, ty: &Type) -> JsonValue {
	let Some(kind) = ty.primitive() else {
		return json!(cursor.decimal().to_string());
	};

	match kind {
		Primitive::Bool => json!(cursor.bool()),
		Primitive::Int8 => json!(cursor.int8()),
		Primitive::Uint8 => json!(cursor.uint8()),
		Primitive::Int16 => json!(cursor.int16()),
		Primitive::Uint16 => json!(cursor.uint16()),
		Primitive::Int32 => json!(cursor.int32()),
		Primitive::Uint32 => json!(cursor.uint32()),
		Primitive::Int64 => json!(cursor.int64()),
		Primitive::Uint64 => json!(cursor.uint64()),
		Primitive::Float => json!(cursor.float()),
		Primitive::Double => json!(cursor.double()),
		Primitive::Date => json!(cursor.date()),
		Primitive::Datetime => json!(cursor.datetime()),
		Primitive::Timestamp => json!(cursor.timestamp()),
		Primitive::Interval => json!(cursor.interval()),
		Primitive::TzDate => json!(cursor.tz_date()),
		Primitive::TzDatetime => json!(cursor.tz_datetime()),
		Primitive::TzTimestamp => json!(cursor.tz_timestamp()),
		Primitive::String => bytes_json(cursor.bytes()),
		Primitive::Yson => bytes_json(cursor.yson()),
		Primitive::Utf8 => json!(cursor.utf8()),
		Primitive::Json => json!(cursor.json()),
		Primitive::JsonDocument => json!(cursor.json_document()),
		Primitive::DyNumber => json!(cursor.dy_number()),
		Primitive::Uuid => json!(uuid_hex(cursor.uuid())),
	}
}

fn bytes_json(bytes: &[u8]) -> JsonValue {
	match std::str::from_utf8(bytes) {
		Ok(text) => json!(text),
		Err(_) => JsonValue::Array(bytes.iter().map(|byte| json!(byte)).collect()),
	}
}

fn uuid_hex(bytes: [u8; 16]) -> String {
	bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

use crate::row::value::Pair;
use crate::row::{Decimal, Member, PathStep, Primitive, ScanError, Shape, Type, Value, ValuePath};

const NO_VALUE: &str = "no value";

/// Depth-first cursor over one typed result value.
///
/// Containers are opened with `enter_*`, addressed with positional advance
/// calls, and closed with `exit_*`. Variants and optionals are stepped into
/// without a frame. The first failing operation is latched; every later
/// operation is a no-op returning a zero value until the caller inspects
/// [`ValueCursor::err`].
#[derive(Debug, Clone)]
pub struct ValueCursor<'a> {
	stack: Vec<Frame<'a>>,
	current: Option<Slot<'a>>,
	err: Option<ScanError>,
}

#[derive(Debug, Clone)]
struct Slot<'a> {
	ty: &'a Type,
	value: &'a Value,
	hops: Vec<Hop<'a>>,
}

impl<'a> Slot<'a> {
	fn new(ty: &'a Type, value: &'a Value) -> Self {
		Self { ty, value, hops: Vec::new() }
	}

	fn hop(&self, ty: &'a Type, value: &'a Value, hop: Hop<'a>) -> Self {
		let mut hops = self.hops.clone();
		hops.push(hop);
		Self { ty, value, hops }
	}
}

/// Frameless step taken from a slot: variant branch or optional unwrap.
#[derive(Debug, Clone, Copy)]
enum Hop<'a> {
	Branch { index: u32, name: Option<&'a str> },
	Unwrap,
}

#[derive(Debug, Clone)]
struct Frame<'a> {
	container: Container<'a>,
	origin: Slot<'a>,
	at: Option<Position>,
}

#[derive(Debug, Clone, Copy)]
enum Container<'a> {
	List { item: &'a Type, items: &'a [Value] },
	Tuple { types: &'a [Type], items: &'a [Value] },
	Struct { members: &'a [Member], items: &'a [Value] },
	Dict { key: &'a Type, payload: &'a Type, pairs: &'a [Pair] },
}

impl<'a> Container<'a> {
	fn shape(self) -> Shape {
		match self {
			Self::List { .. } => Shape::List,
			Self::Tuple { .. } => Shape::Tuple,
			Self::Struct { .. } => Shape::Struct,
			Self::Dict { .. } => Shape::Dict,
		}
	}

	fn len(self) -> usize {
		match self {
			Self::List { items, .. } | Self::Tuple { items, .. } | Self::Struct { items, .. } => items.len(),
			Self::Dict { pairs, .. } => pairs.len(),
		}
	}

	/// Resolve a position that is already known to be in range.
	fn get(self, at: Position) -> Option<(&'a Type, &'a Value)> {
		match (self, at) {
			(Self::List { item, items }, Position::Item(idx)) => Some((item, items.get(idx)?)),
			(Self::Tuple { types, items }, Position::Item(idx)) => Some((types.get(idx)?, items.get(idx)?)),
			(Self::Struct { members, items }, Position::Item(idx)) => Some((&members.get(idx)?.ty, items.get(idx)?)),
			(Self::Dict { key, pairs, .. }, Position::Key(idx)) => Some((key, &pairs.get(idx)?.key)),
			(Self::Dict { payload, pairs, .. }, Position::Payload(idx)) => Some((payload, &pairs.get(idx)?.payload)),
			_ => None,
		}
	}

	fn step(self, at: Position) -> PathStep {
		match (self, at) {
			(Self::Struct { members, .. }, Position::Item(idx)) => match members.get(idx) {
				Some(member) => PathStep::Field(member.name.clone()),
				None => PathStep::Index(idx),
			},
			(_, Position::Item(idx)) => PathStep::Index(idx),
			(_, Position::Key(idx)) => PathStep::Key(idx),
			(_, Position::Payload(idx)) => PathStep::Payload(idx),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
	Item(usize),
	Key(usize),
	Payload(usize),
}

impl Position {
	fn index(self) -> usize {
		match self {
			Self::Item(idx) | Self::Key(idx) | Self::Payload(idx) => idx,
		}
	}
}

impl<'a> ValueCursor<'a> {
	/// Create a cursor positioned at a root value of declared type `ty`.
	pub fn new(ty: &'a Type, value: &'a Value) -> Self {
		Self {
			stack: Vec::new(),
			current: Some(Slot::new(ty, value)),
			err: None,
		}
	}

	/// Latched error, if any operation has failed.
	pub fn err(&self) -> Option<&ScanError> {
		self.err.as_ref()
	}

	/// Latched error as a `Result`, for returning from a decoder.
	pub fn result(&self) -> Result<(), ScanError> {
		match &self.err {
			Some(err) => Err(err.clone()),
			None => Ok(()),
		}
	}

	/// Number of open container frames; zero at the root.
	pub fn depth(&self) -> usize {
		self.stack.len()
	}

	/// Declared type of the addressed value, or `None` at a container boundary.
	pub fn current_type(&self) -> Option<&'a Type> {
		self.current.as_ref().map(|slot| slot.ty)
	}

	/// Diagnostic breadcrumb of the cursor position.
	pub fn path(&self) -> ValuePath {
		let mut steps = Vec::new();
		for frame in &self.stack {
			push_hops(&mut steps, &frame.origin.hops);
			if let Some(at) = frame.at {
				steps.push(frame.container.step(at));
			}
		}
		if let Some(slot) = &self.current {
			push_hops(&mut steps, &slot.hops);
		}
		ValuePath { steps }
	}

	/// Open the addressed list and return its element count.
	pub fn enter_list(&mut self) -> usize {
		let Some(slot) = self.expect_shape(Shape::List) else {
			return 0;
		};
		match (slot.ty, slot.value) {
			(Type::List(item), Value::Items(items)) => self.push(Container::List { item, items }, slot),
			_ => {
				self.malformed(slot.ty, slot.value);
				0
			}
		}
	}

	/// Address list element `index`.
	pub fn list_item(&mut self, index: usize) {
		self.advance(Shape::List, "list_item", Position::Item(index));
	}

	/// Close the innermost list.
	pub fn exit_list(&mut self) {
		self.exit(Shape::List, "exit_list");
	}

	/// Open the addressed tuple and return its element count.
	pub fn enter_tuple(&mut self) -> usize {
		let Some(slot) = self.expect_shape(Shape::Tuple) else {
			return 0;
		};
		match (slot.ty, slot.value) {
			(Type::Tuple(types), Value::Items(items)) if types.len() == items.len() => self.push(Container::Tuple { types, items }, slot),
			_ => {
				self.malformed(slot.ty, slot.value);
				0
			}
		}
	}

	/// Address tuple element `index` and return its declared type.
	pub fn tuple_item(&mut self, index: usize) -> Option<&'a Type> {
		self.advance(Shape::Tuple, "tuple_item", Position::Item(index))
	}

	/// Close the innermost tuple.
	pub fn exit_tuple(&mut self) {
		self.exit(Shape::Tuple, "exit_tuple");
	}

	/// Open the addressed struct and return its field count.
	pub fn enter_struct(&mut self) -> usize {
		let Some(slot) = self.expect_shape(Shape::Struct) else {
			return 0;
		};
		match (slot.ty, slot.value) {
			(Type::Struct(members), Value::Items(items)) if members.len() == items.len() => self.push(Container::Struct { members, items }, slot),
			_ => {
				self.malformed(slot.ty, slot.value);
				0
			}
		}
	}

	/// Address struct field `index` and return its name.
	pub fn struct_field(&mut self, index: usize) -> &'a str {
		if self.advance(Shape::Struct, "struct_field", Position::Item(index)).is_none() {
			return "";
		}
		match self.stack.last().map(|frame| frame.container) {
			Some(Container::Struct { members, .. }) => members.get(index).map_or("", |member| member.name.as_str()),
			_ => "",
		}
	}

	/// Address the struct field called `name`; returns whether it was found.
	pub fn struct_field_named(&mut self, name: &str) -> bool {
		if self.err.is_some() {
			return false;
		}
		let found = match self.stack.last().map(|frame| frame.container) {
			Some(Container::Struct { members, .. }) => members.iter().position(|member| member.name == name),
			_ => {
				self.advance(Shape::Struct, "struct_field_named", Position::Item(0));
				return false;
			}
		};
		match found {
			Some(idx) => self.advance(Shape::Struct, "struct_field_named", Position::Item(idx)).is_some(),
			None => {
				let err = ScanError::MissingField {
					name: name.to_owned(),
					path: self.path().to_string(),
				};
				self.fail(err);
				false
			}
		}
	}

	/// Close the innermost struct.
	pub fn exit_struct(&mut self) {
		self.exit(Shape::Struct, "exit_struct");
	}

	/// Open the addressed dict and return its pair count.
	pub fn enter_dict(&mut self) -> usize {
		let Some(slot) = self.expect_shape(Shape::Dict) else {
			return 0;
		};
		match (slot.ty, slot.value) {
			(Type::Dict { key, payload }, Value::Pairs(pairs)) => self.push(Container::Dict { key, payload, pairs }, slot),
			_ => {
				self.malformed(slot.ty, slot.value);
				0
			}
		}
	}

	/// Address the key of dict pair `index`.
	pub fn dict_key(&mut self, index: usize) {
		self.advance(Shape::Dict, "dict_key", Position::Key(index));
	}

	/// Address the payload of dict pair `index`.
	pub fn dict_payload(&mut self, index: usize) {
		self.advance(Shape::Dict, "dict_payload", Position::Payload(index));
	}

	/// Close the innermost dict.
	pub fn exit_dict(&mut self) {
		self.exit(Shape::Dict, "exit_dict");
	}

	/// Step onto the active branch of the addressed variant.
	///
	/// Returns the branch name (empty for tuple variants) and index.
	pub fn variant(&mut self) -> (&'a str, u32) {
		let Some(slot) = self.expect_shape(Shape::Variant) else {
			return ("", 0);
		};
		let (Type::Variant(variant), Value::Variant { index, value }) = (slot.ty, slot.value) else {
			self.malformed(slot.ty, slot.value);
			return ("", 0);
		};
		let Some(branch) = variant.branch(*index) else {
			let err = ScanError::MalformedVariant {
				index: *index,
				branches: variant.len(),
				path: self.path().to_string(),
			};
			self.fail(err);
			return ("", 0);
		};

		let hop = Hop::Branch {
			index: branch.index,
			name: branch.name,
		};
		self.current = Some(slot.hop(branch.ty, value, hop));
		(branch.name.unwrap_or(""), branch.index)
	}

	/// Whether the addressed value is declared optional.
	pub fn is_optional(&self) -> bool {
		self.err.is_none() && self.current_type().is_some_and(|ty| ty.shape() == Shape::Optional)
	}

	/// Whether the addressed value is an absent optional.
	pub fn is_null(&self) -> bool {
		self.is_optional() && self.current.as_ref().is_some_and(|slot| matches!(slot.value, Value::Null))
	}

	/// Step into the addressed optional.
	///
	/// Returns `false` and stays on the optional when it is null.
	pub fn unwrap(&mut self) -> bool {
		let Some(slot) = self.expect_shape(Shape::Optional) else {
			return false;
		};
		let Type::Optional(item) = slot.ty else {
			self.malformed(slot.ty, slot.value);
			return false;
		};
		let inner = match slot.value {
			Value::Null => return false,
			Value::Nested(inner) => inner.as_ref(),
			_ if item.shape() == Shape::Optional => {
				self.malformed(slot.ty, slot.value);
				return false;
			}
			other => other,
		};
		self.current = Some(slot.hop(item, inner, Hop::Unwrap));
		true
	}

	/// Read a `Bool`.
	pub fn bool(&mut self) -> bool {
		self.primitive(Primitive::Bool, |value| match value {
			Value::Bool(v) => Some(*v),
			_ => None,
		})
	}

	/// Read an `Int8`.
	pub fn int8(&mut self) -> i8 {
		self.primitive(Primitive::Int8, |value| match value {
			Value::Int32(v) => i8::try_from(*v).ok(),
			_ => None,
		})
	}

	/// Read a `Uint8`.
	pub fn uint8(&mut self) -> u8 {
		self.primitive(Primitive::Uint8, |value| match value {
			Value::Uint32(v) => u8::try_from(*v).ok(),
			_ => None,
		})
	}

	/// Read an `Int16`.
	pub fn int16(&mut self) -> i16 {
		self.primitive(Primitive::Int16, |value| match value {
			Value::Int32(v) => i16::try_from(*v).ok(),
			_ => None,
		})
	}

	/// Read a `Uint16`.
	pub fn uint16(&mut self) -> u16 {
		self.primitive(Primitive::Uint16, |value| match value {
			Value::Uint32(v) => u16::try_from(*v).ok(),
			_ => None,
		})
	}

	/// Read an `Int32`.
	pub fn int32(&mut self) -> i32 {
		self.primitive(Primitive::Int32, int32_slot)
	}

	/// Read a `Uint32`.
	pub fn uint32(&mut self) -> u32 {
		self.primitive(Primitive::Uint32, uint32_slot)
	}

	/// Read an `Int64`.
	pub fn int64(&mut self) -> i64 {
		self.primitive(Primitive::Int64, int64_slot)
	}

	/// Read a `Uint64`.
	pub fn uint64(&mut self) -> u64 {
		self.primitive(Primitive::Uint64, uint64_slot)
	}

	/// Read a `Float`.
	pub fn float(&mut self) -> f32 {
		self.primitive(Primitive::Float, |value| match value {
			Value::Float(v) => Some(*v),
			_ => None,
		})
	}

	/// Read a `Double`.
	pub fn double(&mut self) -> f64 {
		self.primitive(Primitive::Double, |value| match value {
			Value::Double(v) => Some(*v),
			_ => None,
		})
	}

	/// Read a `Date` as days since the Unix epoch.
	pub fn date(&mut self) -> u32 {
		self.primitive(Primitive::Date, uint32_slot)
	}

	/// Read a `Datetime` as seconds since the Unix epoch.
	pub fn datetime(&mut self) -> u32 {
		self.primitive(Primitive::Datetime, uint32_slot)
	}

	/// Read a `Timestamp` as microseconds since the Unix epoch.
	pub fn timestamp(&mut self) -> u64 {
		self.primitive(Primitive::Timestamp, uint64_slot)
	}

	/// Read an `Interval` as signed microseconds.
	pub fn interval(&mut self) -> i64 {
		self.primitive(Primitive::Interval, int64_slot)
	}

	/// Read a `TzDate` in its textual form.
	pub fn tz_date(&mut self) -> &'a str {
		self.primitive(Primitive::TzDate, text_slot)
	}

	/// Read a `TzDatetime` in its textual form.
	pub fn tz_datetime(&mut self) -> &'a str {
		self.primitive(Primitive::TzDatetime, text_slot)
	}

	/// Read a `TzTimestamp` in its textual form.
	pub fn tz_timestamp(&mut self) -> &'a str {
		self.primitive(Primitive::TzTimestamp, text_slot)
	}

	/// Read a `String` (raw byte string).
	pub fn bytes(&mut self) -> &'a [u8] {
		self.primitive(Primitive::String, bytes_slot)
	}

	/// Read a `Yson` document.
	pub fn yson(&mut self) -> &'a [u8] {
		self.primitive(Primitive::Yson, bytes_slot)
	}

	/// Read a `Utf8` string.
	pub fn utf8(&mut self) -> &'a str {
		self.primitive(Primitive::Utf8, text_slot)
	}

	/// Read a `Json` document.
	pub fn json(&mut self) -> &'a str {
		self.primitive(Primitive::Json, text_slot)
	}

	/// Read a `JsonDocument`.
	pub fn json_document(&mut self) -> &'a str {
		self.primitive(Primitive::JsonDocument, text_slot)
	}

	/// Read a `DyNumber` in its textual form.
	pub fn dy_number(&mut self) -> &'a str {
		self.primitive(Primitive::DyNumber, text_slot)
	}

	/// Read a `Uuid` as 16 bytes, low half first, each half little-endian.
	pub fn uuid(&mut self) -> [u8; 16] {
		self.primitive(Primitive::Uuid, |value| match value {
			Value::Wide { low, high } => {
				let mut out = [0_u8; 16];
				out[..8].copy_from_slice(&low.to_le_bytes());
				out[8..].copy_from_slice(&high.to_le_bytes());
				Some(out)
			}
			_ => None,
		})
	}

	/// Read a `Decimal(p,s)` of any precision and scale.
	pub fn decimal(&mut self) -> Decimal {
		if self.err.is_some() {
			return Decimal::default();
		}
		let Some(slot) = &self.current else {
			let err = ScanError::ScalarTypeMismatch {
				requested: "Decimal".to_owned(),
				have: NO_VALUE.to_owned(),
				path: self.path().to_string(),
			};
			self.fail(err);
			return Decimal::default();
		};
		let (ty, value) = (slot.ty, slot.value);

		let Type::Decimal { precision, scale } = ty else {
			let err = ScanError::ScalarTypeMismatch {
				requested: "Decimal".to_owned(),
				have: ty.to_string(),
				path: self.path().to_string(),
			};
			self.fail(err);
			return Decimal::default();
		};
		match value.wide() {
			Some(bits) => Decimal {
				value: bits as i128,
				precision: *precision,
				scale: *scale,
			},
			None => {
				self.malformed(ty, value);
				Decimal::default()
			}
		}
	}

	fn primitive<T: Default>(&mut self, want: Primitive, read: impl FnOnce(&'a Value) -> Option<T>) -> T {
		if self.err.is_some() {
			return T::default();
		}
		let Some(slot) = &self.current else {
			let err = ScanError::scalar(want, NO_VALUE.to_owned(), self.path().to_string());
			self.fail(err);
			return T::default();
		};
		let (ty, value) = (slot.ty, slot.value);

		if ty.primitive() != Some(want) {
			let err = ScanError::scalar(want, ty.to_string(), self.path().to_string());
			self.fail(err);
			return T::default();
		}
		match read(value) {
			Some(out) => out,
			None => {
				self.malformed(ty, value);
				T::default()
			}
		}
	}

	fn expect_shape(&mut self, expected: Shape) -> Option<Slot<'a>> {
		if self.err.is_some() {
			return None;
		}
		let found = match &self.current {
			Some(slot) if slot.ty.shape() == expected => return Some(slot.clone()),
			Some(slot) => slot.ty.to_string(),
			None => NO_VALUE.to_owned(),
		};
		let err = ScanError::ShapeMismatch {
			expected,
			found,
			path: self.path().to_string(),
		};
		self.fail(err);
		None
	}

	fn push(&mut self, container: Container<'a>, origin: Slot<'a>) -> usize {
		let len = container.len();
		self.stack.push(Frame { container, origin, at: None });
		self.current = None;
		len
	}

	fn advance(&mut self, shape: Shape, op: &'static str, at: Position) -> Option<&'a Type> {
		if self.err.is_some() {
			return None;
		}
		let container = match self.stack.last() {
			Some(frame) if frame.container.shape() == shape => frame.container,
			other => {
				let err = ScanError::UnbalancedNavigation {
					op,
					open: other.map(|frame| frame.container.shape()),
					path: self.path().to_string(),
				};
				self.fail(err);
				return None;
			}
		};

		let len = container.len();
		if at.index() >= len {
			let err = ScanError::IndexOutOfRange {
				index: at.index(),
				len,
				path: self.path().to_string(),
			};
			self.fail(err);
			return None;
		}

		let (ty, value) = container.get(at)?;
		if let Some(frame) = self.stack.last_mut() {
			frame.at = Some(at);
		}
		self.current = Some(Slot::new(ty, value));
		Some(ty)
	}

	fn exit(&mut self, shape: Shape, op: &'static str) {
		if self.err.is_some() {
			return;
		}
		match self.stack.last() {
			Some(frame) if frame.container.shape() == shape => {}
			other => {
				let err = ScanError::UnbalancedNavigation {
					op,
					open: other.map(|frame| frame.container.shape()),
					path: self.path().to_string(),
				};
				self.fail(err);
				return;
			}
		}
		if let Some(frame) = self.stack.pop() {
			self.current = Some(frame.origin);
		}
	}

	fn malformed(&mut self, ty: &Type, value: &Value) {
		let err = ScanError::MalformedValue {
			expected: ty.to_string(),
			found: value.slot_name(),
			path: self.path().to_string(),
		};
		self.fail(err);
	}

	fn fail(&mut self, err: ScanError) {
		if self.err.is_none() {
			self.err = Some(err);
		}
	}
}

fn push_hops(steps: &mut Vec<PathStep>, hops: &[Hop<'_>]) {
	for hop in hops {
		steps.push(match hop {
			Hop::Branch { index, name } => PathStep::Branch {
				index: *index,
				name: name.map(str::to_owned),
			},
			Hop::Unwrap => PathStep::Unwrap,
		});
	}
}

fn int32_slot(value: &Value) -> Option<i32> {
	match value {
		Value::Int32(v) => Some(*v),
		_ => None,
	}
}

fn uint32_slot(value: &Value) -> Option<u32> {
	match value {
		Value::Uint32(v) => Some(*v),
		_ => None,
	}
}

fn int64_slot(value: &Value) -> Option<i64> {
	match value {
		Value::Int64(v) => Some(*v),
		_ => None,
	}
}

fn uint64_slot(value: &Value) -> Option<u64> {
	match value {
		Value::Uint64(v) => Some(*v),
		_ => None,
	}
}

fn text_slot(value: &Value) -> Option<&str> {
	match value {
		Value::Text(v) => Some(v.as_str()),
		_ => None,
	}
}

fn bytes_slot(value: &Value) -> Option<&[u8]> {
	match value {
		Value::Bytes(v) => Some(v.as_slice()),
		_ => None,
	}
}

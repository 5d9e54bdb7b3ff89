use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive scalar kinds a result column may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
	/// Boolean.
	Bool,
	/// Signed 8-bit integer.
	Int8,
	/// Unsigned 8-bit integer.
	Uint8,
	/// Signed 16-bit integer.
	Int16,
	/// Unsigned 16-bit integer.
	Uint16,
	/// Signed 32-bit integer.
	Int32,
	/// Unsigned 32-bit integer.
	Uint32,
	/// Signed 64-bit integer.
	Int64,
	/// Unsigned 64-bit integer.
	Uint64,
	/// 32-bit float.
	Float,
	/// 64-bit float.
	Double,
	/// Days since the Unix epoch.
	Date,
	/// Seconds since the Unix epoch.
	Datetime,
	/// Microseconds since the Unix epoch.
	Timestamp,
	/// Signed microsecond duration.
	Interval,
	/// Date with timezone, textual.
	TzDate,
	/// Datetime with timezone, textual.
	TzDatetime,
	/// Timestamp with timezone, textual.
	TzTimestamp,
	/// Raw byte string.
	String,
	/// UTF-8 text.
	Utf8,
	/// YSON document bytes.
	Yson,
	/// JSON text.
	Json,
	/// Binary-normalized JSON document, textual on the wire.
	JsonDocument,
	/// 128-bit UUID.
	Uuid,
	/// Decimal number in textual form.
	DyNumber,
}

impl Primitive {
	/// Render the primitive as its YQL type name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "Bool",
			Self::Int8 => "Int8",
			Self::Uint8 => "Uint8",
			Self::Int16 => "Int16",
			Self::Uint16 => "Uint16",
			Self::Int32 => "Int32",
			Self::Uint32 => "Uint32",
			Self::Int64 => "Int64",
			Self::Uint64 => "Uint64",
			Self::Float => "Float",
			Self::Double => "Double",
			Self::Date => "Date",
			Self::Datetime => "Datetime",
			Self::Timestamp => "Timestamp",
			Self::Interval => "Interval",
			Self::TzDate => "TzDate",
			Self::TzDatetime => "TzDatetime",
			Self::TzTimestamp => "TzTimestamp",
			Self::String => "String",
			Self::Utf8 => "Utf8",
			Self::Yson => "Yson",
			Self::Json => "Json",
			Self::JsonDocument => "JsonDocument",
			Self::Uuid => "Uuid",
			Self::DyNumber => "DyNumber",
		}
	}
}

impl fmt::Display for Primitive {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Structural kind of a type, independent of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
	/// Primitive or decimal scalar.
	Scalar,
	/// Nullable wrapper.
	Optional,
	/// Homogeneous sequence.
	List,
	/// Heterogeneous positional sequence.
	Tuple,
	/// Heterogeneous named sequence.
	Struct,
	/// Key/payload pairs.
	Dict,
	/// Tagged union over struct or tuple branches.
	Variant,
}

impl Shape {
	/// Render the shape as a stable label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Scalar => "Scalar",
			Self::Optional => "Optional",
			Self::List => "List",
			Self::Tuple => "Tuple",
			Self::Struct => "Struct",
			Self::Dict => "Dict",
			Self::Variant => "Variant",
		}
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Declared type of one result value.
///
/// Produced by the result stream alongside column metadata and never mutated
/// by decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
	/// Fixed-point decimal stored as a 128-bit integer.
	Decimal {
		/// Total number of digits.
		precision: u8,
		/// Digits after the decimal point.
		scale: u8,
	},
	/// Nullable wrapper around an item type.
	Optional(Box<Type>),
	/// Homogeneous list of one element type.
	List(Box<Type>),
	/// Positional element types.
	Tuple(Vec<Type>),
	/// Named members in declaration order.
	Struct(Vec<Member>),
	/// Dictionary from key type to payload type.
	Dict {
		/// Key type.
		key: Box<Type>,
		/// Payload type.
		payload: Box<Type>,
	},
	/// Tagged union over struct or tuple branches.
	Variant(VariantType),
	/// Primitive scalar.
	#[serde(untagged)]
	Primitive(Primitive),
}

impl Type {
	/// Wrap `item` into `Optional<item>`.
	pub fn optional(item: Type) -> Self {
		Self::Optional(Box::new(item))
	}

	/// Build `List<item>`.
	pub fn list(item: Type) -> Self {
		Self::List(Box::new(item))
	}

	/// Build `Dict<key,payload>`.
	pub fn dict(key: Type, payload: Type) -> Self {
		Self::Dict {
			key: Box::new(key),
			payload: Box::new(payload),
		}
	}

	/// Return the structural shape of this type.
	pub fn shape(&self) -> Shape {
		match self {
			Self::Primitive(_) | Self::Decimal { .. } => Shape::Scalar,
			Self::Optional(_) => Shape::Optional,
			Self::List(_) => Shape::List,
			Self::Tuple(_) => Shape::Tuple,
			Self::Struct(_) => Shape::Struct,
			Self::Dict { .. } => Shape::Dict,
			Self::Variant(_) => Shape::Variant,
		}
	}

	/// Primitive kind for primitive types.
	pub fn primitive(&self) -> Option<Primitive> {
		match self {
			Self::Primitive(kind) => Some(*kind),
			_ => None,
		}
	}

	/// Item type of an optional.
	pub fn optional_item(&self) -> Option<&Type> {
		match self {
			Self::Optional(item) => Some(item),
			_ => None,
		}
	}

	/// Element type of a list.
	pub fn list_item(&self) -> Option<&Type> {
		match self {
			Self::List(item) => Some(item),
			_ => None,
		}
	}

	/// Element types of a tuple.
	pub fn tuple_items(&self) -> Option<&[Type]> {
		match self {
			Self::Tuple(items) => Some(items),
			_ => None,
		}
	}

	/// Members of a struct.
	pub fn struct_members(&self) -> Option<&[Member]> {
		match self {
			Self::Struct(members) => Some(members),
			_ => None,
		}
	}

	/// Key and payload types of a dict.
	pub fn dict_types(&self) -> Option<(&Type, &Type)> {
		match self {
			Self::Dict { key, payload } => Some((key, payload)),
			_ => None,
		}
	}

	/// Branch table of a variant.
	pub fn variant(&self) -> Option<&VariantType> {
		match self {
			Self::Variant(variant) => Some(variant),
			_ => None,
		}
	}
}

impl From<Primitive> for Type {
	fn from(kind: Primitive) -> Self {
		Self::Primitive(kind)
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Primitive(kind) => f.write_str(kind.as_str()),
			Self::Decimal { precision, scale } => write!(f, "Decimal({precision},{scale})"),
			Self::Optional(item) => write!(f, "Optional<{item}>"),
			Self::List(item) => write!(f, "List<{item}>"),
			Self::Tuple(items) => {
				f.write_str("Tuple<")?;
				write_types(f, items)?;
				f.write_str(">")
			}
			Self::Struct(members) => {
				f.write_str("Struct<")?;
				write_members(f, members)?;
				f.write_str(">")
			}
			Self::Dict { key, payload } => write!(f, "Dict<{key},{payload}>"),
			Self::Variant(VariantType::Struct(members)) => {
				f.write_str("Variant<")?;
				write_members(f, members)?;
				f.write_str(">")
			}
			Self::Variant(VariantType::Tuple(items)) => {
				f.write_str("Variant<")?;
				write_types(f, items)?;
				f.write_str(">")
			}
		}
	}
}

fn write_types(f: &mut fmt::Formatter<'_>, items: &[Type]) -> fmt::Result {
	for (idx, item) in items.iter().enumerate() {
		if idx > 0 {
			f.write_str(",")?;
		}
		write!(f, "{item}")?;
	}
	Ok(())
}

fn write_members(f: &mut fmt::Formatter<'_>, members: &[Member]) -> fmt::Result {
	for (idx, member) in members.iter().enumerate() {
		if idx > 0 {
			f.write_str(",")?;
		}
		write!(f, "'{}':{}", member.name, member.ty)?;
	}
	Ok(())
}

/// One named struct member or struct-variant branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
	/// Member name.
	pub name: String,
	/// Member type.
	#[serde(rename = "type")]
	pub ty: Type,
}

impl Member {
	/// Build a member from a name and type.
	pub fn new(name: impl Into<String>, ty: impl Into<Type>) -> Self {
		Self { name: name.into(), ty: ty.into() }
	}
}

/// Underlying branch table of a variant type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantType {
	/// Named branches.
	Struct(Vec<Member>),
	/// Positional branches.
	Tuple(Vec<Type>),
}

/// One resolved variant branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch<'a> {
	/// Zero-based branch index.
	pub index: u32,
	/// Branch name for struct variants.
	pub name: Option<&'a str>,
	/// Branch payload type.
	pub ty: &'a Type,
}

impl VariantType {
	/// Number of declared branches.
	pub fn len(&self) -> usize {
		match self {
			Self::Struct(members) => members.len(),
			Self::Tuple(items) => items.len(),
		}
	}

	/// Whether no branches are declared.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Resolve a branch by index.
	pub fn branch(&self, index: u32) -> Option<Branch<'_>> {
		let idx = usize::try_from(index).ok()?;
		match self {
			Self::Struct(members) => members.get(idx).map(|member| Branch {
				index,
				name: Some(member.name.as_str()),
				ty: &member.ty,
			}),
			Self::Tuple(items) => items.get(idx).map(|ty| Branch { index, name: None, ty }),
		}
	}

	/// Resolve a struct-variant branch by name.
	pub fn branch_by_name(&self, name: &str) -> Option<Branch<'_>> {
		let Self::Struct(members) = self else {
			return None;
		};
		let idx = members.iter().position(|member| member.name == name)?;
		self.branch(u32::try_from(idx).ok()?)
	}

	/// Iterate branches in declaration order.
	pub fn branches(&self) -> impl Iterator<Item = Branch<'_>> {
		(0..self.len()).filter_map(|idx| self.branch(u32::try_from(idx).ok()?))
	}
}

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

/// Raw result value in wire-slot form.
///
/// Scalars are stored in the slot their declared primitive travels in, so a
/// `Value` only has meaning together with the [`Type`](crate::row::Type) the
/// result stream declared for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
	/// Absent optional.
	Null,
	/// Boolean slot.
	Bool(bool),
	/// Signed 32-bit slot (`Int8`, `Int16`, `Int32`).
	Int32(i32),
	/// Unsigned 32-bit slot (`Uint8`, `Uint16`, `Uint32`, `Date`, `Datetime`).
	Uint32(u32),
	/// Signed 64-bit slot (`Int64`, `Interval`).
	Int64(i64),
	/// Unsigned 64-bit slot (`Uint64`, `Timestamp`).
	Uint64(u64),
	/// 32-bit float slot.
	Float(f32),
	/// 64-bit float slot.
	Double(f64),
	/// Byte slot (`String`, `Yson`).
	Bytes(Vec<u8>),
	/// Text slot (`Utf8`, `Json`, `JsonDocument`, `DyNumber`, timezone-aware dates).
	Text(String),
	/// 128-bit slot split into halves (`Uuid`, `Decimal`).
	Wide {
		/// Low 64 bits.
		low: u64,
		/// High 64 bits.
		high: u64,
	},
	/// Present optional whose item type is itself optional.
	Nested(Box<Value>),
	/// List, tuple, or struct items in positional order.
	Items(Vec<Value>),
	/// Dict pairs in stream order.
	Pairs(Vec<Pair>),
	/// Active variant branch.
	Variant {
		/// Branch index into the declared variant type.
		index: u32,
		/// Branch payload.
		value: Box<Value>,
	},
}

impl Value {
	/// Short slot label used in diagnostics.
	pub fn slot_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int32(_) => "int32",
			Self::Uint32(_) => "uint32",
			Self::Int64(_) => "int64",
			Self::Uint64(_) => "uint64",
			Self::Float(_) => "float",
			Self::Double(_) => "double",
			Self::Bytes(_) => "bytes",
			Self::Text(_) => "text",
			Self::Wide { .. } => "wide",
			Self::Nested(_) => "nested",
			Self::Items(_) => "items",
			Self::Pairs(_) => "pairs",
			Self::Variant { .. } => "variant",
		}
	}

	/// Combine the halves of a 128-bit slot.
	pub fn wide(&self) -> Option<u128> {
		match self {
			Self::Wide { low, high } => Some((u128::from(*high) << 64) | u128::from(*low)),
			_ => None,
		}
	}
}

/// One dict entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
	/// Key value.
	pub key: Value,
	/// Payload value.
	pub payload: Value,
}

/// Fixed-point decimal read from a `Decimal(p,s)` value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decimal {
	/// Unscaled integer value.
	pub value: i128,
	/// Declared precision.
	pub precision: u8,
	/// Declared scale.
	pub scale: u8,
}

impl std::fmt::Display for Decimal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.scale == 0 {
			return write!(f, "{}", self.value);
		}

		let digits = self.value.unsigned_abs().to_string();
		let scale = usize::from(self.scale);
		let padded = if digits.len() <= scale {
			format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
		} else {
			digits
		};
		let (int, frac) = padded.split_at(padded.len() - scale);
		let sign = if self.value < 0 { "-" } else { "" };
		write!(f, "{sign}{int}.{frac}")
	}
}

use std::collections::HashMap;
use std::hash::Hash;

use crate::row::{ScanError, ValueCursor};

/// Decoder for one scanned value.
///
/// The result stream hands each implementation a fresh cursor positioned at
/// the value being scanned. Implementations walk the cursor and return
/// [`ValueCursor::result`] (or their own error) when done.
pub trait Scanner {
	/// Decode the value under `value`.
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError>;
}

impl<S: Scanner + ?Sized> Scanner for &mut S {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError> {
		(**self).scan_value(value)
	}
}

macro_rules! primitive_scanner {
	($($ty:ty => $read:ident),* $(,)?) => {
		$(
			impl Scanner for $ty {
				fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError> {
					*self = value.$read();
					value.result()
				}
			}
		)*
	};
}

primitive_scanner! {
	bool => bool,
	i8 => int8,
	u8 => uint8,
	i16 => int16,
	u16 => uint16,
	i32 => int32,
	u32 => uint32,
	i64 => int64,
	u64 => uint64,
	f32 => float,
	f64 => double,
}

impl Scanner for String {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError> {
		value.utf8().clone_into(self);
		value.result()
	}
}

/// Absent optionals decode to `None`; non-optional values decode to `Some`.
impl<T: Scanner + Default> Scanner for Option<T> {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError> {
		if value.is_optional() && !value.unwrap() {
			*self = None;
			return value.result();
		}

		let mut item = T::default();
		item.scan_value(value)?;
		*self = Some(item);
		value.result()
	}
}

impl<T: Scanner + Default> Scanner for Vec<T> {
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError> {
		self.clear();
		let count = value.enter_list();
		self.reserve(count);
		for idx in 0..count {
			value.list_item(idx);
			let mut item = T::default();
			item.scan_value(value)?;
			self.push(item);
		}
		value.exit_list();
		value.result()
	}
}

impl<K, V> Scanner for HashMap<K, V>
where
	K: Scanner + Default + Eq + Hash,
	V: Scanner + Default,
{
	fn scan_value(&mut self, value: &mut ValueCursor<'_>) -> Result<(), ScanError> {
		self.clear();
		let count = value.enter_dict();
		for idx in 0..count {
			let mut key = K::default();
			value.dict_key(idx);
			key.scan_value(value)?;
			if self.contains_key(&key) {
				return Err(ScanError::DuplicateKey {
					path: value.path().to_string(),
				});
			}

			let mut payload = V::default();
			value.dict_payload(idx);
			payload.scan_value(value)?;

			self.insert(key, payload);
		}
		value.exit_dict();
		value.result()
	}
}

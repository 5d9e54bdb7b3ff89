use std::sync::Arc;

use thiserror::Error;

use crate::row::{Primitive, Shape};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, RowError>;

/// First error latched by a [`ValueCursor`](crate::row::ValueCursor), or returned by a decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
	/// Requested container shape differs from the declared shape.
	#[error("expected {expected}, found {found} at {path}")]
	ShapeMismatch {
		/// Shape the operation needs.
		expected: Shape,
		/// Declared type text of the current value, or `no value`.
		found: String,
		/// Cursor path at the failing operation.
		path: String,
	},
	/// Element, field, or pair index outside the container.
	#[error("index {index} out of range (len {len}) at {path}")]
	IndexOutOfRange {
		/// Requested index.
		index: usize,
		/// Container length.
		len: usize,
		/// Cursor path at the failing operation.
		path: String,
	},
	/// Advance or exit without a matching open frame of the same shape.
	#[error("{op} without matching enter (open frame: {}) at {path}", open_label(.open))]
	UnbalancedNavigation {
		/// Operation name.
		op: &'static str,
		/// Shape of the innermost open frame, if any.
		open: Option<Shape>,
		/// Cursor path at the failing operation.
		path: String,
	},
	/// Scalar reader kind differs from the declared kind.
	#[error("type mismatch: requested {requested}, have {have} at {path}")]
	ScalarTypeMismatch {
		/// Requested scalar kind.
		requested: String,
		/// Declared type text of the current value, or `no value`.
		have: String,
		/// Cursor path at the failing operation.
		path: String,
	},
	/// Variant tag selects no declared branch.
	#[error("malformed variant: branch {index} of {branches} at {path}")]
	MalformedVariant {
		/// Wire branch index.
		index: u32,
		/// Declared branch count.
		branches: usize,
		/// Cursor path at the failing operation.
		path: String,
	},
	/// Value payload does not fit its declared type.
	#[error("malformed value: expected {expected}, found {found} slot at {path}")]
	MalformedValue {
		/// Declared type text the payload should match.
		expected: String,
		/// Wire slot actually present.
		found: &'static str,
		/// Cursor path at the failing operation.
		path: String,
	},
	/// Struct has no member with the requested name.
	#[error("missing struct field {name} at {path}")]
	MissingField {
		/// Requested member name.
		name: String,
		/// Cursor path at the failing operation.
		path: String,
	},
	/// Dict holds the same key in more than one pair.
	#[error("duplicate dict key at {path}")]
	DuplicateKey {
		/// Cursor path of the repeated key.
		path: String,
	},
	/// Recursive decoder exceeded its nesting limit.
	#[error("decode depth exceeded (max={max_depth}) at {path}")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: usize,
		/// Cursor path where the limit was hit.
		path: String,
	},
	/// Decoder-defined failure.
	#[error("{0}")]
	Custom(String),
}

impl ScanError {
	/// Build a decoder-defined error.
	pub fn custom(message: impl Into<String>) -> Self {
		Self::Custom(message.into())
	}

	pub(crate) fn scalar(requested: Primitive, have: String, path: String) -> Self {
		Self::ScalarTypeMismatch {
			requested: requested.as_str().to_owned(),
			have,
			path,
		}
	}
}

fn open_label(open: &Option<Shape>) -> &'static str {
	open.map_or("none", Shape::as_str)
}

/// Errors produced while loading result dumps and scanning rows.
#[derive(Debug, Clone, Error)]
pub enum RowError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[source] Arc<std::io::Error>),
	/// Dump payload is not valid result-set JSON.
	#[error("json: {0}")]
	Json(#[source] Arc<serde_json::Error>),
	/// Unknown leading bytes in a dump file.
	#[error("unsupported compression or not a result dump (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompressed stream did not contain JSON.
	#[error("decompressed data is not a JSON document")]
	NotJsonAfterDecompress,
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Row value count differs from the result set's column count.
	#[error("result set {set} row {row}: {got} values for {expected} columns")]
	RowWidthMismatch {
		/// Result set index.
		set: usize,
		/// Row index.
		row: usize,
		/// Declared column count.
		expected: usize,
		/// Values present in the row.
		got: usize,
	},
	/// Row access before `next_result_set` or after exhaustion.
	#[error("no current result set")]
	NoResultSet,
	/// Scan before `next_row` or after the last row.
	#[error("no current row in result set {set}")]
	NoRow {
		/// Result set index.
		set: usize,
	},
	/// Scan past the last column of the row.
	#[error("column {index} out of range ({count} columns)")]
	ColumnOutOfRange {
		/// Requested column index.
		index: usize,
		/// Column count.
		count: usize,
	},
	/// Named column does not exist.
	#[error("column not found: {name}")]
	ColumnNotFound {
		/// Requested column name.
		name: String,
	},
	/// Decoder or cursor failure while scanning one column.
	#[error("scan result set {set} row {row} column {column}: {source}")]
	Scan {
		/// Result set index.
		set: usize,
		/// Row index.
		row: usize,
		/// Column name.
		column: String,
		/// Latched or returned decode error.
		#[source]
		source: ScanError,
	},
}

impl From<std::io::Error> for RowError {
	fn from(err: std::io::Error) -> Self {
		Self::Io(Arc::new(err))
	}
}

impl From<serde_json::Error> for RowError {
	fn from(err: serde_json::Error) -> Self {
		Self::Json(Arc::new(err))
	}
}

mod compression;
mod cursor;
mod dump;
mod error;
mod json;
mod path;
mod result_set;
mod scanner;
mod types;
mod value;

/// Compression detection result for result dumps.
pub use compression::Compression;
/// Typed value cursor.
pub use cursor::ValueCursor;
/// Dump loading options.
pub use dump::LoadOptions;
/// Error and result aliases.
pub use error::{Result, RowError, ScanError};
/// Type-driven JSON rendering of result values.
pub use json::{JsonScanner, RenderOptions};
/// Diagnostic value paths.
pub use path::{PathStep, ValuePath};
/// Result stream over materialized result sets.
pub use result_set::{Column, QueryResult, ResultSet};
/// Decoder capability handed a cursor per scanned value.
pub use scanner::Scanner;
/// Type descriptors.
pub use types::{Branch, Member, Primitive, Shape, Type, VariantType};
/// Raw result values.
pub use value::{Decimal, Pair, Value};

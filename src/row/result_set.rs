use serde::{Deserialize, Serialize};

use crate::row::{Result, RowError, Scanner, Type, Value, ValueCursor};

/// Column metadata for one result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
	/// Column name.
	pub name: String,
	/// Declared column type.
	#[serde(rename = "type")]
	pub ty: Type,
}

impl Column {
	/// Build a column from a name and type.
	pub fn new(name: impl Into<String>, ty: impl Into<Type>) -> Self {
		Self { name: name.into(), ty: ty.into() }
	}
}

/// One materialized result set: typed columns and rows of raw values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSet {
	/// Columns in select order.
	pub columns: Vec<Column>,
	/// Rows, each holding one value per column.
	pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
	/// Check that every row has exactly one value per column.
	pub fn check_rows(&self, set: usize) -> Result<()> {
		for (row, values) in self.rows.iter().enumerate() {
			if values.len() != self.columns.len() {
				return Err(RowError::RowWidthMismatch {
					set,
					row,
					expected: self.columns.len(),
					got: values.len(),
				});
			}
		}
		Ok(())
	}

	/// Index of the column called `name`.
	pub fn column_index(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|column| column.name == name)
	}
}

/// Result stream over materialized result sets.
///
/// Iteration is two-level: [`QueryResult::next_result_set`] then
/// [`QueryResult::next_row`]. Each [`QueryResult::scan`] hands a fresh
/// [`ValueCursor`] over the next column of the current row to a decoder.
/// The first error is kept for [`QueryResult::err`]; it never stops
/// iteration, so the caller decides whether to abandon remaining rows.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
	sets: Vec<ResultSet>,
	set: Option<usize>,
	row: Option<usize>,
	column: usize,
	err: Option<RowError>,
}

impl QueryResult {
	/// Wrap result sets after checking row widths.
	pub fn new(sets: Vec<ResultSet>) -> Result<Self> {
		for (idx, set) in sets.iter().enumerate() {
			set.check_rows(idx)?;
		}
		Ok(Self {
			sets,
			..Self::default()
		})
	}

	/// Number of result sets in the stream.
	pub fn result_set_count(&self) -> usize {
		self.sets.len()
	}

	/// All result sets, independent of the iteration position.
	pub fn result_sets(&self) -> &[ResultSet] {
		&self.sets
	}

	/// Advance to the next result set; `false` once exhausted.
	pub fn next_result_set(&mut self) -> bool {
		let next = self.set.map_or(0, |idx| idx + 1);
		self.row = None;
		self.column = 0;
		if next < self.sets.len() {
			self.set = Some(next);
			true
		} else {
			self.set = Some(self.sets.len());
			false
		}
	}

	/// Advance to the next row of the current result set; `false` once exhausted.
	pub fn next_row(&mut self) -> bool {
		let Some(set) = self.current_set() else {
			return false;
		};
		let rows = set.rows.len();
		let next = self.row.map_or(0, |idx| idx + 1);
		self.column = 0;
		if next < rows {
			self.row = Some(next);
			true
		} else {
			self.row = Some(rows);
			false
		}
	}

	/// Current result set, if iteration is positioned on one.
	pub fn current_set(&self) -> Option<&ResultSet> {
		self.sets.get(self.set?)
	}

	/// Columns of the current result set.
	pub fn columns(&self) -> &[Column] {
		match self.current_set() {
			Some(set) => &set.columns,
			None => &[],
		}
	}

	/// Row count of the current result set.
	pub fn row_count(&self) -> usize {
		self.current_set().map_or(0, |set| set.rows.len())
	}

	/// Decode the next unscanned column of the current row with `dst`.
	pub fn scan<S: Scanner + ?Sized>(&mut self, dst: &mut S) -> Result<()> {
		let column = self.column;
		self.column += 1;
		let result = self.scan_column(column, dst);
		self.record(result)
	}

	/// Decode the column called `name` of the current row with `dst`.
	pub fn scan_named<S: Scanner + ?Sized>(&mut self, name: &str, dst: &mut S) -> Result<()> {
		let result = match self.current_set() {
			Some(set) => match set.column_index(name) {
				Some(column) => self.scan_column(column, dst),
				None => Err(RowError::ColumnNotFound { name: name.to_owned() }),
			},
			None => Err(RowError::NoResultSet),
		};
		self.record(result)
	}

	/// Decode consecutive columns of the current row, one decoder per column.
	pub fn scan_all(&mut self, dsts: &mut [&mut dyn Scanner]) -> Result<()> {
		for dst in dsts.iter_mut() {
			self.scan(&mut **dst)?;
		}
		Ok(())
	}

	/// First error recorded by any scan of this stream.
	pub fn err(&self) -> Option<&RowError> {
		self.err.as_ref()
	}

	fn scan_column<S: Scanner + ?Sized>(&self, column: usize, dst: &mut S) -> Result<()> {
		let set_idx = self.set.ok_or(RowError::NoResultSet)?;
		let set = self.sets.get(set_idx).ok_or(RowError::NoResultSet)?;
		let row_idx = self.row.ok_or(RowError::NoRow { set: set_idx })?;
		let row = set.rows.get(row_idx).ok_or(RowError::NoRow { set: set_idx })?;
		let meta = set.columns.get(column).ok_or(RowError::ColumnOutOfRange {
			index: column,
			count: set.columns.len(),
		})?;
		let value = row.get(column).ok_or(RowError::ColumnOutOfRange {
			index: column,
			count: row.len(),
		})?;

		let mut cursor = ValueCursor::new(&meta.ty, value);
		let decoded = dst.scan_value(&mut cursor);
		decoded.and_then(|()| cursor.result()).map_err(|source| RowError::Scan {
			set: set_idx,
			row: row_idx,
			column: meta.name.clone(),
			source,
		})
	}

	fn record(&mut self, result: Result<()>) -> Result<()> {
		if let Err(err) = &result {
			if self.err.is_none() {
				self.err = Some(err.clone());
			}
		}
		result
	}
}

use std::fmt;

/// One step of a diagnostic value path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// List or tuple element by zero-based index.
	Index(usize),
	/// Struct field by name.
	Field(String),
	/// Key of dict pair `n`.
	Key(usize),
	/// Payload of dict pair `n`.
	Payload(usize),
	/// Active variant branch, by name when the variant is struct-based.
	Branch {
		/// Branch index.
		index: u32,
		/// Branch name for struct variants.
		name: Option<String>,
	},
	/// Present item of an optional.
	Unwrap,
}

/// Breadcrumb from the root value to the cursor position.
///
/// Rebuilt on demand from the cursor's frame stack; only used for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath {
	/// Ordered sequence of steps from the root.
	pub steps: Vec<PathStep>,
}

impl ValuePath {
	/// Whether the path addresses the root value.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}
}

impl fmt::Display for ValuePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("$")?;
		for step in &self.steps {
			match step {
				PathStep::Index(idx) => write!(f, "[{idx}]")?,
				PathStep::Field(name) => write!(f, ".{name}")?,
				PathStep::Key(idx) => write!(f, "{{{idx}}}.key")?,
				PathStep::Payload(idx) => write!(f, "{{{idx}}}.payload")?,
				PathStep::Branch { name: Some(name), .. } => write!(f, "<{name}>")?,
				PathStep::Branch { index, name: None } => write!(f, "<{index}>")?,
				PathStep::Unwrap => f.write_str("?")?,
			}
		}
		Ok(())
	}
}

//! Public library API for decoding typed YDB result rows with a value cursor.

/// Type descriptors, raw values, the value cursor, and result-set plumbing.
pub mod row;

/// Example container decoders over the six demo result sets.
pub mod containers;
/// Generic JSON decode of whole dumps.
pub mod show;
/// Column type listing.
pub mod types;

pub(crate) mod util;

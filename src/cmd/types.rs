use std::path::PathBuf;

use ydbrow::row::Result;

use crate::cmd::util::open_dump;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long = "max-decompressed-bytes")]
	pub max_decompressed_bytes: Option<usize>,
}

/// Print the declared column types of each result set.
pub fn run(args: Args) -> Result<()> {
	let Args { path, max_decompressed_bytes } = args;

	let result = open_dump(&path, max_decompressed_bytes)?;

	println!("path: {}", path.display());
	println!("result_sets: {}", result.result_set_count());
	for (idx, set) in result.result_sets().iter().enumerate() {
		println!("set {idx}: {} rows", set.rows.len());
		for column in &set.columns {
			println!("  {}: {}", column.name, column.ty);
		}
	}

	Ok(())
}

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "ydbrow", about = "Typed YDB result value decoding tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Run the list, tuple, dict, struct and variant decoders over a dump.
	Containers(cmd::containers::Args),
	/// Decode every row of every result set into JSON.
	Show(cmd::show::Args),
	/// Print column type descriptors.
	Types(cmd::types::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> ydbrow::row::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Containers(args) => cmd::containers::run(args),
		Commands::Show(args) => cmd::show::run(args),
		Commands::Types(args) => cmd::types::run(args),
	}
}

fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

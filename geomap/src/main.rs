mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Render a geological map figure for a region given by its coordinates
	Render(tools::render::Subcommand),

	/// Render a geological map figure for a region drawn on a web map (GeoJSON)
	Select(tools::select::Subcommand),

	/// Show the zoom level and API request for a region
	Zoom(tools::zoom::Subcommand),

	/// Print the default configuration as YAML or check a configuration file
	Config(tools::config::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Render(arguments) => tools::render::run(arguments),
		Commands::Select(arguments) => tools::select::run(arguments),
		Commands::Zoom(arguments) => tools::zoom::run(arguments),
		Commands::Config(arguments) => tools::config::run(arguments),
	}
}

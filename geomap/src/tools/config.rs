use anyhow::Result;
use clap::Args;
use geomap_core::config::Config;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	/// check this configuration file instead of printing the defaults
	#[arg(long, value_name = "FILE")]
	check: Option<PathBuf>,
}

/// Prints the default configuration as YAML, or validates a file.
pub fn run(arguments: &Subcommand) -> Result<()> {
	match &arguments.check {
		Some(path) => {
			Config::from_path(path)?;
			println!("{} is valid", path.display());
		}
		None => print!("{}", Config::default().to_yaml()?),
	}
	Ok(())
}

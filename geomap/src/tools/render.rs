use super::{options::FigureOptions, output::write_map};
use anyhow::{Context, Result};
use clap::Args;
use geomap_core::GeoBBox;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	/// southern edge in degrees
	#[arg(long, default_value_t = 33.75, allow_negative_numbers = true)]
	lat_min: f64,

	/// northern edge in degrees
	#[arg(long, default_value_t = 34.0, allow_negative_numbers = true)]
	lat_max: f64,

	/// western edge in degrees
	#[arg(long, default_value_t = 133.25, allow_negative_numbers = true)]
	lon_min: f64,

	/// eastern edge in degrees
	#[arg(long, default_value_t = 133.7, allow_negative_numbers = true)]
	lon_max: f64,

	/// region as "lon_min,lat_min,lon_max,lat_max", replaces the single edges
	#[arg(
		long,
		value_name = "BBOX",
		allow_hyphen_values = true,
		conflicts_with_all = ["lat_min", "lat_max", "lon_min", "lon_max"]
	)]
	bbox: Option<String>,

	#[command(flatten)]
	options: FigureOptions,

	/// output file (.png or .pdf)
	#[arg(long, short, default_value = "geological_map.png", value_name = "FILE")]
	output: PathBuf,
}

impl Subcommand {
	fn region(&self) -> Result<GeoBBox> {
		match &self.bbox {
			Some(text) => text.parse().context("parsing --bbox"),
			None => GeoBBox::new(self.lon_min, self.lat_min, self.lon_max, self.lat_max)
				.context("invalid region, check that each minimum is below its maximum"),
		}
	}
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let region = arguments.region()?;
	write_map(region, &arguments.options, &arguments.output).await
}

use super::{options::FigureOptions, output::write_map};
use anyhow::Result;
use clap::Args;
use geomap::selection::bbox_from_geojson_file;
use geomap_core::GeoBBox;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// GeoJSON exported from a map drawing tool.
	/// The last drawn polygon or rectangle is used.
	#[arg(required = true, verbatim_doc_comment)]
	geojson: PathBuf,

	#[command(flatten)]
	options: FigureOptions,

	/// output file, defaults to "geological_map_<lat_min>_<lon_min>.png"
	#[arg(long, short, value_name = "FILE")]
	output: Option<PathBuf>,
}

/// File name derived from the south-west corner, two decimals each.
pub fn default_output(region: &GeoBBox) -> PathBuf {
	PathBuf::from(format!("geological_map_{:.2}_{:.2}.png", region.lat_min, region.lon_min))
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let region = bbox_from_geojson_file(&arguments.geojson)?;
	let output = arguments.output.clone().unwrap_or_else(|| default_output(&region));
	write_map(region, &arguments.options, &output).await
}

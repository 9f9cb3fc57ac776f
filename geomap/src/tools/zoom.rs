use anyhow::{Context, Result};
use clap::Args;
use geomap::fetch::{HttpMapImageSource, MapQuery};
use geomap_core::{GeoBBox, ZoomLevel, config::SourceConfig};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// region as "lon_min,lat_min,lon_max,lat_max"
	#[arg(required = true, allow_hyphen_values = true)]
	bbox: String,

	/// degrees added around the region
	#[arg(long, default_value_t = 0.01, value_name = "DEGREES")]
	margin: f64,
}

/// Prints the starting zoom level for a region and the first API request.
pub fn run(arguments: &Subcommand) -> Result<()> {
	let region: GeoBBox = arguments.bbox.parse().context("parsing region")?;
	println!("{}", describe(&region, arguments.margin)?);
	Ok(())
}

fn describe(region: &GeoBBox, margin: f64) -> Result<String> {
	let zoom = ZoomLevel::for_bbox(region);
	let query = MapQuery::new(region.with_margin(margin)?, zoom);
	let source = HttpMapImageSource::from_config(&SourceConfig::default())?;

	Ok(format!(
		"span: {:.4}°\nzoom: {zoom}\nbox: {}\nurl: {}",
		region.span(),
		query.bbox.as_box_param(),
		source.query_url(&query)
	))
}

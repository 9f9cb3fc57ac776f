use anyhow::{Context, Result};
use clap::Args;
use geomap_core::{
	DEFAULT_OVERRIDE_ZOOM, OutputFormat, ZoomLevel,
	config::{Config, FontWeight},
};
use std::path::PathBuf;

/// Figure and download options shared by `render` and `select`.
#[derive(Args, Debug, Clone, Default)]
pub struct FigureOptions {
	/// YAML configuration file, see `geomap config`.
	/// Command line flags override its values.
	#[arg(long, short, value_name = "FILE", verbatim_doc_comment)]
	pub config: Option<PathBuf>,

	/// degrees added around the region
	#[arg(long, default_value_t = 0.01, value_name = "DEGREES")]
	pub margin: f64,

	/// use this zoom level instead of the one derived from the region size (5-18, 12 when no level is given)
	#[arg(long, short, value_name = "LEVEL")]
	pub zoom: Option<Option<u8>>,

	/// also write a PDF next to the PNG
	#[arg(long)]
	pub pdf: bool,

	/// bold axis labels
	#[arg(long)]
	pub bold: bool,

	/// hide the x axis label
	#[arg(long)]
	pub no_x_label: bool,

	/// hide the y axis label
	#[arg(long)]
	pub no_y_label: bool,

	/// x axis label size in points (6-20)
	#[arg(long, value_name = "PT")]
	pub x_label_size: Option<f64>,

	/// y axis label size in points (6-20)
	#[arg(long, value_name = "PT")]
	pub y_label_size: Option<f64>,

	/// hide the x tick labels
	#[arg(long)]
	pub no_x_ticks: bool,

	/// hide the y tick labels
	#[arg(long)]
	pub no_y_ticks: bool,

	/// x tick label size in points (6-20)
	#[arg(long, value_name = "PT")]
	pub x_tick_size: Option<f64>,

	/// y tick label size in points (6-20)
	#[arg(long, value_name = "PT")]
	pub y_tick_size: Option<f64>,

	/// do not draw gridlines
	#[arg(long)]
	pub no_grid: bool,

	/// output resolution
	#[arg(long, value_name = "DPI")]
	pub dpi: Option<u32>,

	/// TrueType/OpenType font for all text
	#[arg(long, value_name = "FILE")]
	pub font: Option<PathBuf>,

	/// fail on HTTP 400 instead of retrying at coarser zoom levels
	#[arg(long)]
	pub no_retry: bool,

	/// map image endpoint
	#[arg(long, value_name = "URL")]
	pub url: Option<String>,
}

impl FigureOptions {
	/// Reads the configuration file, if any, and applies the command line overrides.
	pub fn load_config(&self) -> Result<Config> {
		let mut config = match &self.config {
			Some(path) => Config::from_path(path)?,
			None => Config::default(),
		};

		config.source.override_optional_url(&self.url);
		if self.no_retry {
			config.source.retry_on_bad_request = false;
		}

		let figure = &mut config.figure;
		if self.bold {
			figure.label_weight = FontWeight::Bold;
		}
		if self.no_x_label {
			figure.x_axis.show_label = false;
		}
		if self.no_y_label {
			figure.y_axis.show_label = false;
		}
		if self.no_x_ticks {
			figure.x_axis.show_ticks = false;
		}
		if self.no_y_ticks {
			figure.y_axis.show_ticks = false;
		}
		if self.no_grid {
			figure.grid.show = false;
		}
		override_optional(&mut figure.x_axis.label_size, self.x_label_size);
		override_optional(&mut figure.y_axis.label_size, self.y_label_size);
		override_optional(&mut figure.x_axis.tick_size, self.x_tick_size);
		override_optional(&mut figure.y_axis.tick_size, self.y_tick_size);
		override_optional(&mut figure.dpi, self.dpi);
		if let Some(font) = &self.font {
			figure.font_path = Some(font.clone());
		}

		config.validate().context("invalid figure options")?;
		Ok(config)
	}

	pub fn override_zoom(&self) -> Result<Option<ZoomLevel>> {
		self.zoom
			.map(|level| ZoomLevel::new_override(level.unwrap_or(DEFAULT_OVERRIDE_ZOOM)))
			.transpose()
	}

	pub fn formats(&self) -> Vec<OutputFormat> {
		if self.pdf {
			vec![OutputFormat::Png, OutputFormat::Pdf]
		} else {
			vec![OutputFormat::Png]
		}
	}
}

fn override_optional<T>(target: &mut T, value: Option<T>) {
	if let Some(value) = value {
		*target = value;
	}
}

//! Styling of the rendered figure: size, resolution, labels, ticks, grid and caption.
//!
//! # Example YAML
//! ```yaml
//! figure:
//!   dpi: 150
//!   label_weight: bold
//!   x_axis:
//!     label_size: 14
//!     show_ticks: false
//!   grid:
//!     show: false
//! ```

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::{ops::RangeInclusive, path::PathBuf};

/// Font sizes (points) accepted for axis labels and tick labels.
pub const FONT_SIZE_RANGE: RangeInclusive<f64> = 6.0..=20.0;

/// Attribution printed in the lower right corner of every figure.
/// Largest canvas, in pixels, that is rendered. 8×10 in at 1200 dpi still fits.
pub const MAX_CANVAS_PIXELS: u64 = 150_000_000;

pub const DEFAULT_CAPTION: &str = "Source: Seamless Digital Geological Map of Japan V2, GSJ, AIST";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
	#[default]
	Normal,
	Bold,
}

/// Label and tick settings of one axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisStyle {
	/// Axis title. Defaults to "Longitude" for the x axis and "Latitude" for the y axis.
	pub label: Option<String>,
	pub show_label: bool,
	/// Axis title size in points.
	pub label_size: f64,
	/// Whether tick labels are printed. Tick marks are always drawn.
	pub show_ticks: bool,
	/// Tick label size in points.
	pub tick_size: f64,
}

impl Default for AxisStyle {
	fn default() -> Self {
		Self {
			label: None,
			show_label: true,
			label_size: 12.0,
			show_ticks: true,
			tick_size: 10.0,
		}
	}
}

impl AxisStyle {
	/// The label text, falling back to `default` when none is configured.
	pub fn label_or<'a>(&'a self, default: &'a str) -> &'a str {
		self.label.as_deref().unwrap_or(default)
	}

	fn validate(&self, axis: &str) -> Result<()> {
		ensure!(
			FONT_SIZE_RANGE.contains(&self.label_size),
			"{axis} label size ({}) must be between {} and {}",
			self.label_size,
			FONT_SIZE_RANGE.start(),
			FONT_SIZE_RANGE.end()
		);
		ensure!(
			FONT_SIZE_RANGE.contains(&self.tick_size),
			"{axis} tick size ({}) must be between {} and {}",
			self.tick_size,
			FONT_SIZE_RANGE.start(),
			FONT_SIZE_RANGE.end()
		);
		Ok(())
	}
}

/// Dashed gridlines drawn over the map at every major tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridStyle {
	pub show: bool,
	pub color: [u8; 3],
	/// Line width in points.
	pub line_width: f64,
	/// Dash pattern `[on, off]` in multiples of `line_width`.
	pub dash: [f64; 2],
}

impl Default for GridStyle {
	fn default() -> Self {
		Self {
			show: true,
			color: [255, 255, 255],
			line_width: 0.7,
			dash: [3.7, 1.6],
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigureStyle {
	pub width_inches: f64,
	pub height_inches: f64,
	/// Output resolution; the canvas is `width_inches * dpi` pixels wide.
	pub dpi: u32,
	/// Opacity of the map image over the white background.
	pub image_alpha: f64,
	/// TrueType/OpenType font for all text. If unset, the bundled DejaVu Sans is used.
	pub font_path: Option<PathBuf>,
	pub label_weight: FontWeight,
	pub x_axis: AxisStyle,
	pub y_axis: AxisStyle,
	pub grid: GridStyle,
	pub caption: String,
	/// Caption size in points.
	pub caption_size: f64,
	/// Decimal places of the coordinate tick labels.
	pub tick_decimals: usize,
}

impl Default for FigureStyle {
	fn default() -> Self {
		Self {
			width_inches: 8.0,
			height_inches: 10.0,
			dpi: 300,
			image_alpha: 0.8,
			font_path: None,
			label_weight: FontWeight::Normal,
			x_axis: AxisStyle::default(),
			y_axis: AxisStyle::default(),
			grid: GridStyle::default(),
			caption: DEFAULT_CAPTION.to_string(),
			caption_size: 7.0,
			tick_decimals: 3,
		}
	}
}

impl FigureStyle {
	pub fn x_label(&self) -> &str {
		self.x_axis.label_or("Longitude")
	}

	pub fn y_label(&self) -> &str {
		self.y_axis.label_or("Latitude")
	}

	/// Canvas size in pixels.
	pub fn pixel_size(&self) -> (u32, u32) {
		let dpi = f64::from(self.dpi);
		(
			(self.width_inches * dpi).round() as u32,
			(self.height_inches * dpi).round() as u32,
		)
	}

	/// Converts a length in points (1/72 inch) to pixels at the configured resolution.
	pub fn points_to_pixels(&self, points: f64) -> f64 {
		points * f64::from(self.dpi) / 72.0
	}

	pub fn validate(&self) -> Result<()> {
		ensure!(
			self.width_inches > 0.0 && self.width_inches <= 100.0,
			"figure width ({} in) must be between 0 and 100 inches",
			self.width_inches
		);
		ensure!(
			self.height_inches > 0.0 && self.height_inches <= 100.0,
			"figure height ({} in) must be between 0 and 100 inches",
			self.height_inches
		);
		ensure!(
			(10..=1200).contains(&self.dpi),
			"dpi ({}) must be between 10 and 1200",
			self.dpi
		);
		let (width, height) = self.pixel_size();
		ensure!(
			u64::from(width) * u64::from(height) <= MAX_CANVAS_PIXELS,
			"figure of {width}x{height} pixels exceeds the limit of {MAX_CANVAS_PIXELS} pixels, lower the size or dpi"
		);
		ensure!(
			(0.0..=1.0).contains(&self.image_alpha),
			"image alpha ({}) must be between 0 and 1",
			self.image_alpha
		);
		self.x_axis.validate("x axis")?;
		self.y_axis.validate("y axis")?;
		ensure!(
			self.caption_size > 0.0 && self.caption_size <= 72.0,
			"caption size ({}) must be between 0 and 72 points",
			self.caption_size
		);
		ensure!(
			self.grid.line_width > 0.0,
			"grid line width ({}) must be positive",
			self.grid.line_width
		);
		ensure!(
			self.grid.dash.iter().all(|d| *d > 0.0),
			"grid dash pattern {:?} must only contain positive lengths",
			self.grid.dash
		);
		ensure!(
			self.tick_decimals <= 10,
			"tick decimals ({}) must not exceed 10",
			self.tick_decimals
		);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn default_labels() {
		let style = FigureStyle::default();
		assert_eq!(style.x_label(), "Longitude");
		assert_eq!(style.y_label(), "Latitude");

		let mut style = style;
		style.y_axis.label = Some("Lat (°)".to_string());
		assert_eq!(style.y_label(), "Lat (°)");
	}

	#[test]
	fn pixel_size_at_300_dpi() {
		let style = FigureStyle::default();
		assert_eq!(style.pixel_size(), (2400, 3000));
		assert_eq!(style.points_to_pixels(72.0), 300.0);
	}

	#[test]
	fn defaults_are_valid() {
		FigureStyle::default().validate().unwrap();
	}

	#[test]
	fn font_sizes_are_limited() {
		let mut style = FigureStyle::default();
		style.x_axis.label_size = 21.0;
		assert!(style.validate().is_err());

		let mut style = FigureStyle::default();
		style.y_axis.tick_size = 5.0;
		assert!(style.validate().is_err());

		let mut style = FigureStyle::default();
		style.y_axis.tick_size = 6.0;
		style.x_axis.label_size = 20.0;
		style.validate().unwrap();
	}

	#[test]
	fn other_limits() {
		let mut style = FigureStyle::default();
		style.dpi = 5;
		assert!(style.validate().is_err());

		let mut style = FigureStyle::default();
		style.image_alpha = 1.5;
		assert!(style.validate().is_err());

		let mut style = FigureStyle::default();
		style.grid.dash = [1.0, 0.0];
		assert!(style.validate().is_err());
	}

	#[test]
	fn canvas_size_is_limited() {
		let style = FigureStyle {
			dpi: 1200,
			..FigureStyle::default()
		};
		style.validate().unwrap();

		let style = FigureStyle {
			width_inches: 100.0,
			height_inches: 100.0,
			dpi: 1200,
			..FigureStyle::default()
		};
		let err = style.validate().unwrap_err();
		assert!(err.to_string().contains("120000x120000 pixels exceeds the limit"));
	}
}

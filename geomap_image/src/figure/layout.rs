use super::{text::TextRenderer, ticks::format_tick};
use anyhow::{Result, ensure};
use geomap_core::{
	GeoBBox,
	config::{FigureStyle, FontWeight},
};

/// Smallest plot box, in pixels, that still makes a figure.
const MIN_PLOT_SIZE: u32 = 16;

/// An axis-aligned rectangle on the canvas, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
	pub x: u32,
	pub y: u32,
	pub width: u32,
	pub height: u32,
}

impl PixelRect {
	/// First column right of the rectangle.
	pub fn right(&self) -> u32 {
		self.x + self.width
	}

	/// First row below the rectangle.
	pub fn bottom(&self) -> u32 {
		self.y + self.height
	}
}

/// Lengths in pixels derived from point sizes at the figure's resolution.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Metrics {
	pub outer_pad: u32,
	pub tick_length: u32,
	pub tick_width: u32,
	pub tick_pad: u32,
	pub label_pad: u32,
	pub frame_width: u32,
	pub x_tick_px: f32,
	pub y_tick_px: f32,
	pub x_label_px: f32,
	pub y_label_px: f32,
	pub caption_px: f32,
}

impl Metrics {
	pub fn new(style: &FigureStyle) -> Self {
		let px = |points: f64| style.points_to_pixels(points);
		let whole = |points: f64| (px(points).round() as u32).max(1);
		Self {
			outer_pad: whole(6.0),
			tick_length: whole(3.5),
			tick_width: whole(0.8),
			tick_pad: whole(3.5),
			label_pad: whole(4.0),
			frame_width: whole(0.8),
			x_tick_px: px(style.x_axis.tick_size) as f32,
			y_tick_px: px(style.y_axis.tick_size) as f32,
			x_label_px: px(style.x_axis.label_size) as f32,
			y_label_px: px(style.y_axis.label_size) as f32,
			caption_px: px(style.caption_size) as f32,
		}
	}
}

/// Where the plot box goes, given the space the surrounding text needs.
///
/// The box keeps the map's geographic proportions: its height over width equals
/// `region.aspect_ratio()` times the extent's latitude span over its longitude span.
pub(crate) fn plot_area(
	canvas: (u32, u32),
	extent: &GeoBBox,
	region: &GeoBBox,
	style: &FigureStyle,
	metrics: &Metrics,
	text: &TextRenderer,
) -> Result<PixelRect> {
	let (canvas_width, canvas_height) = canvas;
	let weight = style.label_weight;
	let normal = FontWeight::Normal;

	// widest tick labels are the ones at the ends of the axes
	let widest = |min: f64, max: f64, px: f32| {
		[min, max]
			.iter()
			.map(|v| text.measure(&format_tick(*v, style.tick_decimals), px, normal))
			.fold((0, 0), |a, b| (a.0.max(b.0), a.1.max(b.1)))
	};
	let x_tick_size = widest(extent.lon_min, extent.lon_max, metrics.x_tick_px);
	let y_tick_size = widest(extent.lat_min, extent.lat_max, metrics.y_tick_px);

	let mut left = metrics.outer_pad + metrics.tick_length;
	if style.y_axis.show_ticks {
		left += y_tick_size.0 + metrics.tick_pad;
	}
	if style.y_axis.show_label {
		left += text.measure(style.y_label(), metrics.y_label_px, weight).1 + metrics.label_pad;
	}

	let mut bottom = metrics.outer_pad + metrics.tick_length;
	if style.x_axis.show_ticks {
		bottom += x_tick_size.1 + metrics.tick_pad;
	}
	if style.x_axis.show_label {
		bottom += text.measure(style.x_label(), metrics.x_label_px, weight).1 + metrics.label_pad;
	}
	if !style.caption.is_empty() {
		bottom += text.measure(&style.caption, metrics.caption_px, normal).1 + metrics.outer_pad;
	}

	// tick labels at the top and right ends stick out of the plot box by half their size
	let mut top = metrics.outer_pad;
	if style.y_axis.show_ticks {
		top += y_tick_size.1.div_ceil(2);
	}
	let mut right = metrics.outer_pad;
	if style.x_axis.show_ticks {
		right += x_tick_size.0.div_ceil(2);
	}

	let available_width = canvas_width.saturating_sub(left + right);
	let available_height = canvas_height.saturating_sub(top + bottom);
	ensure!(
		available_width >= MIN_PLOT_SIZE && available_height >= MIN_PLOT_SIZE,
		"figure of {canvas_width}x{canvas_height} pixels leaves no room for the map"
	);

	ensure!(
		extent.lon_span() > 0.0 && extent.lat_span() > 0.0,
		"map extent {extent:?} is empty"
	);
	let ratio = region.aspect_ratio() * extent.lat_span() / extent.lon_span();
	ensure!(ratio.is_finite() && ratio > 0.0, "map extent {extent:?} has no usable aspect ratio");

	let (width, height) = if f64::from(available_height) / f64::from(available_width) > ratio {
		(available_width, (f64::from(available_width) * ratio).round() as u32)
	} else {
		((f64::from(available_height) / ratio).round() as u32, available_height)
	};
	let width = width.clamp(1, available_width);
	let height = height.clamp(1, available_height);

	Ok(PixelRect {
		x: left + (available_width - width) / 2,
		y: top + (available_height - height) / 2,
		width,
		height,
	})
}

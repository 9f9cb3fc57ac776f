//! Composition of the map figure.
//!
//! The canvas is `width_inches * dpi` by `height_inches * dpi` pixels on white. The map
//! fills a plot box whose proportions follow the geographic aspect ratio of the region,
//! framed by coordinate ticks, dashed gridlines, axis labels and an attribution caption.

mod draw;
mod layout;
mod text;
mod ticks;

pub use layout::PixelRect;
pub use text::TextRenderer;
pub use ticks::{format_tick, nice_ticks};

use crate::format;
use anyhow::Result;
use draw::{BLACK, Dash};
use geomap_core::{
	Blob, GeoBBox, OutputFormat,
	config::{FigureStyle, FontWeight},
};
use image::{DynamicImage, Rgb, RgbImage};
use layout::Metrics;

const MIN_TICK_BINS: usize = 2;
const MAX_TICK_BINS: usize = 8;

/// A coordinate tick: its value, its pixel position along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
	pub value: f64,
	pub position: u32,
	pub label: String,
}

/// A rendered figure, ready to be encoded.
#[derive(Clone, Debug)]
pub struct Figure {
	image: RgbImage,
	plot_area: PixelRect,
	x_ticks: Vec<Tick>,
	y_ticks: Vec<Tick>,
	dpi: u32,
}

impl Figure {
	/// Renders `map`, which covers `extent`, with the text settings of `style`.
	///
	/// `region` is the unpadded selection; its center latitude sets the aspect ratio.
	pub fn render(map: &DynamicImage, extent: &GeoBBox, region: &GeoBBox, style: &FigureStyle) -> Result<Figure> {
		let text = TextRenderer::from_style(style)?;
		Figure::render_with(map, extent, region, style, &text)
	}

	pub fn render_with(
		map: &DynamicImage,
		extent: &GeoBBox,
		region: &GeoBBox,
		style: &FigureStyle,
		text: &TextRenderer,
	) -> Result<Figure> {
		style.validate()?;

		let (width, height) = style.pixel_size();
		let metrics = Metrics::new(style);
		let area = layout::plot_area((width, height), extent, region, style, &metrics, text)?;
		log::debug!("figure {width}x{height} px, plot area {area:?}");

		let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
		draw::blend_map(&mut canvas, map, area, style.image_alpha);

		let x_ticks = x_ticks(extent, area, style, &metrics, text);
		let y_ticks = y_ticks(extent, area, style, &metrics);

		if style.grid.show {
			let dash = Dash::new(style.points_to_pixels(style.grid.line_width), style.grid.dash);
			let color = Rgb(style.grid.color);
			for tick in &x_ticks {
				draw::dashed_vertical(&mut canvas, area, tick.position, &dash, color);
			}
			for tick in &y_ticks {
				draw::dashed_horizontal(&mut canvas, area, tick.position, &dash, color);
			}
		}

		draw::frame(&mut canvas, area, metrics.frame_width);

		let mut figure = Figure {
			image: canvas,
			plot_area: area,
			x_ticks,
			y_ticks,
			dpi: style.dpi,
		};
		figure.draw_tick_marks(&metrics);
		figure.draw_text(style, &metrics, text);
		Ok(figure)
	}

	fn draw_tick_marks(&mut self, metrics: &Metrics) {
		let area = self.plot_area;
		let half = i64::from(metrics.tick_width / 2);
		let below = i64::from(area.bottom() + metrics.frame_width);
		for tick in &self.x_ticks {
			let x = i64::from(tick.position) - half;
			draw::fill(&mut self.image, x, below, metrics.tick_width, metrics.tick_length, BLACK);
		}
		let left = i64::from(area.x) - i64::from(metrics.frame_width + metrics.tick_length);
		for tick in &self.y_ticks {
			let y = i64::from(tick.position) - half;
			draw::fill(&mut self.image, left, y, metrics.tick_length, metrics.tick_width, BLACK);
		}
	}

	fn draw_text(&mut self, style: &FigureStyle, metrics: &Metrics, text: &TextRenderer) {
		let area = self.plot_area;
		let normal = FontWeight::Normal;
		let weight = style.label_weight;
		let to_i32 = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);

		// x axis: tick labels centered under their ticks, then the axis label
		let mut y = area.bottom() + metrics.frame_width + metrics.tick_length;
		if style.x_axis.show_ticks {
			y += metrics.tick_pad;
			let mut height = 0;
			for tick in &self.x_ticks {
				let (w, h) = text.measure(&tick.label, metrics.x_tick_px, normal);
				let x = to_i32(tick.position) - to_i32(w / 2);
				text.draw(&mut self.image, &tick.label, metrics.x_tick_px, x, to_i32(y), normal);
				height = height.max(h);
			}
			y += height;
		}
		if style.x_axis.show_label {
			let label = style.x_label();
			let (w, _) = text.measure(label, metrics.x_label_px, weight);
			let x = to_i32(area.x + area.width / 2) - to_i32(w / 2);
			text.draw(&mut self.image, label, metrics.x_label_px, x, to_i32(y + metrics.label_pad), weight);
		}

		// y axis: tick labels right-aligned left of their ticks, then the rotated axis label
		let mut right = i64::from(area.x) - i64::from(metrics.frame_width + metrics.tick_length);
		if style.y_axis.show_ticks {
			right -= i64::from(metrics.tick_pad);
			let mut widest = 0;
			for tick in &self.y_ticks {
				let (w, h) = text.measure(&tick.label, metrics.y_tick_px, normal);
				let x = right - i64::from(w);
				let y = i64::from(tick.position) - i64::from(h / 2);
				text.draw(&mut self.image, &tick.label, metrics.y_tick_px, x as i32, y as i32, normal);
				widest = widest.max(w);
			}
			right -= i64::from(widest);
		}
		if style.y_axis.show_label {
			let tile = text.render_vertical(style.y_label(), metrics.y_label_px, weight);
			let x = right - i64::from(metrics.label_pad) - i64::from(tile.width());
			let y = i64::from(area.y + area.height / 2) - i64::from(tile.height() / 2);
			image::imageops::replace(&mut self.image, &tile, x, y);
		}

		// caption anchored at the lower right corner
		if !style.caption.is_empty() {
			let (w, h) = text.measure(&style.caption, metrics.caption_px, normal);
			let (width, height) = self.image.dimensions();
			let x = (f64::from(width) * 0.99).round() as i64 - i64::from(w);
			let y = (f64::from(height) * 0.99).round() as i64 - i64::from(h);
			text.draw(&mut self.image, &style.caption, metrics.caption_px, x as i32, y as i32, normal);
		}
	}

	pub fn image(&self) -> &RgbImage {
		&self.image
	}

	pub fn into_image(self) -> RgbImage {
		self.image
	}

	/// Pixel rectangle covered by the map.
	pub fn plot_area(&self) -> PixelRect {
		self.plot_area
	}

	pub fn x_ticks(&self) -> &[Tick] {
		&self.x_ticks
	}

	pub fn y_ticks(&self) -> &[Tick] {
		&self.y_ticks
	}

	pub fn dpi(&self) -> u32 {
		self.dpi
	}

	pub fn encode(&self, format: OutputFormat) -> Result<Blob> {
		format::encode(&self.image, self.dpi, format)
	}
}

fn x_ticks(
	extent: &GeoBBox,
	area: PixelRect,
	style: &FigureStyle,
	metrics: &Metrics,
	text: &TextRenderer,
) -> Vec<Tick> {
	let label = format_tick(extent.lon_max, style.tick_decimals);
	let (label_width, _) = text.measure(&label, metrics.x_tick_px, FontWeight::Normal);
	let bins = (f64::from(area.width) / (f64::from(label_width.max(1)) * 1.8)) as usize;
	let bins = bins.clamp(MIN_TICK_BINS, MAX_TICK_BINS);

	nice_ticks(extent.lon_min, extent.lon_max, bins)
		.into_iter()
		.map(|value| {
			let fraction = (value - extent.lon_min) / extent.lon_span();
			let offset = (fraction * f64::from(area.width)).round() as u32;
			Tick {
				value,
				position: area.x + offset.min(area.width.saturating_sub(1)),
				label: format_tick(value, style.tick_decimals),
			}
		})
		.collect()
}

fn y_ticks(extent: &GeoBBox, area: PixelRect, style: &FigureStyle, metrics: &Metrics) -> Vec<Tick> {
	let spacing = f64::from(metrics.y_tick_px) * 3.0;
	let bins = (f64::from(area.height) / spacing.max(1.0)) as usize;
	let bins = bins.clamp(MIN_TICK_BINS, MAX_TICK_BINS);

	nice_ticks(extent.lat_min, extent.lat_max, bins)
		.into_iter()
		.map(|value| {
			let fraction = (extent.lat_max - value) / extent.lat_span();
			let offset = (fraction * f64::from(area.height)).round() as u32;
			Tick {
				value,
				position: area.y + offset.min(area.height.saturating_sub(1)),
				label: format_tick(value, style.tick_decimals),
			}
		})
		.collect()
}

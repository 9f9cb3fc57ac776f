use super::layout::PixelRect;
use image::{DynamicImage, Rgb, RgbImage, imageops::FilterType};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

pub(crate) const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Scales `map` into `area` and blends it over the canvas with the given opacity.
pub(crate) fn blend_map(canvas: &mut RgbImage, map: &DynamicImage, area: PixelRect, alpha: f64) {
	let scaled = image::imageops::resize(&map.to_rgba8(), area.width, area.height, FilterType::Triangle);
	let alpha = alpha.clamp(0.0, 1.0);

	for (x, y, src) in scaled.enumerate_pixels() {
		let a = alpha * f64::from(src.0[3]) / 255.0;
		let dst = canvas.get_pixel_mut(area.x + x, area.y + y);
		for c in 0..3 {
			let value = f64::from(src.0[c]) * a + f64::from(dst.0[c]) * (1.0 - a);
			dst.0[c] = value.round().clamp(0.0, 255.0) as u8;
		}
	}
}

/// Fills a rectangle, ignoring empty sizes.
pub(crate) fn fill(canvas: &mut RgbImage, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
	if width == 0 || height == 0 {
		return;
	}
	draw_filled_rect_mut(canvas, Rect::at(x as i32, y as i32).of_size(width, height), color);
}

/// Draws a frame of `width` pixels just outside `area`.
pub(crate) fn frame(canvas: &mut RgbImage, area: PixelRect, width: u32) {
	let (x, y) = (i64::from(area.x), i64::from(area.y));
	let w = i64::from(width);
	let outer_width = area.width + 2 * width;
	fill(canvas, x - w, y - w, outer_width, width, BLACK);
	fill(canvas, x - w, i64::from(area.bottom()), outer_width, width, BLACK);
	fill(canvas, x - w, y, width, area.height, BLACK);
	fill(canvas, i64::from(area.right()), y, width, area.height, BLACK);
}

/// On/off lengths of a dashed line, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Dash {
	pub width: u32,
	pub on: u32,
	pub off: u32,
}

impl Dash {
	/// `line_width` is in pixels, `pattern` in multiples of it.
	pub fn new(line_width: f64, pattern: [f64; 2]) -> Self {
		let whole = |v: f64| (v.round() as u32).max(1);
		Dash {
			width: whole(line_width),
			on: whole(line_width * pattern[0]),
			off: whole(line_width * pattern[1]),
		}
	}

	/// Dash segments `(start, length)` covering `0..length`.
	pub fn segments(&self, length: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
		let period = (self.on + self.off) as usize;
		(0..length)
			.step_by(period)
			.map(move |start| (start, self.on.min(length - start)))
	}
}

/// Dashed vertical line through the plot area at column `x`.
pub(crate) fn dashed_vertical(canvas: &mut RgbImage, area: PixelRect, x: u32, dash: &Dash, color: Rgb<u8>) {
	let left = i64::from(x) - i64::from(dash.width / 2);
	for (start, length) in dash.segments(area.height) {
		fill(canvas, left, i64::from(area.y + start), dash.width, length, color);
	}
}

/// Dashed horizontal line through the plot area at row `y`.
pub(crate) fn dashed_horizontal(canvas: &mut RgbImage, area: PixelRect, y: u32, dash: &Dash, color: Rgb<u8>) {
	let top = i64::from(y) - i64::from(dash.width / 2);
	for (start, length) in dash.segments(area.width) {
		fill(canvas, i64::from(area.x + start), top, length, dash.width, color);
	}
}

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use anyhow::{Context, Result, anyhow};
use geomap_core::config::{FigureStyle, FontWeight};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;

/// DejaVu Sans, used unless the style names another font. License in `assets/DejaVuSans.LICENSE`.
static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Measures and draws the figure's text.
#[derive(Clone)]
pub struct TextRenderer {
	font: FontArc,
}

impl TextRenderer {
	/// Loads `style.font_path`, or the bundled font when none is configured.
	pub fn from_style(style: &FigureStyle) -> Result<Self> {
		match &style.font_path {
			Some(path) => {
				log::debug!("using font {path:?}");
				Ok(Self::with_font(load_font(path)?))
			}
			None => Self::bundled(),
		}
	}

	pub fn bundled() -> Result<Self> {
		let font = FontArc::try_from_slice(BUNDLED_FONT).map_err(|e| anyhow!("parsing bundled font: {e}"))?;
		Ok(Self::with_font(font))
	}

	pub fn with_font(font: FontArc) -> Self {
		Self { font }
	}

	/// Width and height in pixels of `text` set at `px` pixels.
	pub fn measure(&self, text: &str, px: f32, weight: FontWeight) -> (u32, u32) {
		if text.is_empty() {
			return (0, 0);
		}
		let scale = PxScale::from(px);
		let (width, _) = text_size(scale, &self.font, text);
		let height = self.font.as_scaled(scale).height().ceil() as u32;
		(width + bold_offset(px, weight).unsigned_abs(), height)
	}

	/// Draws `text` with its top left corner at `(x, y)`.
	pub fn draw(&self, image: &mut RgbImage, text: &str, px: f32, x: i32, y: i32, weight: FontWeight) {
		let scale = PxScale::from(px);
		let color = Rgb([0, 0, 0]);
		draw_text_mut(image, color, x, y, scale, &self.font, text);
		let offset = bold_offset(px, weight);
		if offset != 0 {
			draw_text_mut(image, color, x + offset, y, scale, &self.font, text);
		}
	}

	/// Renders `text` rotated by 90° counter-clockwise on a white tile.
	pub fn render_vertical(&self, text: &str, px: f32, weight: FontWeight) -> RgbImage {
		let (width, height) = self.measure(text, px, weight);
		let mut tile = RgbImage::from_pixel(width.max(1), height.max(1), Rgb([255, 255, 255]));
		self.draw(&mut tile, text, px, 0, 0, weight);
		image::imageops::rotate270(&tile)
	}
}

fn load_font(path: &Path) -> Result<FontArc> {
	let bytes = std::fs::read(path).with_context(|| format!("reading font {path:?}"))?;
	FontArc::try_from_vec(bytes).map_err(|e| anyhow!("parsing font {path:?}: {e}"))
}

/// Horizontal overstrike used to fake a bold weight.
fn bold_offset(px: f32, weight: FontWeight) -> i32 {
	match weight {
		FontWeight::Normal => 0,
		FontWeight::Bold => ((px / 30.0).round() as i32).max(1),
	}
}

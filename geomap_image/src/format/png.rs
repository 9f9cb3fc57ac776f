use ::png::{BitDepth, ColorType, Compression, Encoder, PixelDimensions, Unit};
use anyhow::{Context, Result, anyhow, ensure};
use geomap_core::Blob;
use image::{DynamicImage, ImageFormat, RgbImage, load_from_memory_with_format};

const METERS_PER_INCH: f64 = 0.0254;

/// Encodes an RGB image as PNG without a physical resolution.
pub fn encode(image: &RgbImage) -> Result<Blob> {
	write(image, None)
}

/// Encodes an RGB image as PNG and records `dpi` in its `pHYs` chunk.
pub fn encode_with_dpi(image: &RgbImage, dpi: u32) -> Result<Blob> {
	ensure!(dpi > 0, "dpi must be positive");
	let ppu = pixels_per_meter(dpi);
	write(
		image,
		Some(PixelDimensions {
			xppu: ppu,
			yppu: ppu,
			unit: Unit::Meter,
		}),
	)
}

fn write(image: &RgbImage, pixel_dims: Option<PixelDimensions>) -> Result<Blob> {
	let mut buffer: Vec<u8> = Vec::new();
	{
		let mut encoder = Encoder::new(&mut buffer, image.width(), image.height());
		encoder.set_color(ColorType::Rgb);
		encoder.set_depth(BitDepth::Eight);
		encoder.set_compression(Compression::Balanced);
		encoder.set_pixel_dims(pixel_dims);

		let mut writer = encoder.write_header().context("writing PNG header")?;
		writer.write_image_data(image.as_raw()).context("writing PNG data")?;
		writer.finish().context("finishing PNG")?;
	}
	Ok(Blob::from(buffer))
}

/// Pixels per meter for a resolution given in dots per inch, as stored in `pHYs`.
pub fn pixels_per_meter(dpi: u32) -> u32 {
	(f64::from(dpi) / METERS_PER_INCH).round() as u32
}

pub fn blob2image(blob: &Blob) -> Result<DynamicImage> {
	load_from_memory_with_format(blob.as_slice(), ImageFormat::Png)
		.map_err(|e| anyhow!("Failed to decode PNG image: {e}"))
}

//! Encoders for exported figures.

pub mod pdf;
pub mod png;

use anyhow::Result;
use geomap_core::{Blob, OutputFormat};
use image::RgbImage;

/// Encodes a rendered figure. `dpi` is recorded as the PNG resolution and sets the PDF page size.
pub fn encode(image: &RgbImage, dpi: u32, format: OutputFormat) -> Result<Blob> {
	match format {
		OutputFormat::Png => png::encode_with_dpi(image, dpi),
		OutputFormat::Pdf => pdf::encode(image, dpi),
	}
}

//! Single-page PDF export.
//!
//! The figure is embedded as one Flate-compressed RGB image covering the whole page.
//! The page measures `pixels * 72 / dpi` points, so printing it reproduces the figure
//! at its nominal size.

use anyhow::{Context, Result, ensure};
use flate2::{Compression, write::ZlibEncoder};
use geomap_core::Blob;
use image::RgbImage;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};
use std::io::Write;

const IMAGE_NAME: Name<'static> = Name(b"Im1");

pub fn encode(image: &RgbImage, dpi: u32) -> Result<Blob> {
	ensure!(dpi > 0, "dpi must be positive");
	let (width, height) = image.dimensions();
	ensure!(width > 0 && height > 0, "can not export an empty image");

	let page_width = width as f32 * 72.0 / dpi as f32;
	let page_height = height as f32 * 72.0 / dpi as f32;

	let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(image.as_raw()).context("compressing image data")?;
	let samples = encoder.finish().context("compressing image data")?;

	let catalog_id = Ref::new(1);
	let page_tree_id = Ref::new(2);
	let page_id = Ref::new(3);
	let image_id = Ref::new(4);
	let content_id = Ref::new(5);

	let mut pdf = Pdf::new();
	pdf.catalog(catalog_id).pages(page_tree_id);
	pdf.pages(page_tree_id).kids([page_id]).count(1);

	let mut page = pdf.page(page_id);
	page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
	page.parent(page_tree_id);
	page.contents(content_id);
	page.resources().x_objects().pair(IMAGE_NAME, image_id);
	page.finish();

	let mut xobject = pdf.image_xobject(image_id, &samples);
	xobject.filter(Filter::FlateDecode);
	xobject.width(i32::try_from(width)?);
	xobject.height(i32::try_from(height)?);
	xobject.color_space().device_rgb();
	xobject.bits_per_component(8);
	xobject.finish();

	let mut content = Content::new();
	content.save_state();
	content.transform([page_width, 0.0, 0.0, page_height, 0.0, 0.0]);
	content.x_object(IMAGE_NAME);
	content.restore_state();
	pdf.stream(content_id, &content.finish());

	Ok(Blob::from(pdf.finish()))
}

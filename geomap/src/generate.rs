//! End-to-end generation of a map figure: fetch, render, encode.

use crate::fetch::{MapFetcher, MapImageSource};
use anyhow::{Context, Result};
use geomap_core::{Blob, GeoBBox, OutputFormat, ZoomLevel, config::Config};
use geomap_image::{Figure, TextRenderer};

/// What to draw and which files to produce.
#[derive(Clone, Debug, PartialEq)]
pub struct MapRequest {
	pub region: GeoBBox,
	/// Degrees added on every side of the region before fetching.
	pub margin: f64,
	pub override_zoom: Option<ZoomLevel>,
	/// Requested export formats. PNG is always produced.
	pub formats: Vec<OutputFormat>,
}

impl MapRequest {
	pub fn new(region: GeoBBox) -> Self {
		Self {
			region,
			margin: 0.01,
			override_zoom: None,
			formats: vec![OutputFormat::Png],
		}
	}

	/// Requested formats with PNG first, without duplicates.
	pub fn output_formats(&self) -> Vec<OutputFormat> {
		let mut formats = vec![OutputFormat::Png];
		for format in &self.formats {
			if !formats.contains(format) {
				formats.push(*format);
			}
		}
		formats
	}
}

#[derive(Debug)]
pub struct GeneratedMap {
	pub figure: Figure,
	/// Zoom level the server finally accepted.
	pub zoom: ZoomLevel,
	/// The margin-expanded box shown in the figure.
	pub bbox: GeoBBox,
	pub outputs: Vec<(OutputFormat, Blob)>,
}

impl GeneratedMap {
	pub fn output(&self, format: OutputFormat) -> Option<&Blob> {
		self.outputs.iter().find(|(f, _)| *f == format).map(|(_, blob)| blob)
	}
}

pub async fn generate_map(source: &dyn MapImageSource, request: &MapRequest, config: &Config) -> Result<GeneratedMap> {
	let text = TextRenderer::from_style(&config.figure)?;
	generate_map_with(source, request, config, &text).await
}

/// Like [`generate_map`], with an explicit text renderer.
pub async fn generate_map_with(
	source: &dyn MapImageSource,
	request: &MapRequest,
	config: &Config,
	text: &TextRenderer,
) -> Result<GeneratedMap> {
	config.validate()?;

	let fetched = MapFetcher::new(source, &config.source)
		.fetch(&request.region, request.margin, request.override_zoom)
		.await?;

	let figure = Figure::render_with(&fetched.image, &fetched.bbox, &request.region, &config.figure, text)
		.context("rendering figure")?;

	let outputs = request
		.output_formats()
		.into_iter()
		.map(|format| {
			let blob = figure.encode(format).with_context(|| format!("encoding figure as {format}"))?;
			Ok((format, blob))
		})
		.collect::<Result<Vec<_>>>()?;

	Ok(GeneratedMap {
		figure,
		zoom: fetched.zoom,
		bbox: fetched.bbox,
		outputs,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fetch::{FetchError, MapQuery, SourceResponse};
	use async_trait::async_trait;
	use geomap_core::config::FigureStyle;
	use image::{Rgb, RgbImage};
	use pretty_assertions::assert_eq;

	#[derive(Debug)]
	struct StaticSource {
		status_above: u8,
	}

	#[async_trait]
	impl MapImageSource for StaticSource {
		async fn request(&self, query: &MapQuery) -> Result<SourceResponse> {
			if query.zoom.value() > self.status_above {
				return Ok(SourceResponse::new(400, Blob::from("too large")));
			}
			let image = RgbImage::from_pixel(90, 50, Rgb([120, 180, 90]));
			Ok(SourceResponse::new(200, geomap_image::format::png::encode(&image)?))
		}

		fn get_name(&self) -> &str {
			"static"
		}
	}

	fn config() -> Config {
		let mut config = Config::default();
		config.source.retry_delay_ms = 0;
		config.figure = FigureStyle {
			dpi: 50,
			..FigureStyle::default()
		};
		config
	}

	fn region() -> GeoBBox {
		GeoBBox::new(133.25, 33.75, 133.7, 34.0).unwrap()
	}

	#[tokio::test]
	async fn png_and_pdf() -> Result<()> {
		let mut request = MapRequest::new(region());
		request.formats = vec![OutputFormat::Pdf];
		let source = StaticSource { status_above: 10 };
		let map = generate_map_with(&source, &request, &config(), &TextRenderer::bundled().unwrap()).await?;

		assert_eq!(map.zoom, ZoomLevel::new(10));
		assert_eq!(map.bbox, region().with_margin(0.01)?);
		assert_eq!(map.outputs.len(), 2);
		assert_eq!(map.figure.image().dimensions(), (400, 500));

		let png = map.output(OutputFormat::Png).unwrap();
		let decoded = geomap_image::format::png::blob2image(png)?;
		assert_eq!((decoded.width(), decoded.height()), (400, 500));

		let pdf = map.output(OutputFormat::Pdf).unwrap();
		assert!(!pdf.is_empty());
		assert!(pdf.starts_with(b"%PDF-"));
		Ok(())
	}

	#[tokio::test]
	async fn fetch_errors_pass_through() {
		let mut config = config();
		config.source.min_zoom = 11;
		let err = generate_map_with(
			&StaticSource { status_above: 10 },
			&MapRequest::new(region()),
			&config,
			&TextRenderer::bundled().unwrap(),
		)
		.await
		.unwrap_err();
		assert_eq!(
			err.downcast_ref::<FetchError>(),
			Some(&FetchError::RegionTooLarge { min_zoom: 11 })
		);
	}

	#[test]
	fn png_is_always_first() {
		let mut request = MapRequest::new(region());
		request.formats = vec![OutputFormat::Pdf, OutputFormat::Png, OutputFormat::Pdf];
		assert_eq!(request.output_formats(), vec![OutputFormat::Png, OutputFormat::Pdf]);

		request.formats.clear();
		assert_eq!(request.output_formats(), vec![OutputFormat::Png]);
	}
}

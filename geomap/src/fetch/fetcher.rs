use super::{FetchError, MapImageSource, MapQuery};
use anyhow::{Context, Result};
use geomap_core::{GeoBBox, ZoomLevel, config::SourceConfig};
use image::DynamicImage;
use std::time::Duration;
use tokio::time::sleep;

/// A map image together with the zoom level and box it was rendered for.
#[derive(Clone, Debug)]
pub struct FetchedMap {
	pub image: DynamicImage,
	pub zoom: ZoomLevel,
	/// The margin-expanded box the image covers.
	pub bbox: GeoBBox,
}

/// Requests map images from a source, stepping down the zoom level on HTTP 400.
#[derive(Debug)]
pub struct MapFetcher<'a> {
	source: &'a dyn MapImageSource,
	retry_delay: Duration,
	retry_on_bad_request: bool,
	min_zoom: u8,
}

impl<'a> MapFetcher<'a> {
	pub fn new(source: &'a dyn MapImageSource, config: &SourceConfig) -> Self {
		Self {
			source,
			retry_delay: config.retry_delay(),
			retry_on_bad_request: config.retry_on_bad_request,
			min_zoom: config.min_zoom,
		}
	}

	/// Fetches the image for `region` expanded by `margin` degrees.
	///
	/// The first request uses `override_zoom` if given, otherwise the zoom looked up
	/// from the region's span. Rejected requests are retried one level coarser after
	/// the retry delay; the floor level is the last one tried.
	pub async fn fetch(&self, region: &GeoBBox, margin: f64, override_zoom: Option<ZoomLevel>) -> Result<FetchedMap> {
		let bbox = region.with_margin(margin)?;
		let mut zoom = ZoomLevel::resolve(region, override_zoom);
		log::debug!("fetching {bbox:?} from '{}', starting at zoom {zoom}", self.source.get_name());

		while zoom.is_at_least(self.min_zoom) {
			let query = MapQuery::new(bbox, zoom);
			let response = self
				.source
				.request(&query)
				.await
				.with_context(|| format!("requesting map image at zoom {zoom}"))?;

			if response.is_success() {
				let image = image::load_from_memory(response.body.as_slice()).map_err(|e| {
					FetchError::UndecodableImage {
						zoom,
						detail: format!("{e}; response starts with {:?}", response.body.snippet(100)),
					}
				})?;
				log::info!("fetched {}x{} px map image at zoom {zoom}", image.width(), image.height());
				return Ok(FetchedMap { image, zoom, bbox });
			}

			if !(response.is_bad_request() && self.retry_on_bad_request) {
				return Err(FetchError::HttpStatus {
					status: response.status,
					zoom,
				}
				.into());
			}

			let next = zoom.coarser();
			if next == zoom || !next.is_at_least(self.min_zoom) {
				break;
			}
			log::warn!("zoom {zoom} rejected as too large (HTTP 400), retrying at zoom {next}");
			sleep(self.retry_delay).await;
			zoom = next;
		}

		Err(FetchError::RegionTooLarge { min_zoom: self.min_zoom }.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fetch::SourceResponse;
	use anyhow::anyhow;
	use async_trait::async_trait;
	use geomap_core::Blob;
	use image::{Rgb, RgbImage};
	use pretty_assertions::assert_eq;
	use std::sync::Mutex;

	/// Answers with a fixed status per zoom level and records every query.
	#[derive(Debug)]
	struct MockSource {
		answer: fn(u8) -> Result<SourceResponse>,
		queries: Mutex<Vec<MapQuery>>,
	}

	impl MockSource {
		fn new(answer: fn(u8) -> Result<SourceResponse>) -> Self {
			Self {
				answer,
				queries: Mutex::new(Vec::new()),
			}
		}

		fn zooms(&self) -> Vec<u8> {
			self.queries.lock().unwrap().iter().map(|q| q.zoom.value()).collect()
		}
	}

	#[async_trait]
	impl MapImageSource for MockSource {
		async fn request(&self, query: &MapQuery) -> Result<SourceResponse> {
			self.queries.lock().unwrap().push(*query);
			(self.answer)(query.zoom.value())
		}

		fn get_name(&self) -> &str {
			"mock"
		}
	}

	fn png() -> SourceResponse {
		let image = RgbImage::from_pixel(4, 3, Rgb([200, 120, 40]));
		let blob = geomap_image::format::png::encode(&image).unwrap();
		SourceResponse::new(200, blob)
	}

	fn status(code: u16) -> SourceResponse {
		SourceResponse::new(code, Blob::from("error"))
	}

	fn config() -> SourceConfig {
		SourceConfig {
			retry_delay_ms: 0,
			..SourceConfig::default()
		}
	}

	/// Span 0.45 degrees, which starts at zoom 12.
	fn region() -> GeoBBox {
		GeoBBox::new(133.25, 33.75, 133.7, 34.0).unwrap()
	}

	/// Span 0.01 degrees, which starts at zoom 15.
	fn small_region() -> GeoBBox {
		GeoBBox::new(133.0, 34.0, 133.01, 34.01).unwrap()
	}

	#[tokio::test]
	async fn first_try() -> Result<()> {
		let source = MockSource::new(|_| Ok(png()));
		let map = MapFetcher::new(&source, &config()).fetch(&region(), 0.01, None).await?;

		assert_eq!(map.zoom, ZoomLevel::new(12));
		assert_eq!(map.image.width(), 4);
		assert_eq!(map.bbox, region().with_margin(0.01)?);
		assert_eq!(source.zooms(), vec![12]);
		assert_eq!(source.queries.lock().unwrap()[0].bbox, region().with_margin(0.01)?);
		Ok(())
	}

	#[tokio::test]
	async fn steps_down_to_the_floor() -> Result<()> {
		let source = MockSource::new(|z| Ok(if z > 5 { status(400) } else { png() }));
		let map = MapFetcher::new(&source, &config())
			.fetch(&small_region(), 0.01, None)
			.await?;

		assert_eq!(map.zoom, ZoomLevel::new(5));
		assert_eq!(source.zooms(), vec![15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5]);
		Ok(())
	}

	#[tokio::test]
	async fn region_too_large() {
		let source = MockSource::new(|_| Ok(status(400)));
		let err = MapFetcher::new(&source, &config())
			.fetch(&region(), 0.01, None)
			.await
			.unwrap_err();

		assert_eq!(
			err.downcast_ref::<FetchError>(),
			Some(&FetchError::RegionTooLarge { min_zoom: 5 })
		);
		assert_eq!(source.zooms(), vec![12, 11, 10, 9, 8, 7, 6, 5]);
	}

	#[tokio::test]
	async fn other_status_aborts() {
		let source = MockSource::new(|z| Ok(if z == 12 { status(500) } else { png() }));
		let err = MapFetcher::new(&source, &config())
			.fetch(&region(), 0.01, None)
			.await
			.unwrap_err();

		assert_eq!(
			err.downcast_ref::<FetchError>(),
			Some(&FetchError::HttpStatus {
				status: 500,
				zoom: ZoomLevel::new(12)
			})
		);
		assert_eq!(source.zooms(), vec![12]);
	}

	#[tokio::test]
	async fn network_error_aborts() {
		let source = MockSource::new(|_| Err(anyhow!("connection refused")));
		let err = MapFetcher::new(&source, &config())
			.fetch(&region(), 0.01, None)
			.await
			.unwrap_err();

		assert!(err.downcast_ref::<FetchError>().is_none());
		assert!(format!("{err:#}").contains("at zoom 12: connection refused"));
		assert_eq!(source.zooms(), vec![12]);
	}

	#[tokio::test]
	async fn undecodable_image() {
		let source = MockSource::new(|_| Ok(SourceResponse::new(200, Blob::from("<html>maintenance</html>"))));
		let err = MapFetcher::new(&source, &config())
			.fetch(&region(), 0.01, None)
			.await
			.unwrap_err();

		match err.downcast_ref::<FetchError>() {
			Some(FetchError::UndecodableImage { zoom, detail }) => {
				assert_eq!(*zoom, ZoomLevel::new(12));
				assert!(detail.contains("maintenance"));
			}
			other => panic!("unexpected error {other:?}"),
		}
	}

	#[tokio::test]
	async fn override_zoom_wins() -> Result<()> {
		let source = MockSource::new(|z| Ok(if z > 7 { status(400) } else { png() }));
		let map = MapFetcher::new(&source, &config())
			.fetch(&region(), 0.01, Some(ZoomLevel::new_override(9)?))
			.await?;

		assert_eq!(map.zoom, ZoomLevel::new(7));
		assert_eq!(source.zooms(), vec![9, 8, 7]);
		Ok(())
	}

	#[tokio::test]
	async fn without_retry_a_bad_request_is_final() {
		let source = MockSource::new(|_| Ok(status(400)));
		let config = SourceConfig {
			retry_on_bad_request: false,
			..config()
		};
		let err = MapFetcher::new(&source, &config)
			.fetch(&region(), 0.01, None)
			.await
			.unwrap_err();

		assert_eq!(
			err.downcast_ref::<FetchError>(),
			Some(&FetchError::HttpStatus {
				status: 400,
				zoom: ZoomLevel::new(12)
			})
		);
		assert_eq!(source.zooms(), vec![12]);
	}

	#[tokio::test]
	async fn raised_floor() {
		let source = MockSource::new(|_| Ok(status(400)));
		let config = SourceConfig {
			min_zoom: 10,
			..config()
		};
		let err = MapFetcher::new(&source, &config)
			.fetch(&region(), 0.01, None)
			.await
			.unwrap_err();

		assert_eq!(
			err.downcast_ref::<FetchError>(),
			Some(&FetchError::RegionTooLarge { min_zoom: 10 })
		);
		assert_eq!(source.zooms(), vec![12, 11, 10]);
	}

	#[tokio::test]
	async fn start_below_floor() {
		let source = MockSource::new(|_| Ok(png()));
		let config = SourceConfig {
			min_zoom: 13,
			..config()
		};
		let err = MapFetcher::new(&source, &config)
			.fetch(&region(), 0.01, None)
			.await
			.unwrap_err();

		assert!(err.downcast_ref::<FetchError>().is_some());
		assert!(source.zooms().is_empty());
	}
}

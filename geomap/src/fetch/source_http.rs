//! [`MapImageSource`] backed by the HTTP map image API.

use super::{MapImageSource, MapQuery, SourceResponse};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use geomap_core::{Blob, config::SourceConfig};
use reqwest::{Client, Url};

#[derive(Debug)]
pub struct HttpMapImageSource {
	client: Client,
	name: String,
	url: Url,
}

impl HttpMapImageSource {
	pub fn from_url(url: Url, config: &SourceConfig) -> Result<HttpMapImageSource> {
		match url.scheme() {
			"http" | "https" => (),
			other => bail!("unsupported URL scheme '{other}' in '{url}', expected 'http' or 'https'"),
		}

		let client = Client::builder()
			.timeout(config.timeout())
			.user_agent(config.user_agent())
			.build()
			.context("building HTTP client")?;

		Ok(HttpMapImageSource {
			client,
			name: url.to_string(),
			url,
		})
	}

	pub fn from_config(config: &SourceConfig) -> Result<HttpMapImageSource> {
		let url = Url::parse(&config.url).with_context(|| format!("parsing source url '{}'", config.url))?;
		HttpMapImageSource::from_url(url, config)
	}

	/// The request URL for `query`, with `box` and `z` appended to any existing query.
	pub fn query_url(&self, query: &MapQuery) -> Url {
		let mut url = self.url.clone();
		url.query_pairs_mut().extend_pairs(query.as_params());
		url
	}
}

#[async_trait]
impl MapImageSource for HttpMapImageSource {
	async fn request(&self, query: &MapQuery) -> Result<SourceResponse> {
		let url = self.query_url(query);
		log::debug!("GET {url}");

		let response = self
			.client
			.get(url.clone())
			.send()
			.await
			.with_context(|| format!("requesting '{url}'"))?;
		let status = response.status().as_u16();
		let bytes = response
			.bytes()
			.await
			.with_context(|| format!("reading response of '{url}'"))?;

		log::trace!("'{url}' answered {status} with {} bytes", bytes.len());
		Ok(SourceResponse::new(status, Blob::from(&*bytes)))
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{Router, extract::Query, http::StatusCode, routing::get};
	use geomap_core::{GeoBBox, ZoomLevel};
	use std::collections::HashMap;

	async fn start_mock(app: Router) -> String {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});
		format!("http://{addr}/map.png")
	}

	fn query(zoom: u8) -> MapQuery {
		MapQuery::new(GeoBBox::new(133.24, 33.74, 133.71, 34.01).unwrap(), ZoomLevel::new(zoom))
	}

	#[test]
	fn scheme_is_checked() {
		let config = SourceConfig::default();
		assert!(HttpMapImageSource::from_url(Url::parse("https://example.org/map.png").unwrap(), &config).is_ok());
		assert!(HttpMapImageSource::from_url(Url::parse("ftp://example.org/map.png").unwrap(), &config).is_err());
	}

	#[test]
	fn builds_query_url() -> Result<()> {
		let source = HttpMapImageSource::from_config(&SourceConfig::default())?;
		assert_eq!(source.get_name(), "https://gbank.gsj.jp/seamless/v2/api/1.0/map.png");
		assert_eq!(
			source.query_url(&query(12)).as_str(),
			"https://gbank.gsj.jp/seamless/v2/api/1.0/map.png?box=33.74%2C133.24%2C34.01%2C133.71&z=12"
		);
		Ok(())
	}

	#[tokio::test]
	async fn passes_status_and_body() -> Result<()> {
		let app = Router::new().route(
			"/map.png",
			get(|Query(params): Query<HashMap<String, String>>| async move {
				match params.get("z").map(String::as_str) {
					Some("5") => (StatusCode::OK, format!("box={}", params["box"])),
					_ => (StatusCode::BAD_REQUEST, "too large".to_string()),
				}
			}),
		);
		let url = start_mock(app).await;
		let source = HttpMapImageSource::from_config(&SourceConfig {
			url,
			..SourceConfig::default()
		})?;

		let response = source.request(&query(12)).await?;
		assert_eq!(response.status, 400);
		assert_eq!(response.body.as_slice(), b"too large");

		let response = source.request(&query(5)).await?;
		assert_eq!(response.status, 200);
		assert_eq!(response.body.as_slice(), b"box=33.74,133.24,34.01,133.71");
		Ok(())
	}

	#[tokio::test]
	async fn unreachable_server_is_an_error() -> Result<()> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		drop(listener);

		let source = HttpMapImageSource::from_config(&SourceConfig {
			url: format!("http://{addr}/map.png"),
			..SourceConfig::default()
		})?;
		assert!(source.request(&query(12)).await.is_err());
		Ok(())
	}
}

use crate::types::{MAX_ZOOM, MIN_ZOOM};
use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Image endpoint of the Seamless Digital Geological Map of Japan V2.
pub const DEFAULT_SOURCE_URL: &str = "https://gbank.gsj.jp/seamless/v2/api/1.0/map.png";

/// Where map images come from and how failed requests are retried.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
	/// Map image endpoint, queried with `box` and `z` parameters.
	pub url: String,

	/// Timeout of a single request.
	pub timeout_seconds: u64,

	/// Pause between a rejected request and the retry at the next coarser zoom.
	pub retry_delay_ms: u64,

	/// Retry at a coarser zoom when the API answers 400 (image too large).
	/// When disabled, a 400 is reported like any other HTTP error.
	pub retry_on_bad_request: bool,

	/// Zoom floor: levels below this are never requested.
	pub min_zoom: u8,

	/// Value of the `User-Agent` header.
	pub user_agent: Option<String>,
}

impl Default for SourceConfig {
	fn default() -> Self {
		Self {
			url: DEFAULT_SOURCE_URL.to_string(),
			timeout_seconds: 60,
			retry_delay_ms: 500,
			retry_on_bad_request: true,
			min_zoom: MIN_ZOOM,
			user_agent: None,
		}
	}
}

impl SourceConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_seconds)
	}

	pub fn retry_delay(&self) -> Duration {
		Duration::from_millis(self.retry_delay_ms)
	}

	pub fn user_agent(&self) -> String {
		self
			.user_agent
			.clone()
			.unwrap_or_else(|| format!("geomap/{}", env!("CARGO_PKG_VERSION")))
	}

	pub fn override_optional_url(&mut self, url: &Option<String>) {
		if let Some(url) = url {
			self.url.clone_from(url);
		}
	}

	pub fn validate(&self) -> Result<()> {
		ensure!(
			self.url.starts_with("http://") || self.url.starts_with("https://"),
			"source url '{}' must start with http:// or https://",
			self.url
		);
		ensure!(self.timeout_seconds > 0, "timeout must be at least one second");
		ensure!(
			self.min_zoom <= MAX_ZOOM,
			"min_zoom ({}) must not exceed {MAX_ZOOM}",
			self.min_zoom
		);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let source = SourceConfig::default();
		assert_eq!(source.url, DEFAULT_SOURCE_URL);
		assert_eq!(source.retry_delay(), Duration::from_millis(500));
		assert_eq!(source.min_zoom, 5);
		assert!(source.user_agent().starts_with("geomap/"));
		source.validate().unwrap();
	}

	#[test]
	fn override_url() {
		let mut source = SourceConfig::default();
		source.override_optional_url(&None);
		assert_eq!(source.url, DEFAULT_SOURCE_URL);
		source.override_optional_url(&Some("http://127.0.0.1:8080/map.png".to_string()));
		assert_eq!(source.url, "http://127.0.0.1:8080/map.png");
	}

	#[test]
	fn invalid() {
		let mut source = SourceConfig::default();
		source.url = "ftp://example.org/map.png".to_string();
		assert!(source.validate().is_err());

		let mut source = SourceConfig::default();
		source.min_zoom = 19;
		assert!(source.validate().is_err());

		let mut source = SourceConfig::default();
		source.timeout_seconds = 0;
		assert!(source.validate().is_err());
	}
}

#![allow(unused)]

use assert_cmd::{Command, cargo};
use axum::{Router, extract::Query, http::StatusCode, routing::get};
use std::{
	collections::HashMap,
	path::{Path, PathBuf},
};
use tempfile::{TempDir, tempdir};

#[cfg(windows)]
pub const BINARY_NAME: &str = "geomap.exe";
#[cfg(not(windows))]
pub const BINARY_NAME: &str = "geomap";

/// Helper to get a temp output file path.
pub fn get_temp_output(filename: &str) -> (TempDir, PathBuf) {
	let dir = tempdir().expect("failed to create temp dir");
	let path = dir.path().join(filename);
	(dir, path)
}

/// Helper to create a Command for the geomap binary.
pub fn geomap_cmd() -> Command {
	Command::new(cargo::cargo_bin!())
}

/// A small opaque PNG standing in for a rendered map.
pub fn map_png() -> Vec<u8> {
	let image = image::RgbImage::from_pixel(120, 80, image::Rgb([90, 160, 70]));
	geomap_image::format::png::encode(&image).unwrap().into_vec()
}

/// Starts a map image server that rejects every zoom level above `max_zoom` with
/// HTTP 400 and answers everything else with [`map_png`]. Returns the endpoint URL.
pub async fn start_map_server(max_zoom: u8) -> String {
	let png = map_png();
	let app = Router::new().route(
		"/map.png",
		get(move |Query(params): Query<HashMap<String, String>>| {
			let png = png.clone();
			async move {
				let zoom: u8 = params.get("z").and_then(|z| z.parse().ok()).unwrap_or(u8::MAX);
				if params.get("box").is_none() || zoom > max_zoom {
					(StatusCode::BAD_REQUEST, b"image too large".to_vec())
				} else {
					(StatusCode::OK, png)
				}
			}
		}),
	);

	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	format!("http://{addr}/map.png")
}

/// Runs the binary with `args` on a blocking thread, so a server on the test runtime keeps answering.
pub async fn run_geomap(args: Vec<String>) -> assert_cmd::assert::Assert {
	tokio::task::spawn_blocking(move || geomap_cmd().args(&args).assert())
		.await
		.unwrap()
}

use super::options::FigureOptions;
use anyhow::{Context, Result, ensure};
use geomap::{ATTRIBUTION, MapRequest, fetch::HttpMapImageSource, generate_map};
use geomap_core::{GeoBBox, OutputFormat};
use std::path::{Path, PathBuf};

/// Fetches and renders `region`, then writes every requested format next to `output`.
pub async fn write_map(region: GeoBBox, options: &FigureOptions, output: &Path) -> Result<()> {
	let mut formats = options.formats();
	let output_format = OutputFormat::from_path(output)?;
	if !formats.contains(&output_format) {
		formats.push(output_format);
	}

	let config = options.load_config()?;
	let request = MapRequest {
		region,
		margin: options.margin,
		override_zoom: options.override_zoom()?,
		formats,
	};
	ensure!(
		request.margin >= 0.0 && request.margin.is_finite(),
		"margin ({}) must not be negative",
		request.margin
	);

	eprintln!(
		"rendering region lat {}..{}, lon {}..{}",
		region.lat_min, region.lat_max, region.lon_min, region.lon_max
	);

	let source = HttpMapImageSource::from_config(&config.source)?;
	let map = generate_map(&source, &request, &config).await?;

	println!("zoom level: {}", map.zoom);
	prepare_output(output)?;
	for (format, blob) in &map.outputs {
		let path = output_path(output, *format);
		blob.save_to_file(&path)?;
		println!("wrote {} ({} bytes)", path.display(), blob.len());
	}
	println!("{ATTRIBUTION}");

	Ok(())
}

/// `output` with the extension of `format`.
pub fn output_path(output: &Path, format: OutputFormat) -> PathBuf {
	output.with_extension(format.extension().trim_start_matches('.'))
}

/// Ensures the directory of `output` exists.
pub fn prepare_output(output: &Path) -> Result<()> {
	if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent).with_context(|| format!("creating directory {parent:?}"))?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn paths() {
		let output = Path::new("out/geological_map_33.75_133.25.png");
		assert_eq!(
			output_path(output, OutputFormat::Pdf),
			PathBuf::from("out/geological_map_33.75_133.25.pdf")
		);
		assert_eq!(output_path(output, OutputFormat::Png), output);
	}

	#[test]
	fn creates_parent_directory() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let output = dir.path().join("a/b/map.png");
		prepare_output(&output)?;
		assert!(dir.path().join("a/b").is_dir());
		prepare_output(Path::new("map.png"))?;
		Ok(())
	}
}

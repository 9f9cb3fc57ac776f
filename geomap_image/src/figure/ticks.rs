//! Coordinate tick placement and formatting.
//!
//! Ticks sit on "nice" multiples: the step is one of 1, 2, 2.5 or 5 times a power of
//! ten, the smallest such step that keeps the tick count within the requested bins.

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Relative tolerance for ticks that land on the axis ends.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Tick values inside `[min, max]`, at most `max_bins + 1` of them.
///
/// Returns just `min` for an empty range.
pub fn nice_ticks(min: f64, max: f64, max_bins: usize) -> Vec<f64> {
	let range = max - min;
	if !(range > 0.0) || !range.is_finite() {
		return vec![min];
	}

	let step = nice_step(range, max_bins.max(1));
	let tolerance = step * EDGE_TOLERANCE;
	let first = ((min - tolerance) / step).ceil() as i64;
	let last = ((max + tolerance) / step).floor() as i64;

	(first..=last).map(|k| k as f64 * step).collect()
}

/// Smallest nice step that divides `range` into at most `max_bins` intervals.
pub fn nice_step(range: f64, max_bins: usize) -> f64 {
	let raw = range / max_bins as f64;
	let magnitude = 10f64.powf(raw.log10().floor());
	NICE_STEPS
		.iter()
		.map(|s| s * magnitude)
		.find(|step| *step >= raw * (1.0 - EDGE_TOLERANCE))
		.unwrap_or(10.0 * magnitude)
}

/// Formats a coordinate with a fixed number of decimals, e.g. `133.250`.
pub fn format_tick(value: f64, decimals: usize) -> String {
	// avoid "-0.000" for values that only round to zero
	let value = if value.abs() < 0.5 * 10f64.powi(-(decimals as i32)) {
		0.0
	} else {
		value
	};
	format!("{value:.decimals$}")
}

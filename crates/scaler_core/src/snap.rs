//! Grid snapping and the decimal precision derived from the grid step.

/// Step used when the host reports a grid step of zero or less
pub const DEFAULT_ZERO_STEP: f32 = 0.001;

/// Upper bound on display precision; f32 carries no meaningful digits past it
pub const MAX_DECIMAL_PLACES: usize = 6;

/// Resolve the host's grid step into a usable, strictly positive step.
pub fn effective_step(step: f32, zero_step: f32) -> f32 {
    if step.is_finite() && step > 0.0 {
        step
    } else if zero_step.is_finite() && zero_step > 0.0 {
        zero_step
    } else {
        DEFAULT_ZERO_STEP
    }
}

/// Round a raw axis length to the nearest multiple of `step`, never below one
/// step. Boxes cannot collapse or turn inside out.
pub fn snap_length(distance: f32, step: f32) -> f32 {
    ((distance / step).round() * step).max(step)
}

/// Number of decimal digits in `step`, e.g. 3 for 0.125 and 0 for 2.
pub fn decimal_places(step: f32) -> usize {
    let text = format!("{}", step.abs());
    match text.split_once('.') {
        Some((_, fraction)) => fraction.trim_end_matches('0').len().min(MAX_DECIMAL_PLACES),
        None => 0,
    }
}

/// Round to `places` decimal digits
pub fn round_to_places(value: f32, places: usize) -> f32 {
    let factor = 10f64.powi(places.min(MAX_DECIMAL_PLACES) as i32);
    ((f64::from(value) * factor).round() / factor) as f32
}

/// Display string for a length: rounded to `places` digits with trailing
/// zeros trimmed.
pub fn format_length(value: f32, places: usize) -> String {
    let places = places.min(MAX_DECIMAL_PLACES);
    let mut text = format!("{:.*}", places, round_to_places(value, places));
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

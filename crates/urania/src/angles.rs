//! Circular angle arithmetic on the ecliptic.
//!
//! All longitudes are degrees. Functions here are total: any finite input
//! produces a value in the documented range, and nothing panics.

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let mut normalized = value % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    // -1e-17 % 360 + 360 rounds to 360.0
    if normalized >= 360.0 {
        normalized = 0.0;
    }
    normalized
}

/// Minimal circular separation between two longitudes, in [0, 180].
pub fn angular_difference(lon1: f64, lon2: f64) -> f64 {
    let diff = (normalize_degrees(lon1) - normalize_degrees(lon2)).abs();
    diff.min(360.0 - diff).clamp(0.0, 180.0)
}

/// Signed difference `lon1 - lon2` folded into (-180, 180].
pub fn signed_difference(lon1: f64, lon2: f64) -> f64 {
    let diff = normalize_degrees(lon1 - lon2);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Midpoint of the shorter arc between two longitudes.
///
/// For exactly antipodal inputs the arc is ambiguous; the midpoint taken
/// is the one reached by moving forward from `lon2`.
pub fn midpoint(lon1: f64, lon2: f64) -> f64 {
    normalize_degrees(lon2 + signed_difference(lon1, lon2) / 2.0)
}

/// Format a coordinate as whole degrees and decimal minutes, e.g. `12°30.00'`.
///
/// `html` selects the `&deg;` entity instead of the degree sign.
pub fn coord_in_minutes(value: f64, html: bool) -> String {
    let degree_symbol = if html { "&deg;" } else { "°" };
    let abs_value = value.abs();
    let degrees = abs_value.trunc();
    let minutes = (abs_value - degrees) * 60.0;
    format!("{}{}{:05.2}'", degrees as i64, degree_symbol, minutes)
}

/// Split a longitude into (degrees, minutes, seconds) within its 30° sign.
pub fn degrees_in_sign_dms(longitude: f64) -> (u32, u32, u32) {
    let in_sign = normalize_degrees(longitude) % 30.0;
    let deg = in_sign.trunc();
    let min = ((in_sign - deg) * 60.0).trunc();
    let sec = (((in_sign - deg) * 60.0 - min) * 60.0).trunc();
    (deg as u32, min as u32, sec as u32)
}

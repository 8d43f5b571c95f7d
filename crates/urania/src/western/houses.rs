//! House placement from cusp longitudes.

use crate::angles::normalize_degrees;
use crate::points::{CelestialPoint, PointKind};

/// House (1-12) containing `longitude`, given the twelve cusps in house
/// order. Cusps may wrap through 0° Aries. None if any cusp is not finite.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> Option<u8> {
    if !longitude.is_finite() || cusps.iter().any(|c| !c.is_finite()) {
        return None;
    }
    let lon = normalize_degrees(longitude);
    for i in 0..12 {
        let start = normalize_degrees(cusps[i]);
        let end = normalize_degrees(cusps[(i + 1) % 12]);
        let inside = if start <= end {
            lon >= start && lon < end
        } else {
            lon >= start || lon < end
        };
        if inside {
            return Some(i as u8 + 1);
        }
    }
    None
}

/// Fill in the house of every point that is not a chart angle.
pub fn assign_houses(points: &mut [CelestialPoint], cusps: &[f64; 12]) {
    for point in points.iter_mut().filter(|p| p.kind != PointKind::Angle) {
        point.house = house_of(point.longitude, cusps);
    }
}

//! Sign rulers for Western astrology.
//!
//! Maps zodiac signs to their planetary rulers (traditional and modern).

use crate::western::signs::Sign;

const TRADITIONAL_RULERS: [&str; 12] = [
    "Mars",    // Aries
    "Venus",   // Taurus
    "Mercury", // Gemini
    "Moon",    // Cancer
    "Sun",     // Leo
    "Mercury", // Virgo
    "Venus",   // Libra
    "Mars",    // Scorpio
    "Jupiter", // Sagittarius
    "Saturn",  // Capricorn
    "Saturn",  // Aquarius
    "Jupiter", // Pisces
];

const MODERN_RULERS: [&str; 12] = [
    "Mars",
    "Venus",
    "Mercury",
    "Moon",
    "Sun",
    "Mercury",
    "Venus",
    "Pluto", // Scorpio
    "Jupiter",
    "Saturn",
    "Uranus",  // Aquarius
    "Neptune", // Pisces
];

/// Ruler of a sign; `modern` includes the outer planets
pub fn sign_ruler(sign: Sign, modern: bool) -> &'static str {
    if modern {
        MODERN_RULERS[sign.index()]
    } else {
        TRADITIONAL_RULERS[sign.index()]
    }
}

/// Ruler of the sign containing `longitude`
pub fn sign_ruler_from_longitude(longitude: f64, modern: bool) -> &'static str {
    sign_ruler(Sign::from_longitude(longitude), modern)
}

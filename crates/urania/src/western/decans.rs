//! Western astrology decans.
//!
//! Each sign is divided into 3 decans of 10 degrees, each with its own ruler.

use crate::western::rulers::sign_ruler;
use crate::western::signs::{degree_in_sign, Element, Sign};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

lazy_static::lazy_static! {
    static ref CLASSICAL_DECAN_RULERS: HashMap<Sign, [&'static str; 3]> = HashMap::from([
        (Sign::Aries, ["Mars", "Sun", "Jupiter"]),
        (Sign::Taurus, ["Venus", "Mercury", "Saturn"]),
        (Sign::Gemini, ["Mercury", "Venus", "Saturn"]),
        (Sign::Cancer, ["Moon", "Mars", "Jupiter"]),
        (Sign::Leo, ["Sun", "Jupiter", "Mars"]),
        (Sign::Virgo, ["Mercury", "Saturn", "Venus"]),
        (Sign::Libra, ["Venus", "Saturn", "Mercury"]),
        (Sign::Scorpio, ["Mars", "Jupiter", "Moon"]),
        (Sign::Sagittarius, ["Jupiter", "Mars", "Sun"]),
        (Sign::Capricorn, ["Saturn", "Venus", "Mercury"]),
        (Sign::Aquarius, ["Saturn", "Mercury", "Venus"]),
        (Sign::Pisces, ["Jupiter", "Moon", "Mars"]),
    ]);

    // Outer planets take over the decans of the signs they rule
    static ref MODERN_DECAN_RULERS: HashMap<Sign, [&'static str; 3]> = HashMap::from([
        (Sign::Aries, ["Mars", "Sun", "Jupiter"]),
        (Sign::Taurus, ["Venus", "Mercury", "Saturn"]),
        (Sign::Gemini, ["Mercury", "Venus", "Uranus"]),
        (Sign::Cancer, ["Moon", "Mars", "Jupiter"]),
        (Sign::Leo, ["Sun", "Jupiter", "Mars"]),
        (Sign::Virgo, ["Mercury", "Saturn", "Venus"]),
        (Sign::Libra, ["Venus", "Uranus", "Mercury"]),
        (Sign::Scorpio, ["Mars", "Neptune", "Moon"]),
        (Sign::Sagittarius, ["Jupiter", "Mars", "Sun"]),
        (Sign::Capricorn, ["Saturn", "Venus", "Mercury"]),
        (Sign::Aquarius, ["Uranus", "Mercury", "Venus"]),
        (Sign::Pisces, ["Neptune", "Moon", "Mars"]),
    ]);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecanInfo {
    pub sign: Sign,
    pub element: Element,
    pub sign_ruler: String,
    /// 1, 2 or 3
    pub decan_index: u8,
    /// 0 <= x < 30
    pub degree_in_sign: f64,
    pub decan_ruler: String,
}

/// Decan (1, 2 or 3) of a degree within a sign. Out-of-range input is
/// folded into [0, 30) first.
pub fn decan_index(degree_in_sign: f64) -> u8 {
    let degree = degree_in_sign.rem_euclid(30.0);
    if degree < 10.0 {
        1
    } else if degree < 20.0 {
        2
    } else {
        3
    }
}

pub fn decan_ruler(longitude: f64, modern: bool) -> &'static str {
    let sign = Sign::from_longitude(longitude);
    let table = if modern {
        &*MODERN_DECAN_RULERS
    } else {
        &*CLASSICAL_DECAN_RULERS
    };
    let index = decan_index(degree_in_sign(longitude)) as usize - 1;
    table
        .get(&sign)
        .map(|rulers| rulers[index])
        .unwrap_or_else(|| sign_ruler(sign, modern))
}

pub fn decan_info(longitude: f64, modern: bool) -> DecanInfo {
    let sign = Sign::from_longitude(longitude);
    let degree = degree_in_sign(longitude);
    DecanInfo {
        sign,
        element: sign.element(),
        sign_ruler: sign_ruler(sign, modern).to_string(),
        decan_index: decan_index(degree),
        degree_in_sign: degree,
        decan_ruler: decan_ruler(longitude, modern).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decan_index() {
        assert_eq!(decan_index(0.0), 1);
        assert_eq!(decan_index(9.999), 1);
        assert_eq!(decan_index(10.0), 2);
        assert_eq!(decan_index(19.999), 2);
        assert_eq!(decan_index(20.0), 3);
        assert_eq!(decan_index(29.999), 3);
        assert_eq!(decan_index(35.0), 1);
    }

    #[test]
    fn test_decan_rulers() {
        // 5° Aries
        assert_eq!(decan_ruler(5.0, false), "Mars");
        // 25° Gemini
        assert_eq!(decan_ruler(85.0, false), "Saturn");
        assert_eq!(decan_ruler(85.0, true), "Uranus");
        // 15° Scorpio
        assert_eq!(decan_ruler(225.0, true), "Neptune");
        assert_eq!(decan_ruler(225.0, false), "Jupiter");
    }

    #[test]
    fn test_decan_info() {
        let info = decan_info(135.0, false);
        assert_eq!(info.sign, Sign::Leo);
        assert_eq!(info.element, Element::Fire);
        assert_eq!(info.sign_ruler, "Sun");
        assert_eq!(info.decan_index, 2);
        assert_eq!(info.decan_ruler, "Jupiter");
    }
}

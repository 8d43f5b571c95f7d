//! Zodiac signs, elements and modalities.

use crate::angles::{degrees_in_sign_dms, normalize_degrees};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sign from index 0-11 (wraps)
    pub fn from_index(index: usize) -> Sign {
        Self::ALL[index % 12]
    }

    /// Sign containing an ecliptic longitude
    pub fn from_longitude(longitude: f64) -> Sign {
        Self::from_index((normalize_degrees(longitude) / 30.0) as usize)
    }

    pub fn from_name(name: &str) -> Option<Sign> {
        Self::ALL.iter().copied().find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    pub fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Cardinal,
            1 => Modality::Fixed,
            _ => Modality::Mutable,
        }
    }

    /// Longitude at which the sign begins
    pub fn start(self) -> f64 {
        self.index() as f64 * 30.0
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees within the sign, [0, 30)
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize_degrees(longitude) % 30.0
}

/// Format a longitude as `15°30'45" Aries`.
///
/// `html` selects the `&deg;` entity instead of the degree sign.
pub fn longitude_to_zodiac(longitude: f64, html: bool) -> String {
    let degree_symbol = if html { "&deg;" } else { "°" };
    let (deg, min, sec) = degrees_in_sign_dms(longitude);
    format!(
        "{}{}{:02}'{:02}\" {}",
        deg,
        degree_symbol,
        min,
        sec,
        Sign::from_longitude(longitude)
    )
}

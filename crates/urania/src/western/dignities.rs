//! Essential dignity of planets by sign.
//!
//! Rulership, exaltation, detriment and fall. A planet carries at most
//! one status, checked in that order.

use crate::points::{CelestialPoint, PointKind};
use crate::western::signs::Sign;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DignityType {
    Rulership,
    Exaltation,
    Detriment,
    Fall,
    Neutral,
}

impl DignityType {
    pub fn score(self) -> i32 {
        match self {
            DignityType::Rulership => 5,
            DignityType::Exaltation => 4,
            DignityType::Detriment => -4,
            DignityType::Fall => -5,
            DignityType::Neutral => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DignityResult {
    pub planet: String,
    pub sign: Sign,
    #[serde(rename = "type")]
    pub dignity_type: DignityType,
    pub score: i32,
}

struct DignityRow {
    rulership: &'static [Sign],
    /// Rulerships only recognised in the modern scheme
    modern_rulership: &'static [Sign],
    exaltation: Sign,
    detriment: &'static [Sign],
    fall: Sign,
}

lazy_static::lazy_static! {
    static ref DIGNITIES: HashMap<&'static str, DignityRow> = {
        use Sign::*;
        HashMap::from([
            ("sun", DignityRow { rulership: &[Leo], modern_rulership: &[], exaltation: Aries, detriment: &[Aquarius], fall: Libra }),
            ("moon", DignityRow { rulership: &[Cancer], modern_rulership: &[], exaltation: Taurus, detriment: &[Capricorn], fall: Scorpio }),
            ("mercury", DignityRow { rulership: &[Gemini, Virgo], modern_rulership: &[], exaltation: Virgo, detriment: &[Sagittarius, Pisces], fall: Pisces }),
            ("venus", DignityRow { rulership: &[Taurus, Libra], modern_rulership: &[], exaltation: Pisces, detriment: &[Aries, Scorpio], fall: Virgo }),
            ("mars", DignityRow { rulership: &[Aries, Scorpio], modern_rulership: &[], exaltation: Capricorn, detriment: &[Taurus, Libra], fall: Cancer }),
            ("jupiter", DignityRow { rulership: &[Sagittarius, Pisces], modern_rulership: &[], exaltation: Cancer, detriment: &[Gemini, Virgo], fall: Capricorn }),
            ("saturn", DignityRow { rulership: &[Capricorn, Aquarius], modern_rulership: &[], exaltation: Libra, detriment: &[Cancer, Leo], fall: Aries }),
            ("uranus", DignityRow { rulership: &[], modern_rulership: &[Aquarius], exaltation: Scorpio, detriment: &[Leo], fall: Taurus }),
            ("neptune", DignityRow { rulership: &[], modern_rulership: &[Pisces], exaltation: Leo, detriment: &[Virgo], fall: Aquarius }),
            ("pluto", DignityRow { rulership: &[], modern_rulership: &[Scorpio], exaltation: Aquarius, detriment: &[Taurus], fall: Leo }),
        ])
    };
}

/// Dignity of `planet` in `sign`. Bodies without a dignity table are neutral.
pub fn assess_dignity(planet: &str, sign: Sign, classical: bool) -> DignityResult {
    let dignity_type = match DIGNITIES.get(planet.to_lowercase().as_str()) {
        Some(row) => {
            if row.rulership.contains(&sign) || (!classical && row.modern_rulership.contains(&sign)) {
                DignityType::Rulership
            } else if row.exaltation == sign {
                DignityType::Exaltation
            } else if row.detriment.contains(&sign) {
                DignityType::Detriment
            } else if row.fall == sign {
                DignityType::Fall
            } else {
                DignityType::Neutral
            }
        }
        None => DignityType::Neutral,
    };

    DignityResult {
        planet: planet.to_string(),
        sign,
        dignity_type,
        score: dignity_type.score(),
    }
}

/// Dignity of every planet among `points`, in input order.
pub fn planet_dignities(points: &[CelestialPoint], classical: bool) -> Vec<DignityResult> {
    points
        .iter()
        .filter(|p| p.kind == PointKind::Planet)
        .map(|p| assess_dignity(&p.id, Sign::from_longitude(p.longitude), classical))
        .collect()
}

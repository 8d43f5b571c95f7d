use crate::angles::normalize_degrees;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhaseName {
    pub fn name(self) -> &'static str {
        match self {
            MoonPhaseName::NewMoon => "New Moon",
            MoonPhaseName::WaxingCrescent => "Waxing Crescent",
            MoonPhaseName::FirstQuarter => "First Quarter",
            MoonPhaseName::WaxingGibbous => "Waxing Gibbous",
            MoonPhaseName::FullMoon => "Full Moon",
            MoonPhaseName::WaningGibbous => "Waning Gibbous",
            MoonPhaseName::LastQuarter => "Last Quarter",
            MoonPhaseName::WaningCrescent => "Waning Crescent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPhase {
    pub phase: MoonPhaseName,
    /// Moon minus Sun, [0, 360)
    pub elongation: f64,
    /// Illuminated fraction of the disc, [0, 1]
    pub illumination: f64,
}

/// Phase of the Moon from the two luminaries' longitudes.
///
/// Each named phase spans 45° of elongation centred on its exact angle.
pub fn moon_phase(sun: f64, moon: f64) -> MoonPhase {
    let elongation = normalize_degrees(moon - sun);
    let illumination = (1.0 - elongation.to_radians().cos()) / 2.0;
    let phase = match (((elongation + 22.5) / 45.0) as usize) % 8 {
        0 => MoonPhaseName::NewMoon,
        1 => MoonPhaseName::WaxingCrescent,
        2 => MoonPhaseName::FirstQuarter,
        3 => MoonPhaseName::WaxingGibbous,
        4 => MoonPhaseName::FullMoon,
        5 => MoonPhaseName::WaningGibbous,
        6 => MoonPhaseName::LastQuarter,
        _ => MoonPhaseName::WaningCrescent,
    };
    MoonPhase {
        phase,
        elongation,
        illumination: illumination.clamp(0.0, 1.0),
    }
}

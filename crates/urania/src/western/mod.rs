pub mod decans;
pub mod degrees;
pub mod dignities;
pub mod hours;
pub mod houses;
pub mod lunar;
pub mod parts;
pub mod rulers;
pub mod signs;
pub mod types;

pub use decans::{decan_index, decan_info, decan_ruler, DecanInfo};
pub use degrees::{analyze_degree, elevation, elevations, DegreeAnalysis, DegreeQuality, Elevation};
pub use dignities::{assess_dignity, planet_dignities, DignityResult, DignityType};
pub use hours::{day_ruler, planetary_hour, PlanetaryHour, CHALDEAN_ORDER};
pub use houses::{assign_houses, house_of};
pub use lunar::{moon_phase, MoonPhase, MoonPhaseName};
pub use parts::{arabic_parts, is_day_chart, part_longitude, ArabicPart};
pub use rulers::{sign_ruler, sign_ruler_from_longitude};
pub use signs::{degree_in_sign, longitude_to_zodiac, Element, Modality, Sign};
pub use types::{western_profile, PointProfile, WesternProfile};

//! Pythagorean numerology.
//!
//! Numbers reduce by digit sum until a single digit remains, except the
//! master numbers 11, 22 and 33 which are kept.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

const VOWELS: &str = "AEIOU";

lazy_static::lazy_static! {
    static ref COMPATIBILITY: HashMap<(u32, u32), u32> = HashMap::from([
        ((1, 1), 70), ((1, 2), 60), ((1, 3), 85), ((1, 4), 50), ((1, 5), 90), ((1, 6), 65),
        ((1, 7), 40), ((1, 8), 80), ((1, 9), 75), ((1, 11), 85), ((1, 22), 70), ((1, 33), 60),
        ((2, 2), 85), ((2, 3), 70), ((2, 4), 90), ((2, 5), 45), ((2, 6), 95), ((2, 7), 75),
        ((2, 8), 80), ((2, 9), 85), ((2, 11), 90), ((2, 22), 80), ((2, 33), 85),
        ((3, 3), 80), ((3, 4), 40), ((3, 5), 95), ((3, 6), 75), ((3, 7), 60), ((3, 8), 65),
        ((3, 9), 90), ((3, 11), 85), ((3, 22), 70), ((3, 33), 90),
    ]);
}

const DEFAULT_COMPATIBILITY: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumerologyNumber {
    pub number: u32,
    /// Sum before reduction
    pub total: u32,
    pub is_master_number: bool,
}

impl NumerologyNumber {
    fn from_total(total: u32) -> Self {
        let number = reduce_number(total);
        Self {
            number,
            total,
            is_master_number: MASTER_NUMBERS.contains(&number),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumerologyProfile {
    pub life_path: NumerologyNumber,
    pub destiny: NumerologyNumber,
    pub personality: NumerologyNumber,
    pub soul_urge: NumerologyNumber,
    pub birthday: NumerologyNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityLevel {
    Excellent,
    Good,
    Fair,
    Challenging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
    pub score: u32,
    pub level: CompatibilityLevel,
}

pub fn reduce_number(mut number: u32) -> u32 {
    while number > 9 && !MASTER_NUMBERS.contains(&number) {
        number = digit_sum(number);
    }
    number
}

fn digit_sum(mut number: u32) -> u32 {
    let mut sum = 0;
    while number > 0 {
        sum += number % 10;
        number /= 10;
    }
    sum
}

/// Pythagorean value of a letter (A=1 .. I=9, J=1 ..); 0 for non-letters
pub fn letter_value(c: char) -> u32 {
    let upper = c.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        (upper as u32 - 'A' as u32) % 9 + 1
    } else {
        0
    }
}

fn letter_total(name: &str, keep: impl Fn(char) -> bool) -> u32 {
    name.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .filter(|c| keep(c.to_ascii_uppercase()))
        .map(letter_value)
        .sum()
}

/// Day + month + year, reduced
pub fn life_path_number(birthdate: NaiveDate) -> NumerologyNumber {
    let total = birthdate.day() + birthdate.month() + birthdate.year().unsigned_abs();
    NumerologyNumber::from_total(total)
}

/// All letters of the full name
pub fn destiny_number(full_name: &str) -> NumerologyNumber {
    NumerologyNumber::from_total(letter_total(full_name, |_| true))
}

/// Consonants only
pub fn personality_number(full_name: &str) -> NumerologyNumber {
    NumerologyNumber::from_total(letter_total(full_name, |c| !VOWELS.contains(c)))
}

/// Vowels only
pub fn soul_urge_number(full_name: &str) -> NumerologyNumber {
    NumerologyNumber::from_total(letter_total(full_name, |c| VOWELS.contains(c)))
}

/// The day of birth; 1-9, 11, 22 and 29 are kept as they are.
pub fn birthday_number(birthdate: NaiveDate) -> NumerologyNumber {
    let day = birthdate.day();
    let number = if day <= 9 || matches!(day, 11 | 22 | 29) {
        day
    } else {
        reduce_number(day)
    };
    NumerologyNumber {
        number,
        total: day,
        is_master_number: matches!(number, 11 | 22),
    }
}

pub fn numerology_profile(full_name: &str, birthdate: NaiveDate) -> NumerologyProfile {
    NumerologyProfile {
        life_path: life_path_number(birthdate),
        destiny: destiny_number(full_name),
        personality: personality_number(full_name),
        soul_urge: soul_urge_number(full_name),
        birthday: birthday_number(birthdate),
    }
}

/// Compatibility of two life path numbers. Symmetric.
pub fn compatibility(life_path_a: u32, life_path_b: u32) -> Compatibility {
    let score = COMPATIBILITY
        .get(&(life_path_a, life_path_b))
        .or_else(|| COMPATIBILITY.get(&(life_path_b, life_path_a)))
        .copied()
        .unwrap_or(DEFAULT_COMPATIBILITY);
    let level = if score >= 80 {
        CompatibilityLevel::Excellent
    } else if score >= 60 {
        CompatibilityLevel::Good
    } else if score >= 40 {
        CompatibilityLevel::Fair
    } else {
        CompatibilityLevel::Challenging
    };
    Compatibility { score, level }
}

use crate::types::axis::{Axis, Letter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type Score = i64;

/// One accumulator per letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisScore {
    #[serde(rename = "E")]
    pub e: Score,
    #[serde(rename = "I")]
    pub i: Score,
    #[serde(rename = "S")]
    pub s: Score,
    #[serde(rename = "N")]
    pub n: Score,
    #[serde(rename = "T")]
    pub t: Score,
    #[serde(rename = "F")]
    pub f: Score,
    #[serde(rename = "J")]
    pub j: Score,
    #[serde(rename = "P")]
    pub p: Score,
}

impl AxisScore {
    pub fn get(&self, letter: Letter) -> Score {
        match letter {
            Letter::E => self.e,
            Letter::I => self.i,
            Letter::S => self.s,
            Letter::N => self.n,
            Letter::T => self.t,
            Letter::F => self.f,
            Letter::J => self.j,
            Letter::P => self.p,
        }
    }

    fn slot(&mut self, letter: Letter) -> &mut Score {
        match letter {
            Letter::E => &mut self.e,
            Letter::I => &mut self.i,
            Letter::S => &mut self.s,
            Letter::N => &mut self.n,
            Letter::T => &mut self.t,
            Letter::F => &mut self.f,
            Letter::J => &mut self.j,
            Letter::P => &mut self.p,
        }
    }

    /// Adds to one letter, saturating at the `Score` bounds.
    pub fn add(&mut self, letter: Letter, amount: Score) {
        let slot = self.slot(letter);
        *slot = slot.saturating_add(amount);
    }

    /// Lead of the axis's first pole over its second; negative when the second leads.
    /// Saturates, so only the sign is exact at the extremes.
    pub fn margin(&self, axis: Axis) -> Score {
        self.get(axis.first()).saturating_sub(self.get(axis.second()))
    }

    pub fn is_zero(&self) -> bool {
        Letter::ALL.iter().all(|letter| self.get(*letter) == 0)
    }
}

/// Which pole wins when an axis is tied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// E, S, T or J wins a tie (`first >= second`).
    #[default]
    First,
    /// I, N, F or P wins a tie (`first > second`).
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeCode([Letter; 4]);

impl TypeCode {
    /// Builds a code from one letter per axis, in axis order.
    pub fn from_letters(letters: [Letter; 4]) -> Option<Self> {
        let ordered = Axis::ALL
            .iter()
            .zip(letters.iter())
            .all(|(axis, letter)| axis.contains(*letter));
        ordered.then_some(Self(letters))
    }

    /// Builds a code by asking, per axis, whether the first pole wins.
    pub fn from_axis_winners(mut first_wins: impl FnMut(Axis) -> bool) -> Self {
        Self(Axis::ALL.map(|axis| {
            if first_wins(axis) {
                axis.first()
            } else {
                axis.second()
            }
        }))
    }

    pub fn letters(&self) -> [Letter; 4] {
        self.0
    }

    pub fn letter_for(&self, axis: Axis) -> Letter {
        self.0[axis.position()]
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.0 {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl FromStr for TypeCode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let chars = value.trim().chars().collect::<Vec<_>>();
        if chars.len() != 4 {
            return Err(format!("type code must have 4 letters: {value}"));
        }
        let mut letters = [Letter::E; 4];
        for (slot, ch) in letters.iter_mut().zip(chars) {
            *slot = Letter::from_char(ch)
                .ok_or_else(|| format!("invalid letter '{ch}' in {value}"))?;
        }
        Self::from_letters(letters).ok_or_else(|| format!("letters out of axis order: {value}"))
    }
}

impl Serialize for TypeCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisShare {
    pub axis: Axis,
    pub first: f64,
    pub second: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisPercentages {
    pub axes: [AxisShare; 4],
}

impl AxisPercentages {
    pub fn share(&self, letter: Letter) -> f64 {
        let share = &self.axes[letter.axis().position()];
        if letter == share.axis.first() {
            share.first
        } else {
            share.second
        }
    }
}

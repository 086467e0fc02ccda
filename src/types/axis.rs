use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One pole of a personality axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl Letter {
    pub const ALL: [Letter; 8] = [
        Letter::E,
        Letter::I,
        Letter::S,
        Letter::N,
        Letter::T,
        Letter::F,
        Letter::J,
        Letter::P,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Letter::E | Letter::I => Axis::EI,
            Letter::S | Letter::N => Axis::SN,
            Letter::T | Letter::F => Axis::TF,
            Letter::J | Letter::P => Axis::JP,
        }
    }

    pub fn opposite(self) -> Letter {
        let axis = self.axis();
        if self == axis.first() {
            axis.second()
        } else {
            axis.first()
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::E => 'E',
            Letter::I => 'I',
            Letter::S => 'S',
            Letter::N => 'N',
            Letter::T => 'T',
            Letter::F => 'F',
            Letter::J => 'J',
            Letter::P => 'P',
        }
    }

    pub fn from_char(value: char) -> Option<Letter> {
        match value.to_ascii_uppercase() {
            'E' => Some(Letter::E),
            'I' => Some(Letter::I),
            'S' => Some(Letter::S),
            'N' => Some(Letter::N),
            'T' => Some(Letter::T),
            'F' => Some(Letter::F),
            'J' => Some(Letter::J),
            'P' => Some(Letter::P),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Letter::E => "Extraversion (E)",
            Letter::I => "Introversion (I)",
            Letter::S => "Sensing (S)",
            Letter::N => "Intuition (N)",
            Letter::T => "Thinking (T)",
            Letter::F => "Feeling (F)",
            Letter::J => "Judging (J)",
            Letter::P => "Perceiving (P)",
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A bipolar personality dimension. Declaration order is type-code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    EI,
    SN,
    TF,
    JP,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::EI, Axis::SN, Axis::TF, Axis::JP];

    pub fn first(self) -> Letter {
        match self {
            Axis::EI => Letter::E,
            Axis::SN => Letter::S,
            Axis::TF => Letter::T,
            Axis::JP => Letter::J,
        }
    }

    pub fn second(self) -> Letter {
        match self {
            Axis::EI => Letter::I,
            Axis::SN => Letter::N,
            Axis::TF => Letter::F,
            Axis::JP => Letter::P,
        }
    }

    pub fn contains(self, letter: Letter) -> bool {
        letter.axis() == self
    }

    pub fn labels(self) -> (&'static str, &'static str) {
        (self.first().label(), self.second().label())
    }

    pub fn position(self) -> usize {
        match self {
            Axis::EI => 0,
            Axis::SN => 1,
            Axis::TF => 2,
            Axis::JP => 3,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first(), self.second())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "EI" | "IE" => Ok(Axis::EI),
            "SN" | "NS" => Ok(Axis::SN),
            "TF" | "FT" => Ok(Axis::TF),
            "JP" | "PJ" => Ok(Axis::JP),
            other => Err(format!("unknown axis: {other}")),
        }
    }
}

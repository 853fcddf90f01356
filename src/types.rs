use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

use crate::error::LabError;

/// A single binary digit carried on an input line or held by a flip-flop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Bit {
    #[default]
    Zero,
    One,
}

impl Bit {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Bit::One)
    }

    pub fn value(&self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    pub fn toggled(&self) -> Self {
        !*self
    }
}

impl Not for Bit {
    type Output = Bit;

    fn not(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        Bit::from_bool(value)
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.value()
    }
}

impl TryFrom<u8> for Bit {
    type Error = LabError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(LabError::InvalidBit(other)),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Concatenates bits into the key used to address truth-table rows, e.g. `"01"`.
pub fn input_key(bits: &[Bit]) -> String {
    bits.iter().map(Bit::to_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_conversions() {
        assert_eq!(Bit::from_bool(true), Bit::One);
        assert_eq!(Bit::from(false), Bit::Zero);
        assert_eq!(u8::from(Bit::One), 1);
        assert_eq!(Bit::try_from(0).unwrap(), Bit::Zero);
        assert!(matches!(Bit::try_from(2), Err(LabError::InvalidBit(2))));
    }

    #[test]
    fn test_bit_negation() {
        assert_eq!(!Bit::Zero, Bit::One);
        assert_eq!(Bit::One.toggled(), Bit::Zero);
        assert!(!Bit::Zero.is_set());
    }

    #[test]
    fn test_input_key() {
        assert_eq!(input_key(&[Bit::Zero, Bit::One]), "01");
        assert_eq!(input_key(&[Bit::One]), "1");
        assert_eq!(input_key(&[]), "");
    }

    #[test]
    fn test_bit_serializes_as_number() {
        let json = serde_json::to_string(&[Bit::One, Bit::Zero]).unwrap();
        assert_eq!(json, "[1,0]");
        let bits: Vec<Bit> = serde_json::from_str("[0,1]").unwrap();
        assert_eq!(bits, vec![Bit::Zero, Bit::One]);
        assert!(serde_json::from_str::<Bit>("3").is_err());
    }
}

//! Binary slot values and measured bit sequences.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The value of a single slot. A slot can only ever hold one of these two
/// values, so a torn or out-of-range slot value is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Bit {
    #[default]
    Zero = 0,
    One = 1,
}

impl Bit {
    /// `1 - self`.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    pub fn is_one(self) -> bool {
        self == Bit::One
    }

    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit as u8
    }
}

impl TryFrom<u8> for Bit {
    type Error = BitParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(BitParseError::InvalidValue(other)),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Errors from converting raw values or text into bits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitParseError {
    #[error("Invalid bit value {0}, expected 0 or 1")]
    InvalidValue(u8),

    #[error("Invalid bit character '{ch}' at position {position}")]
    InvalidChar { ch: char, position: usize },
}

/// An ordered, owned sequence of bits, index 0 first.
///
/// Measurements are returned as `BitSequence` values: they are copies of the
/// network state at one instant and never alias the live state vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitSequence(Vec<Bit>);

impl BitSequence {
    /// A sequence of `len` zero bits.
    pub fn zeros(len: usize) -> Self {
        Self(vec![Bit::Zero; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Bit> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Bit] {
        &self.0
    }

    pub fn is_all_zero(&self) -> bool {
        self.0.iter().all(|b| *b == Bit::Zero)
    }

    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|b| b.is_one()).count()
    }
}

impl From<Vec<Bit>> for BitSequence {
    fn from(bits: Vec<Bit>) -> Self {
        Self(bits)
    }
}

impl From<&[Bit]> for BitSequence {
    fn from(bits: &[Bit]) -> Self {
        Self(bits.to_vec())
    }
}

impl FromIterator<Bit> for BitSequence {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TryFrom<&[u8]> for BitSequence {
    type Error = BitParseError;

    fn try_from(values: &[u8]) -> Result<Self, Self::Error> {
        values.iter().map(|v| Bit::try_from(*v)).collect()
    }
}

impl FromStr for BitSequence {
    type Err = BitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, ch)| match ch {
                '0' => Ok(Bit::Zero),
                '1' => Ok(Bit::One),
                ch => Err(BitParseError::InvalidChar { ch, position }),
            })
            .collect()
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip() {
        assert_eq!(Bit::Zero.flipped(), Bit::One);
        assert_eq!(Bit::One.flipped(), Bit::Zero);
    }

    #[test]
    fn test_u8_conversion_rejects_non_binary() {
        assert_eq!(Bit::try_from(1u8), Ok(Bit::One));
        assert_eq!(Bit::try_from(2u8), Err(BitParseError::InvalidValue(2)));
        assert_eq!(u8::from(Bit::One), 1);
    }

    #[test]
    fn test_parse_and_display() {
        let seq: BitSequence = "1010".parse().unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.get(0), Some(Bit::One));
        assert_eq!(seq.get(1), Some(Bit::Zero));
        assert_eq!(seq.count_ones(), 2);
        assert_eq!(seq.to_string(), "1010");
    }

    #[test]
    fn test_parse_rejects_other_characters() {
        let err = "10x1".parse::<BitSequence>().unwrap_err();
        assert_eq!(err, BitParseError::InvalidChar { ch: 'x', position: 2 });
    }

    #[test]
    fn test_empty_and_zero_sequences() {
        let empty: BitSequence = "".parse().unwrap();
        assert!(empty.is_empty());
        assert!(empty.is_all_zero());

        let zeros = BitSequence::zeros(3);
        assert_eq!(zeros.to_string(), "000");
        assert!(zeros.is_all_zero());
    }
}

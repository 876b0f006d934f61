use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

use super::constants::{ASCII_LETTER_A, BOARD_HEIGHT, BOARD_WIDTH, NUM_SQUARES};
use super::symmetries::transform_bits;

/// A square of the board.
///
/// Indexed `row * 8 + col` where `a1` is 0, `h1` is 7 and `h8` is 63. The same index is the bit of the square
/// within a bitboard.
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub fn from_index(index: usize) -> Self {
        assert!(
            index < NUM_SQUARES,
            "Square index must be less than {}",
            NUM_SQUARES
        );

        Self(index as u8)
    }

    pub fn try_from_index(index: i64) -> Result<Self> {
        if (0..NUM_SQUARES as i64).contains(&index) {
            Ok(Self(index as u8))
        } else {
            Err(anyhow!("{} is not a valid square index", index))
        }
    }

    pub fn from_col_row(col: usize, row: usize) -> Self {
        Self::from_index(row * BOARD_WIDTH + col)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn bit(&self) -> u64 {
        1 << self.0
    }

    /// Zero based column, `a` being 0.
    pub fn col(&self) -> usize {
        self.index() % BOARD_WIDTH
    }

    /// Zero based row, `1` being 0.
    pub fn row(&self) -> usize {
        self.index() / BOARD_WIDTH
    }

    pub fn transform(&self, symmetry: usize) -> Self {
        let bit = transform_bits(self.bit(), symmetry);
        Self(bit.trailing_zeros() as u8)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().to_ascii_lowercase().into_bytes();

        if bytes.len() != 2 {
            return Err(anyhow!("Square must be a column and a row, e.g. d3. Got {}", s));
        }

        let col = bytes[0].wrapping_sub(ASCII_LETTER_A) as usize;
        let row = bytes[1].wrapping_sub(b'1') as usize;

        if col >= BOARD_WIDTH || row >= BOARD_HEIGHT {
            return Err(anyhow!("{} is not a square on the board", s));
        }

        Ok(Self::from_col_row(col, row))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let col = (self.col() as u8 + ASCII_LETTER_A) as char;
        write!(f, "{}{}", col, self.row() + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct SquareVisitor;

impl<'de> Visitor<'de> for SquareVisitor {
    type Value = Square;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a square from a1 to h8")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(SquareVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a1_is_index_zero() {
        let square: Square = "a1".parse().unwrap();
        assert_eq!(square.index(), 0);
    }

    #[test]
    fn test_h1_is_index_seven() {
        let square: Square = "h1".parse().unwrap();
        assert_eq!(square.index(), 7);
    }

    #[test]
    fn test_h8_is_last_index() {
        let square: Square = "H8".parse().unwrap();
        assert_eq!(square.index(), 63);
    }

    #[test]
    fn test_d3() {
        let square: Square = "d3".parse().unwrap();
        assert_eq!(square.col(), 3);
        assert_eq!(square.row(), 2);
        assert_eq!(square.bit(), 1 << 19);
    }

    #[test]
    fn test_display_all_squares() {
        for index in 0..NUM_SQUARES {
            let square = Square::from_index(index);
            let parsed: Square = square.to_string().parse().unwrap();
            assert_eq!(parsed, square);
        }
    }

    #[test]
    fn test_invalid_squares() {
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!("a10".parse::<Square>().is_err());
    }

    #[test]
    fn test_try_from_index() {
        assert_eq!(Square::try_from_index(63).unwrap().to_string(), "h8");
        assert!(Square::try_from_index(64).is_err());
        assert!(Square::try_from_index(-1).is_err());
    }

    #[test]
    fn test_transform_identity() {
        let square: Square = "c4".parse().unwrap();
        assert_eq!(square.transform(0), square);
    }

    #[test]
    fn test_transform_vertical_flip() {
        let square: Square = "c4".parse().unwrap();
        assert_eq!(square.transform(1).to_string(), "c5");
    }

    #[test]
    fn test_serde() {
        let square: Square = "f5".parse().unwrap();
        let json = serde_json::to_string(&square).unwrap();
        assert_eq!(json, "\"f5\"");
        assert_eq!(serde_json::from_str::<Square>(&json).unwrap(), square);
    }
}

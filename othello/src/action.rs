use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use super::Square;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Action {
    Play(Square),
    Pass,
}

impl Action {
    pub fn square(&self) -> Option<Square> {
        match self {
            Action::Play(square) => Some(*square),
            Action::Pass => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Action::Pass)
    }
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("pass") || s.eq_ignore_ascii_case("ps") || s == "--" {
            return Ok(Action::Pass);
        }

        Ok(Action::Play(s.parse()?))
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Action::Play(square) => write!(f, "{}", square),
            Action::Pass => write!(f, "pass"),
        }
    }
}

impl Serialize for Action {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct ActionVisitor;

impl<'de> Visitor<'de> for ActionVisitor {
    type Value = Action;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a square such as f5, or pass")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ActionVisitor)
    }
}

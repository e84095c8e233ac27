//! Data types for the OPAP draws API
//!
//! Game identifiers are closed enums whose canonical string form is used
//! verbatim as a URL path segment. Draw records mirror the JSON returned by
//! the service; every field defaults so an empty object decodes to a zero
//! record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OpapError;

/// Numeric-result games served by the draws endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    /// KINO
    Kino,
    /// LOTTO
    Lotto,
    /// Joker, whose last result is the joker number
    Joker,
    /// PROTO
    Proto,
    /// Super 3
    Super3,
    /// Extra 5
    Extra5,
    /// Propogoal
    Propogoal,
    /// Penalties
    Penalties,
    /// Bowling
    Bowling,
    /// Powerspin
    Powerspin,
}

impl Game {
    /// Every game, in declaration order
    pub const ALL: [Game; 10] = [
        Game::Kino,
        Game::Lotto,
        Game::Joker,
        Game::Proto,
        Game::Super3,
        Game::Extra5,
        Game::Propogoal,
        Game::Penalties,
        Game::Bowling,
        Game::Powerspin,
    ];

    /// Path segment identifying the game on the wire.
    ///
    /// The Powerspin segment is spelled with a Greek small omicron (U+03BF)
    /// in place of the Latin `o`, matching what the service publishes.
    pub fn as_str(self) -> &'static str {
        match self {
            Game::Kino => "kino",
            Game::Lotto => "lotto",
            Game::Joker => "joker",
            Game::Proto => "proto",
            Game::Super3 => "super3",
            Game::Extra5 => "extra5",
            Game::Propogoal => "propogoal",
            Game::Penalties => "penalties",
            Game::Bowling => "bowling",
            Game::Powerspin => "p\u{3bf}werspin",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Game {
    type Err = OpapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| unknown_game(s))
    }
}

/// Propo games, whose results are match outcomes rather than numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropoGame {
    /// Sunday Propo
    Sun,
    /// Saturday Propo
    Sat,
    /// Wednesday Propo
    Wed,
}

impl PropoGame {
    /// Every Propo game, in declaration order
    pub const ALL: [PropoGame; 3] = [PropoGame::Sun, PropoGame::Sat, PropoGame::Wed];

    /// Path segment identifying the game on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            PropoGame::Sun => "proposun",
            PropoGame::Sat => "proposat",
            PropoGame::Wed => "propowed",
        }
    }
}

impl fmt::Display for PropoGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropoGame {
    type Err = OpapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropoGame::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| unknown_game(s))
    }
}

fn unknown_game(s: &str) -> OpapError {
    OpapError::UnknownGame(s.to_string())
}

/// Deserialize `null` as the type's default, the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Results of a game's draw
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draw {
    /// Draw time as sent by the service, `DD-MM-YYYYTHH:MM:SS`
    #[serde(deserialize_with = "null_as_default")]
    pub draw_time: String,
    /// Draw sequence number
    #[serde(deserialize_with = "null_as_default")]
    pub draw_no: i64,
    /// Drawn numbers in draw order
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<i64>,
}

impl Draw {
    /// Last result, which for Joker is the joker number
    pub fn joker_number(&self) -> Option<i64> {
        self.results.last().copied()
    }

    /// Every result except the last one
    pub fn main_numbers(&self) -> &[i64] {
        match self.results.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
}

/// Results of a Propo draw: one outcome token (`1`, `X`, `2`) per match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropoDraw {
    /// Draw time as sent by the service, `DD-MM-YYYYTHH:MM:SS`
    #[serde(deserialize_with = "null_as_default")]
    pub draw_time: String,
    /// Draw sequence number
    #[serde(deserialize_with = "null_as_default")]
    pub draw_no: i64,
    /// Match outcomes in coupon order
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<String>,
}

use std::{fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::PieceKind;

/// Capability that supplies the next piece kind.
///
/// The reducer draws from one of these instead of reaching for ambient
/// randomness, so a scripted source can make a whole game deterministic.
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

/// Seed for the random piece source.
///
/// A 128-bit value serialized as a 32-character hex string. The same seed
/// produces the same piece sequence, enabling reproducible games and
/// deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

/// A seed string that is not exactly 32 hex characters.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {input:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    pub input: String,
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError {
                input: s.to_owned(),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Uniform sampler over the 7 piece kinds, backed by a seedable PCG.
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    rng: Pcg32,
}

impl RandomPieceSource {
    /// Creates a source seeded from the OS random source.
    ///
    /// For a reproducible sequence use [`Self::with_seed`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but deterministic: the same seed produces the
    /// same piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }
}

impl Default for RandomPieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceSource for RandomPieceSource {
    fn next_piece(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Replays a fixed sequence of kinds, cycling when exhausted.
///
/// Test tooling: lets a reducer test pick exactly which pieces arrive.
#[derive(Debug, Clone)]
pub struct ScriptedPieceSource {
    script: Vec<PieceKind>,
    cursor: usize,
}

impl ScriptedPieceSource {
    /// # Panics
    ///
    /// Panics if `script` is empty.
    #[must_use]
    pub fn new(script: Vec<PieceKind>) -> Self {
        assert!(!script.is_empty(), "piece script must not be empty");
        Self { script, cursor: 0 }
    }
}

impl PieceSource for ScriptedPieceSource {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        kind
    }
}

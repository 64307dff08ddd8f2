//! Record identifiers.
//!
//! Ids have the shape the modeled service hands out: the prefix `rec`
//! followed by 14 alphanumeric characters.

use std::fmt;

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Prefix shared by all record ids.
pub const RECORD_ID_PREFIX: &str = "rec";

/// Number of random characters after the prefix.
const RECORD_ID_RANDOM_LENGTH: usize = 14;

/// An immutable record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing id string.
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<&Self> for RecordId {
    fn from(id: &Self) -> Self {
        id.clone()
    }
}

/// Random record id source.
///
/// Seeded generators produce the same id sequence on every run.
#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    /// Create a generator, seeded when `seed` is given and from OS entropy
    /// otherwise.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Draw a new candidate id. Uniqueness is checked by the caller.
    pub fn next_id(&mut self) -> RecordId {
        let suffix: String = (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(RECORD_ID_RANDOM_LENGTH)
            .map(char::from)
            .collect();
        RecordId(format!("{RECORD_ID_PREFIX}{suffix}"))
    }
}

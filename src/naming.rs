use std::collections::HashSet;

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

use crate::error::{Error, Result};

/// Length of every minted file-name stem.
pub const IDENTIFIER_LENGTH: usize = 15;

/// Collision-retry bound before minting gives up.
pub const MAX_MINT_ATTEMPTS: usize = 100_000;

/// The set of file-name stems already claimed during this run, either
/// discovered in the existing corpus or freshly minted.
///
/// The registry is always passed explicitly into the components that mint or
/// discover names; it lives for one pipeline invocation and is never
/// persisted.
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Records a name as in use. Returns `false` if it was already claimed.
    pub fn claim(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Mints a random alphanumeric stem not present in `registry`.
///
/// The generator only checks for collisions; the caller must claim the
/// returned name before the next mint, otherwise two mints in a row can
/// return the same stem.
pub fn mint(registry: &NameRegistry) -> Result<String> {
    mint_with(registry, IDENTIFIER_LENGTH, MAX_MINT_ATTEMPTS)
}

pub fn mint_with(registry: &NameRegistry, length: usize, max_attempts: usize) -> Result<String> {
    let mut rng = thread_rng();
    for _ in 0..max_attempts {
        let candidate: String = (&mut rng)
            .sample_iter(Alphanumeric)
            .take(length)
            .map(char::from)
            .collect();
        if !registry.contains(&candidate) {
            return Ok(candidate);
        }
    }
    Err(Error::GenerationExhausted {
        attempts: max_attempts,
    })
}

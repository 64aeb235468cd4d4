//! Identifier generation for newly saved cars.
//!
//! Identifiers are fixed-length strings drawn uniformly from `[0-9a-z]`.
//! They are random, not unique: the repository checks for collisions.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Symbols an identifier is drawn from.
pub const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of identifiers assigned by the default repository.
pub const DEFAULT_ID_LENGTH: usize = 9;

/// Generate an identifier of exactly `length` characters using the thread RNG.
pub fn generate_id(length: usize) -> String {
    draw(&mut rand::thread_rng(), length)
}

fn draw<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// A shareable identifier source with its own locked RNG.
///
/// Safe to call from many threads at once, independent of any lock the
/// caller may already hold.
#[derive(Debug)]
pub struct IdGenerator {
    rng: Mutex<StdRng>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Create a generator seeded from the thread RNG.
    pub fn new() -> Self {
        let seed = rand::thread_rng().gen::<[u8; 32]>();
        Self {
            rng: Mutex::new(StdRng::from_seed(seed)),
        }
    }

    /// Create a generator with a fixed seed. Two generators with the same
    /// seed produce the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate an identifier of exactly `length` characters.
    pub fn generate(&self, length: usize) -> String {
        // An RNG has no invariant a panic could break.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw(&mut *rng, length)
    }
}

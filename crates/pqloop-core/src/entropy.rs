//! Pseudo-randomness used by the units, the gates and the search procedures.
//!
//! Everything random in the network goes through [`Entropy`], so tests can
//! swap in a seeded or fully fixed source.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bits::Bit;

/// A source of non-cryptographic randomness shared across tasks.
pub trait Entropy: Send + Sync {
    /// Uniform draw in `[0, 1)`.
    fn uniform(&self) -> f64;

    /// Fair coin.
    fn bit(&self) -> Bit;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&self, len: usize) -> usize;
}

/// `StdRng` behind a mutex.
#[derive(Debug)]
pub struct SeededEntropy {
    rng: Mutex<StdRng>,
}

impl SeededEntropy {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_os() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seeded when `seed` is given, OS entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os, Self::from_seed)
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // Generator state stays valid even if a holder panicked.
        let mut guard = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl Entropy for SeededEntropy {
    fn uniform(&self) -> f64 {
        self.with_rng(|rng| rng.r#gen::<f64>())
    }

    fn bit(&self) -> Bit {
        self.with_rng(|rng| Bit::from(rng.gen_bool(0.5)))
    }

    fn index(&self, len: usize) -> usize {
        self.with_rng(|rng| rng.gen_range(0..len))
    }
}

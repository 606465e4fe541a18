use crate::{Lock, PinCount, PIN_MAX};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Produces random locks and picks their binding pin
pub struct LockFactory {
    rng: StdRng,
}

impl Default for LockFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl LockFactory {
    /// Create a factory seeded from the OS entropy source
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a factory with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a lock with independent, uniformly random pin values
    pub fn generate_lock(&mut self, pin_count: PinCount) -> Lock {
        let pins: Vec<u8> = (0..pin_count.count())
            .map(|_| self.rng.gen_range(0..=PIN_MAX))
            .collect();
        debug!(%pin_count, "generated lock");
        Lock::from_generated(pins, pin_count)
    }

    /// Pick the binding pin position.
    ///
    /// Uniform over the lock's indices and independent of the pin values.
    pub fn select_binding_pin(&mut self, lock: &Lock) -> usize {
        self.rng.gen_range(0..lock.len())
    }
}

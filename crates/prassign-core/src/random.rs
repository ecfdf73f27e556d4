//! Random source used for reviewer selection.

use std::sync::Mutex;

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
pub trait RandomService: Send + Sync {
    /// Shuffle values in place, uniformly.
    fn shuffle(&self, values: &mut [String]);
    /// Uniform index in `0..upper`. `upper` must not be zero.
    fn pick(&self, upper: usize) -> usize;
}

pub struct ChaChaRandomService {
    rng: Mutex<ChaCha8Rng>,
}

impl ChaChaRandomService {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl RandomService for ChaChaRandomService {
    fn shuffle(&self, values: &mut [String]) {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        values.shuffle(&mut *rng);
    }

    fn pick(&self, upper: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..upper)
    }
}

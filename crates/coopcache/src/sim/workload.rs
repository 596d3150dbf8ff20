//! Seeded request generator.
//!
//! Produces an endless stream of `(requester, catalogue index)` pairs. The
//! requester is always uniform over the roster; the catalogue index follows
//! the configured [`Distribution`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::NodeId;
use crate::config::Distribution;

/// Request stream over a fixed roster and catalogue.
#[derive(Clone, Debug)]
pub struct Workload {
    clients: usize,
    catalogue: usize,
    hot: usize,
    distribution: Distribution,
    rng: StdRng,
}

impl Workload {
    /// Creates a generator.
    ///
    /// # Arguments
    ///
    /// * `clients` - Roster size; must be non-zero.
    /// * `catalogue` - Number of distinct blocks; must be non-zero.
    /// * `distribution` - Shape of the block popularity.
    /// * `seed` - Seed for the generator's own RNG.
    pub fn new(clients: usize, catalogue: usize, distribution: Distribution, seed: u64) -> Self {
        let hot = match distribution {
            Distribution::Uniform => catalogue,
            Distribution::HotSet { hot_fraction, .. } => {
                ((catalogue as f64 * hot_fraction).ceil() as usize).clamp(1, catalogue.max(1))
            }
        };
        Self {
            clients,
            catalogue,
            hot,
            distribution,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of catalogue entries in the hot set (the whole catalogue when uniform).
    #[inline]
    pub const fn hot_set_size(&self) -> usize {
        self.hot
    }

    /// Draws the next request.
    pub fn next_request(&mut self) -> (NodeId, usize) {
        let requester = NodeId(self.rng.random_range(0..self.clients));
        let index = match self.distribution {
            Distribution::Uniform => self.rng.random_range(0..self.catalogue),
            Distribution::HotSet {
                hot_probability, ..
            } => {
                if self.hot >= self.catalogue || self.rng.random_bool(hot_probability) {
                    self.rng.random_range(0..self.hot)
                } else {
                    self.rng.random_range(self.hot..self.catalogue)
                }
            }
        };
        (requester, index)
    }
}

impl Iterator for Workload {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_request())
    }
}

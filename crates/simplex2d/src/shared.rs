//! # Shared Generator
//!
//! A [`SeededSimplex2D`] that many threads can query while one of them
//! re-seeds it.
//!
//! Queries take a read lock and run concurrently. [`SharedSimplex2D::reseed`]
//! takes the write lock, so no query ever observes a half-built table.
//! Callers that own their generator outright should use [`SeededSimplex2D`]
//! directly; `&mut self` on `reseed` already gives exclusive access.

use parking_lot::RwLock;

use crate::config::NoiseConfig;
use crate::error::NoiseResult;
use crate::generator::SeededSimplex2D;
use crate::permutation::NoiseSeed;

/// Thread-safe, re-seedable noise generator.
#[derive(Debug, Default)]
pub struct SharedSimplex2D {
    inner: RwLock<SeededSimplex2D>,
}

impl SharedSimplex2D {
    /// Creates a shared generator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::NoiseError::InvalidConfiguration`] if the
    /// configuration fails validation.
    pub fn new(config: NoiseConfig) -> NoiseResult<Self> {
        Ok(Self::from(SeededSimplex2D::new(config)?))
    }

    /// Samples shaped multi-octave noise under a read lock.
    #[must_use]
    pub fn get_noise(&self, x: f64, y: f64) -> f64 {
        self.inner.read().get_noise(x, y)
    }

    /// Samples the single-octave kernel under a read lock.
    #[must_use]
    pub fn generate_noise(&self, x: f64, y: f64) -> f64 {
        self.inner.read().generate_noise(x, y)
    }

    /// Samples a whole grid under one read lock.
    ///
    /// # Errors
    ///
    /// Returns [`crate::NoiseError::BufferSize`] if
    /// `out.len() != width * height`.
    pub fn fill_grid(
        &self,
        origin: (f64, f64),
        step: f64,
        width: usize,
        height: usize,
        out: &mut [f64],
    ) -> NoiseResult<()> {
        self.inner.read().fill_grid(origin, step, width, height, out)
    }

    /// Rebuilds the permutation table under the write lock.
    pub fn reseed(&self, seed: NoiseSeed) {
        // Shuffle outside the lock; only the swap is exclusive
        let mut fresh = self.inner.read().clone();
        fresh.reseed(seed);
        *self.inner.write() = fresh;
    }

    /// The current seed.
    #[must_use]
    pub fn seed(&self) -> NoiseSeed {
        self.inner.read().seed()
    }

    /// Consumes the wrapper and returns the generator.
    #[must_use]
    pub fn into_inner(self) -> SeededSimplex2D {
        self.inner.into_inner()
    }
}

impl From<SeededSimplex2D> for SharedSimplex2D {
    fn from(generator: SeededSimplex2D) -> Self {
        Self {
            inner: RwLock::new(generator),
        }
    }
}

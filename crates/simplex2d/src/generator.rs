//! # Noise Generators
//!
//! The two public generators:
//!
//! - [`Simplex2D`]: unseeded, always hashes through the reference table.
//! - [`SeededSimplex2D`]: owns a table shuffled from a [`NoiseSeed`] and can
//!   be re-seeded.
//!
//! Both expose the same query surface: [`get_noise`](Simplex2D::get_noise)
//! for shaped multi-octave noise in `[base, base + amplitude]` (wider when
//! `persistence == 1`, see [`OctaveShape`](crate::OctaveShape)), and
//! [`generate_noise`](Simplex2D::generate_noise) for the raw single-octave
//! kernel in `[-1, 1]`.
//!
//! ## Example
//!
//! ```rust
//! use simplex2d::{NoiseConfig, NoiseSeed, SeededSimplex2D};
//!
//! let config = NoiseConfig::default()
//!     .with_octaves(4)
//!     .with_frequency(2.0)
//!     .with_seed(NoiseSeed::new(42));
//! let noise = SeededSimplex2D::new(config)?;
//!
//! let value = noise.get_noise(100.5, 200.3);
//! assert!((-0.001..=1.001).contains(&value));
//! # Ok::<(), simplex2d::NoiseError>(())
//! ```

use crate::config::NoiseConfig;
use crate::error::{NoiseError, NoiseResult};
use crate::fractal::OctaveShape;
use crate::permutation::{NoiseSeed, PermutationTable, REFERENCE_TABLE};
use crate::simplex;

/// Unseeded 2D simplex noise generator.
///
/// Every instance hashes through the same fixed permutation, so two
/// generators with the same configuration agree everywhere.
#[derive(Clone, Debug)]
pub struct Simplex2D {
    config: NoiseConfig,
    shape: OctaveShape,
}

impl Simplex2D {
    /// Creates a generator from a configuration.
    ///
    /// `config.seed` is ignored; use [`SeededSimplex2D`] for seeded noise.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfiguration`] if the configuration
    /// fails [`NoiseConfig::validated`].
    pub fn new(config: NoiseConfig) -> NoiseResult<Self> {
        let config = config.validated()?;
        let shape = OctaveShape::new(&config);
        tracing::debug!(
            octaves = config.octaves,
            scale = shape.scale(),
            base = shape.base(),
            "created unseeded simplex generator"
        );
        Ok(Self { config, shape })
    }

    /// Samples the single-octave kernel.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[inline]
    #[must_use]
    pub fn generate_noise(&self, x: f64, y: f64) -> f64 {
        simplex::generate(&REFERENCE_TABLE, x, y)
    }

    /// Samples shaped multi-octave noise.
    ///
    /// # Returns
    ///
    /// A value in the range `[base, base + amplitude]`. With
    /// `persistence == 1` and several octaves the range widens to
    /// `octaves² · amplitude / 2` either side of `base + amplitude / 2`.
    #[inline]
    #[must_use]
    pub fn get_noise(&self, x: f64, y: f64) -> f64 {
        self.shape
            .accumulate(x, y, |x, y| simplex::generate(&REFERENCE_TABLE, x, y))
    }

    /// Samples a row-major grid of [`get_noise`](Self::get_noise) values.
    ///
    /// Cell `(col, row)` is sampled at `origin + (col, row) * step`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::BufferSize`] if `out.len() != width * height`.
    pub fn fill_grid(
        &self,
        origin: (f64, f64),
        step: f64,
        width: usize,
        height: usize,
        out: &mut [f64],
    ) -> NoiseResult<()> {
        fill_grid(origin, step, width, height, out, |x, y| self.get_noise(x, y))
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Multiplier applied to the raw octave sum.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.shape.scale()
    }

    /// Offset added after scaling (`config.base + amplitude / 2`).
    #[must_use]
    pub const fn base(&self) -> f64 {
        self.shape.base()
    }

    /// The shared reference table.
    #[must_use]
    pub fn permutation(&self) -> &'static PermutationTable {
        &REFERENCE_TABLE
    }
}

impl Default for Simplex2D {
    fn default() -> Self {
        let config = NoiseConfig::default();
        let shape = OctaveShape::new(&config);
        Self { config, shape }
    }
}

/// Seeded 2D simplex noise generator.
///
/// The permutation table is shuffled from `config.seed` at construction and
/// rebuilt entirely by [`reseed`](Self::reseed).
#[derive(Clone, Debug)]
pub struct SeededSimplex2D {
    config: NoiseConfig,
    shape: OctaveShape,
    perm: PermutationTable,
}

impl SeededSimplex2D {
    /// Creates a generator from a configuration, seeded with `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfiguration`] if the configuration
    /// fails [`NoiseConfig::validated`].
    pub fn new(config: NoiseConfig) -> NoiseResult<Self> {
        let config = config.validated()?;
        let shape = OctaveShape::new(&config);
        let perm = PermutationTable::seeded(config.seed);
        tracing::debug!(
            seed = config.seed.value(),
            octaves = config.octaves,
            scale = shape.scale(),
            base = shape.base(),
            "created seeded simplex generator"
        );
        Ok(Self {
            config,
            shape,
            perm,
        })
    }

    /// Creates a generator with the default configuration and the given seed.
    #[must_use]
    pub fn with_seed(seed: NoiseSeed) -> Self {
        let config = NoiseConfig::default().with_seed(seed);
        let shape = OctaveShape::new(&config);
        Self {
            config,
            shape,
            perm: PermutationTable::seeded(seed),
        }
    }

    /// Samples the single-octave kernel.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[inline]
    #[must_use]
    pub fn generate_noise(&self, x: f64, y: f64) -> f64 {
        simplex::generate(&self.perm, x, y)
    }

    /// Samples shaped multi-octave noise.
    ///
    /// # Returns
    ///
    /// A value in the range `[base, base + amplitude]`. With
    /// `persistence == 1` and several octaves the range widens to
    /// `octaves² · amplitude / 2` either side of `base + amplitude / 2`.
    #[inline]
    #[must_use]
    pub fn get_noise(&self, x: f64, y: f64) -> f64 {
        self.shape
            .accumulate(x, y, |x, y| simplex::generate(&self.perm, x, y))
    }

    /// Samples a row-major grid of [`get_noise`](Self::get_noise) values.
    ///
    /// Cell `(col, row)` is sampled at `origin + (col, row) * step`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::BufferSize`] if `out.len() != width * height`.
    pub fn fill_grid(
        &self,
        origin: (f64, f64),
        step: f64,
        width: usize,
        height: usize,
        out: &mut [f64],
    ) -> NoiseResult<()> {
        fill_grid(origin, step, width, height, out, |x, y| self.get_noise(x, y))
    }

    /// Replaces the permutation table with one shuffled from `seed`.
    ///
    /// The configuration's seed is updated to match; octave parameters are
    /// untouched.
    pub fn reseed(&mut self, seed: NoiseSeed) {
        self.perm = PermutationTable::seeded(seed);
        self.config.seed = seed;
        tracing::debug!(seed = seed.value(), "rebuilt permutation table");
    }

    /// The current seed.
    #[must_use]
    pub const fn seed(&self) -> NoiseSeed {
        self.config.seed
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Multiplier applied to the raw octave sum.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.shape.scale()
    }

    /// Offset added after scaling (`config.base + amplitude / 2`).
    #[must_use]
    pub const fn base(&self) -> f64 {
        self.shape.base()
    }

    /// The current permutation table.
    #[must_use]
    pub fn permutation(&self) -> &PermutationTable {
        &self.perm
    }
}

impl Default for SeededSimplex2D {
    fn default() -> Self {
        Self::with_seed(NoiseSeed::default())
    }
}

#[allow(clippy::cast_precision_loss)]
fn fill_grid(
    origin: (f64, f64),
    step: f64,
    width: usize,
    height: usize,
    out: &mut [f64],
    sample: impl Fn(f64, f64) -> f64,
) -> NoiseResult<()> {
    let expected = width.saturating_mul(height);
    if out.len() != expected {
        return Err(NoiseError::BufferSize {
            expected,
            actual: out.len(),
        });
    }
    if width == 0 {
        return Ok(());
    }

    for (row, cells) in out.chunks_exact_mut(width).enumerate() {
        let y = origin.1 + row as f64 * step;
        for (col, cell) in cells.iter_mut().enumerate() {
            *cell = sample(origin.0 + col as f64 * step, y);
        }
    }
    Ok(())
}

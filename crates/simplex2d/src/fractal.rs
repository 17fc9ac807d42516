//! # Octave Accumulation
//!
//! Combines multiple layers of noise at different frequencies into one
//! shaped value.
//!
//! Each octave samples the kernel at the current coordinates, weighted by
//! the current amplitude; the coordinates are then multiplied by `frequency`
//! and the amplitude by `persistence`. The weighted sum is remapped with a
//! `scale` and `base` derived once from the configuration, so the result
//! lies in `[base, base + amplitude]`.
//!
//! The one exception is `persistence == 1` with more than one octave. The
//! scale is then `octaves * amplitude / 2` rather than a normalizing factor,
//! so the result spans `octaves² * amplitude / 2` either side of
//! `base + amplitude / 2`.
//!
//! Complexity is O(octaves) kernel calls per query. Nothing is cached.

use crate::config::NoiseConfig;

/// Pre-computed octave parameters.
///
/// Built once from a validated [`NoiseConfig`] and reused for every query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctaveShape {
    octaves: u32,
    frequency: f64,
    persistence: f64,
    scale: f64,
    base: f64,
}

impl OctaveShape {
    /// Derives the shape from a validated configuration.
    ///
    /// The scale maps the largest possible weighted sum onto
    /// `amplitude / 2`, and the base shifts the center to
    /// `config.base + amplitude / 2`. At `persistence == 1` the scale grows
    /// with the octave count instead, and the range is not normalized.
    #[must_use]
    pub fn new(config: &NoiseConfig) -> Self {
        let octaves = f64::from(config.octaves);
        let half_amplitude = config.amplitude / 2.0;
        let persistence = config.persistence;

        // Geometric series 1 + p + ... + p^(n-1) degenerates to n at p == 1
        #[allow(clippy::float_cmp)]
        let scale = if persistence == 1.0 {
            octaves * config.amplitude / 2.0
        } else {
            (1.0 - persistence) / (1.0 - persistence.powf(octaves)) * half_amplitude
        };

        Self {
            octaves: config.octaves,
            frequency: config.frequency,
            persistence,
            scale,
            base: config.base + half_amplitude,
        }
    }

    /// Multiplier applied to the raw weighted sum.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Offset added after scaling.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> f64 {
        self.base
    }

    /// Number of octaves summed per query.
    #[inline]
    #[must_use]
    pub const fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Runs `kernel` once per octave and returns the remapped sum.
    #[inline]
    pub fn accumulate(&self, mut x: f64, mut y: f64, kernel: impl Fn(f64, f64) -> f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;

        for _ in 0..self.octaves {
            total += kernel(x, y) * amplitude;
            x *= self.frequency;
            y *= self.frequency;
            amplitude *= self.persistence;
        }

        total * self.scale + self.base
    }
}

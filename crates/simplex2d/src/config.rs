//! # Generator Configuration
//!
//! Octave count, amplitude, frequency, persistence and base offset for a
//! noise generator, plus the seed used by seeded generators.
//!
//! Configs can be built in code with the `with_*` setters or loaded once at
//! startup from TOML:
//!
//! ```toml
//! octaves = 4
//! amplitude = 2.0
//! frequency = 2.0
//! persistence = 0.5
//! base = -1.0
//! seed = 12345
//! ```
//!
//! Missing keys take their defaults. The `persistance` spelling is accepted
//! as an alias for `persistence`.
//!
//! ## Validation
//!
//! [`NoiseConfig::validated`] runs at generator construction. It is lenient
//! where a sensible value exists and strict where none does:
//!
//! | Field         | Replaced / clamped                  | Rejected               |
//! |---------------|-------------------------------------|------------------------|
//! | `octaves`     | -                                   | `0`                    |
//! | `amplitude`   | `0` or `NaN` becomes `1`            | negative, infinite     |
//! | `frequency`   | `0` or `NaN` becomes `1`            | infinite               |
//! | `persistence` | `NaN` becomes `0.5`, else `[0, 1]`  | -                      |
//! | `base`        | -                                   | `NaN`, infinite        |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, NoiseResult};
use crate::permutation::NoiseSeed;

/// Default per-octave amplitude decay.
pub const DEFAULT_PERSISTENCE: f64 = 0.5;

/// Configuration for a noise generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Number of noise layers. Must be at least 1.
    pub octaves: u32,
    /// Width of the output range `[base, base + amplitude]`.
    ///
    /// At `persistence == 1` the range is `octaves²` times wider.
    pub amplitude: f64,
    /// Coordinate multiplier applied between octaves (lacunarity).
    pub frequency: f64,
    /// Amplitude multiplier applied between octaves, in `[0, 1]`.
    #[serde(alias = "persistance")]
    pub persistence: f64,
    /// Lower bound of the output range.
    pub base: f64,
    /// Permutation seed. Only read by seeded generators.
    pub seed: NoiseSeed,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 1,
            amplitude: 1.0,
            frequency: 1.0,
            persistence: DEFAULT_PERSISTENCE,
            base: 0.0,
            seed: NoiseSeed::default(),
        }
    }
}

impl NoiseConfig {
    /// Sets the octave count.
    #[must_use]
    pub const fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Sets the amplitude.
    #[must_use]
    pub const fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Sets the per-octave frequency multiplier.
    #[must_use]
    pub const fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the per-octave amplitude decay.
    #[must_use]
    pub const fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Sets the base offset.
    #[must_use]
    pub const fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Sets the permutation seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: NoiseSeed) -> Self {
        self.seed = seed;
        self
    }

    /// Parses a configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::ConfigParse`] if the document is not valid TOML
    /// or a field has the wrong type. Values are not validated here.
    pub fn from_toml_str(source: &str) -> NoiseResult<Self> {
        toml::from_str(source).map_err(|e| NoiseError::ConfigParse(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::ConfigIo`] if the file cannot be read, or
    /// [`NoiseError::ConfigParse`] if it cannot be decoded.
    pub fn from_toml_file(path: impl AsRef<Path>) -> NoiseResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| NoiseError::ConfigIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Encodes the configuration as a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::ConfigSerialize`] if encoding fails.
    pub fn to_toml_string(&self) -> NoiseResult<String> {
        toml::to_string(self).map_err(|e| NoiseError::ConfigSerialize(e.to_string()))
    }

    /// Normalizes lenient fields and rejects values with no sensible fallback.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfiguration`] for a zero octave count,
    /// a negative or infinite amplitude, an infinite frequency, or a
    /// non-finite base.
    pub fn validated(self) -> NoiseResult<Self> {
        if self.octaves == 0 {
            return Err(NoiseError::invalid("octaves", "must be at least 1"));
        }

        let amplitude = or_one("amplitude", self.amplitude);
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(NoiseError::invalid(
                "amplitude",
                format!("must be finite and non-negative, got {amplitude}"),
            ));
        }

        let frequency = or_one("frequency", self.frequency);
        if !frequency.is_finite() {
            return Err(NoiseError::invalid(
                "frequency",
                format!("must be finite, got {frequency}"),
            ));
        }

        if !self.base.is_finite() {
            return Err(NoiseError::invalid(
                "base",
                format!("must be finite, got {}", self.base),
            ));
        }

        let persistence = if self.persistence.is_nan() {
            tracing::warn!(
                fallback = DEFAULT_PERSISTENCE,
                "persistence is NaN, using default"
            );
            DEFAULT_PERSISTENCE
        } else {
            let clamped = self.persistence.clamp(0.0, 1.0);
            if clamped != self.persistence {
                tracing::warn!(
                    requested = self.persistence,
                    clamped,
                    "persistence clamped into [0, 1]"
                );
            }
            clamped
        };

        Ok(Self {
            amplitude,
            frequency,
            persistence,
            ..self
        })
    }
}

/// Replaces a zero or `NaN` value with `1.0`.
fn or_one(field: &'static str, value: f64) -> f64 {
    if value == 0.0 || value.is_nan() {
        tracing::warn!(field, requested = value, "replaced with 1");
        1.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NoiseConfig::default();
        assert_eq!(config.octaves, 1);
        assert_eq!(config.amplitude, 1.0);
        assert_eq!(config.frequency, 1.0);
        assert_eq!(config.persistence, 0.5);
        assert_eq!(config.base, 0.0);
        assert_eq!(config.seed, NoiseSeed::new(0));
    }

    #[test]
    fn test_zero_octaves_rejected() {
        let err = NoiseConfig::default().with_octaves(0).validated().unwrap_err();
        assert!(matches!(
            err,
            NoiseError::InvalidConfiguration { field: "octaves", .. }
        ));
    }

    #[test]
    fn test_zero_amplitude_and_frequency_default_to_one() {
        let config = NoiseConfig::default()
            .with_amplitude(0.0)
            .with_frequency(0.0)
            .validated()
            .unwrap();
        assert_eq!(config.amplitude, 1.0);
        assert_eq!(config.frequency, 1.0);
    }

    #[test]
    fn test_or_one_replaces_zero_and_nan_only() {
        assert_eq!(or_one("amplitude", 0.0), 1.0);
        assert_eq!(or_one("amplitude", -0.0), 1.0);
        assert_eq!(or_one("frequency", f64::NAN), 1.0);
        assert_eq!(or_one("frequency", -2.5), -2.5);
        assert_eq!(or_one("amplitude", 1e-300), 1e-300);
    }

    #[test]
    fn test_nan_fields_fall_back() {
        let config = NoiseConfig::default()
            .with_amplitude(f64::NAN)
            .with_frequency(f64::NAN)
            .with_persistence(f64::NAN)
            .validated()
            .unwrap();
        assert_eq!(config.amplitude, 1.0);
        assert_eq!(config.frequency, 1.0);
        assert_eq!(config.persistence, DEFAULT_PERSISTENCE);
    }

    #[test]
    fn test_persistence_clamped() {
        let high = NoiseConfig::default().with_persistence(3.0).validated().unwrap();
        assert_eq!(high.persistence, 1.0);

        let low = NoiseConfig::default().with_persistence(-0.25).validated().unwrap();
        assert_eq!(low.persistence, 0.0);

        let zero = NoiseConfig::default().with_persistence(0.0).validated().unwrap();
        assert_eq!(zero.persistence, 0.0);
    }

    #[test]
    fn test_rejects_non_finite_values() {
        assert!(NoiseConfig::default().with_amplitude(-1.0).validated().is_err());
        assert!(NoiseConfig::default()
            .with_amplitude(f64::INFINITY)
            .validated()
            .is_err());
        assert!(NoiseConfig::default()
            .with_frequency(f64::NEG_INFINITY)
            .validated()
            .is_err());
        assert!(NoiseConfig::default().with_base(f64::NAN).validated().is_err());
    }

    #[test]
    fn test_negative_frequency_allowed() {
        let config = NoiseConfig::default().with_frequency(-2.0).validated().unwrap();
        assert_eq!(config.frequency, -2.0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = NoiseConfig::from_toml_str("octaves = 6\nbase = -1.5\n").unwrap();
        assert_eq!(config.octaves, 6);
        assert_eq!(config.base, -1.5);
        assert_eq!(config.amplitude, 1.0);
        assert_eq!(config.persistence, 0.5);
    }

    #[test]
    fn test_toml_accepts_persistance_alias() {
        let config = NoiseConfig::from_toml_str("persistance = 0.25\nseed = 99\n").unwrap();
        assert_eq!(config.persistence, 0.25);
        assert_eq!(config.seed, NoiseSeed::new(99));
    }

    #[test]
    fn test_toml_type_error() {
        let err = NoiseConfig::from_toml_str("octaves = \"many\"").unwrap_err();
        assert!(matches!(err, NoiseError::ConfigParse(_)));
    }

    #[test]
    fn test_toml_string_reloads() {
        let config = NoiseConfig::default()
            .with_octaves(3)
            .with_amplitude(4.0)
            .with_seed(NoiseSeed::new(7));
        let text = config.to_toml_string().unwrap();
        assert_eq!(NoiseConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_toml_round_trip_full_seed_range() {
        for raw in [u64::MAX, 1 << 63, 0] {
            let config = NoiseConfig::default()
                .with_octaves(2)
                .with_seed(NoiseSeed::new(raw));
            let text = config.to_toml_string().unwrap();
            let reloaded = NoiseConfig::from_toml_str(&text).unwrap();
            assert_eq!(reloaded.seed.value(), raw, "document was {text}");
            assert_eq!(reloaded, config);
        }
    }

    #[test]
    fn test_missing_file() {
        let err = NoiseConfig::from_toml_file("/nonexistent/noise.toml").unwrap_err();
        assert!(matches!(err, NoiseError::ConfigIo { .. }));
    }
}

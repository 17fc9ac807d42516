//! # simplex2d
//!
//! Deterministic, seedable 2D simplex noise for procedural content.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and coordinates always produce the same value
//! 2. **Pure**: Sampling is a function of coordinates only; no I/O, no caching
//! 3. **Bounded**: Shaped output lies in `[base, base + amplitude]` unless
//!    `persistence == 1` with several octaves
//! 4. **Fast**: No allocations per sample
//!
//! ## Core Components
//!
//! - `PermutationTable`: reference or seeded cell hashing table
//! - `simplex::generate`: single-octave kernel in `[-1, 1]`
//! - `OctaveShape`: multi-octave accumulation and range remapping
//! - `Simplex2D` / `SeededSimplex2D`: the generators
//! - `SharedSimplex2D`: lock-guarded generator for concurrent re-seeding
//!
//! ## Example
//!
//! ```rust
//! use simplex2d::Simplex2D;
//!
//! let noise = Simplex2D::default();
//! assert_eq!(noise.get_noise(0.0, 0.0), 0.5);
//!
//! let value = noise.generate_noise(12.5, -3.75);
//! assert!((-1.0..=1.0).contains(&value));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod fractal;
pub mod generator;
pub mod permutation;
pub mod shared;
pub mod simplex;

pub use config::NoiseConfig;
pub use error::{NoiseError, NoiseResult};
pub use fractal::OctaveShape;
pub use generator::{SeededSimplex2D, Simplex2D};
pub use permutation::{NoiseSeed, PermutationTable, SeedStream, REFERENCE_PERMUTATION};
pub use shared::SharedSimplex2D;

//! # Permutation Tables
//!
//! The permutation table hashes integer simplex cells into gradient indices.
//! It is 512 entries long: a permutation of `0..=255` followed by a copy of
//! itself, so `perm[a + perm[b]]` never needs an extra wrap.
//!
//! ## Sources
//!
//! - **Reference**: a fixed, hard-coded permutation. Every unseeded generator
//!   uses it, so unseeded noise is identical everywhere.
//! - **Seeded**: the identity permutation shuffled with a [`SeedStream`].
//!
//! ## Determinism Guarantee
//!
//! The seeded stream is pinned to ChaCha8 seeded through
//! `SeedableRng::seed_from_u64`. Given the same [`NoiseSeed`], this module
//! produces **exactly** the same table on any platform, any time.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of distinct cell hashes.
pub const PERMUTATION_SIZE: usize = 256;

/// Length of the doubled table.
pub const TABLE_SIZE: usize = PERMUTATION_SIZE * 2;

/// The fixed permutation used by unseeded generators.
pub const REFERENCE_PERMUTATION: [u8; PERMUTATION_SIZE] = [
    182, 235, 131, 26, 88, 132, 100, 117, 202, 176, 10, 19, 83, 243, 75, 52,
    252, 194, 32, 30, 72, 15, 124, 53, 236, 183, 121, 103, 175, 39, 253, 120,
    166, 33, 237, 141, 99, 180, 18, 143, 69, 136, 173, 21, 210, 189, 16, 142,
    190, 130, 109, 186, 104, 80, 62, 51, 165, 25, 122, 119, 42, 219, 146, 61,
    149, 177, 54, 158, 27, 170, 60, 201, 159, 193, 203, 58, 154, 222, 78, 138,
    220, 41, 98, 14, 156, 31, 29, 246, 81, 181, 40, 161, 192, 227, 35, 241,
    135, 150, 89, 68, 134, 114, 230, 123, 187, 179, 67, 217, 71, 218, 7, 148,
    228, 251, 93, 8, 140, 125, 73, 37, 82, 28, 112, 24, 174, 118, 232, 137,
    191, 133, 147, 245, 6, 172, 95, 113, 185, 205, 254, 116, 55, 198, 57, 152,
    128, 233, 74, 225, 34, 223, 79, 111, 215, 85, 200, 9, 242, 12, 167, 44,
    20, 110, 107, 126, 86, 231, 234, 76, 207, 102, 214, 238, 221, 145, 213, 64,
    197, 38, 168, 157, 87, 92, 255, 212, 49, 196, 240, 90, 63, 0, 77, 94,
    1, 108, 91, 17, 224, 188, 153, 250, 249, 199, 127, 59, 46, 184, 36, 43,
    209, 206, 248, 4, 56, 47, 226, 13, 144, 22, 11, 247, 70, 244, 48, 97,
    151, 195, 96, 101, 45, 66, 239, 178, 171, 160, 84, 65, 23, 3, 211, 162,
    163, 50, 105, 129, 155, 169, 115, 5, 106, 2, 208, 204, 139, 229, 164, 216,
];

/// The doubled reference table, shared by every unseeded generator.
pub static REFERENCE_TABLE: PermutationTable = PermutationTable::doubled(&REFERENCE_PERMUTATION);

/// Seed for deterministic permutation tables.
///
/// `NoiseSeed::default()` is seed `0`: an absent seed and an explicit zero
/// build the same table.
///
/// Serialized as a signed 64-bit integer with the same bits, since TOML
/// integers are `i64`. Seeds above `i64::MAX` appear negative on disk and
/// read back unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NoiseSeed(u64);

impl NoiseSeed {
    /// Creates a new noise seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for NoiseSeed {
    fn from(seed: u64) -> Self {
        Self(seed)
    }
}

impl Serialize for NoiseSeed {
    #[allow(clippy::cast_possible_wrap)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0 as i64)
    }
}

impl<'de> Deserialize<'de> for NoiseSeed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_i64(SeedVisitor)
    }
}

struct SeedVisitor;

impl Visitor<'_> for SeedVisitor {
    type Value = NoiseSeed;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a 64-bit integer seed")
    }

    #[allow(clippy::cast_sign_loss)]
    fn visit_i64<E: de::Error>(self, value: i64) -> Result<NoiseSeed, E> {
        Ok(NoiseSeed(value as u64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<NoiseSeed, E> {
        Ok(NoiseSeed(value))
    }
}

/// Deterministic stream of uniform values in `[0, 1)`.
pub struct SeedStream {
    rng: ChaCha8Rng,
}

impl SeedStream {
    /// Starts a stream for the given seed.
    #[must_use]
    pub fn new(seed: NoiseSeed) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed.value()),
        }
    }

    /// Returns the next value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// 512-entry permutation table (256 entries, doubled for overflow handling).
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; TABLE_SIZE],
}

impl PermutationTable {
    /// Builds the table from the fixed reference permutation.
    #[must_use]
    pub fn reference() -> Self {
        REFERENCE_TABLE.clone()
    }

    /// Builds a shuffled table from a seed.
    ///
    /// Starting from the identity, each position `i` in `0..256` is swapped
    /// with `floor(256 * r)`, where `r` is the next value of the seed stream.
    #[must_use]
    pub fn seeded(seed: NoiseSeed) -> Self {
        let mut base = [0u8; PERMUTATION_SIZE];
        for (slot, value) in base.iter_mut().zip(0..=u8::MAX) {
            *slot = value;
        }

        let mut stream = SeedStream::new(seed);
        for i in 0..PERMUTATION_SIZE {
            let index = stream_index(stream.next_f64());
            base.swap(i, index);
        }

        Self::doubled(&base)
    }

    const fn doubled(base: &[u8; PERMUTATION_SIZE]) -> Self {
        let mut perm = [0u8; TABLE_SIZE];
        let mut i = 0;
        while i < PERMUTATION_SIZE {
            perm[i] = base[i];
            perm[i + PERMUTATION_SIZE] = base[i];
            i += 1;
        }
        Self { perm }
    }

    /// Gets a permutation value (with automatic wrapping).
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> u8 {
        self.perm[index & (TABLE_SIZE - 1)]
    }

    /// Returns the full 512-entry table.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.perm
    }

    /// Checks the table invariant: the first half is a permutation of
    /// `0..=255` and the second half repeats it.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let (low, high) = self.perm.split_at(PERMUTATION_SIZE);
        if low != high {
            return false;
        }
        let mut seen = [false; PERMUTATION_SIZE];
        for &value in low {
            let slot = &mut seen[usize::from(value)];
            if *slot {
                return false;
            }
            *slot = true;
        }
        true
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("head", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}

/// Maps a stream value in `[0, 1)` to a table position.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn stream_index(r: f64) -> usize {
    ((PERMUTATION_SIZE as f64 * r).floor() as usize).min(PERMUTATION_SIZE - 1)
}

//! # Simplex Kernel
//!
//! Single-octave 2D simplex noise.
//!
//! ## Why Simplex over Perlin?
//!
//! - Fewer directional artifacts
//! - Three corners per sample instead of four
//! - Cheaper gradient evaluation
//!
//! The kernel is a pure function of the coordinates and a
//! [`PermutationTable`]. It never fails: `NaN` or infinite coordinates
//! propagate to a `NaN` or infinite result.

// Noise code uses mathematical single-letter variables (x, y, i, j)
#![allow(clippy::many_single_char_names)]

use crate::permutation::PermutationTable;

/// Gradient vectors for 2D simplex noise.
///
/// Index `hash & 15` selects one; the diagonals and axes each appear twice.
pub static GRADIENTS: [[i8; 2]; 16] = [
    [1, 1],
    [-1, 1],
    [1, -1],
    [-1, -1],
    [1, 0],
    [-1, 0],
    [1, 0],
    [-1, 0],
    [0, 1],
    [0, -1],
    [0, 1],
    [0, -1],
    [1, 1],
    [-1, 1],
    [1, -1],
    [-1, -1],
];

/// Skewing factor for 2D simplex grid: `0.5 * (sqrt(3) - 1)`.
pub const F2: f64 = 0.366_025_403_784_438_6;
/// Unskewing factor for 2D simplex grid: `(3 - sqrt(3)) / 6`.
pub const G2: f64 = 0.211_324_865_405_187_13;

/// Output normalization so sums land in roughly `[-1, 1]`.
const NORMALIZE: f64 = 70.0;

/// Samples 2D simplex noise at the given coordinates.
///
/// # Returns
///
/// A value in the range [-1, 1].
#[must_use]
pub fn generate(perm: &PermutationTable, x: f64, y: f64) -> f64 {
    // Skew input coordinates to simplex grid
    let skew = (x + y) * F2;
    let i = (x + skew).floor();
    let j = (y + skew).floor();

    // Unskew the cell origin back to (x, y) space
    let unskew = (i + j) * G2;
    let x0 = x - (i - unskew);
    let y0 = y - (j - unskew);

    // Lower triangle only on strict `>`; ties go to the upper one
    let (i1, j1): (u8, u8) = if x0 > y0 { (1, 0) } else { (0, 1) };

    // Offsets for second and third corners
    let x1 = x0 - f64::from(i1) + G2;
    let y1 = y0 - f64::from(j1) + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let ii = cell_hash(i);
    let jj = cell_hash(j);
    let i1 = usize::from(i1);
    let j1 = usize::from(j1);

    let n0 = contribution(x0, y0, || {
        perm.get(ii + usize::from(perm.get(jj)))
    });
    let n1 = contribution(x1, y1, || {
        perm.get(ii + i1 + usize::from(perm.get(jj + j1)))
    });
    let n2 = contribution(x2, y2, || {
        perm.get(ii + 1 + usize::from(perm.get(jj + 1)))
    });

    NORMALIZE * (n0 + n1 + n2)
}

/// Calculates the contribution from one corner of the simplex.
///
/// The gradient hash is only looked up when the corner is in range.
#[inline]
fn contribution(x: f64, y: f64, hash: impl FnOnce() -> u8) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let grad = GRADIENTS[usize::from(hash() & 15)];
        let t2 = t * t;
        t2 * t2 * (f64::from(grad[0]) * x + f64::from(grad[1]) * y)
    }
}

/// Masks a floored cell coordinate to `0..=255`.
///
/// Goes through `i64` so the low byte matches two's-complement masking for
/// negative cells; non-finite input saturates instead of panicking.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cell_hash(cell: f64) -> usize {
    ((cell as i64) & 255) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::NoiseSeed;

    fn reference() -> PermutationTable {
        PermutationTable::reference()
    }

    #[test]
    fn test_skew_constants() {
        let sqrt3 = 3.0f64.sqrt();
        assert_eq!(F2, 0.5 * (sqrt3 - 1.0));
        assert_eq!(G2, (3.0 - sqrt3) / 6.0);
    }

    #[test]
    fn test_gradients_never_zero() {
        for grad in &GRADIENTS {
            assert!(grad != &[0, 0]);
            assert!(grad.iter().all(|c| (-1..=1).contains(c)));
        }
    }

    #[test]
    fn test_origin_is_zero() {
        assert_eq!(generate(&reference(), 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_reference_golden_values() {
        let perm = reference();
        let cases = [
            (0.5, 0.25, 0.021_495_256_782_278_423),
            (1.7, -3.2, -0.221_982_254_182_286_12),
            (-12.345, 67.89, 0.186_092_475_446_721_67),
            (100.0, 100.0, 0.001_234_653_077_459_333),
            (0.1, 0.9, -0.337_170_645_989_745_67),
        ];
        for (x, y, expected) in cases {
            let value = generate(&perm, x, y);
            assert!(
                (value - expected).abs() < 1e-12,
                "generate({x}, {y}) = {value}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_cell_hash_wraps_negative_cells() {
        assert_eq!(cell_hash(-1.0), 255);
        assert_eq!(cell_hash(-256.0), 0);
        assert_eq!(cell_hash(257.0), 1);
        assert_eq!(cell_hash(f64::NAN), 0);
    }

    #[test]
    fn test_range() {
        let perm = PermutationTable::seeded(NoiseSeed::new(42));

        for i in 0..10_000i32 {
            let x = (f64::from(i) * 0.1) - 500.0;
            let y = (f64::from(i) * 0.13) - 650.0;
            let value = generate(&perm, x, y);

            assert!(
                (-1.001..=1.001).contains(&value),
                "Value {value} out of range at ({x}, {y})"
            );
        }
    }

    /// Maps skewed lattice coordinates back to input space.
    fn unskew(u: f64, v: f64) -> (f64, f64) {
        let t = (u + v) * G2;
        (u - t, v - t)
    }

    #[test]
    fn test_continuous_across_cell_edges() {
        // Points on a cell edge (integer `u`) and on the triangle split
        // (`u - floor(u) == v - floor(v)`) switch corners; both sides must agree
        let perm = PermutationTable::seeded(NoiseSeed::new(3));
        let eps = 1e-9;

        for k in -40..40i32 {
            let frac = 0.137 + f64::from(k.rem_euclid(7)) * 0.1;
            let edge = unskew(f64::from(k), f64::from(k * 3) + frac);
            let split = unskew(f64::from(k) + frac, f64::from(-k) + frac);

            for (x, y) in [edge, split] {
                let centre = generate(&perm, x, y);
                for (dx, dy) in [(eps, 0.0), (-eps, 0.0), (0.0, eps), (0.0, -eps)] {
                    let side = generate(&perm, x + dx, y + dy);
                    assert!(
                        (side - centre).abs() < 1e-6,
                        "jump of {} at ({x}, {y})",
                        (side - centre).abs()
                    );
                }
            }
        }
    }

    #[test]
    fn test_non_finite_input_propagates() {
        let perm = reference();
        assert!(generate(&perm, f64::NAN, 1.0).is_nan());
        assert!(generate(&perm, 1.0, f64::NAN).is_nan());
        assert!(!generate(&perm, f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_diagonal_tie_is_stable() {
        // On the diagonal x0 == y0, which takes the upper-triangle branch
        let perm = reference();
        for k in 0..100i32 {
            let v = f64::from(k) * 0.37;
            let value = generate(&perm, v, v);
            assert!(value.is_finite());
            assert_eq!(value, generate(&perm, v, v));
        }
    }
}

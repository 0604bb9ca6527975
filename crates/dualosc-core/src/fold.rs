//! Triangle wavefolder.
//!
//! Instead of clipping, excursions beyond ±1 are reflected back into range,
//! so a driven sine turns into progressively richer folded shapes rather than
//! a flat-topped square.
//!
//! # Transfer Curve
//!
//! ```text
//! g = 1 + 4·drive                     (gain 1× .. 5×)
//! u = (g·x + 1) mod 4                 (u ∈ [0, 4))
//! y = u − 1        if u < 2
//!     3 − u        otherwise
//! ```
//!
//! `y` is the periodic triangle that equals `x` on `[-1, 1]` and mirrors at
//! every ±1 boundary. It is closed-form, so arbitrarily hot input folds in
//! constant time and the output is always within `[-1, 1]`. At `drive = 0`
//! the input is returned untouched.

use libm::floorf;

/// Maximum extra gain applied at full drive.
pub const FOLD_GAIN_RANGE: f32 = 4.0;

/// Fold `sample` with the given drive (clamped to 0.0–1.0).
///
/// # Example
///
/// ```rust
/// use dualosc_core::fold;
///
/// assert_eq!(fold(0.3, 0.0), 0.3);
/// // 0.5 × 5 = 2.5 reflects off +1 twice: 2.5 → -0.5
/// assert!((fold(0.5, 1.0) - (-0.5)).abs() < 1e-6);
/// ```
#[inline]
pub fn fold(sample: f32, drive: f32) -> f32 {
    let drive = if drive.is_nan() { 0.0 } else { drive.clamp(0.0, 1.0) };
    if drive <= 0.0 {
        return sample;
    }

    let x = sample * (1.0 + FOLD_GAIN_RANGE * drive);
    reflect(x)
}

/// Reflect `x` into `[-1, 1]` with a period-4 triangle.
#[inline]
fn reflect(x: f32) -> f32 {
    let shifted = x + 1.0;
    let u = shifted - 4.0 * floorf(shifted * 0.25);
    let y = if u < 2.0 { u - 1.0 } else { 3.0 - u };
    y.clamp(-1.0, 1.0)
}

//! Spatial profile functions for derived parameters.

use num_traits::Float;

/// Gaussian profile evaluation.
///
/// # Mathematical Definition
/// ```text
/// gaussian_profile(center, width, height, input) = height * exp(-(input - center)² / width²)
/// ```
///
/// The peak value `height` occurs at `input == center`; `width` is the
/// distance at which the profile falls to `height / e`. A NaN in any
/// argument propagates to the result, as does a zero `width` (the exponent
/// degenerates the same way plain float division does); callers treat NaN
/// as "no answer" rather than an error.
///
/// # Arguments
/// * `center` - Position of the peak
/// * `width` - e-folding distance of the falloff
/// * `height` - Peak value
/// * `input` - Position to evaluate at
///
/// # Returns
/// The profile value at `input`
///
/// # Examples
/// ```
/// use sweep_core::math::profile::gaussian_profile;
///
/// let peak = gaussian_profile(0.0_f64, 2.0, 10.0, 0.0);
/// assert_eq!(peak, 10.0);
///
/// let shoulder = gaussian_profile(0.0_f64, 2.0, 10.0, 2.0);
/// assert!((shoulder - 10.0 / std::f64::consts::E).abs() < 1e-12);
/// ```
#[inline]
pub fn gaussian_profile<T: Float>(center: T, width: T, height: T, input: T) -> T {
    let offset = input - center;
    height * (-(offset * offset) / (width * width)).exp()
}

//! Boolean threshold bisection.

use crate::types::BisectError;
use num_traits::Float;

/// The interval a bisection search narrows a crossing into.
///
/// After `n` rounds over `[lower, upper]` the bracket width is
/// `(upper - lower) / 2^n`, up to float rounding of the midpoints. The
/// predicate matches the original lower endpoint's value at `lo` and the
/// original upper endpoint's value at `hi`, so under the monotonicity
/// assumption the crossing lies inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket<T: Float> {
    /// Edge on the original lower endpoint's side of the crossing
    pub lo: T,
    /// Edge on the original upper endpoint's side of the crossing
    pub hi: T,
}

impl<T: Float> Bracket<T> {
    /// Midpoint of the bracket, the conventional threshold estimate.
    #[inline]
    pub fn midpoint(&self) -> T {
        let two = T::from(2.0).unwrap();
        (self.lo + self.hi) / two
    }

    /// Width of the bracket.
    #[inline]
    pub fn width(&self) -> T {
        self.hi - self.lo
    }

    /// True if `x` lies inside the bracket (inclusive).
    #[inline]
    pub fn contains(&self, x: T) -> bool {
        self.lo <= x && x <= self.hi
    }
}

/// Narrow a boolean crossing point by bisection.
///
/// Evaluates `predicate(upper)` and `predicate(lower)` once each up front
/// and fails with [`BisectError::NoCrossing`] when they agree; differing
/// endpoints are the sole correctness guard. Each of the `iterations` rounds
/// then halves the bracket: the midpoint joins whichever side its predicate
/// value matches.
///
/// Monotonic single-crossing behaviour is assumed, not verified. For a
/// non-monotonic predicate the result is merely *a* bracket whose edges
/// match the endpoint values, not necessarily the unique crossing.
///
/// The predicate is fallible because an evaluation may run a full
/// simulation; its error aborts the search immediately and is carried
/// through unchanged. There is no other bound on the search: the iteration
/// count alone limits how many evaluations occur.
///
/// # Arguments
///
/// * `predicate` - Boolean function of the search variable
/// * `lower` - Lower edge of the search range
/// * `upper` - Upper edge of the search range
/// * `iterations` - Number of halving rounds
///
/// # Returns
///
/// * `Ok(Bracket)` - Final bracket, width `(upper - lower) / 2^iterations`
/// * `Err(BisectError::NoCrossing)` - Predicate agrees at both endpoints
/// * `Err(BisectError::Predicate)` - A predicate evaluation failed
///
/// # Example
///
/// ```
/// use sweep_core::math::bisect::bisect;
///
/// let predicate = |x: f64| Ok::<bool, std::convert::Infallible>(x >= 7.0);
/// let bracket = bisect(predicate, 0.0, 10.0, 20).unwrap();
///
/// assert!(bracket.contains(7.0));
/// assert_eq!(bracket.width(), 10.0 / 2f64.powi(20));
/// ```
pub fn bisect<T, F, E>(
    mut predicate: F,
    lower: T,
    upper: T,
    iterations: usize,
) -> Result<Bracket<T>, BisectError<E>>
where
    T: Float,
    F: FnMut(T) -> Result<bool, E>,
{
    let upper_value = predicate(upper).map_err(BisectError::Predicate)?;
    let lower_value = predicate(lower).map_err(BisectError::Predicate)?;

    if upper_value == lower_value {
        return Err(BisectError::NoCrossing {
            lower: lower.to_f64().unwrap_or(f64::NAN),
            upper: upper.to_f64().unwrap_or(f64::NAN),
        });
    }

    let two = T::from(2.0).unwrap();
    let mut lo = lower;
    let mut hi = upper;

    for _round in 0..iterations {
        let mid = (lo + hi) / two;
        let mid_value = predicate(mid).map_err(BisectError::Predicate)?;
        if mid_value == upper_value {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    Ok(Bracket { lo, hi })
}

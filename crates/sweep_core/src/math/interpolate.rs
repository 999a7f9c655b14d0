//! Piecewise-linear interpolation with clamped extrapolation.

use crate::types::TableError;
use num_traits::Float;

/// Piecewise-linear interpolation table.
///
/// Stores (input, output) sample columns and evaluates the piecewise-linear
/// function through them. Queries outside the sampled range clamp to the
/// edge outputs rather than extending the edge segments, which keeps mapped
/// physical parameters inside their intended range however far the search
/// variable strays.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Construction
///
/// Inputs must be strictly ascending and both columns must hold the same
/// number of points, at least 2. Violations are reported as [`TableError`]
/// values, never panics, because tables are routinely built from user
/// configuration and external files.
///
/// # Example
///
/// ```
/// use sweep_core::math::interpolate::LinearTable;
///
/// let table = LinearTable::new(vec![0.0, 1.0], vec![2.0, 82.0]).unwrap();
/// assert_eq!(table.value_at(0.0), 2.0);
/// assert_eq!(table.value_at(2.0), 82.0); // clamped above the range
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTable<T: Float> {
    /// Strictly ascending input samples
    xs: Vec<T>,
    /// Output samples, one per input
    ys: Vec<T>,
}

impl<T: Float> LinearTable<T> {
    /// Construct a table from input and output sample columns.
    ///
    /// # Arguments
    ///
    /// * `xs` - Input samples, strictly ascending
    /// * `ys` - Output samples, same length as `xs`
    ///
    /// # Returns
    ///
    /// * `Ok(LinearTable)` - Successfully constructed table
    /// * `Err(TableError::LengthMismatch)` - Columns differ in length
    /// * `Err(TableError::InsufficientPoints)` - Fewer than 2 points
    /// * `Err(TableError::NotAscending)` - Inputs not strictly increasing
    ///   (a NaN input also fails this check)
    ///
    /// # Example
    ///
    /// ```
    /// use sweep_core::math::interpolate::LinearTable;
    /// use sweep_core::types::TableError;
    ///
    /// let result = LinearTable::new(vec![0.0, 1.0, 1.0], vec![0.0, 1.0, 2.0]);
    /// assert_eq!(result.unwrap_err(), TableError::NotAscending { index: 2 });
    /// ```
    pub fn new(xs: Vec<T>, ys: Vec<T>) -> Result<Self, TableError> {
        if xs.len() != ys.len() {
            return Err(TableError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        if xs.len() < 2 {
            return Err(TableError::InsufficientPoints {
                got: xs.len(),
                need: 2,
            });
        }

        // The negated comparison also rejects NaN inputs
        for index in 1..xs.len() {
            if !(xs[index] > xs[index - 1]) {
                return Err(TableError::NotAscending { index });
            }
        }

        Ok(Self { xs, ys })
    }

    /// Returns a reference to the input samples.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns a reference to the output samples.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the number of sample points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the table has no sample points.
    /// Note: This is never true for a constructed table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Returns the sampled input range `(x_min, x_max)`.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Evaluate the table at `x`.
    ///
    /// Uses binary search (O(log n)) to find the bracketing segment, then
    /// blends its endpoints linearly. Never fails:
    ///
    /// - a NaN query returns NaN ("no answer" propagates through derived
    ///   parameters instead of raising)
    /// - `x <= x_min` returns the first output, `x >= x_max` the last
    ///   (clamped extrapolation)
    /// - a query exactly on a sample input returns that sample's output
    ///   exactly
    ///
    /// # Formula
    ///
    /// ```text
    /// y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    /// ```
    ///
    /// # Example
    ///
    /// ```
    /// use sweep_core::math::interpolate::LinearTable;
    ///
    /// let table = LinearTable::new(vec![0.0, 10.0], vec![0.0, 100.0]).unwrap();
    /// assert_eq!(table.value_at(3.0), 30.0);
    /// assert_eq!(table.value_at(-5.0), 0.0);
    /// assert!(table.value_at(f64::NAN).is_nan());
    /// ```
    pub fn value_at(&self, x: T) -> T {
        if x.is_nan() {
            return x;
        }

        let last = self.xs.len() - 1;
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[last] {
            return self.ys[last];
        }

        // First index with xs[i] > x; in (0, last] after the edge checks.
        // Anchoring the blend at the left knot keeps exact-knot queries
        // exact in floating point (t == 0 there).
        let i = self.xs.partition_point(|&xi| xi <= x);

        let x0 = self.xs[i - 1];
        let x1 = self.xs[i];
        let y0 = self.ys[i - 1];
        let y1 = self.ys[i];

        let t = (x - x0) / (x1 - x0);
        y0 + (y1 - y0) * t
    }
}

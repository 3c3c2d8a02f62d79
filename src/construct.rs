//! Rank-1 sequence constructors.
//!
//! Values are computed in `f64` and converted to `T` with
//! [`NumCast`](num_traits::NumCast), so integer element types truncate the
//! way an `as` cast would. A value that does not fit `T` fails with
//! [`ArrayError::ScalarConversion`].

use crate::array::{Array, ArrayBase};
use crate::index::Layout;
use crate::storage::Owned;
use crate::{ArrayError, Result};
use num_traits::{NumCast, ToPrimitive};
use tracing::debug;

#[inline]
fn to_f64<T: ToPrimitive>(x: T) -> Result<f64> {
    x.to_f64().ok_or(ArrayError::ScalarConversion)
}

#[inline]
fn from_f64<T: NumCast>(x: f64) -> Result<T> {
    T::from(x).ok_or(ArrayError::ScalarConversion)
}

fn from_values<T>(data: Vec<T>) -> Array<T, 1> {
    let layout = Layout::row_major([data.len()]);
    ArrayBase::from_parts(Owned::new(data), layout)
}

/// `num` evenly spaced values from `start` to `stop`.
///
/// With `endpoint` the step is `(stop - start) / (num - 1)` and the last
/// element is exactly `stop`; without it the step is
/// `(stop - start) / num` and `stop` is excluded.
///
/// ```rust
/// use multi_array::linspace;
///
/// let a = linspace(1.0, 5.0, 5, true).unwrap();
/// assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
///
/// # Errors
/// [`ArrayError::ScalarConversion`] if an endpoint or value does not
/// convert between `T` and `f64`.
pub fn linspace<T>(start: T, stop: T, num: usize, endpoint: bool) -> Result<Array<T, 1>>
where
    T: NumCast + Copy,
{
    let lo = to_f64(start)?;
    let hi = to_f64(stop)?;
    let div = if endpoint { num.saturating_sub(1) } else { num };
    debug!(lo, hi, num, endpoint, "linspace");
    if div == 0 {
        return Ok(from_values(if num == 0 { Vec::new() } else { vec![start] }));
    }
    let step = (hi - lo) / div as f64;
    let mut data = (0..num)
        .map(|i| from_f64(lo + i as f64 * step))
        .collect::<Result<Vec<T>>>()?;
    if endpoint {
        if let Some(last) = data.last_mut() {
            *last = stop;
        }
    }
    Ok(from_values(data))
}

/// Values `start, start + step, ...` strictly before `stop`:
/// `ceil((stop - start) / step)` of them, or none if that is not positive.
///
/// ```rust
/// use multi_array::arange;
///
/// assert_eq!(arange(0, 5, 1).unwrap().to_vec(), vec![0, 1, 2, 3, 4]);
/// assert_eq!(arange(1.0, 0.0, -0.25).unwrap().to_vec(), vec![1.0, 0.75, 0.5, 0.25]);
/// ```
///
/// # Errors
/// - [`ArrayError::InvalidRange`] if `step` is zero, any bound is not
///   finite or the element count does not fit in memory
/// - [`ArrayError::ScalarConversion`] as for [`linspace`]
pub fn arange<T>(start: T, stop: T, step: T) -> Result<Array<T, 1>>
where
    T: NumCast + Copy,
{
    let lo = to_f64(start)?;
    let hi = to_f64(stop)?;
    let step = to_f64(step)?;
    if step == 0.0 {
        return Err(ArrayError::InvalidRange("step must be non-zero"));
    }
    if !(lo.is_finite() && hi.is_finite() && step.is_finite()) {
        return Err(ArrayError::InvalidRange("bounds and step must be finite"));
    }
    let count = ((hi - lo) / step).ceil();
    if count > isize::MAX as f64 {
        return Err(ArrayError::InvalidRange("too many elements"));
    }
    let num = if count > 0.0 { count as usize } else { 0 };
    debug!(lo, hi, step, num, "arange");
    let data = (0..num)
        .map(|i| from_f64(lo + i as f64 * step))
        .collect::<Result<Vec<T>>>()?;
    Ok(from_values(data))
}

/// `num` values spaced evenly on a log scale from `start` to `stop`.
///
/// Both endpoints must be non-zero and share a sign. With `endpoint` the
/// last element is exactly `stop`.
///
/// ```rust
/// use multi_array::geomspace;
///
/// let a = geomspace(1.0, 1000.0, 4, true).unwrap();
/// assert_eq!(a[[0]], 1.0);
/// assert_eq!(a[[3]], 1000.0);
/// ```
///
/// # Errors
/// - [`ArrayError::InvalidRange`] on a zero endpoint or a sign change
/// - [`ArrayError::ScalarConversion`] as for [`linspace`]
pub fn geomspace<T>(start: T, stop: T, num: usize, endpoint: bool) -> Result<Array<T, 1>>
where
    T: NumCast + Copy,
{
    let lo = to_f64(start)?;
    let hi = to_f64(stop)?;
    if lo == 0.0 || hi == 0.0 {
        return Err(ArrayError::InvalidRange("geometric sequence cannot include zero"));
    }
    if lo.is_sign_negative() != hi.is_sign_negative() {
        return Err(ArrayError::InvalidRange("endpoints must share a sign"));
    }
    let sign = lo.signum();
    let (log_lo, log_hi) = (lo.abs().log10(), hi.abs().log10());
    let div = if endpoint { num.saturating_sub(1) } else { num };
    debug!(lo, hi, num, endpoint, "geomspace");
    if div == 0 {
        return Ok(from_values(if num == 0 { Vec::new() } else { vec![start] }));
    }
    let step = (log_hi - log_lo) / div as f64;
    let mut data = (0..num)
        .map(|i| from_f64(sign * 10f64.powf(log_lo + i as f64 * step)))
        .collect::<Result<Vec<T>>>()?;
    if let Some(first) = data.first_mut() {
        *first = start;
    }
    if endpoint {
        if let Some(last) = data.last_mut() {
            *last = stop;
        }
    }
    Ok(from_values(data))
}

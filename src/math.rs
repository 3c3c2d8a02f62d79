//! Elementwise math functions.
//!
//! Each function maps a scalar operation over an array of any storage and
//! returns a new owned array of the same shape.
//!
//! ```rust
//! use multi_array::{math, Array};
//!
//! let a = Array::from_vec([2], vec![4.0_f64, 9.0]).unwrap();
//! assert_eq!(math::sqrt(&a).to_vec(), vec![2.0, 3.0]);
//! ```

use crate::array::{Array, ArrayBase};
use crate::storage::Storage;
use crate::Result;
use num_traits::{Float, Signed};

macro_rules! unary_float {
    ($($name:ident $(#[$attr:meta])*),* $(,)?) => {
        $(
            $(#[$attr])*
            pub fn $name<S, T, const N: usize>(a: &ArrayBase<S, N>) -> Array<T, N>
            where
                S: Storage<Elem = T>,
                T: Float,
            {
                a.map(|x| x.$name())
            }
        )*
    };
}

unary_float!(
    exp #[doc = "`e^x` for every element."],
    ln #[doc = "Natural logarithm."] #[doc(alias = "log")],
    log10 #[doc = "Base-10 logarithm."],
    sqrt,
    sin,
    cos,
    tan,
    asin,
    acos,
    atan,
    sinh,
    cosh,
    tanh,
);

/// Absolute value.
pub fn abs<S, T, const N: usize>(a: &ArrayBase<S, N>) -> Array<T, N>
where
    S: Storage<Elem = T>,
    T: Signed,
{
    a.map(Signed::abs)
}

/// Every element raised to the scalar power `e`.
pub fn powf<S, T, const N: usize>(a: &ArrayBase<S, N>, e: T) -> Array<T, N>
where
    S: Storage<Elem = T>,
    T: Float,
{
    a.map(|x| x.powf(e))
}

/// `a[i] ^ b[i]` for every position.
///
/// # Errors
/// [`ArrayError::ShapeMismatch`](crate::ArrayError::ShapeMismatch) unless
/// both shapes are identical.
pub fn pow<SA, SB, T, const N: usize>(
    a: &ArrayBase<SA, N>,
    b: &ArrayBase<SB, N>,
) -> Result<Array<T, N>>
where
    SA: Storage<Elem = T>,
    SB: Storage<Elem = T>,
    T: Float,
{
    a.zip_map(b, |x, y| x.powf(*y))
}

/// Four-quadrant arctangent of `a[i] / b[i]`.
///
/// # Errors
/// [`ArrayError::ShapeMismatch`](crate::ArrayError::ShapeMismatch) unless
/// both shapes are identical.
pub fn atan2<SA, SB, T, const N: usize>(
    a: &ArrayBase<SA, N>,
    b: &ArrayBase<SB, N>,
) -> Result<Array<T, N>>
where
    SA: Storage<Elem = T>,
    SB: Storage<Elem = T>,
    T: Float,
{
    a.zip_map(b, |y, x| y.atan2(*x))
}

/// A scalar function lifted to operate on arrays. Built by [`vectorize`].
#[derive(Debug, Clone, Copy)]
pub struct Vectorized<F> {
    f: F,
}

impl<F> Vectorized<F> {
    /// Apply the wrapped function to every element of `a`.
    pub fn apply<S, T, U, const N: usize>(&self, a: &ArrayBase<S, N>) -> Array<U, N>
    where
        S: Storage<Elem = T>,
        T: Clone,
        F: Fn(T) -> U,
    {
        a.map(|x| (self.f)(x.clone()))
    }
}

/// Lift `f: T -> U` into a function from arrays of `T` to arrays of `U`.
///
/// ```rust
/// use multi_array::{vectorize, Array};
///
/// let step = vectorize(|x: f64| if x < 0.0 { 0 } else { 1 });
/// let a = Array::from_vec([3], vec![-1.5, 0.0, 2.0]).unwrap();
/// assert_eq!(step.apply(&a).to_vec(), vec![0, 1, 1]);
/// ```
pub fn vectorize<F>(f: F) -> Vectorized<F> {
    Vectorized { f }
}

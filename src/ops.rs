//! Arithmetic between arrays and with scalars.
//!
//! `&a + &b` allocates a new array; `a + &b` reuses `a`'s buffer; `a += &b`
//! writes in place (through to the owner for views). Shape mismatches panic
//! in operator form and return [`ShapeMismatch`](crate::ArrayError::ShapeMismatch) from
//! [`add`]/[`sub`]/[`mul`]/[`div`].

use crate::array::{Array, ArrayBase};
use crate::storage::{Storage, StorageMut};
use crate::Result;
use num_complex::Complex;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Element types that broadcast as a scalar against every element of an
/// array.
pub trait ScalarOperand: 'static + Clone {}

macro_rules! impl_scalar_operand {
    ($($t:ty),*) => {
        $(impl ScalarOperand for $t {})*
    };
}

impl_scalar_operand!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool
);
impl ScalarOperand for Complex<f32> {}
impl ScalarOperand for Complex<f64> {}

#[inline]
fn or_panic<T>(r: Result<T>) -> T {
    match r {
        Ok(v) => v,
        Err(err) => panic!("{err}"),
    }
}

macro_rules! binary_fn {
    ($name:ident, $trt:ident, $op:tt, $doc:literal) => {
        #[doc = $doc]
        ///
        /// # Errors
        /// [`ArrayError::ShapeMismatch`](crate::ArrayError::ShapeMismatch)
        /// unless both shapes are identical.
        pub fn $name<SA, SB, T, const N: usize>(
            a: &ArrayBase<SA, N>,
            b: &ArrayBase<SB, N>,
        ) -> Result<Array<T, N>>
        where
            SA: Storage<Elem = T>,
            SB: Storage<Elem = T>,
            T: Clone + $trt<Output = T>,
        {
            a.zip_map(b, |x, y| x.clone() $op y.clone())
        }
    };
}

binary_fn!(add, Add, +, "Elementwise `a + b`.");
binary_fn!(sub, Sub, -, "Elementwise `a - b`.");
binary_fn!(mul, Mul, *, "Elementwise `a * b`.");
binary_fn!(div, Div, /, "Elementwise `a / b`.");

macro_rules! impl_binary_op {
    ($trt:ident, $method:ident, $op:tt, $trt_assign:ident, $method_assign:ident, $free:ident) => {
        /// `&a OP &b` into a new array.
        impl<'a, 'b, SA, SB, T, const N: usize> $trt<&'b ArrayBase<SB, N>> for &'a ArrayBase<SA, N>
        where
            SA: Storage<Elem = T>,
            SB: Storage<Elem = T>,
            T: Clone + $trt<Output = T>,
        {
            type Output = Array<T, N>;

            fn $method(self, rhs: &'b ArrayBase<SB, N>) -> Array<T, N> {
                or_panic($free(self, rhs))
            }
        }

        /// `a OP &b`, reusing `a`'s buffer.
        impl<'b, SB, T, const N: usize> $trt<&'b ArrayBase<SB, N>> for Array<T, N>
        where
            SB: Storage<Elem = T>,
            T: Clone + $trt<Output = T>,
        {
            type Output = Array<T, N>;

            fn $method(mut self, rhs: &'b ArrayBase<SB, N>) -> Array<T, N> {
                or_panic(self.zip_mut_with(rhs, |x, y| *x = x.clone() $op y.clone()));
                self
            }
        }

        /// `&a OP scalar` into a new array.
        impl<'a, S, T, const N: usize> $trt<T> for &'a ArrayBase<S, N>
        where
            S: Storage<Elem = T>,
            T: ScalarOperand + $trt<Output = T>,
        {
            type Output = Array<T, N>;

            fn $method(self, rhs: T) -> Array<T, N> {
                self.map(|x| x.clone() $op rhs.clone())
            }
        }

        /// `a OP scalar`, reusing `a`'s buffer.
        impl<T, const N: usize> $trt<T> for Array<T, N>
        where
            T: ScalarOperand + $trt<Output = T>,
        {
            type Output = Array<T, N>;

            fn $method(mut self, rhs: T) -> Array<T, N> {
                self.map_inplace(|x| *x = x.clone() $op rhs.clone());
                self
            }
        }

        impl<'b, S, SB, T, const N: usize> $trt_assign<&'b ArrayBase<SB, N>> for ArrayBase<S, N>
        where
            S: StorageMut<Elem = T>,
            SB: Storage<Elem = T>,
            T: Clone + $trt_assign,
        {
            fn $method_assign(&mut self, rhs: &'b ArrayBase<SB, N>) {
                or_panic(self.zip_mut_with(rhs, |x, y| x.$method_assign(y.clone())));
            }
        }

        impl<S, T, const N: usize> $trt_assign<T> for ArrayBase<S, N>
        where
            S: StorageMut<Elem = T>,
            T: ScalarOperand + $trt_assign,
        {
            fn $method_assign(&mut self, rhs: T) {
                self.map_inplace(|x| x.$method_assign(rhs.clone()));
            }
        }
    };
}

impl_binary_op!(Add, add, +, AddAssign, add_assign, add);
impl_binary_op!(Sub, sub, -, SubAssign, sub_assign, sub);
impl_binary_op!(Mul, mul, *, MulAssign, mul_assign, mul);
impl_binary_op!(Div, div, /, DivAssign, div_assign, div);

// scalar OP array, one impl per primitive since the scalar is the foreign
// left-hand side
macro_rules! impl_scalar_lhs {
    ($($t:ty),*) => {
        $(
            impl_scalar_lhs!(@op $t, Add, add, +);
            impl_scalar_lhs!(@op $t, Sub, sub, -);
            impl_scalar_lhs!(@op $t, Mul, mul, *);
            impl_scalar_lhs!(@op $t, Div, div, /);
        )*
    };
    (@op $t:ty, $trt:ident, $method:ident, $op:tt) => {
        impl<'a, S, const N: usize> $trt<&'a ArrayBase<S, N>> for $t
        where
            S: Storage<Elem = $t>,
        {
            type Output = Array<$t, N>;

            fn $method(self, rhs: &'a ArrayBase<S, N>) -> Array<$t, N> {
                rhs.map(|&x| self $op x)
            }
        }

        impl<const N: usize> $trt<Array<$t, N>> for $t {
            type Output = Array<$t, N>;

            fn $method(self, mut rhs: Array<$t, N>) -> Array<$t, N> {
                rhs.map_inplace(|x| *x = self $op *x);
                rhs
            }
        }
    };
}

impl_scalar_lhs!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl<'a, S, T, const N: usize> Neg for &'a ArrayBase<S, N>
where
    S: Storage<Elem = T>,
    T: Clone + Neg<Output = T>,
{
    type Output = Array<T, N>;

    fn neg(self) -> Array<T, N> {
        self.map(|x| -x.clone())
    }
}

impl<T, const N: usize> Neg for Array<T, N>
where
    T: Clone + Neg<Output = T>,
{
    type Output = Array<T, N>;

    fn neg(mut self) -> Array<T, N> {
        self.map_inplace(|x| *x = -x.clone());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayError, Slice};

    #[test]
    fn test_add_arrays() {
        let a: Array<i32, 1> = Array::from([1, 2, 3]);
        let b: Array<i32, 1> = Array::from([10, 20, 30]);
        assert_eq!((&a + &b).to_vec(), vec![11, 22, 33]);
        assert_eq!(add(&a, &b).unwrap().to_vec(), vec![11, 22, 33]);
    }

    #[test]
    fn test_fallible_shape_mismatch() {
        let a = Array::from_vec([2, 3], vec![1.0; 6]).unwrap();
        let b = Array::from_vec([3, 2], vec![1.0; 6]).unwrap();
        assert_eq!(
            sub(&a, &b).unwrap_err(),
            ArrayError::ShapeMismatch(vec![2, 3], vec![3, 2])
        );
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_operator_shape_mismatch_panics() {
        let a: Array<i32, 1> = Array::from([1, 2, 3]);
        let b: Array<i32, 1> = Array::from([1, 2]);
        let _ = &a + &b;
    }

    #[test]
    fn test_scalar_both_sides() {
        let a: Array<i32, 1> = Array::from([1, 2, 3]);
        assert_eq!((&a * 3).to_vec(), vec![3, 6, 9]);
        assert_eq!((3i32 * &a).to_vec(), vec![3, 6, 9]);
        assert_eq!((10i32 - &a).to_vec(), vec![9, 8, 7]);
        let b: Array<f64, 1> = Array::from([2.0, 4.0]);
        assert_eq!((12.0f64 / b).to_vec(), vec![6.0, 3.0]);
    }

    #[test]
    fn test_owned_lhs_reuses_buffer() {
        let a: Array<f64, 1> = Array::from([1.0, 2.0]);
        let b: Array<f64, 1> = Array::from([0.5, 0.5]);
        let c = a * &b;
        assert_eq!(c.to_vec(), vec![0.5, 1.0]);
        let d = c - 1.0;
        assert_eq!(d.to_vec(), vec![-0.5, 0.0]);
    }

    #[test]
    fn test_compound_assign_through_view() {
        let mut a = Array::from_shape_fn([3, 3], |[i, j]| (i * 3 + j) as i32);
        let ones = Array::from_elem([3, 2], 100);
        {
            let mut cols = a.slice_axis_mut(1, 1..3).unwrap();
            cols += &ones;
            cols *= 2;
        }
        assert_eq!(a.to_vec(), vec![0, 202, 204, 3, 208, 210, 6, 214, 216]);
    }

    #[test]
    fn test_strided_operands() {
        let a = Array::from_shape_fn([4], |[i]| i as f64);
        let even = a.slice_axis(0, Slice::from(0..4).step_by(2)).unwrap();
        let odd = a.slice_axis(0, Slice::from(1..4).step_by(2)).unwrap();
        assert_eq!((&even + &odd).to_vec(), vec![1.0, 5.0]);
    }

    #[test]
    fn test_neg() {
        let a: Array<i32, 1> = Array::from([1, -2]);
        assert_eq!((-&a).to_vec(), vec![-1, 2]);
        assert_eq!((-a).to_vec(), vec![-1, 2]);
    }

    #[test]
    fn test_complex_scalar() {
        let a: Array<Complex<f64>, 1> =
            Array::from([Complex::new(1.0, 1.0), Complex::new(0.0, 2.0)]);
        let b = &a * Complex::new(0.0, 1.0);
        assert_eq!(b.to_vec(), vec![Complex::new(-1.0, 1.0), Complex::new(-2.0, 0.0)]);
    }
}

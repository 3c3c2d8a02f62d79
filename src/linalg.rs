//! Reductions and products.

use crate::array::{Array, ArrayBase};
use crate::index::Layout;
use crate::map::ensure_same_shape;
use crate::storage::{Owned, Storage};
use crate::{ArrayError, Result};
use num_traits::Zero;
use std::ops::Mul;
use tracing::debug;

/// Inner product of two rank-1 arrays.
///
/// # Errors
/// [`ArrayError::ShapeMismatch`] if the lengths differ.
pub fn dot<SA, SB, T>(a: &ArrayBase<SA, 1>, b: &ArrayBase<SB, 1>) -> Result<T>
where
    SA: Storage<Elem = T>,
    SB: Storage<Elem = T>,
    T: Clone + Zero + Mul<Output = T>,
{
    ensure_same_shape(a.shape(), b.shape())?;
    Ok(a
        .iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (x, y)| acc + x.clone() * y.clone()))
}

/// Sum of all elements; zero for an empty array.
pub fn sum<S, T, const N: usize>(a: &ArrayBase<S, N>) -> T
where
    S: Storage<Elem = T>,
    T: Clone + Zero,
{
    a.iter().fold(T::zero(), |acc, x| acc + x.clone())
}

/// Outer product: `out[i.., j..] = a[i..] * b[j..]`, of rank `K = N + M`
/// and shape `a.shape ++ b.shape`.
///
/// ```rust
/// use multi_array::{outer, Array};
///
/// let a = Array::from_vec([2], vec![1, 2]).unwrap();
/// let b = Array::from_vec([3], vec![1, 10, 100]).unwrap();
/// let c: Array<i32, 2> = outer(&a, &b).unwrap();
/// assert_eq!(c.to_vec(), vec![1, 10, 100, 2, 20, 200]);
/// ```
///
/// # Errors
/// [`ArrayError::RankMismatch`] if `K != N + M`.
pub fn outer<SA, SB, T, const N: usize, const M: usize, const K: usize>(
    a: &ArrayBase<SA, N>,
    b: &ArrayBase<SB, M>,
) -> Result<Array<T, K>>
where
    SA: Storage<Elem = T>,
    SB: Storage<Elem = T>,
    T: Clone + Mul<Output = T>,
{
    if K != N + M {
        return Err(ArrayError::RankMismatch(K, N + M));
    }
    let mut shape = [0usize; K];
    shape[..N].copy_from_slice(a.shape());
    shape[N..].copy_from_slice(b.shape());
    debug!(?shape, "outer product");

    let mut data = Vec::with_capacity(a.size() * b.size());
    for x in a.iter() {
        data.extend(b.iter().map(|y| x.clone() * y.clone()));
    }
    Ok(ArrayBase::from_parts(Owned::new(data), Layout::row_major(shape)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Slice;
    use approx::assert_relative_eq;

    #[test]
    fn test_dot() {
        let a = Array::from_vec([3], vec![1.0, 2.0, 3.0]).unwrap();
        let b = Array::from_vec([3], vec![4.0, 5.0, 6.0]).unwrap();
        assert_relative_eq!(dot(&a, &b).unwrap(), 32.0);
    }

    #[test]
    fn test_dot_on_strided_views() {
        let flat = Array::from_shape_fn([9], |[i]| i as i64);
        let row = flat.slice_axis(0, 3..6).unwrap();
        let col = flat.slice_axis(0, Slice::from(2..9).step_by(3)).unwrap();
        // [3, 4, 5] . [2, 5, 8]
        assert_eq!(dot(&row, &col).unwrap(), 66);
    }

    #[test]
    fn test_dot_length_mismatch() {
        let a = Array::from_vec([2], vec![1, 2]).unwrap();
        let b = Array::from_vec([3], vec![1, 2, 3]).unwrap();
        assert_eq!(
            dot(&a, &b).unwrap_err(),
            ArrayError::ShapeMismatch(vec![2], vec![3])
        );
    }

    #[test]
    fn test_sum() {
        let a = Array::from_shape_fn([2, 3, 4], |[i, j, k]| i + j + k);
        assert_eq!(sum(&a), 72);
        let empty: Array<f64, 2> = Array::zeros([0, 4]);
        assert_eq!(sum(&empty), 0.0);
        let s = a.slice_axis(2, Slice::from(0..4).step_by(3)).unwrap();
        assert_eq!(sum(&s), 36);
    }

    #[test]
    fn test_outer_rank3() {
        let a = Array::from_vec([2, 1], vec![1, 2]).unwrap();
        let b = Array::from_vec([3], vec![1, 10, 100]).unwrap();
        let c: Array<i32, 3> = outer(&a, &b).unwrap();
        assert_eq!(c.shape(), &[2, 1, 3]);
        assert_eq!(c[[1, 0, 2]], 200);
    }

    #[test]
    fn test_outer_rank_mismatch() {
        let a = Array::from_vec([2], vec![1, 2]).unwrap();
        let b = Array::from_vec([2], vec![1, 2]).unwrap();
        let err = outer::<_, _, _, 1, 1, 3>(&a, &b).unwrap_err();
        assert_eq!(err, ArrayError::RankMismatch(3, 2));
    }
}

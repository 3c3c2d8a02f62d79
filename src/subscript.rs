//! Single-axis subscripting: `a[i]` on a rank-N array.
//!
//! Subscripting fixes axis 0. At rank 1 the result is a reference to the
//! element itself; at higher ranks it is a rank-(N-1) view over the same
//! buffer, with shape and strides taken from axes `1..N` and the offset
//! advanced by `i * strides[0]`. Chains compose, so `a[2][1]` is two steps.
//!
//! [`ArrayBase::index_axis`] generalizes this to any axis: `index_axis(1, 7)`
//! on a matrix is its last column as a rank-1 view.
//!
//! Stable Rust cannot name `N - 1` for a generic `N`, so the rank-lowering
//! impls are generated for ranks 2 through 6.

use crate::array::{ArrayBase, ArrayView, ArrayViewMut};
use crate::index::Layout;
use crate::storage::{Storage, StorageMut};
use crate::{ArrayError, Result};

/// Index along axis 0, consuming a view.
///
/// The output keeps the view's full borrow lifetime, which makes it suitable
/// for building chains that outlive the intermediate values:
///
/// ```rust
/// use multi_array::{Array, Subscript};
///
/// let a = Array::from_shape_fn([2, 3, 4], |[i, j, k]| 100 * i + 10 * j + k);
/// let x: &usize = a.view().subscript(1).unwrap().subscript(2).unwrap().subscript(3).unwrap();
/// assert_eq!(*x, 123);
/// ```
pub trait Subscript: Sized {
    /// `&T` / `&mut T` at rank 1, a lower-rank view otherwise.
    type Output;

    /// Fix `axis` at `index`, dropping that axis.
    ///
    /// # Errors
    /// - [`ArrayError::InvalidAxis`] if `axis` is not below the rank
    /// - [`ArrayError::IndexOverflow`] if `index` is not below the extent
    ///   of `axis`
    fn subscript_axis(self, axis: usize, index: usize) -> Result<Self::Output>;

    /// # Errors
    /// [`ArrayError::IndexOverflow`] if `index` is not below the extent of
    /// axis 0.
    #[inline]
    fn subscript(self, index: usize) -> Result<Self::Output> {
        self.subscript_axis(0, index)
    }
}

fn check_rank1_axis(axis: usize) -> Result<()> {
    if axis == 0 {
        Ok(())
    } else {
        Err(ArrayError::InvalidAxis { axis, rank: 1 })
    }
}

impl<'a, T> Subscript for ArrayView<'a, T, 1> {
    type Output = &'a T;

    #[inline]
    fn subscript_axis(self, axis: usize, index: usize) -> Result<&'a T> {
        check_rank1_axis(axis)?;
        let pos = self.layout.position(&[index])?;
        Ok(&self.storage.slice()[pos])
    }
}

impl<'a, T> Subscript for ArrayViewMut<'a, T, 1> {
    type Output = &'a mut T;

    #[inline]
    fn subscript_axis(self, axis: usize, index: usize) -> Result<&'a mut T> {
        check_rank1_axis(axis)?;
        let pos = self.layout.position(&[index])?;
        Ok(&mut self.storage.into_slice()[pos])
    }
}

/// Drop `axis` of `layout`, fixing it at `index`.
fn lower_layout<const N: usize, const M: usize>(
    layout: &Layout<N>,
    axis: usize,
    index: usize,
) -> Result<Layout<M>> {
    debug_assert_eq!(M + 1, N);
    if axis >= N {
        return Err(ArrayError::InvalidAxis { axis, rank: N });
    }
    let extent = layout.shape()[axis];
    if index >= extent {
        return Err(ArrayError::IndexOverflow {
            axis,
            index,
            extent,
        });
    }
    let mut shape = [0usize; M];
    let mut strides = [0usize; M];
    let kept = (0..N).filter(|&d| d != axis);
    for (out, d) in kept.enumerate() {
        shape[out] = layout.shape()[d];
        strides[out] = layout.strides()[d];
    }
    let offset = layout.offset() + index * layout.strides()[axis];
    Ok(Layout::new(shape, strides, offset))
}

macro_rules! impl_subscript {
    ($($n:literal => $m:literal),* $(,)?) => {
        $(
            impl<'a, T> Subscript for ArrayView<'a, T, $n> {
                type Output = ArrayView<'a, T, $m>;

                #[inline]
                fn subscript_axis(self, axis: usize, index: usize) -> Result<Self::Output> {
                    let layout = lower_layout::<$n, $m>(&self.layout, axis, index)?;
                    Ok(ArrayBase::from_parts(self.storage, layout))
                }
            }

            impl<'a, T> Subscript for ArrayViewMut<'a, T, $n> {
                type Output = ArrayViewMut<'a, T, $m>;

                #[inline]
                fn subscript_axis(self, axis: usize, index: usize) -> Result<Self::Output> {
                    let layout = lower_layout::<$n, $m>(&self.layout, axis, index)?;
                    Ok(ArrayBase::from_parts(self.storage, layout))
                }
            }
        )*
    };
}

impl_subscript!(2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5);

impl<S: Storage, const N: usize> ArrayBase<S, N> {
    /// `self[index]`: fix axis 0 at `index`.
    ///
    /// Returns `&T` for a rank-1 array and a rank-(N-1) [`ArrayView`]
    /// otherwise.
    ///
    /// # Errors
    /// [`ArrayError::IndexOverflow`] if `index` is out of range.
    #[inline]
    pub fn at<'b>(
        &'b self,
        index: usize,
    ) -> Result<<ArrayView<'b, S::Elem, N> as Subscript>::Output>
    where
        S::Elem: 'b,
        ArrayView<'b, S::Elem, N>: Subscript,
    {
        self.view().subscript(index)
    }

    /// Fix `axis` at `index`, returning a rank-(N-1) view (or `&T` at rank
    /// 1).
    ///
    /// ```rust
    /// use multi_array::Array;
    ///
    /// let board = Array::from_shape_fn([8, 8], |[i, j]| i * 8 + j + 1);
    /// let last_col = board.index_axis(1, 7).unwrap();
    /// assert_eq!(last_col.to_vec(), vec![8, 16, 24, 32, 40, 48, 56, 64]);
    /// ```
    ///
    /// # Errors
    /// - [`ArrayError::InvalidAxis`] if `axis >= N`
    /// - [`ArrayError::IndexOverflow`] if `index` is out of range
    #[inline]
    pub fn index_axis<'b>(
        &'b self,
        axis: usize,
        index: usize,
    ) -> Result<<ArrayView<'b, S::Elem, N> as Subscript>::Output>
    where
        S::Elem: 'b,
        ArrayView<'b, S::Elem, N>: Subscript,
    {
        self.view().subscript_axis(axis, index)
    }
}

impl<S: StorageMut, const N: usize> ArrayBase<S, N> {
    /// Mutable `self[index]`: fix axis 0 at `index`.
    ///
    /// Returns `&mut T` for a rank-1 array and a rank-(N-1)
    /// [`ArrayViewMut`] otherwise. The result borrows `self` exclusively.
    ///
    /// # Errors
    /// [`ArrayError::IndexOverflow`] if `index` is out of range.
    #[inline]
    pub fn at_mut<'b>(
        &'b mut self,
        index: usize,
    ) -> Result<<ArrayViewMut<'b, S::Elem, N> as Subscript>::Output>
    where
        S::Elem: 'b,
        ArrayViewMut<'b, S::Elem, N>: Subscript,
    {
        self.view_mut().subscript(index)
    }

    /// Mutable version of [`ArrayBase::index_axis`].
    ///
    /// # Errors
    /// As for [`ArrayBase::index_axis`].
    #[inline]
    pub fn index_axis_mut<'b>(
        &'b mut self,
        axis: usize,
        index: usize,
    ) -> Result<<ArrayViewMut<'b, S::Elem, N> as Subscript>::Output>
    where
        S::Elem: 'b,
        ArrayViewMut<'b, S::Elem, N>: Subscript,
    {
        self.view_mut().subscript_axis(axis, index)
    }
}

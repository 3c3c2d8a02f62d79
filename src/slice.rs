//! Range/step slicing that preserves rank.

use crate::array::{ArrayBase, ArrayView, ArrayViewMut};
use crate::index::Layout;
use crate::storage::{Storage, StorageMut, View, ViewMut};
use crate::{ArrayError, Result};
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

/// A `start..stop` selection along one axis, taking every `step`-th index.
///
/// `stop` is exclusive; `None` means the end of the axis. Any Rust range over
/// `usize` converts into a `Slice`, and so does a single `usize` (a one-wide
/// selection that keeps the axis). Inclusive ends at `usize::MAX` saturate
/// and are rejected when the slice is applied.
///
/// ```rust
/// use multi_array::Slice;
///
/// let s = Slice::from(1..8).step_by(2);
/// assert_eq!(s, Slice::new(1, Some(8), 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: usize,
    pub stop: Option<usize>,
    pub step: usize,
}

impl Slice {
    pub fn new(start: usize, stop: Option<usize>, step: usize) -> Self {
        Self { start, stop, step }
    }

    /// The whole axis.
    pub fn full() -> Self {
        Self::new(0, None, 1)
    }

    /// Same bounds with a different step.
    pub fn step_by(self, step: usize) -> Self {
        Self { step, ..self }
    }

    /// Resolve against an axis of length `extent`: `(start, len, step)`.
    fn resolve(&self, axis: usize, extent: usize) -> Result<(usize, usize, usize)> {
        if self.step == 0 {
            return Err(ArrayError::InvalidSliceStep);
        }
        let stop = self.stop.unwrap_or(extent);
        if self.start > extent {
            return Err(ArrayError::IndexOverflow {
                axis,
                index: self.start,
                extent,
            });
        }
        if stop > extent {
            return Err(ArrayError::IndexOverflow {
                axis,
                index: stop,
                extent,
            });
        }
        let len = stop.saturating_sub(self.start).div_ceil(self.step);
        Ok((self.start, len, self.step))
    }
}

impl Default for Slice {
    fn default() -> Self {
        Self::full()
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

impl From<Range<usize>> for Slice {
    fn from(r: Range<usize>) -> Self {
        Self::new(r.start, Some(r.end), 1)
    }
}

impl From<RangeFrom<usize>> for Slice {
    fn from(r: RangeFrom<usize>) -> Self {
        Self::new(r.start, None, 1)
    }
}

impl From<RangeTo<usize>> for Slice {
    fn from(r: RangeTo<usize>) -> Self {
        Self::new(0, Some(r.end), 1)
    }
}

impl From<RangeInclusive<usize>> for Slice {
    fn from(r: RangeInclusive<usize>) -> Self {
        Self::new(*r.start(), Some(r.end().saturating_add(1)), 1)
    }
}

impl From<RangeToInclusive<usize>> for Slice {
    fn from(r: RangeToInclusive<usize>) -> Self {
        Self::new(0, Some(r.end.saturating_add(1)), 1)
    }
}

impl From<usize> for Slice {
    fn from(i: usize) -> Self {
        Self::new(i, Some(i.saturating_add(1)), 1)
    }
}

/// Apply `slice` to `axis` of `layout`.
fn slice_layout<const N: usize>(
    layout: &Layout<N>,
    axis: usize,
    slice: &Slice,
) -> Result<Layout<N>> {
    if axis >= N {
        return Err(ArrayError::InvalidAxis { axis, rank: N });
    }
    let (start, len, step) = slice.resolve(axis, layout.shape()[axis])?;
    let mut shape = *layout.shape();
    let mut strides = *layout.strides();
    let offset = if len == 0 {
        layout.offset()
    } else {
        layout.offset() + start * strides[axis]
    };
    shape[axis] = len;
    // A single selected index never moves along the axis.
    if len > 1 {
        strides[axis] = strides[axis]
            .checked_mul(step)
            .ok_or(ArrayError::IndexOverflow {
                axis,
                index: step,
                extent: shape[axis],
            })?;
    }
    Ok(Layout::new(shape, strides, offset))
}

fn slice_all<const N: usize>(layout: &Layout<N>, slices: &[Slice; N]) -> Result<Layout<N>> {
    let mut out = *layout;
    for (axis, slice) in slices.iter().enumerate() {
        out = slice_layout(&out, axis, slice)?;
    }
    Ok(out)
}

impl<S: Storage, const N: usize> ArrayBase<S, N> {
    /// View a range of one axis, keeping the rank.
    ///
    /// # Errors
    /// - [`ArrayError::InvalidAxis`] if `axis >= N`
    /// - [`ArrayError::InvalidSliceStep`] if the step is zero
    /// - [`ArrayError::IndexOverflow`] if start or stop lie beyond the axis
    pub fn slice_axis(
        &self,
        axis: usize,
        slice: impl Into<Slice>,
    ) -> Result<ArrayView<'_, S::Elem, N>> {
        let layout = slice_layout(&self.layout, axis, &slice.into())?;
        debug_assert!(layout.fits_within(self.storage.as_slice().len()));
        Ok(ArrayBase::from_parts(View::new(self.storage.as_slice()), layout))
    }

    /// View a range of every axis at once, keeping the rank.
    ///
    /// # Errors
    /// As for [`ArrayBase::slice_axis`], on the first failing axis.
    pub fn slice(&self, slices: [Slice; N]) -> Result<ArrayView<'_, S::Elem, N>> {
        let layout = slice_all(&self.layout, &slices)?;
        Ok(ArrayBase::from_parts(View::new(self.storage.as_slice()), layout))
    }
}

impl<S: StorageMut, const N: usize> ArrayBase<S, N> {
    /// Mutable version of [`ArrayBase::slice_axis`].
    pub fn slice_axis_mut(
        &mut self,
        axis: usize,
        slice: impl Into<Slice>,
    ) -> Result<ArrayViewMut<'_, S::Elem, N>> {
        let layout = slice_layout(&self.layout, axis, &slice.into())?;
        Ok(ArrayBase::from_parts(
            ViewMut::new(self.storage.as_mut_slice()),
            layout,
        ))
    }

    /// Mutable version of [`ArrayBase::slice`].
    ///
    /// ```rust
    /// use multi_array::{Array, Slice};
    ///
    /// let mut board = Array::from_elem([4, 4], 1);
    /// board.slice_mut([Slice::from(1..3), Slice::from(1..3)]).unwrap().fill(0);
    /// assert_eq!(board.to_vec(), vec![1, 1, 1, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 1, 1, 1]);
    /// ```
    pub fn slice_mut(&mut self, slices: [Slice; N]) -> Result<ArrayViewMut<'_, S::Elem, N>> {
        let layout = slice_all(&self.layout, &slices)?;
        Ok(ArrayBase::from_parts(
            ViewMut::new(self.storage.as_mut_slice()),
            layout,
        ))
    }
}

impl<'a, T, const N: usize> ArrayView<'a, T, N> {
    /// Consuming [`ArrayBase::slice_axis`] that keeps the parent borrow.
    pub fn slice_axis_move(self, axis: usize, slice: impl Into<Slice>) -> Result<Self> {
        let layout = slice_layout(&self.layout, axis, &slice.into())?;
        Ok(ArrayBase::from_parts(self.storage, layout))
    }
}

impl<'a, T, const N: usize> ArrayViewMut<'a, T, N> {
    /// Consuming [`ArrayBase::slice_axis_mut`] that keeps the parent borrow.
    pub fn slice_axis_move(self, axis: usize, slice: impl Into<Slice>) -> Result<Self> {
        let layout = slice_layout(&self.layout, axis, &slice.into())?;
        Ok(ArrayBase::from_parts(self.storage, layout))
    }
}

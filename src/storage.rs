//! Storage policies backing [`ArrayBase`](crate::ArrayBase).
//!
//! - [`Owned`]: the array holds its buffer by value. Exactly one owner exists
//!   per buffer.
//! - [`View`]: shared borrow of a buffer owned elsewhere (read-only).
//! - [`ViewMut`]: exclusive borrow of a buffer owned elsewhere (read/write).
//!
//! All three expose the whole underlying buffer; the paired
//! [`Layout`](crate::Layout) decides which positions are addressed. View
//! lifetimes are tied to the owner by the borrow checker, and `ViewMut` holds
//! `&mut [T]`, so at most one writer exists at a time.

use crate::index::Layout;
use tracing::trace;

/// Read access to a flat element buffer.
pub trait Storage {
    type Elem;

    /// The complete underlying buffer.
    fn as_slice(&self) -> &[Self::Elem];

    /// Gather the elements addressed by `layout` into a fresh contiguous
    /// buffer, in row-major index order.
    fn materialize<const N: usize>(&self, layout: &Layout<N>) -> Vec<Self::Elem>
    where
        Self::Elem: Clone,
    {
        let data = self.as_slice();
        debug_assert!(layout.fits_within(data.len()));
        let len = layout.size();
        if len == 0 {
            return Vec::new();
        }
        if layout.is_contiguous() {
            trace!(len, offset = layout.offset(), "materialize: contiguous fast path");
            let start = layout.offset();
            return data[start..start + len].to_vec();
        }
        trace!(
            len,
            shape = ?layout.shape(),
            strides = ?layout.strides(),
            offset = layout.offset(),
            "materialize: strided gather"
        );
        layout
            .positions()
            .map(|(_, pos)| data[pos].clone())
            .collect()
    }
}

/// Write access to a flat element buffer.
pub trait StorageMut: Storage {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];
}

/// Buffer held by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owned<T> {
    data: Vec<T>,
}

impl<T> Owned<T> {
    pub(crate) fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Storage for Owned<T> {
    type Elem = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> StorageMut for Owned<T> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

/// Shared borrow of a buffer owned elsewhere.
#[derive(Debug)]
pub struct View<'a, T> {
    data: &'a [T],
}

impl<'a, T> View<'a, T> {
    pub(crate) fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    /// The borrowed buffer with the full borrow lifetime.
    #[inline]
    pub(crate) fn slice(&self) -> &'a [T] {
        self.data
    }
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for View<'_, T> {}

impl<T> Storage for View<'_, T> {
    type Elem = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        self.data
    }
}

/// Exclusive borrow of a buffer owned elsewhere.
#[derive(Debug)]
pub struct ViewMut<'a, T> {
    data: &'a mut [T],
}

impl<'a, T> ViewMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T]) -> Self {
        Self { data }
    }

    /// Give up the view, keeping the borrow for the full lifetime.
    #[inline]
    pub(crate) fn into_slice(self) -> &'a mut [T] {
        self.data
    }
}

impl<T> Storage for ViewMut<'_, T> {
    type Elem = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        self.data
    }
}

impl<T> StorageMut for ViewMut<'_, T> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_materialize_copies_everything() {
        let owned = Owned::new(vec![1, 2, 3, 4, 5, 6]);
        let layout = Layout::row_major([2, 3]);
        assert_eq!(owned.materialize(&layout), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_view_materialize_contiguous_window() {
        let data = [0, 1, 2, 3, 4, 5, 6, 7];
        let view = View::new(&data);
        // second row of a 2x4 matrix
        let layout = Layout::new([4], [1], 4);
        assert_eq!(view.materialize(&layout), vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_view_materialize_strided_gather() {
        let data: Vec<i32> = (0..12).collect();
        let view = View::new(&data);
        // column 1 of a 3x4 matrix, then every second row of that
        let column = Layout::new([3], [4], 1);
        assert_eq!(view.materialize(&column), vec![1, 5, 9]);
        let stepped = Layout::new([2, 2], [8, 2], 0);
        assert_eq!(view.materialize(&stepped), vec![0, 2, 8, 10]);
    }

    #[test]
    fn test_materialize_empty() {
        let data = [1.0f64, 2.0];
        let view = View::new(&data);
        assert!(view.materialize(&Layout::new([0, 2], [2, 1], 0)).is_empty());
    }

    #[test]
    fn test_view_mut_writes_through() {
        let mut data = vec![0u8; 4];
        {
            let mut view = ViewMut::new(&mut data);
            view.as_mut_slice()[2] = 9;
        }
        assert_eq!(data, vec![0, 0, 9, 0]);
    }
}

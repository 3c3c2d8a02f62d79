//! The array engine: [`ArrayBase`] and its owned/borrowed flavours.

use crate::index::{Layout, Positions};
use crate::storage::{Owned, Storage, StorageMut, View, ViewMut};
use crate::{ArrayError, Result};
use num_traits::{AsPrimitive, One, Zero};
use std::fmt;
use std::ops::{Index, IndexMut};
use tracing::debug;

/// An N-dimensional array over the storage policy `S`.
///
/// # Type Parameters
/// - `S`: Storage policy ([`Owned`], [`View`] or [`ViewMut`])
/// - `N`: Number of dimensions (const generic, at least 1)
///
/// Owned arrays always have canonical row-major strides and a zero offset, so
/// their buffer length equals the product of their extents. Views may carry
/// any strides and offset that stay inside the borrowed buffer.
#[derive(Clone, Copy)]
pub struct ArrayBase<S, const N: usize> {
    pub(crate) storage: S,
    pub(crate) layout: Layout<N>,
}

/// An owned array.
pub type Array<T, const N: usize> = ArrayBase<Owned<T>, N>;

/// A read-only view into another array's buffer.
pub type ArrayView<'a, T, const N: usize> = ArrayBase<View<'a, T>, N>;

/// A read/write view into another array's buffer.
pub type ArrayViewMut<'a, T, const N: usize> = ArrayBase<ViewMut<'a, T>, N>;

impl<S, const N: usize> ArrayBase<S, N> {
    #[inline]
    pub(crate) fn from_parts(storage: S, layout: Layout<N>) -> Self {
        Self { storage, layout }
    }

    /// Returns the extent of each axis.
    #[inline]
    pub fn shape(&self) -> &[usize; N] {
        self.layout.shape()
    }

    /// Returns the stride of each axis, in elements.
    #[inline]
    pub fn strides(&self) -> &[usize; N] {
        self.layout.strides()
    }

    /// Returns the starting position within the buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    /// Returns shape, strides and offset together.
    #[inline]
    pub fn layout(&self) -> &Layout<N> {
        &self.layout
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Returns the number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        N
    }

    /// Returns true if any axis has extent 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }
}

// ============================================================================
// Owned construction
// ============================================================================

impl<T, const N: usize> Array<T, N> {
    /// Wrap `data` as an array of the given shape.
    ///
    /// # Errors
    /// [`ArrayError::ShapeMismatch`] if `data.len()` differs from the number
    /// of elements `shape` addresses.
    pub fn from_vec(shape: [usize; N], data: Vec<T>) -> Result<Self> {
        let layout = Layout::row_major(shape);
        if layout.size() != data.len() {
            return Err(ArrayError::ShapeMismatch(shape.to_vec(), vec![data.len()]));
        }
        Ok(Self::from_parts(Owned::new(data), layout))
    }

    /// Build an array by calling `f` with every multi-index in row-major
    /// order.
    pub fn from_shape_fn(shape: [usize; N], mut f: impl FnMut([usize; N]) -> T) -> Self {
        let layout = Layout::row_major(shape);
        let data: Vec<T> = layout.positions().map(|(index, _)| f(index)).collect();
        Self::from_parts(Owned::new(data), layout)
    }

    /// Returns the buffer in row-major order.
    pub fn into_raw_vec(self) -> Vec<T> {
        self.storage.into_vec()
    }

    /// Relabel the buffer with a new shape of any rank.
    ///
    /// No element moves: row-major order over the old shape is row-major
    /// order over the new one.
    ///
    /// # Errors
    /// [`ArrayError::ShapeMismatch`] if the element counts differ.
    pub fn into_shape<const M: usize>(self, shape: [usize; M]) -> Result<Array<T, M>> {
        let layout = self.layout.with_shape(shape)?;
        debug!(from = ?self.layout.shape(), to = ?shape, "into_shape");
        Ok(ArrayBase::from_parts(self.storage, layout))
    }

    /// Change the shape in place, keeping the rank.
    ///
    /// # Errors
    /// [`ArrayError::ShapeMismatch`] if the element counts differ; the array
    /// is left unchanged.
    pub fn set_shape(&mut self, shape: [usize; N]) -> Result<()> {
        let layout = self.layout.with_shape(shape)?;
        debug!(from = ?self.layout.shape(), to = ?shape, "set_shape");
        self.layout = layout;
        Ok(())
    }
}

impl<T: Clone, const N: usize> Array<T, N> {
    /// Create an array with every element set to `value`.
    pub fn from_elem(shape: [usize; N], value: T) -> Self {
        let layout = Layout::row_major(shape);
        Self::from_parts(Owned::new(vec![value; layout.size()]), layout)
    }

    /// Copy `data` into a new array of the given shape.
    ///
    /// # Errors
    /// [`ArrayError::ShapeMismatch`] if `data.len()` differs from the number
    /// of elements `shape` addresses.
    pub fn from_slice(shape: [usize; N], data: &[T]) -> Result<Self> {
        let layout = Layout::row_major(shape);
        if layout.size() != data.len() {
            return Err(ArrayError::ShapeMismatch(shape.to_vec(), vec![data.len()]));
        }
        Ok(Self::from_parts(Owned::new(data.to_vec()), layout))
    }
}

impl<T: Clone + Zero, const N: usize> Array<T, N> {
    /// Create an array filled with zeros.
    pub fn zeros(shape: [usize; N]) -> Self {
        Self::from_elem(shape, T::zero())
    }
}

impl<T: Clone + One, const N: usize> Array<T, N> {
    /// Create an array filled with ones.
    pub fn ones(shape: [usize; N]) -> Self {
        Self::from_elem(shape, T::one())
    }
}

// ============================================================================
// Read access (any storage)
// ============================================================================

impl<S: Storage, const N: usize> ArrayBase<S, N> {
    /// Borrow the whole array as a read-only view.
    #[inline]
    pub fn view(&self) -> ArrayView<'_, S::Elem, N> {
        ArrayBase::from_parts(View::new(self.storage.as_slice()), self.layout)
    }

    /// Get the element at `index`.
    ///
    /// # Errors
    /// [`ArrayError::IndexOverflow`] if any component is out of range.
    #[inline]
    pub fn get(&self, index: [usize; N]) -> Result<&S::Elem> {
        let pos = self.layout.position(&index)?;
        Ok(&self.storage.as_slice()[pos])
    }

    /// Get the element at `index` without bounds checking.
    ///
    /// # Safety
    /// Every component of `index` must be below the extent of its axis.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: [usize; N]) -> &S::Elem {
        let pos = self.layout.position_unchecked(&index);
        self.storage.as_slice().get_unchecked(pos)
    }

    /// Returns an iterator over the elements in row-major order.
    pub fn iter(&self) -> Iter<'_, S::Elem, N> {
        Iter {
            data: self.storage.as_slice(),
            positions: self.layout.positions(),
        }
    }

    /// Returns an iterator that yields `(index, &element)` pairs in
    /// row-major order.
    pub fn indexed_iter(&self) -> IndexedIter<'_, S::Elem, N> {
        IndexedIter {
            data: self.storage.as_slice(),
            positions: self.layout.positions(),
        }
    }
}

impl<S, const N: usize> ArrayBase<S, N>
where
    S: Storage,
    S::Elem: Clone,
{
    /// Returns the elements in row-major order.
    pub fn to_vec(&self) -> Vec<S::Elem> {
        self.storage.materialize(&self.layout)
    }

    /// Copy into a new owned array with an independent buffer.
    ///
    /// Views gather their elements; the result is always contiguous.
    pub fn to_owned(&self) -> Array<S::Elem, N> {
        ArrayBase::from_parts(Owned::new(self.to_vec()), Layout::row_major(*self.shape()))
    }

    /// Copy into a rank-1 array in row-major order.
    pub fn flatten(&self) -> Array<S::Elem, 1> {
        let data = self.to_vec();
        ArrayBase::from_parts(Owned::new(data), Layout::row_major([self.size()]))
    }

    /// Copy into a new owned array of a different shape.
    ///
    /// The row-major sequence of elements is preserved.
    ///
    /// # Errors
    /// [`ArrayError::ShapeMismatch`] if the element counts differ.
    pub fn reshape<const M: usize>(&self, shape: [usize; M]) -> Result<Array<S::Elem, M>> {
        let layout = Layout::row_major(*self.shape()).with_shape(shape)?;
        debug!(from = ?self.shape(), to = ?shape, "reshape (copy)");
        Ok(ArrayBase::from_parts(Owned::new(self.to_vec()), layout))
    }
}

impl<S, const N: usize> ArrayBase<S, N>
where
    S: Storage,
    S::Elem: Copy + 'static,
{
    /// Convert every element with `as` semantics.
    ///
    /// ```rust
    /// use multi_array::Array;
    ///
    /// let a = Array::from_vec([3], vec![1.7, -2.2, 3.0]).unwrap();
    /// assert_eq!(a.cast::<i32>().to_vec(), vec![1, -2, 3]);
    /// ```
    pub fn cast<U>(&self) -> Array<U, N>
    where
        S::Elem: AsPrimitive<U>,
        U: Copy + 'static,
    {
        let data: Vec<U> = self.iter().map(|&x| x.as_()).collect();
        ArrayBase::from_parts(Owned::new(data), Layout::row_major(*self.shape()))
    }
}

// ============================================================================
// Write access (owned arrays and mutable views)
// ============================================================================

impl<S: StorageMut, const N: usize> ArrayBase<S, N> {
    /// Borrow the whole array as a read/write view.
    #[inline]
    pub fn view_mut(&mut self) -> ArrayViewMut<'_, S::Elem, N> {
        ArrayBase::from_parts(ViewMut::new(self.storage.as_mut_slice()), self.layout)
    }

    /// Get a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// [`ArrayError::IndexOverflow`] if any component is out of range.
    #[inline]
    pub fn get_mut(&mut self, index: [usize; N]) -> Result<&mut S::Elem> {
        let pos = self.layout.position(&index)?;
        Ok(&mut self.storage.as_mut_slice()[pos])
    }

    /// Get a mutable reference without bounds checking.
    ///
    /// # Safety
    /// Every component of `index` must be below the extent of its axis.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: [usize; N]) -> &mut S::Elem {
        let pos = self.layout.position_unchecked(&index);
        self.storage.as_mut_slice().get_unchecked_mut(pos)
    }

    /// Call `f` on every addressed element, in row-major order.
    pub fn map_inplace(&mut self, mut f: impl FnMut(&mut S::Elem)) {
        let data = self.storage.as_mut_slice();
        if self.layout.is_contiguous() {
            let start = self.layout.offset();
            let len = self.layout.size();
            if len > 0 {
                data[start..start + len].iter_mut().for_each(f);
            }
            return;
        }
        for (_, pos) in self.layout.positions() {
            f(&mut data[pos]);
        }
    }

    /// Set every addressed element to `value`.
    ///
    /// For a view this writes through to the owner's buffer.
    pub fn fill(&mut self, value: S::Elem)
    where
        S::Elem: Clone,
    {
        self.map_inplace(|x| *x = value.clone());
    }

    /// Copy `other` element-wise into the addressed positions.
    ///
    /// # Errors
    /// [`ArrayError::ShapeMismatch`] if the shapes differ; nothing is written.
    pub fn assign<S2>(&mut self, other: &ArrayBase<S2, N>) -> Result<()>
    where
        S2: Storage<Elem = S::Elem>,
        S::Elem: Clone,
    {
        self.zip_mut_with(other, |dst, src| *dst = src.clone())
    }
}

impl<S: Storage, const N: usize> Index<[usize; N]> for ArrayBase<S, N> {
    type Output = S::Elem;

    /// # Panics
    /// Panics if the index is out of bounds.
    #[inline]
    fn index(&self, index: [usize; N]) -> &S::Elem {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<S: StorageMut, const N: usize> IndexMut<[usize; N]> for ArrayBase<S, N> {
    #[inline]
    fn index_mut(&mut self, index: [usize; N]) -> &mut S::Elem {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// Iterator over the elements of an array in row-major order.
pub struct Iter<'a, T, const N: usize> {
    data: &'a [T],
    positions: Positions<N>,
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let (_, pos) = self.positions.next()?;
        Some(&self.data[pos])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

/// Iterator that yields `(index, &element)` pairs in row-major order.
pub struct IndexedIter<'a, T, const N: usize> {
    data: &'a [T],
    positions: Positions<N>,
}

impl<'a, T, const N: usize> Iterator for IndexedIter<'a, T, N> {
    type Item = ([usize; N], &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (index, pos) = self.positions.next()?;
        Some((index, &self.data[pos]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<T, const N: usize> ExactSizeIterator for IndexedIter<'_, T, N> {}

impl<'a, S: Storage, const N: usize> IntoIterator for &'a ArrayBase<S, N> {
    type Item = &'a S::Elem;
    type IntoIter = Iter<'a, S::Elem, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for ArrayView<'a, T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            data: self.storage.slice(),
            positions: self.layout.positions(),
        }
    }
}

// ============================================================================
// Comparison and debug output
// ============================================================================

impl<S, S2, const N: usize> PartialEq<ArrayBase<S2, N>> for ArrayBase<S, N>
where
    S: Storage,
    S2: Storage,
    S::Elem: PartialEq<S2::Elem>,
{
    /// Arrays are equal when their shapes match and their elements match in
    /// row-major order; strides and offsets are irrelevant.
    fn eq(&self, other: &ArrayBase<S2, N>) -> bool {
        self.shape() == other.shape() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<S, const N: usize> Eq for ArrayBase<S, N>
where
    S: Storage,
    S::Elem: Eq,
{
}

impl<S, const N: usize> fmt::Debug for ArrayBase<S, N>
where
    S: Storage,
    S::Elem: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayBase")
            .field("shape", self.shape())
            .field("strides", self.strides())
            .field("offset", &self.offset())
            .field("elements", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

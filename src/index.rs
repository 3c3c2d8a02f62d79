//! Shape, stride and offset arithmetic.
//!
//! Everything in this module is pure metadata: nothing here touches element
//! data. A [`Layout`] describes how an N-dimensional index space maps onto a
//! flat buffer:
//!
//! ```text
//! position(index) = offset + sum_i strides[i] * index[i]
//! ```
//!
//! Owned arrays always carry canonical row-major strides and a zero offset.
//! Views carry whatever their parent produced (shifted offsets, dropped axes,
//! multiplied strides for step slices).

use crate::{ArrayError, Result};

/// Total number of elements addressed by `shape`.
///
/// Any zero extent yields 0.
#[inline]
pub fn size<const N: usize>(shape: &[usize; N]) -> usize {
    shape.iter().product()
}

/// Compute row-major strides (C order: last index varies fastest).
///
/// `strides[N - 1] = 1` and `strides[i] = strides[i + 1] * shape[i + 1]`.
pub fn row_major_strides<const N: usize>(shape: &[usize; N]) -> [usize; N] {
    let mut strides = [1usize; N];
    for i in (0..N.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Map a multi-index onto a buffer position.
///
/// With `checked` set, fails with [`ArrayError::IndexOverflow`] on the first
/// axis where `index[i] >= shape[i]`.
#[inline]
pub fn flatten<const N: usize>(
    shape: &[usize; N],
    strides: &[usize; N],
    offset: usize,
    index: &[usize; N],
    checked: bool,
) -> Result<usize> {
    let mut pos = offset;
    for axis in 0..N {
        if checked && index[axis] >= shape[axis] {
            return Err(ArrayError::IndexOverflow {
                axis,
                index: index[axis],
                extent: shape[axis],
            });
        }
        pos += strides[axis] * index[axis];
    }
    Ok(pos)
}

/// Shape, strides and offset of an N-dimensional index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout<const N: usize> {
    shape: [usize; N],
    strides: [usize; N],
    offset: usize,
}

impl<const N: usize> Layout<N> {
    /// Canonical row-major layout with zero offset.
    pub fn row_major(shape: [usize; N]) -> Self {
        Self {
            strides: row_major_strides(&shape),
            shape,
            offset: 0,
        }
    }

    /// Layout with explicit strides and offset.
    ///
    /// Callers are responsible for keeping every reachable position inside
    /// the buffer the layout is paired with; see [`Layout::fits_within`].
    pub(crate) fn new(shape: [usize; N], strides: [usize; N], offset: usize) -> Self {
        Self {
            shape,
            strides,
            offset,
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize; N] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[usize; N] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn size(&self) -> usize {
        size(&self.shape)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.contains(&0)
    }

    /// Bounds-checked buffer position of `index`.
    #[inline]
    pub fn position(&self, index: &[usize; N]) -> Result<usize> {
        flatten(&self.shape, &self.strides, self.offset, index, true)
    }

    /// Buffer position of `index` without bounds checking.
    #[inline]
    pub(crate) fn position_unchecked(&self, index: &[usize; N]) -> usize {
        let mut pos = self.offset;
        for axis in 0..N {
            pos += self.strides[axis] * index[axis];
        }
        pos
    }

    /// Whether the layout addresses one dense row-major run of the buffer.
    ///
    /// Axes of extent 1 are ignored since their stride is never applied.
    pub fn is_contiguous(&self) -> bool {
        let mut expected = 1usize;
        for axis in (0..N).rev() {
            if self.shape[axis] <= 1 {
                continue;
            }
            if self.strides[axis] != expected {
                return false;
            }
            expected *= self.shape[axis];
        }
        true
    }

    /// Largest buffer position reachable through this layout, or `None` for
    /// an empty index space.
    pub fn max_position(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let mut pos = self.offset;
        for axis in 0..N {
            pos += self.strides[axis] * (self.shape[axis] - 1);
        }
        Some(pos)
    }

    /// Whether every reachable position is `< len`.
    pub fn fits_within(&self, len: usize) -> bool {
        match self.max_position() {
            None => true,
            Some(max) => max < len,
        }
    }

    /// Iterator over buffer positions in row-major index order.
    pub fn positions(&self) -> Positions<N> {
        Positions {
            layout: *self,
            index: [0; N],
            remaining: self.size(),
        }
    }

    /// Replace the shape, keeping canonical row-major strides.
    ///
    /// Only meaningful for owned (contiguous, zero-offset) layouts.
    pub(crate) fn with_shape<const M: usize>(&self, shape: [usize; M]) -> Result<Layout<M>> {
        if size(&shape) != self.size() {
            return Err(ArrayError::ShapeMismatch(self.shape.to_vec(), shape.to_vec()));
        }
        Ok(Layout::row_major(shape))
    }
}

/// Row-major iterator over the buffer positions of a [`Layout`].
///
/// Yields `(index, position)` pairs; the multi-index is advanced with the
/// last axis varying fastest.
#[derive(Debug, Clone)]
pub struct Positions<const N: usize> {
    layout: Layout<N>,
    index: [usize; N],
    remaining: usize,
}

impl<const N: usize> Iterator for Positions<N> {
    type Item = ([usize; N], usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.index;
        let pos = self.layout.position_unchecked(&current);
        self.remaining -= 1;

        for axis in (0..N).rev() {
            self.index[axis] += 1;
            if self.index[axis] < self.layout.shape[axis] {
                break;
            }
            self.index[axis] = 0;
        }

        Some((current, pos))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const N: usize> ExactSizeIterator for Positions<N> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(size(&[2, 3, 4]), 24);
        assert_eq!(size(&[5]), 5);
        assert_eq!(size(&[3, 0, 2]), 0);
    }

    #[test]
    fn test_row_major_strides() {
        assert_eq!(row_major_strides(&[2, 3, 4]), [12, 4, 1]);
        assert_eq!(row_major_strides(&[7]), [1]);
        assert_eq!(row_major_strides(&[4, 1, 5]), [5, 5, 1]);
    }

    #[test]
    fn test_flatten_checked() {
        let shape = [2, 3];
        let strides = row_major_strides(&shape);
        assert_eq!(flatten(&shape, &strides, 0, &[1, 2], true).unwrap(), 5);
        assert_eq!(flatten(&shape, &strides, 10, &[1, 0], true).unwrap(), 13);

        let err = flatten(&shape, &strides, 0, &[0, 3], true).unwrap_err();
        assert!(matches!(
            err,
            ArrayError::IndexOverflow {
                axis: 1,
                index: 3,
                extent: 3
            }
        ));
    }

    #[test]
    fn test_flatten_unchecked_skips_bounds() {
        let shape = [2, 3];
        let strides = row_major_strides(&shape);
        assert_eq!(flatten(&shape, &strides, 0, &[0, 4], false).unwrap(), 4);
    }

    #[test]
    fn test_is_contiguous() {
        assert!(Layout::row_major([2, 3]).is_contiguous());
        // every second column
        assert!(!Layout::new([2, 2], [3, 2], 0).is_contiguous());
        // a single row of a larger matrix is still one dense run
        assert!(Layout::new([1, 3], [3, 1], 3).is_contiguous());
    }

    #[test]
    fn test_fits_within() {
        let layout = Layout::new([2, 2], [4, 2], 1);
        assert_eq!(layout.max_position(), Some(7));
        assert!(layout.fits_within(8));
        assert!(!layout.fits_within(7));
        assert!(Layout::<2>::new([0, 5], [5, 1], 100).fits_within(0));
    }

    #[test]
    fn test_positions_row_major() {
        let layout = Layout::new([2, 2], [1, 2], 0);
        let positions: Vec<usize> = layout.positions().map(|(_, p)| p).collect();
        assert_eq!(positions, vec![0, 2, 1, 3]);

        let indices: Vec<[usize; 2]> = layout.positions().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![[0, 0], [0, 1], [1, 0], [1, 1]]);
    }

    #[test]
    fn test_positions_empty() {
        let layout = Layout::row_major([3, 0]);
        assert_eq!(layout.positions().count(), 0);
        assert_eq!(layout.positions().len(), 0);
    }

    #[test]
    fn test_with_shape() {
        let layout = Layout::row_major([2, 3]);
        let reshaped = layout.with_shape([3, 2]).unwrap();
        assert_eq!(reshaped.strides(), &[2, 1]);
        assert!(layout.with_shape([4, 2]).is_err());
    }
}

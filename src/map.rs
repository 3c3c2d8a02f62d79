//! Elementwise map primitives.
//!
//! Every arithmetic operator and math function in this crate is a thin
//! instantiation of [`map`], [`zip_map`] or [`ArrayBase::zip_mut_with`].
//! Results are always new owned arrays with canonical strides; only
//! `zip_mut_with` writes in place.

use crate::array::{Array, ArrayBase};
use crate::index::Layout;
use crate::storage::{Owned, Storage, StorageMut};
use crate::{ArrayError, Result};
use tracing::trace;

pub(crate) fn ensure_same_shape<const N: usize>(a: &[usize; N], b: &[usize; N]) -> Result<()> {
    if a != b {
        return Err(ArrayError::ShapeMismatch(a.to_vec(), b.to_vec()));
    }
    Ok(())
}

/// Contiguous run of the buffer addressed by `layout`, if it has one.
#[inline]
fn contiguous_run<'a, T, const N: usize>(data: &'a [T], layout: &Layout<N>) -> Option<&'a [T]> {
    if !layout.is_contiguous() {
        return None;
    }
    let start = layout.offset();
    let len = layout.size();
    if len == 0 {
        return Some(&[]);
    }
    Some(&data[start..start + len])
}

impl<S: Storage, const N: usize> ArrayBase<S, N> {
    /// Apply `f` to every element, producing a new array of the same shape.
    pub fn map<U, F>(&self, mut f: F) -> Array<U, N>
    where
        F: FnMut(&S::Elem) -> U,
    {
        let data: Vec<U> = match contiguous_run(self.storage.as_slice(), &self.layout) {
            Some(run) => {
                trace!(len = run.len(), "map: contiguous fast path");
                run.iter().map(&mut f).collect()
            }
            None => {
                trace!(shape = ?self.shape(), strides = ?self.strides(), "map: strided path");
                self.iter().map(&mut f).collect()
            }
        };
        ArrayBase::from_parts(Owned::new(data), Layout::row_major(*self.shape()))
    }

    /// Apply `f` pairwise to `self` and `rhs`, producing a new array.
    ///
    /// # Errors
    /// [`ArrayError::ShapeMismatch`] unless both shapes are identical.
    pub fn zip_map<S2, U, F>(&self, rhs: &ArrayBase<S2, N>, mut f: F) -> Result<Array<U, N>>
    where
        S2: Storage,
        F: FnMut(&S::Elem, &S2::Elem) -> U,
    {
        ensure_same_shape(self.shape(), rhs.shape())?;
        let lhs_run = contiguous_run(self.storage.as_slice(), &self.layout);
        let rhs_run = contiguous_run(rhs.storage.as_slice(), &rhs.layout);
        let data: Vec<U> = match (lhs_run, rhs_run) {
            (Some(a), Some(b)) => {
                trace!(len = a.len(), "zip_map: contiguous fast path");
                a.iter().zip(b).map(|(x, y)| f(x, y)).collect()
            }
            _ => {
                trace!(shape = ?self.shape(), "zip_map: strided path");
                self.iter().zip(rhs.iter()).map(|(x, y)| f(x, y)).collect()
            }
        };
        Ok(ArrayBase::from_parts(
            Owned::new(data),
            Layout::row_major(*self.shape()),
        ))
    }
}

impl<S: StorageMut, const N: usize> ArrayBase<S, N> {
    /// Update every element of `self` from the matching element of `rhs`.
    ///
    /// For a view this writes through to the owner's buffer.
    ///
    /// # Errors
    /// [`ArrayError::ShapeMismatch`] unless both shapes are identical; nothing
    /// is written in that case.
    pub fn zip_mut_with<S2, F>(&mut self, rhs: &ArrayBase<S2, N>, mut f: F) -> Result<()>
    where
        S2: Storage,
        F: FnMut(&mut S::Elem, &S2::Elem),
    {
        ensure_same_shape(self.shape(), rhs.shape())?;
        let src = rhs.storage.as_slice();
        let dst = self.storage.as_mut_slice();
        for ((_, dst_pos), (_, src_pos)) in self.layout.positions().zip(rhs.layout.positions()) {
            f(&mut dst[dst_pos], &src[src_pos]);
        }
        Ok(())
    }
}

/// Apply `f` to every element of `a`.
///
/// Free-function form of [`ArrayBase::map`].
pub fn map<S, U, F, const N: usize>(a: &ArrayBase<S, N>, f: F) -> Array<U, N>
where
    S: Storage,
    F: FnMut(&S::Elem) -> U,
{
    a.map(f)
}

/// Apply `f` pairwise to `a` and `b`.
///
/// Free-function form of [`ArrayBase::zip_map`].
///
/// # Errors
/// [`ArrayError::ShapeMismatch`] unless both shapes are identical.
pub fn zip_map<SA, SB, U, F, const N: usize>(
    a: &ArrayBase<SA, N>,
    b: &ArrayBase<SB, N>,
    f: F,
) -> Result<Array<U, N>>
where
    SA: Storage,
    SB: Storage,
    F: FnMut(&SA::Elem, &SB::Elem) -> U,
{
    a.zip_map(b, f)
}

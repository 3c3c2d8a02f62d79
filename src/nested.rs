//! Construction from nested sequences.

use crate::array::{Array, ArrayBase};
use crate::index::Layout;
use crate::storage::Owned;
use crate::{ArrayError, Result};

/// Rank-1 owned copy of `data`.
///
/// ```rust
/// use multi_array::asarray;
///
/// let a = asarray(&[1, 2, 3]);
/// assert_eq!(a.shape(), &[3]);
/// ```
pub fn asarray<T: Clone>(data: &[T]) -> Array<T, 1> {
    Array::from(data)
}

impl<T: Clone> From<&[T]> for Array<T, 1> {
    fn from(data: &[T]) -> Self {
        Array::from(data.to_vec())
    }
}

impl<T> From<Vec<T>> for Array<T, 1> {
    fn from(data: Vec<T>) -> Self {
        let layout = Layout::row_major([data.len()]);
        ArrayBase::from_parts(Owned::new(data), layout)
    }
}

impl<T, const K: usize> From<[T; K]> for Array<T, 1> {
    fn from(data: [T; K]) -> Self {
        Array::from(Vec::from(data))
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Array<T, 2> {
    fn from(rows: [[T; C]; R]) -> Self {
        let data: Vec<T> = rows.into_iter().flatten().collect();
        ArrayBase::from_parts(Owned::new(data), Layout::row_major([R, C]))
    }
}

/// Check that every sequence at `depth` has length `expected`.
fn check_level<I>(depth: usize, expected: usize, lens: I) -> Result<()>
where
    I: IntoIterator<Item = usize>,
{
    for found in lens {
        if found != expected {
            return Err(ArrayError::IrregularShape {
                depth,
                expected,
                found,
            });
        }
    }
    Ok(())
}

impl<T> TryFrom<Vec<Vec<T>>> for Array<T, 2> {
    type Error = ArrayError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self> {
        let r = rows.len();
        let c = rows.first().map_or(0, Vec::len);
        check_level(1, c, rows.iter().map(Vec::len))?;
        let data: Vec<T> = rows.into_iter().flatten().collect();
        Array::from_vec([r, c], data)
    }
}

impl<T> TryFrom<Vec<Vec<Vec<T>>>> for Array<T, 3> {
    type Error = ArrayError;

    fn try_from(planes: Vec<Vec<Vec<T>>>) -> Result<Self> {
        let p = planes.len();
        let r = planes.first().map_or(0, Vec::len);
        check_level(1, r, planes.iter().map(Vec::len))?;
        let c = planes
            .first()
            .and_then(|plane| plane.first())
            .map_or(0, Vec::len);
        check_level(2, c, planes.iter().flatten().map(Vec::len))?;
        let data: Vec<T> = planes.into_iter().flatten().flatten().collect();
        Array::from_vec([p, r, c], data)
    }
}

impl<T> TryFrom<Vec<Vec<Vec<Vec<T>>>>> for Array<T, 4> {
    type Error = ArrayError;

    fn try_from(blocks: Vec<Vec<Vec<Vec<T>>>>) -> Result<Self> {
        let b = blocks.len();
        let p = blocks.first().map_or(0, Vec::len);
        check_level(1, p, blocks.iter().map(Vec::len))?;
        let r = blocks
            .first()
            .and_then(|block| block.first())
            .map_or(0, Vec::len);
        check_level(2, r, blocks.iter().flatten().map(Vec::len))?;
        let c = blocks
            .first()
            .and_then(|block| block.first())
            .and_then(|plane| plane.first())
            .map_or(0, Vec::len);
        check_level(3, c, blocks.iter().flatten().flatten().map(Vec::len))?;
        let data: Vec<T> = blocks.into_iter().flatten().flatten().flatten().collect();
        Array::from_vec([b, p, r, c], data)
    }
}

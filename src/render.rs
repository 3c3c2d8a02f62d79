//! Nested-bracket text form.
//!
//! ```text
//! [[1, 2, 3],
//!  [4, 5, 6]]
//! ```
//!
//! Each inner axis boundary closes its brackets, starts `N-1-j` new lines,
//! indents by `j+1` spaces and reopens the brackets, so higher ranks get a
//! blank line between blocks.

use crate::array::ArrayBase;
use crate::index::{row_major_strides, size};
use crate::storage::Storage;
use std::fmt::{self, Write};

fn repeat<W: Write>(out: &mut W, c: char, n: usize) -> fmt::Result {
    for _ in 0..n {
        out.write_char(c)?;
    }
    Ok(())
}

/// Walk `array` in row-major order, emitting brackets and separators and
/// delegating each element to `elem`.
fn write_nested<S, W, F, const N: usize>(
    array: &ArrayBase<S, N>,
    out: &mut W,
    mut elem: F,
) -> fmt::Result
where
    S: Storage,
    W: Write,
    F: FnMut(&mut W, &S::Elem) -> fmt::Result,
{
    let shape = array.shape();
    let total = size(shape);
    repeat(out, '[', N)?;
    if total == 0 {
        return repeat(out, ']', N);
    }
    let canonical = row_major_strides(shape);
    for (i, x) in array.iter().enumerate() {
        elem(out, x)?;
        let written = i + 1;
        if written == total {
            break;
        }
        match (0..N.saturating_sub(1)).find(|&j| written % canonical[j] == 0) {
            Some(j) => {
                let depth = N - 1 - j;
                repeat(out, ']', depth)?;
                out.write_char(',')?;
                repeat(out, '\n', depth)?;
                repeat(out, ' ', j + 1)?;
                repeat(out, '[', depth)?;
            }
            None => out.write_str(", ")?,
        }
    }
    repeat(out, ']', N)
}

/// Write the bracketed text form of `array` into `out`.
///
/// ```rust
/// use multi_array::{render, Array};
///
/// let a = Array::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
/// let mut s = String::new();
/// render(&a, &mut s).unwrap();
/// assert_eq!(s, "[[1, 2],\n [3, 4]]");
/// ```
pub fn render<S, W, const N: usize>(array: &ArrayBase<S, N>, out: &mut W) -> fmt::Result
where
    S: Storage,
    S::Elem: fmt::Display,
    W: Write,
{
    write_nested(array, out, |out, x| write!(out, "{x}"))
}

/// Formatter precision (`{:.3}`) applies to every element.
impl<S, const N: usize> fmt::Display for ArrayBase<S, N>
where
    S: Storage,
    S::Elem: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => {
                let mut buf = String::new();
                write_nested(self, &mut buf, |out, x| write!(out, "{x:.p$}"))?;
                f.write_str(&buf)
            }
            None => write_nested(self, f, |out, x| write!(out, "{x}")),
        }
    }
}

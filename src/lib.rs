//! Fixed-rank, row-major strided arrays with borrowed sub-views.
//!
//! An [`Array<T, N>`] owns a flat `Vec<T>` and describes it as an
//! N-dimensional, row-major index space. Indexing or slicing an array yields
//! an [`ArrayView`] / [`ArrayViewMut`] that borrows the owner's buffer with
//! its own shape, strides and offset. Views never copy and never outlive
//! their owner; writes through an [`ArrayViewMut`] land in the owner's
//! buffer.
//!
//! # Core Types
//!
//! - [`ArrayBase<S, N>`]: the array engine, generic over its [`Storage`]
//!   policy ([`Owned`], [`View`], [`ViewMut`]) and a const-generic rank `N`
//! - [`Array`], [`ArrayView`], [`ArrayViewMut`]: the three concrete flavours
//! - [`Layout`]: shape/strides/offset arithmetic
//! - [`Subscript`]: single-axis indexing, rank N -> rank N-1 (or an element
//!   reference at rank 1)
//! - [`Slice`]: `start..stop` with step, per axis
//!
//! # Elementwise Operations
//!
//! - Operators `+ - * /` between arrays of identical shape and between an
//!   array and a scalar, plus the compound assignment forms
//! - [`add`], [`sub`], [`mul`], [`div`]: fallible versions of the operators
//! - [`map`], [`zip_map`]: the primitives every math function is built on
//! - [`math`]: `exp`, `ln`, `sqrt`, trigonometric and hyperbolic functions,
//!   `powf`, `pow`, `atan2`
//! - [`dot`], [`sum`], [`outer`], [`linspace`], [`arange`], [`geomspace`]
//!
//! # Example
//!
//! ```rust
//! use multi_array::{Array, Subscript};
//!
//! let mut a = Array::from_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//!
//! // a[1] is a rank-1 view into the same buffer
//! let row = a.at(1).unwrap();
//! assert_eq!(row.to_vec(), vec![4.0, 5.0, 6.0]);
//!
//! // writing through a view mutates the owner
//! *a.at_mut(1).unwrap().subscript(1).unwrap() = 7.0;
//! assert_eq!(a[[1, 1]], 7.0);
//!
//! let b = &a * 2.0;
//! assert_eq!(b.to_string(), "[[2, 4, 6],\n [8, 14, 12]]");
//! ```
//!
//! # Slicing Example
//!
//! ```rust
//! use multi_array::{linspace, Slice};
//!
//! let board = linspace(1.0, 64.0, 64, true).unwrap().into_shape([8, 8]).unwrap();
//!
//! // four corner squares: every 7th row and column
//! let corners = board
//!     .slice([Slice::from(0..8).step_by(7), Slice::from(0..8).step_by(7)])
//!     .unwrap();
//! assert_eq!(corners.to_vec(), vec![1.0, 8.0, 57.0, 64.0]);
//! ```

#[cfg(feature = "approx")]
mod approx_impl;
mod array;
mod construct;
mod index;
mod linalg;
mod map;
pub mod math;
mod nested;
mod ops;
mod render;
mod slice;
mod storage;
mod subscript;

// ============================================================================
// Engine types
// ============================================================================
pub use array::{Array, ArrayBase, ArrayView, ArrayViewMut, IndexedIter, Iter};
pub use index::{flatten, row_major_strides, size, Layout, Positions};
pub use slice::Slice;
pub use storage::{Owned, Storage, StorageMut, View, ViewMut};
pub use subscript::Subscript;

// ============================================================================
// Construction helpers
// ============================================================================
pub use construct::{arange, geomspace, linspace};
pub use nested::asarray;

// ============================================================================
// Elementwise and reduction operations
// ============================================================================
pub use linalg::{dot, outer, sum};
pub use map::{map, zip_map};
pub use math::{vectorize, Vectorized};
pub use ops::{add, div, mul, sub, ScalarOperand};
pub use render::render;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during array operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArrayError {
    /// Array ranks do not match.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Array shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// An index is not below the extent of its axis.
    #[error("index overflow: index {index} on axis {axis} with extent {extent}")]
    IndexOverflow {
        axis: usize,
        index: usize,
        extent: usize,
    },

    /// Nested input is not rectangular.
    #[error("irregular shape at depth {depth}: expected length {expected}, found {found}")]
    IrregularShape {
        depth: usize,
        expected: usize,
        found: usize,
    },

    /// A slice step of zero.
    #[error("invalid slice step: step must be non-zero")]
    InvalidSliceStep,

    /// Invalid axis index for the given array rank.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// Range parameters that describe no sequence.
    #[error("invalid range: {0}")]
    InvalidRange(&'static str),

    /// Failed to convert a scalar value between numeric types.
    #[error("failed to convert scalar")]
    ScalarConversion,
}

/// Result type for array operations.
pub type Result<T> = std::result::Result<T, ArrayError>;

//! `approx` comparisons between arrays of any storage.
//!
//! Two arrays are close when their shapes are equal and every pair of
//! elements at the same multi-index is close.

use crate::array::ArrayBase;
use crate::storage::Storage;
use approx::{AbsDiffEq, RelativeEq, UlpsEq};

impl<S, S2, const N: usize> AbsDiffEq<ArrayBase<S2, N>> for ArrayBase<S, N>
where
    S: Storage,
    S2: Storage,
    S::Elem: AbsDiffEq<S2::Elem>,
    <S::Elem as AbsDiffEq<S2::Elem>>::Epsilon: Clone,
{
    type Epsilon = <S::Elem as AbsDiffEq<S2::Elem>>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        <S::Elem as AbsDiffEq<S2::Elem>>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &ArrayBase<S2, N>, epsilon: Self::Epsilon) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon.clone()))
    }
}

impl<S, S2, const N: usize> RelativeEq<ArrayBase<S2, N>> for ArrayBase<S, N>
where
    S: Storage,
    S2: Storage,
    S::Elem: RelativeEq<S2::Elem>,
    <S::Elem as AbsDiffEq<S2::Elem>>::Epsilon: Clone,
{
    fn default_max_relative() -> Self::Epsilon {
        <S::Elem as RelativeEq<S2::Elem>>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &ArrayBase<S2, N>,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon.clone(), max_relative.clone()))
    }
}

impl<S, S2, const N: usize> UlpsEq<ArrayBase<S2, N>> for ArrayBase<S, N>
where
    S: Storage,
    S2: Storage,
    S::Elem: UlpsEq<S2::Elem>,
    <S::Elem as AbsDiffEq<S2::Elem>>::Epsilon: Clone,
{
    fn default_max_ulps() -> u32 {
        <S::Elem as UlpsEq<S2::Elem>>::default_max_ulps()
    }

    fn ulps_eq(&self, other: &ArrayBase<S2, N>, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.ulps_eq(b, epsilon.clone(), max_ulps))
    }
}

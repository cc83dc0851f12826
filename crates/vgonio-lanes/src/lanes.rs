//! Selection of the memory layout of a vector from its lane count.
//!
//! A vector whose lane count is a power of two is stored in a *wide* layout:
//! it is aligned to its own size so that it can be moved in and out of SIMD
//! registers with aligned loads and stores. Every other lane count uses a
//! *sequential* layout with the natural alignment of the element type, which
//! is exactly an array `[T; N]`.
//!
//! The choice happens at the type level through [`SupportedLaneCount`],
//! implemented for [`LaneCount<N>`] with `N` in `1..=16`. A lane count of 0
//! has no implementation and fails to compile. [`Layout::select`] exposes the
//! same decision for lane counts only known at runtime.

use crate::{
    error::Error,
    scalar::{AlignMarker, Scalar, Sealed},
};
use std::mem::{align_of, size_of};

/// Memory layout of a fixed-size vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Power-of-two lane count; the vector is aligned to its total size.
    Wide,
    /// Any other lane count; the vector has the alignment of one element.
    Sequential,
}

impl Layout {
    /// Selects the layout used for a vector of `lanes` elements.
    ///
    /// Fails with [`Error::InvalidLength`] if `lanes` is zero.
    pub fn select(lanes: usize) -> Result<Self, Error> {
        if lanes == 0 {
            log::debug!("Rejecting vector layout for zero lanes");
            return Err(Error::InvalidLength(lanes));
        }
        let layout = Self::of(lanes);
        log::trace!("Selected {:?} layout for {} lanes", layout, lanes);
        Ok(layout)
    }

    /// Layout for a non-zero lane count.
    pub(crate) const fn of(lanes: usize) -> Self {
        if is_pow2(lanes) {
            Self::Wide
        } else {
            Self::Sequential
        }
    }

    /// Returns the size in bytes of a vector of `lanes` elements of type `T`
    /// stored with this layout.
    ///
    /// A wide vector occupies whole power-of-two lanes, so a lane count that
    /// [`Layout::select`] would lay out sequentially is rounded up here.
    pub const fn size_of<T: Scalar>(&self, lanes: usize) -> usize {
        match self {
            Self::Wide => next_pow2(lanes) * size_of::<T>(),
            Self::Sequential => lanes * size_of::<T>(),
        }
    }

    /// Returns the alignment in bytes of a vector of `lanes` elements of type
    /// `T` stored with this layout.
    pub const fn align_of<T: Scalar>(&self, lanes: usize) -> usize {
        match self {
            Self::Wide => next_pow2(lanes * size_of::<T>()),
            Self::Sequential => align_of::<T>(),
        }
    }
}

/// Returns true if `n` is a power of two. Zero is not.
pub const fn is_pow2(n: usize) -> bool { n != 0 && n & (n - 1) == 0 }

/// Returns the smallest power of two greater than or equal to `n`.
///
/// `next_pow2(0)` is 1.
pub const fn next_pow2(n: usize) -> usize { n.next_power_of_two() }

/// Type-level lane count.
pub struct LaneCount<const N: usize>;

/// Lane counts for which a vector type exists.
///
/// The trait is sealed; it is implemented for `LaneCount<1>` up to
/// `LaneCount<16>`. Other lane counts don't name a vector type:
///
/// ```compile_fail
/// let _ = lanes::Vector::<f32, 0>::zeros();
/// ```
///
/// ```compile_fail
/// let _ = lanes::Vector::<f32, 17>::zeros();
/// ```
pub trait SupportedLaneCount: Sealed {
    /// Number of lanes.
    const LANES: usize;
    /// Number of lanes rounded up to the next power of two.
    const PADDED_LANES: usize;
    /// Layout of vectors with this lane count.
    const LAYOUT: Layout;

    /// Alignment marker of a vector of this many `T`.
    type Align<T: Scalar>: AlignMarker;
}

macro_rules! impl_wide_lane_count {
    ($($n:literal => $align:ident),* $(,)?) => {
        $(
            impl Sealed for LaneCount<$n> {}

            impl SupportedLaneCount for LaneCount<$n> {
                const LANES: usize = $n;
                const PADDED_LANES: usize = $n;
                const LAYOUT: Layout = Layout::Wide;

                type Align<T: Scalar> = <T as Scalar>::$align;
            }
        )*
    };
}

macro_rules! impl_sequential_lane_count {
    ($($n:literal),* $(,)?) => {
        $(
            impl Sealed for LaneCount<$n> {}

            impl SupportedLaneCount for LaneCount<$n> {
                const LANES: usize = $n;
                const PADDED_LANES: usize = next_pow2($n);
                const LAYOUT: Layout = Layout::Sequential;

                type Align<T: Scalar> = T;
            }
        )*
    };
}

impl_wide_lane_count!(
    1 => AlignX1,
    2 => AlignX2,
    4 => AlignX4,
    8 => AlignX8,
    16 => AlignX16,
);

impl_sequential_lane_count!(3, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15);

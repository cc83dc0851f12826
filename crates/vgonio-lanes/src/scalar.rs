//! Scalar element types stored in the lanes of vectors and matrices.

use num_traits::{NumCast, One, Zero};
use std::{
    fmt::{Debug, Display},
    ops::{Add, Div, Mul, Rem, Sub},
};

mod sealed {
    pub trait Sealed {}
}
pub(crate) use sealed::Sealed;

macro_rules! align_markers {
    ($($name:ident => $n:literal),* $(,)?) => {
        $(
            #[doc = concat!("Zero-sized marker forcing an alignment of ", stringify!($n), " bytes.")]
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
            #[repr(align($n))]
            pub struct $name;

            impl Sealed for $name {}

            #[cfg(feature = "bytemuck")]
            unsafe impl bytemuck::Zeroable for $name {}

            #[cfg(feature = "bytemuck")]
            unsafe impl bytemuck::Pod for $name {}
        )*
    };
}

align_markers!(
    Align1 => 1,
    Align2 => 2,
    Align4 => 4,
    Align8 => 8,
    Align16 => 16,
    Align32 => 32,
    Align64 => 64,
    Align128 => 128,
);

/// Alignment marker types.
///
/// Only used as the element type of zero-length arrays, so they never take
/// up space inside a vector.
pub trait AlignMarker: Sealed + Copy + Default + Debug + Send + Sync + MaybePod + 'static {}

impl<A> AlignMarker for A where
    A: Sealed + Copy + Default + Debug + Send + Sync + MaybePod + 'static
{
}

/// Helper bound resolving to `bytemuck::Pod` when the `bytemuck` feature is
/// enabled, and to nothing otherwise.
#[cfg(feature = "bytemuck")]
pub trait MaybePod: bytemuck::Pod {}
#[cfg(feature = "bytemuck")]
impl<A: bytemuck::Pod> MaybePod for A {}

/// Helper bound resolving to `bytemuck::Pod` when the `bytemuck` feature is
/// enabled, and to nothing otherwise.
#[cfg(not(feature = "bytemuck"))]
pub trait MaybePod {}
#[cfg(not(feature = "bytemuck"))]
impl<A> MaybePod for A {}

/// Arithmetic types that can be stored in a lane.
///
/// Implemented for `i8`, `u8`, `i16`, `u16`, `i32`, `u32`, `i64`, `u64`,
/// `f32` and `f64`. The trait is sealed.
///
/// The associated `AlignXn` types give the alignment of `n` consecutive
/// elements, which is what a power-of-two wide vector is aligned to.
pub trait Scalar:
    Sealed
    + Copy
    + Default
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + Send
    + Sync
    + Zero
    + One
    + NumCast
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
    + MaybePod
    + 'static
{
    /// Name of the scalar type.
    const NAME: &'static str;
    /// Whether the scalar is a floating point type.
    const IS_FLOAT: bool;

    /// Alignment of one element.
    type AlignX1: AlignMarker;
    /// Alignment of two consecutive elements.
    type AlignX2: AlignMarker;
    /// Alignment of four consecutive elements.
    type AlignX4: AlignMarker;
    /// Alignment of eight consecutive elements.
    type AlignX8: AlignMarker;
    /// Alignment of sixteen consecutive elements.
    type AlignX16: AlignMarker;
}

macro_rules! impl_scalar {
    ($($t:ty, $is_float:literal => $x1:ident, $x2:ident, $x4:ident, $x8:ident, $x16:ident);* $(;)?) => {
        $(
            impl Sealed for $t {}

            impl Scalar for $t {
                const NAME: &'static str = stringify!($t);
                const IS_FLOAT: bool = $is_float;

                type AlignX1 = $x1;
                type AlignX2 = $x2;
                type AlignX4 = $x4;
                type AlignX8 = $x8;
                type AlignX16 = $x16;
            }
        )*
    };
}

impl_scalar!(
    i8, false => Align1, Align2, Align4, Align8, Align16;
    u8, false => Align1, Align2, Align4, Align8, Align16;
    i16, false => Align2, Align4, Align8, Align16, Align32;
    u16, false => Align2, Align4, Align8, Align16, Align32;
    i32, false => Align4, Align8, Align16, Align32, Align64;
    u32, false => Align4, Align8, Align16, Align32, Align64;
    f32, true => Align4, Align8, Align16, Align32, Align64;
    i64, false => Align8, Align16, Align32, Align64, Align128;
    u64, false => Align8, Align16, Align32, Align64, Align128;
    f64, true => Align8, Align16, Align32, Align64, Align128;
);

cfg_if::cfg_if! {
    if #[cfg(feature = "use_f64")] {
        /// Default real number type, `f64` with the `use_f64` feature.
        pub type Real = f64;
    } else {
        /// Default real number type, `f32` unless the `use_f64` feature is
        /// enabled.
        pub type Real = f32;
    }
}

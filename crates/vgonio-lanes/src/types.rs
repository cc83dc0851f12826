//! Short names for the vector types used across vgonio.
//!
//! `F32<N>` and friends name the `N`-lane vector of the given element type,
//! except for a single lane where they name the bare scalar.

use crate::{
    lanes::LaneCount,
    scalar::{Real, Scalar, Sealed},
    vector::Vector,
};

/// Maps a lane count to the value type holding that many lanes: the scalar
/// itself for one lane, a [`Vector`] otherwise.
pub trait LaneValue: Sealed {
    /// Value holding the lanes.
    type Of<T: Scalar>: Copy;
}

impl LaneValue for LaneCount<1> {
    type Of<T: Scalar> = T;
}

macro_rules! impl_lane_value {
    ($($n:literal),*) => {
        $(
            impl LaneValue for LaneCount<$n> {
                type Of<T: Scalar> = Vector<T, $n>;
            }
        )*
    };
}

impl_lane_value!(2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16);

macro_rules! lane_aliases {
    ($($name:ident, $alias:ident => $t:ty);* $(;)?) => {
        $(
            #[doc = concat!("`", stringify!($t), "` scalar or vector of `N` lanes.")]
            pub type $name<const N: usize = 1> = <LaneCount<N> as LaneValue>::Of<$t>;

            #[doc = concat!("Same as [`", stringify!($name), "`].")]
            pub type $alias<const N: usize = 1> = $name<N>;
        )*
    };
}

lane_aliases!(
    I8, S8 => i8;
    I16, S16 => i16;
    I32, S32 => i32;
    I64, S64 => i64;
);

/// `f32` scalar or vector of `N` lanes.
pub type F32<const N: usize = 1> = <LaneCount<N> as LaneValue>::Of<f32>;
/// `f64` scalar or vector of `N` lanes.
pub type F64<const N: usize = 1> = <LaneCount<N> as LaneValue>::Of<f64>;
/// `u8` scalar or vector of `N` lanes.
pub type U8<const N: usize = 1> = <LaneCount<N> as LaneValue>::Of<u8>;
/// `u16` scalar or vector of `N` lanes.
pub type U16<const N: usize = 1> = <LaneCount<N> as LaneValue>::Of<u16>;
/// `u32` scalar or vector of `N` lanes.
pub type U32<const N: usize = 1> = <LaneCount<N> as LaneValue>::Of<u32>;
/// `u64` scalar or vector of `N` lanes.
pub type U64<const N: usize = 1> = <LaneCount<N> as LaneValue>::Of<u64>;

macro_rules! vec_aliases {
    ($($n:literal),*) => {
        paste::paste! {
            $(
                #[doc = concat!(stringify!($n), "-lane `f32` vector.")]
                pub type [<Vec $n f>] = F32<$n>;
                #[doc = concat!(stringify!($n), "-lane `f64` vector.")]
                pub type [<Vec $n d>] = F64<$n>;
                #[doc = concat!(stringify!($n), "-lane `i32` vector.")]
                pub type [<Vec $n i>] = I32<$n>;
                #[doc = concat!(stringify!($n), "-lane `u32` vector.")]
                pub type [<Vec $n u>] = U32<$n>;
                #[doc = concat!(stringify!($n), "-lane `i64` vector.")]
                pub type [<Vec $n l>] = I64<$n>;
                #[doc = concat!(stringify!($n), "-lane `u64` vector.")]
                pub type [<Vec $n lu>] = U64<$n>;
            )*
        }
    };
}

vec_aliases!(2, 3, 4, 5);

/// Four bytes, typically an 8-bit RGBA color.
pub type ByteVec4 = U8<4>;

/// 3-lane vector of the default real type.
pub type RealVec3 = Vector<Real, 3>;

/// 4-lane vector of the default real type.
pub type RealVec4 = Vector<Real, 4>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    #[test]
    fn single_lane_is_scalar() {
        let x: F32 = 1.5;
        let y: I64<1> = -3;
        assert_eq!(x * 2.0, 3.0);
        assert_eq!(y, -3i64);
        assert_eq!(size_of::<U16>(), 2);
    }

    #[test]
    fn aliases_name_vectors() {
        let v: Vec3f = Vector::new([1.0, 2.0, 3.0]);
        assert_eq!(v.z(), 3.0);
        let w: Vec4lu = Vector::splat(7);
        assert_eq!(w.sum(), 28);
        let b: ByteVec4 = Vector::new([1, 2, 3, 4]);
        assert_eq!(b.w(), 4);
        let s: S16<2> = Vector::new([-1, 1]);
        assert_eq!(s.into_array(), [-1i16, 1]);
    }

    #[test]
    fn alias_layouts() {
        assert_eq!(size_of::<Vec4f>(), 16);
        assert_eq!(align_of::<Vec4f>(), 16);
        assert_eq!(size_of::<Vec3d>(), 24);
        assert_eq!(align_of::<Vec3d>(), 8);
        assert_eq!(size_of::<Vec5f>(), 20);
        assert_eq!(align_of::<Vec2l>(), 16);
        assert_eq!(size_of::<RealVec4>(), 4 * size_of::<Real>());
    }
}

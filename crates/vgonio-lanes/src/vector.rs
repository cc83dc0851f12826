use crate::{
    error::Error,
    lanes::{LaneCount, Layout, SupportedLaneCount},
    scalar::Scalar,
};
use num_traits::NumCast;
use std::{
    fmt::{Debug, Display, Formatter, Write},
    ops::{
        Add, AddAssign, Deref, DerefMut, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg,
        Rem, RemAssign, Sub, SubAssign,
    },
};

/// Fixed-size vector of `N` lanes of type `T`.
///
/// The lanes are stored contiguously. When `N` is a power of two the vector
/// is aligned to its own size (see [`Layout::Wide`]), otherwise it has the
/// alignment of `T` and is laid out exactly like `[T; N]`. Both layouts
/// expose the same API.
#[repr(C)]
pub struct Vector<T: Scalar, const N: usize>
where
    LaneCount<N>: SupportedLaneCount,
{
    align: [<LaneCount<N> as SupportedLaneCount>::Align<T>; 0],
    lanes: [T; N],
}

impl<T: Scalar, const N: usize> Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// Number of lanes.
    pub const LANES: usize = N;

    /// Number of lanes rounded up to the next power of two.
    pub const PADDED_LANES: usize = <LaneCount<N> as SupportedLaneCount>::PADDED_LANES;

    /// Memory layout selected for this lane count.
    pub const LAYOUT: Layout = <LaneCount<N> as SupportedLaneCount>::LAYOUT;

    /// Creates a new vector from its lanes.
    pub const fn new(lanes: [T; N]) -> Self { Self { align: [], lanes } }

    /// Creates a new vector with all lanes set to `value`.
    pub fn splat(value: T) -> Self { Self::new([value; N]) }

    /// Creates a new vector with all lanes set to zero.
    pub fn zeros() -> Self { Self::splat(T::zero()) }

    /// Creates a new vector with all lanes set to one.
    pub fn ones() -> Self { Self::splat(T::one()) }

    /// Creates a new vector from a slice holding exactly `N` elements.
    pub fn try_from_slice(slice: &[T]) -> Result<Self, Error> {
        if slice.len() != N {
            log::debug!(
                "Cannot build a {}-lane vector from {} elements",
                N,
                slice.len()
            );
            return Err(Error::LengthMismatch {
                expected: N,
                actual: slice.len(),
            });
        }
        let mut lanes = [T::zero(); N];
        lanes.copy_from_slice(slice);
        Ok(Self::new(lanes))
    }

    /// Returns the lanes as an array reference.
    pub const fn as_array(&self) -> &[T; N] { &self.lanes }

    /// Returns the lanes as a mutable array reference.
    pub fn as_mut_array(&mut self) -> &mut [T; N] { &mut self.lanes }

    /// Returns the lanes as a slice.
    pub fn as_slice(&self) -> &[T] { &self.lanes }

    /// Returns the lanes as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.lanes }

    /// Returns a raw pointer to the first lane.
    pub fn as_ptr(&self) -> *const T { self.lanes.as_ptr() }

    /// Consumes the vector and returns its lanes.
    pub fn into_array(self) -> [T; N] { self.lanes }

    /// Returns the lane at `index`, or `None` if it's out of range.
    pub fn get(&self, index: usize) -> Option<T> { self.lanes.get(index).copied() }

    /// Applies `f` to every lane.
    pub fn map<U, F>(self, f: F) -> Vector<U, N>
    where
        U: Scalar,
        F: FnMut(T) -> U,
    {
        Vector::new(self.lanes.map(f))
    }

    /// Combines the lanes of two vectors pairwise.
    pub fn zip_map<F>(self, other: Self, mut f: F) -> Self
    where
        F: FnMut(T, T) -> T,
    {
        let mut lanes = self.lanes;
        for (a, b) in lanes.iter_mut().zip(other.lanes) {
            *a = f(*a, b);
        }
        Self::new(lanes)
    }

    /// Converts every lane to `U`.
    ///
    /// Returns `None` if one of the lanes is not representable in `U`.
    pub fn cast<U: Scalar>(self) -> Option<Vector<U, N>> {
        let mut lanes = [U::zero(); N];
        for (dst, src) in lanes.iter_mut().zip(self.lanes) {
            *dst = <U as NumCast>::from(src)?;
        }
        Some(Vector::new(lanes))
    }

    /// Returns the sum of all lanes.
    pub fn sum(&self) -> T { self.lanes.iter().fold(T::zero(), |acc, &x| acc + x) }

    /// Returns the first lane.
    pub fn x(&self) -> T { self.lanes[0] }
}

macro_rules! impl_lane_accessors {
    ($($name:ident, $name_mut:ident => $idx:literal: [$($n:literal),*]);* $(;)?) => {
        $($(
            impl<T: Scalar> Vector<T, $n> {
                #[doc = concat!("Returns lane ", stringify!($idx), ".")]
                pub fn $name(&self) -> T { self.lanes[$idx] }

                #[doc = concat!("Returns a mutable reference to lane ", stringify!($idx), ".")]
                pub fn $name_mut(&mut self) -> &mut T { &mut self.lanes[$idx] }
            }
        )*)*
    };
}

impl_lane_accessors!(
    y, y_mut => 1: [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
    z, z_mut => 2: [3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
    w, w_mut => 3: [4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
);

impl<T: Scalar, const N: usize> Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// Returns a mutable reference to the first lane.
    pub fn x_mut(&mut self) -> &mut T { &mut self.lanes[0] }
}

impl<T: Scalar, const N: usize> Clone for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn clone(&self) -> Self { *self }
}

impl<T: Scalar, const N: usize> Copy for Vector<T, N> where LaneCount<N>: SupportedLaneCount {}

impl<T: Scalar, const N: usize> PartialEq for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn eq(&self, other: &Self) -> bool { self.lanes == other.lanes }
}

impl<T: Scalar + Eq, const N: usize> Eq for Vector<T, N> where LaneCount<N>: SupportedLaneCount {}

impl<T: Scalar + std::hash::Hash, const N: usize> std::hash::Hash for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) { self.lanes.hash(state) }
}

impl<T: Scalar, const N: usize> Default for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn default() -> Self { Self::zeros() }
}

impl<T: Scalar, const N: usize> Debug for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Vector({:?})", &self.lanes))
    }
}

impl<T: Scalar, const N: usize> Display for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { print_slice(f, &self.lanes) }
}

pub(crate) fn print_slice<A>(f: &mut Formatter<'_>, seq: &[A]) -> std::fmt::Result
where
    A: Display,
{
    f.write_char('[')?;
    for (i, x) in seq.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", x)?;
    }
    f.write_char(']')
}

impl<T: Scalar, const N: usize> Deref for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Target = [T; N];

    fn deref(&self) -> &Self::Target { &self.lanes }
}

impl<T: Scalar, const N: usize> DerefMut for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.lanes }
}

impl<T: Scalar, const N: usize> AsRef<[T]> for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn as_ref(&self) -> &[T] { &self.lanes }
}

impl<T: Scalar, const N: usize> AsMut<[T]> for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn as_mut(&mut self) -> &mut [T] { &mut self.lanes }
}

impl<T: Scalar, const N: usize> Index<usize> for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output { &self.lanes[index] }
}

impl<T: Scalar, const N: usize> IndexMut<usize> for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output { &mut self.lanes[index] }
}

impl<T: Scalar, const N: usize> From<[T; N]> for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn from(lanes: [T; N]) -> Self { Self::new(lanes) }
}

impl<T: Scalar, const N: usize> From<Vector<T, N>> for [T; N]
where
    LaneCount<N>: SupportedLaneCount,
{
    fn from(v: Vector<T, N>) -> Self { v.lanes }
}

impl<T: Scalar, const N: usize> TryFrom<&[T]> for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Error = Error;

    fn try_from(slice: &[T]) -> Result<Self, Self::Error> { Self::try_from_slice(slice) }
}

impl<T: Scalar, const N: usize> IntoIterator for Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter { self.lanes.into_iter() }
}

impl<'a, T: Scalar, const N: usize> IntoIterator for &'a Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.lanes.iter() }
}

macro_rules! impl_lane_wise_ops {
    ($($trait:ident, $op:ident, $assign_trait:ident, $assign_op:ident);* $(;)?) => {
        $(
            impl<T: Scalar, const N: usize> $trait for Vector<T, N>
            where
                LaneCount<N>: SupportedLaneCount,
            {
                type Output = Self;

                #[inline]
                fn $op(self, rhs: Self) -> Self { self.zip_map(rhs, |a, b| a.$op(b)) }
            }

            impl<T: Scalar, const N: usize> $trait<T> for Vector<T, N>
            where
                LaneCount<N>: SupportedLaneCount,
            {
                type Output = Self;

                #[inline]
                fn $op(self, rhs: T) -> Self { self.map(|a| a.$op(rhs)) }
            }

            impl<T: Scalar, const N: usize> $assign_trait for Vector<T, N>
            where
                LaneCount<N>: SupportedLaneCount,
            {
                #[inline]
                fn $assign_op(&mut self, rhs: Self) { *self = (*self).$op(rhs); }
            }

            impl<T: Scalar, const N: usize> $assign_trait<T> for Vector<T, N>
            where
                LaneCount<N>: SupportedLaneCount,
            {
                #[inline]
                fn $assign_op(&mut self, rhs: T) { *self = (*self).$op(rhs); }
            }
        )*
    };
}

impl_lane_wise_ops!(
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign;
    Rem, rem, RemAssign, rem_assign;
);

impl<T, const N: usize> Neg for Vector<T, N>
where
    T: Scalar + Neg<Output = T>,
    LaneCount<N>: SupportedLaneCount,
{
    type Output = Self;

    fn neg(self) -> Self { self.map(|a| -a) }
}

#[cfg(feature = "bytemuck")]
unsafe impl<T: Scalar, const N: usize> bytemuck::Zeroable for Vector<T, N> where
    LaneCount<N>: SupportedLaneCount
{
}

// SAFETY: the alignment field is zero-sized and the lane array fills the
// whole struct: wide layouts are exactly `size_of::<[T; N]>()` bytes and
// sequential ones share the alignment of `T`, so there is no padding.
#[cfg(feature = "bytemuck")]
unsafe impl<T: Scalar, const N: usize> bytemuck::Pod for Vector<T, N> where
    LaneCount<N>: SupportedLaneCount
{
}

#[cfg(feature = "serde")]
impl<T, const N: usize> serde::Serialize for Vector<T, N>
where
    T: Scalar + serde::Serialize,
    LaneCount<N>: SupportedLaneCount,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(N)?;
        for lane in &self.lanes {
            tuple.serialize_element(lane)?;
        }
        tuple.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T, const N: usize> serde::Deserialize<'de> for Vector<T, N>
where
    T: Scalar + serde::Deserialize<'de>,
    LaneCount<N>: SupportedLaneCount,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LanesVisitor<T, const N: usize>(std::marker::PhantomData<T>);

        impl<'de, T, const N: usize> serde::de::Visitor<'de> for LanesVisitor<T, N>
        where
            T: Scalar + serde::Deserialize<'de>,
        {
            type Value = [T; N];

            fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
                write!(f, "a sequence of {} elements", N)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut lanes = [T::zero(); N];
                for (i, lane) in lanes.iter_mut().enumerate() {
                    *lane = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(lanes)
            }
        }

        deserializer
            .deserialize_tuple(N, LanesVisitor::<T, N>(std::marker::PhantomData))
            .map(Self::new)
    }
}

static_assertions::assert_eq_size!(Vector<f32, 3>, [f32; 3]);
static_assertions::assert_eq_size!(Vector<f32, 4>, [f32; 4]);
static_assertions::assert_eq_size!(Vector<f64, 5>, [f64; 5]);
static_assertions::const_assert_eq!(std::mem::align_of::<Vector<f32, 4>>(), 16);
static_assertions::const_assert_eq!(std::mem::align_of::<Vector<f32, 3>>(), 4);
static_assertions::const_assert_eq!(std::mem::align_of::<Vector<u8, 16>>(), 16);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::mem::{align_of, size_of};

    fn check_footprint<T: Scalar, const N: usize>()
    where
        LaneCount<N>: SupportedLaneCount,
    {
        let size = size_of::<Vector<T, N>>();
        let align = align_of::<Vector<T, N>>();
        assert!(size >= N * size_of::<T>());
        assert_eq!(size, Vector::<T, N>::LAYOUT.size_of::<T>(N));
        assert_eq!(align, Vector::<T, N>::LAYOUT.align_of::<T>(N));
        match Vector::<T, N>::LAYOUT {
            Layout::Wide => assert_eq!(size, align),
            Layout::Sequential => assert_eq!(align, align_of::<T>()),
        }
    }

    #[test]
    fn vector_footprint() {
        check_footprint::<f32, 1>();
        check_footprint::<f32, 2>();
        check_footprint::<f32, 3>();
        check_footprint::<f32, 4>();
        check_footprint::<f32, 5>();
        check_footprint::<f64, 3>();
        check_footprint::<f64, 4>();
        check_footprint::<f64, 16>();
        check_footprint::<u8, 4>();
        check_footprint::<u8, 7>();
        check_footprint::<i16, 8>();
        check_footprint::<u64, 2>();
        check_footprint::<i32, 12>();
    }

    #[test]
    fn wide_vectors_are_register_aligned() {
        let v = Vector::<f32, 4>::new([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.as_ptr() as usize % 16, 0);
        let v = Vector::<f64, 4>::splat(0.5);
        assert_eq!(v.as_ptr() as usize % 32, 0);
    }

    #[test]
    fn vector_creation() {
        assert_eq!(Vector::<i32, 3>::zeros().into_array(), [0, 0, 0]);
        assert_eq!(Vector::<i32, 3>::ones().into_array(), [1, 1, 1]);
        assert_eq!(Vector::<u8, 2>::splat(7).into_array(), [7, 7]);
        assert_eq!(Vector::<f32, 5>::default(), Vector::zeros());
        assert_eq!(Vector::<i32, 5>::LANES, 5);
        assert_eq!(Vector::<i32, 5>::PADDED_LANES, 8);
    }

    #[test]
    fn vector_from_slice() {
        let v = Vector::<i32, 3>::try_from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(v, Vector::new([1, 2, 3]));
        assert_eq!(
            Vector::<i32, 3>::try_from_slice(&[1, 2]),
            Err(Error::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
        let v: Result<Vector<f32, 2>, _> = Vector::try_from(&[1.0f32, 2.0, 3.0][..]);
        assert!(v.is_err());
    }

    #[test]
    fn vector_indexing() {
        let mut v = Vector::<i32, 5>::new([1, 2, 3, 4, 5]);
        for i in 0..5 {
            assert_eq!(v[i], i as i32 + 1);
        }
        v[4] = 10;
        assert_eq!(v.get(4), Some(10));
        assert_eq!(v.get(5), None);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (1, 2, 3, 4));
        *v.y_mut() = 20;
        assert_eq!(v.as_slice(), &[1, 20, 3, 4, 10]);
    }

    #[test]
    fn vector_arithmetic() {
        let a = Vector::<f32, 3>::new([1.0, 2.0, 3.0]);
        let b = Vector::<f32, 3>::new([4.0, 5.0, 6.0]);
        assert_eq!((a + b).into_array(), [5.0, 7.0, 9.0]);
        assert_eq!((b - a).into_array(), [3.0, 3.0, 3.0]);
        assert_eq!((a * b).into_array(), [4.0, 10.0, 18.0]);
        assert_eq!((b / a).into_array(), [4.0, 2.5, 2.0]);
        assert_eq!((a * 2.0).into_array(), [2.0, 4.0, 6.0]);
        assert_eq!((-a).into_array(), [-1.0, -2.0, -3.0]);
        let mut c = a;
        c += b;
        c /= 2.0;
        assert_eq!(c.into_array(), [2.5, 3.5, 4.5]);
        assert_eq!(a.sum(), 6.0);
        let i = Vector::<u32, 4>::new([5, 6, 7, 8]) % 4;
        assert_eq!(i.into_array(), [1, 2, 3, 0]);
    }

    #[test]
    fn vector_cast() {
        let v = Vector::<f32, 3>::new([1.0, 2.5, 255.0]);
        assert_eq!(v.cast::<u8>(), Some(Vector::new([1, 2, 255])));
        let v = Vector::<i32, 2>::new([-1, 300]);
        assert_eq!(v.cast::<u8>(), None);
        assert_eq!(v.cast::<i64>(), Some(Vector::new([-1, 300])));
    }

    #[test]
    fn vector_display() {
        let v = Vector::<i32, 3>::new([1, 2, 3]);
        assert_eq!(format!("{:?}", v), "Vector([1, 2, 3])");
        assert_eq!(format!("{}", v), "[1, 2, 3]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn vector_serde() {
        let v = Vector::<f32, 3>::new([1.0, 2.0, 3.0]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0]");
        let back: Vector<f32, 3> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<Vector<f32, 4>>(&json).is_err());
    }

    #[cfg(feature = "bytemuck")]
    #[test]
    fn vector_bytes() {
        let v = Vector::<u8, 4>::new([1, 2, 3, 4]);
        assert_eq!(bytemuck::bytes_of(&v), &[1, 2, 3, 4]);
    }

    proptest! {
        #[test]
        fn add_then_sub_is_identity(a in prop::array::uniform4(-1000i32..1000),
            b in prop::array::uniform4(-1000i32..1000))
        {
            let va = Vector::new(a);
            let vb = Vector::new(b);
            prop_assert_eq!((va + vb) - vb, va);
        }
    }
}

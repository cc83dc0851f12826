use super::{
    bitfield::{unorm, unorm_to_bytes},
    format::{Channel, ColorFormat},
};
use crate::{
    convert::permute,
    lanes::{LaneCount, SupportedLaneCount},
    scalar::Scalar,
    vector::{print_slice, Vector},
};
use num_traits::{Float, NumCast};
use std::{
    fmt::{Debug, Display, Formatter},
    marker::PhantomData,
    ops::{Index, IndexMut},
};

/// Color stored unpacked, one channel per lane of a [`Vector`].
///
/// Lanes follow the physical channel order of `F`. A vector of 3 lanes
/// drops the last channel of the order, which must be alpha; a vector of 4
/// lanes holds all of them. Any other shape fails to compile:
///
/// ```compile_fail
/// use lanes::color::{Argb8888, U8};
///
/// // alpha comes first in argb8888, so 3 lanes would drop blue
/// let _ = U8::<Argb8888, 3>::new([1, 2, 3]);
/// ```
///
/// ```compile_fail
/// use lanes::color::{Rgba8888, U8};
///
/// let _ = U8::<Rgba8888, 2>::new([1, 2]);
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq)]
pub struct ColorVector<T: Scalar, F: ColorFormat, const N: usize>
where
    LaneCount<N>: SupportedLaneCount,
{
    lanes: Vector<T, N>,
    format: PhantomData<F>,
}

impl<T: Scalar, F: ColorFormat, const N: usize> ColorVector<T, F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    const SHAPE: () = {
        #[allow(clippy::let_unit_value)]
        let () = F::VALID;
        assert!(N == 3 || N == 4, "color vectors hold 3 or 4 channels");
        assert!(
            N == 4 || F::FORMAT.order()[3] as usize == Channel::A as usize,
            "a 3-channel color vector can only leave out alpha"
        );
    };

    /// Creates a color from its lanes in physical order.
    pub fn new(lanes: [T; N]) -> Self { Self::from_vector(Vector::new(lanes)) }

    /// Wraps a vector holding the channels in physical order.
    pub fn from_vector(lanes: Vector<T, N>) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SHAPE;
        Self {
            lanes,
            format: PhantomData,
        }
    }

    /// Creates a color from channels in logical order. The alpha is dropped
    /// when the vector has no lane for it.
    pub fn from_rgba(r: T, g: T, b: T, a: T) -> Self {
        let mut color = Self::from_vector(Vector::zeros());
        for (c, value) in Channel::ALL.into_iter().zip([r, g, b, a]) {
            let pos = F::FORMAT.position(c);
            if pos < N {
                color.lanes[pos] = value;
            }
        }
        color
    }

    /// Returns the lanes in physical order.
    pub fn as_vector(&self) -> &Vector<T, N> { &self.lanes }

    /// Consumes the color and returns its lanes in physical order.
    pub fn into_vector(self) -> Vector<T, N> { self.lanes }

    /// Returns the value of `channel`, `None` if the color doesn't hold it.
    pub fn channel(&self, channel: Channel) -> Option<T> {
        let pos = F::FORMAT.position(channel);
        (pos < N).then(|| self.lanes[pos])
    }

    fn color_channel(&self, channel: Channel) -> T { self.lanes[F::FORMAT.position(channel)] }

    /// Red.
    pub fn r(&self) -> T { self.color_channel(Channel::R) }

    /// Green.
    pub fn g(&self) -> T { self.color_channel(Channel::G) }

    /// Blue.
    pub fn b(&self) -> T { self.color_channel(Channel::B) }

    /// Alpha, if stored.
    pub fn a(&self) -> Option<T> { self.channel(Channel::A) }

    /// Channels in logical order.
    pub fn rgba(&self) -> (T, T, T, Option<T>) { (self.r(), self.g(), self.b(), self.a()) }

    /// Converts to normalized floating point channels in `r, g, b, a` order.
    ///
    /// Floating point lanes are taken as they are. Integer lanes are divided
    /// by the largest magnitude of their channel in `F`. A missing alpha is
    /// fully opaque.
    pub fn to_unorm<R: Scalar + Float>(&self) -> Vector<R, 4> {
        Vector::<R, 4>::new(Channel::ALL.map(|c| match self.channel(c) {
            None => R::one(),
            Some(v) if T::IS_FLOAT => <R as NumCast>::from(v).unwrap_or_else(R::zero),
            Some(v) => match F::FORMAT.max_value(c) {
                0 => R::one(),
                max => unorm(v.to_u64().unwrap_or(0), max),
            },
        }))
    }

    /// Converts to 8-bit channels in `r, g, b, a` order, rounding half away
    /// from zero.
    pub fn to_bytes(&self) -> Vector<u8, 4> { unorm_to_bytes(self.to_unorm()) }

    /// Moves the channels into the physical order of another format.
    pub fn reorder<G: ColorFormat>(&self) -> ColorVector<T, G, N> {
        let indices: [usize; N] =
            std::array::from_fn(|k| F::FORMAT.position(G::FORMAT.order()[k]));
        ColorVector::from_vector(permute(&self.lanes, indices))
    }
}

impl<T: Scalar, F: ColorFormat, const N: usize> Default for ColorVector<T, F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn default() -> Self { Self::from_vector(Vector::zeros()) }
}

impl<T: Scalar, F: ColorFormat, const N: usize> Index<usize> for ColorVector<T, F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Output = T;

    /// Lane at a physical position.
    fn index(&self, index: usize) -> &Self::Output { &self.lanes[index] }
}

impl<T: Scalar, F: ColorFormat, const N: usize> IndexMut<usize> for ColorVector<T, F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn index_mut(&mut self, index: usize) -> &mut Self::Output { &mut self.lanes[index] }
}

impl<T: Scalar, F: ColorFormat, const N: usize> Debug for ColorVector<T, F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct(F::NAME);
        for (c, value) in F::FORMAT.order().iter().zip(self.lanes.iter()) {
            s.field(c.name(), value);
        }
        s.finish()
    }
}

impl<T: Scalar, F: ColorFormat, const N: usize> Display for ColorVector<T, F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(F::NAME)?;
        print_slice(f, self.lanes.as_slice())
    }
}

impl<T: Scalar, F: ColorFormat, const N: usize> From<ColorVector<T, F, N>> for Vector<f32, 4>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn from(c: ColorVector<T, F, N>) -> Self { c.to_unorm() }
}

impl<T: Scalar, F: ColorFormat, const N: usize> From<ColorVector<T, F, N>> for Vector<u8, 4>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn from(c: ColorVector<T, F, N>) -> Self { c.to_bytes() }
}

#[cfg(feature = "bytemuck")]
unsafe impl<T: Scalar, F: ColorFormat, const N: usize> bytemuck::Zeroable
    for ColorVector<T, F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
}

// SAFETY: transparent over a padding-free vector.
#[cfg(feature = "bytemuck")]
unsafe impl<T: Scalar, F: ColorFormat, const N: usize> bytemuck::Pod
    for ColorVector<T, F, N>
where
    LaneCount<N>: SupportedLaneCount,
{
}

#[cfg(feature = "serde")]
impl<T, F, const N: usize> serde::Serialize for ColorVector<T, F, N>
where
    T: Scalar + serde::Serialize,
    F: ColorFormat,
    LaneCount<N>: SupportedLaneCount,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.lanes, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, F, const N: usize> serde::Deserialize<'de> for ColorVector<T, F, N>
where
    T: Scalar + serde::Deserialize<'de>,
    F: ColorFormat,
    LaneCount<N>: SupportedLaneCount,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Vector<T, N> as serde::Deserialize>::deserialize(deserializer).map(Self::from_vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Argb8888, Bgraf32, Rgba8888, Rgbaf32, Rgbaf64};
    use approx::assert_relative_eq;

    #[test]
    fn byte_color() {
        let c = ColorVector::<u8, Rgba8888, 4>::new([255, 128, 0, 255]);
        assert_eq!(c.to_bytes().into_array(), [255, 128, 0, 255]);
        assert_eq!(c.rgba(), (255, 128, 0, Some(255)));
        let f = c.to_unorm::<f32>();
        assert_relative_eq!(f[1], 128.0 / 255.0);
    }

    #[test]
    fn physical_order() {
        let c = ColorVector::<u8, Argb8888, 4>::from_rgba(1, 2, 3, 4);
        assert_eq!(c.as_vector().into_array(), [4, 1, 2, 3]);
        assert_eq!(c[0], 4);
        assert_eq!(c.r(), 1);
        assert_eq!(c.a(), Some(4));
        let c = ColorVector::<f32, Bgraf32, 4>::new([0.0, 0.5, 1.0, 1.0]);
        assert_eq!((c.r(), c.g(), c.b()), (1.0, 0.5, 0.0));
    }

    #[test]
    fn three_channels_drop_alpha() {
        let c = ColorVector::<u8, Rgba8888, 3>::from_rgba(10, 20, 30, 40);
        assert_eq!(c.as_vector().into_array(), [10, 20, 30]);
        assert_eq!(c.a(), None);
        assert_eq!(c.to_bytes().into_array(), [10, 20, 30, 255]);
    }

    #[test]
    fn float_channels_pass_through() {
        let c = ColorVector::<f64, Rgbaf64, 4>::new([0.25, 0.5, 0.75, 1.0]);
        assert_eq!(c.to_unorm::<f32>().into_array(), [0.25, 0.5, 0.75, 1.0]);
        assert_eq!(c.to_bytes().into_array(), [64, 128, 191, 255]);
    }

    #[test]
    fn reorder_channels() {
        let c = ColorVector::<f32, Bgraf32, 4>::new([0.0, 0.5, 1.0, 0.25]);
        let d = c.reorder::<Rgbaf32>();
        assert_eq!(d.as_vector().into_array(), [1.0, 0.5, 0.0, 0.25]);
        assert_eq!(d.rgba(), c.rgba());
        let e = ColorVector::<u8, Rgba8888, 4>::new([1, 2, 3, 4]).reorder::<Argb8888>();
        assert_eq!(e.as_vector().into_array(), [4, 1, 2, 3]);
        let back = e.reorder::<Rgba8888>();
        assert_eq!(back.as_vector().into_array(), [1, 2, 3, 4]);
    }

    #[test]
    fn formatting() {
        let c = ColorVector::<u8, Argb8888, 4>::from_rgba(1, 2, 3, 4);
        assert_eq!(c.to_string(), "argb8888[4, 1, 2, 3]");
        assert_eq!(format!("{:?}", c), "argb8888 { a: 4, r: 1, g: 2, b: 3 }");
    }
}

use super::format::{Channel, ColorFormat};
use crate::{scalar::Scalar, vector::Vector};
use num_traits::{Float, NumCast};
use std::{
    fmt::{Debug, Display, Formatter, LowerHex},
    hash::Hash,
    marker::PhantomData,
};

/// Unsigned integer used as the storage of a [`Bitfield`].
pub trait Word: Scalar + Eq + Hash + LowerHex {
    /// Number of bits of the word.
    const BITS: u32;

    /// Zero-extends the word to 64 bits.
    fn widen(self) -> u64;

    /// Truncates a 64-bit value to the word.
    fn narrow(value: u64) -> Self;
}

macro_rules! impl_word {
    ($($t:ty),*) => {
        $(
            impl Word for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn widen(self) -> u64 { self as u64 }

                #[inline]
                fn narrow(value: u64) -> Self { value as $t }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64);

/// Color packed into a single unsigned word `W` following the format `F`.
///
/// Every channel lives at the bit offset given by [`Format::shift`] and is
/// `F::FORMAT.width(channel)` bits wide. Channels without bits are not
/// stored: writing them is a no-op and reading them returns zero.
///
/// Using a format that doesn't fit in `W` fails to compile as soon as a
/// value is created:
///
/// ```compile_fail
/// use lanes::color::{Rgba8888, U16};
///
/// let _ = U16::<Rgba8888>::new(1, 2, 3, 4);
/// ```
///
/// ```compile_fail
/// use lanes::color::{Rgbaf32, U64};
///
/// let _ = U64::<Rgbaf32>::from_bits(0);
/// ```
///
/// [`Format::shift`]: crate::color::Format::shift
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitfield<W: Word, F: ColorFormat> {
    bits: W,
    format: PhantomData<F>,
}

impl<W: Word, F: ColorFormat> Bitfield<W, F> {
    const PACKABLE: () = F::FORMAT.assert_packed(W::BITS);

    /// Packs the raw channel magnitudes `r, g, b, a`.
    ///
    /// Each magnitude is masked to the width of its channel.
    pub fn new(r: W, g: W, b: W, a: W) -> Self {
        let mut color = Self::from_bits(W::zero());
        color.set_all(r, g, b, a);
        color
    }

    /// Packs `r, g, b` with a fully opaque alpha.
    pub fn from_rgb(r: W, g: W, b: W) -> Self { Self::new(r, g, b, Self::max_value(Channel::A)) }

    /// Wraps an already packed word.
    pub fn from_bits(bits: W) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::PACKABLE;
        Self {
            bits,
            format: PhantomData,
        }
    }

    /// Returns the packed word.
    pub fn bits(&self) -> W { self.bits }

    /// Largest raw magnitude of `channel`.
    pub fn max_value(channel: Channel) -> W { W::narrow(F::FORMAT.max_value(channel)) }

    fn field(&self, channel: Channel) -> u64 {
        let shift = F::FORMAT.shift(channel);
        self.bits.widen().checked_shr(shift).unwrap_or(0) & F::FORMAT.max_value(channel)
    }

    /// Returns the raw magnitude of `channel`.
    pub fn get(&self, channel: Channel) -> W { W::narrow(self.field(channel)) }

    /// Red magnitude.
    pub fn r(&self) -> W { self.get(Channel::R) }

    /// Green magnitude.
    pub fn g(&self) -> W { self.get(Channel::G) }

    /// Blue magnitude.
    pub fn b(&self) -> W { self.get(Channel::B) }

    /// Alpha magnitude, zero if the format stores no alpha.
    pub fn a(&self) -> W { self.get(Channel::A) }

    /// Returns the magnitude stored in the field at `position`, counting
    /// from the least significant field.
    ///
    /// Returns `None` past the last field or for a channel without bits.
    pub fn lane(&self, position: usize) -> Option<W> {
        F::FORMAT.channel_at(position).map(|c| self.get(c))
    }

    /// Overwrites the magnitude of `channel`, masked to its width.
    pub fn set(&mut self, channel: Channel, value: W) {
        let shift = F::FORMAT.shift(channel);
        let max = F::FORMAT.max_value(channel);
        let mask = max.checked_shl(shift).unwrap_or(0);
        let field = (value.widen() & max).checked_shl(shift).unwrap_or(0);
        self.bits = W::narrow((self.bits.widen() & !mask) | field);
    }

    /// Overwrites all four channels at once.
    pub fn set_all(&mut self, r: W, g: W, b: W, a: W) {
        self.set(Channel::R, r);
        self.set(Channel::G, g);
        self.set(Channel::B, b);
        self.set(Channel::A, a);
    }

    /// Converts to normalized floating point channels in `r, g, b, a` order.
    ///
    /// Each channel is divided by its largest magnitude. A format without
    /// alpha converts to a fully opaque alpha of 1.
    pub fn to_unorm<T: Scalar + Float>(&self) -> Vector<T, 4> {
        Vector::new(Channel::ALL.map(|c| match F::FORMAT.max_value(c) {
            0 => T::one(),
            max => unorm(self.field(c), max),
        }))
    }

    /// Converts to normalized `f32` channels.
    pub fn to_f32(&self) -> Vector<f32, 4> { self.to_unorm() }

    /// Converts to normalized `f64` channels.
    pub fn to_f64(&self) -> Vector<f64, 4> { self.to_unorm() }

    /// Converts to 8-bit channels in `r, g, b, a` order.
    ///
    /// The normalized value is scaled by 255 and rounded half away from
    /// zero.
    pub fn to_bytes(&self) -> Vector<u8, 4> { unorm_to_bytes(self.to_f32()) }

    /// Quantizes normalized channels in `r, g, b, a` order.
    ///
    /// Inputs are clamped to `[0, 1]`; NaN maps to zero.
    pub fn from_unorm<T: Scalar + Float>(v: Vector<T, 4>) -> Self {
        let mut color = Self::from_bits(W::zero());
        for c in Channel::ALL {
            color.set(c, W::narrow(quantize(v[c.index()], F::FORMAT.max_value(c))));
        }
        color
    }

    /// Re-encodes the color in another packed format.
    ///
    /// Channels are rescaled to the target widths with rounding. A missing
    /// source alpha becomes a fully opaque one.
    pub fn convert<W2: Word, G: ColorFormat>(&self) -> Bitfield<W2, G> {
        let mut out = Bitfield::<W2, G>::from_bits(W2::zero());
        for c in Channel::ALL {
            let src_max = F::FORMAT.max_value(c);
            let dst_max = G::FORMAT.max_value(c);
            let value = match src_max {
                0 => dst_max,
                _ => rescale(self.field(c), src_max, dst_max),
            };
            out.set(c, W2::narrow(value));
        }
        out
    }
}

/// `raw / max` as a float.
pub(crate) fn unorm<T: Float>(raw: u64, max: u64) -> T {
    match (<T as NumCast>::from(raw), <T as NumCast>::from(max)) {
        (Some(raw), Some(max)) => raw / max,
        _ => T::zero(),
    }
}

/// Clamps `value` to `[0, 1]` and scales it to `[0, max]`.
pub(crate) fn quantize<T: Float>(value: T, max: u64) -> u64 {
    let scale = <T as NumCast>::from(max).unwrap_or_else(T::zero);
    let clamped = value.max(T::zero()).min(T::one());
    (clamped * scale).round().to_u64().unwrap_or(0).min(max)
}

pub(crate) fn unorm_to_bytes(v: Vector<f32, 4>) -> Vector<u8, 4> {
    v.map(|x| (x * 255.0).round() as u8)
}

fn rescale(raw: u64, src_max: u64, dst_max: u64) -> u64 {
    let (raw, src_max, dst_max) = (raw as u128, src_max as u128, dst_max as u128);
    ((raw * dst_max + src_max / 2) / src_max) as u64
}

impl<W: Word, F: ColorFormat> Default for Bitfield<W, F> {
    fn default() -> Self { Self::from_bits(W::zero()) }
}

impl<W: Word, F: ColorFormat> Debug for Bitfield<W, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct(F::NAME);
        s.field("bits", &format_args!("{:#x}", self.bits));
        for c in Channel::ALL.iter().filter(|c| F::FORMAT.width(**c) > 0) {
            s.field(c.name(), &self.get(*c));
        }
        s.finish()
    }
}

impl<W: Word, F: ColorFormat> Display for Bitfield<W, F> {
    /// Prints the stored channels in `r, g, b, a` order, e.g.
    /// `rgb565(31, 63, 31)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", F::NAME)?;
        for (i, c) in Channel::ALL
            .iter()
            .filter(|c| F::FORMAT.width(**c) > 0)
            .enumerate()
        {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.get(*c))?;
        }
        write!(f, ")")
    }
}

impl<W: Word, F: ColorFormat> From<Bitfield<W, F>> for Vector<f32, 4> {
    fn from(c: Bitfield<W, F>) -> Self { c.to_f32() }
}

impl<W: Word, F: ColorFormat> From<Bitfield<W, F>> for Vector<f64, 4> {
    fn from(c: Bitfield<W, F>) -> Self { c.to_f64() }
}

impl<W: Word, F: ColorFormat> From<Bitfield<W, F>> for Vector<u8, 4> {
    fn from(c: Bitfield<W, F>) -> Self { c.to_bytes() }
}

#[cfg(feature = "bytemuck")]
unsafe impl<W: Word, F: ColorFormat> bytemuck::Zeroable for Bitfield<W, F> {}

// SAFETY: transparent over a plain unsigned integer.
#[cfg(feature = "bytemuck")]
unsafe impl<W: Word, F: ColorFormat> bytemuck::Pod for Bitfield<W, F> {}

#[cfg(feature = "serde")]
impl<W, F> serde::Serialize for Bitfield<W, F>
where
    W: Word + serde::Serialize,
    F: ColorFormat,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, W, F> serde::Deserialize<'de> for Bitfield<W, F>
where
    W: Word + serde::Deserialize<'de>,
    F: ColorFormat,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        W::deserialize(deserializer).map(Self::from_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Argb8888, Bgr565, Rgb565, Rgba4444, Rgba8888};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    type C565 = Bitfield<u16, Rgb565>;

    #[test]
    fn rgb565_full_scale() {
        let c = C565::new(31, 63, 31, 0);
        assert_eq!((c.r(), c.g(), c.b()), (31, 63, 31));
        assert_eq!(c.bits(), 0xffff);
        assert_eq!(c.to_f32().into_array(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(c.to_bytes().into_array(), [255, 255, 255, 255]);
    }

    #[test]
    fn rgb565_packing() {
        let c = C565::new(23, 34, 12, 0);
        assert_eq!(c.bits(), 23 | (34 << 5) | (12 << 11));
        assert_eq!(c.lane(0), Some(23));
        assert_eq!(c.lane(1), Some(34));
        assert_eq!(c.lane(2), Some(12));
        assert_eq!(c.lane(3), None);
        assert_eq!(c.lane(7), None);
        let f = c.to_f32();
        assert_relative_eq!(f[0], 23.0 / 31.0);
        assert_relative_eq!(f[1], 34.0 / 63.0);
        assert_relative_eq!(f[2], 12.0 / 31.0);
        assert_eq!(c.to_bytes().into_array(), [189, 138, 99, 255]);
    }

    #[test]
    fn magnitudes_are_masked() {
        let c = C565::new(32, 64, 33, 7);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0, 0, 1, 0));
        let mut c = C565::default();
        c.set(Channel::G, 0xff);
        assert_eq!(c.g(), 63);
        assert_eq!(c.r(), 0);
        assert_eq!(c.b(), 0);
        c.set(Channel::A, 3);
        assert_eq!(c.bits(), 63 << 5);
    }

    #[test]
    fn permuted_order() {
        let c = Bitfield::<u32, Argb8888>::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.bits(), 0x3322_1144);
        assert_eq!(c.lane(0), Some(0x44));
        assert_eq!(c.lane(3), Some(0x33));
        let c = Bitfield::<u16, Bgr565>::new(31, 0, 0, 0);
        assert_eq!(c.bits(), 31 << 11);
    }

    #[test]
    fn rgba8888_bytes() {
        let c = Bitfield::<u32, Rgba8888>::new(255, 128, 0, 255);
        assert_eq!(c.to_bytes().into_array(), [255, 128, 0, 255]);
        let bytes: Vector<u8, 4> = c.into();
        assert_eq!(bytes.into_array(), [255, 128, 0, 255]);
        let f: Vector<f64, 4> = c.into();
        assert_relative_eq!(f[1], 128.0 / 255.0);
    }

    #[test]
    fn set_all_and_from_rgb() {
        let mut c = Bitfield::<u16, Rgba4444>::default();
        c.set_all(1, 2, 3, 4);
        assert_eq!(c.bits(), 0x4321);
        let c = Bitfield::<u16, Rgba4444>::from_rgb(1, 2, 3);
        assert_eq!(c.a(), 15);
        assert_eq!(Bitfield::<u16, Rgba4444>::max_value(Channel::B), 15);
    }

    #[test]
    fn quantize_from_unorm() {
        let c = C565::from_unorm(Vector::new([1.0f32, 0.5, 0.0, 1.0]));
        assert_eq!((c.r(), c.g(), c.b()), (31, 32, 0));
        let c = C565::from_unorm(Vector::new([2.0f64, -1.0, f64::NAN, 0.0]));
        assert_eq!((c.r(), c.g(), c.b()), (31, 0, 0));
    }

    #[test]
    fn convert_between_formats() {
        let c = C565::new(31, 63, 31, 0).convert::<u32, Rgba8888>();
        assert_eq!(c.to_bytes().into_array(), [255, 255, 255, 255]);
        let c = Bitfield::<u32, Rgba8888>::new(255, 128, 0, 255).convert::<u16, Rgba4444>();
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (15, 8, 0, 15));
        let c = Bitfield::<u32, Argb8888>::new(1, 2, 3, 4).convert::<u32, Rgba8888>();
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    }

    #[test]
    fn formatting() {
        let c = C565::new(31, 63, 31, 0);
        assert_eq!(c.to_string(), "rgb565(31, 63, 31)");
        assert_eq!(format!("{:?}", c), "rgb565 { bits: 0xffff, r: 31, g: 63, b: 31 }");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn bitfield_serde() {
        let c = C565::new(1, 2, 3, 0);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, c.bits().to_string());
        let back: C565 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[cfg(feature = "bytemuck")]
    #[test]
    fn bitfield_bytes() {
        let c = Bitfield::<u32, Rgba8888>::new(1, 2, 3, 4);
        assert_eq!(bytemuck::bytes_of(&c), &0x0403_0201u32.to_ne_bytes());
    }

    proptest! {
        #[test]
        fn pack_unpack(r in 0u16..32, g in 0u16..64, b in 0u16..32) {
            let c = C565::new(r, g, b, 0);
            prop_assert_eq!((c.r(), c.g(), c.b(), c.a()), (r, g, b, 0));
        }

        #[test]
        fn unorm_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), a in any::<u8>()) {
            let c = Bitfield::<u32, Rgba8888>::new(r.into(), g.into(), b.into(), a.into());
            prop_assert_eq!(Bitfield::<u32, Rgba8888>::from_unorm(c.to_f32()), c);
            prop_assert_eq!(c.to_bytes().into_array(), [r, g, b, a]);
        }
    }
}

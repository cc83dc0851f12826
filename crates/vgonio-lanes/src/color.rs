//! Color values with a type-level channel format.
//!
//! Colors come in two shapes:
//!
//! - [`Bitfield`]: all channels packed into one unsigned word, see [`U16`],
//!   [`U32`] and [`U64`].
//! - [`ColorVector`]: one channel per vector lane, see [`U8`], [`F32`] and
//!   [`F64`].
//!
//! The format parameter is one of the marker types below ([`Rgb565`],
//! [`Rgba8888`], ...) and fixes the bit width and the physical position of
//! every channel.
//!
//! ```
//! use lanes::{color, Vector};
//!
//! let c = color::U16::<color::Rgb565>::new(31, 63, 31, 0);
//! assert_eq!((c.r(), c.g(), c.b()), (31, 63, 31));
//! let f: Vector<f32, 4> = c.into();
//! assert_eq!(f.into_array(), [1.0; 4]);
//! ```

mod bitfield;
mod format;
mod vector;

pub use bitfield::{Bitfield, Word};
pub use format::{
    Argb16161616, Argb4444, Argb8888, Argbf32, Argbf64, Bgr565, Bgra16161616, Bgra4444, Bgra8888,
    Bgraf32, Bgraf64, Channel, ColorFormat, Format, FormatError, Rgb565, Rgba16161616, Rgba4444,
    Rgba8888, Rgbaf32, Rgbaf64, MAX_CHANNEL_BITS, MAX_PACKED_CHANNEL_BITS,
};
pub use vector::ColorVector;

/// Color with one byte per channel.
pub type U8<F, const N: usize = 4> = ColorVector<u8, F, N>;

/// Color packed in 16 bits.
pub type U16<F> = Bitfield<u16, F>;

/// Color packed in 32 bits.
pub type U32<F> = Bitfield<u32, F>;

/// Color packed in 64 bits.
pub type U64<F> = Bitfield<u64, F>;

/// Color with one `f32` per channel.
pub type F32<F, const N: usize = 4> = ColorVector<f32, F, N>;

/// Color with one `f64` per channel.
pub type F64<F, const N: usize = 4> = ColorVector<f64, F, N>;

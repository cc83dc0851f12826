use crate::error::Error;
use std::fmt::{Display, Formatter};

/// Logical color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    /// Red.
    R = 0,
    /// Green.
    G = 1,
    /// Blue.
    B = 2,
    /// Alpha.
    A = 3,
}

impl Channel {
    /// All channels in logical order.
    pub const ALL: [Channel; 4] = [Channel::R, Channel::G, Channel::B, Channel::A];

    /// Index of the channel in logical `r, g, b, a` order.
    pub const fn index(self) -> usize { self as usize }

    /// Lowercase one-letter name of the channel.
    pub const fn name(self) -> &'static str {
        match self {
            Channel::R => "r",
            Channel::G => "g",
            Channel::B => "b",
            Channel::A => "a",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

/// Reasons a color format descriptor is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The same channel appears twice in the channel order.
    #[error("Channel {0} appears more than once in the channel order")]
    DuplicateChannel(Channel),
    /// A color channel has zero bits; only alpha may be omitted.
    #[error("Channel {0} has no bits, only alpha may be omitted")]
    MissingColorChannel(Channel),
    /// A channel is wider than the storage allows.
    #[error("Channel {channel} is {bits} bits wide, at most {max} allowed")]
    WidthTooLarge {
        /// Offending channel.
        channel: Channel,
        /// Its width.
        bits: u32,
        /// Largest width allowed.
        max: u32,
    },
    /// The channels don't fit in the storage word.
    #[error("Channels need {total} bits but the storage word only has {capacity}")]
    Overflow {
        /// Sum of all channel widths.
        total: u32,
        /// Width of the storage word.
        capacity: u32,
    },
}

/// Widest channel of any format.
pub const MAX_CHANNEL_BITS: u32 = 64;

/// Widest channel of a bit-packed format.
pub const MAX_PACKED_CHANNEL_BITS: u32 = 32;

/// Describes how the logical channels `r, g, b, a` of a color are laid out.
///
/// `order` lists the channels from the least significant field to the most
/// significant one; `bits` holds the width of each channel in logical
/// `r, g, b, a` order. The shift of a channel is the sum of the widths of the
/// channels preceding it in `order`.
///
/// For example rgb565 has order `[R, G, B, A]` and widths `[5, 6, 5, 0]`:
/// red occupies bits 0..5, green 5..11 and blue 11..16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFormat"))]
pub struct Format {
    order: [Channel; 4],
    bits: [u32; 4],
}

impl Format {
    /// Creates a format descriptor, checking that it's well formed.
    ///
    /// See [`Format::check`] for the rules.
    pub fn new(order: [Channel; 4], bits: [u32; 4]) -> Result<Self, Error> {
        let format = Self::from_raw(order, bits);
        match format.check() {
            Ok(()) => {
                log::trace!("Defined color format {}", format);
                Ok(format)
            }
            Err(err) => {
                log::debug!("Rejecting color format {:?}: {}", format, err);
                Err(err.into())
            }
        }
    }

    /// Creates a format descriptor without checking it.
    ///
    /// Type-level formats are checked when a color type using them is
    /// instantiated, see [`Bitfield`](crate::color::Bitfield).
    pub const fn from_raw(order: [Channel; 4], bits: [u32; 4]) -> Self { Self { order, bits } }

    /// Channel order, least significant field first.
    pub const fn order(&self) -> [Channel; 4] { self.order }

    /// Channel widths in logical `r, g, b, a` order.
    pub const fn bits(&self) -> [u32; 4] { self.bits }

    /// Width in bits of `channel`.
    pub const fn width(&self, channel: Channel) -> u32 { self.bits[channel.index()] }

    /// Sum of all channel widths.
    pub const fn total_bits(&self) -> u32 {
        self.bits[0]
            .saturating_add(self.bits[1])
            .saturating_add(self.bits[2])
            .saturating_add(self.bits[3])
    }

    /// Width of the smallest unsigned word able to hold all channels, at
    /// least 8 bits.
    ///
    /// Saturates at `u32::MAX` for widths that no word can hold.
    pub const fn storage_bits(&self) -> u32 {
        let total = self.total_bits();
        if total <= 8 {
            return 8;
        }
        match total.checked_next_power_of_two() {
            Some(bits) => bits,
            None => u32::MAX,
        }
    }

    /// Bit offset of `channel` inside the packed word.
    pub const fn shift(&self, channel: Channel) -> u32 {
        let mut shift = 0u32;
        let mut i = 0;
        while i < 4 {
            let c = self.order[i];
            if c as usize == channel as usize {
                break;
            }
            shift = shift.saturating_add(self.bits[c as usize]);
            i += 1;
        }
        shift
    }

    /// Largest raw value of `channel`, i.e. `2^width - 1`.
    pub const fn max_value(&self, channel: Channel) -> u64 {
        match self.width(channel) {
            0 => 0,
            w if w >= 64 => u64::MAX,
            w => (1u64 << w) - 1,
        }
    }

    /// Physical position of `channel` in the channel order.
    pub const fn position(&self, channel: Channel) -> usize {
        let mut i = 0;
        while i < 3 {
            if self.order[i] as usize == channel as usize {
                break;
            }
            i += 1;
        }
        i
    }

    /// Channel stored at physical `position`, if any.
    ///
    /// Positions count from the least significant field. Channels without
    /// any bits are not stored and yield `None`.
    pub const fn channel_at(&self, position: usize) -> Option<Channel> {
        if position >= 4 {
            return None;
        }
        let channel = self.order[position];
        if self.width(channel) == 0 {
            None
        } else {
            Some(channel)
        }
    }

    /// Checks that the descriptor is well formed.
    ///
    /// The order must be a permutation of the four channels, red, green and
    /// blue need at least one bit each, and no channel may exceed
    /// [`MAX_CHANNEL_BITS`].
    pub const fn check(&self) -> Result<(), FormatError> {
        let mut seen = [false; 4];
        let mut i = 0;
        while i < 4 {
            let c = self.order[i];
            if seen[c as usize] {
                return Err(FormatError::DuplicateChannel(c));
            }
            seen[c as usize] = true;
            i += 1;
        }
        let mut i = 0;
        while i < 4 {
            let c = Channel::ALL[i];
            let bits = self.bits[i];
            if bits == 0 && !matches!(c, Channel::A) {
                return Err(FormatError::MissingColorChannel(c));
            }
            if bits > MAX_CHANNEL_BITS {
                return Err(FormatError::WidthTooLarge {
                    channel: c,
                    bits,
                    max: MAX_CHANNEL_BITS,
                });
            }
            i += 1;
        }
        Ok(())
    }

    /// Checks that the descriptor can be packed in a word of `word_bits`
    /// bits.
    ///
    /// On top of [`Format::check`], channels are limited to
    /// [`MAX_PACKED_CHANNEL_BITS`] and the total width to `word_bits`.
    pub const fn check_packed(&self, word_bits: u32) -> Result<(), FormatError> {
        if let Err(err) = self.check() {
            return Err(err);
        }
        let mut i = 0;
        while i < 4 {
            if self.bits[i] > MAX_PACKED_CHANNEL_BITS {
                return Err(FormatError::WidthTooLarge {
                    channel: Channel::ALL[i],
                    bits: self.bits[i],
                    max: MAX_PACKED_CHANNEL_BITS,
                });
            }
            i += 1;
        }
        let total = self.total_bits();
        if total > word_bits {
            return Err(FormatError::Overflow {
                total,
                capacity: word_bits,
            });
        }
        Ok(())
    }

    /// Runtime counterpart of [`Format::check_packed`], logging rejections.
    pub fn validate_packed(&self, word_bits: u32) -> Result<(), Error> {
        self.check_packed(word_bits).map_err(|err| {
            log::debug!(
                "Color format {} can't be packed in {} bits: {}",
                self,
                word_bits,
                err
            );
            Error::InvalidFormat(err)
        })
    }

    /// Panics at compile time when used in a constant and the descriptor
    /// can't be packed in `word_bits` bits.
    pub(crate) const fn assert_packed(&self, word_bits: u32) {
        match self.check_packed(word_bits) {
            Ok(()) => {}
            Err(FormatError::DuplicateChannel(_)) => {
                panic!("color format lists a channel more than once")
            }
            Err(FormatError::MissingColorChannel(_)) => {
                panic!("color format has a color channel without bits")
            }
            Err(FormatError::WidthTooLarge { .. }) => {
                panic!("color format has a channel too wide to be packed")
            }
            Err(FormatError::Overflow { .. }) => {
                panic!("color format doesn't fit in the storage word")
            }
        }
    }

    /// Panics at compile time when used in a constant and the descriptor is
    /// malformed.
    pub(crate) const fn assert_valid(&self) {
        match self.check() {
            Ok(()) => {}
            Err(FormatError::DuplicateChannel(_)) => {
                panic!("color format lists a channel more than once")
            }
            Err(FormatError::MissingColorChannel(_)) => {
                panic!("color format has a color channel without bits")
            }
            Err(FormatError::WidthTooLarge { .. }) => panic!("color format has a channel too wide"),
            Err(FormatError::Overflow { .. }) => panic!("color format overflows"),
        }
    }
}

impl Display for Format {
    /// Prints the channel names in order followed by their widths, e.g.
    /// `rgb565` or `argb8888`. Channels without bits are omitted.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for c in self.order.iter().filter(|c| self.width(**c) > 0) {
            write!(f, "{}", c)?;
        }
        for c in self.order.iter().filter(|c| self.width(**c) > 0) {
            write!(f, "{}", self.width(*c))?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFormat {
    order: [Channel; 4],
    bits: [u32; 4],
}

#[cfg(feature = "serde")]
impl TryFrom<RawFormat> for Format {
    type Error = Error;

    fn try_from(raw: RawFormat) -> Result<Self, Self::Error> { Format::new(raw.order, raw.bits) }
}

/// Type-level color format.
///
/// Implemented by zero-sized marker types such as [`Rgb565`] so that the
/// format of a color is part of its type.
pub trait ColorFormat:
    Copy + Clone + Default + PartialEq + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static
{
    /// Channel layout.
    const FORMAT: Format;
    /// Short name of the format.
    const NAME: &'static str;

    /// Compile-time check of [`ColorFormat::FORMAT`].
    ///
    /// Colors built from a malformed format are rejected:
    ///
    /// ```compile_fail
    /// use lanes::color::{Channel::*, ColorFormat, Format, U8};
    ///
    /// #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    /// struct Gba888;
    ///
    /// impl ColorFormat for Gba888 {
    ///     const FORMAT: Format = Format::from_raw([R, G, B, A], [0, 8, 8, 8]);
    ///     const NAME: &'static str = "gba888";
    /// }
    ///
    /// let _ = U8::<Gba888>::new([0, 1, 2, 3]);
    /// ```
    const VALID: () = Self::FORMAT.assert_valid();
}

macro_rules! color_formats {
    ($($ty:ident => $name:literal, [$($c:ident),*], [$($bits:literal),*]);* $(;)?) => {
        $(
            #[doc = concat!("The `", $name, "` color format.")]
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $ty;

            impl ColorFormat for $ty {
                const FORMAT: Format = Format::from_raw([$(Channel::$c),*], [$($bits),*]);
                const NAME: &'static str = $name;
            }
        )*
    };
}

color_formats!(
    Rgb565 => "rgb565", [R, G, B, A], [5, 6, 5, 0];
    Bgr565 => "bgr565", [B, G, R, A], [5, 6, 5, 0];
    Rgba4444 => "rgba4444", [R, G, B, A], [4, 4, 4, 4];
    Bgra4444 => "bgra4444", [B, G, R, A], [4, 4, 4, 4];
    Argb4444 => "argb4444", [A, R, G, B], [4, 4, 4, 4];
    Rgba8888 => "rgba8888", [R, G, B, A], [8, 8, 8, 8];
    Bgra8888 => "bgra8888", [B, G, R, A], [8, 8, 8, 8];
    Argb8888 => "argb8888", [A, R, G, B], [8, 8, 8, 8];
    Rgba16161616 => "rgba16161616", [R, G, B, A], [16, 16, 16, 16];
    Bgra16161616 => "bgra16161616", [B, G, R, A], [16, 16, 16, 16];
    Argb16161616 => "argb16161616", [A, R, G, B], [16, 16, 16, 16];
    Rgbaf32 => "rgbaf32", [R, G, B, A], [32, 32, 32, 32];
    Bgraf32 => "bgraf32", [B, G, R, A], [32, 32, 32, 32];
    Argbf32 => "argbf32", [A, R, G, B], [32, 32, 32, 32];
    Rgbaf64 => "rgbaf64", [R, G, B, A], [64, 64, 64, 64];
    Bgraf64 => "bgraf64", [B, G, R, A], [64, 64, 64, 64];
    Argbf64 => "argbf64", [A, R, G, B], [64, 64, 64, 64];
);

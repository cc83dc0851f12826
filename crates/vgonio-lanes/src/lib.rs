//! # vgonio-lanes
//! Fixed-size numeric vectors and matrices with SIMD-friendly layouts, plus
//! packed color encodings.
//!
//! - [`Vector<T, N>`] stores `N` lanes of a [`Scalar`] `T`. Power-of-two lane
//!   counts are aligned to the vector size, other counts are laid out like a
//!   plain array.
//! - [`Matrix<T, ROWS, COLS>`] is a sequence of column vectors; [`Mat`]
//!   collapses to a bare vector for a single column.
//! - [`load`], [`store`], [`permute`] and the homogeneous [`load3`] and
//!   [`store3`] move data between vectors and plain sequences.
//! - [`color`] holds packed ([`color::Bitfield`]) and unpacked
//!   ([`color::ColorVector`]) colors.
//!
//! ```
//! use lanes::{load3, permute, store3, Vec3d, Vec4d};
//!
//! let v4: Vec4d = load3(&[1.0, 2.0, 3.0], 5.0);
//! let v3: Vec3d = store3(v4, 1.0).into();
//! assert_eq!(v3.into_array(), [0.2, 0.4, 0.6]);
//! assert_eq!(permute!(v4, 3, 1, 2, 0).into_array(), [5.0, 2.0, 3.0, 1.0]);
//! ```
#![warn(missing_docs)]

pub mod color;
mod convert;
mod error;
mod lanes;
mod matrix;
mod ops;
mod scalar;
mod types;
mod vector;

#[cfg(feature = "glam")]
mod interop;

pub use convert::{load, load3, permute, store, store3, store_padded};
pub use error::Error;
pub use lanes::{is_pow2, next_pow2, LaneCount, Layout, SupportedLaneCount};
pub use matrix::{ColumnCount, Mat, Matrix, SupportedColumnCount};
pub use ops::{cross, dot, transpose, Cross};
pub use scalar::{
    Align1, Align128, Align16, Align2, Align32, Align4, Align64, Align8, AlignMarker, MaybePod,
    Real, Scalar,
};
pub use types::*;
pub use vector::Vector;

use crate::{
    lanes::{LaneCount, SupportedLaneCount},
    scalar::{Scalar, Sealed},
    vector::Vector,
};
use std::{
    fmt::{Debug, Formatter},
    ops::{Index, IndexMut, Mul},
};

/// Column-major matrix of `COLS` columns, each a [`Vector`] of `ROWS` lanes.
///
/// Columns are independent vector values; each keeps the layout selected
/// for its lane count, so the columns of a `Matrix<f32, 4, 4>` are each
/// 16-byte aligned.
#[repr(C)]
pub struct Matrix<T: Scalar, const ROWS: usize, const COLS: usize>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
    cols: [Vector<T, ROWS>; COLS],
}

/// Type-level column count.
pub struct ColumnCount<const C: usize>;

/// Column counts for which a matrix type exists.
///
/// A single column names the bare [`Vector`] type, so that `Mat<T, R, 1>` is
/// a plain vector and never a one-column wrapper.
pub trait SupportedColumnCount: Sealed {
    /// Matrix type with this many columns of `ROWS` lanes.
    type Matrix<T: Scalar, const ROWS: usize>
    where
        LaneCount<ROWS>: SupportedLaneCount;
}

impl Sealed for ColumnCount<1> {}

impl SupportedColumnCount for ColumnCount<1> {
    type Matrix<T: Scalar, const ROWS: usize> = Vector<T, ROWS>
    where
        LaneCount<ROWS>: SupportedLaneCount;
}

macro_rules! impl_column_count {
    ($($c:literal),* $(,)?) => {
        $(
            impl Sealed for ColumnCount<$c> {}

            impl SupportedColumnCount for ColumnCount<$c> {
                type Matrix<T: Scalar, const ROWS: usize> = Matrix<T, ROWS, $c>
                where
                    LaneCount<ROWS>: SupportedLaneCount;
            }
        )*
    };
}

impl_column_count!(2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16);

/// Matrix of `COLS` columns of `ROWS` lanes; a bare vector when `COLS` is 1.
pub type Mat<T, const ROWS: usize, const COLS: usize> =
    <ColumnCount<COLS> as SupportedColumnCount>::Matrix<T, ROWS>;

impl<T: Scalar, const ROWS: usize, const COLS: usize> Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
    /// Number of rows.
    pub const NUM_ROWS: usize = ROWS;

    /// Number of columns.
    pub const NUM_COLS: usize = COLS;

    /// Creates a new matrix from its columns.
    pub const fn new(cols: [Vector<T, ROWS>; COLS]) -> Self { Self { cols } }

    /// Creates a new matrix from column arrays.
    ///
    /// The layout of the input reads like a list of columns:
    /// `from_cols([[1, 2], [3, 4]])` has `1, 2` in its first column.
    pub fn from_cols(cols: [[T; ROWS]; COLS]) -> Self { Self::new(cols.map(Vector::new)) }

    /// Creates a new matrix from row arrays.
    pub fn from_rows(rows: [[T; COLS]; ROWS]) -> Self {
        let mut m = Self::zeros();
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                m.cols[c][r] = value;
            }
        }
        m
    }

    /// Creates a new matrix with all elements set to zero.
    pub fn zeros() -> Self { Self::new([Vector::zeros(); COLS]) }

    /// Returns the columns.
    pub fn cols(&self) -> &[Vector<T, ROWS>; COLS] { &self.cols }

    /// Returns the column at `index`.
    pub fn col(&self, index: usize) -> Vector<T, ROWS> { self.cols[index] }

    /// Returns a mutable reference to the column at `index`.
    pub fn col_mut(&mut self, index: usize) -> &mut Vector<T, ROWS> { &mut self.cols[index] }

    /// Returns the row at `index` as a plain array.
    pub fn row(&self, index: usize) -> [T; COLS] { self.cols.map(|col| col[index]) }

    /// Returns the element at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> Option<T> { self.cols.get(col)?.get(row) }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Matrix<T, COLS, ROWS>
    where
        LaneCount<COLS>: SupportedLaneCount,
    {
        let mut t = Matrix::<T, COLS, ROWS>::zeros();
        for (c, col) in self.cols.iter().enumerate() {
            for (r, &value) in col.iter().enumerate() {
                t.cols[r][c] = value;
            }
        }
        t
    }

    /// Multiplies the matrix by a column vector.
    pub fn mul_vec(&self, v: &Vector<T, COLS>) -> Vector<T, ROWS>
    where
        LaneCount<COLS>: SupportedLaneCount,
    {
        self.cols
            .iter()
            .zip(v.iter())
            .fold(Vector::zeros(), |acc, (col, &s)| acc + *col * s)
    }

    /// Multiplies two matrices.
    pub fn mul_mat<const K: usize>(&self, rhs: &Matrix<T, COLS, K>) -> Matrix<T, ROWS, K>
    where
        LaneCount<COLS>: SupportedLaneCount,
    {
        Matrix::new(rhs.cols.map(|col| self.mul_vec(&col)))
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// Creates a new identity matrix.
    pub fn identity() -> Self {
        let mut m = Self::zeros();
        for i in 0..N {
            m.cols[i][i] = T::one();
        }
        m
    }
}

impl<T: Scalar, const ROWS: usize, const COLS: usize> Clone for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
    fn clone(&self) -> Self { *self }
}

impl<T: Scalar, const ROWS: usize, const COLS: usize> Copy for Matrix<T, ROWS, COLS> where
    LaneCount<ROWS>: SupportedLaneCount
{
}

impl<T: Scalar, const ROWS: usize, const COLS: usize> PartialEq for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
    fn eq(&self, other: &Self) -> bool { self.cols == other.cols }
}

impl<T: Scalar, const ROWS: usize, const COLS: usize> Default for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
    fn default() -> Self { Self::zeros() }
}

impl<T: Scalar, const ROWS: usize, const COLS: usize> Debug for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.cols.iter().map(|c| c.as_array())).finish()
    }
}

impl<T: Scalar, const ROWS: usize, const COLS: usize> Index<usize> for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
    type Output = Vector<T, ROWS>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output { &self.cols[index] }
}

impl<T: Scalar, const ROWS: usize, const COLS: usize> IndexMut<usize> for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output { &mut self.cols[index] }
}

impl<T: Scalar, const ROWS: usize, const COLS: usize> Index<(usize, usize)>
    for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
    type Output = T;

    /// Indexes by `(row, col)`.
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output { &self.cols[col][row] }
}

impl<T: Scalar, const ROWS: usize, const COLS: usize> IndexMut<(usize, usize)>
    for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.cols[col][row]
    }
}

impl<T: Scalar, const ROWS: usize, const COLS: usize> Mul<Vector<T, COLS>>
    for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
    LaneCount<COLS>: SupportedLaneCount,
{
    type Output = Vector<T, ROWS>;

    fn mul(self, rhs: Vector<T, COLS>) -> Self::Output { self.mul_vec(&rhs) }
}

impl<T: Scalar, const ROWS: usize, const COLS: usize, const K: usize> Mul<Matrix<T, COLS, K>>
    for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
    LaneCount<COLS>: SupportedLaneCount,
{
    type Output = Matrix<T, ROWS, K>;

    fn mul(self, rhs: Matrix<T, COLS, K>) -> Self::Output { self.mul_mat(&rhs) }
}

#[cfg(feature = "bytemuck")]
unsafe impl<T: Scalar, const ROWS: usize, const COLS: usize> bytemuck::Zeroable
    for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
}

// SAFETY: an array of padding-free columns.
#[cfg(feature = "bytemuck")]
unsafe impl<T: Scalar, const ROWS: usize, const COLS: usize> bytemuck::Pod
    for Matrix<T, ROWS, COLS>
where
    LaneCount<ROWS>: SupportedLaneCount,
{
}

#[cfg(feature = "serde")]
impl<T, const ROWS: usize, const COLS: usize> serde::Serialize for Matrix<T, ROWS, COLS>
where
    T: Scalar + serde::Serialize,
    LaneCount<ROWS>: SupportedLaneCount,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(COLS)?;
        for col in &self.cols {
            tuple.serialize_element(col)?;
        }
        tuple.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T, const ROWS: usize, const COLS: usize> serde::Deserialize<'de>
    for Matrix<T, ROWS, COLS>
where
    T: Scalar + serde::Deserialize<'de>,
    LaneCount<ROWS>: SupportedLaneCount,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // serde has no impl for arrays of generic length.
        let cols: Vec<Vector<T, ROWS>> = serde::Deserialize::deserialize(deserializer)?;
        let len = cols.len();
        let cols: [Vector<T, ROWS>; COLS] = cols.try_into().map_err(|_| {
            serde::de::Error::invalid_length(len, &format!("{} columns", COLS).as_str())
        })?;
        Ok(Self::new(cols))
    }
}

//! Common vector and matrix algebra.

use crate::{
    lanes::{LaneCount, SupportedLaneCount},
    matrix::Matrix,
    scalar::Scalar,
    vector::Vector,
};

/// Dot product of two vectors.
pub fn dot<T: Scalar, const N: usize>(a: &Vector<T, N>, b: &Vector<T, N>) -> T
where
    LaneCount<N>: SupportedLaneCount,
{
    (*a * *b).sum()
}

/// Vectors with a cross product.
///
/// Implemented for all 3-lane vectors and for 4-lane floating point vectors,
/// where the fourth lane is ignored and set to zero in the result.
pub trait Cross {
    /// Cross product of `self` and `rhs`.
    fn cross(&self, rhs: &Self) -> Self;
}

/// Cross product of two vectors.
pub fn cross<V: Cross>(a: &V, b: &V) -> V { a.cross(b) }

impl<T: Scalar> Cross for Vector<T, 3> {
    fn cross(&self, rhs: &Self) -> Self {
        let (a, b) = (self, rhs);
        Vector::new([
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ])
    }
}

impl Cross for Vector<f32, 4> {
    fn cross(&self, rhs: &Self) -> Self { cross4_f32(self, rhs) }
}

impl Cross for Vector<f64, 4> {
    fn cross(&self, rhs: &Self) -> Self { cross4_scalar(self, rhs) }
}

fn cross4_scalar<T: Scalar>(a: &Vector<T, 4>, b: &Vector<T, 4>) -> Vector<T, 4> {
    let [x, y, z] = Vector::new([a[0], a[1], a[2]])
        .cross(&Vector::new([b[0], b[1], b[2]]))
        .into_array();
    Vector::new([x, y, z, T::zero()])
}

cfg_if::cfg_if! {
    if #[cfg(all(target_arch = "x86_64", target_feature = "sse"))] {
        fn cross4_f32(a: &Vector<f32, 4>, b: &Vector<f32, 4>) -> Vector<f32, 4> {
            use std::arch::x86_64::{_mm_load_ps, _mm_mul_ps, _mm_shuffle_ps, _mm_store_ps, _mm_sub_ps};
            // (y, z, x, w)
            const YZXW: i32 = 0b11_00_10_01;
            let mut out = Vector::<f32, 4>::zeros();
            // SAFETY: 4-lane f32 vectors are 16-byte aligned and SSE is
            // enabled on the target.
            unsafe {
                let va = _mm_load_ps(a.as_ptr());
                let vb = _mm_load_ps(b.as_ptr());
                let a_yzx = _mm_shuffle_ps(va, va, YZXW);
                let b_yzx = _mm_shuffle_ps(vb, vb, YZXW);
                let c = _mm_sub_ps(_mm_mul_ps(va, b_yzx), _mm_mul_ps(a_yzx, vb));
                _mm_store_ps(out.as_mut_slice().as_mut_ptr(), _mm_shuffle_ps(c, c, YZXW));
            }
            // a.w * b.w - a.w * b.w isn't zero for non-finite w.
            out[3] = 0.0;
            out
        }
    } else {
        fn cross4_f32(a: &Vector<f32, 4>, b: &Vector<f32, 4>) -> Vector<f32, 4> {
            cross4_scalar(a, b)
        }
    }
}

impl<T: Scalar, const N: usize> Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// Dot product with `rhs`. See [`dot`].
    pub fn dot(&self, rhs: &Self) -> T { dot(self, rhs) }
}

/// Transposes a matrix.
pub fn transpose<T: Scalar, const ROWS: usize, const COLS: usize>(
    m: &Matrix<T, ROWS, COLS>,
) -> Matrix<T, COLS, ROWS>
where
    LaneCount<ROWS>: SupportedLaneCount,
    LaneCount<COLS>: SupportedLaneCount,
{
    m.transpose()
}

impl<T: Scalar> Matrix<T, 2, 2> {
    /// Determinant of the matrix.
    pub fn determinant(&self) -> T { self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)] }
}

impl<T: Scalar> Matrix<T, 3, 3> {
    /// Determinant of the matrix, computed as the scalar triple product of
    /// its columns.
    pub fn determinant(&self) -> T { dot(&self[0], &self[1].cross(&self[2])) }
}

impl<T: Scalar> Matrix<T, 4, 4> {
    /// Determinant of the matrix by cofactor expansion along the first row.
    pub fn determinant(&self) -> T {
        let mut det = T::zero();
        for c in 0..4 {
            let mut minor = Matrix::<T, 3, 3>::zeros();
            for (k, src) in (0..4).filter(|&k| k != c).enumerate() {
                for r in 0..3 {
                    minor[(r, k)] = self[(r + 1, src)];
                }
            }
            let term = self[(0, c)] * minor.determinant();
            det = if c % 2 == 0 { det + term } else { det - term };
        }
        det
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn dot_product() {
        let a = Vector::new([1, 2, 3]);
        let b = Vector::new([4, -5, 6]);
        assert_eq!(dot(&a, &b), 12);
        assert_eq!(a.dot(&a), 14);
        let a = Vector::<f32, 4>::splat(0.5);
        assert_relative_eq!(a.dot(&a), 1.0);
    }

    #[test]
    fn cross_product() {
        let x = Vector::new([1.0f64, 0.0, 0.0]);
        let y = Vector::new([0.0f64, 1.0, 0.0]);
        assert_eq!(cross(&x, &y).into_array(), [0.0, 0.0, 1.0]);
        assert_eq!(y.cross(&x).into_array(), [0.0, 0.0, -1.0]);
        let a = Vector::new([2, 3, 4]);
        let b = Vector::new([5, 6, 7]);
        assert_eq!(a.cross(&b).into_array(), [-3, 6, -3]);
    }

    #[test]
    fn cross_product_4_lanes() {
        let a = Vector::<f32, 4>::new([2.0, 3.0, 4.0, 9.0]);
        let b = Vector::<f32, 4>::new([5.0, 6.0, 7.0, -1.0]);
        assert_eq!(a.cross(&b).into_array(), [-3.0, 6.0, -3.0, 0.0]);
        assert_eq!(a.cross(&b), cross4_scalar(&a, &b));
        let a = Vector::<f64, 4>::new([2.0, 3.0, 4.0, f64::NAN]);
        let b = Vector::<f64, 4>::new([5.0, 6.0, 7.0, 1.0]);
        assert_eq!(a.cross(&b).into_array(), [-3.0, 6.0, -3.0, 0.0]);
    }

    #[test]
    fn determinants() {
        assert_eq!(Matrix::<i32, 2, 2>::from_rows([[1, 2], [3, 4]]).determinant(), -2);
        assert_eq!(
            Matrix::<i32, 3, 3>::from_rows([[6, 1, 1], [4, -2, 5], [2, 8, 7]]).determinant(),
            -306
        );
        let m = Matrix::<i64, 4, 4>::from_rows([
            [1, 0, 2, -1],
            [3, 0, 0, 5],
            [2, 1, 4, -3],
            [1, 0, 5, 0],
        ]);
        assert_eq!(m.determinant(), 30);
        assert_relative_eq!(Matrix::<f32, 4, 4>::identity().determinant(), 1.0);
        assert_relative_eq!(Matrix::<f64, 3, 3>::identity().determinant(), 1.0);
    }

    #[test]
    fn transpose_helper() {
        let m = Matrix::<i32, 2, 3>::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(transpose(&m).row(0), [1, 4]);
        assert_eq!(transpose(&transpose(&m)), m);
    }

    proptest! {
        #[test]
        fn cross_is_orthogonal(a in prop::array::uniform3(-100i64..100),
            b in prop::array::uniform3(-100i64..100))
        {
            let (a, b) = (Vector::new(a), Vector::new(b));
            let c = a.cross(&b);
            prop_assert_eq!(c.dot(&a), 0);
            prop_assert_eq!(c.dot(&b), 0);
        }

        #[test]
        fn sse_cross_matches_scalar(a in prop::array::uniform4(-1.0e3f32..1.0e3),
            b in prop::array::uniform4(-1.0e3f32..1.0e3))
        {
            let (a, b) = (Vector::new(a), Vector::new(b));
            prop_assert_eq!(a.cross(&b), cross4_scalar(&a, &b));
        }

        #[test]
        fn determinant_of_transpose(rows in prop::array::uniform4(prop::array::uniform4(-10i64..10))) {
            let m = Matrix::<i64, 4, 4>::from_rows(rows);
            prop_assert_eq!(m.determinant(), m.transpose().determinant());
        }
    }
}

//! Conversions between plain element sequences and vectors of different
//! lengths.
//!
//! "Sequences" are plain arrays `[T; N]` with element alignment, the form in
//! which data usually arrives from and leaves for the outside world.
//! [`load`] moves them into vectors, [`store`] moves vectors back out, and
//! [`permute`] reorders lanes between vectors.

use crate::{
    lanes::{LaneCount, SupportedLaneCount},
    scalar::Scalar,
    vector::Vector,
};

/// Builds a 4-lane vector from 3 elements and an explicit homogeneous
/// coordinate `w`.
///
/// No normalization is performed.
pub fn load3<T: Scalar>(src: &[T; 3], w: T) -> Vector<T, 4> {
    Vector::new([src[0], src[1], src[2], w])
}

/// Performs the homogeneous divide of a 4-lane vector and returns the first
/// three components.
///
/// The 4th lane is first scaled by `w`. Unless the result is exactly zero
/// (a direction) or exactly one (already normalized), all four lanes are
/// divided by it. Divisors close to zero are not guarded against, so the
/// output may hold infinities or NaNs.
pub fn store3<T: Scalar>(src: Vector<T, 4>, w: T) -> [T; 3] {
    let mut v = src;
    v[3] = v[3] * w;
    let h = v[3];
    if h != T::zero() && h != T::one() {
        v /= h;
    }
    [v[0], v[1], v[2]]
}

/// Loads a sequence of `SRC` elements into a vector of `DST` lanes.
///
/// The first `min(SRC, DST)` elements are copied; lanes past `SRC` are set
/// to zero.
pub fn load<T: Scalar, const SRC: usize, const DST: usize>(src: &[T; SRC]) -> Vector<T, DST>
where
    LaneCount<DST>: SupportedLaneCount,
{
    let mut dst = Vector::<T, DST>::zeros();
    let n = SRC.min(DST);
    dst.as_mut_slice()[..n].copy_from_slice(&src[..n]);
    dst
}

/// Stores a vector of `SRC` lanes into a sequence of `DST` elements.
///
/// Equivalent to [`store_padded`] with a zero pad.
pub fn store<T: Scalar, const SRC: usize, const DST: usize>(src: &Vector<T, SRC>) -> [T; DST]
where
    LaneCount<SRC>: SupportedLaneCount,
{
    store_padded(src, T::zero())
}

/// Stores a vector of `SRC` lanes into a sequence of `DST` elements.
///
/// The first `min(SRC, DST)` lanes are copied; when `DST > SRC`, the
/// remaining elements are set to `pad`. The result always holds exactly
/// `DST` elements.
pub fn store_padded<T: Scalar, const SRC: usize, const DST: usize>(
    src: &Vector<T, SRC>,
    pad: T,
) -> [T; DST]
where
    LaneCount<SRC>: SupportedLaneCount,
{
    let mut dst = [pad; DST];
    let n = SRC.min(DST);
    dst[..n].copy_from_slice(&src.as_slice()[..n]);
    dst
}

/// Selects lanes of `src` by index into a new vector of `M` lanes.
///
/// Lane `k` of the result is `src[indices[k] % N]`: indices wrap around the
/// source length instead of going out of bounds, so any index is valid. The
/// output may be shorter or longer than the input, and lanes may repeat.
///
/// See also the [`permute!`](crate::permute!) macro.
pub fn permute<T: Scalar, const N: usize, const M: usize>(
    src: &Vector<T, N>,
    indices: [usize; M],
) -> Vector<T, M>
where
    LaneCount<N>: SupportedLaneCount,
    LaneCount<M>: SupportedLaneCount,
{
    Vector::new(indices.map(|i| src[i % N]))
}

/// Permutes the lanes of a vector with a variadic list of indices.
///
/// `permute!(v, 3, 1, 2, 0)` is [`permute(&v, [3, 1, 2, 0])`](crate::permute()).
///
/// ```
/// use lanes::{permute, Vector};
///
/// let v = Vector::<f32, 4>::new([1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(permute!(v, 2, 1, 0).into_array(), [3.0, 2.0, 1.0]);
/// ```
#[macro_export]
macro_rules! permute {
    ($v:expr, $($i:expr),+ $(,)?) => {
        $crate::permute(&$v, [$($i),+])
    };
}

impl<T: Scalar, const N: usize> Vector<T, N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// Loads the first `N` elements of a sequence, zero-filling missing
    /// lanes. See [`load`].
    pub fn load<const SRC: usize>(src: &[T; SRC]) -> Self { load(src) }

    /// Stores the lanes into a sequence of `DST` elements, padding with
    /// `pad`. See [`store_padded`].
    pub fn store<const DST: usize>(&self, pad: T) -> [T; DST] { store_padded(self, pad) }

    /// Resizes the vector to `M` lanes, truncating or zero-filling.
    pub fn resize<const M: usize>(&self) -> Vector<T, M>
    where
        LaneCount<M>: SupportedLaneCount,
    {
        load(self.as_array())
    }

    /// Selects lanes by index. See [`permute`].
    pub fn permute<const M: usize>(&self, indices: [usize; M]) -> Vector<T, M>
    where
        LaneCount<M>: SupportedLaneCount,
    {
        permute(self, indices)
    }
}

impl<T: Scalar> Vector<T, 4> {
    /// Projects a homogeneous 4-lane vector to 3 components. See [`store3`].
    pub fn to_cartesian(self) -> Vector<T, 3> { Vector::new(store3(self, T::one())) }
}

impl<T: Scalar> Vector<T, 3> {
    /// Extends a 3-lane vector with a homogeneous coordinate. See [`load3`].
    pub fn to_homogeneous(self, w: T) -> Vector<T, 4> { load3(self.as_array(), w) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn load3_keeps_w() {
        let v = load3(&[1.0f64, 2.0, 3.0], 5.0);
        assert_eq!(v.into_array(), [1.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn store3_divides_by_w() {
        let v = Vector::new([2.0f32, 4.0, 6.0, 2.0]);
        assert_eq!(store3(v, 1.0), [1.0, 2.0, 3.0]);
        // w scales the homogeneous coordinate before the divide
        assert_eq!(store3(v, 2.0), [0.5, 1.0, 1.5]);
        let v = Vector::new([2.0f32, 4.0, 6.0, 1.0]);
        assert_eq!(store3(v, 0.5), [4.0, 8.0, 12.0]);
    }

    #[test]
    fn store3_skips_zero_and_one() {
        let dir = Vector::new([2.0f32, 4.0, 6.0, 0.0]);
        assert_eq!(store3(dir, 1.0), [2.0, 4.0, 6.0]);
        let point = Vector::new([2.0f32, 4.0, 6.0, 1.0]);
        assert_eq!(store3(point, 1.0), [2.0, 4.0, 6.0]);
        let zeroed = Vector::new([2.0f32, 4.0, 6.0, 3.0]);
        assert_eq!(store3(zeroed, 0.0), [2.0, 4.0, 6.0]);
    }

    #[test]
    fn store3_near_zero_is_not_guarded() {
        let v = Vector::new([1.0f32, -1.0, 0.0, f32::MIN_POSITIVE / 1024.0]);
        let [x, y, z] = store3(v, 1.0);
        assert!(x.is_infinite() && x > 0.0);
        assert!(y.is_infinite() && y < 0.0);
        assert!(z.is_nan() || z == 0.0);
    }

    #[test]
    fn store3_integers() {
        let v = Vector::new([6i32, 9, 12, 3]);
        assert_eq!(store3(v, 1), [2, 3, 4]);
    }

    #[test]
    fn load_pads_with_zero() {
        let v: Vector<f32, 4> = load(&[1.0, 2.0, 3.0]);
        assert_eq!(v.into_array(), [1.0, 2.0, 3.0, 0.0]);
        let v: Vector<i32, 2> = load(&[1, 2, 3, 4, 5]);
        assert_eq!(v.into_array(), [1, 2]);
        let v = Vector::<u8, 8>::load(&[9, 8]);
        assert_eq!(v.into_array(), [9, 8, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn store_truncates_and_pads() {
        let v: Vector<f32, 4> = load(&[1.0, 2.0, 3.0]);
        assert_eq!(store::<f32, 4, 3>(&v), [1.0, 2.0, 3.0]);
        let v = Vector::new([1.0f32, 2.0]);
        assert_eq!(store_padded::<f32, 2, 4>(&v, 9.0), [1.0, 2.0, 9.0, 9.0]);
        assert_eq!(store::<f32, 2, 4>(&v), [1.0, 2.0, 0.0, 0.0]);
        assert_eq!(v.store::<5>(-1.0), [1.0, 2.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn resize_vector() {
        let v = Vector::new([1, 2, 3]);
        assert_eq!(v.resize::<5>().into_array(), [1, 2, 3, 0, 0]);
        assert_eq!(v.resize::<2>().into_array(), [1, 2]);
    }

    #[test]
    fn permute_shrinks_and_grows() {
        let v = Vector::new([1.0f64, 2.0, 3.0, 4.0]);
        assert_eq!(permute(&v, [3, 1, 2, 0]).into_array(), [4.0, 2.0, 3.0, 1.0]);
        assert_eq!(permute(&v, [2, 1]).into_array(), [3.0, 2.0]);
        assert_eq!(
            permute(&v, [0, 0, 1, 1, 2]).into_array(),
            [1.0, 1.0, 2.0, 2.0, 3.0]
        );
        let v3 = Vector::new([1, 2, 3]);
        assert_eq!(crate::permute!(v3, 2, 1, 0).into_array(), [3, 2, 1]);
        assert_eq!(v3.permute([1]).into_array(), [2]);
    }

    #[test]
    fn permute_wraps_indices() {
        let v = Vector::new([1, 2, 3, 4]);
        assert_eq!(permute(&v, [4]), permute(&v, [0]));
        assert_eq!(permute(&v, [5, 10, 15]).into_array(), [2, 3, 4]);
        let v = Vector::new([1, 2, 3]);
        assert_eq!(permute(&v, [3, 4, 5, 6]).into_array(), [1, 2, 3, 1]);
    }

    #[test]
    fn homogeneous_helpers() {
        let p = Vector::new([1.0f32, 2.0, 3.0]).to_homogeneous(2.0);
        assert_eq!(p.into_array(), [1.0, 2.0, 3.0, 2.0]);
        let c = p.to_cartesian();
        assert_relative_eq!(c.x(), 0.5);
        assert_relative_eq!(c.y(), 1.0);
        assert_relative_eq!(c.z(), 1.5);
    }

    proptest! {
        #[test]
        fn homogeneous_round_trip(v in prop::array::uniform3(-1.0e6f32..1.0e6)) {
            prop_assert_eq!(store3(load3(&v, 1.0), 1.0), v);
        }

        #[test]
        fn identity_permutation(v in prop::array::uniform4(any::<i64>())) {
            let v = Vector::new(v);
            prop_assert_eq!(permute(&v, [0, 1, 2, 3]), v);
        }

        #[test]
        fn permutation_wraps(v in prop::array::uniform5(any::<u16>()), i in 0usize..64) {
            let v = Vector::new(v);
            prop_assert_eq!(permute(&v, [i]), permute(&v, [i % 5]));
        }

        #[test]
        fn load_store_round_trip(v in prop::array::uniform3(any::<i32>())) {
            let wide: Vector<i32, 4> = load(&v);
            prop_assert_eq!(store::<i32, 4, 3>(&wide), v);
        }
    }
}

//! Conversions from and to `glam` types.

use crate::{matrix::Matrix, vector::Vector};

macro_rules! glam_vectors {
    ($($t:ty, $n:literal => $glam:ty);* $(;)?) => {
        $(
            impl From<$glam> for Vector<$t, $n> {
                fn from(v: $glam) -> Self { Self::new(v.to_array()) }
            }

            impl From<Vector<$t, $n>> for $glam {
                fn from(v: Vector<$t, $n>) -> Self { <$glam>::from_array(v.into_array()) }
            }
        )*
    };
}

glam_vectors!(
    f32, 2 => glam::Vec2;
    f32, 3 => glam::Vec3;
    f32, 4 => glam::Vec4;
    f64, 2 => glam::DVec2;
    f64, 3 => glam::DVec3;
    f64, 4 => glam::DVec4;
    i32, 2 => glam::IVec2;
    i32, 3 => glam::IVec3;
    i32, 4 => glam::IVec4;
    u32, 2 => glam::UVec2;
    u32, 3 => glam::UVec3;
    u32, 4 => glam::UVec4;
);

macro_rules! glam_matrices {
    ($($t:ty, $n:literal => $glam:ty);* $(;)?) => {
        $(
            impl From<$glam> for Matrix<$t, $n, $n> {
                fn from(m: $glam) -> Self { Self::from_cols(m.to_cols_array_2d()) }
            }

            impl From<Matrix<$t, $n, $n>> for $glam {
                fn from(m: Matrix<$t, $n, $n>) -> Self {
                    <$glam>::from_cols_array_2d(&m.cols().map(|c| c.into_array()))
                }
            }
        )*
    };
}

glam_matrices!(
    f32, 2 => glam::Mat2;
    f32, 3 => glam::Mat3;
    f32, 4 => glam::Mat4;
    f64, 2 => glam::DMat2;
    f64, 3 => glam::DMat3;
    f64, 4 => glam::DMat4;
);

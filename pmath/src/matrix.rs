use crate::numbers::Float;
use crate::vector::{Vec3, Vec4};

use std::ops::{Index, Mul};

/// A 4x4 row-major matrix. Points and vectors are treated as columns,
/// so `a * b` applies `b` first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4<T: Float> {
    m: [Vec4<T>; 4],
}

impl<T: Float> Mat4<T> {
    pub fn new(rows: [Vec4<T>; 4]) -> Self {
        Mat4 { m: rows }
    }

    pub fn new_identity() -> Self {
        Mat4::new_scale(Vec3::one())
    }

    pub fn new_translate(trans: Vec3<T>) -> Self {
        let (zero, one) = (T::zero(), T::one());
        Mat4 {
            m: [
                Vec4::new(one, zero, zero, trans.x),
                Vec4::new(zero, one, zero, trans.y),
                Vec4::new(zero, zero, one, trans.z),
                Vec4::new(zero, zero, zero, one),
            ],
        }
    }

    pub fn new_scale(scale: Vec3<T>) -> Self {
        let (zero, one) = (T::zero(), T::one());
        Mat4 {
            m: [
                Vec4::new(scale.x, zero, zero, zero),
                Vec4::new(zero, scale.y, zero, zero),
                Vec4::new(zero, zero, scale.z, zero),
                Vec4::new(zero, zero, zero, one),
            ],
        }
    }

    /// Rotation about the x-axis, `deg` in degrees.
    pub fn new_rotate_x(deg: T) -> Self {
        let (sin, cos) = deg.to_radians().sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Mat4 {
            m: [
                Vec4::new(one, zero, zero, zero),
                Vec4::new(zero, cos, -sin, zero),
                Vec4::new(zero, sin, cos, zero),
                Vec4::new(zero, zero, zero, one),
            ],
        }
    }

    /// Rotation about the y-axis, `deg` in degrees.
    pub fn new_rotate_y(deg: T) -> Self {
        let (sin, cos) = deg.to_radians().sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Mat4 {
            m: [
                Vec4::new(cos, zero, sin, zero),
                Vec4::new(zero, one, zero, zero),
                Vec4::new(-sin, zero, cos, zero),
                Vec4::new(zero, zero, zero, one),
            ],
        }
    }

    /// Rotation about the z-axis, `deg` in degrees.
    pub fn new_rotate_z(deg: T) -> Self {
        let (sin, cos) = deg.to_radians().sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Mat4 {
            m: [
                Vec4::new(cos, -sin, zero, zero),
                Vec4::new(sin, cos, zero, zero),
                Vec4::new(zero, zero, one, zero),
                Vec4::new(zero, zero, zero, one),
            ],
        }
    }

    pub fn transpose(&self) -> Self {
        let mut rows = [Vec4::zero(); 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for c in 0..4 {
                row[c] = self.m[c][r];
            }
        }
        Mat4 { m: rows }
    }

    /// Calculates the inverse of a matrix. Note that, because
    /// the inverse can be undefined, it retuns an option.
    pub fn inverse(&self) -> Option<Self> {
        let m = &self.m;
        let a2323 = m[2][2] * m[3][3] - m[2][3] * m[3][2];
        let a1323 = m[2][1] * m[3][3] - m[2][3] * m[3][1];
        let a1223 = m[2][1] * m[3][2] - m[2][2] * m[3][1];
        let a0323 = m[2][0] * m[3][3] - m[2][3] * m[3][0];
        let a0223 = m[2][0] * m[3][2] - m[2][2] * m[3][0];
        let a0123 = m[2][0] * m[3][1] - m[2][1] * m[3][0];
        let a2313 = m[1][2] * m[3][3] - m[1][3] * m[3][2];
        let a1313 = m[1][1] * m[3][3] - m[1][3] * m[3][1];
        let a1213 = m[1][1] * m[3][2] - m[1][2] * m[3][1];
        let a2312 = m[1][2] * m[2][3] - m[1][3] * m[2][2];
        let a1312 = m[1][1] * m[2][3] - m[1][3] * m[2][1];
        let a1212 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
        let a0313 = m[1][0] * m[3][3] - m[1][3] * m[3][0];
        let a0213 = m[1][0] * m[3][2] - m[1][2] * m[3][0];
        let a0312 = m[1][0] * m[2][3] - m[1][3] * m[2][0];
        let a0212 = m[1][0] * m[2][2] - m[1][2] * m[2][0];
        let a0113 = m[1][0] * m[3][1] - m[1][1] * m[3][0];
        let a0112 = m[1][0] * m[2][1] - m[1][1] * m[2][0];

        let det = m[0][0] * (m[1][1] * a2323 - m[1][2] * a1323 + m[1][3] * a1223)
            - m[0][1] * (m[1][0] * a2323 - m[1][2] * a0323 + m[1][3] * a0223)
            + m[0][2] * (m[1][0] * a1323 - m[1][1] * a0323 + m[1][3] * a0123)
            - m[0][3] * (m[1][0] * a1223 - m[1][1] * a0223 + m[1][2] * a0123);

        if det == T::zero() || !det.is_finite() {
            return None;
        }
        let inv_det = T::one() / det;

        let r0 = Vec4 {
            x: inv_det * (m[1][1] * a2323 - m[1][2] * a1323 + m[1][3] * a1223),
            y: inv_det * -(m[0][1] * a2323 - m[0][2] * a1323 + m[0][3] * a1223),
            z: inv_det * (m[0][1] * a2313 - m[0][2] * a1313 + m[0][3] * a1213),
            w: inv_det * -(m[0][1] * a2312 - m[0][2] * a1312 + m[0][3] * a1212),
        };
        let r1 = Vec4 {
            x: inv_det * -(m[1][0] * a2323 - m[1][2] * a0323 + m[1][3] * a0223),
            y: inv_det * (m[0][0] * a2323 - m[0][2] * a0323 + m[0][3] * a0223),
            z: inv_det * -(m[0][0] * a2313 - m[0][2] * a0313 + m[0][3] * a0213),
            w: inv_det * (m[0][0] * a2312 - m[0][2] * a0312 + m[0][3] * a0212),
        };
        let r2 = Vec4 {
            x: inv_det * (m[1][0] * a1323 - m[1][1] * a0323 + m[1][3] * a0123),
            y: inv_det * -(m[0][0] * a1323 - m[0][1] * a0323 + m[0][3] * a0123),
            z: inv_det * (m[0][0] * a1313 - m[0][1] * a0313 + m[0][3] * a0113),
            w: inv_det * -(m[0][0] * a1312 - m[0][1] * a0312 + m[0][3] * a0112),
        };
        let r3 = Vec4 {
            x: inv_det * -(m[1][0] * a1223 - m[1][1] * a0223 + m[1][2] * a0123),
            y: inv_det * (m[0][0] * a1223 - m[0][1] * a0223 + m[0][2] * a0123),
            z: inv_det * -(m[0][0] * a1213 - m[0][1] * a0213 + m[0][2] * a0113),
            w: inv_det * (m[0][0] * a1212 - m[0][1] * a0212 + m[0][2] * a0112),
        };

        Some(Mat4 {
            m: [r0, r1, r2, r3],
        })
    }

    /// Transforms a point (w = 1). The matrices here are affine, so the
    /// bottom row is ignored.
    pub fn mul_point(&self, p: Vec3<T>) -> Vec3<T> {
        Vec3 {
            x: self.m[0].dot_one(p),
            y: self.m[1].dot_one(p),
            z: self.m[2].dot_one(p),
        }
    }

    /// Transforms a vector (w = 0).
    pub fn mul_vector(&self, v: Vec3<T>) -> Vec3<T> {
        Vec3 {
            x: self.m[0].dot_zero(v),
            y: self.m[1].dot_zero(v),
            z: self.m[2].dot_zero(v),
        }
    }

    /// Largest absolute difference between the entries of two matrices.
    pub fn max_abs_diff(&self, o: &Self) -> T {
        let mut diff = T::zero();
        for r in 0..4 {
            for c in 0..4 {
                diff = diff.max((self.m[r][c] - o.m[r][c]).abs());
            }
        }
        diff
    }
}

impl<T: Float> Index<usize> for Mat4<T> {
    type Output = Vec4<T>;

    // One would have to use [r][c]
    fn index(&self, i: usize) -> &Vec4<T> {
        &self.m[i]
    }
}

impl<T: Float> Mul for Mat4<T> {
    type Output = Mat4<T>;

    fn mul(self, o: Mat4<T>) -> Mat4<T> {
        let mut rows = [Vec4::zero(); 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for c in 0..4 {
                row[c] = self.m[r].x * o.m[0][c]
                    + self.m[r].y * o.m[1][c]
                    + self.m[r].z * o.m[2][c]
                    + self.m[r].w * o.m[3][c];
            }
        }
        Mat4 { m: rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_z_quarter_turn() {
        let m = Mat4::new_rotate_z(90.0);
        let p = m.mul_point(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn product_applies_right_operand_first() {
        let t = Mat4::new_translate(Vec3::new(1.0, 0.0, 0.0));
        let s = Mat4::new_scale(Vec3::new(2.0, 2.0, 2.0));
        // Scale, then translate:
        let p = (t * s).mul_point(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(3.0, 2.0, 2.0));
        // Translate, then scale:
        let p = (s * t).mul_point(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn vectors_ignore_translation() {
        let t = Mat4::new_translate(Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(
            t.mul_vector(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn inverse_of_composite() {
        let m = Mat4::new_translate(Vec3::new(1.0, -2.0, 3.0))
            * Mat4::new_rotate_y(33.0)
            * Mat4::new_scale(Vec3::new(2.0, 0.5, 4.0));
        let inv = m.inverse().expect("composite should be invertible");
        assert!((m * inv).max_abs_diff(&Mat4::new_identity()) < 1e-12);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Mat4::new_scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(m.inverse().is_none());
    }

    #[test]
    fn rotation_transpose_is_inverse() {
        let r = Mat4::new_rotate_x(27.0) * Mat4::new_rotate_z(-61.0);
        assert!((r * r.transpose()).max_abs_diff(&Mat4::new_identity()) < 1e-12);
    }
}

// A Transform is built from a translate, a rotate (Euler angles in degrees) and
// a scale, composed in a configurable order. It always carries its exact inverse
// so that rays can go to local space and hits can come back without inverting
// a matrix per query.

pub mod sample_list;

use pmath::bbox::BBox3;
use pmath::matrix::Mat4;
use pmath::ray::Ray;
use pmath::vector::Vec3;
use simple_error::SimpleError;

use std::fmt;
use std::str::FromStr;

/// One of the three elementary operations a `Transform` is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Scale,
    Rotate,
    Translate,
}

/// The order in which scale, rotate and translate are applied to a point.
/// `SRT` scales first and translates last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformOrder {
    SRT,
    STR,
    RST,
    RTS,
    TRS,
    TSR,
}

impl TransformOrder {
    pub const ALL: [TransformOrder; 6] = [
        TransformOrder::SRT,
        TransformOrder::STR,
        TransformOrder::RST,
        TransformOrder::RTS,
        TransformOrder::TRS,
        TransformOrder::TSR,
    ];

    /// The elementary operations in the order they are applied to a point.
    pub fn ops(self) -> [Op; 3] {
        match self {
            TransformOrder::SRT => [Op::Scale, Op::Rotate, Op::Translate],
            TransformOrder::STR => [Op::Scale, Op::Translate, Op::Rotate],
            TransformOrder::RST => [Op::Rotate, Op::Scale, Op::Translate],
            TransformOrder::RTS => [Op::Rotate, Op::Translate, Op::Scale],
            TransformOrder::TRS => [Op::Translate, Op::Rotate, Op::Scale],
            TransformOrder::TSR => [Op::Translate, Op::Scale, Op::Rotate],
        }
    }
}

impl Default for TransformOrder {
    fn default() -> Self {
        TransformOrder::SRT
    }
}

/// The order in which the rotations about each axis are applied. `XYZ`
/// rotates about x first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotateOrder {
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
}

impl RotateOrder {
    pub const ALL: [RotateOrder; 6] = [
        RotateOrder::XYZ,
        RotateOrder::XZY,
        RotateOrder::YXZ,
        RotateOrder::YZX,
        RotateOrder::ZXY,
        RotateOrder::ZYX,
    ];

    /// Axis indices in the order they are applied.
    pub fn axes(self) -> [usize; 3] {
        match self {
            RotateOrder::XYZ => [0, 1, 2],
            RotateOrder::XZY => [0, 2, 1],
            RotateOrder::YXZ => [1, 0, 2],
            RotateOrder::YZX => [1, 2, 0],
            RotateOrder::ZXY => [2, 0, 1],
            RotateOrder::ZYX => [2, 1, 0],
        }
    }
}

impl Default for RotateOrder {
    fn default() -> Self {
        RotateOrder::ZXY
    }
}

impl FromStr for TransformOrder {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformOrder::ALL
            .iter()
            .copied()
            .find(|order| order.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimpleError::new(format!("unknown transform order: {}", s)))
    }
}

impl FromStr for RotateOrder {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RotateOrder::ALL
            .iter()
            .copied()
            .find(|order| order.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimpleError::new(format!("unknown rotate order: {}", s)))
    }
}

impl fmt::Display for TransformOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for RotateOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Builds the rotation matrix for the Euler angles `rotate` (degrees).
pub fn rotation_mat(rotate: Vec3<f64>, order: RotateOrder) -> Mat4<f64> {
    order
        .axes()
        .iter()
        .fold(Mat4::new_identity(), |mat, &axis| {
            let rot = match axis {
                0 => Mat4::new_rotate_x(rotate.x),
                1 => Mat4::new_rotate_y(rotate.y),
                _ => Mat4::new_rotate_z(rotate.z),
            };
            rot * mat
        })
}

#[derive(Clone, Copy, Debug)]
pub struct Transform {
    frd: Mat4<f64>,
    inv: Mat4<f64>,

    transform_order: TransformOrder,
    rotate_order: RotateOrder,

    // The components that generated the matrices:
    translate: Vec3<f64>,
    rotate: Vec3<f64>,
    scale: Vec3<f64>,
}

impl Transform {
    pub fn new(
        transform_order: TransformOrder,
        rotate_order: RotateOrder,
        translate: Vec3<f64>,
        rotate: Vec3<f64>,
        scale: Vec3<f64>,
    ) -> Self {
        let mut transf = Transform {
            frd: Mat4::new_identity(),
            inv: Mat4::new_identity(),
            transform_order,
            rotate_order,
            translate,
            rotate,
            scale,
        };
        transf.update_matrices();
        transf
    }

    pub fn new_identity() -> Self {
        Transform::new(
            TransformOrder::default(),
            RotateOrder::default(),
            Vec3::zero(),
            Vec3::zero(),
            Vec3::one(),
        )
    }

    /// Replaces every generating component at once.
    pub fn set(
        &mut self,
        transform_order: TransformOrder,
        rotate_order: RotateOrder,
        translate: Vec3<f64>,
        rotate: Vec3<f64>,
        scale: Vec3<f64>,
    ) {
        *self = Transform::new(transform_order, rotate_order, translate, rotate, scale);
    }

    pub fn set_translate(&mut self, translate: Vec3<f64>) {
        self.translate = translate;
        self.update_matrices();
    }

    pub fn set_rotate(&mut self, rotate: Vec3<f64>) {
        self.rotate = rotate;
        self.update_matrices();
    }

    pub fn set_scale(&mut self, scale: Vec3<f64>) {
        self.scale = scale;
        self.update_matrices();
    }

    pub fn set_transform_order(&mut self, order: TransformOrder) {
        self.transform_order = order;
        self.update_matrices();
    }

    pub fn set_rotate_order(&mut self, order: RotateOrder) {
        self.rotate_order = order;
        self.update_matrices();
    }

    // The inverse is put together from the inverse of each operation in reverse,
    // never by inverting the composite:
    fn update_matrices(&mut self) {
        let rot = rotation_mat(self.rotate, self.rotate_order);

        let (frd, inv) = self.transform_order.ops().iter().fold(
            (Mat4::new_identity(), Mat4::new_identity()),
            |(frd, inv), op| {
                let (op_frd, op_inv) = match op {
                    Op::Translate => (
                        Mat4::new_translate(self.translate),
                        Mat4::new_translate(-self.translate),
                    ),
                    Op::Rotate => (rot, rot.transpose()),
                    Op::Scale => (
                        Mat4::new_scale(self.scale),
                        Mat4::new_scale(self.scale.inv_scale(1.)),
                    ),
                };
                (op_frd * frd, inv * op_inv)
            },
        );

        self.frd = frd;
        self.inv = inv;
    }

    pub fn get_frd(&self) -> Mat4<f64> {
        self.frd
    }

    pub fn get_inv(&self) -> Mat4<f64> {
        self.inv
    }

    pub fn transform_order(&self) -> TransformOrder {
        self.transform_order
    }

    pub fn rotate_order(&self) -> RotateOrder {
        self.rotate_order
    }

    pub fn translate(&self) -> Vec3<f64> {
        self.translate
    }

    pub fn rotate(&self) -> Vec3<f64> {
        self.rotate
    }

    pub fn scale(&self) -> Vec3<f64> {
        self.scale
    }

    /// A zero scale component collapses space, leaving the inverse undefined.
    pub fn is_invertible(&self) -> bool {
        self.scale.x != 0.
            && self.scale.y != 0.
            && self.scale.z != 0.
            && self.scale.is_finite()
            && self.rotate.is_finite()
            && self.translate.is_finite()
    }

    pub fn point(&self, p: Vec3<f64>) -> Vec3<f64> {
        self.frd.mul_point(p)
    }

    pub fn vector(&self, v: Vec3<f64>) -> Vec3<f64> {
        self.frd.mul_vector(v)
    }

    pub fn inv_point(&self, p: Vec3<f64>) -> Vec3<f64> {
        self.inv.mul_point(p)
    }

    pub fn inv_vector(&self, v: Vec3<f64>) -> Vec3<f64> {
        self.inv.mul_vector(v)
    }

    pub fn bbox(&self, b: BBox3<f64>) -> BBox3<f64> {
        transf_bbox(&self.frd, b)
    }

    pub fn inv_bbox(&self, b: BBox3<f64>) -> BBox3<f64> {
        transf_bbox(&self.inv, b)
    }

    /// Takes a local ray into world space. The parametric extent is left alone,
    /// so a `t` found on one side is valid on the other.
    pub fn ray(&self, r: Ray<f64>) -> Ray<f64> {
        Ray {
            org: self.point(r.org),
            dir: self.vector(r.dir),
            t_near: r.t_near,
            t_far: r.t_far,
        }
    }

    /// Takes a world ray into local space. The direction is not renormalized.
    pub fn inv_ray(&self, r: Ray<f64>) -> Ray<f64> {
        Ray {
            org: self.inv_point(r.org),
            dir: self.inv_vector(r.dir),
            t_near: r.t_near,
            t_far: r.t_far,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::new_identity()
    }
}

// A rotated box isn't axis aligned anymore, so every corner has to go through
// the matrix:
fn transf_bbox(mat: &Mat4<f64>, b: BBox3<f64>) -> BBox3<f64> {
    if b.is_empty() {
        return b;
    }
    (0..8).fold(BBox3::new(), |bnd, i| bnd.combine_pnt(mat.mul_point(b.corner(i))))
}

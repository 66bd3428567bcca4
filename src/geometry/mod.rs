pub mod mesh;
pub mod triangle;

use crate::object::ObjectInstance;
use pmath::bbox::BBox3;
use pmath::ray::Ray;
use pmath::vector::Vec3;

// Geometric interaction:
#[derive(Clone, Copy, Debug)]
pub struct Intersection {
    pub p: Vec3<f64>, // intersection point
    pub n: Vec3<f64>, // normal at the intersection (unit length)

    pub dpds: Vec3<f64>, // vectors parallel to the surface
    pub dpdt: Vec3<f64>,

    pub uv: (f64, f64), // barycentric coordinates of the hit
    pub t: f64,         // the t value of the intersection of the ray
}

/// A hit together with the instance that was hit.
#[derive(Clone, Copy)]
pub struct ObjectIntersection<'a> {
    pub isect: Intersection,
    pub object: &'a ObjectInstance,
}

/// The parametric range a ray spends inside of a volume.
#[derive(Clone, Copy)]
pub struct Interval<'a> {
    pub t_min: f64,
    pub t_max: f64,
    pub object: &'a ObjectInstance,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeSample {
    pub density: f64,
}

/// Surface geometry in local space. Used concurrently while rays are being traced.
pub trait Accelerator: Send + Sync {
    /// The closest hit of the ray inside of its `[t_near, t_far]` extent.
    fn intersect(&self, time: f64, ray: Ray<f64>) -> Option<Intersection>;

    fn get_bound(&self) -> BBox3<f64>;
}

/// A participating medium in local space.
pub trait Volume: Send + Sync {
    fn get_bound(&self) -> BBox3<f64>;

    fn sample(&self, p: Vec3<f64>) -> Option<VolumeSample>;
}

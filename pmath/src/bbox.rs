use crate::numbers::Float;
use crate::ray::Ray;
use crate::vector::Vec3;
use num_traits::Bounded;
use std::cmp::PartialOrd;
use std::mem::swap;
use std::ops::Index;

/// A 3d bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox3<T: PartialOrd + Bounded + Copy> {
    pub pmin: Vec3<T>,
    pub pmax: Vec3<T>,
}

impl<T: PartialOrd + Bounded + Copy> BBox3<T> {
    /// Constructs a new, empty, `BBox3`. Combining anything with it yields the other operand.
    pub fn new() -> Self {
        BBox3 {
            pmin: Vec3 {
                x: T::max_value(),
                y: T::max_value(),
                z: T::max_value(),
            },
            pmax: Vec3 {
                x: T::min_value(),
                y: T::min_value(),
                z: T::min_value(),
            },
        }
    }

    /// Creates a new `BBox3` from two points.
    pub fn from_pnts(pnt0: Vec3<T>, pnt1: Vec3<T>) -> Self {
        BBox3 {
            pmin: pnt0.min(pnt1),
            pmax: pnt0.max(pnt1),
        }
    }

    /// Creates a new `BBox3` from a single point (box has no volume).
    pub fn from_pnt(pnt: Vec3<T>) -> Self {
        BBox3 {
            pmin: pnt,
            pmax: pnt,
        }
    }

    /// True if the box contains nothing at all (a box with no volume is not empty).
    pub fn is_empty(self) -> bool {
        self.pmin.x > self.pmax.x || self.pmin.y > self.pmax.y || self.pmin.z > self.pmax.z
    }

    /// Used to get a specific corner given the index. Panics if the index is out of range.
    pub fn corner(self, i: usize) -> Vec3<T> {
        let x = self[i & 1].x;
        let y = self[if i & 2 != 0 { 1 } else { 0 }].y;
        let z = self[if i & 4 != 0 { 1 } else { 0 }].z;
        Vec3 { x, y, z }
    }

    /// Creates a new `BBox3` that encompases the box and another point.
    pub fn combine_pnt(self, pnt: Vec3<T>) -> Self {
        let pmin = self.pmin.min(pnt);
        let pmax = self.pmax.max(pnt);
        BBox3 { pmin, pmax }
    }

    /// Creates a new `BBox3` that encompases the box and another box.
    pub fn combine_bnd(self, bnd: BBox3<T>) -> Self {
        let pmin = self.pmin.min(bnd.pmin);
        let pmax = self.pmax.max(bnd.pmax);
        BBox3 { pmin, pmax }
    }

    /// Checks if `bnd` lies completely inside of this box (boundaries included).
    pub fn contains_bnd(self, bnd: BBox3<T>) -> bool {
        bnd.is_empty()
            || (self.pmin.x <= bnd.pmin.x
                && self.pmin.y <= bnd.pmin.y
                && self.pmin.z <= bnd.pmin.z
                && self.pmax.x >= bnd.pmax.x
                && self.pmax.y >= bnd.pmax.y
                && self.pmax.z >= bnd.pmax.z)
    }
}

impl<T: Float + Bounded> BBox3<T> {
    /// Grows the box by `delta` in every direction.
    pub fn expand(self, delta: T) -> Self {
        let d = Vec3 {
            x: delta,
            y: delta,
            z: delta,
        };
        BBox3 {
            pmin: self.pmin - d,
            pmax: self.pmax + d,
        }
    }

    /// Slab test. Returns the parametric entry and exit points of the ray,
    /// clamped to the ray's own `[t_near, t_far]` extent.
    pub fn intersect(self, ray: Ray<T>) -> Option<(T, T)> {
        let mut t0 = ray.t_near;
        let mut t1 = ray.t_far;

        for i in 0..3 {
            let inv_dir = T::one() / ray.dir[i];
            let mut t_near = (self.pmin[i] - ray.org[i]) * inv_dir;
            let mut t_far = (self.pmax[i] - ray.org[i]) * inv_dir;
            if t_near > t_far {
                swap(&mut t_near, &mut t_far);
            }

            // NaN shows up when the origin sits on a slab of a flat axis,
            // in which case the comparison leaves t0 and t1 alone:
            t0 = if t_near > t0 { t_near } else { t0 };
            t1 = if t_far < t1 { t_far } else { t1 };

            if t0 > t1 {
                return None;
            }
        }

        Some((t0, t1))
    }
}

impl<T: PartialOrd + Bounded + Copy> Index<usize> for BBox3<T> {
    type Output = Vec3<T>;

    fn index(&self, i: usize) -> &Vec3<T> {
        match i {
            0 => &self.pmin,
            1 => &self.pmax,
            _ => panic!("Index out of range for BBox3"),
        }
    }
}

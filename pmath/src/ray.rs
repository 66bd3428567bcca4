use crate::numbers::Float;
use crate::vector::Vec3;

/// A ray used to intersect a scene.
#[derive(Clone, Copy, Debug)]
pub struct Ray<T: Float> {
    /// The origin point of the ray.
    pub org: Vec3<T>,
    /// The direction vector of the ray. Not necessarily normalized.
    pub dir: Vec3<T>,
    /// Where along the ray to start checking for intersections.
    pub t_near: T,
    /// The max extent of the ray to consider when tracing against geometry.
    pub t_far: T,
}

impl<T: Float> Ray<T> {
    /// Constructs a new Ray for intersecting a scene, that is, without a parametric restriction.
    pub fn new(org: Vec3<T>, dir: Vec3<T>) -> Self {
        Ray {
            org,
            dir,
            t_near: T::zero(),
            t_far: T::infinity(),
        }
    }

    /// Constructs a ray restricted to `[t_near, t_far]`.
    pub fn new_extent(org: Vec3<T>, dir: Vec3<T>, t_near: T, t_far: T) -> Self {
        Ray {
            org,
            dir,
            t_near,
            t_far,
        }
    }

    /// Calculates a point along the ray given a parametric parameter.
    pub fn point_at(self, t: T) -> Vec3<T> {
        self.org + self.dir.scale(t)
    }
}

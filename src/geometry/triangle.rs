// Stateless triangle routines used as the leaf primitive of an accelerator.

use pmath::bbox::BBox3;
use pmath::vector::Vec3;

// Determinants closer to zero than this mean the ray is parallel to the triangle:
pub const EPSILON: f64 = 1e-6;

/// Result of a ray-triangle test. `u` and `v` weight vertex 1 and vertex 2,
/// vertex 0 is weighted by `1 - u - v`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriHit {
    pub t: f64,
    pub u: f64,
    pub v: f64,
}

pub fn area(v0: Vec3<f64>, v1: Vec3<f64>, v2: Vec3<f64>) -> f64 {
    0.5 * (v1 - v0).cross(v2 - v0).length()
}

pub fn bound(v0: Vec3<f64>, v1: Vec3<f64>, v2: Vec3<f64>) -> BBox3<f64> {
    BBox3::from_pnts(v0, v1).combine_pnt(v2)
}

/// The winding order decides which side the normal points to.
pub fn face_normal(v0: Vec3<f64>, v1: Vec3<f64>, v2: Vec3<f64>) -> Vec3<f64> {
    (v1 - v0).cross(v2 - v0).normalize()
}

/// Barycentric blend of the vertex normals. The result is not normalized.
pub fn interpolated_normal(
    n0: Vec3<f64>,
    n1: Vec3<f64>,
    n2: Vec3<f64>,
    u: f64,
    v: f64,
) -> Vec3<f64> {
    n0.scale(1. - u - v) + n1.scale(u) + n2.scale(v)
}

/// Moller-Trumbore ray-triangle intersection. With `cull_backfaces` set, triangles
/// whose winding faces away from the ray are skipped.
pub fn intersect(
    v0: Vec3<f64>,
    v1: Vec3<f64>,
    v2: Vec3<f64>,
    org: Vec3<f64>,
    dir: Vec3<f64>,
    cull_backfaces: bool,
) -> Option<TriHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);

    let tvec = org - v0;

    if cull_backfaces {
        if det < EPSILON {
            return None;
        }

        // Only divide once we know we have a hit:
        let u = tvec.dot(pvec);
        if u < 0. || u > det {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = dir.dot(qvec);
        if v < 0. || u + v > det {
            return None;
        }

        let inv_det = 1. / det;
        Some(TriHit {
            t: edge2.dot(qvec) * inv_det,
            u: u * inv_det,
            v: v * inv_det,
        })
    } else {
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1. / det;

        let u = tvec.dot(pvec) * inv_det;
        if u < 0. || u > 1. {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = dir.dot(qvec) * inv_det;
        if v < 0. || u + v > 1. {
            return None;
        }

        Some(TriHit {
            t: edge2.dot(qvec) * inv_det,
            u,
            v,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> (Vec3<f64>, Vec3<f64>, Vec3<f64>) {
        (
            Vec3::new(0., 0., 0.),
            Vec3::new(1., 0., 0.),
            Vec3::new(0., 1., 0.),
        )
    }

    #[test]
    fn hit_from_the_front() {
        let (v0, v1, v2) = tri();
        for &cull in [true, false].iter() {
            let hit = intersect(
                v0,
                v1,
                v2,
                Vec3::new(0.25, 0.25, 1.),
                Vec3::new(0., 0., -1.),
                cull,
            )
            .unwrap();
            assert!((hit.t - 1.).abs() < 1e-12);
            assert!(hit.u >= 0. && hit.v >= 0. && hit.u + hit.v <= 1.);
            assert!((hit.u - 0.25).abs() < 1e-12);
            assert!((hit.v - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn miss_outside_of_triangle() {
        let (v0, v1, v2) = tri();
        for &cull in [true, false].iter() {
            let hit = intersect(
                v0,
                v1,
                v2,
                Vec3::new(5., 5., 1.),
                Vec3::new(0., 0., -1.),
                cull,
            );
            assert!(hit.is_none());
        }
    }

    #[test]
    fn parallel_rays_never_hit() {
        let (v0, v1, v2) = tri();
        let origins = [
            Vec3::new(-1., 0.25, 0.),
            Vec3::new(-1., 0.25, 1.),
            Vec3::new(0.1, 0.1, 0.),
        ];
        for &org in origins.iter() {
            for &cull in [true, false].iter() {
                assert!(intersect(v0, v1, v2, org, Vec3::new(1., 0., 0.), cull).is_none());
            }
        }
    }

    #[test]
    fn backfaces_depend_on_culling() {
        let (v0, v1, v2) = tri();
        let org = Vec3::new(0.25, 0.25, -1.);
        let dir = Vec3::new(0., 0., 1.);
        assert!(intersect(v0, v1, v2, org, dir, true).is_none());

        let hit = intersect(v0, v1, v2, org, dir, false).unwrap();
        assert!((hit.t - 1.).abs() < 1e-12);
        assert!((hit.u - 0.25).abs() < 1e-12);
        assert!((hit.v - 0.25).abs() < 1e-12);
    }

    #[test]
    fn degenerate_triangle_never_hits() {
        let v0 = Vec3::new(0., 0., 0.);
        let v1 = Vec3::new(1., 1., 0.);
        let v2 = Vec3::new(2., 2., 0.);
        let org = Vec3::new(0.5, 0.5, 1.);
        let dir = Vec3::new(0., 0., -1.);
        assert_eq!(area(v0, v1, v2), 0.);
        assert!(intersect(v0, v1, v2, org, dir, false).is_none());
        assert!(intersect(v0, v1, v2, org, dir, true).is_none());
    }

    #[test]
    fn area_and_bound() {
        let (v0, v1, v2) = tri();
        assert!((area(v0, v1, v2) - 0.5).abs() < 1e-12);
        assert!((area(v0, v1.scale(2.), v2.scale(3.)) - 3.).abs() < 1e-12);

        let b = bound(v0, v1, v2);
        assert_eq!(b.pmin, Vec3::new(0., 0., 0.));
        assert_eq!(b.pmax, Vec3::new(1., 1., 0.));
    }

    #[test]
    fn face_normal_follows_winding() {
        let (v0, v1, v2) = tri();
        assert_eq!(face_normal(v0, v1, v2), Vec3::new(0., 0., 1.));
        assert_eq!(face_normal(v0, v2, v1), Vec3::new(0., 0., -1.));
    }

    #[test]
    fn interpolated_normal_is_not_normalized() {
        let n0 = Vec3::new(1., 0., 0.);
        let n1 = Vec3::new(0., 1., 0.);
        let n2 = Vec3::new(0., 0., 1.);
        assert_eq!(interpolated_normal(n0, n1, n2, 0., 0.), n0);
        assert_eq!(interpolated_normal(n0, n1, n2, 1., 0.), n1);

        let n = interpolated_normal(n0, n1, n2, 0.5, 0.25);
        assert_eq!(n, Vec3::new(0.25, 0.5, 0.25));
        assert!(n.length() < 1.);
    }
}

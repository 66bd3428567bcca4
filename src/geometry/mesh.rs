use crate::geometry::triangle;
use crate::geometry::{Accelerator, Intersection};
use pmath::bbox::BBox3;
use pmath::ray::Ray;
use pmath::vector::Vec3;

use simple_error::{bail, SimpleResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub indices: [u32; 3],
}

/// A plain list of triangles, intersected one after the other. Good enough for
/// small meshes and for checking the instancing code against.
pub struct Mesh {
    pos: Vec<Vec3<f64>>,
    // Either empty or one normal per position:
    nrm: Vec<Vec3<f64>>,
    tris: Vec<Triangle>,

    cull_backfaces: bool,
    bound: BBox3<f64>,
}

impl Mesh {
    pub fn new(
        pos: Vec<Vec3<f64>>,
        nrm: Option<Vec<Vec3<f64>>>,
        tris: Vec<Triangle>,
        cull_backfaces: bool,
    ) -> SimpleResult<Self> {
        let nrm = nrm.unwrap_or_default();
        if !nrm.is_empty() && nrm.len() != pos.len() {
            bail!(
                "mesh has {} normals but {} positions",
                nrm.len(),
                pos.len()
            );
        }

        for (i, tri) in tris.iter().enumerate() {
            if let Some(&index) = tri.indices.iter().find(|&&j| (j as usize) >= pos.len()) {
                bail!(
                    "triangle {} references vertex {} but the mesh only has {} vertices",
                    i,
                    index,
                    pos.len()
                );
            }
        }

        let bound = pos
            .iter()
            .fold(BBox3::new(), |bound, &p| bound.combine_pnt(p));

        Ok(Mesh {
            pos,
            nrm,
            tris,
            cull_backfaces,
            bound,
        })
    }

    pub fn num_tri(&self) -> usize {
        self.tris.len()
    }

    pub fn num_vert(&self) -> usize {
        self.pos.len()
    }

    pub fn has_nrm(&self) -> bool {
        !self.nrm.is_empty()
    }

    fn get_pos(&self, tri: Triangle) -> (Vec3<f64>, Vec3<f64>, Vec3<f64>) {
        let [i0, i1, i2] = tri.indices;
        (
            self.pos[i0 as usize],
            self.pos[i1 as usize],
            self.pos[i2 as usize],
        )
    }
}

impl Accelerator for Mesh {
    fn intersect(&self, _time: f64, ray: Ray<f64>) -> Option<Intersection> {
        let mut closest: Option<(Triangle, triangle::TriHit)> = None;
        let mut max_t = ray.t_far;

        for &tri in self.tris.iter() {
            let (v0, v1, v2) = self.get_pos(tri);
            let hit = match triangle::intersect(v0, v1, v2, ray.org, ray.dir, self.cull_backfaces) {
                Some(hit) => hit,
                _ => continue,
            };
            if hit.t < ray.t_near || hit.t > max_t {
                continue;
            }
            max_t = hit.t;
            closest = Some((tri, hit));
        }

        let (tri, hit) = closest?;
        let (v0, v1, v2) = self.get_pos(tri);

        let n = if self.has_nrm() {
            let [i0, i1, i2] = tri.indices;
            triangle::interpolated_normal(
                self.nrm[i0 as usize],
                self.nrm[i1 as usize],
                self.nrm[i2 as usize],
                hit.u,
                hit.v,
            )
            .normalize()
        } else {
            triangle::face_normal(v0, v1, v2)
        };

        Some(Intersection {
            p: ray.point_at(hit.t),
            n,
            dpds: v1 - v0,
            dpdt: v2 - v0,
            uv: (hit.u, hit.v),
            t: hit.t,
        })
    }

    fn get_bound(&self) -> BBox3<f64> {
        self.bound
    }
}

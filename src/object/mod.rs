pub mod bounds;

use crate::geometry::{
    Accelerator, Intersection, Interval, ObjectIntersection, Volume, VolumeSample,
};
use crate::scene::{Light, ObjectGroup, Shader};
use crate::transform::sample_list::{TransformCache, TransformSampleList};
use crate::transform::{RotateOrder, Transform, TransformOrder};
use pmath::bbox::BBox3;
use pmath::ray::Ray;
use pmath::vector::Vec3;

use log::{debug, warn};
use simple_error::{bail, SimpleResult};
use std::sync::Arc;

/// What an instance is made of. An instance is either a surface or a volume, never both.
#[derive(Clone)]
pub enum ObjectContent {
    Surface(Arc<dyn Accelerator>),
    Volume(Arc<dyn Volume>),
}

/// Places a piece of geometry (or a volume) in the world, possibly moving over time.
pub struct ObjectInstance {
    // None until the instance is given something to instance:
    content: Option<ObjectContent>,
    samples: TransformSampleList,
    // World space, over all of time:
    bound: BBox3<f64>,

    shader: Option<Arc<dyn Shader>>,
    lights: Vec<Arc<dyn Light>>,
    reflect_target: Option<Arc<dyn ObjectGroup>>,
    refract_target: Option<Arc<dyn ObjectGroup>>,
}

impl ObjectInstance {
    /// An instance with nothing to instance yet. It won't be hit by anything
    /// until `set_surface` or `set_volume` is called.
    pub fn new() -> Self {
        ObjectInstance {
            content: None,
            samples: TransformSampleList::new(),
            bound: BBox3::new(),
            shader: None,
            lights: Vec::new(),
            reflect_target: None,
            refract_target: None,
        }
    }

    pub fn new_surface(accel: Arc<dyn Accelerator>) -> Self {
        let mut object = ObjectInstance::new();
        object.content = Some(ObjectContent::Surface(accel));
        object.update_bound();
        object
    }

    pub fn new_volume(volume: Arc<dyn Volume>) -> Self {
        let mut object = ObjectInstance::new();
        object.content = Some(ObjectContent::Volume(volume));
        object.update_bound();
        object
    }

    /// Fails if the instance already has a surface or a volume. The existing
    /// assignment is kept in that case.
    pub fn set_surface(&mut self, accel: Arc<dyn Accelerator>) -> SimpleResult<()> {
        if self.content.is_some() {
            warn!("rejected surface for an object that already has {}", self.content_name());
            bail!("object already has {}", self.content_name());
        }
        self.content = Some(ObjectContent::Surface(accel));
        self.update_bound();
        Ok(())
    }

    /// Fails if the instance already has a surface or a volume. The existing
    /// assignment is kept in that case.
    pub fn set_volume(&mut self, volume: Arc<dyn Volume>) -> SimpleResult<()> {
        if self.content.is_some() {
            warn!("rejected volume for an object that already has {}", self.content_name());
            bail!("object already has {}", self.content_name());
        }
        self.content = Some(ObjectContent::Volume(volume));
        self.update_bound();
        Ok(())
    }

    pub fn content(&self) -> Option<&ObjectContent> {
        self.content.as_ref()
    }

    pub fn is_surface(&self) -> bool {
        match self.content {
            Some(ObjectContent::Surface(_)) => true,
            _ => false,
        }
    }

    pub fn is_volume(&self) -> bool {
        match self.content {
            Some(ObjectContent::Volume(_)) => true,
            _ => false,
        }
    }

    //
    // Transformation
    //

    pub fn set_translate(&mut self, translate: Vec3<f64>, time: f64) {
        self.samples.push_translate_sample(translate, time);
        self.update_bound();
    }

    pub fn set_rotate(&mut self, rotate: Vec3<f64>, time: f64) {
        self.samples.push_rotate_sample(rotate, time);
        self.update_bound();
    }

    pub fn set_scale(&mut self, scale: Vec3<f64>, time: f64) {
        self.samples.push_scale_sample(scale, time);
        self.update_bound();
    }

    pub fn set_transform_order(&mut self, order: TransformOrder) {
        self.samples.set_transform_order(order);
        self.update_bound();
    }

    pub fn set_rotate_order(&mut self, order: RotateOrder) {
        self.samples.set_rotate_order(order);
        self.update_bound();
    }

    pub fn transform_samples(&self) -> &TransformSampleList {
        &self.samples
    }

    /// World space bound holding the instance at any time.
    pub fn get_bound(&self) -> BBox3<f64> {
        self.bound
    }

    //
    // Attributes
    //

    pub fn set_shader(&mut self, shader: Option<Arc<dyn Shader>>) {
        self.shader = shader;
    }

    pub fn shader(&self) -> Option<&Arc<dyn Shader>> {
        self.shader.as_ref()
    }

    /// The lights this object is restricted to.
    pub fn set_light_list(&mut self, lights: Vec<Arc<dyn Light>>) {
        self.lights = lights;
    }

    pub fn light_list(&self) -> &[Arc<dyn Light>] {
        &self.lights
    }

    pub fn num_lights(&self) -> usize {
        self.lights.len()
    }

    pub fn set_reflect_target(&mut self, group: Option<Arc<dyn ObjectGroup>>) {
        self.reflect_target = group;
    }

    pub fn reflect_target(&self) -> Option<&Arc<dyn ObjectGroup>> {
        self.reflect_target.as_ref()
    }

    pub fn set_refract_target(&mut self, group: Option<Arc<dyn ObjectGroup>>) {
        self.refract_target = group;
    }

    pub fn refract_target(&self) -> Option<&Arc<dyn ObjectGroup>> {
        self.refract_target.as_ref()
    }

    //
    // Queries
    //

    /// Intersects a world space ray at the given time. Misses if this isn't a surface.
    pub fn intersect(&self, time: f64, ray: Ray<f64>) -> Option<ObjectIntersection> {
        self.intersect_impl(time, ray, None)
    }

    pub fn intersect_cached(
        &self,
        cache: &mut TransformCache,
        time: f64,
        ray: Ray<f64>,
    ) -> Option<ObjectIntersection> {
        self.intersect_impl(time, ray, Some(cache))
    }

    /// The parametric range the ray spends inside of the volume's box. Misses if
    /// this isn't a volume.
    pub fn volume_intersect(&self, time: f64, ray: Ray<f64>) -> Option<Interval> {
        self.volume_intersect_impl(time, ray, None)
    }

    pub fn volume_intersect_cached(
        &self,
        cache: &mut TransformCache,
        time: f64,
        ray: Ray<f64>,
    ) -> Option<Interval> {
        self.volume_intersect_impl(time, ray, Some(cache))
    }

    /// Samples the volume at a world space point. Misses if this isn't a volume.
    pub fn volume_sample(&self, time: f64, p: Vec3<f64>) -> Option<VolumeSample> {
        self.volume_sample_impl(time, p, None)
    }

    pub fn volume_sample_cached(
        &self,
        cache: &mut TransformCache,
        time: f64,
        p: Vec3<f64>,
    ) -> Option<VolumeSample> {
        self.volume_sample_impl(time, p, Some(cache))
    }

    fn intersect_impl(
        &self,
        time: f64,
        ray: Ray<f64>,
        cache: Option<&mut TransformCache>,
    ) -> Option<ObjectIntersection> {
        let accel = match &self.content {
            Some(ObjectContent::Surface(accel)) => accel,
            _ => return None,
        };
        let transf = self.transform_at(time, cache)?;

        // The direction isn't normalized, so t means the same thing in both spaces:
        let isect = accel.intersect(time, transf.inv_ray(ray))?;

        Some(ObjectIntersection {
            isect: Intersection {
                p: transf.point(isect.p),
                // Not the inverse transpose, just renormalized:
                n: transf.vector(isect.n).normalize(),
                dpds: transf.vector(isect.dpds),
                dpdt: transf.vector(isect.dpdt),
                uv: isect.uv,
                t: isect.t,
            },
            object: self,
        })
    }

    fn volume_intersect_impl(
        &self,
        time: f64,
        ray: Ray<f64>,
        cache: Option<&mut TransformCache>,
    ) -> Option<Interval> {
        let volume = match &self.content {
            Some(ObjectContent::Volume(volume)) => volume,
            _ => return None,
        };
        let transf = self.transform_at(time, cache)?;

        let (t_min, t_max) = volume.get_bound().intersect(transf.inv_ray(ray))?;
        Some(Interval {
            t_min,
            t_max,
            object: self,
        })
    }

    fn volume_sample_impl(
        &self,
        time: f64,
        p: Vec3<f64>,
        cache: Option<&mut TransformCache>,
    ) -> Option<VolumeSample> {
        let volume = match &self.content {
            Some(ObjectContent::Volume(volume)) => volume,
            _ => return None,
        };
        let transf = self.transform_at(time, cache)?;
        volume.sample(transf.inv_point(p))
    }

    // A transform that collapses space can't take rays to local space, so it
    // counts as a miss:
    fn transform_at(&self, time: f64, cache: Option<&mut TransformCache>) -> Option<Transform> {
        let transf = match cache {
            Some(cache) => self.samples.interpolate_cached(cache, time),
            _ => self.samples.interpolate(time),
        };
        if transf.is_invertible() {
            Some(transf)
        } else {
            None
        }
    }

    fn local_bound(&self) -> BBox3<f64> {
        match &self.content {
            Some(ObjectContent::Surface(accel)) => accel.get_bound(),
            Some(ObjectContent::Volume(volume)) => volume.get_bound(),
            _ => BBox3::new(),
        }
    }

    fn update_bound(&mut self) {
        self.bound = bounds::motion_bound(self.local_bound(), &self.samples);
        debug!(
            "object bound updated to {:?} - {:?} ({} keyframe times)",
            self.bound.pmin,
            self.bound.pmax,
            self.samples.knot_times().len()
        );
    }

    fn content_name(&self) -> &'static str {
        match self.content {
            Some(ObjectContent::Surface(_)) => "a surface",
            Some(ObjectContent::Volume(_)) => "a volume",
            _ => "nothing",
        }
    }
}

impl Default for ObjectInstance {
    fn default() -> Self {
        ObjectInstance::new()
    }
}

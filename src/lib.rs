// Object instancing for a ray tracer: keyframed transforms, instances that place
// a surface or a volume in the world (moving or not), and the triangle test the
// surfaces are built from.

pub mod geometry;
pub mod loading;
pub mod object;
pub mod scene;
pub mod threading;
pub mod transform;

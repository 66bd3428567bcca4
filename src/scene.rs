// Handles to things owned by the scene that an object instance only refers to.
// The instance never looks inside of them.

use std::fmt::Debug;

/// Whatever decides how a surface scatters light.
pub trait Shader: Debug + Send + Sync {
    fn name(&self) -> &str;
}

pub trait Light: Debug + Send + Sync {
    fn name(&self) -> &str;
}

/// A collection of objects that reflection or refraction rays are restricted to.
pub trait ObjectGroup: Debug + Send + Sync {
    fn name(&self) -> &str;
}

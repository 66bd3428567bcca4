// Loading of the parts of a scene description that this crate understands.
// Everything is json, and every loader reports problems through a `SimpleResult`.

pub mod transform;

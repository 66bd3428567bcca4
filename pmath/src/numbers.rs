// This is my own float trait versus the num_traits' one. Everything in pmath is
// generic over it, so adding what the renderer needs from a float goes here:

pub trait Float: num_traits::Float + num_traits::Bounded {}

impl Float for f32 {}

impl Float for f64 {}

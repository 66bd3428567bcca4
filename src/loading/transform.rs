// Transform descriptions look like this:
//
// {
//     "transform_order": "SRT",
//     "rotate_order": "ZXY",
//     "translate": [0, 1, 0],
//     "rotate": [{ "time": 0, "value": [0, 0, 0] }, { "time": 1, "value": [0, 90, 0] }],
//     "scale": [2, 2, 2]
// }
//
// Every field is optional. A property is either a single static value or a list
// of time samples.

use crate::object::ObjectInstance;
use crate::transform::sample_list::{PropertySample, TransformSampleList};
use crate::transform::{RotateOrder, TransformOrder};
use pmath::vector::Vec3;

use log::info;
use serde::Deserialize;
use simple_error::{bail, try_with, SimpleResult};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTransform {
    #[serde(default)]
    transform_order: Option<String>,
    #[serde(default)]
    rotate_order: Option<String>,
    #[serde(default)]
    translate: Option<RawProperty>,
    #[serde(default)]
    rotate: Option<RawProperty>,
    #[serde(default)]
    scale: Option<RawProperty>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProperty {
    Static([f64; 3]),
    Animated(Vec<RawSample>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSample {
    time: f64,
    value: [f64; 3],
}

/// A validated transform description.
#[derive(Clone, Debug)]
pub struct TransformDesc {
    pub transform_order: TransformOrder,
    pub rotate_order: RotateOrder,
    pub translate: Vec<PropertySample>,
    pub rotate: Vec<PropertySample>,
    pub scale: Vec<PropertySample>,
}

impl TransformDesc {
    /// Pushes the description's orders and samples onto the object.
    pub fn apply(&self, object: &mut ObjectInstance) {
        object.set_transform_order(self.transform_order);
        object.set_rotate_order(self.rotate_order);
        for s in self.translate.iter() {
            object.set_translate(s.value, s.time);
        }
        for s in self.rotate.iter() {
            object.set_rotate(s.value, s.time);
        }
        for s in self.scale.iter() {
            object.set_scale(s.value, s.time);
        }
    }

    /// Builds a standalone sample list from the description.
    pub fn to_sample_list(&self) -> TransformSampleList {
        let mut list = TransformSampleList::new();
        list.set_transform_order(self.transform_order);
        list.set_rotate_order(self.rotate_order);
        for s in self.translate.iter() {
            list.push_translate_sample(s.value, s.time);
        }
        for s in self.rotate.iter() {
            list.push_rotate_sample(s.value, s.time);
        }
        for s in self.scale.iter() {
            list.push_scale_sample(s.value, s.time);
        }
        list
    }
}

pub fn parse_transform(json: &str) -> SimpleResult<TransformDesc> {
    let raw: RawTransform = try_with!(serde_json::from_str(json), "ill-formed transform");

    let transform_order = match raw.transform_order {
        Some(name) => name.parse::<TransformOrder>()?,
        _ => TransformOrder::default(),
    };
    let rotate_order = match raw.rotate_order {
        Some(name) => name.parse::<RotateOrder>()?,
        _ => RotateOrder::default(),
    };

    let translate = parse_property("translate", raw.translate)?;
    let rotate = parse_property("rotate", raw.rotate)?;
    let scale = parse_property("scale", raw.scale)?;

    // A zero scale can't be undone when taking rays to local space:
    if let Some(s) = scale
        .iter()
        .find(|s| s.value.x == 0. || s.value.y == 0. || s.value.z == 0.)
    {
        bail!("scale at time {} has a zero component", s.time);
    }

    info!(
        "loaded {} transform ({} rotation): {} translate, {} rotate, {} scale samples",
        transform_order,
        rotate_order,
        translate.len(),
        rotate.len(),
        scale.len()
    );

    Ok(TransformDesc {
        transform_order,
        rotate_order,
        translate,
        rotate,
        scale,
    })
}

fn parse_property(name: &str, raw: Option<RawProperty>) -> SimpleResult<Vec<PropertySample>> {
    let samples = match raw {
        Some(RawProperty::Static(value)) => vec![PropertySample {
            value: Vec3::from_arr(value),
            time: 0.,
        }],
        Some(RawProperty::Animated(samples)) => {
            if samples.is_empty() {
                bail!("{} has an empty sample list", name);
            }
            samples
                .into_iter()
                .map(|s| PropertySample {
                    value: Vec3::from_arr(s.value),
                    time: s.time,
                })
                .collect()
        }
        _ => Vec::new(),
    };

    for s in samples.iter() {
        if !s.time.is_finite() || !s.value.is_finite() {
            bail!("{} sample at time {} isn't finite", name, s.time);
        }
    }
    Ok(samples)
}

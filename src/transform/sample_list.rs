// Keyframed translate/rotate/scale for motion blur. Each property has its own
// list of time samples, and a transform for any time is put together by lerping
// each property on its own.

use crate::transform::{RotateOrder, Transform, TransformOrder};
use pmath::vector::Vec3;

use std::sync::atomic::{AtomicU64, Ordering};

// Every list gets its own id so that a cache can tell lists apart:
static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertySample {
    pub value: Vec3<f64>,
    pub time: f64,
}

/// Time samples of a single property, kept sorted by time.
#[derive(Clone, Debug)]
pub struct PropertySampleList {
    samples: Vec<PropertySample>,
    // Used until the first sample is pushed:
    default: Vec3<f64>,
}

impl PropertySampleList {
    pub fn new(default: Vec3<f64>) -> Self {
        PropertySampleList {
            samples: Vec::new(),
            default,
        }
    }

    /// Adds a sample. A sample already present at `time` is replaced.
    pub fn push(&mut self, value: Vec3<f64>, time: f64) {
        let sample = PropertySample { value, time };
        match self.samples.iter().position(|s| s.time >= time) {
            Some(i) if self.samples[i].time == time => self.samples[i] = sample,
            Some(i) => self.samples.insert(i, sample),
            None => self.samples.push(sample),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[PropertySample] {
        &self.samples
    }

    /// More than one sample means the property changes over time.
    pub fn is_animated(&self) -> bool {
        self.samples.len() > 1
    }

    /// The value of the sample at `i`, clamped to the last sample.
    pub fn value_at_index(&self, i: usize) -> Vec3<f64> {
        match self.samples.last() {
            Some(last) => self.samples.get(i).unwrap_or(last).value,
            None => self.default,
        }
    }

    /// Linearly interpolates the property at `time`. Outside of the sampled
    /// range the first or last sample is returned (no extrapolation).
    pub fn lerp(&self, time: f64) -> Vec3<f64> {
        let (first, last) = match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return self.default,
        };

        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // Index of the first sample past the time (can't be the first one):
        let i = match self.samples.iter().position(|s| s.time > time) {
            Some(i) => i,
            _ => return last.value,
        };
        let s0 = self.samples[i - 1];
        let s1 = self.samples[i];

        let u = (time - s0.time) / (s1.time - s0.time);
        s0.value.lerp(s1.value, u)
    }
}

/// The keyframes of an object's transformation.
#[derive(Debug)]
pub struct TransformSampleList {
    translate: PropertySampleList,
    rotate: PropertySampleList,
    scale: PropertySampleList,

    transform_order: TransformOrder,
    rotate_order: RotateOrder,

    // Identifies the list and its contents for `TransformCache`:
    id: u64,
    revision: u64,
}

impl TransformSampleList {
    pub fn new() -> Self {
        TransformSampleList {
            translate: PropertySampleList::new(Vec3::zero()),
            rotate: PropertySampleList::new(Vec3::zero()),
            scale: PropertySampleList::new(Vec3::one()),
            transform_order: TransformOrder::default(),
            rotate_order: RotateOrder::default(),
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            revision: 0,
        }
    }

    pub fn push_translate_sample(&mut self, translate: Vec3<f64>, time: f64) {
        self.translate.push(translate, time);
        self.revision += 1;
    }

    pub fn push_rotate_sample(&mut self, rotate: Vec3<f64>, time: f64) {
        self.rotate.push(rotate, time);
        self.revision += 1;
    }

    pub fn push_scale_sample(&mut self, scale: Vec3<f64>, time: f64) {
        self.scale.push(scale, time);
        self.revision += 1;
    }

    pub fn set_transform_order(&mut self, order: TransformOrder) {
        self.transform_order = order;
        self.revision += 1;
    }

    pub fn set_rotate_order(&mut self, order: RotateOrder) {
        self.rotate_order = order;
        self.revision += 1;
    }

    pub fn translate(&self) -> &PropertySampleList {
        &self.translate
    }

    pub fn rotate(&self) -> &PropertySampleList {
        &self.rotate
    }

    pub fn scale(&self) -> &PropertySampleList {
        &self.scale
    }

    pub fn transform_order(&self) -> TransformOrder {
        self.transform_order
    }

    pub fn rotate_order(&self) -> RotateOrder {
        self.rotate_order
    }

    pub fn is_animated(&self) -> bool {
        self.translate.is_animated() || self.rotate.is_animated() || self.scale.is_animated()
    }

    /// Every keyframe time of the three properties, sorted and without duplicates.
    /// Between two consecutive knots every property moves linearly.
    pub fn knot_times(&self) -> Vec<f64> {
        let mut times: Vec<f64> = [&self.translate, &self.rotate, &self.scale]
            .iter()
            .flat_map(|list| list.samples().iter().map(|s| s.time))
            .collect();
        times.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        times.dedup();
        times
    }

    /// Builds the transform at `time`. Pure: nothing is cached.
    pub fn interpolate(&self, time: f64) -> Transform {
        Transform::new(
            self.transform_order,
            self.rotate_order,
            self.translate.lerp(time),
            self.rotate.lerp(time),
            self.scale.lerp(time),
        )
    }

    /// Same as `interpolate`, but reuses the transform stored in `cache` when the
    /// previous query went to this (unchanged) list at the very same time.
    pub fn interpolate_cached(&self, cache: &mut TransformCache, time: f64) -> Transform {
        if let Some(entry) = &cache.entry {
            if entry.list_id == self.id
                && entry.revision == self.revision
                && entry.time.to_bits() == time.to_bits()
            {
                cache.hits += 1;
                return entry.transform;
            }
        }

        let transform = self.interpolate(time);
        cache.misses += 1;
        cache.entry = Some(CacheEntry {
            list_id: self.id,
            revision: self.revision,
            time,
            transform,
        });
        transform
    }
}

impl Default for TransformSampleList {
    fn default() -> Self {
        TransformSampleList::new()
    }
}

#[derive(Clone, Copy, Debug)]
struct CacheEntry {
    list_id: u64,
    revision: u64,
    time: f64,
    transform: Transform,
}

/// Remembers the last interpolated transform. Owned by whoever issues the
/// queries (typically one per thread), never shared behind a `&`.
#[derive(Clone, Debug, Default)]
pub struct TransformCache {
    entry: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl TransformCache {
    pub fn new() -> Self {
        TransformCache::default()
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Number of queries answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of queries that had to interpolate.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

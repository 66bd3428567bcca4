// World bounds of a moving object.
//
// Between two consecutive keyframe times every property moves linearly, so each
// component stays between its values at the two ends of the segment. Pushing the
// local box through scale, rotate and translate with those ranges (in the order
// the object uses) gives a box that holds the object at every time of the segment.

use crate::transform::sample_list::TransformSampleList;
use crate::transform::{Op, RotateOrder, Transform, TransformOrder};
use pmath::bbox::BBox3;
use pmath::vector::Vec3;

/// A box containing `local` transformed by `samples` at any time at all.
pub fn motion_bound(local: BBox3<f64>, samples: &TransformSampleList) -> BBox3<f64> {
    if local.is_empty() {
        return local;
    }

    let knots = samples.knot_times();
    if knots.len() <= 1 {
        // Nothing moves, so the bound is just the transformed box:
        let time = knots.first().copied().unwrap_or(0.);
        return samples.interpolate(time).bbox(local);
    }

    knots
        .windows(2)
        .fold(BBox3::new(), |bound, segment| {
            bound.combine_bnd(segment_bound(local, samples, segment[0], segment[1]))
        })
}

// Bound over the time range [t0, t1], where no keyframe lies strictly inside.
fn segment_bound(
    local: BBox3<f64>,
    samples: &TransformSampleList,
    t0: f64,
    t1: f64,
) -> BBox3<f64> {
    samples
        .transform_order()
        .ops()
        .iter()
        .fold(local, |bound, op| match op {
            Op::Scale => {
                let s0 = samples.scale().lerp(t0);
                let s1 = samples.scale().lerp(t1);
                scale_bound(bound, s0, s1)
            }
            Op::Rotate => {
                let r0 = samples.rotate().lerp(t0);
                let r1 = samples.rotate().lerp(t1);
                rotate_bound(bound, r0, r1, samples.rotate_order())
            }
            Op::Translate => {
                let d0 = samples.translate().lerp(t0);
                let d1 = samples.translate().lerp(t1);
                BBox3 {
                    pmin: bound.pmin + d0.min(d1),
                    pmax: bound.pmax + d0.max(d1),
                }
            }
        })
}

// Any scale between s0 and s1 (per axis). The extremes of a product of two
// ranges are always products of their ends.
fn scale_bound(b: BBox3<f64>, s0: Vec3<f64>, s1: Vec3<f64>) -> BBox3<f64> {
    let mut pmin = b.pmin;
    let mut pmax = b.pmax;
    for i in 0..3 {
        let prods = [
            b.pmin[i] * s0[i],
            b.pmin[i] * s1[i],
            b.pmax[i] * s0[i],
            b.pmax[i] * s1[i],
        ];
        pmin[i] = prods.iter().cloned().fold(f64::INFINITY, f64::min);
        pmax[i] = prods.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    }
    BBox3 { pmin, pmax }
}

// Any rotation between r0 and r1. A fixed rotation is applied exactly. Otherwise
// the box is swapped for the cube around the sphere (about the origin) holding
// it, which no rotation can leave.
fn rotate_bound(b: BBox3<f64>, r0: Vec3<f64>, r1: Vec3<f64>, order: RotateOrder) -> BBox3<f64> {
    if r0 == r1 {
        let rot = Transform::new(
            TransformOrder::default(),
            order,
            Vec3::zero(),
            r0,
            Vec3::one(),
        );
        return rot.bbox(b);
    }

    let radius = (0..8)
        .map(|i| b.corner(i).length())
        .fold(0., f64::max);
    let r = Vec3::new(radius, radius, radius);
    BBox3 { pmin: -r, pmax: r }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local() -> BBox3<f64> {
        BBox3::from_pnts(Vec3::new(1., 2., 3.), Vec3::new(2., 4., 5.))
    }

    fn contains(outer: BBox3<f64>, inner: BBox3<f64>) -> bool {
        outer.expand(1e-9).contains_bnd(inner)
    }

    #[test]
    fn no_samples_leaves_box_alone() {
        let samples = TransformSampleList::new();
        assert_eq!(motion_bound(local(), &samples), local());
    }

    #[test]
    fn empty_box_stays_empty() {
        let mut samples = TransformSampleList::new();
        samples.push_translate_sample(Vec3::new(1., 0., 0.), 0.);
        samples.push_translate_sample(Vec3::new(2., 0., 0.), 1.);
        assert!(motion_bound(BBox3::new(), &samples).is_empty());
    }

    #[test]
    fn static_transform_is_exact() {
        let mut samples = TransformSampleList::new();
        samples.push_translate_sample(Vec3::new(1., -1., 0.), 0.5);
        samples.push_rotate_sample(Vec3::new(0., 0., 90.), 0.5);
        samples.push_scale_sample(Vec3::new(2., 2., 2.), 0.5);

        let expected = samples.interpolate(0.5).bbox(local());
        assert_eq!(motion_bound(local(), &samples), expected);
    }

    #[test]
    fn translation_sweeps_between_ends() {
        let mut samples = TransformSampleList::new();
        samples.push_translate_sample(Vec3::new(0., 0., 0.), 0.);
        samples.push_translate_sample(Vec3::new(10., 0., 0.), 1.);

        let b = motion_bound(local(), &samples);
        assert_eq!(b.pmin, Vec3::new(1., 2., 3.));
        assert_eq!(b.pmax, Vec3::new(12., 4., 5.));
    }

    #[test]
    fn scale_of_box_away_from_origin() {
        // Shrinking a box that doesn't hold the origin moves it towards the
        // origin, the largest scale alone doesn't cover that:
        let mut samples = TransformSampleList::new();
        samples.push_scale_sample(Vec3::new(1., 1., 1.), 0.);
        samples.push_scale_sample(Vec3::new(0.5, 0.5, 0.5), 1.);

        let b = motion_bound(local(), &samples);
        assert!(contains(b, samples.interpolate(1.).bbox(local())));
        assert_eq!(b.pmin, Vec3::new(0.5, 1., 1.5));
        assert_eq!(b.pmax, Vec3::new(2., 4., 5.));
    }

    #[test]
    fn rotation_about_far_pivot() {
        let mut samples = TransformSampleList::new();
        samples.push_rotate_sample(Vec3::new(0., 0., 0.), 0.);
        samples.push_rotate_sample(Vec3::new(0., 0., 180.), 1.);
        samples.push_translate_sample(Vec3::new(5., 0., 0.), 0.);

        let b = motion_bound(local(), &samples);
        for i in 0..=100 {
            let time = i as f64 / 100.;
            assert!(contains(b, samples.interpolate(time).bbox(local())));
        }
    }

    #[test]
    fn segments_are_unioned() {
        let mut samples = TransformSampleList::new();
        samples.push_translate_sample(Vec3::new(0., 0., 0.), 0.);
        samples.push_translate_sample(Vec3::new(0., 10., 0.), 1.);
        samples.push_translate_sample(Vec3::new(0., -10., 0.), 2.);
        samples.push_scale_sample(Vec3::new(1., 1., 1.), 0.5);
        samples.push_scale_sample(Vec3::new(3., 1., 1.), 1.5);

        let b = motion_bound(local(), &samples);
        for i in 0..=200 {
            let time = i as f64 / 100.;
            assert!(contains(b, samples.interpolate(time).bbox(local())));
        }
        assert_eq!(b.pmin.y, -8.);
        assert_eq!(b.pmax.y, 14.);
    }
}

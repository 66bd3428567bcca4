// The world bound of an instance has to hold it at every time, not only at the
// keyframes, for every transform and rotate order.

use instancer::geometry::{Volume, VolumeSample};
use instancer::object::ObjectInstance;
use instancer::transform::{RotateOrder, TransformOrder};
use pmath::bbox::BBox3;
use pmath::vector::Vec3;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::sync::Arc;

struct BoxVolume(BBox3<f64>);

impl Volume for BoxVolume {
    fn get_bound(&self) -> BBox3<f64> {
        self.0
    }

    fn sample(&self, _: Vec3<f64>) -> Option<VolumeSample> {
        None
    }
}

fn rand_vec(rng: &mut Pcg32, lo: f64, hi: f64) -> Vec3<f64> {
    Vec3::new(
        rng.gen_range(lo, hi),
        rng.gen_range(lo, hi),
        rng.gen_range(lo, hi),
    )
}

fn rand_scale(rng: &mut Pcg32) -> Vec3<f64> {
    let mut s = rand_vec(rng, 0.2, 3.);
    for i in 0..3 {
        if rng.gen::<f64>() < 0.2 {
            s[i] = -s[i];
        }
    }
    s
}

fn rand_object(rng: &mut Pcg32) -> (ObjectInstance, BBox3<f64>) {
    let local = BBox3::from_pnts(rand_vec(rng, -4., 4.), rand_vec(rng, -4., 4.));
    let mut object = ObjectInstance::new_volume(Arc::new(BoxVolume(local)));

    object.set_transform_order(TransformOrder::ALL[rng.gen_range(0, 6)]);
    object.set_rotate_order(RotateOrder::ALL[rng.gen_range(0, 6)]);

    for _ in 0..rng.gen_range(0, 4) {
        let v = rand_vec(rng, -5., 5.);
        object.set_translate(v, rng.gen_range(0., 1.));
    }
    for _ in 0..rng.gen_range(0, 4) {
        let v = rand_vec(rng, -180., 180.);
        object.set_rotate(v, rng.gen_range(0., 1.));
    }
    for _ in 0..rng.gen_range(0, 4) {
        let v = rand_scale(rng);
        object.set_scale(v, rng.gen_range(0., 1.));
    }

    (object, local)
}

fn holds(bound: BBox3<f64>, inner: BBox3<f64>) -> bool {
    let size = bound.pmin.abs().max(bound.pmax.abs()).max_comp();
    bound.expand(1e-9 * (1. + size)).contains_bnd(inner)
}

#[test]
fn bound_holds_object_at_every_time() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = Pcg32::seed_from_u64(0x5eed);

    for _ in 0..300 {
        let (object, local) = rand_object(&mut rng);
        let bound = object.get_bound();
        let samples = object.transform_samples();

        for i in 0..=240 {
            let time = -0.1 + 1.2 * (i as f64) / 240.;
            let placed = samples.interpolate(time).bbox(local);
            assert!(
                holds(bound, placed),
                "bound {:?} misses {:?} at time {}",
                bound,
                placed,
                time
            );
        }

        // The keyframes themselves, exactly:
        for time in samples.knot_times() {
            assert!(holds(bound, samples.interpolate(time).bbox(local)));
        }
    }
}

#[test]
fn large_rotation_off_origin() {
    // A box far away from the rotation pivot sweeps a wide arc:
    let local = BBox3::from_pnts(Vec3::new(9., -0.5, -0.5), Vec3::new(10., 0.5, 0.5));
    let mut object = ObjectInstance::new_volume(Arc::new(BoxVolume(local)));
    object.set_rotate(Vec3::new(0., 0., 0.), 0.);
    object.set_rotate(Vec3::new(0., 0., 270.), 1.);

    let bound = object.get_bound();
    for i in 0..=1000 {
        let time = i as f64 / 1000.;
        let placed = object.transform_samples().interpolate(time).bbox(local);
        assert!(holds(bound, placed));
    }
    assert!(bound.pmin.x <= -10. && bound.pmin.y <= -10.);
}

#[test]
fn bound_tracks_changes_after_the_fact() {
    let local = BBox3::from_pnts(Vec3::new(-1., -1., -1.), Vec3::new(1., 1., 1.));
    let mut object = ObjectInstance::new_volume(Arc::new(BoxVolume(local)));
    object.set_translate(Vec3::new(0., 0., 0.), 0.);
    let before = object.get_bound();

    object.set_translate(Vec3::new(0., 0., 20.), 2.);
    let after = object.get_bound();
    assert!(after.contains_bnd(before));
    assert_eq!(after.pmax.z, 21.);
}

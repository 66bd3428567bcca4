use crate::geometry::{Interval, ObjectIntersection};
use crate::object::ObjectInstance;
use crate::transform::sample_list::TransformCache;
use pmath::ray::Ray;

use crossbeam::channel::{self, Receiver};
use crossbeam::thread;
use log::trace;
use simple_error::{bail, SimpleResult};

#[derive(Clone, Copy, Debug)]
pub struct DispatchParam {
    /// The number of threads to intersect with (the calling thread included)
    pub num_threads: u32,
    /// The number of rays a thread grabs at once
    pub chunk_size: usize,
}

impl Default for DispatchParam {
    fn default() -> Self {
        DispatchParam {
            num_threads: 1,
            chunk_size: 256,
        }
    }
}

/// A world space ray and the time it was sent at.
#[derive(Clone, Copy, Debug)]
pub struct RayQuery {
    pub time: f64,
    pub ray: Ray<f64>,
}

/// Intersects every query with the object. The result at index `i` belongs to
/// the query at index `i`, and is the same as calling `intersect` directly.
pub fn intersect_rays<'a>(
    object: &'a ObjectInstance,
    queries: &[RayQuery],
    param: DispatchParam,
) -> SimpleResult<Vec<Option<ObjectIntersection<'a>>>> {
    dispatch(queries, param, |cache, query| {
        object.intersect_cached(cache, query.time, query.ray)
    })
}

/// Same as `intersect_rays`, but for the intervals the rays spend in a volume.
pub fn volume_intersect_rays<'a>(
    object: &'a ObjectInstance,
    queries: &[RayQuery],
    param: DispatchParam,
) -> SimpleResult<Vec<Option<Interval<'a>>>> {
    dispatch(queries, param, |cache, query| {
        object.volume_intersect_cached(cache, query.time, query.ray)
    })
}

fn dispatch<R, F>(
    queries: &[RayQuery],
    param: DispatchParam,
    query_fn: F,
) -> SimpleResult<Vec<Option<R>>>
where
    R: Send,
    F: Fn(&mut TransformCache, RayQuery) -> Option<R> + Sync,
{
    if param.chunk_size == 0 {
        bail!("chunk size must be at least 1");
    }

    let mut results: Vec<Option<R>> = queries.iter().map(|_| None).collect();

    // The chunks borrow the results, so the channel has to be gone before returning them:
    {
        // Every chunk goes in up front, so the threads stop once the channel runs dry:
        let (sender, receiver) = channel::unbounded();
        let chunks = queries
            .chunks(param.chunk_size)
            .zip(results.chunks_mut(param.chunk_size))
            .enumerate();
        for chunk in chunks {
            if sender.send(chunk).is_err() {
                bail!("unable to queue rays for dispatch");
            }
        }
        drop(sender);

        run_threads(param.num_threads, &receiver, &query_fn)?;
    }

    Ok(results)
}

fn run_threads<R, F>(
    num_threads: u32,
    receiver: &Receiver<(usize, (&[RayQuery], &mut [Option<R>]))>,
    query_fn: &F,
) -> SimpleResult<()>
where
    R: Send,
    F: Fn(&mut TransformCache, RayQuery) -> Option<R> + Sync,
{
    // If we're only intersecting on one thread:
    if num_threads <= 1 {
        thread_dispatch(0, receiver, query_fn);
        return Ok(());
    }

    // We subtract one because the calling thread works too:
    let num_threads = num_threads - 1;

    let scope_result = thread::scope(move |s| {
        for id in 1..=num_threads {
            s.spawn(move |_| thread_dispatch(id, receiver, query_fn));
        }

        // The calling thread always has id 0:
        thread_dispatch(0, receiver, query_fn);
    });
    if scope_result.is_err() {
        bail!("a ray dispatch thread panicked");
    }
    Ok(())
}

/// Loops over chunks until there are none left. Every thread has its own cache,
/// so consecutive rays at the same time only interpolate the transform once.
fn thread_dispatch<R, F>(
    id: u32,
    receiver: &Receiver<(usize, (&[RayQuery], &mut [Option<R>]))>,
    query_fn: &F,
) where
    F: Fn(&mut TransformCache, RayQuery) -> Option<R>,
{
    let mut cache = TransformCache::new();

    for (chunk_id, (queries, results)) in receiver.iter() {
        for (&query, result) in queries.iter().zip(results.iter_mut()) {
            *result = query_fn(&mut cache, query);
        }
        trace!(
            "thread {} finished chunk {} ({} rays)",
            id,
            chunk_id,
            queries.len()
        );
    }

    trace!(
        "thread {} done: {} cached transforms, {} interpolated",
        id,
        cache.hits(),
        cache.misses()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::{Mesh, Triangle};
    use pmath::vector::Vec3;
    use std::sync::Arc;

    fn moving_quad() -> ObjectInstance {
        let pos = vec![
            Vec3::new(0., 0., 0.),
            Vec3::new(1., 0., 0.),
            Vec3::new(1., 1., 0.),
            Vec3::new(0., 1., 0.),
        ];
        let tris = vec![
            Triangle { indices: [0, 1, 2] },
            Triangle { indices: [0, 2, 3] },
        ];
        let mesh = Mesh::new(pos, None, tris, false).unwrap();
        let mut object = ObjectInstance::new_surface(Arc::new(mesh));
        object.set_translate(Vec3::new(0., 0., 0.), 0.);
        object.set_translate(Vec3::new(2., 0., 0.), 1.);
        object
    }

    fn queries() -> Vec<RayQuery> {
        (0..100)
            .map(|i| RayQuery {
                time: (i / 10) as f64 / 10.,
                ray: Ray::new(
                    Vec3::new(0.05 + (i % 10) as f64 * 0.3, 0.5, 5.),
                    Vec3::new(0., 0., -1.),
                ),
            })
            .collect()
    }

    #[test]
    fn single_thread_matches_direct_calls() {
        let object = moving_quad();
        let queries = queries();
        let param = DispatchParam {
            num_threads: 1,
            chunk_size: 7,
        };
        let results = intersect_rays(&object, &queries, param).unwrap();

        assert_eq!(results.len(), queries.len());
        for (query, result) in queries.iter().zip(results.iter()) {
            let direct = object.intersect(query.time, query.ray);
            assert_eq!(direct.is_some(), result.is_some());
            if let (Some(a), Some(b)) = (direct, result) {
                assert_eq!(a.isect.p, b.isect.p);
            }
        }
        assert!(results.iter().any(|r| r.is_some()));
        assert!(results.iter().any(|r| r.is_none()));
    }

    #[test]
    fn zero_chunk_size_is_an_error() {
        let object = moving_quad();
        let param = DispatchParam {
            num_threads: 2,
            chunk_size: 0,
        };
        assert!(intersect_rays(&object, &queries(), param).is_err());
    }

    #[test]
    fn no_queries() {
        let object = moving_quad();
        let param = DispatchParam {
            num_threads: 4,
            chunk_size: 8,
        };
        assert!(intersect_rays(&object, &[], param).unwrap().is_empty());
    }

    #[test]
    fn surface_object_has_no_intervals() {
        let object = moving_quad();
        let results = volume_intersect_rays(&object, &queries(), DispatchParam::default()).unwrap();
        assert!(results.iter().all(|r| r.is_none()));
    }
}

use crate::{KMeans, KMeansState, KMeansConfig, Point, Primitive, Result, Termination};
use rayon::prelude::*;

pub(crate) struct Lloyd<T: Primitive> {
	_p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    /// Move every centroid to the mean of its members. Empty clusters keep their centroid.
    ///
    /// ## Returns
    /// Amount of centroids that moved (according to the configured convergence criterion).
    fn update_centroids(state: &mut KMeansState<'_, T>, config: &KMeansConfig<'_, T>) -> usize {
        let convergence = config.convergence;
        state.clusters.par_iter_mut()
            .map(|cluster| {
                let previous = cluster.centroid().coordinates().to_vec();
                cluster.recompute_centroid();
                !convergence.unchanged(&previous, cluster.centroid().coordinates())
            })
            .filter(|&moved| moved)
            .count()
    }

    pub fn calculate<'p, 'a, F>(data: &KMeans<T>, points: &'p [Point<T>], k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<'p, T>>
                where F: FnOnce(&KMeans<T>, &[Point<T>], &mut KMeansState<'p, T>, &KMeansConfig<'a, T>) -> Result<()> {
        let sample_dims = data.validate(points, k)?;
        config.convergence.validate()?;
        log::debug!("kmeans_lloyd: {} samples, {} dims, k={}, metric={:?}, max_iter={}",
            points.len(), sample_dims, k, data.metric, max_iter);

        let mut state = KMeansState::new(points.len(), sample_dims, k, &data.centroid_ids)?;

        // Initialize clusters and notify subscriber
        init(data, points, &mut state, config)?;
        (config.init_done)(&state);

        for i in 1..=max_iter {
            // Assignment phase completes for every point before any centroid is touched
            data.update_cluster_assignments(points, &mut state, None);
            state.rebuild_memberships(points);
            let new_distsum: T = state.centroid_distances.iter().cloned().sum();

            let moved = Self::update_centroids(&mut state, config);
            state.iterations = i;
            log::trace!("iteration {}: distsum={}, moved centroids={}, empty clusters={}",
                i, new_distsum, moved, state.clusters.iter().filter(|c| c.is_empty()).count());

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, i, new_distsum);
            state.distsum = new_distsum;
            if moved == 0 {
                state.termination = Some(Termination::Converged);
                break;
            }
        }

        if state.termination.is_none() {
            if max_iter == 0 {
                // No iteration ran, still hand out the partition induced by the seeds
                data.update_cluster_assignments(points, &mut state, None);
                state.rebuild_memberships(points);
            }
            log::warn!("kmeans_lloyd: no convergence within {} iterations", max_iter);
            state.termination = Some(Termination::IterationLimitReached);
        }

        data.update_centroid_distances(points, &mut state);
        state.distsum = state.centroid_distances.iter().cloned().sum();
        log::debug!("kmeans_lloyd: {:?} after {} iterations, distsum={}",
            state.termination, state.iterations, state.distsum);
        Ok(state)
    }
}

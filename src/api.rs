use crate::{helpers, Cluster, ClusterError, Convergence, DistanceMetric, Point, PointIds, Primitive, Result};
use std::cell::RefCell;
use rayon::prelude::*;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<'_, T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<'_, T>, usize, T);

/// This is a structure holding various configuration options for a k-means calculation, such as
/// the random number generator to use, the convergence criterion, or a couple of callbacks, that can be
/// set to get status information from a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use (only consulted by randomized initialization methods)
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Criterion deciding whether a centroid moved between two iterations
    pub(crate) convergence: Convergence<T>
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            convergence: Convergence::Exact
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig").field("convergence", &self.convergence).finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used by randomized initialization methods.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the convergence criterion to use. For more information, see documentation of [`Convergence`].
    /// ## Default
    /// [`Convergence::Exact`]
    pub fn convergence(mut self, convergence: Convergence<T>) -> Self {
        self.config.convergence = convergence; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// Terminal state of a k-means run. Both variants come with a valid partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// No centroid moved during the last iteration.
    Converged,
    /// The iteration limit was hit before convergence. The partition is a best-effort result.
    IterationLimitReached,
}


/// This is the data-structure storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// A fresh state (including fresh clusters) is created for every run, which keeps [`KMeans`]
/// immutable, and therefore allows it to be used for multiple runs in parallel.
///
/// ## Generics
/// - **'p**: Lifetime of the clustered points, which are referenced by the clusters' memberships
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of distances from all samples to their respective centroids
/// - **clusters**: The **k** clusters, in seed order
/// - **assignments**: Vector mapping each sample to the index of its cluster
/// - **centroid_distances**: Vector containing each sample's distance to its centroid
/// - **iterations**: Amount of assign/update iterations that were executed
/// - **termination**: How the run ended (`None` while it is still running)
#[derive(Clone, Debug)]
pub struct KMeansState<'p, T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub clusters: Vec<Cluster<'p, T>>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub iterations: usize,
    pub termination: Option<Termination>,

    pub(crate) sample_dims: usize
}
impl<'p, T: Primitive> KMeansState<'p, T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize, ids: &PointIds) -> Result<Self> {
        let clusters = (0..k)
            .map(|_| Point::zeros(ids, sample_dims).map(Cluster::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            k,
            distsum: T::infinity(),
            clusters,
            assignments: vec![0usize;sample_cnt],
            centroid_distances: vec![T::infinity();sample_cnt],
            iterations: 0,
            termination: None,
            sample_dims
        })
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.clusters[idx].centroid_mut().coordinates_mut().iter_mut()
                .zip(src)
                .for_each(|(c,s)| *c = s);
    }

    /// Clear all memberships and rebuild them from the assignment vector.
    pub(crate) fn rebuild_memberships(&mut self, points: &'p [Point<T>]) {
        self.clusters.iter_mut().for_each(|c| c.clear_members());
        points.iter().zip(self.assignments.iter().cloned())
            .for_each(|(p, centroid_id)| self.clusters[centroid_id].push_member(p));
    }

    /// Consume the state, returning only the clusters.
    pub fn into_clusters(self) -> Vec<Cluster<'p, T>> { self.clusters }
}




/// Entrypoint of this crate's API-Surface.
///
/// An engine is bound to one [`DistanceMetric`], which is used for every point-to-centroid
/// comparison of every run done with it, as well as for classifying new points afterwards.
///
/// ## Supported variants
/// - k-Means clustering (Lloyd) [`KMeans::kmeans_lloyd`], or [`KMeans::cluster`] for the defaults
///
/// ## Supported initialization methods
/// - First-K [`KMeans::init_first_k`] (default)
/// - Random-Sample [`KMeans::init_random_sample`]
/// - K-Mean++ [`KMeans::init_kmeanplusplus`]
/// - Precomputed [`KMeans::init_precomputed`]
pub struct KMeans<T: Primitive> {
    pub(crate) metric: DistanceMetric<T>,
    pub(crate) centroid_ids: PointIds
}
impl<T: Primitive> KMeans<T> {
    /// Create a new engine, using the given distance metric.
    pub fn new(metric: DistanceMetric<T>) -> Self {
        Self { metric, centroid_ids: PointIds::new() }
    }

    pub fn metric(&self) -> &DistanceMetric<T> { &self.metric }

    /// Check the run preconditions, returning the dataset's dimension.
    pub(crate) fn validate(&self, points: &[Point<T>], k: usize) -> Result<usize> {
        let first = points.first().ok_or_else(|| ClusterError::invalid("dataset is empty"))?;
        if k == 0 {
            return Err(ClusterError::invalid("k has to be positive"));
        }
        if k > points.len() {
            return Err(ClusterError::invalid(format!("k = {} exceeds the amount of points ({})", k, points.len())));
        }
        let sample_dims = first.dimension();
        if let Some((idx, p)) = points.iter().enumerate().find(|(_, p)| p.dimension() != sample_dims) {
            return Err(ClusterError::invalid(format!(
                "mixed dimensions: point #{} has dimension {}, expected {}", idx, p.dimension(), sample_dims)));
        }
        Ok(sample_dims)
    }

    /// Assign every point to its nearest centroid (among the first **limit_k** clusters, if given).
    ///
    /// This runs in parallel, but every point's result only depends on the centroids, so the
    /// outcome does not depend on scheduling. Returns once all points are assigned.
    pub(crate) fn update_cluster_assignments(&self, points: &[Point<T>], state: &mut KMeansState<'_, T>, limit_k: Option<usize>) {
        let k = limit_k.unwrap_or(state.k);
        let centroids: Vec<&[T]> = state.clusters.iter().take(k)
            .map(|c| c.centroid().coordinates())
            .collect();
        let metric = &self.metric;

        points.par_iter()
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = helpers::nearest_centroid(metric, s.coordinates(), &centroids);
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
    }

    /// Recalculate each sample's distance to the centroid of its (unchanged) assignment.
    pub(crate) fn update_centroid_distances(&self, points: &[Point<T>], state: &mut KMeansState<'_, T>) {
        let clusters = &state.clusters;
        let metric = &self.metric;
        points.par_iter()
            .zip(state.assignments.par_iter().cloned())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                *centroid_dist = metric.distance(s.coordinates(), clusters[assignment].centroid().coordinates());
            });
    }


    /// Partition **points** into **k** clusters, seeding with the first **k** points and using
    /// the default [`KMeansConfig`] (exact convergence).
    ///
    /// ## Errors
    /// [`ClusterError::InvalidArgument`] for an empty dataset, `k == 0`, `k > points.len()`,
    /// or points of mixed dimension.
    ///
    /// ## Example
    /// ```rust
    /// use kcluster::*;
    ///
    /// let ids = PointIds::new();
    /// let points: Vec<Point<f64>> = [[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]].iter()
    ///     .map(|c| Point::new(&ids, c.to_vec()))
    ///     .collect::<Result<_, _>>()?;
    ///
    /// let kmean = KMeans::new(DistanceMetric::Euclidean);
    /// let result = kmean.cluster(&points, 2, 100)?;
    ///
    /// assert_eq!(result.termination, Some(Termination::Converged));
    /// assert_eq!(result.clusters[0].centroid().coordinates(), &[0.0, 0.5]);
    /// assert_eq!(result.clusters[1].centroid().coordinates(), &[10.0, 10.5]);
    /// # Ok::<(), ClusterError>(())
    /// ```
    pub fn cluster<'p>(&self, points: &'p [Point<T>], k: usize, max_iter: usize) -> Result<KMeansState<'p, T>> {
        self.kmeans_lloyd(points, k, max_iter, KMeans::init_first_k, &KMeansConfig::default())
    }

    /// Normal K-Means algorithm implementation (Lloyd): alternately assign every point to its
    /// nearest centroid, then move every centroid to the mean of its members, until no centroid
    /// moves anymore or **max_iter** iterations were done.
    ///
    /// ## Arguments
    /// - **points**: The dataset. All points have to share one dimension
    /// - **k**: Amount of clusters to search for
    /// - **max_iter**: Limit the maximum amount of iterations. Reaching it is not an error, see [`Termination`]
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result).
    ///
    /// ## Example
    /// ```rust
    /// use kcluster::*;
    /// use rand::prelude::*;
    ///
    /// let ids = PointIds::new();
    /// let mut rnd = StdRng::seed_from_u64(42);
    /// let points: Vec<Point<f64>> = (0..500)
    ///     .map(|_| Point::new(&ids, vec![rnd.gen(), rnd.gen(), rnd.gen()]))
    ///     .collect::<Result<_, _>>()?;
    ///
    /// let conf = KMeansConfig::<f64>::build()
    ///     .random_generator(StdRng::seed_from_u64(1))
    ///     .convergence(Convergence::Tolerance { epsilon: 1e-9 })
    ///     .iteration_done(&|s, nr, new_distsum|
    ///         println!("Iteration {} - Error: {:.2} -> {:.2}", nr, s.distsum, new_distsum))
    ///     .build();
    ///
    /// let kmean = KMeans::new(DistanceMetric::Manhattan);
    /// let result = kmean.kmeans_lloyd(&points, 4, 100, KMeans::init_kmeanplusplus, &conf)?;
    ///
    /// assert_eq!(result.clusters.len(), 4);
    /// println!("Cluster-Assignments: {:?}", result.assignments);
    /// println!("Error: {}", result.distsum);
    /// # Ok::<(), ClusterError>(())
    /// ```
    pub fn kmeans_lloyd<'p, 'a, F>(&self, points: &'p [Point<T>], k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<'p, T>>
                where F: FnOnce(&KMeans<T>, &[Point<T>], &mut KMeansState<'p, T>, &KMeansConfig<'a, T>) -> Result<()> {
        crate::variants::Lloyd::calculate(self, points, k, max_iter, init, config)
    }

    /// Index of the cluster whose centroid is nearest to **point**, under this engine's metric.
    /// On equal distances, the lowest index wins.
    ///
    /// ## Errors
    /// - [`ClusterError::InvalidArgument`] if **clusters** is empty
    /// - [`ClusterError::DimensionMismatch`] if **point** does not share the centroids' dimension
    pub fn nearest_cluster(&self, point: &Point<T>, clusters: &[Cluster<'_, T>]) -> Result<usize> {
        if clusters.is_empty() {
            return Err(ClusterError::invalid("no clusters to assign to"));
        }
        let mut best = (0, T::infinity());
        for (idx, cluster) in clusters.iter().enumerate() {
            let dist = cluster.centroid_distance_to(point, &self.metric)?;
            if dist < best.1 {
                best = (idx, dist);
            }
        }
        Ok(best.0)
    }

    /// Classify a single point against already computed clusters, without modifying them.
    /// The clusters should have been computed by this engine (or one using the same metric).
    ///
    /// ## Errors
    /// See [`KMeans::nearest_cluster`].
    pub fn assign_to_cluster<'c, 'p>(&self, point: &Point<T>, clusters: &'c [Cluster<'p, T>]) -> Result<&'c Cluster<'p, T>> {
        self.nearest_cluster(point, clusters).map(|idx| &clusters[idx])
    }


    /// First-K initialization method
    ///
    /// ## Description
    /// This initialization method uses the first **k** samples, in input order, as initial centroids.
    /// It is fully deterministic. Duplicated samples lead to coinciding centroids, which is accepted.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_first_k(_kmean: &KMeans<T>, points: &[Point<T>], state: &mut KMeansState<'_, T>, _config: &KMeansConfig<'_, T>) -> Result<()> {
        crate::inits::firstk::calculate(points, state);
        Ok(())
    }

    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method randomly selects k distinct samples (without replacement)
    /// as initial centroids, using the configured random number generator.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_random_sample(_kmean: &KMeans<T>, points: &[Point<T>], state: &mut KMeansState<'_, T>, config: &KMeansConfig<'_, T>) -> Result<()> {
        crate::inits::randomsample::calculate(points, state, config);
        Ok(())
    }

    /// K-Mean++ initialization method
    ///
    /// ## Description
    /// This initialization method starts by randomly selecting one sample as first centroid.
    /// Proceeding from there, the method iteratively selects one new centroid (per iteration) by calculating
    /// each sample's probability of "being a centroid". This probability is bigger, the farther away a sample
    /// is from its nearest centroid (squared distance, under the engine's metric). No sample is selected twice.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_kmeanplusplus(kmean: &KMeans<T>, points: &[Point<T>], state: &mut KMeansState<'_, T>, config: &KMeansConfig<'_, T>) -> Result<()> {
        crate::inits::kmeanplusplus::calculate(kmean, points, state, config);
        Ok(())
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Use the given coordinate vectors as initial centroids. Exactly **k** vectors of the
    /// dataset's dimension have to be given, otherwise the run fails with
    /// [`ClusterError::InvalidArgument`] / [`ClusterError::DimensionMismatch`].
    pub fn init_precomputed(centroids: Vec<Vec<T>>)
            -> impl FnOnce(&KMeans<T>, &[Point<T>], &mut KMeansState<'_, T>, &KMeansConfig<'_, T>) -> Result<()> {
        move |_kmean: &KMeans<T>, _points: &[Point<T>], state: &mut KMeansState<'_, T>, _config: &KMeansConfig<'_, T>| {
            crate::inits::precomputed::calculate(state, centroids)
        }
    }
}

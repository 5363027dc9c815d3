//! # kcluster - API documentation
//!
//! kcluster is a small rust library for partitional k-means clustering of N-dimensional points.
//!
//! ## Design target
//! Given a set of [`Point`]s and a cluster count **k**, the points are partitioned into **k**
//! [`Cluster`]s, such that every point is close to its cluster's centroid, by a chosen
//! [`DistanceMetric`]. The calculation is deterministic for deterministic initialization methods:
//! repeated runs with identical inputs produce identical partitions.
//!
//! ## Supported variants
//! Clustering is done with Lloyd's algorithm, alternating between assigning every point to its
//! nearest centroid, and moving every centroid to the mean of its members. For details, have a
//! look at [`KMeans::kmeans_lloyd`].
//!
//! ## Supported centroid initializations
//! The outcome of each K-Means run depends on the initialization of its clusters. The default
//! uses the first **k** points, which is fully deterministic. For a list of implemented
//! initialization methods, see [`KMeans`].
//!
//! ## Supported distance metrics
//! - [`DistanceMetric::Euclidean`]
//! - [`DistanceMetric::Manhattan`]
//! - [`DistanceMetric::Custom`]
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kcluster::*;
//!
//! fn main() -> Result<(), ClusterError> {
//!     let ids = PointIds::new();
//!     let points: Vec<Point<f64>> = [[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]].iter()
//!         .map(|c| Point::new(&ids, c.to_vec()))
//!         .collect::<Result<_, _>>()?;
//!
//!     let kmean = KMeans::new(DistanceMetric::Euclidean);
//!     let result = kmean.cluster(&points, 2, 100)?;
//!
//!     for cluster in result.clusters.iter() {
//!         println!("Centroid: {}", cluster.centroid());
//!         cluster.members().iter().for_each(|p| println!("  {}", p));
//!     }
//!     println!("Error: {}", result.distsum);
//!
//!     // Classify a new point, without rerunning the algorithm
//!     let probe = Point::new(&ids, vec![9.0, 12.0])?;
//!     let nearest = kmean.assign_to_cluster(&probe, &result.clusters)?;
//!     assert_eq!(nearest.centroid().coordinates(), &[10.0, 10.5]);
//!     Ok(())
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kcluster::*;
//! use rand::prelude::*;
//!
//! fn main() -> Result<(), ClusterError> {
//!     let (sample_cnt, sample_dims, k, max_iter) = (2000, 8, 4, 2500);
//!
//!     // Generate some random data
//!     let ids = PointIds::new();
//!     let points: Vec<Point<f64>> = (0..sample_cnt)
//!         .map(|_| Point::new(&ids, (0..sample_dims).map(|_| rand::random()).collect()))
//!         .collect::<Result<_, _>>()?;
//!
//!     let conf = KMeansConfig::<f64>::build()
//!         .init_done(&|_| println!("Initialization completed."))
//!         .iteration_done(&|s, nr, new_distsum|
//!             println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
//!                 nr, s.distsum, new_distsum, s.distsum - new_distsum))
//!         .build();
//!
//!     // Calculate kmeans, using kmean++ as initialization-method
//!     let kmean = KMeans::new(DistanceMetric::Euclidean);
//!     let result = kmean.kmeans_lloyd(&points, k, max_iter, KMeans::init_kmeanplusplus, &conf)?;
//!
//!     println!("Termination: {:?}", result.termination);
//!     println!("Cluster-Assignments: {:?}", result.assignments);
//!     println!("Error: {}", result.distsum);
//!     Ok(())
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct, which is bound to one [`DistanceMetric`].
//! Points are created by the caller, each one taking its identity from an explicit [`PointIds`]
//! generator. Points are only borrowed by a run: the resulting clusters reference their member
//! points, and own their centroids.
//!
//! Calling a run method (e.g. [`KMeans::kmeans_lloyd`]) does not mutate the engine, so multiple
//! runs can be done in parallel (the assignment phase of a run itself is already parallelized).
//! Every run creates a fresh [`KMeansState`], storing the state (and finally the result) of the
//! calculation. Invalid calls are reported as [`ClusterError`]; hitting the iteration limit is
//! not an error but a [`Termination`] kind.
//!
//! Progress is reported through the [`log`](https://docs.rs/log) facade (`debug` / `trace`), and
//! through the callbacks of [`KMeansConfig`].

#[macro_use] mod helpers;
mod primitive;
mod error;
mod point;
mod distances;
mod cluster;
mod convergence;
mod api;
mod variants;
mod inits;

pub use api::{KMeansState, KMeansConfig, KMeansConfigBuilder, KMeans, Termination, InitDoneCallbackFn, IterationDoneCallbackFn};
pub use cluster::Cluster;
pub use convergence::Convergence;
pub use distances::{DistanceMetric, DistanceFn};
pub use error::ClusterError;
pub(crate) use error::Result;
pub use point::{Point, PointId, PointIds};
pub use primitive::Primitive;

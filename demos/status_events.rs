use kcluster::*;

fn main() -> Result<(), ClusterError> {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 200, 4, 2500);

    // Generate some random data
    let ids = PointIds::new();
    let points: Vec<Point<f64>> = (0..sample_cnt)
        .map(|_| Point::new(&ids, (0..sample_dims).map(|_| rand::random()).collect()))
        .collect::<Result<_, _>>()?;

	let conf = KMeansConfig::<f64>::build()
		.init_done(&|_| println!("Initialization completed."))
		.iteration_done(&|s, nr, new_distsum|
			println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
				nr, s.distsum, new_distsum, s.distsum - new_distsum))
		.build();

    // Calculate kmeans, using random samples as initialization-method
    let kmean = KMeans::new(DistanceMetric::Euclidean);
    let result = kmean.kmeans_lloyd(&points, k, max_iter, KMeans::init_random_sample, &conf)?;

    println!("Termination: {:?} after {} iterations", result.termination, result.iterations);
    println!("Cluster-Assignments: {:?}", result.assignments);
    println!("Error: {}", result.distsum);
    Ok(())
}

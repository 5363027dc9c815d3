use kcluster::*;

fn main() -> Result<(), ClusterError> {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 200, 4, 100);

    // Generate some random data
    let ids = PointIds::new();
    let points: Vec<Point<f64>> = (0..sample_cnt)
        .map(|_| Point::new(&ids, (0..sample_dims).map(|_| rand::random()).collect()))
        .collect::<Result<_, _>>()?;

    // Calculate kmeans, using kmean++ as initialization-method
    let kmean = KMeans::new(DistanceMetric::Euclidean);
    let result = kmean.kmeans_lloyd(&points, k, max_iter, KMeans::init_kmeanplusplus, &KMeansConfig::default())?;

    result.clusters.iter().for_each(|c| println!("Centroid: {} ({} members)", c.centroid(), c.len()));
    println!("Cluster-Assignments: {:?}", result.assignments);
    println!("Error: {}", result.distsum);
    Ok(())
}

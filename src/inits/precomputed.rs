use crate::{ClusterError, KMeansState, Primitive, Result};

pub fn calculate<T: Primitive>(state: &mut KMeansState<'_, T>, computed: Vec<Vec<T>>) -> Result<()> {
    if computed.len() != state.k {
        return Err(ClusterError::invalid(format!(
            "initialized with {} centroids, but k = {}", computed.len(), state.k)));
    }
    if let Some(c) = computed.iter().find(|c| c.len() != state.sample_dims) {
        return Err(ClusterError::DimensionMismatch { expected: state.sample_dims, found: c.len() });
    }
    computed.into_iter().enumerate().for_each(|(ci, c)| {
        state.set_centroid_from_iter(ci, c.into_iter());
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::helpers::testing;
    use crate::*;

    #[test]
    fn train_with_precomputed_centroids() {
        let ids = PointIds::new();
        let points = testing::points(&ids, &[&[0.0f32], &[1.0], &[10.0], &[11.0], &[20.0], &[21.0]]);
        let kmean = KMeans::new(DistanceMetric::Euclidean);
        let result = kmean.kmeans_lloyd(&points, 2, 200, KMeans::init_precomputed(vec![vec![0.0], vec![21.0]]), &KMeansConfig::default()).unwrap();

        // 10 is closer to 0 than to 21, 11 is closer to 21
        assert_eq!(testing::centroids(&result), vec![vec![11.0 / 3.0], vec![52.0 / 3.0]]);
        assert_eq!(result.assignments, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(result.termination, Some(Termination::Converged));
    }

    #[test]
    fn rejects_malformed_centroids() {
        let ids = PointIds::new();
        let points = testing::points(&ids, &[&[0.0f64, 0.0], &[1.0, 1.0], &[2.0, 2.0]]);
        let kmean = KMeans::new(DistanceMetric::Euclidean);
        let conf = KMeansConfig::default();

        let too_few = kmean.kmeans_lloyd(&points, 2, 10, KMeans::init_precomputed(vec![vec![0.0, 0.0]]), &conf);
        assert!(matches!(too_few, Err(ClusterError::InvalidArgument(_))));

        let wrong_dim = kmean.kmeans_lloyd(&points, 2, 10, KMeans::init_precomputed(vec![vec![0.0, 0.0], vec![1.0]]), &conf);
        assert_eq!(wrong_dim.err(), Some(ClusterError::DimensionMismatch { expected: 2, found: 1 }));
    }
}

use crate::{KMeans, KMeansState, KMeansConfig, Point, Primitive};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::ops::DerefMut;

pub fn calculate<T: Primitive>(kmean: &KMeans<T>, points: &[Point<T>], state: &mut KMeansState<'_, T>, config: &KMeansConfig<'_, T>) {
    let mut chosen = vec![false; points.len()];
    {
        // Randomly select first centroid
        let first_idx = config.rnd.borrow_mut().gen_range(0..points.len());
        chosen[first_idx] = true;
        state.set_centroid_from_iter(0, points[first_idx].coordinates().iter().cloned());
    }
    for k in 1..state.k {
        // For each following centroid...
        // Calculate distances to the nearest of the centroids chosen so far
        kmean.update_cluster_assignments(points, state, Some(k));

        // Probability of each sample to be the new centroid ~ squared distance. Already chosen samples
        // are excluded, even if a custom metric reports a non-zero distance to themselves.
        let candidates = || state.centroid_distances.iter().cloned().enumerate().filter(|&(idx, _)| !chosen[idx]);
        let farthest = candidates().fold(None, |best: Option<(usize, T)>, (idx, d)| match best {
            Some((_, best_d)) if !(d > best_d) => best,
            _ if d.is_nan() => best,
            _ => Some((idx, d)),
        });
        let sampled_centroid_id = match farthest {
            // Distances overflowed, so squared weights are meaningless: take the farthest sample
            Some((idx, d)) if d.is_infinite() => idx,
            Some((_, max_d)) if max_d > T::zero() => {
                // Normalized before squaring, so the weight sum stays finite
                let weights: Vec<T> = state.centroid_distances.iter().zip(chosen.iter())
                    .map(|(&d, &c)| if c || d.is_nan() { T::zero() } else { (d / max_d) * (d / max_d) })
                    .collect();
                match WeightedIndex::new(&weights) {
                    Ok(centroid_index) => centroid_index.sample(config.rnd.borrow_mut().deref_mut()),
                    Err(_) => candidates().map(|(idx, _)| idx).next().unwrap_or(0),
                }
            },
            // Every remaining sample coincides with a centroid: take the first one not used yet
            _ => candidates().map(|(idx, _)| idx).next().unwrap_or(0),
        };
        chosen[sampled_centroid_id] = true;
        state.set_centroid_from_iter(k, points[sampled_centroid_id].coordinates().iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use crate::helpers::testing;
    use crate::*;
    use rand::prelude::*;

    fn seeds(metric: DistanceMetric<f64>, points: &[Point<f64>], k: usize, seed: u64) -> Vec<Vec<f64>> {
        let recorded = std::cell::RefCell::new(Vec::new());
        let on_init = |s: &KMeansState<'_, f64>| *recorded.borrow_mut() = testing::centroids(s);
        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(seed))
            .init_done(&on_init)
            .build();
        KMeans::new(metric).kmeans_lloyd(points, k, 0, KMeans::init_kmeanplusplus, &conf).unwrap();
        let seeds = recorded.borrow().clone();
        seeds
    }

    #[test]
    fn one_seed_per_separated_group() {
        let mut rnd = StdRng::seed_from_u64(1337);
        let ids = PointIds::new();
        let points: Vec<Point<f64>> = (0..300)
            .map(|i| {
                let base = (i % 3) as f64 * 100.0;
                Point::new(&ids, vec![base + rnd.gen_range(0.0..0.1), base + rnd.gen_range(0.0..0.1)]).unwrap()
            })
            .collect();

        for metric in [DistanceMetric::Euclidean, DistanceMetric::Manhattan] {
            let mut groups: Vec<i64> = seeds(metric, &points, 3, 42).iter()
                .map(|c| (c[0] / 100.0).round() as i64)
                .collect();
            groups.sort();
            assert_eq!(groups, vec![0, 1, 2]);
        }
    }

    #[test]
    fn never_picks_a_sample_twice() {
        let ids = PointIds::new();
        let points = testing::points(&ids, &[&[0.0f64], &[0.0], &[0.0], &[5.0]]);
        for seed in 0..10 {
            let mut chosen: Vec<f64> = seeds(DistanceMetric::Euclidean, &points, 4, seed).into_iter().map(|c| c[0]).collect();
            chosen.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(chosen, vec![0.0, 0.0, 0.0, 5.0]);
        }
    }

    #[test]
    fn reproducible_with_seeded_generator() {
        let mut rnd = StdRng::seed_from_u64(5);
        let ids = PointIds::new();
        let points: Vec<Point<f64>> = (0..200)
            .map(|_| Point::new(&ids, vec![rnd.gen_range(0.0..1.0), rnd.gen_range(0.0..1.0)]).unwrap())
            .collect();
        assert_eq!(seeds(DistanceMetric::Euclidean, &points, 6, 9), seeds(DistanceMetric::Euclidean, &points, 6, 9));
    }

    #[test]
    fn far_apart_samples() {
        let ids = PointIds::new();
        // Squared distances overflow for both metrics, Euclidean distances themselves as well
        let points = testing::points(&ids, &[&[0.0f64], &[1e200], &[-1e200], &[1.5e200]]);
        for metric in [DistanceMetric::Euclidean, DistanceMetric::Manhattan] {
            for seed in 0..10 {
                let mut chosen: Vec<f64> = seeds(metric, &points, 3, seed).into_iter().map(|c| c[0]).collect();
                chosen.sort_by(|a, b| a.partial_cmp(b).unwrap());
                chosen.dedup();
                assert_eq!(chosen.len(), 3);
            }
            let mut all: Vec<f64> = seeds(metric, &points, 4, 3).into_iter().map(|c| c[0]).collect();
            all.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(all, vec![-1e200, 0.0, 1e200, 1.5e200]);
        }
    }
}

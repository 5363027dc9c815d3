use crate::{KMeansState, Point, Primitive};

pub fn calculate<T: Primitive>(points: &[Point<T>], state: &mut KMeansState<'_, T>) {
	points.iter().take(state.k)
		.enumerate()
		.for_each(|(ci, c)| {
			state.set_centroid_from_iter(ci, c.coordinates().iter().cloned());
		});
}

#[cfg(test)]
mod tests {
	use crate::helpers::testing;
	use crate::*;

	#[test]
	fn seeds_with_leading_points() {
		let ids = PointIds::new();
		let points = testing::points(&ids, &[&[5.0f64, 1.0], &[2.0, 2.0], &[0.0, 3.0], &[7.0, 7.0]]);
		let kmean = KMeans::new(DistanceMetric::Euclidean);
		let seeds = std::cell::RefCell::new(Vec::new());
		let on_init = |s: &KMeansState<'_, f64>| *seeds.borrow_mut() = testing::centroids(s);
		let conf = KMeansConfig::build().init_done(&on_init).build();

		kmean.kmeans_lloyd(&points, 3, 10, KMeans::init_first_k, &conf).unwrap();
		assert_eq!(*seeds.borrow(), vec![vec![5.0, 1.0], vec![2.0, 2.0], vec![0.0, 3.0]]);
	}
}

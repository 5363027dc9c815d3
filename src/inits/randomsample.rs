use crate::{KMeansState, KMeansConfig, Point, Primitive};
use rand::prelude::*;
use std::ops::DerefMut;

pub fn calculate<T: Primitive>(points: &[Point<T>], state: &mut KMeansState<'_, T>, config: &KMeansConfig<'_, T>) {
	// choose_multiple draws without replacement, so all seeds are distinct samples
	let chosen = points.iter()
		.choose_multiple(config.rnd.borrow_mut().deref_mut(), state.k);
	chosen.into_iter()
		.enumerate()
		.for_each(|(ci, c)| { // Copy randomly chosen centroids into the clusters
			state.set_centroid_from_iter(ci, c.coordinates().iter().cloned());
		});
}

use crate::{DistanceMetric, Primitive};

/// Convert an element count into the primitive type (rounding for very large counts).
pub(crate) fn count_as<T: Primitive>(cnt: usize) -> T {
    // f32 / f64 can represent every usize, potentially rounded
    T::from(cnt).unwrap_or_else(T::max_value)
}

/// Index and distance of the centroid nearest to `sample`.
///
/// Only a strictly smaller distance replaces the current best, so ties resolve to the
/// lowest centroid index.
#[inline(always)]
pub(crate) fn nearest_centroid<T: Primitive>(metric: &DistanceMetric<T>, sample: &[T], centroids: &[&[T]]) -> (usize, T) {
    centroids.iter()
        .map(|c| metric.distance(sample, c))
        .enumerate()
        .fold((0, T::infinity()), |(best_idx, best_dist), (idx, dist)| {
            if dist < best_dist { (idx, dist) } else { (best_idx, best_dist) }
        })
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-12))
}

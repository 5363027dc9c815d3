mod euclideandistance;
mod manhattandistance;

use crate::Primitive;

/// Signature of a caller-supplied distance function, see [`DistanceMetric::Custom`].
pub type DistanceFn<T> = fn(&[T], &[T]) -> T;

/// Dissimilarity measure used to compare points with centroids.
///
/// A metric is chosen once per [`KMeans`](crate::KMeans) engine, and used uniformly for every
/// comparison of every run done with it.
#[derive(Clone, Copy)]
pub enum DistanceMetric<T: Primitive> {
    /// Square root of the sum of squared coordinate differences.
    Euclidean,
    /// Sum of absolute coordinate differences.
    Manhattan,
    /// Caller-supplied function. It has to be symmetric and non-negative, with `d(a, a) == 0`.
    /// Both slices passed to it always have the same length.
    Custom(DistanceFn<T>),
}

impl<T: Primitive> DistanceMetric<T> {
    /// Distance between two coordinate vectors of equal length.
    ///
    /// Callers are responsible for the length check. The public entry point is
    /// [`Point::distance_to`](crate::Point::distance_to), which reports mismatches.
    #[inline(always)]
    pub(crate) fn distance(&self, a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        match self {
            DistanceMetric::Euclidean => euclideandistance::calculate(a, b),
            DistanceMetric::Manhattan => manhattandistance::calculate(a, b),
            DistanceMetric::Custom(f) => f(a, b),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Manhattan => "manhattan",
            DistanceMetric::Custom(_) => "custom",
        }
    }
}

impl<T: Primitive> Default for DistanceMetric<T> {
    fn default() -> Self { DistanceMetric::Euclidean }
}

impl<T: Primitive> std::fmt::Debug for DistanceMetric<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
    }

    #[test]
    fn builtin_metrics() {
        assert_eq!(DistanceMetric::Euclidean.distance(&[0.0f64], &[5.0]), 5.0);
        assert_eq!(DistanceMetric::Manhattan.distance(&[0.0f64], &[5.0]), 5.0);
        assert_eq!(DistanceMetric::Euclidean.distance(&[0.0f64, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(DistanceMetric::Manhattan.distance(&[0.0f64, 0.0], &[3.0, 4.0]), 7.0);
        assert_eq!(DistanceMetric::Euclidean.distance(&[0.0f32, 0.0], &[-3.0, -4.0]), 5.0);
        assert_eq!(DistanceMetric::Manhattan.distance(&[1.0f32, -1.0, 2.0], &[1.0, -1.0, 2.0]), 0.0);
    }

    #[test]
    fn custom_metric() {
        let metric = DistanceMetric::Custom(chebyshev);
        assert_eq!(metric.distance(&[0.0, 0.0], &[3.0, 4.0]), 4.0);
        assert_eq!(metric.name(), "custom");
        assert_eq!(format!("{:?}", DistanceMetric::<f64>::Manhattan), "manhattan");
    }
}

use crate::{ClusterError, DistanceMetric, Primitive, Result};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a [`Point`], handed out by a [`PointIds`] generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic identity generator for points.
///
/// Every dataset (or loader) owns its own generator, so independent runs never share
/// hidden counter state. Ids are unique per generator only.
#[derive(Debug, Default)]
pub struct PointIds {
    next: AtomicU64,
}

impl PointIds {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: AtomicU64::new(first) }
    }

    /// Hand out the next id. Safe to call from multiple threads.
    pub fn next_id(&self) -> PointId {
        PointId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// A point in N-dimensional space.
///
/// The dimension is fixed at construction: coordinates can be overwritten (see
/// [`Point::relocate`] and [`Point::set_coordinate`]) but never resized.
///
/// Equality only compares coordinates (exactly, without tolerance). Identity and the
/// `visited` / `outlier` flags are ignored.
#[derive(Clone, Debug)]
pub struct Point<T: Primitive> {
    id: PointId,
    coordinates: Vec<T>,
    visited: bool,
    outlier: bool,
}

impl<T: Primitive> Point<T> {
    /// Create a point from the given coordinate vector. Its dimension is `coordinates.len()`,
    /// which has to be positive.
    pub fn new(ids: &PointIds, coordinates: Vec<T>) -> Result<Self> {
        if coordinates.is_empty() {
            return Err(ClusterError::invalid("a point needs at least one dimension"));
        }
        Ok(Self { id: ids.next_id(), coordinates, visited: false, outlier: false })
    }

    /// Create a point of the given dimension, located at the origin.
    pub fn zeros(ids: &PointIds, dimension: usize) -> Result<Self> {
        Self::new(ids, vec![T::zero(); dimension])
    }

    /// Create a new point (with a fresh identity) at the same location as `other`.
    pub fn copy_of(ids: &PointIds, other: &Point<T>) -> Self {
        Self { id: ids.next_id(), coordinates: other.coordinates.clone(), visited: false, outlier: false }
    }

    pub fn id(&self) -> PointId { self.id }
    pub fn dimension(&self) -> usize { self.coordinates.len() }
    pub fn coordinates(&self) -> &[T] { &self.coordinates }

    /// Distance between this point and `other` under the given metric.
    ///
    /// ## Errors
    /// [`ClusterError::DimensionMismatch`] if both points do not share their dimension.
    pub fn distance_to(&self, other: &Point<T>, metric: &DistanceMetric<T>) -> Result<T> {
        self.check_dimension(other.dimension())?;
        Ok(metric.distance(&self.coordinates, &other.coordinates))
    }

    /// Replace all coordinates of this point with `target`, which must have the same dimension.
    pub fn relocate(&mut self, target: &[T]) -> Result<()> {
        self.check_dimension(target.len())?;
        self.coordinates.copy_from_slice(target);
        Ok(())
    }

    pub fn coordinate(&self, index: usize) -> Result<T> {
        self.coordinates.get(index).copied()
            .ok_or(ClusterError::IndexOutOfRange { index, dimension: self.dimension() })
    }

    pub fn set_coordinate(&mut self, index: usize, value: T) -> Result<()> {
        let dimension = self.dimension();
        let coord = self.coordinates.get_mut(index)
            .ok_or(ClusterError::IndexOutOfRange { index, dimension })?;
        *coord = value;
        Ok(())
    }

    // Storage only, nothing in this crate reads these flags.
    pub fn visited(&self) -> bool { self.visited }
    pub fn set_visited(&mut self, visited: bool) { self.visited = visited; }
    pub fn outlier(&self) -> bool { self.outlier }
    pub fn set_outlier(&mut self, outlier: bool) { self.outlier = outlier; }

    /// Dimension-preserving mutable view, for in-crate centroid updates.
    pub(crate) fn coordinates_mut(&mut self) -> &mut [T] { &mut self.coordinates }

    pub(crate) fn check_dimension(&self, found: usize) -> Result<()> {
        if found != self.dimension() {
            return Err(ClusterError::DimensionMismatch { expected: self.dimension(), found });
        }
        Ok(())
    }
}

impl<T: Primitive> PartialEq for Point<T> {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates == other.coordinates
    }
}

impl<T: Primitive> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point {} {{{:?}}}", self.id, self.coordinates)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_per_generator() {
        let ids = PointIds::new();
        let a = Point::new(&ids, vec![1.0f64]).unwrap();
        let b = Point::new(&ids, vec![2.0f64]).unwrap();
        let c = Point::copy_of(&ids, &a);
        assert_eq!(a.id(), PointId(0));
        assert_eq!(b.id(), PointId(1));
        assert_eq!(c.id(), PointId(2));

        // A second generator starts over, it shares no state with the first one
        let other = PointIds::new();
        assert_eq!(Point::new(&other, vec![0.0f32]).unwrap().id(), PointId(0));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let ids = PointIds::new();
        assert!(matches!(Point::<f64>::new(&ids, vec![]), Err(ClusterError::InvalidArgument(_))));
        assert!(matches!(Point::<f64>::zeros(&ids, 0), Err(ClusterError::InvalidArgument(_))));
        assert_eq!(Point::<f64>::zeros(&ids, 3).unwrap().coordinates(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn distances() {
        let ids = PointIds::new();
        let a = Point::new(&ids, vec![0.0f64]).unwrap();
        let b = Point::new(&ids, vec![5.0f64]).unwrap();
        assert_eq!(a.distance_to(&b, &DistanceMetric::Euclidean).unwrap(), 5.0);
        assert_eq!(a.distance_to(&b, &DistanceMetric::Manhattan).unwrap(), 5.0);

        let a = Point::new(&ids, vec![0.0f64, 0.0]).unwrap();
        let b = Point::new(&ids, vec![3.0f64, 4.0]).unwrap();
        assert_eq!(a.distance_to(&b, &DistanceMetric::Euclidean).unwrap(), 5.0);
        assert_eq!(a.distance_to(&b, &DistanceMetric::Manhattan).unwrap(), 7.0);
        assert_eq!(b.distance_to(&a, &DistanceMetric::Manhattan).unwrap(), 7.0);
        assert_eq!(a.distance_to(&a, &DistanceMetric::Euclidean).unwrap(), 0.0);
    }

    #[test]
    fn distance_dimension_mismatch() {
        let ids = PointIds::new();
        let a = Point::new(&ids, vec![0.0f64, 1.0]).unwrap();
        let b = Point::new(&ids, vec![0.0f64, 1.0, 2.0]).unwrap();
        assert_eq!(a.distance_to(&b, &DistanceMetric::Euclidean),
            Err(ClusterError::DimensionMismatch { expected: 2, found: 3 }));
    }

    #[test]
    fn relocate_keeps_dimension() {
        let ids = PointIds::new();
        let mut p = Point::new(&ids, vec![1.0f64, 2.0]).unwrap();
        let id = p.id();
        p.relocate(&[3.0, 4.0]).unwrap();
        assert_eq!(p.coordinates(), &[3.0, 4.0]);
        assert_eq!(p.id(), id);
        assert_eq!(p.relocate(&[1.0]), Err(ClusterError::DimensionMismatch { expected: 2, found: 1 }));
        assert_eq!(p.coordinates(), &[3.0, 4.0]);
    }

    #[test]
    fn indexed_access() {
        let ids = PointIds::new();
        let mut p = Point::new(&ids, vec![1.0f32, 2.0]).unwrap();
        assert_eq!(p.coordinate(1).unwrap(), 2.0);
        p.set_coordinate(0, 7.5).unwrap();
        assert_eq!(p.coordinates(), &[7.5, 2.0]);
        assert_eq!(p.coordinate(2), Err(ClusterError::IndexOutOfRange { index: 2, dimension: 2 }));
        assert_eq!(p.set_coordinate(5, 0.0), Err(ClusterError::IndexOutOfRange { index: 5, dimension: 2 }));
    }

    #[test]
    fn equality_ignores_identity_and_flags() {
        let ids = PointIds::new();
        let a = Point::new(&ids, vec![1.0f64, 2.0]).unwrap();
        let mut b = Point::new(&ids, vec![1.0f64, 2.0]).unwrap();
        b.set_visited(true);
        b.set_outlier(true);
        assert_ne!(a.id(), b.id());
        assert_eq!(a, b);
        assert_ne!(a, Point::new(&ids, vec![1.0f64, 2.0000001]).unwrap());
        assert_ne!(a, Point::new(&ids, vec![1.0f64, 2.0, 0.0]).unwrap());
    }

    #[test]
    fn display() {
        let ids = PointIds::starting_at(7);
        let p = Point::new(&ids, vec![1.0f64, 2.5]).unwrap();
        assert_eq!(p.to_string(), "Point 7 {[1.0, 2.5]}");
    }
}

use crate::{helpers, ClusterError, DistanceMetric, Point, Primitive, Result};

/// A group of points, represented by its centroid.
///
/// The cluster exclusively owns its centroid, while members are borrowed from the dataset
/// the cluster was computed on. A point is a member of a cluster at most once.
///
/// ## Generics
/// - **'p**: Lifetime of the dataset the member points are borrowed from
/// - **T**: Underlying primitive type of the coordinates
#[derive(Clone, Debug)]
pub struct Cluster<'p, T: Primitive> {
    centroid: Point<T>,
    members: Vec<&'p Point<T>>,
}

impl<'p, T: Primitive> Cluster<'p, T> {
    /// Create an empty cluster around the given seed centroid.
    pub fn new(centroid: Point<T>) -> Self {
        Self { centroid, members: Vec::new() }
    }

    pub fn centroid(&self) -> &Point<T> { &self.centroid }
    pub fn members(&self) -> &[&'p Point<T>] { &self.members }
    pub fn len(&self) -> usize { self.members.len() }
    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    /// Whether this exact point (by reference, not by coordinates) is a member.
    pub fn contains(&self, point: &Point<T>) -> bool {
        self.members.iter().any(|m| std::ptr::eq(*m, point))
    }

    /// Add a point to this cluster's membership.
    ///
    /// ## Errors
    /// - [`ClusterError::DimensionMismatch`] if the point's dimension differs from the centroid's
    /// - [`ClusterError::InvalidArgument`] if the point already is a member
    pub fn add_member(&mut self, point: &'p Point<T>) -> Result<()> {
        self.centroid.check_dimension(point.dimension())?;
        if self.contains(point) {
            return Err(ClusterError::invalid(format!("point {} already is a member of this cluster", point.id())));
        }
        self.members.push(point);
        Ok(())
    }

    /// The engine rebuilds memberships from a complete assignment vector, which can not contain
    /// duplicates, and validated all dimensions up-front.
    pub(crate) fn push_member(&mut self, point: &'p Point<T>) {
        debug_assert_eq!(point.dimension(), self.centroid.dimension());
        self.members.push(point);
    }

    pub fn clear_members(&mut self) {
        self.members.clear();
    }

    /// Move the centroid to the coordinate-wise mean of all current members.
    ///
    /// An empty cluster keeps its centroid where it is.
    ///
    /// ## Returns
    /// Whether any centroid coordinate changed.
    pub fn recompute_centroid(&mut self) -> bool {
        if self.members.is_empty() {
            return false;
        }
        let mut mean = vec![T::zero(); self.centroid.dimension()];
        for member in self.members.iter() {
            mean.iter_mut().zip(member.coordinates().iter())
                .for_each(|(mv, &pv)| *mv += pv);
        }
        let cnt = helpers::count_as::<T>(self.members.len());
        for (dim, mv) in mean.iter_mut().enumerate() {
            if mv.is_finite() {
                *mv = *mv / cnt;
            } else {
                // The plain sum overflowed, scale every member down first
                *mv = self.members.iter().map(|m| m.coordinates()[dim] / cnt).sum();
            }
        }

        let changed = mean.as_slice() != self.centroid.coordinates();
        self.centroid.coordinates_mut().copy_from_slice(&mean);
        changed
    }

    /// Distance from the given point to this cluster's centroid.
    ///
    /// ## Errors
    /// - [`ClusterError::DimensionMismatch`] if the point's dimension differs from the centroid's,
    ///   which is the expected one
    pub fn centroid_distance_to(&self, point: &Point<T>, metric: &DistanceMetric<T>) -> Result<T> {
        self.centroid.check_dimension(point.dimension())?;
        point.distance_to(&self.centroid, metric)
    }

    pub(crate) fn centroid_mut(&mut self) -> &mut Point<T> { &mut self.centroid }
}

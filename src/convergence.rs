use crate::{ClusterError, Primitive, Result};

/// Enum with possible convergence criteria.
/// These criteria specify when a centroid counts as "not moved" between two consecutive
/// iterations. A run has converged once no centroid moved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Convergence<T: Primitive> {
	/// Centroids have to be exactly equal, coordinate by coordinate. This is the default.
	Exact,
	/// Every coordinate may have moved by at most **epsilon**.
	/// ## Fields:
	/// - **epsilon**: Largest per-coordinate movement still counted as "not moved" (finite, `>= 0`)
	Tolerance { epsilon: T }
}
impl<T: Primitive> Default for Convergence<T> {
	fn default() -> Self { Convergence::Exact }
}
impl<T: Primitive> Convergence<T> {
	pub(crate) fn validate(&self) -> Result<()> {
		match *self {
			Convergence::Exact => Ok(()),
			Convergence::Tolerance{epsilon} if epsilon.is_finite() && epsilon >= T::zero() => Ok(()),
			Convergence::Tolerance{epsilon} => Err(ClusterError::invalid(
				format!("convergence tolerance has to be finite and non-negative, got {}", epsilon)))
		}
	}

	/// Whether a centroid located at **previous** before the update step and at **current**
	/// after it counts as unchanged.
	pub(crate) fn unchanged(&self, previous: &[T], current: &[T]) -> bool {
		match *self {
			Convergence::Exact => previous == current,
			Convergence::Tolerance{epsilon} => previous.iter().zip(current.iter())
				.all(|(&p, &c)| (p - c).abs() <= epsilon)
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test] fn test_exact_f32() { test_exact::<f32>(); }
	#[test] fn test_exact_f64() { test_exact::<f64>(); }

	fn test_exact<T: Primitive>() {
		let c = |v: f64| T::from(v).unwrap();
		let criterion = Convergence::<T>::default();
		assert_eq!(criterion, Convergence::Exact);
		assert!(criterion.validate().is_ok());
		assert!(criterion.unchanged(&[c(1.0), c(2.0)], &[c(1.0), c(2.0)]));
		assert!(!criterion.unchanged(&[c(1.0), c(2.0)], &[c(1.0), c(2.001)]));
		assert!(!criterion.unchanged(&[c(0.0)], &[T::min_positive_value()]));
	}

	#[test] fn test_tolerance_f32() { test_tolerance::<f32>(); }
	#[test] fn test_tolerance_f64() { test_tolerance::<f64>(); }

	fn test_tolerance<T: Primitive>() {
		let c = |v: f64| T::from(v).unwrap();
		let criterion = Convergence::Tolerance { epsilon: c(0.01) };
		assert!(criterion.validate().is_ok());
		assert!(criterion.unchanged(&[c(1.0), c(2.0)], &[c(1.0), c(2.0)]));
		assert!(criterion.unchanged(&[c(1.0), c(2.0)], &[c(1.005), c(1.995)]));
		assert!(!criterion.unchanged(&[c(1.0), c(2.0)], &[c(1.0), c(2.5)]));

		// Zero tolerance behaves like exact matching
		let criterion = Convergence::Tolerance { epsilon: T::zero() };
		assert!(criterion.unchanged(&[c(3.0)], &[c(3.0)]));
		assert!(!criterion.unchanged(&[c(3.0)], &[c(3.5)]));
	}

	#[test]
	fn test_invalid_tolerance() {
		assert!(matches!(Convergence::Tolerance { epsilon: -1.0f64 }.validate(), Err(ClusterError::InvalidArgument(_))));
		assert!(matches!(Convergence::Tolerance { epsilon: f64::NAN }.validate(), Err(ClusterError::InvalidArgument(_))));
		assert!(matches!(Convergence::Tolerance { epsilon: f32::INFINITY }.validate(), Err(ClusterError::InvalidArgument(_))));
	}
}

use crate::Primitive;

/// `sqrt(sum((a_i - b_i)^2))`
#[inline(always)]
pub(crate) fn calculate<T: Primitive>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b.iter())
        .map(|(&av, &bv)| av - bv)  // <a> - <b>
        .map(|v| v * v)             // <vec_components> ^2
        .sum::<T>()
        .sqrt()
}

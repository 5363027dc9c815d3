use crate::Primitive;

/// `sum(|a_i - b_i|)`
#[inline(always)]
pub(crate) fn calculate<T: Primitive>(a: &[T], b: &[T]) -> T {
    let mut total = T::zero();
    for (&x, &y) in a.iter().zip(b.iter()) {
        total += (x - y).abs();
    }
    total
}

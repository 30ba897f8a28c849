use crate::core::types::Vector3;

/// Calculates the vector reflection of vector `d` across the surface normal `n`.
///
/// `d` points *towards* the surface; the length of `d` is preserved
pub fn reflect(d: Vector3, n: Vector3) -> Vector3 { d - n * (2. * d.dot(n)) }

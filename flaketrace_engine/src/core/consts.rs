use crate::core::types::Number;

/// Smallest accepted ray parameter, and the threshold below which a ray counts as parallel to a plane
pub const EPSILON: Number = 1e-6;

/// Length that camera and reflection rays are scaled to.
///
/// Ray parameters are fractions of this length, so only hits within `RAY_MAG` of the origin are found.
/// Also the half-extent of the bounds reported by unbounded meshes.
pub const RAY_MAG: Number = 1000.0;

/// Default number of shading steps for a primary ray
pub const MAX_DEPTH: usize = 5;

pub mod aabb;
pub mod intersect;
pub mod interval;
pub mod math;
pub mod ray;
pub mod validate;

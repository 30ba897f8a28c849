//! Acceleration structures for ray-primitive intersection

pub mod bvh;

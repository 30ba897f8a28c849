pub mod colour;
pub mod consts;
pub mod image;
pub mod targets;
pub mod types;

mod macros;

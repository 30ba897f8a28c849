mod impl_utils;
mod targets;

// Domain layer: value types and ports. Adapters live in crate::adapters.

pub mod model;
pub mod ports;

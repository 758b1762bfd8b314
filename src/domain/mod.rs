// Domain layer: value types and the ports external collaborators implement.

pub mod model;
pub mod ports;

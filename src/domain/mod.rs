// Domain layer: core models, API payload shapes and ports (interfaces).

pub mod model;
pub mod places;
pub mod ports;

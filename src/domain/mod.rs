// Domain layer: core models, geometry, alert rules and ports (interfaces).

pub mod classify;
pub mod geo;
pub mod model;
pub mod ports;

// Domain layer: install plan model and the process port. No I/O here.

pub mod model;
pub mod ports;

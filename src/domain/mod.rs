// Domain layer: API records, request values and ports (interfaces).

pub mod model;
pub mod ports;
pub mod request;

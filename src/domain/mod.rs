// Domain layer: plain data types and the ports adapters implement.

pub mod model;
pub mod ports;

// Domain layer: identifiers, CSL-JSON records and the ports the core talks through.

pub mod csl;
pub mod model;
pub mod ports;

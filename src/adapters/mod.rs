// Adapters layer: concrete implementations of the domain ports.

pub mod apa;
pub mod http;

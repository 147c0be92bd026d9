pub mod aggregator;
pub mod civil_range;
pub mod clipper;
mod error;
pub mod models;
pub mod overlap;
pub mod ports;
pub mod services;
pub mod zone;

pub use error::*;

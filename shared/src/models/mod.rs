//! Domain models for the AgriPest Monitoring Platform

mod analysis;
mod detection;
mod weather;

pub use analysis::*;
pub use detection::*;
pub use weather::*;

//! Business logic services for the AgriPest Monitoring Platform

pub mod analysis;
pub mod weather;

pub use analysis::AnalysisService;
pub use weather::WeatherService;

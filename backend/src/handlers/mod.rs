//! HTTP request handlers

pub mod analysis;
pub mod health;
pub mod weather;

pub use analysis::*;
pub use health::*;
pub use weather::*;

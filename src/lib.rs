pub mod algorithms;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod hazards;
pub mod session;
pub mod statistics;

pub use error::{PlanError, Result};

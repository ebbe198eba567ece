//! Reinvest - portfolio growth simulator
//!
//! This library simulates a fixed-weight portfolio bought on the first day of
//! a window, reinvests every dividend, and compares the result against an
//! optional benchmark index.

pub mod calendar;
pub mod config;
pub mod error;
pub mod portfolio;
pub mod pricing;
pub mod reports;
pub mod series;
pub mod utils;

pub use error::{Result, SimulationError};

// Portfolio module - allocation, dividend reinvestment, aggregation and returns

pub mod aggregate;
pub mod allocation;
pub mod benchmark;
pub mod engine;
pub mod reinvest;
pub mod request;
pub mod returns;

pub use allocation::{build_allocations, AssetAllocation};
pub use benchmark::{index_display_name, known_indices, BenchmarkSelection};
pub use engine::Simulator;
pub use reinvest::{simulate_reinvestment, ReinvestmentResult, SharePosition};
pub use request::SimulationRequest;
pub use returns::{percent_return, percent_return_from_basis};

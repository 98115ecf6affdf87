pub mod ancestry;
pub mod filter;
pub mod orchestrator;
pub mod progress;
pub mod rank;

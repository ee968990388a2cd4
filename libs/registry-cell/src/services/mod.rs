pub mod audit;
pub mod interactions;
pub mod records;
pub mod registry;
pub mod scheduler;
pub mod seed;
pub mod validation;

pub use registry::{Clock, Registry, SharedRegistry};

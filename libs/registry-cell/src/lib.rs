pub mod error;
pub mod models;
pub mod handlers;
pub mod router;
pub mod services;

pub use error::{ClinicalError, Entity, ErrorKind};
pub use models::*;
pub use router::*;
pub use services::registry::{Clock, Registry, SharedRegistry};

pub mod agent;
pub mod completion;
pub mod intent;
pub mod session;

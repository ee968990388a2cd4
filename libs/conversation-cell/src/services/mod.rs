pub mod actions;
pub mod conversation;
pub mod storage;

pub mod event;
pub mod owners;
pub mod utils;

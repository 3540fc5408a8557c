pub mod actions;
pub mod transaction;

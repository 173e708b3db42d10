pub mod readme;
pub mod store;

pub mod clean;
pub mod sink;

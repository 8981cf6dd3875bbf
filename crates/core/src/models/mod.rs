pub mod chart;
pub mod holding;
pub mod snapshot;
pub mod summary;

pub mod aggregation_service;
pub mod calc;
pub mod chart_service;
pub mod holding_service;
pub mod journal_service;

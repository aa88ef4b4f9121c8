pub mod aggregator;
pub mod collector;
pub mod sync_service;

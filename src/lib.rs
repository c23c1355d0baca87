pub mod aggregator_core;
pub mod config;
pub mod consumer;
pub mod dashboard;

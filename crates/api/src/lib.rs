//! HTTP surface of the reporting aggregator: configuration, routing and
//! response mapping.

pub mod app;
pub mod config;

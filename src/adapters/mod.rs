//! Concrete adapter implementations for ports.

pub mod csv_timeline_adapter;
pub mod file_config_adapter;
pub mod ini_graph_adapter;

//! Port traits at the edges of the domain.

pub mod config_port;
pub mod graph_port;
pub mod timeline_port;

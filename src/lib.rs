//! plotgroup: plot grouping and ordering for a strategy object graph.
//!
//! Hexagonal layout: graph model and resolvers in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;

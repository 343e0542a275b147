//! Core graph model and resolvers.

pub mod node;
pub mod graph;
pub mod clock;
pub mod plotmaster;
pub mod hierarchy;
pub mod naming;
pub mod alignment;
pub mod error;

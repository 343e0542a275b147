//! Source of a fully-constructed strategy object graph.

use crate::domain::error::PlotGroupError;
use crate::domain::graph::ObjectGraph;

pub trait GraphPort {
    fn load_graph(&self) -> Result<ObjectGraph, PlotGroupError>;
}

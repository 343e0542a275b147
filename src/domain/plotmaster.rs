//! Plot-master resolution: which visual group a series is rendered under.

use crate::domain::error::{PlotGroupError, Relation};
use crate::domain::graph::ObjectGraph;
use crate::domain::node::NodeId;
use std::collections::HashSet;

/// Follows plot-master overrides from `id` to the first node without one.
///
/// `None` is returned unchanged. Nodes without plot capability have no override
/// and resolve to themselves.
pub fn resolve_plotmaster(
    graph: &ObjectGraph,
    id: Option<NodeId>,
) -> Result<Option<NodeId>, PlotGroupError> {
    let Some(mut current) = id else {
        return Ok(None);
    };
    let mut visited = HashSet::new();
    loop {
        let node = graph.node(current)?;
        if !visited.insert(current) {
            return Err(PlotGroupError::CyclicReference {
                relation: Relation::PlotMaster,
                node: node.to_string(),
            });
        }
        match node.plotinfo().and_then(|info| info.plotmaster) {
            Some(master) => current = master,
            None => return Ok(Some(current)),
        }
    }
}

/// [`resolve_plotmaster`] for a node that is known to be present.
pub fn plotmaster_of(graph: &ObjectGraph, id: NodeId) -> Result<NodeId, PlotGroupError> {
    Ok(resolve_plotmaster(graph, Some(id))?.unwrap_or(id))
}

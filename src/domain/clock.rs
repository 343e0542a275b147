//! Clock resolution: which node defines the time axis a series runs on.

use crate::domain::error::{PlotGroupError, Relation};
use crate::domain::graph::ObjectGraph;
use crate::domain::node::{NodeId, NodeKind};
use std::collections::HashSet;
use tracing::debug;

/// Follows clock edges from `id` until a clock node is reached.
///
/// Lines, line operations and line stubs are always passed through. An indicator
/// or observer is its own clock unless `resolve_to_data` is set, in which case the
/// walk continues down to the strategy or data feed that ultimately drives it.
pub fn resolve_clock(
    graph: &ObjectGraph,
    id: NodeId,
    resolve_to_data: bool,
) -> Result<NodeId, PlotGroupError> {
    let mut visited = HashSet::new();
    let mut current = id;
    loop {
        let node = graph.node(current)?;
        if !visited.insert(current) {
            return Err(PlotGroupError::CyclicReference {
                relation: Relation::Clock,
                node: node.to_string(),
            });
        }
        let next = match &node.kind {
            NodeKind::LinesOperation { clock } => *clock,
            NodeKind::Line { owner } => *owner,
            NodeKind::LineStub { lines } => match lines.first() {
                Some(first) => *first,
                None => {
                    return Err(PlotGroupError::UnsupportedNodeKind {
                        node: node.to_string(),
                        kind: "empty LineSeriesStub".to_string(),
                    });
                }
            },
            NodeKind::Indicator(derived) | NodeKind::Observer(derived) => {
                if !resolve_to_data {
                    return Ok(current);
                }
                derived.clock
            }
            NodeKind::Strategy { .. } | NodeKind::Data(_) => return Ok(current),
            NodeKind::Foreign { type_name } => {
                return Err(PlotGroupError::UnsupportedNodeKind {
                    node: node.to_string(),
                    kind: type_name.clone(),
                });
            }
        };
        debug!(from = %node, to = %next, "following clock edge");
        current = next;
    }
}

/// Timestamp line of the clock driving `id`.
///
/// Derived series have no timeline of their own, so an indicator clock answers with
/// the timeline of the feed beneath it. The strategy answers as in
/// [`ObjectGraph::timeline`].
pub fn clock_line(graph: &ObjectGraph, id: NodeId) -> Result<&[f64], PlotGroupError> {
    let clock = resolve_clock(graph, id, false)?;
    let base = match graph.node(clock)?.datetime() {
        Some(_) => clock,
        None => resolve_clock(graph, clock, true)?,
    };
    graph.timeline(base)
}

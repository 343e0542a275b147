//! Data names and source ids used to label plotted series.

use crate::domain::clock::resolve_clock;
use crate::domain::error::PlotGroupError;
use crate::domain::graph::ObjectGraph;
use crate::domain::node::{DataFeed, Node, NodeId, NodeKind};

/// Name of the feed `id` is driven by, or `None` when it runs directly on the
/// strategy's timeline.
pub fn resolve_dataname(graph: &ObjectGraph, id: NodeId) -> Result<Option<String>, PlotGroupError> {
    let base = resolve_clock(graph, id, true)?;
    let node = graph.node(base)?;
    match &node.kind {
        NodeKind::Strategy { .. } => Ok(None),
        NodeKind::Data(feed) => Ok(Some(feed_name(node, feed))),
        other => Err(PlotGroupError::UnsupportedNodeKind {
            node: node.to_string(),
            kind: other.name().to_string(),
        }),
    }
}

/// Display name, then engine name, then the node's own description.
pub(crate) fn feed_name(node: &Node, feed: &DataFeed) -> String {
    [&feed.name, &feed.dataname]
        .into_iter()
        .flatten()
        .find(|n| !n.is_empty())
        .cloned()
        .unwrap_or_else(|| node.to_string())
}

/// Names of the strategy's feeds in declaration order. With `filter` set, feeds
/// that have plotting disabled are left out.
pub fn get_datanames(graph: &ObjectGraph, filter: bool) -> Result<Vec<String>, PlotGroupError> {
    let mut names = Vec::with_capacity(graph.datas().len());
    for &id in graph.datas() {
        let node = graph.node(id)?;
        let NodeKind::Data(feed) = &node.kind else {
            continue;
        };
        if filter && !feed.plotinfo.plot {
            continue;
        }
        names.push(feed_name(node, feed));
    }
    Ok(names)
}

/// Whether `id` belongs in output restricted to `dataname`. `None` disables the
/// filter; nodes on the strategy's own timeline always pass.
pub fn filter_by_dataname(
    graph: &ObjectGraph,
    id: NodeId,
    dataname: Option<&str>,
) -> Result<bool, PlotGroupError> {
    let Some(target) = dataname else {
        return Ok(true);
    };
    Ok(match resolve_dataname(graph, id)? {
        None => true,
        Some(name) => name == target,
    })
}

/// Identifier unique to `id` within this process, for naming generated columns.
pub fn get_source_id(graph: &ObjectGraph, id: NodeId) -> String {
    format!("{}_{}", graph.uid(), id.index())
}

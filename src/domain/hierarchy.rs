//! Grouping of plottable nodes for the layout engine.
//!
//! Two groupings are produced from the same graph:
//!
//! - by clock: one group per time axis (the strategy and every plotable feed),
//!   holding the indicators and observers computed on it;
//! - by plot master: the clock groups regrouped by visual ownership, where feeds
//!   may nest under another feed and subplot indicators get a group of their own.

use crate::domain::clock::resolve_clock;
use crate::domain::error::PlotGroupError;
use crate::domain::graph::ObjectGraph;
use crate::domain::node::NodeId;
use crate::domain::plotmaster::plotmaster_of;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Group key to ordered members, keys kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotGroups {
    keys: Vec<NodeId>,
    members: HashMap<NodeId, Vec<NodeId>>,
}

impl PlotGroups {
    pub fn keys(&self) -> &[NodeId] {
        &self.keys
    }

    pub fn get(&self, key: NodeId) -> Option<&[NodeId]> {
        self.members.get(&key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: NodeId) -> bool {
        self.members.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[NodeId])> {
        self.keys
            .iter()
            .map(move |k| (*k, self.members[k].as_slice()))
    }

    fn ensure(&mut self, key: NodeId) -> &mut Vec<NodeId> {
        if !self.members.contains_key(&key) {
            self.keys.push(key);
        }
        self.members.entry(key).or_default()
    }

    fn push(&mut self, key: NodeId, member: NodeId) {
        self.ensure(key).push(member);
    }
}

/// Builds the plot grouping of `graph`.
///
/// Unless `include_non_plotable` is set, feeds with plotting disabled get no group
/// and indicators or observers that are disabled or skipped are left out. Nodes
/// without plot capability are always left out, as are indicators whose feed has
/// no group.
pub fn build_groups(
    graph: &ObjectGraph,
    include_non_plotable: bool,
    order_by_plotmaster: bool,
) -> Result<PlotGroups, PlotGroupError> {
    let by_clock = group_by_clock(graph, include_non_plotable)?;
    if !order_by_plotmaster {
        return Ok(by_clock);
    }
    group_by_plotmaster(graph, &by_clock)
}

fn group_by_clock(
    graph: &ObjectGraph,
    include_non_plotable: bool,
) -> Result<PlotGroups, PlotGroupError> {
    let mut groups = PlotGroups::default();
    groups.ensure(graph.strategy());

    for &data in graph.datas() {
        let plot = graph.plotinfo(data)?.is_some_and(|info| info.plot);
        if !include_non_plotable && !plot {
            debug!(data = %graph.node(data)?, "feed not plotted");
            continue;
        }
        groups.ensure(data);
    }

    for &obj in graph.indicators().iter().chain(graph.observers()) {
        let node = graph.node(obj)?;
        let Some(info) = node.plotinfo() else {
            debug!(node = %node, "no plot capability");
            continue;
        };
        if !include_non_plotable && !info.is_plotable() {
            debug!(node = %node, "not plotable");
            continue;
        }
        let data = resolve_clock(graph, obj, true)?;
        if groups.contains_key(data) {
            groups.push(data, obj);
        } else {
            warn!(node = %node, clock = %graph.node(data)?, "clock has no group, dropped");
        }
    }

    Ok(groups)
}

fn group_by_plotmaster(
    graph: &ObjectGraph,
    by_clock: &PlotGroups,
) -> Result<PlotGroups, PlotGroupError> {
    let mut groups = PlotGroups::default();

    for (data, members) in by_clock.iter() {
        let master = plotmaster_of(graph, data)?;
        if master == data {
            groups.ensure(data);
        } else {
            groups.push(master, data);
        }

        for &obj in members {
            let subplot = graph.plotinfo(obj)?.is_some_and(|info| info.subplot);
            if subplot {
                groups.ensure(obj);
            } else {
                let base = resolve_clock(graph, obj, true)?;
                groups.push(plotmaster_of(graph, base)?, obj);
            }
        }
    }

    Ok(groups)
}

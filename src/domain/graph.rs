//! Arena holding a strategy's object graph.
//!
//! The graph is assembled by the execution side (the builder methods below or
//! [`IniGraphAdapter`](crate::adapters::ini_graph_adapter::IniGraphAdapter)) and
//! handed to the resolvers as `&ObjectGraph`. Resolvers only ever read it.

use crate::domain::error::PlotGroupError;
use crate::domain::naming::feed_name;
use crate::domain::node::{DataFeed, Derived, Node, NodeId, NodeKind, PlotInfo};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_UID: AtomicU64 = AtomicU64::new(1);

const UNRESOLVED: &str = "Unresolved";

#[derive(Debug)]
pub struct ObjectGraph {
    uid: u64,
    nodes: Vec<Node>,
    strategy: NodeId,
    datas: Vec<NodeId>,
    indicators: Vec<NodeId>,
    observers: Vec<NodeId>,
}

impl Clone for ObjectGraph {
    /// A clone is a separate graph and gets its own uid, so source ids never collide.
    fn clone(&self) -> Self {
        Self {
            uid: NEXT_GRAPH_UID.fetch_add(1, Ordering::Relaxed),
            nodes: self.nodes.clone(),
            strategy: self.strategy,
            datas: self.datas.clone(),
            indicators: self.indicators.clone(),
            observers: self.observers.clone(),
        }
    }
}

impl ObjectGraph {
    /// Creates a graph containing only its strategy node.
    pub fn new(label: impl Into<String>) -> Self {
        let strategy = NodeId(0);
        Self {
            uid: NEXT_GRAPH_UID.fetch_add(1, Ordering::Relaxed),
            nodes: vec![Node {
                id: strategy,
                label: label.into(),
                kind: NodeKind::Strategy {
                    datetime: Vec::new(),
                },
            }],
            strategy,
            datas: Vec::new(),
            indicators: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Process-unique identity of this graph instance.
    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn strategy(&self) -> NodeId {
        self.strategy
    }

    pub fn datas(&self) -> &[NodeId] {
        &self.datas
    }

    pub fn indicators(&self) -> &[NodeId] {
        &self.indicators
    }

    pub fn observers(&self) -> &[NodeId] {
        &self.observers
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, PlotGroupError> {
        self.nodes
            .get(id.0)
            .ok_or(PlotGroupError::UnknownNode { index: id.0 })
    }

    pub fn label(&self, id: NodeId) -> Result<&str, PlotGroupError> {
        self.node(id).map(|n| n.label.as_str())
    }

    pub fn plotinfo(&self, id: NodeId) -> Result<Option<&PlotInfo>, PlotGroupError> {
        self.node(id).map(Node::plotinfo)
    }

    /// Timestamp line of `id`. The strategy runs on its own timeline when one was
    /// set and on its primary feed's otherwise.
    pub fn timeline(&self, id: NodeId) -> Result<&[f64], PlotGroupError> {
        let node = self.node(id)?;
        let datetime = node
            .datetime()
            .ok_or_else(|| PlotGroupError::UnsupportedNodeKind {
                node: node.to_string(),
                kind: node.kind.name().to_string(),
            })?;
        if id == self.strategy && datetime.is_empty() {
            if let Some(&primary) = self.datas.first() {
                return self.timeline(primary);
            }
        }
        Ok(datetime)
    }

    pub fn find_by_label(&self, label: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.label == label).map(|n| n.id)
    }

    /// Looks a feed up by the name [`get_datanames`](crate::domain::naming::get_datanames) reports for it.
    pub fn data_by_name(&self, name: &str) -> Result<NodeId, PlotGroupError> {
        for &id in &self.datas {
            let node = self.node(id)?;
            if let NodeKind::Data(feed) = &node.kind {
                if feed_name(node, feed) == name {
                    return Ok(id);
                }
            }
        }
        Err(PlotGroupError::UnknownDataName {
            name: name.to_string(),
        })
    }

    pub fn set_strategy_timeline(&mut self, datetime: Vec<f64>) {
        self.nodes[self.strategy.0].kind = NodeKind::Strategy { datetime };
    }

    /// Adds a node that is not listed under the strategy, e.g. a line or a line operation.
    pub fn add_node(&mut self, label: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            label: label.into(),
            kind,
        });
        id
    }

    pub fn add_data(&mut self, label: impl Into<String>, feed: DataFeed) -> NodeId {
        let id = self.add_node(label, NodeKind::Data(feed));
        self.datas.push(id);
        id
    }

    /// Lists a node under the strategy's indicators. Any kind is accepted since the
    /// engine also registers plain lines there.
    pub fn add_indicator(&mut self, label: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = self.add_node(label, kind);
        self.indicators.push(id);
        id
    }

    pub fn add_observer(&mut self, label: impl Into<String>, derived: Derived) -> NodeId {
        let id = self.add_node(label, NodeKind::Observer(derived));
        self.observers.push(id);
        id
    }

    /// Allocates a placeholder so that forward references can be handed out
    /// before the node itself is known. Must be completed with [`define`](Self::define).
    pub fn reserve(&mut self, label: impl Into<String>) -> NodeId {
        self.add_node(
            label,
            NodeKind::Foreign {
                type_name: UNRESOLVED.to_string(),
            },
        )
    }

    pub fn define(&mut self, id: NodeId, kind: NodeKind) -> Result<(), PlotGroupError> {
        if id == self.strategy {
            return Err(PlotGroupError::UnsupportedNodeKind {
                node: self.nodes[id.0].to_string(),
                kind: kind.name().to_string(),
            });
        }
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(PlotGroupError::UnknownNode { index: id.0 })?;
        node.kind = kind;
        Ok(())
    }

    pub fn register_data(&mut self, id: NodeId) -> Result<(), PlotGroupError> {
        let node = self.node(id)?;
        if !matches!(node.kind, NodeKind::Data(_)) {
            return Err(PlotGroupError::UnsupportedNodeKind {
                node: node.to_string(),
                kind: node.kind.name().to_string(),
            });
        }
        self.datas.push(id);
        Ok(())
    }

    pub fn register_indicator(&mut self, id: NodeId) -> Result<(), PlotGroupError> {
        self.node(id)?;
        self.indicators.push(id);
        Ok(())
    }

    pub fn register_observer(&mut self, id: NodeId) -> Result<(), PlotGroupError> {
        self.node(id)?;
        self.observers.push(id);
        Ok(())
    }

    /// Points `id` at a plot master, or clears it. Fails on nodes without plot capability.
    pub fn set_plotmaster(
        &mut self,
        id: NodeId,
        master: Option<NodeId>,
    ) -> Result<(), PlotGroupError> {
        if let Some(m) = master {
            self.node(m)?;
        }
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(PlotGroupError::UnknownNode { index: id.0 })?;
        let described = node.to_string();
        let kind = node.kind.name().to_string();
        match node.plotinfo_mut() {
            Some(info) => {
                info.plotmaster = master;
                Ok(())
            }
            None => Err(PlotGroupError::UnsupportedNodeKind {
                node: described,
                kind,
            }),
        }
    }
}

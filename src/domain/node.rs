//! Node kinds of a strategy object graph and their plot capability.

use std::fmt;

/// Non-owning handle to a node inside an [`ObjectGraph`](crate::domain::graph::ObjectGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Plot configuration carried by data feeds, indicators and observers.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotInfo {
    pub plot: bool,
    pub plotskip: bool,
    /// Render in a chart panel of its own instead of overlaying the group.
    pub subplot: bool,
    pub plotmaster: Option<NodeId>,
}

impl Default for PlotInfo {
    fn default() -> Self {
        Self {
            plot: true,
            plotskip: false,
            subplot: false,
            plotmaster: None,
        }
    }
}

impl PlotInfo {
    /// Plot enabled and not skipped.
    pub fn is_plotable(&self) -> bool {
        self.plot && !self.plotskip
    }
}

/// A base time-series feed.
#[derive(Debug, Clone, Default)]
pub struct DataFeed {
    /// User-assigned display name.
    pub name: Option<String>,
    /// Engine-assigned name, usually the source the feed was loaded from.
    pub dataname: Option<String>,
    pub plotinfo: PlotInfo,
    /// Timestamps in seconds since the epoch; `NaN` marks a bar not yet populated.
    pub datetime: Vec<f64>,
}

/// An indicator or observer: a computed series driven by a clock.
#[derive(Debug, Clone)]
pub struct Derived {
    pub clock: NodeId,
    pub plotinfo: PlotInfo,
}

impl Derived {
    pub fn new(clock: NodeId) -> Self {
        Self {
            clock,
            plotinfo: PlotInfo::default(),
        }
    }

    pub fn with_subplot(mut self, subplot: bool) -> Self {
        self.plotinfo.subplot = subplot;
        self
    }

    pub fn with_plotmaster(mut self, plotmaster: NodeId) -> Self {
        self.plotinfo.plotmaster = Some(plotmaster);
        self
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Root of a run. Its timeline is the strategy's primary time axis.
    Strategy { datetime: Vec<f64> },
    Data(DataFeed),
    Indicator(Derived),
    Observer(Derived),
    /// A single line of a multi-line series.
    Line { owner: NodeId },
    /// Arithmetic or comparison over lines, e.g. `macd > data.close`.
    LinesOperation { clock: NodeId },
    /// Bundle produced by indexing into a multi-line series.
    LineStub { lines: Vec<NodeId> },
    /// Anything the engine produced that has no meaning for plot grouping.
    Foreign { type_name: String },
}

impl NodeKind {
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Strategy { .. } => "Strategy",
            NodeKind::Data(_) => "DataSeries",
            NodeKind::Indicator(_) => "Indicator",
            NodeKind::Observer(_) => "Observer",
            NodeKind::Line { .. } => "LineSingle",
            NodeKind::LinesOperation { .. } => "LinesOperation",
            NodeKind::LineStub { .. } => "LineSeriesStub",
            NodeKind::Foreign { type_name } => type_name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn plotinfo(&self) -> Option<&PlotInfo> {
        match &self.kind {
            NodeKind::Data(feed) => Some(&feed.plotinfo),
            NodeKind::Indicator(d) | NodeKind::Observer(d) => Some(&d.plotinfo),
            _ => None,
        }
    }

    pub(crate) fn plotinfo_mut(&mut self) -> Option<&mut PlotInfo> {
        match &mut self.kind {
            NodeKind::Data(feed) => Some(&mut feed.plotinfo),
            NodeKind::Indicator(d) | NodeKind::Observer(d) => Some(&mut d.plotinfo),
            _ => None,
        }
    }

    /// The timestamp line owned by this node, if it has one.
    pub fn datetime(&self) -> Option<&[f64]> {
        match &self.kind {
            NodeKind::Strategy { datetime } => Some(datetime),
            NodeKind::Data(feed) => Some(&feed.datetime),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}{}>", self.kind.name(), self.label, self.id)
    }
}

//! Domain error types.

use std::fmt;

/// Which pointer chain a cyclic reference was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Clock,
    PlotMaster,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Clock => f.write_str("clock"),
            Relation::PlotMaster => f.write_str("plotmaster"),
        }
    }
}

/// Top-level error type for plotgroup.
#[derive(Debug, thiserror::Error)]
pub enum PlotGroupError {
    #[error("unsupported node kind {kind} for {node}")]
    UnsupportedNodeKind { node: String, kind: String },

    #[error("cyclic {relation} reference through {node}")]
    CyclicReference { relation: Relation, node: String },

    #[error("node #{index} does not belong to this graph")]
    UnknownNode { index: usize },

    #[error("no data feed named {name}")]
    UnknownDataName { name: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("timeline error in {file}: {reason}")]
    Timeline { file: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PlotGroupError> for std::process::ExitCode {
    fn from(err: &PlotGroupError) -> Self {
        let code: u8 = match err {
            PlotGroupError::Io(_) => 1,
            PlotGroupError::ConfigParse { .. }
            | PlotGroupError::ConfigMissing { .. }
            | PlotGroupError::ConfigInvalid { .. } => 2,
            PlotGroupError::Timeline { .. } => 3,
            PlotGroupError::UnsupportedNodeKind { .. }
            | PlotGroupError::CyclicReference { .. }
            | PlotGroupError::UnknownNode { .. }
            | PlotGroupError::UnknownDataName { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

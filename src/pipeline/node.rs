//! Stage abstraction for the pipeline.
//!
//! Every stage is a built-in node that owns its edges and runs a blocking
//! loop on its own thread until one of those edges closes. `BuiltinStage`
//! is the enum the registry spawns; it dispatches to the concrete node.

use crate::pipeline::nodes::{FilterNode, GeneratorNode};
use std::fmt;

/// What a stage does, without its edges. Cheap to copy into handles and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// Source of consecutive integers starting at `start`.
    Generator { start: u64 },
    /// Drops multiples of `prime`.
    Filter { prime: u64 },
}

impl StageKind {
    /// Thread name for a stage of this kind.
    pub fn thread_name(&self) -> String {
        match self {
            StageKind::Generator { .. } => "sieve-generator".to_string(),
            StageKind::Filter { prime } => format!("sieve-filter-{}", prime),
        }
    }

    /// Divisor of a filter stage, `None` for the generator.
    pub fn prime(&self) -> Option<u64> {
        match self {
            StageKind::Generator { .. } => None,
            StageKind::Filter { prime } => Some(*prime),
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Generator { start } => write!(f, "generator({}..)", start),
            StageKind::Filter { prime } => write!(f, "filter({})", prime),
        }
    }
}

/// Why a stage loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageExit {
    /// Input edge closed and fully drained.
    UpstreamClosed,
    /// The consumer of the output edge hung up.
    DownstreamClosed,
    /// A bounded generator produced its last value.
    Exhausted,
}

impl fmt::Display for StageExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageExit::UpstreamClosed => write!(f, "upstream closed"),
            StageExit::DownstreamClosed => write!(f, "downstream closed"),
            StageExit::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Enum dispatch for built-in stages.
pub enum BuiltinStage {
    Generator(GeneratorNode),
    Filter(FilterNode),
}

impl BuiltinStage {
    pub fn name(&self) -> &str {
        match self {
            BuiltinStage::Generator(n) => n.name(),
            BuiltinStage::Filter(n) => n.name(),
        }
    }

    pub fn kind(&self) -> StageKind {
        match self {
            BuiltinStage::Generator(n) => n.kind(),
            BuiltinStage::Filter(n) => n.kind(),
        }
    }

    /// Run the stage loop to completion on the current thread.
    pub fn run(self) -> StageExit {
        match self {
            BuiltinStage::Generator(n) => n.run(),
            BuiltinStage::Filter(n) => n.run(),
        }
    }
}

impl From<GeneratorNode> for BuiltinStage {
    fn from(node: GeneratorNode) -> Self {
        BuiltinStage::Generator(node)
    }
}

impl From<FilterNode> for BuiltinStage {
    fn from(node: FilterNode) -> Self {
        BuiltinStage::Filter(node)
    }
}

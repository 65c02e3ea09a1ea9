//! GeneratorNode — source of the candidate sequence.
//!
//! Hands `start, start + 1, ...` to its output edge one value at a time.
//! The default generator never closes its edge; a bounded one (`with_end`)
//! closes it after the last value so downstream filters drain and exit.

use crate::pipeline::channel::EdgeSender;
use crate::pipeline::node::{StageExit, StageKind};

/// First candidate handed to the filter chain.
pub const FIRST_CANDIDATE: u64 = 2;

/// Emits consecutive integers.
pub struct GeneratorNode {
    start: u64,
    /// Inclusive upper bound. `None` runs until the consumer hangs up.
    end: Option<u64>,
    output: EdgeSender,
}

impl GeneratorNode {
    pub fn new(output: EdgeSender) -> Self {
        Self {
            start: FIRST_CANDIDATE,
            end: None,
            output,
        }
    }

    pub fn with_start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: u64) -> Self {
        self.end = Some(end);
        self
    }

    pub fn name(&self) -> &str {
        "Generator"
    }

    pub fn kind(&self) -> StageKind {
        StageKind::Generator { start: self.start }
    }

    pub fn run(self) -> StageExit {
        let edge = self.output.id();
        let end = self.end.unwrap_or(u64::MAX);
        tracing::debug!("Generator started on {} ({}..={})", edge, self.start, end);

        for value in self.start..=end {
            tracing::trace!("Generator -> {}: {}", edge, value);
            if self.output.send(value).is_err() {
                tracing::debug!("Generator stopping at {}: consumer of {} hung up", value, edge);
                return StageExit::DownstreamClosed;
            }
        }

        tracing::debug!("Generator exhausted after {}", end);
        StageExit::Exhausted
    }
}

//! FilterNode — drops multiples of one prime.
//!
//! Receives candidates from its input edge and forwards every value not
//! divisible by `prime` to its output edge, preserving order. The divisor is
//! fixed at construction and is prime because the coordinator only ever
//! builds filters from values that already survived the chain.

use crate::pipeline::channel::{EdgeReceiver, EdgeSender};
use crate::pipeline::node::{StageExit, StageKind};

/// Removes multiples of `prime`.
pub struct FilterNode {
    prime: u64,
    input: EdgeReceiver,
    output: EdgeSender,
    /// Values passed downstream.
    forwarded: u64,
    /// Values dropped as multiples of `prime`.
    discarded: u64,
}

impl FilterNode {
    pub fn new(input: EdgeReceiver, output: EdgeSender, prime: u64) -> Self {
        debug_assert!(prime >= 2, "filter divisor must be at least 2");
        Self {
            prime,
            input,
            output,
            forwarded: 0,
            discarded: 0,
        }
    }

    pub fn name(&self) -> &str {
        "Filter"
    }

    pub fn kind(&self) -> StageKind {
        StageKind::Filter { prime: self.prime }
    }

    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Whether `value` survives this filter.
    #[inline]
    pub fn passes(&self, value: u64) -> bool {
        value % self.prime != 0
    }

    pub fn run(mut self) -> StageExit {
        tracing::debug!(
            "Filter({}) started: {} -> {}",
            self.prime,
            self.input.id(),
            self.output.id()
        );

        let exit = loop {
            let value = match self.input.recv() {
                Ok(value) => value,
                Err(_) => break StageExit::UpstreamClosed,
            };

            if !self.passes(value) {
                self.discarded += 1;
                continue;
            }

            if self.output.send(value).is_err() {
                break StageExit::DownstreamClosed;
            }
            self.forwarded += 1;
        };

        tracing::debug!(
            "Filter({}) exiting ({}): forwarded {}, discarded {}",
            self.prime,
            exit,
            self.forwarded,
            self.discarded
        );
        exit
    }
}

//! Pipeline coordinator — drains the tail and grows the filter chain.
//!
//! The coordinator owns the consumer end of the pipeline tail. Each
//! iteration:
//! 1. Receive the next survivor `p` from the tail. It is prime because it
//!    passed a filter for every smaller prime.
//! 2. Splice `Filter(p)` between the old tail and a fresh edge.
//! 3. Hand `p` to the sink.
//!
//! ```text
//! Generator ──► Filter(2) ──► Filter(3) ──► … ──► Filter(pk) ──► coordinator
//! ```
//!
//! The filter is spliced before `p` reaches the sink, so a failing sink never
//! leaves the pipeline with a consumed prime and no filter for it.

use crate::config::{ShutdownPolicy, SieveConfig};
use crate::error::{Result, SieveError};
use crate::pipeline::channel::{rendezvous, EdgeReceiver};
use crate::pipeline::id::{EdgeId, StageId};
use crate::pipeline::node::StageExit;
use crate::pipeline::nodes::{FilterNode, GeneratorNode};
use crate::pipeline::registry::StageRegistry;
use crate::pipeline::sink::PrimeSink;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

/// Coordinator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Generator not yet running.
    Initializing,
    /// `k` primes reported, `k` filters spliced.
    Draining(usize),
    /// All requested primes reported.
    Done,
}

/// Outcome of [`Sieve::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    pub policy: ShutdownPolicy,
    /// Stages detached while still running.
    pub abandoned: usize,
    /// Exit reason of every joined stage, newest first.
    pub exits: Vec<(StageId, StageExit)>,
}

/// The concurrent prime sieve.
pub struct Sieve {
    config: SieveConfig,
    state: CoordinatorState,
    tail: EdgeReceiver,
    next_edge: EdgeId,
    stages: StageRegistry,
    last_prime: Option<u64>,
}

impl Sieve {
    /// Start the generator and enter `Draining(0)`.
    ///
    /// The generator is spawned even for `count == 0`; it stays parked on its
    /// first send.
    pub fn new(config: SieveConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            "Starting sieve: {} primes, shutdown policy {}",
            config.count,
            config.shutdown
        );

        let edge = EdgeId::default();
        let (tx, rx) = rendezvous(edge);
        let mut sieve = Self {
            stages: StageRegistry::new(config.stage_stack_size),
            config,
            state: CoordinatorState::Initializing,
            tail: rx,
            next_edge: edge.next(),
            last_prime: None,
        };

        sieve.stages.spawn(GeneratorNode::new(tx))?;
        sieve.transition(CoordinatorState::Draining(0));
        Ok(sieve)
    }

    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Number of filter stages in the pipeline.
    pub fn depth(&self) -> usize {
        self.stages.len().saturating_sub(1)
    }

    /// Number of stages spawned, generator included.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Number of stages whose loop has not returned.
    pub fn live_stages(&self) -> usize {
        self.stages.live()
    }

    /// Live-stage gauge that outlives the sieve.
    pub fn live_gauge(&self) -> Arc<AtomicUsize> {
        self.stages.live_gauge()
    }

    pub fn stages(&self) -> &StageRegistry {
        &self.stages
    }

    /// Most recently reported prime.
    pub fn last_prime(&self) -> Option<u64> {
        self.last_prime
    }

    /// Run one iteration: receive the next prime and splice its filter.
    ///
    /// Returns `None` once `count` primes have been produced, moving the
    /// coordinator to `Done`.
    pub fn step(&mut self) -> Result<Option<u64>> {
        let reported = match self.state {
            CoordinatorState::Draining(k) if k < self.config.count => k,
            CoordinatorState::Draining(_) => {
                self.transition(CoordinatorState::Done);
                return Ok(None);
            }
            CoordinatorState::Initializing | CoordinatorState::Done => return Ok(None),
        };

        // The newest stage is the only producer of the tail.
        let producer = StageId(self.stages.len() as u32 - 1);
        let prime = self
            .tail
            .recv()
            .map_err(|_| SieveError::StageDisconnected { stage: producer })?;
        debug_assert!(self.last_prime.map_or(true, |last| prime > last));
        tracing::trace!("Tail {} yielded {}", self.tail.id(), prime);

        let (tx, rx) = rendezvous(self.next_edge);
        self.next_edge = self.next_edge.next();
        let upstream = std::mem::replace(&mut self.tail, rx);
        self.stages.spawn(FilterNode::new(upstream, tx, prime))?;

        self.last_prime = Some(prime);
        self.transition(CoordinatorState::Draining(reported + 1));
        Ok(Some(prime))
    }

    /// Step until `Done`, reporting every prime to `sink`.
    ///
    /// Returns the number of primes reported by this call.
    pub fn run<S: PrimeSink>(&mut self, mut sink: S) -> Result<usize> {
        let mut reported = 0;
        while let Some(prime) = self.step()? {
            sink.report(prime)?;
            reported += 1;
        }
        sink.finish()?;

        tracing::info!(
            "Sieve done: {} primes reported, {} stages spawned",
            reported,
            self.stages.len()
        );
        Ok(reported)
    }

    /// Iterator over the remaining primes.
    pub fn primes(&mut self) -> impl Iterator<Item = Result<u64>> + '_ {
        std::iter::from_fn(move || self.step().transpose())
    }

    /// Apply the configured shutdown policy.
    pub fn finish(self) -> Result<ShutdownReport> {
        match self.config.shutdown {
            ShutdownPolicy::Abandon => Ok(self.abandon()),
            ShutdownPolicy::Join => self.shutdown(),
        }
    }

    /// Detach every stage and leave the pipeline untouched.
    ///
    /// The tail receiver is leaked so no stage ever sees a hang-up: each one
    /// stays parked on its next send or receive until the process exits.
    pub fn abandon(self) -> ShutdownReport {
        let Sieve { tail, stages, .. } = self;
        std::mem::forget(tail);

        let abandoned = stages.detach_all();
        tracing::info!("Abandoned {} running stages", abandoned);
        ShutdownReport {
            policy: ShutdownPolicy::Abandon,
            abandoned,
            exits: Vec::new(),
        }
    }

    /// Close the tail and join every stage.
    ///
    /// Dropping the tail makes the newest stage's next forward fail; it exits
    /// and drops its own input, and the hang-up walks back to the generator.
    pub fn shutdown(self) -> Result<ShutdownReport> {
        let Sieve { tail, stages, .. } = self;
        drop(tail);

        let count = stages.len();
        let exits = stages
            .join_all()
            .map_err(|e| e.with_context(format!("Joining {} stages", count)))?;
        tracing::info!("Joined {} stages", exits.len());
        Ok(ShutdownReport {
            policy: ShutdownPolicy::Join,
            abandoned: 0,
            exits,
        })
    }

    fn transition(&mut self, next: CoordinatorState) {
        tracing::debug!("Coordinator {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Compute the first `count` primes with a full sieve and join its stages.
pub fn first_primes(count: usize) -> Result<Vec<u64>> {
    let mut sieve = Sieve::new(SieveConfig::with_count(count).shutdown(ShutdownPolicy::Join))?;
    let mut primes = Vec::with_capacity(count);
    sieve.run(&mut primes)?;
    sieve.finish()?;
    Ok(primes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::sink::LineSink;
    use std::sync::atomic::Ordering;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_first_ten_primes() {
        assert_eq!(
            first_primes(10).unwrap(),
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]
        );
    }

    #[test]
    fn test_state_machine() {
        let mut sieve = Sieve::new(SieveConfig::with_count(2)).unwrap();
        assert_eq!(sieve.state(), CoordinatorState::Draining(0));
        assert_eq!(sieve.depth(), 0);

        assert_eq!(sieve.step().unwrap(), Some(2));
        assert_eq!(sieve.state(), CoordinatorState::Draining(1));
        assert_eq!(sieve.step().unwrap(), Some(3));
        assert_eq!(sieve.state(), CoordinatorState::Draining(2));
        assert_eq!(sieve.depth(), 2);

        assert_eq!(sieve.step().unwrap(), None);
        assert_eq!(sieve.state(), CoordinatorState::Done);
        assert_eq!(sieve.step().unwrap(), None);
        assert_eq!(sieve.stage_count(), 3);
        assert_eq!(sieve.last_prime(), Some(3));
    }

    #[test]
    fn test_zero_count_reports_nothing() {
        let mut sieve = Sieve::new(SieveConfig::with_count(0)).unwrap();
        let mut out = LineSink::new(Vec::new());
        assert_eq!(sieve.run(&mut out).unwrap(), 0);
        assert!(out.into_inner().is_empty());
        assert_eq!(sieve.state(), CoordinatorState::Done);

        // Generator was started but never consumed.
        let report = sieve.finish().unwrap();
        assert_eq!(report.abandoned, 1);
    }

    #[test]
    fn test_zero_count_join_does_not_block() {
        let config = SieveConfig::with_count(0).shutdown(ShutdownPolicy::Join);
        let mut sieve = Sieve::new(config).unwrap();
        sieve.run(Vec::new()).unwrap();
        let report = sieve.finish().unwrap();
        assert_eq!(report.exits, vec![(StageId(0), StageExit::DownstreamClosed)]);
    }

    #[test]
    fn test_line_output() {
        let mut sieve = Sieve::new(SieveConfig::with_count(5)).unwrap();
        let mut out = LineSink::new(Vec::new());
        sieve.run(&mut out).unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "2\n3\n5\n7\n11\n");
    }

    #[test]
    fn test_primes_iterator() {
        let mut sieve = Sieve::new(SieveConfig::with_count(6)).unwrap();
        let primes: Vec<u64> = sieve.primes().collect::<Result<_>>().unwrap();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13]);
        assert_eq!(sieve.state(), CoordinatorState::Done);
    }

    #[test]
    fn test_abandon_leaves_every_stage_parked() {
        let mut sieve = Sieve::new(SieveConfig::with_count(8)).unwrap();
        sieve.run(Vec::new()).unwrap();
        let gauge = sieve.live_gauge();

        let report = sieve.finish().unwrap();
        assert_eq!(report.policy, ShutdownPolicy::Abandon);
        assert_eq!(report.abandoned, 9);

        // Nothing ever tells the stages to stop: generator plus 8 filters stay blocked.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(gauge.load(Ordering::Acquire), 9);
    }

    #[test]
    fn test_join_tears_down_whole_chain() {
        let config = SieveConfig::with_count(8).shutdown(ShutdownPolicy::Join);
        let mut sieve = Sieve::new(config).unwrap();
        sieve.run(Vec::new()).unwrap();
        let gauge = sieve.live_gauge();

        let report = sieve.finish().unwrap();
        assert_eq!(report.abandoned, 0);
        assert_eq!(report.exits.len(), 9);
        assert_eq!(report.exits.first().map(|e| e.0), Some(StageId(8)));
        assert!(report
            .exits
            .iter()
            .all(|(_, exit)| *exit == StageExit::DownstreamClosed));
        assert_eq!(gauge.load(Ordering::Acquire), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SieveConfig::with_count(3).stage_stack_size(16);
        assert!(matches!(Sieve::new(config), Err(SieveError::Config(_))));
    }
}

//! Ownership of running stages.
//!
//! Each spawned stage gets a dedicated OS thread and a `StageHandle` kept in
//! spawn order. The registry is the only place that can join or detach them.
//! A shared gauge counts stages whose loop has not returned yet.

use crate::error::{Result, SieveError};
use crate::pipeline::id::StageId;
use crate::pipeline::node::{BuiltinStage, StageExit, StageKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Decrements the live gauge when a stage thread's loop ends or its spawn fails.
struct LiveGuard(Arc<AtomicUsize>);

impl LiveGuard {
    fn enter(live: &Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::AcqRel);
        Self(live.clone())
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Owned handle to one running stage.
#[derive(Debug)]
pub struct StageHandle {
    id: StageId,
    kind: StageKind,
    handle: JoinHandle<StageExit>,
}

impl StageHandle {
    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the stage loop to return.
    pub fn join(self) -> Result<StageExit> {
        self.handle
            .join()
            .map_err(|_| SieveError::StagePanicked { stage: self.id })
    }
}

/// Spawn-ordered collection of stage handles.
#[derive(Debug)]
pub struct StageRegistry {
    stages: Vec<StageHandle>,
    live: Arc<AtomicUsize>,
    stack_size: Option<usize>,
}

impl StageRegistry {
    pub fn new(stack_size: Option<usize>) -> Self {
        Self {
            stages: Vec::new(),
            live: Arc::new(AtomicUsize::new(0)),
            stack_size,
        }
    }

    /// Start `stage` on its own thread. The returned id is its spawn position.
    pub fn spawn(&mut self, stage: impl Into<BuiltinStage>) -> Result<StageId> {
        let stage = stage.into();
        let id = StageId(self.stages.len() as u32);
        let kind = stage.kind();

        let mut builder = thread::Builder::new().name(kind.thread_name());
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }

        let guard = LiveGuard::enter(&self.live);
        let handle = builder
            .spawn(move || {
                let _guard = guard;
                stage.run()
            })
            .map_err(|source| SieveError::Spawn { stage: id, source })?;

        tracing::debug!("Spawned {} as {}", kind, id);
        self.stages.push(StageHandle { id, kind, handle });
        Ok(id)
    }

    /// Number of stages ever spawned into this registry.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Number of stages whose loop is still running.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Shared live-stage gauge, still readable after the registry is consumed.
    pub fn live_gauge(&self) -> Arc<AtomicUsize> {
        self.live.clone()
    }

    pub fn get(&self, id: StageId) -> Option<&StageHandle> {
        self.stages.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageHandle> {
        self.stages.iter()
    }

    /// Join every stage, newest first.
    ///
    /// All handles are joined even if one of them panicked; the first panic
    /// is returned afterwards.
    pub fn join_all(self) -> Result<Vec<(StageId, StageExit)>> {
        let mut exits = Vec::with_capacity(self.stages.len());
        let mut first_err = None;

        for stage in self.stages.into_iter().rev() {
            let id = stage.id();
            match stage.join() {
                Ok(exit) => {
                    tracing::debug!("Joined {}: {}", id, exit);
                    exits.push((id, exit));
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    first_err.get_or_insert(e);
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(exits),
        }
    }

    /// Drop every join handle without waiting. Returns how many were detached.
    pub fn detach_all(self) -> usize {
        let count = self.stages.len();
        drop(self.stages);
        count
    }
}

//! Concurrent filter pipeline.
//!
//! Candidates flow from a generator through a chain of filter stages, one per
//! prime found so far. Every stage runs on its own thread and every edge is a
//! zero-capacity crossbeam channel, so each value is handed over exactly once
//! and in order.
//!
//! # Architecture
//!
//! ```text
//! [Generator] ──► [Filter(2)] ──► [Filter(3)] ──► [Filter(5)] ──► Sieve (tail)
//! ```
//!
//! # Design
//!
//! - **Rendezvous edges**: no buffering anywhere; a send parks until taken.
//! - **One writer, one reader**: edge ends are not `Clone`.
//! - **Owned stages**: every thread handle lives in a `StageRegistry`, which
//!   either detaches (default) or joins them when the sieve finishes.

pub mod channel;
pub mod coordinator;
pub mod id;
pub mod node;
pub mod nodes;
pub mod registry;
pub mod sink;

pub use channel::{rendezvous, EdgeReceiver, EdgeSender, EDGE_CAPACITY};
pub use coordinator::{first_primes, CoordinatorState, ShutdownReport, Sieve};
pub use id::{EdgeId, StageId};
pub use node::{BuiltinStage, StageExit, StageKind};
pub use nodes::{FilterNode, GeneratorNode};
pub use registry::{StageHandle, StageRegistry};
pub use sink::{LineSink, PrimeSink};

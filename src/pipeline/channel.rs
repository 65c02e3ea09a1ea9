//! Rendezvous edges between pipeline stages.
//!
//! Every edge is a `crossbeam_channel::bounded(0)`: a send parks until the
//! matching receive takes the value and vice versa. The wrappers are
//! deliberately not `Clone`, so an edge has exactly one writer and one reader
//! for its whole life.

use crate::pipeline::id::EdgeId;
use crossbeam_channel::{bounded, Receiver, RecvError, SendError, Sender};

/// Capacity of every pipeline edge. Zero turns each send into a handoff.
pub const EDGE_CAPACITY: usize = 0;

/// Create a new edge pair: `(producer_end, consumer_end)`.
pub fn rendezvous(id: EdgeId) -> (EdgeSender, EdgeReceiver) {
    let (tx, rx) = bounded(EDGE_CAPACITY);
    (EdgeSender { id, tx }, EdgeReceiver { id, rx })
}

/// Producer end of an edge.
#[derive(Debug)]
pub struct EdgeSender {
    id: EdgeId,
    tx: Sender<u64>,
}

impl EdgeSender {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Hand `value` to the consumer, blocking until it is taken.
    ///
    /// Fails only when the consumer end has been dropped; the value is
    /// returned inside the error.
    pub fn send(&self, value: u64) -> Result<(), SendError<u64>> {
        self.tx.send(value)
    }
}

/// Consumer end of an edge.
#[derive(Debug)]
pub struct EdgeReceiver {
    id: EdgeId,
    rx: Receiver<u64>,
}

impl EdgeReceiver {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Block until the producer hands over a value.
    ///
    /// Returns `Err` once the producer end is dropped and nothing is left.
    pub fn recv(&self) -> Result<u64, RecvError> {
        self.rx.recv()
    }

    /// Blocking iterator that ends when the producer hangs up.
    pub fn iter(&self) -> crossbeam_channel::Iter<'_, u64> {
        self.rx.iter()
    }
}

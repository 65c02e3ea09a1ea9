//! Identity types for the sieve pipeline.
//!
//! Both IDs are newtypes over `u32` handed out in creation order. `StageId`
//! doubles as an index into `StageRegistry`, `EdgeId` only labels channels
//! in logs.

use std::fmt;

/// Position of a stage in spawn order. The generator is always `StageId(0)`,
/// the filter for the k-th prime is `StageId(k)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct StageId(pub u32);

impl StageId {
    pub const GENERATOR: StageId = StageId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_generator(self) -> bool {
        self == Self::GENERATOR
    }

    #[inline]
    pub fn next(self) -> StageId {
        StageId(self.0 + 1)
    }
}

impl fmt::Debug for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StageId({})", self.0)
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Channel number in creation order. `EdgeId(0)` is the generator's output.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeId(pub u32);

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn next(self) -> EdgeId {
        EdgeId(self.0 + 1)
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

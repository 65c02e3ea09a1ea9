//! Built-in pipeline stage implementations.

pub mod filter;
pub mod generator;

pub use filter::FilterNode;
pub use generator::{GeneratorNode, FIRST_CANDIDATE};

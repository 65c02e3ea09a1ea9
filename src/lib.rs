//! # sieve-rs: Concurrent Prime Sieve
//!
//! Generates primes with a growing pipeline of concurrent filter stages. A
//! generator emits 2, 3, 4, ...; every time a value survives to the end of
//! the chain it is prime, and a new stage that drops its multiples is spliced
//! onto the end.
//!
//! ## Architecture
//!
//! - **Generator**: emits the candidate integers on its own thread
//! - **Filters**: one thread per prime, forwarding non-multiples
//! - **Coordinator**: drains the pipeline tail and grows the chain
//! - **Communication**: zero-capacity crossbeam channels between stages
//!
//! ## Example
//!
//! ```ignore
//! use sieve_rs::{config::SieveConfig, pipeline::{LineSink, Sieve}};
//!
//! fn main() -> sieve_rs::Result<()> {
//!     let mut sieve = Sieve::new(SieveConfig::with_count(10))?;
//!     sieve.run(LineSink::new(std::io::stdout().lock()))?;
//!     sieve.finish()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use config::{ShutdownPolicy, SieveConfig};
pub use error::{Result, SieveError};
pub use pipeline::{first_primes, LineSink, PrimeSink, Sieve};

//! Destinations for reported primes.
//!
//! The coordinator hands every prime it drains from the pipeline tail to a
//! `PrimeSink`, in the order it was received.

use crate::error::{Result, SieveError};
use std::io::Write;

/// Receives primes from the coordinator.
pub trait PrimeSink {
    /// Called once per prime, in increasing order.
    fn report(&mut self, prime: u64) -> Result<()>;

    /// Called after the last prime.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl PrimeSink for Vec<u64> {
    fn report(&mut self, prime: u64) -> Result<()> {
        self.push(prime);
        Ok(())
    }
}

impl<S: PrimeSink + ?Sized> PrimeSink for &mut S {
    fn report(&mut self, prime: u64) -> Result<()> {
        (**self).report(prime)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Writes each prime as a decimal line.
pub struct LineSink<W: Write> {
    out: W,
    lines: usize,
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Number of lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PrimeSink for LineSink<W> {
    fn report(&mut self, prime: u64) -> Result<()> {
        writeln!(self.out, "{}", prime).map_err(SieveError::Output)?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().map_err(SieveError::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_line_sink_format() {
        let mut sink = LineSink::new(Vec::new());
        for p in [2, 3, 5, 7] {
            sink.report(p).unwrap();
        }
        sink.finish().unwrap();

        assert_eq!(sink.lines(), 4);
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "2\n3\n5\n7\n");
    }

    #[test]
    fn test_line_sink_write_error() {
        let mut sink = LineSink::new(BrokenPipe);
        let err = sink.report(2).unwrap_err();
        assert!(matches!(err, SieveError::Output(_)));
        assert_eq!(sink.lines(), 0);
    }

    #[test]
    fn test_vec_sink_through_reference() {
        fn feed<S: PrimeSink>(mut sink: S) {
            sink.report(11).unwrap();
            sink.report(13).unwrap();
            sink.finish().unwrap();
        }

        let mut primes = Vec::new();
        feed(&mut primes);
        assert_eq!(primes, vec![11, 13]);
    }
}

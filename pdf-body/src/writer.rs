use std::io::{self, Write};

pub use document::DocumentWriter;

use crate::BodyError;

mod document;

/// Serialization of `T` into PDF syntax.
pub trait Encoder<T: ?Sized> {
    fn write_to(obj: &T, writer: &mut dyn Write) -> Result<(), BodyError>;
}

/// Passes all bytes through to the inner writer and counts them.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    /// Bytes written so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_passed_bytes() {
        let mut out = Vec::new();
        let mut counter = CountingWriter::new(&mut out);
        counter.write_all(b"hello ").unwrap();
        counter.write_all(b"world").unwrap();
        assert_eq!(counter.count(), 11);
        assert_eq!(out, b"hello world");
    }
}

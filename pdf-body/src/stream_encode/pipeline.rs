//! The sink chain a streamed body is pushed through.
//!
//! ```text
//! payload -> [BufWriter -> ZlibEncoder] -> [encrypting sink] -> counter -> output
//! ```
//!
//! Layers in brackets are optional. Closing runs from the outside in, so the
//! deflater's last block passes through the cipher before it is finished.

use std::{
    fmt,
    io::{self, BufWriter, Write},
};

use flate2::{write::ZlibEncoder, Compression};

use crate::{crypto::EncryptingSink, BodyError};

/// An error raised by the encrypting sink, kept recognizable while it travels
/// up through the deflater.
#[derive(Debug)]
struct CipherFailure(io::Error);

impl fmt::Display for CipherFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encryption failed: {}", self.0)
    }
}

impl std::error::Error for CipherFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

fn cipher_failure(err: io::Error) -> io::Error {
    io::Error::new(err.kind(), CipherFailure(err))
}

/// Turn an error from writing into the pipeline into a [`BodyError`].
pub(crate) fn sink_error(err: io::Error) -> BodyError {
    if !err.get_ref().map_or(false, |inner| inner.is::<CipherFailure>()) {
        return BodyError::Io(err);
    }
    let kind = err.kind();
    match err.into_inner().map(|inner| inner.downcast::<CipherFailure>()) {
        Some(Ok(failure)) => BodyError::Encryption(failure.0),
        _ => BodyError::Encryption(io::Error::from(kind)),
    }
}

pub(crate) enum Stage<'a> {
    Plain(&'a mut dyn Write),
    Encrypting(Box<dyn EncryptingSink + 'a>),
}

impl Stage<'_> {
    fn finish(self) -> Result<(), BodyError> {
        match self {
            Stage::Plain(w) => Ok(w.flush()?),
            Stage::Encrypting(sink) => sink.finish().map_err(BodyError::Encryption),
        }
    }
}

impl Write for Stage<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Stage::Plain(w) => w.write(buf),
            Stage::Encrypting(w) => w.write(buf).map_err(cipher_failure),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Stage::Plain(w) => w.flush(),
            Stage::Encrypting(w) => w.flush().map_err(cipher_failure),
        }
    }
}

pub(crate) enum Pipeline<'a> {
    Direct(Stage<'a>),
    Deflating(BufWriter<ZlibEncoder<Stage<'a>>>),
}

impl<'a> Pipeline<'a> {
    pub(crate) fn new(stage: Stage<'a>, compression: Option<Compression>, buffer_size: usize) -> Self {
        match compression {
            Some(level) => Pipeline::Deflating(BufWriter::with_capacity(buffer_size, ZlibEncoder::new(stage, level))),
            None => Pipeline::Direct(stage),
        }
    }

    /// Flush every layer and finish deflater and cipher, in that order.
    pub(crate) fn close(self) -> Result<(), BodyError> {
        let stage = match self {
            Pipeline::Direct(stage) => stage,
            Pipeline::Deflating(buffered) => buffered
                .into_inner()
                .map_err(|e| sink_error(e.into_error()))?
                .finish()
                .map_err(sink_error)?,
        };
        stage.finish()
    }
}

impl Write for Pipeline<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Pipeline::Direct(w) => w.write(buf),
            Pipeline::Deflating(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Pipeline::Direct(w) => w.flush(),
            Pipeline::Deflating(w) => w.flush(),
        }
    }
}

//! Writing stream objects.
//!
//! A stream body is compressed first and encrypted second, never the other way
//! round. The dictionary written in front of the body is derived from the
//! stream's dictionary: the filter chain and `Length` describe the bytes that
//! actually follow, while the caller's dictionary stays untouched.

use std::{
    borrow::Cow,
    io::{self, Read, Write},
};

use flate2::{write::ZlibEncoder, Compression};

use crate::{
    crypto::EncryptionContext,
    pdf::{document::K_LENGTH, Dictionary, Name, Object},
    simple_encode::SimpleEncoder,
    writer::{CountingWriter, Encoder},
    BodyError,
};

use self::{
    filter::FilterChain,
    pipeline::{sink_error, Pipeline, Stage},
};

mod filter;
mod pipeline;

const START_STREAM: &[u8] = b"stream\n";
const END_STREAM: &[u8] = b"\nendstream";

/// Size of the deflate input buffer and of the payload read buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

pub enum PayloadSource<'a> {
    Buffer(&'a [u8]),
    /// Read once until it reports end of data.
    Reader(&'a mut dyn Read),
}

pub struct StreamPayload<'a> {
    pub source: PayloadSource<'a>,
    /// `Some` if the body is to be flate compressed.
    pub compression: Option<Compression>,
}

impl<'a> StreamPayload<'a> {
    pub fn buffer(data: &'a [u8]) -> Self {
        Self {
            source: PayloadSource::Buffer(data),
            compression: None,
        }
    }

    pub fn reader(reader: &'a mut dyn Read) -> Self {
        Self {
            source: PayloadSource::Reader(reader),
            compression: None,
        }
    }

    pub fn with_compression(mut self, compression: Option<Compression>) -> Self {
        self.compression = compression;
        self
    }

    pub fn compressed(self, level: Compression) -> Self {
        self.with_compression(Some(level))
    }
}

/// What ended up in the header's `Length` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthEntry {
    /// The header carries this exact body size.
    Written(u64),
    /// `Length` was absent or not a plain number and was written as found.
    /// The caller has to reconcile it with [`EncodedStream::written`].
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedStream {
    /// Body bytes between the `stream` and `endstream` markers.
    pub written: u64,
    pub length: LengthEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EncodeState {
    Idle,
    FilterDecided,
    HeaderWritten,
    BodyStreaming,
    Closed,
}

impl EncodeState {
    fn advance(&mut self, next: EncodeState) {
        debug_assert_eq!(*self as u8 + 1, next as u8, "stream encoding skipped a state");
        log::trace!("stream encoding {:?} -> {:?}", self, next);
        *self = next;
    }
}

/// The body after the transforms of an in-memory payload were applied.
enum Body<'a> {
    Ready(Cow<'a, [u8]>),
    Streamed(&'a mut dyn Read, Option<Compression>),
}

pub struct StreamEncoder<'c> {
    crypto: Option<&'c dyn EncryptionContext>,
    buffer_size: usize,
}

impl<'c> StreamEncoder<'c> {
    /// Inactive encryption contexts are treated as no encryption.
    pub fn new(crypto: Option<&'c dyn EncryptionContext>) -> Self {
        Self {
            crypto: crypto.filter(|c| c.is_active()),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Write header, markers and body of a stream to `sink`.
    pub fn encode(
        &self,
        dictionary: &Dictionary,
        payload: StreamPayload<'_>,
        sink: &mut dyn Write,
    ) -> Result<EncodedStream, BodyError> {
        let mut state = EncodeState::Idle;

        let mut chain = FilterChain::from_dictionary(dictionary)?;
        let crypto = if chain.is_pre_encrypted() {
            log::debug!("stream carries its own crypt filter, not encrypting");
            None
        } else {
            self.crypto
        };
        let compression = match payload.compression {
            Some(_) if chain.contains_flate() => {
                log::debug!("stream is already deflated, not compressing again");
                None
            }
            Some(level) => {
                chain.push_flate();
                Some(level)
            }
            None => None,
        };
        if crypto.map_or(false, |c| c.is_embedded_files_only()) {
            chain.prepend_crypt_filter();
        }

        let mut header = dictionary.clone();
        chain.apply(&mut header);
        state.advance(EncodeState::FilterDecided);

        let (body, length) = match payload.source {
            PayloadSource::Buffer(data) => {
                if dictionary.get(K_LENGTH).map_or(false, |l| l.integer().is_none()) {
                    log::warn!("stream Length is not a number, replacing it with the buffer size");
                }
                let body = self.prepare_buffer(data, compression, crypto)?;
                let size = body.len() as u64;
                header.insert(Name::from(K_LENGTH), length_object(size)?);
                (Body::Ready(body), LengthEntry::Written(size))
            }
            PayloadSource::Reader(reader) => {
                let plain = dictionary
                    .get(K_LENGTH)
                    .and_then(Object::integer)
                    .and_then(|n| u64::try_from(n).ok());
                let length = match plain {
                    Some(plain) => {
                        let size = crypto.map_or(plain, |c| c.calculate_stream_size(plain));
                        header.insert(Name::from(K_LENGTH), length_object(size)?);
                        LengthEntry::Written(size)
                    }
                    None => {
                        log::warn!("stream Length is absent or not a number, leaving it to the caller");
                        LengthEntry::Deferred
                    }
                };
                (Body::Streamed(reader, compression), length)
            }
        };

        SimpleEncoder::write_to(&header, sink)?;
        sink.write_all(b" ")?;
        sink.write_all(START_STREAM)?;
        state.advance(EncodeState::HeaderWritten);

        state.advance(EncodeState::BodyStreaming);
        let written = match body {
            Body::Ready(bytes) => {
                sink.write_all(&bytes)?;
                bytes.len() as u64
            }
            Body::Streamed(reader, compression) => self.drain(reader, compression, crypto, sink)?,
        };
        sink.write_all(END_STREAM)?;
        state.advance(EncodeState::Closed);

        if let LengthEntry::Written(size) = length {
            if size != written {
                log::warn!("stream Length {} differs from the {} bytes written", size, written);
            }
        }
        log::debug!("wrote stream body of {} bytes", written);

        Ok(EncodedStream { written, length })
    }

    /// Compress and encrypt an in-memory payload up front, so its final size
    /// is known before the header is written.
    fn prepare_buffer<'a>(
        &self,
        data: &'a [u8],
        compression: Option<Compression>,
        crypto: Option<&dyn EncryptionContext>,
    ) -> Result<Cow<'a, [u8]>, BodyError> {
        let mut body = Cow::Borrowed(data);
        if let Some(level) = compression {
            let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), level);
            encoder.write_all(data)?;
            body = Cow::Owned(encoder.finish()?);
        }
        if let Some(crypto) = crypto {
            body = Cow::Owned(crypto.encrypt_buffer(&body).map_err(BodyError::Encryption)?);
        }
        Ok(body)
    }

    fn drain(
        &self,
        reader: &mut dyn Read,
        compression: Option<Compression>,
        crypto: Option<&dyn EncryptionContext>,
        sink: &mut dyn Write,
    ) -> Result<u64, BodyError> {
        let mut counter = CountingWriter::new(sink);
        {
            let stage = match crypto {
                Some(crypto) => Stage::Encrypting(crypto.encrypting_sink(&mut counter)),
                None => Stage::Plain(&mut counter),
            };
            let mut pipeline = Pipeline::new(stage, compression, self.buffer_size);

            let mut buf = vec![0u8; self.buffer_size];
            let mut raw_length = 0u64;
            loop {
                let n = match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(BodyError::PayloadRead(e)),
                };
                pipeline.write_all(&buf[..n]).map_err(sink_error)?;
                raw_length += n as u64;
            }
            pipeline.close()?;
            log::trace!("drained {} payload bytes", raw_length);
        }
        Ok(counter.count())
    }
}

fn length_object(size: u64) -> Result<Object, BodyError> {
    i64::try_from(size)
        .map(Object::Integer)
        .map_err(|_| BodyError::IntegerOverflow(size))
}

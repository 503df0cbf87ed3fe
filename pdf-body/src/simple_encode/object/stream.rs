use std::io::Write;

use crate::{pdf::Stream, simple_encode::SimpleEncoder, stream_encode::StreamEncoder, writer::Encoder, BodyError};

/// Streams written without a document context are never encrypted.
impl Encoder<Stream> for SimpleEncoder {
    fn write_to(s: &Stream, writer: &mut dyn Write) -> Result<(), BodyError> {
        StreamEncoder::new(None).encode(&s.dictionary, s.payload(), writer)?;
        Ok(())
    }
}

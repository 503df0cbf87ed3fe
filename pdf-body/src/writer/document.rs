//! Writing a complete document body.

use std::io::Write;

use crate::{
    crypto::EncryptionContext,
    pdf::{
        document::{dict_types::XREF, K_TYPE, K_W},
        xref::{self, UsedObject, XREF_WIDTHS},
        Dictionary, Name, Object, PdfSection, Reference, Trailer,
    },
    simple_encode::SimpleEncoder,
    stream_encode::{EncodedStream, StreamEncoder, StreamPayload},
    writer::{CountingWriter, Encoder},
    BodyError,
};

const START_OBJECT: &[u8] = b"obj\n";
const END_OBJECT: &[u8] = b"\nendobj\n";

/// Binary comment after the header, so transfer tools treat the file as
/// binary.
const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3\n";

/// Writes header, indirect objects, cross-reference stream and trailer of one
/// document, keeping track of the byte offset of every object.
pub struct DocumentWriter<W: Write> {
    out: CountingWriter<W>,
    crypto: Option<Box<dyn EncryptionContext>>,
    used: Vec<UsedObject>,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(sink: W, version: (u8, u8)) -> Result<Self, BodyError> {
        let mut out = CountingWriter::new(sink);
        out.write_all(format!("%PDF-{}.{}\n", version.0, version.1).as_bytes())?;
        out.write_all(BINARY_MARKER)?;
        Ok(Self {
            out,
            crypto: None,
            used: Vec::new(),
        })
    }

    /// Encrypt every stream body written from now on.
    pub fn with_encryption(mut self, crypto: Box<dyn EncryptionContext>) -> Self {
        self.crypto = Some(crypto);
        self
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.out.count()
    }

    pub fn append_body(&mut self, reference: &Reference, object: &Object) -> Result<(), BodyError> {
        self.write_object(reference, object).map_err(|e| e.in_object(reference))
    }

    /// Write a stream object whose payload is read from `payload`. If the
    /// dictionary's `Length` is a reference, the returned
    /// [`EncodedStream::written`] is the value to store under it.
    pub fn append_stream(
        &mut self,
        reference: &Reference,
        dictionary: &Dictionary,
        payload: StreamPayload<'_>,
    ) -> Result<EncodedStream, BodyError> {
        self.write_stream(reference, dictionary, payload)
            .map_err(|e| e.in_object(reference))
    }

    /// Write all objects of `section` in object number order.
    pub fn write_section(&mut self, section: &PdfSection) -> Result<(), BodyError> {
        log::trace!("write PDF section with {} objects", section.len());
        for (reference, object) in section.objects() {
            self.append_body(&reference, object)?;
        }
        Ok(())
    }

    /// Write the cross-reference stream and the trailer, returning the sink.
    pub fn finish(mut self, trailer: Trailer) -> Result<W, BodyError> {
        let highest = self.used.iter().map(|u| u.number).max().unwrap_or(0);
        let xref_number = highest
            .checked_add(1)
            .ok_or(BodyError::Allocation("no object number left for the xref stream"))?;
        let xref_ref = Reference::new(xref_number, 0);
        let start_xref = self.out.count();

        self.used.push(UsedObject {
            number: xref_number,
            byte_offset: start_xref,
            generation: 0,
        });
        let size = xref_number + 1;
        let entries = xref::complete(&self.used, size);

        let mut data = Vec::with_capacity(entries.len() * XREF_WIDTHS.iter().sum::<usize>());
        for entry in &entries {
            entry.encode(&mut data);
        }

        let mut dict = trailer.to_dictionary(i64::from(size));
        dict.insert(Name::from(K_TYPE), Object::from(Name::from(XREF)));
        dict.insert(
            Name::from(K_W),
            Object::from(XREF_WIDTHS.iter().map(|&w| Object::Integer(w as i64)).collect::<Vec<_>>()),
        );

        log::debug!("write xref stream {} with {} entries at {}", xref_ref, entries.len(), start_xref);
        self.write_header(&xref_ref)?;
        // the xref stream is never encrypted
        StreamEncoder::new(None)
            .encode(&dict, StreamPayload::buffer(&data), &mut self.out)
            .map_err(|e| e.in_object(&xref_ref))?;
        self.out.write_all(END_OBJECT)?;

        self.out.write_all(b"startxref\n")?;
        self.out.write_all(start_xref.to_string().as_bytes())?;
        self.out.write_all(b"\n%%EOF\n")?;
        self.out.flush()?;
        Ok(self.out.into_inner())
    }

    fn write_object(&mut self, reference: &Reference, object: &Object) -> Result<(), BodyError> {
        self.begin_object(reference)?;
        match object {
            Object::Stream(stream) => {
                StreamEncoder::new(self.crypto.as_deref()).encode(
                    &stream.dictionary,
                    stream.payload(),
                    &mut self.out,
                )?;
            }
            other => SimpleEncoder::write_to(other, &mut self.out)?,
        }
        self.out.write_all(END_OBJECT)?;
        Ok(())
    }

    fn write_stream(
        &mut self,
        reference: &Reference,
        dictionary: &Dictionary,
        payload: StreamPayload<'_>,
    ) -> Result<EncodedStream, BodyError> {
        self.begin_object(reference)?;
        let encoded = StreamEncoder::new(self.crypto.as_deref()).encode(dictionary, payload, &mut self.out)?;
        self.out.write_all(END_OBJECT)?;
        Ok(encoded)
    }

    /// Record the offset of `reference` and write its `obj` line.
    fn begin_object(&mut self, reference: &Reference) -> Result<(), BodyError> {
        if reference.index == 0 {
            return Err(BodyError::Allocation("object number 0 is reserved"));
        }
        if self.used.iter().any(|u| u.number == reference.index) {
            log::warn!("object {} is written twice, the later copy wins", reference);
        }
        self.used.push(UsedObject {
            number: reference.index,
            byte_offset: self.out.count(),
            generation: reference.generation,
        });
        self.write_header(reference)
    }

    fn write_header(&mut self, reference: &Reference) -> Result<(), BodyError> {
        log::trace!("write object {} at {}", reference, self.out.count());
        self.out.write_all(reference.index.to_string().as_bytes())?;
        self.out.write_all(b" ")?;
        self.out.write_all(reference.generation.to_string().as_bytes())?;
        self.out.write_all(b" ")?;
        self.out.write_all(START_OBJECT)?;
        Ok(())
    }
}

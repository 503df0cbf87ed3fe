use flate2::Compression;

use crate::{
    pdf::{
        document::{filters::FLATE_DECODE, K_FILTER, K_LENGTH},
        Bytes, Dictionary, Object,
    },
    stream_encode::StreamPayload,
    BodyError, Name,
};

/// A stream object whose data is held in memory.
///
/// Compression is applied when the stream is encoded, `compression` only
/// records the requested level.
#[derive(Clone, Debug, PartialEq)]
pub struct Stream {
    pub dictionary: Dictionary,
    pub data: Bytes,
    pub compression: Option<Compression>,
}

impl Stream {
    pub fn new(mut dictionary: Dictionary, data: Bytes) -> Self {
        let length = i64::try_from(data.len()).unwrap_or(i64::MAX);
        dictionary.insert(Name::from(K_LENGTH), Object::Integer(length));
        Self {
            dictionary,
            data,
            compression: None,
        }
    }

    /// Request flate compression with the given level.
    ///
    /// Streams whose filter chain already contains `FlateDecode` carry
    /// compressed data and are left alone.
    pub fn flate_compress(&mut self, level: Compression) -> Result<(), BodyError> {
        if self.compression.is_some() {
            return Ok(());
        }

        match self.dictionary.get(K_FILTER) {
            None => {}
            Some(Object::Name(n)) if &n[..] == FLATE_DECODE => return Ok(()),
            Some(Object::Name(_)) => {}
            Some(Object::Array(a)) => {
                if a.iter().any(|f| f.name().map_or(false, |n| &n[..] == FLATE_DECODE)) {
                    return Ok(());
                }
            }
            Some(_) => return Err(BodyError::InvalidFilter),
        }

        self.compression = Some(level);
        Ok(())
    }

    pub fn is_compressed(&self) -> bool {
        self.compression.is_some()
    }

    pub fn payload(&self) -> StreamPayload<'_> {
        StreamPayload::buffer(&self.data[..]).with_compression(self.compression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stream_records_length() {
        let stream = Stream::new(Dictionary::new(), b"hello".to_vec().into());
        assert_eq!(stream.dictionary.get(K_LENGTH), Some(&Object::Integer(5)));
        assert!(!stream.is_compressed());
    }

    #[test]
    fn flate_compress_is_idempotent() {
        let mut stream = Stream::new(Dictionary::new(), b"hello".to_vec().into());
        stream.flate_compress(Compression::best()).unwrap();
        stream.flate_compress(Compression::fast()).unwrap();
        assert_eq!(stream.compression, Some(Compression::best()));
    }

    #[test]
    fn already_deflated_data_is_not_compressed_again() {
        let mut dict = Dictionary::new();
        dict.insert(
            Name::from(K_FILTER),
            Object::from(vec![Object::from(Name::from(FLATE_DECODE))]),
        );
        let mut stream = Stream::new(dict, b"x\x9c".to_vec().into());
        stream.flate_compress(Compression::default()).unwrap();
        assert!(!stream.is_compressed());
    }

    #[test]
    fn invalid_filter_is_rejected() {
        let mut dict = Dictionary::new();
        dict.insert(Name::from(K_FILTER), Object::Integer(3));
        let mut stream = Stream::new(dict, Bytes::default());
        assert!(matches!(
            stream.flate_compress(Compression::default()),
            Err(BodyError::InvalidFilter)
        ));
    }
}

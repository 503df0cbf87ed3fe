//! The document encryption port.
//!
//! Key derivation and the ciphers live outside of this crate. Stream encoding
//! only needs to know whether to encrypt, how large an encrypted body will be,
//! and a way to push bytes through the cipher.

use std::io::{self, Write};

/// A [`Write`] adapter that encrypts everything written to it.
pub trait EncryptingSink: Write {
    /// Flush the cipher state (padding, final block) into the inner sink.
    fn finish(self: Box<Self>) -> io::Result<()>;
}

pub trait EncryptionContext {
    fn is_active(&self) -> bool {
        true
    }

    /// Only embedded file streams are encrypted, through the `StdCF` crypt
    /// filter.
    fn is_embedded_files_only(&self) -> bool {
        false
    }

    /// Size of the encrypted body for `plain_len` bytes of plaintext.
    fn calculate_stream_size(&self, plain_len: u64) -> u64;

    fn encrypting_sink<'a>(&self, sink: &'a mut dyn Write) -> Box<dyn EncryptingSink + 'a>;

    fn encrypt_buffer(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let capacity = self.calculate_stream_size(data.len() as u64);
        let mut out = Vec::with_capacity(usize::try_from(capacity).unwrap_or(data.len()));
        let mut sink = self.encrypting_sink(&mut out);
        sink.write_all(data)?;
        sink.finish()?;
        Ok(out)
    }
}

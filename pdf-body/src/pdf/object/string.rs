use std::ops::Deref;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CbString(Vec<u8>);

impl CbString {
    /// Encode `text` as a PDF text string. Plain ASCII is stored as is, anything
    /// else as UTF-16BE with a byte order mark.
    pub fn from_text(text: &str) -> Self {
        if text.is_ascii() {
            return CbString(text.as_bytes().to_vec());
        }

        let mut bytes = Vec::with_capacity(2 + text.len() * 2);
        bytes.extend_from_slice(&[0xfe, 0xff]);
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        CbString(bytes)
    }

    /// Decode a PDF text string. Bytes without a UTF-16BE byte order mark are
    /// read as Latin-1.
    pub fn to_text(&self) -> String {
        match self.0.strip_prefix(&[0xfe, 0xff]) {
            Some(utf16) => {
                let units: Vec<u16> = utf16
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            None => self.0.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

impl From<Vec<u8>> for CbString {
    fn from(v: Vec<u8>) -> Self {
        CbString(v)
    }
}

impl Deref for CbString {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Debug for CbString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CbString")
            .field(&String::from_utf8_lossy(&self.0[..]))
            .finish()
    }
}

impl std::fmt::Display for CbString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &String::from_utf8_lossy(&self.0[..]))
    }
}

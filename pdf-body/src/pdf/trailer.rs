use super::{Bytes, Dictionary, Object, Reference};

pub const K_SIZE: &[u8] = b"Size";
pub const K_ENCRYPT: &[u8] = b"Encrypt";
pub const K_ROOT: &[u8] = b"Root";
pub const K_INFO: &[u8] = b"Info";
pub const K_ID: &[u8] = b"ID";

/// Document level entries that end up in the cross-reference stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Trailer {
    /// Reference to the document catalog.
    pub root: Reference,

    /// Information for this document.
    pub info: Option<Reference>,

    /// Dictionary containing information for decryption.
    pub encrypt: Option<Dictionary>,

    /// File identifier used for encryption.
    pub id: Option<[Bytes; 2]>,
}

impl Trailer {
    pub fn new(root: Reference) -> Self {
        Self {
            root,
            info: None,
            encrypt: None,
            id: None,
        }
    }

    /// Trailer entries for a document whose highest object number is
    /// `size - 1`.
    pub fn to_dictionary(&self, size: i64) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert(K_SIZE.into(), Object::Integer(size));
        dict.insert(K_ROOT.into(), Object::Reference(self.root.clone()));

        if let Some(enc) = &self.encrypt {
            dict.insert(K_ENCRYPT.into(), Object::Dictionary(enc.clone()));
        }

        if let Some(info) = &self.info {
            dict.insert(K_INFO.into(), Object::Reference(info.clone()));
        }

        if let Some([id0, id1]) = &self.id {
            dict.insert(
                K_ID.into(),
                Object::from(vec![Object::HexString(id0.clone()), Object::HexString(id1.clone())]),
            );
        }

        dict
    }
}

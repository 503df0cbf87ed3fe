//! Dictionary keys and names shared by the writers, and the few document
//! level dictionaries the writers need.

use crate::pdf::{Dictionary, Name, Object, Reference};

/// Dictionary type names
pub(crate) mod dict_types {
    pub const XREF: &[u8] = b"XRef";
    pub const CATALOG: &[u8] = b"Catalog";
    pub const PAGES: &[u8] = b"Pages";
    pub const CRYPT_FILTER_DECODE_PARMS: &[u8] = b"CryptFilterDecodeParms";
}

/// Filter names
pub(crate) mod filters {
    pub const FLATE_DECODE: &[u8] = b"FlateDecode";
    pub const CRYPT: &[u8] = b"Crypt";
    /// Crypt filter used for embedded files when only those are encrypted.
    pub const STANDARD_CRYPT_FILTER: &[u8] = b"StdCF";
}

pub(crate) const K_TYPE: &[u8] = b"Type";
pub(crate) const K_KIDS: &[u8] = b"Kids";
pub(crate) const K_COUNT: &[u8] = b"Count";
pub(crate) const K_NAME: &[u8] = b"Name";
pub(crate) const K_LENGTH: &[u8] = b"Length";
pub(crate) const K_FILTER: &[u8] = b"Filter";
pub(crate) const K_DECODE_PARMS: &[u8] = b"DecodeParms";
pub(crate) const K_NUMS: &[u8] = b"Nums";
pub(crate) const K_LIMITS: &[u8] = b"Limits";
pub(crate) const K_PAGES: &[u8] = b"Pages";
pub(crate) const K_PAGE_LABELS: &[u8] = b"PageLabels";
pub(crate) const K_W: &[u8] = b"W";

/// The document catalog. `page_labels` is the root returned by
/// [`PageLabels::to_dictionary`](crate::PageLabels::to_dictionary).
pub fn catalog(pages: &Reference, page_labels: Option<Dictionary>) -> Dictionary {
    let mut dict = Dictionary::from([
        (Name::from(K_TYPE), Object::from(Name::from(dict_types::CATALOG))),
        (Name::from(K_PAGES), Object::from(pages.clone())),
    ]);
    if let Some(labels) = page_labels {
        dict.insert(Name::from(K_PAGE_LABELS), Object::from(labels));
    }
    dict
}

/// A flat page tree root over `kids`.
pub fn page_tree(kids: &[Reference]) -> Dictionary {
    Dictionary::from([
        (Name::from(K_TYPE), Object::from(Name::from(dict_types::PAGES))),
        (
            Name::from(K_KIDS),
            Object::from(kids.iter().cloned().map(Object::from).collect::<Vec<_>>()),
        ),
        (Name::from(K_COUNT), Object::Integer(kids.len() as i64)),
    ])
}

//! Entries of a cross-reference stream.
//!
//! Every object number of a section is either in use, with the byte offset of
//! its `obj` keyword, or free. Object 0 is always free and heads the list of
//! free objects.

/// Denotes a free object reference in a xref stream.
pub const XREF_FREE: u8 = 0;
/// Denotes a used object reference in a xref stream.
pub const XREF_USED: u8 = 1;

/// Field widths in bytes of a single xref stream row.
pub const XREF_WIDTHS: [usize; 3] = [1, 8, 8];

#[derive(Debug, Clone, PartialEq)]
pub struct FreeObject {
    /// Number of this object
    pub number: u32,
    /// Next generation number that should be used
    pub generation: u32,
    /// Next free object number
    pub next_free: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsedObject {
    /// Number of this object
    pub number: u32,
    /// The position of this object in the pdf file in bytes, starting from the
    /// beginning of the PDF.
    pub byte_offset: u64,
    pub generation: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XrefEntry {
    Free(FreeObject),
    Used(UsedObject),
}

impl XrefEntry {
    pub fn type_num(&self) -> u8 {
        match self {
            XrefEntry::Free(_) => XREF_FREE,
            XrefEntry::Used(_) => XREF_USED,
        }
    }

    pub fn number(&self) -> u32 {
        match self {
            XrefEntry::Free(FreeObject { number, .. }) => *number,
            XrefEntry::Used(UsedObject { number, .. }) => *number,
        }
    }

    /// Append this entry as one `/W [1 8 8]` row.
    pub(crate) fn encode(&self, buffer: &mut Vec<u8>) {
        let (second, third) = match self {
            XrefEntry::Free(entry) => (u64::from(entry.next_free), u64::from(entry.generation)),
            XrefEntry::Used(entry) => (entry.byte_offset, u64::from(entry.generation)),
        };
        buffer.push(self.type_num());
        buffer.extend_from_slice(&second.to_be_bytes());
        buffer.extend_from_slice(&third.to_be_bytes());
    }
}

impl From<UsedObject> for XrefEntry {
    fn from(v: UsedObject) -> Self {
        Self::Used(v)
    }
}

impl From<FreeObject> for XrefEntry {
    fn from(v: FreeObject) -> Self {
        Self::Free(v)
    }
}

/// Complete the entries for object numbers `0..size`: numbers without a used
/// entry become free and are chained in ascending order, ending at object 0.
pub(crate) fn complete(used: &[UsedObject], size: u32) -> Vec<XrefEntry> {
    let mut entries: Vec<Option<XrefEntry>> = vec![None; size as usize];
    for u in used {
        if let Some(slot) = entries.get_mut(u.number as usize) {
            *slot = Some(u.clone().into());
        }
    }

    let free: Vec<u32> = (0..size).filter(|&n| n == 0 || entries[n as usize].is_none()).collect();
    for (i, &number) in free.iter().enumerate() {
        let next_free = free.get(i + 1).copied().unwrap_or(0);
        entries[number as usize] = Some(
            FreeObject {
                number,
                generation: if number == 0 { 65535 } else { 0 },
                next_free,
            }
            .into(),
        );
    }

    entries.into_iter().flatten().collect()
}

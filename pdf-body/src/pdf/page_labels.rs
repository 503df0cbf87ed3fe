//! The catalog's `/PageLabels` number tree.
//!
//! Keys are 0-based page indices, values label dictionaries that start a new
//! labelling range:
//!
//! ```text
//! << /S /r >>                     i, ii, iii, ...
//! << /S /D /P (A-) /St 5 >>       A-5, A-6, ...
//! ```

use std::collections::BTreeMap;

use crate::{
    graph::ObjectGraph,
    pdf::{number_tree::NumberTree, CbString, Dictionary, Name, Object},
    BodyError,
};

const K_STYLE: &[u8] = b"S";
const K_PREFIX: &[u8] = b"P";
const K_START: &[u8] = b"St";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingStyle {
    DecimalArabic,
    UppercaseRoman,
    LowercaseRoman,
    UppercaseLetters,
    LowercaseLetters,
}

impl NumberingStyle {
    fn name(self) -> &'static [u8] {
        match self {
            NumberingStyle::DecimalArabic => b"D",
            NumberingStyle::UppercaseRoman => b"R",
            NumberingStyle::LowercaseRoman => b"r",
            NumberingStyle::UppercaseLetters => b"A",
            NumberingStyle::LowercaseLetters => b"a",
        }
    }

    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"D" => Some(NumberingStyle::DecimalArabic),
            b"R" => Some(NumberingStyle::UppercaseRoman),
            b"r" => Some(NumberingStyle::LowercaseRoman),
            b"A" => Some(NumberingStyle::UppercaseLetters),
            b"a" => Some(NumberingStyle::LowercaseLetters),
            _ => None,
        }
    }

    pub fn format(self, n: u32) -> String {
        match self {
            NumberingStyle::DecimalArabic => n.to_string(),
            NumberingStyle::UppercaseRoman => roman(n),
            NumberingStyle::LowercaseRoman => roman(n).to_lowercase(),
            NumberingStyle::UppercaseLetters => letters(n),
            NumberingStyle::LowercaseLetters => letters(n).to_lowercase(),
        }
    }
}

fn roman(mut n: u32) -> String {
    const NUMERALS: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

/// A, B, ..., Z, AA, AB, ...
fn letters(mut n: u32) -> String {
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Start of a labelling range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLabel {
    /// Without a style only the prefix is shown.
    pub style: Option<NumberingStyle>,
    pub prefix: Option<String>,
    /// Number of the first page in the range.
    pub first_page: u32,
}

impl PageLabel {
    pub fn new(style: NumberingStyle) -> Self {
        Self {
            style: Some(style),
            prefix: None,
            first_page: 1,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn starting_at(mut self, first_page: u32) -> Self {
        self.first_page = first_page;
        self
    }

    fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        if let Some(style) = self.style {
            dict.insert(Name::from(K_STYLE), Object::from(Name::from(style.name())));
        }
        if let Some(prefix) = &self.prefix {
            dict.insert(Name::from(K_PREFIX), Object::from(CbString::from_text(prefix)));
        }
        if self.first_page != 1 {
            dict.insert(Name::from(K_START), Object::from(self.first_page));
        }
        dict
    }

    fn from_dictionary(dict: &Dictionary) -> Self {
        Self {
            style: dict
                .get(K_STYLE)
                .and_then(Object::name)
                .and_then(|n| NumberingStyle::from_name(n)),
            prefix: dict.get(K_PREFIX).and_then(Object::string).map(CbString::to_text),
            first_page: dict
                .get(K_START)
                .and_then(Object::integer)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLabels(BTreeMap<u32, PageLabel>);

impl Default for PageLabels {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLabels {
    /// Labels with plain decimal numbering from the first page on.
    pub fn new() -> Self {
        Self(BTreeMap::from([(0, PageLabel::new(NumberingStyle::DecimalArabic))]))
    }

    /// Add or replace the label range starting at the 1-based `page`.
    pub fn add(&mut self, page: u32, label: PageLabel) -> Result<(), BodyError> {
        if page < 1 || label.first_page < 1 {
            return Err(BodyError::InvalidPageLabel("page numbers start at 1"));
        }
        self.0.insert(page - 1, label);
        Ok(())
    }

    /// Remove the label range starting at the 1-based `page`. The range of the
    /// first page can only be replaced.
    pub fn remove(&mut self, page: u32) {
        if page > 1 {
            self.0.remove(&(page - 1));
        }
    }

    /// Label ranges keyed by their 1-based first page.
    pub fn ranges(&self) -> impl Iterator<Item = (u32, &PageLabel)> {
        self.0.iter().map(|(&index, label)| (index + 1, label))
    }

    /// Write the labels as a number tree, returning the dictionary for the
    /// catalog's `/PageLabels` entry.
    pub fn to_dictionary<G: ObjectGraph + ?Sized>(&self, graph: &mut G) -> Result<Option<Dictionary>, BodyError> {
        let tree: NumberTree = self
            .0
            .iter()
            .map(|(&index, label)| (index, Object::from(label.to_dictionary())))
            .collect();
        tree.write(graph)
    }

    pub fn from_dictionary<G: ObjectGraph + ?Sized>(root: &Dictionary, graph: &G) -> Result<Self, BodyError> {
        let tree = NumberTree::read(Some(root), graph)?;
        let mut labels = BTreeMap::new();
        for (&index, value) in tree.iter() {
            match graph.follow(value)?.dictionary() {
                Some(dict) => {
                    labels.insert(index, PageLabel::from_dictionary(dict));
                }
                None => log::warn!("page label for page index {} is not a dictionary", index),
            }
        }
        Ok(Self(labels))
    }

    /// Render the label of each of the first `page_count` pages.
    pub fn labels(&self, page_count: u32) -> Vec<String> {
        let mut out = Vec::with_capacity(page_count as usize);
        let mut current: Option<&PageLabel> = None;
        let mut number = 1;

        for page in 0..page_count {
            if let Some(label) = self.0.get(&page) {
                current = Some(label);
                number = label.first_page;
            }

            let text = match current {
                Some(label) => {
                    let prefix = label.prefix.as_deref().unwrap_or("");
                    match label.style {
                        Some(style) => format!("{}{}", prefix, style.format(number)),
                        None => prefix.to_owned(),
                    }
                }
                None => number.to_string(),
            };
            out.push(text);
            number = number.saturating_add(1);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pdf::number_tree::LEAF_SIZE, PdfSection};

    #[test]
    fn roman_numerals() {
        assert_eq!(roman(1), "I");
        assert_eq!(roman(4), "IV");
        assert_eq!(roman(9), "IX");
        assert_eq!(roman(14), "XIV");
        assert_eq!(roman(1994), "MCMXCIV");
        assert_eq!(NumberingStyle::LowercaseRoman.format(3), "iii");
    }

    #[test]
    fn letter_numbering() {
        assert_eq!(letters(1), "A");
        assert_eq!(letters(26), "Z");
        assert_eq!(letters(27), "AA");
        assert_eq!(letters(28), "AB");
        assert_eq!(letters(702), "ZZ");
        assert_eq!(letters(703), "AAA");
        assert_eq!(NumberingStyle::LowercaseLetters.format(2), "b");
    }

    #[test]
    fn default_labels_are_decimal() {
        assert_eq!(PageLabels::new().labels(3), vec!["1", "2", "3"]);
    }

    #[test]
    fn mixed_ranges() {
        let mut labels = PageLabels::new();
        labels.add(1, PageLabel::new(NumberingStyle::LowercaseRoman)).unwrap();
        labels.add(4, PageLabel::new(NumberingStyle::DecimalArabic)).unwrap();
        labels
            .add(6, PageLabel::new(NumberingStyle::DecimalArabic).with_prefix("A-").starting_at(8))
            .unwrap();
        labels
            .add(
                8,
                PageLabel {
                    style: None,
                    prefix: Some("Cover".to_owned()),
                    first_page: 1,
                },
            )
            .unwrap();

        assert_eq!(
            labels.labels(8),
            vec!["i", "ii", "iii", "1", "2", "A-8", "A-9", "Cover"]
        );
    }

    #[test]
    fn invalid_pages_are_rejected() {
        let mut labels = PageLabels::new();
        assert!(labels.add(0, PageLabel::new(NumberingStyle::DecimalArabic)).is_err());
        assert!(labels
            .add(2, PageLabel::new(NumberingStyle::DecimalArabic).starting_at(0))
            .is_err());
    }

    #[test]
    fn first_range_cannot_be_removed() {
        let mut labels = PageLabels::new();
        labels.add(3, PageLabel::new(NumberingStyle::UppercaseLetters)).unwrap();
        labels.remove(1);
        labels.remove(3);
        assert_eq!(labels, PageLabels::new());
    }

    #[test]
    fn label_dictionary_entries() {
        let mut section = PdfSection::new();
        let mut labels = PageLabels::new();
        labels
            .add(2, PageLabel::new(NumberingStyle::UppercaseRoman).with_prefix("P").starting_at(3))
            .unwrap();

        let root = labels.to_dictionary(&mut section).unwrap().unwrap();
        let tree = NumberTree::read(Some(&root), &section).unwrap();

        let first = tree.get(0).unwrap().dictionary().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first.get(K_STYLE), Some(&Object::from(Name::from(&b"D"[..]))));

        let second = tree.get(1).unwrap().dictionary().unwrap();
        assert_eq!(second.get(K_STYLE), Some(&Object::from(Name::from(&b"R"[..]))));
        assert_eq!(second.get(K_PREFIX), Some(&Object::from(CbString::from(b"P".to_vec()))));
        assert_eq!(second.get(K_START), Some(&Object::Integer(3)));
    }

    #[test]
    fn labels_round_trip_through_a_deep_tree() {
        let mut section = PdfSection::new();
        let mut labels = PageLabels::new();
        for page in (2..=(LEAF_SIZE as u32 * 3)).step_by(2) {
            labels
                .add(page, PageLabel::new(NumberingStyle::LowercaseLetters).with_prefix("Anhang Ü-"))
                .unwrap();
        }

        let root = labels.to_dictionary(&mut section).unwrap().unwrap();
        assert!(!section.is_empty());

        let read = PageLabels::from_dictionary(&root, &section).unwrap();
        assert_eq!(read, labels);
        assert_eq!(read.labels(3), vec!["1", "Anhang Ü-a", "Anhang Ü-b"]);
    }
}

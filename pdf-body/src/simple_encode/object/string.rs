use std::io::Write;

use crate::{pdf::CbString, simple_encode::SimpleEncoder, writer::Encoder, BodyError};

/// Positions of the bytes that need a backslash: every `\` and every
/// parenthesis without a partner.
fn escape_positions(str: &CbString) -> Vec<usize> {
    let mut escape = Vec::new();
    let mut open_paranthesis = Vec::new();

    for (index, &char) in str.iter().enumerate() {
        match char {
            b'\\' => escape.push(index),
            b'(' => open_paranthesis.push(index),
            // unbalanced closing paranthesis need to be escaped, they would otherwise determain the end of the
            // string
            b')' => {
                if open_paranthesis.pop().is_none() {
                    escape.push(index);
                }
            }
            _ => {}
        }
    }

    escape.extend(open_paranthesis);
    escape.sort_unstable();
    escape
}

impl Encoder<CbString> for SimpleEncoder {
    fn write_to(str: &CbString, writer: &mut dyn Write) -> Result<(), BodyError> {
        writer.write_all(b"(")?;

        let mut last_written_index = 0;
        for index in escape_positions(str) {
            writer.write_all(&str[last_written_index..index])?;
            writer.write_all(br"\")?;
            last_written_index = index;
        }
        writer.write_all(&str[last_written_index..])?;
        writer.write_all(b")")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{pdf::CbString, simple_encode::SimpleEncoder, writer::Encoder};

    fn encode(input: &[u8]) -> (usize, Vec<u8>) {
        let simple = CbString::from(input.to_vec());
        let mut out = Vec::new();
        SimpleEncoder::write_to(&simple, &mut out).unwrap();
        (out.len(), out)
    }

    #[test]
    fn test_simple() {
        let (len, out) = encode(b"abcdefg");
        assert_eq!(len, 7 + 2);
        assert_eq!(out, b"(abcdefg)".to_vec());
    }

    #[test]
    fn test_end_with_closing_paranthesis() {
        let (len, out) = encode(b"(abcdefg)");
        assert_eq!(len, 9 + 2);
        assert_eq!(out, b"((abcdefg))".to_vec());
    }

    #[test]
    fn test_end_with_unmatched_closing_paranthesis() {
        // 2 for start and end. One for escaping.
        let (len, out) = encode(b"abcdefg)");
        assert_eq!(len, 8 + 3);
        assert_eq!(out, br"(abcdefg\))".to_vec());
    }

    #[test]
    fn test_many_unmatched_closing_paranthesis() {
        let (len, out) = encode(b")))))))))");
        assert_eq!(len, 9 * 2 + 2);
        assert_eq!(out, br"(\)\)\)\)\)\)\)\)\))".to_vec());
    }

    #[test]
    fn test_many_unmatched_opening_paranthesis() {
        let (len, out) = encode(b"(((((((((");
        assert_eq!(len, 9 * 2 + 2);
        assert_eq!(out, br"(\(\(\(\(\(\(\(\(\()".to_vec());
    }

    #[test]
    fn test_many_matched_paranthesis() {
        let (len, out) = encode(b"((((((()))))))");
        assert_eq!(len, 14 + 2);
        assert_eq!(out, br"(((((((())))))))".to_vec());
    }

    #[test]
    fn test_many_unmatched_paranthesis() {
        let (len, out) = encode(b")))))(((((");
        assert_eq!(len, 10 * 2 + 2);
        assert_eq!(out, br"(\)\)\)\)\)\(\(\(\(\()".to_vec());
    }

    #[test]
    fn test_more_opening_than_closing() {
        let (_, out) = encode(b"(()");
        assert_eq!(out, br"(\(())".to_vec());
    }

    #[test]
    fn test_backslash() {
        let (_, out) = encode(br"a\b");
        assert_eq!(out, br"(a\\b)".to_vec());
    }
}

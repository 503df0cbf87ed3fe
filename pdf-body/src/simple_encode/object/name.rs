use std::io::Write;

use crate::{pdf::Name, simple_encode::SimpleEncoder, writer::Encoder, BodyError};

pub(crate) fn is_delimiter(chr: u8) -> bool {
    matches!(
        chr,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// Characters that can appear in a name without `#XX` escaping.
pub(crate) fn is_regular(chr: u8) -> bool {
    chr != b'#' && (b'!'..=b'~').contains(&chr) && !is_delimiter(chr)
}

impl Encoder<Name> for SimpleEncoder {
    fn write_to(n: &Name, writer: &mut dyn Write) -> Result<(), BodyError> {
        let mut last_write = 0;
        writer.write_all(b"/")?;
        for (index, &c) in n.iter().enumerate() {
            if !is_regular(c) {
                writer.write_all(&n[last_write..index])?;
                last_write = index + 1;
                writer.write_all(b"#")?;
                writer.write_all(hex::encode(c.to_be_bytes()).as_bytes())?;
            }
        }
        writer.write_all(&n[last_write..])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &[u8], expected: &[u8]) {
        let name = Name::from(name.to_vec());
        let mut out = Vec::new();
        SimpleEncoder::write_to(&name, &mut out).unwrap();
        assert_eq!(
            out,
            expected,
            "Expected {}, got {}",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(&out)
        );
    }

    #[test]
    fn delimiter_in_the_middle() {
        check(b"Hello World!", b"/Hello#20World!");
    }

    #[test]
    fn delimiter_start() {
        check(b" HelloWorld!", b"/#20HelloWorld!");
    }

    #[test]
    fn delimiter_end() {
        check(b"HelloWorld! ", b"/HelloWorld!#20");
    }

    #[test]
    fn only_delimiters() {
        check(b"   ", b"/#20#20#20");
    }

    #[test]
    fn no_delimiters() {
        check(b"HelloWorld!", b"/HelloWorld!");
    }

    #[test]
    fn number_sign_and_non_ascii() {
        check(b"A#B", b"/A#23B");
        check(&[b'x', 0xe4], b"/x#e4");
        check(b"a/b", b"/a#2fb");
    }
}

use std::io::Write;

use crate::{pdf::Dictionary, simple_encode::SimpleEncoder, writer::Encoder, BodyError};

impl Encoder<Dictionary> for SimpleEncoder {
    fn write_to(o: &Dictionary, writer: &mut dyn Write) -> Result<(), BodyError> {
        writer.write_all(b"<<")?;
        let mut is_first = true;
        for (key, value) in o.iter() {
            if !is_first {
                writer.write_all(b" ")?;
            }
            Self::write_to(key, writer)?;
            writer.write_all(b" ")?;
            Self::write_to(value, writer)?;
            is_first = false
        }
        writer.write_all(b">>")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pdf::Object;

    use super::*;

    #[test]
    fn empty_dict() {
        let d = Dictionary::new();
        let expected_output = b"<<>>";

        let mut out = Vec::new();
        SimpleEncoder::write_to(&d, &mut out).unwrap();
        assert_eq!(expected_output, &out[..]);
    }

    #[test]
    fn filled_dict() {
        let mut d = Dictionary::new();
        d.insert(b"one".to_vec().into(), Object::Integer(1));
        d.insert(b"two".to_vec().into(), Object::Integer(2));
        d.insert(b"three".to_vec().into(), Object::Integer(3));

        let expected_output = b"<</one 1 /three 3 /two 2>>";

        let mut out = Vec::new();
        SimpleEncoder::write_to(&d, &mut out).unwrap();
        assert_eq!(
            expected_output,
            &out[..],
            "expected: {} got: {}",
            String::from_utf8_lossy(expected_output),
            String::from_utf8_lossy(&out[..])
        );
    }
}

use std::io::Write;

use crate::{pdf::Array, simple_encode::SimpleEncoder, writer::Encoder, BodyError};

impl Encoder<Array> for SimpleEncoder {
    fn write_to(array: &Array, writer: &mut dyn Write) -> Result<(), BodyError> {
        writer.write_all(b"[")?;
        for (i, item) in array.iter().enumerate() {
            if i != 0 {
                writer.write_all(b" ")?;
            }
            Self::write_to(item, writer)?;
        }
        writer.write_all(b"]")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pdf::{Name, Object};

    use super::*;

    #[test]
    fn empty_array() {
        let array = Array::from(vec![]);
        let mut out = Vec::new();
        SimpleEncoder::write_to(&array, &mut out).unwrap();
        let expected = b"[]";
        assert_eq!(expected, &out[..]);
    }

    #[test]
    fn array_with_numbers() {
        let array = Array::from(vec![Object::Integer(0), Object::Integer(1), Object::Integer(2)]);
        let mut out = Vec::new();
        SimpleEncoder::write_to(&array, &mut out).unwrap();
        let expected = b"[0 1 2]";
        assert_eq!(expected, &out[..]);
    }

    #[test]
    fn nested_array() {
        let array = Array::from(vec![
            Object::from(Name::from_str("Crypt")),
            Object::from(vec![Object::Null, Object::Bool(true)]),
        ]);

        let mut out = Vec::new();
        SimpleEncoder::write_to(&array, &mut out).unwrap();
        assert_eq!(&out[..], b"[/Crypt [null true]]");
    }
}

use std::io::Write;

use crate::{pdf::Object, simple_encode::SimpleEncoder, writer::Encoder, BodyError};

pub(crate) mod array;
pub(crate) mod dictionary;
pub(crate) mod name;
pub(crate) mod stream;
pub(crate) mod string;

pub(crate) const TRUE_OBJECT: &str = "true";
pub(crate) const FALSE_OBJECT: &str = "false";
pub(crate) const NULL_OBJECT: &str = "null";

impl Encoder<Object> for SimpleEncoder {
    fn write_to(obj: &Object, writer: &mut dyn Write) -> Result<(), BodyError> {
        match obj {
            Object::String(str) => Self::write_to(str, writer),
            Object::HexString(bytes) => {
                writer.write_all(b"<")?;
                writer.write_all(hex::encode(&bytes[..]).as_bytes())?;
                writer.write_all(b">")?;
                Ok(())
            }
            Object::Float(f) => Ok(writer.write_all(f.to_string().as_bytes())?),
            Object::Integer(i) => Ok(writer.write_all(i.to_string().as_bytes())?),
            Object::Bool(true) => Ok(writer.write_all(TRUE_OBJECT.as_bytes())?),
            Object::Bool(false) => Ok(writer.write_all(FALSE_OBJECT.as_bytes())?),
            Object::Name(n) => Self::write_to(n, writer),
            Object::Array(a) => Self::write_to(a, writer),
            Object::Dictionary(d) => Self::write_to(d, writer),
            Object::Stream(s) => Self::write_to(s, writer),
            Object::Null => Ok(writer.write_all(NULL_OBJECT.as_bytes())?),
            Object::Reference(r) => Ok(writer.write_all(r.to_string().as_bytes())?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{Bytes, Reference};

    fn encode(obj: &Object) -> String {
        let mut out = Vec::new();
        SimpleEncoder::write_to(obj, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(encode(&Object::Integer(-17)), "-17");
        assert_eq!(encode(&Object::Float(0.5)), "0.5");
        assert_eq!(encode(&Object::Bool(true)), "true");
        assert_eq!(encode(&Object::Bool(false)), "false");
        assert_eq!(encode(&Object::Null), "null");
    }

    #[test]
    fn hex_string() {
        let bytes: Bytes = vec![0x01, 0xab, 0xff].into();
        assert_eq!(encode(&Object::HexString(bytes)), "<01abff>");
    }

    #[test]
    fn reference() {
        assert_eq!(encode(&Object::Reference(Reference::new(12, 0))), "12 0 R");
    }
}

use crate::{parse::ByteParser, ClassError, ClassResult};

/// Decodes the JVM's modified UTF-8 into an owned `String`.
///
/// The format differs from standard UTF-8 in two ways: the NUL codepoint is
/// stored as the overlong pair `0xC0 0x80`, and supplementary characters are
/// stored as two 3-byte surrogate encodings rather than one 4-byte sequence.
pub fn parse_mutf8(bytes: &[u8]) -> ClassResult<String> {
    let mut parser = ByteParser::new(bytes);
    let mut out = Vec::with_capacity(bytes.len());

    macro_rules! invalid {
        ($byte:expr) => {
            return Err(ClassError::InvalidModifiedUtf8Byte(
                parser.offset - 1,
                $byte,
            ))
        };
    }

    while let Ok(b1) = parser.parse_u8() {
        if b1 == 0 || b1 >= 0xf0 {
            invalid!(b1);
        }

        if b1 & 0x80 == 0 {
            // 0xxxxxxx, plain ASCII
            out.push(b1);
        } else if (b1 & 0xe0) ^ 0xc0 == 0 {
            // 110xxxxx 10xxxxxx
            let b2 = parser.parse_u8()?;
            if (b2 & 0xc0) ^ 0x80 != 0 {
                invalid!(b2);
            }

            if b1 == 0xc0 && b2 == 0x80 {
                // Overlong NUL; re-encode as the real codepoint
                out.push(0);
            } else {
                out.push(b1);
                out.push(b2);
            }
        } else if b1 == 0xed {
            // 11101101 1010xxxx 10xxxxxx 11101101 1011yyyy 10yyyyyy
            let b2 = parser.parse_u8()?;
            if (b2 & 0xf0) ^ 0xa0 != 0 {
                invalid!(b2);
            }

            let b3 = parser.parse_u8()?;
            if (b3 & 0xc0) ^ 0x80 != 0 {
                invalid!(b3);
            }

            let b4 = parser.parse_u8()?;
            if b4 != 0xed {
                invalid!(b4);
            }

            let b5 = parser.parse_u8()?;
            if (b5 & 0xf0) ^ 0xb0 != 0 {
                invalid!(b5);
            }

            let b6 = parser.parse_u8()?;
            if (b6 & 0xc0) ^ 0x80 != 0 {
                invalid!(b6);
            }

            let scalar = 0x10000
                + ((b2 as u32 & 0x0f) << 16)
                + ((b3 as u32 & 0x3f) << 10)
                + ((b5 as u32 & 0x0f) << 6)
                + (b6 as u32 & 0x3f);
            match std::char::from_u32(scalar) {
                Some(ch) => {
                    let mut utf8 = [0; 4];
                    out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                }
                None => invalid!(b6),
            }
        } else if (b1 & 0xf0) ^ 0xe0 == 0 {
            // 1110xxxx 10xxxxxx 10xxxxxx
            let b2 = parser.parse_u8()?;
            if (b2 & 0xc0) ^ 0x80 != 0 {
                invalid!(b2);
            }

            let b3 = parser.parse_u8()?;
            if (b3 & 0xc0) ^ 0x80 != 0 {
                invalid!(b3);
            }

            out.push(b1);
            out.push(b2);
            out.push(b3);
        } else {
            invalid!(b1);
        }
    }

    String::from_utf8(out).map_err(|err| {
        let pos = err.utf8_error().valid_up_to();
        let byte = err.as_bytes()[pos];
        ClassError::InvalidModifiedUtf8Byte(pos, byte)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutf8_normal() {
        assert_eq!(parse_mutf8(b"Hello, world!").as_deref(), Ok("Hello, world!"));
    }

    #[test]
    fn test_mutf8_non_latin() {
        let string = "Здравствуй, мир";
        assert_eq!(parse_mutf8(string.as_bytes()).as_deref(), Ok(string));
    }

    #[test]
    fn test_mutf8_supplementary() {
        let bytes = &[0x41, 0xed, 0xa0, 0xb4, 0xed, 0xbc, 0xb9];
        assert_eq!(parse_mutf8(bytes).as_deref(), Ok("A𝌹"));
    }

    #[test]
    fn test_mutf8_overlong_nul() {
        assert_eq!(
            parse_mutf8(b"foo\xc0\x80bar\xc0\x80baz"),
            Ok(String::from("foo\0bar\0baz"))
        );
    }

    #[test]
    fn test_mutf8_invalid_nul() {
        assert_eq!(
            parse_mutf8(b"foo\0bar"),
            Err(ClassError::InvalidModifiedUtf8Byte(3, 0))
        );
    }
}

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

#[derive(Error, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParseError {
    #[error("unexpected end of input, {0} more bytes needed")]
    Incomplete(usize),
    #[error("unexpected end of input")]
    IncompleteUnknown,
    #[error("unexpected byte at offset {0}")]
    Error(usize),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// A big-endian cursor over a byte buffer. All multi-byte reads follow the
/// class-file convention of network byte order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ByteParser<'src> {
    pub src: &'src [u8],
    pub offset: usize,
}

impl<'src> ByteParser<'src> {
    pub fn new(src: &'src [u8]) -> Self {
        ByteParser { src, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.src.len() - self.offset
    }

    /// Takes `tag.len()` bytes and returns an error if the bytes did not match.
    pub fn expect(&mut self, tag: &[u8]) -> ParseResult<()> {
        if self.remaining() < tag.len() {
            Err(ParseError::Incomplete(tag.len() - self.remaining()))
        } else {
            for i in 0..tag.len() {
                if self.src[self.offset + i] != tag[i] {
                    return Err(ParseError::Error(self.offset + i));
                }
            }

            self.offset += tag.len();
            Ok(())
        }
    }

    /// Takes `len` bytes, and errors if there were not enough bytes remaining.
    pub fn take(&mut self, len: usize) -> ParseResult<&'src [u8]> {
        if self.remaining() < len {
            Err(ParseError::Incomplete(len - self.remaining()))
        } else {
            let res = &self.src[self.offset..self.offset + len];
            self.offset += len;
            Ok(res)
        }
    }

    /// Takes bytes until a condition is no longer met, consuming (but not
    /// returning) the byte that failed the predicate. Errors if the input runs
    /// out while the predicate still holds.
    pub fn take_while<F>(&mut self, mut func: F) -> ParseResult<&'src [u8]>
    where
        F: FnMut(u8) -> bool,
    {
        let mut len = 0;
        while self.remaining() - len > 0 {
            if !func(self.src[self.offset + len]) {
                let out = self.take(len)?;
                self.offset += 1;
                return Ok(out);
            }

            len += 1;
        }

        Err(ParseError::IncompleteUnknown)
    }

    /// Like `take`, but does not advance the parser.
    pub fn peek(&self, len: usize) -> ParseResult<&'src [u8]> {
        if self.remaining() < len {
            Err(ParseError::Incomplete(len - self.remaining()))
        } else {
            Ok(&self.src[self.offset..self.offset + len])
        }
    }

    /// Applies `func` exactly `len` times, and returns a vector of the items
    /// produced by `func`.
    pub fn seq<F, T, E>(&mut self, len: usize, mut func: F) -> Result<Vec<T>, E>
    where
        F: FnMut(&mut Self) -> Result<T, E>,
    {
        let mut vec = Vec::with_capacity(len);
        for _ in 0..len {
            vec.push(func(self)?);
        }
        Ok(vec)
    }

    pub fn parse_u8(&mut self) -> ParseResult<u8> {
        self.take(1).map(|b| b[0])
    }

    pub fn parse_u16(&mut self) -> ParseResult<u16> {
        self.take(2).map(BigEndian::read_u16)
    }

    pub fn parse_u32(&mut self) -> ParseResult<u32> {
        self.take(4).map(BigEndian::read_u32)
    }

    pub fn parse_i32(&mut self) -> ParseResult<i32> {
        self.take(4).map(|b| BigEndian::read_u32(b) as i32)
    }

    pub fn parse_i64(&mut self) -> ParseResult<i64> {
        self.take(8).map(|b| BigEndian::read_u64(b) as i64)
    }

    pub fn parse_f32(&mut self) -> ParseResult<f32> {
        self.take(4).map(|b| f32::from_bits(BigEndian::read_u32(b)))
    }

    pub fn parse_f64(&mut self) -> ParseResult<f64> {
        self.take(8).map(|b| f64::from_bits(BigEndian::read_u64(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_while_valid() {
        let mut parser = ByteParser::new(b"foo.bar");
        assert_eq!(parser.take_while(|ch| ch != b'.'), Ok(&b"foo"[..]));
        assert_eq!(parser.remaining(), 3);
    }

    #[test]
    fn test_take_while_invalid() {
        let mut parser = ByteParser::new(b"foo");
        assert_eq!(
            parser.take_while(|ch| ch != b'.'),
            Err(ParseError::IncompleteUnknown)
        );
    }

    #[test]
    fn test_expect_mismatch() {
        let mut parser = ByteParser::new(b"abcd");
        assert_eq!(parser.expect(b"abd"), Err(ParseError::Error(2)));
    }

    #[test]
    fn test_numeric_reads() {
        let mut parser = ByteParser::new(&[0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x05]);
        assert_eq!(parser.parse_u32(), Ok(0xCAFE_BABE));
        assert_eq!(parser.parse_u16(), Ok(5));
        assert_eq!(parser.parse_u8(), Err(ParseError::Incomplete(1)));
    }
}

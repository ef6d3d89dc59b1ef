//! Byte-level assembly helpers for building small class files in tests.

/// Big-endian byte buffer with the writes the class-file layout needs.
#[derive(Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Bytes {
        Bytes::default()
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.0.push(value);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn utf8_constant(&mut self, text: &str) -> &mut Self {
        self.u8(1).u16(text.len() as u16).raw(text.as_bytes())
    }

    pub fn class_constant(&mut self, name_index: u16) -> &mut Self {
        self.u8(7).u16(name_index)
    }
}

/// A minimal well-formed class file: `public class Foo` with no members.
/// Pool: 1 = "Foo", 2 = Class(1), 3 = "java/lang/Object", 4 = Class(3).
pub fn minimal_class() -> Vec<u8> {
    let mut out = Bytes::new();
    out.raw(&[0xCA, 0xFE, 0xBA, 0xBE]);
    out.u16(0).u16(52);

    out.u16(5);
    out.utf8_constant("Foo");
    out.class_constant(1);
    out.utf8_constant("java/lang/Object");
    out.class_constant(3);

    out.u16(0x0021); // public super
    out.u16(2); // this
    out.u16(4); // super

    out.u16(0); // interfaces
    out.u16(0); // fields
    out.u16(0); // methods
    out.u16(0); // attributes

    out.0
}

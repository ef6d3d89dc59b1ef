//! # Class file binary format
//!
//! All numbers in this format are big-endian
//!
//! ```txt
//! Class {
//!     // 0xCAFEBABE
//!     magic: u32,
//!     minor_version: u16,
//!     major_version: u16,
//!
//!     constant_pool_count: u16,
//!     constant_pool: [Constant; constant_pool_count - 1],
//!
//!     access_flags: u16,
//!     this_class: u16,
//!     super_class: u16,
//!
//!     interfaces_count: u16,
//!     interfaces: [u16; interfaces_count],
//!
//!     fields_count: u16,
//!     fields: [Field; fields_count],
//!
//!     methods_count: u16,
//!     methods: [Method; methods_count],
//!
//!     attributes_count: u16,
//!     attributes: [AttributeInfo; attributes_count],
//! }
//! ```

use crate::{
    attribute::{parse_attribute_list, AttributeInfo},
    constant::{ConstantPool, PoolIndex},
    field::{parse_field, FieldInfo},
    method::{parse_method, MethodInfo},
    parse::{ByteParser, ParseResult},
    ClassResult,
};

/// The class file magic: `0xCAFEBABE`
pub const CLASS_MAGIC: &[u8; 4] = &[0xCA, 0xFE, 0xBA, 0xBE];

/// Version of the class file, ordered lexicographically as `major.minor`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
}

pub fn parse_version(input: &mut ByteParser<'_>) -> ParseResult<Version> {
    let minor = input.parse_u16()?;
    let major = input.parse_u16()?;
    Ok(Version { minor, major })
}

pub fn parse_class(input: &mut ByteParser<'_>) -> ClassResult<ClassFile> {
    input.expect(CLASS_MAGIC).map_err(|_| crate::ClassError::WrongMagic)?;
    let version = parse_version(input)?;
    let pool = ConstantPool::parse(input)?;
    let access_flags = input.parse_u16()?;
    let this_class = input.parse_u16()? as usize;
    let super_class = input.parse_u16()? as usize;

    let interfaces_len = input.parse_u16()? as usize;
    let interfaces = input.seq(interfaces_len, |input| {
        input.parse_u16().map(|x| x as usize)
    })?;

    let fields_len = input.parse_u16()? as usize;
    let fields = input.seq(fields_len, parse_field)?;

    let methods_len = input.parse_u16()? as usize;
    let methods = input.seq(methods_len, parse_method)?;

    Ok(ClassFile {
        version,
        pool,
        access_flags,
        this_class,
        super_class,
        interfaces: interfaces.into(),
        fields: fields.into(),
        methods: methods.into(),
        attributes: parse_attribute_list(input)?,
    })
}

/// One fully parsed (but unresolved) class file. The pool and every record in
/// here is read-only for the life of the value.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassFile {
    pub version: Version,
    pub pool: ConstantPool,

    pub access_flags: u16,
    pub this_class: PoolIndex,
    /// Pool index of the superclass, or 0 for `java/lang/Object` itself.
    pub super_class: PoolIndex,

    pub interfaces: Box<[PoolIndex]>,
    pub fields: Box<[FieldInfo]>,
    pub methods: Box<[MethodInfo]>,
    pub attributes: Box<[AttributeInfo]>,
}

impl ClassFile {
    pub fn parse<T: AsRef<[u8]>>(src: T) -> ClassResult<ClassFile> {
        parse_class(&mut ByteParser::new(src.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_magic() {
        assert_eq!(
            ClassFile::parse(&[0xCA, 0xFE, 0xBA, 0x00]),
            Err(crate::ClassError::WrongMagic)
        );
    }
}

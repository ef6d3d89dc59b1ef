//! ```txt
//! Method {
//!     access_flags:     u16
//!     name_index:       u16
//!     descriptor_index: u16
//!     attributes_count: u16
//!     attributes:       [AttributeInfo; attributes_count]
//! }
//! ```

use crate::{
    attribute::{parse_attribute_list, AttributeInfo},
    constant::PoolIndex,
    parse::ByteParser,
    ClassResult,
};

/// A raw method record, same layout as a field record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodInfo {
    pub access_flags: u16,
    pub name: PoolIndex,
    pub descriptor: PoolIndex,
    pub attributes: Box<[AttributeInfo]>,
}

pub fn parse_method(input: &mut ByteParser<'_>) -> ClassResult<MethodInfo> {
    Ok(MethodInfo {
        access_flags: input.parse_u16()?,
        name: input.parse_u16()? as usize,
        descriptor: input.parse_u16()? as usize,
        attributes: parse_attribute_list(input)?,
    })
}

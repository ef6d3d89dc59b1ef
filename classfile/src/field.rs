//! ```txt
//! Field {
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

/// A raw field record. Name and descriptor stay as pool indices; resolving
/// them is the model layer's job.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldInfo {
    pub access_flags: u16,
    pub name: PoolIndex,
    pub descriptor: PoolIndex,
    pub attributes: Box<[AttributeInfo]>,
}

pub fn parse_field(input: &mut ByteParser<'_>) -> ClassResult<FieldInfo> {
    Ok(FieldInfo {
        access_flags: input.parse_u16()?,
        name: input.parse_u16()? as usize,
        descriptor: input.parse_u16()? as usize,
        attributes: parse_attribute_list(input)?,
    })
}

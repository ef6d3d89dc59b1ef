//! # Attributes
//!
//! ## General form
//! An attribute is an index into the constant pool naming it, followed by the
//! byte length of the *rest* of the attribute, followed by name-specific
//! payload bytes.
//!
//! ```txt
//! AttributeInfo {
//!     name_index: u16,
//!     length: u32,
//!     info: [u8; length],
//! }
//! ```
//!
//! Payloads are kept unparsed until somebody registers a handler for the
//! attribute's name; see [`dispatch`]. The payload grammars this crate knows
//! how to decode:
//!
//! ```txt
//! ConstantValue { index: u16 }
//!
//! Code {
//!     max_stack: u16,
//!     max_locals: u16,
//!     code_length: u32,
//!     code: [u8; code_length],
//!     exceptions_length: u16,
//!     exceptions: [ExceptionInfo; exceptions_length],   // 8 bytes each
//!     attributes_count: u16,
//!     attributes: [AttributeInfo; attributes_count],
//! }
//!
//! LineNumberTable {
//!     length: u16,
//!     table: [{ start_pc: u16, line_number: u16 }; length],
//! }
//!
//! LocalVariableTable {
//!     length: u16,
//!     table: [{ start_pc: u16, length: u16, name_index: u16,
//!               descriptor_index: u16, index: u16 }; length],
//! }
//!
//! InnerClasses {
//!     length: u16,
//!     classes: [{ inner_class_info_index: u16, outer_class_info_index: u16,
//!                 inner_name_index: u16, inner_class_access_flags: u16 }; length],
//! }
//!
//! SourceFile { sourcefile_index: u16 }
//! ```

use crate::{
    constant::{ConstantPool, PoolIndex},
    parse::ByteParser,
    ClassResult,
};
use std::collections::HashMap;

/// A raw attribute record: the pool index of its name and its unparsed
/// payload bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeInfo {
    pub name: PoolIndex,
    pub data: Box<[u8]>,
}

pub fn parse_attribute(input: &mut ByteParser<'_>) -> ClassResult<AttributeInfo> {
    let name = input.parse_u16()? as usize;
    let len = input.parse_u32()? as usize;
    Ok(AttributeInfo {
        name,
        data: input.take(len)?.into(),
    })
}

/// Parses a count-prefixed attribute list, the form it takes everywhere it
/// appears in the file.
pub fn parse_attribute_list(input: &mut ByteParser<'_>) -> ClassResult<Box<[AttributeInfo]>> {
    let len = input.parse_u16()? as usize;
    input.seq(len, parse_attribute).map(Into::into)
}

type Handler<'a> = Box<dyn FnMut(&mut ByteParser<'_>) -> ClassResult<()> + 'a>;

/// A name-keyed table of attribute handlers, passed explicitly into
/// [`dispatch`]. Names the table does not know are skipped.
#[derive(Default)]
pub struct Handlers<'a> {
    table: HashMap<&'static str, Handler<'a>>,
}

impl<'a> Handlers<'a> {
    pub fn new() -> Self {
        Handlers {
            table: HashMap::new(),
        }
    }

    pub fn on<F>(mut self, name: &'static str, handler: F) -> Self
    where
        F: FnMut(&mut ByteParser<'_>) -> ClassResult<()> + 'a,
    {
        self.table.insert(name, Box::new(handler));
        self
    }
}

/// Walks `attributes` in file order, resolving each record's name from the
/// pool. A registered handler is invoked with a parser over the record's
/// payload; unknown names are skipped, duplicates invoke the handler again.
///
/// Handlers may recurse: the `Code` handler is expected to call `dispatch`
/// over the nested attribute list inside its own payload.
pub fn dispatch(
    pool: &ConstantPool,
    attributes: &[AttributeInfo],
    handlers: &mut Handlers<'_>,
) -> ClassResult<()> {
    for attr in attributes {
        let name = pool.utf8(attr.name)?;
        match handlers.table.get_mut(name) {
            Some(handler) => handler(&mut ByteParser::new(&attr.data))?,
            None => log::debug!("skipping attribute {:?}", name),
        }
    }
    Ok(())
}

/// The pieces of a `Code` payload that matter for metadata extraction. The
/// instruction stream and exception table are consumed but not decoded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Code {
    pub max_stack: u16,
    pub max_locals: u16,
    pub attributes: Box<[AttributeInfo]>,
}

pub fn parse_code(input: &mut ByteParser<'_>) -> ClassResult<Code> {
    let max_stack = input.parse_u16()?;
    let max_locals = input.parse_u16()?;

    let code_length = input.parse_u32()? as usize;
    input.take(code_length)?;

    let exceptions_length = input.parse_u16()? as usize;
    input.take(exceptions_length * 8)?;

    Ok(Code {
        max_stack,
        max_locals,
        attributes: parse_attribute_list(input)?,
    })
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LineNumberEntry {
    pub start_pc: u16,
    pub line: u16,
}

pub fn parse_line_number_table(input: &mut ByteParser<'_>) -> ClassResult<Box<[LineNumberEntry]>> {
    let len = input.parse_u16()? as usize;
    input
        .seq(len, |input| {
            Ok(LineNumberEntry {
                start_pc: input.parse_u16()?,
                line: input.parse_u16()?,
            })
        })
        .map(Into::into)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LocalVariable {
    /// First bytecode offset at which the variable has a value; parameters
    /// start at 0.
    pub start_pc: u16,
    pub length: u16,
    pub name: PoolIndex,
    pub descriptor: PoolIndex,
    /// Position in the local-variable array. `long`/`double` occupy this slot
    /// and the next.
    pub slot: u16,
}

pub fn parse_local_variable_table(
    input: &mut ByteParser<'_>,
) -> ClassResult<Box<[LocalVariable]>> {
    let len = input.parse_u16()? as usize;
    input
        .seq(len, |input| {
            Ok(LocalVariable {
                start_pc: input.parse_u16()?,
                length: input.parse_u16()?,
                name: input.parse_u16()? as usize,
                descriptor: input.parse_u16()? as usize,
                slot: input.parse_u16()?,
            })
        })
        .map(Into::into)
}

/// A `ConstantValue` payload: the pool index of the literal.
pub fn parse_constant_value(input: &mut ByteParser<'_>) -> ClassResult<PoolIndex> {
    Ok(input.parse_u16()? as usize)
}

/// A `SourceFile` payload: the pool index of the file name.
pub fn parse_source_file(input: &mut ByteParser<'_>) -> ClassResult<PoolIndex> {
    Ok(input.parse_u16()? as usize)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct InnerClass {
    pub info: PoolIndex,
    /// `None` for local and anonymous classes.
    pub outer_info: Option<PoolIndex>,
    /// `None` for anonymous classes.
    pub name: Option<PoolIndex>,
    pub access_flags: u16,
}

pub fn parse_inner_classes(input: &mut ByteParser<'_>) -> ClassResult<Box<[InnerClass]>> {
    fn optional_index(input: &mut ByteParser<'_>) -> ClassResult<Option<PoolIndex>> {
        Ok(match input.parse_u16()? as usize {
            0 => None,
            index => Some(index),
        })
    }

    let len = input.parse_u16()? as usize;
    input
        .seq(len, |input| {
            Ok(InnerClass {
                info: input.parse_u16()? as usize,
                outer_info: optional_index(input)?,
                name: optional_index(input)?,
                access_flags: input.parse_u16()?,
            })
        })
        .map(Into::into)
}

//! Reader for the JVM `.class` container format.
//!
//! The crate stays at the binary layer: it parses the constant pool, access
//! flags, raw field/method records and their attribute blobs, and understands
//! the type-descriptor grammar. It does not decode instruction streams and it
//! does not verify class files beyond what metadata extraction needs.

pub mod access;
pub mod attribute;
pub mod class;
pub mod constant;
pub mod descriptor;
pub mod field;
pub mod method;
mod mutf8;
mod parse;

pub use crate::mutf8::parse_mutf8;
pub use crate::parse::{ByteParser, ParseError, ParseResult};

use thiserror::Error;

pub type ClassResult<T> = Result<T, ClassError>;

#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum ClassError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    // Constant pool errors
    #[error("unknown constant pool tag {0}")]
    UnknownConstantTag(u8),
    #[error("unknown method handle kind {0}")]
    UnknownMethodHandleKind(u8),
    #[error("constant pool count must be at least 1")]
    ConstantPoolTooSmall,
    #[error("constant pool index {0} is out of range")]
    InvalidPoolIndex(usize),
    #[error("constant pool entry {0} has the wrong tag for this access")]
    InvalidPoolType(usize),

    // Class parse errors
    #[error("not a class file (bad magic)")]
    WrongMagic,

    // Descriptor errors
    #[error("unrecognized descriptor type code {0:?}")]
    BadDescriptorType(char),
    #[error("object type descriptor is missing its terminating ';'")]
    UnterminatedObjectType,
    #[error("void is only legal as a return type")]
    VoidParameter,

    #[error("invalid modified UTF-8 byte {1:#04x} at offset {0}")]
    InvalidModifiedUtf8Byte(usize, u8),
}

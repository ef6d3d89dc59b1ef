//! # Constant Pool
//! Entries in the constant pool start at 1, and indices into the pool are
//! likewise 1-based. Each entry is comprised of a 1-byte tag, followed by a
//! variable length of bytes decided by the type of constant.
//!
//! ### Oddities
//! Utf8 constants aren't actually UTF-8, but the modified UTF-8 described in
//! §4.4.7 of the JVM specification.
//!
//! Long and Double entries take up two slots in the constant pool, but the
//! upper entry is never directly referenced.

use crate::{
    mutf8::parse_mutf8,
    parse::ByteParser,
    ClassError, ClassResult,
};

pub type PoolIndex = usize;

pub const CONSTANT_UTF8: u8 = 1;
pub const CONSTANT_INTEGER: u8 = 3;
pub const CONSTANT_FLOAT: u8 = 4;
pub const CONSTANT_LONG: u8 = 5;
pub const CONSTANT_DOUBLE: u8 = 6;
pub const CONSTANT_CLASS: u8 = 7;
pub const CONSTANT_STRING: u8 = 8;
pub const CONSTANT_FIELD_REF: u8 = 9;
pub const CONSTANT_METHOD_REF: u8 = 10;
pub const CONSTANT_INTERFACE_METHOD_REF: u8 = 11;
pub const CONSTANT_NAME_AND_TYPE: u8 = 12;
pub const CONSTANT_METHOD_HANDLE: u8 = 15;
pub const CONSTANT_METHOD_TYPE: u8 = 16;
pub const CONSTANT_INVOKE_DYNAMIC: u8 = 18;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MethodHandleKind {
    GetField,
    GetStatic,
    PutField,
    PutStatic,
    InvokeVirtual,
    InvokeStatic,
    InvokeSpecial,
    NewInvokeSpecial,
    InvokeInterface,
}

impl MethodHandleKind {
    pub fn from(kind: u8) -> ClassResult<MethodHandleKind> {
        Ok(match kind {
            1 => MethodHandleKind::GetField,
            2 => MethodHandleKind::GetStatic,
            3 => MethodHandleKind::PutField,
            4 => MethodHandleKind::PutStatic,
            5 => MethodHandleKind::InvokeVirtual,
            6 => MethodHandleKind::InvokeStatic,
            7 => MethodHandleKind::InvokeSpecial,
            8 => MethodHandleKind::NewInvokeSpecial,
            9 => MethodHandleKind::InvokeInterface,
            other => return Err(ClassError::UnknownMethodHandleKind(other)),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    /// Occupies index 0 and the upper slot of each 64-bit entry. Not part of
    /// the format itself, only of its 1-based indexing scheme.
    Nothing,

    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),

    String(PoolIndex),
    Class(PoolIndex),
    MethodType(PoolIndex),

    FieldRef {
        class: PoolIndex,
        name_and_type: PoolIndex,
    },
    MethodRef {
        class: PoolIndex,
        name_and_type: PoolIndex,
    },
    InterfaceMethodRef {
        class: PoolIndex,
        name_and_type: PoolIndex,
    },
    NameAndType {
        name: PoolIndex,
        ty: PoolIndex,
    },

    MethodHandle {
        kind: MethodHandleKind,
        index: PoolIndex,
    },
    InvokeDynamic {
        bootstrap_method_attr: PoolIndex,
        name_and_type: PoolIndex,
    },
}

impl Constant {
    pub fn as_utf8(&self) -> Option<&str> {
        match self {
            Constant::Utf8(data) => Some(data),
            _ => None,
        }
    }
}

/// A literal value a `ConstantValue` attribute can refer to.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
}

impl std::fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConstantValue::Int(val) => write!(f, "{}", val),
            ConstantValue::Long(val) => write!(f, "{}", val),
            ConstantValue::Float(val) => write!(f, "{}", val),
            ConstantValue::Double(val) => write!(f, "{}", val),
            ConstantValue::Str(val) => write!(f, "{}", val),
        }
    }
}

pub fn parse_constant(input: &mut ByteParser<'_>) -> ClassResult<Constant> {
    Ok(match input.parse_u8()? {
        CONSTANT_UTF8 => {
            let len = input.parse_u16()? as usize;
            Constant::Utf8(parse_mutf8(input.take(len)?)?)
        }
        CONSTANT_INTEGER => input.parse_i32().map(Constant::Integer)?,
        CONSTANT_FLOAT => input.parse_f32().map(Constant::Float)?,
        CONSTANT_LONG => input.parse_i64().map(Constant::Long)?,
        CONSTANT_DOUBLE => input.parse_f64().map(Constant::Double)?,

        CONSTANT_CLASS => input.parse_u16().map(|x| Constant::Class(x as usize))?,
        CONSTANT_STRING => input.parse_u16().map(|x| Constant::String(x as usize))?,
        CONSTANT_METHOD_TYPE => input
            .parse_u16()
            .map(|x| Constant::MethodType(x as usize))?,

        CONSTANT_FIELD_REF => Constant::FieldRef {
            class: input.parse_u16()? as usize,
            name_and_type: input.parse_u16()? as usize,
        },

        CONSTANT_METHOD_REF => Constant::MethodRef {
            class: input.parse_u16()? as usize,
            name_and_type: input.parse_u16()? as usize,
        },

        CONSTANT_INTERFACE_METHOD_REF => Constant::InterfaceMethodRef {
            class: input.parse_u16()? as usize,
            name_and_type: input.parse_u16()? as usize,
        },

        CONSTANT_NAME_AND_TYPE => Constant::NameAndType {
            name: input.parse_u16()? as usize,
            ty: input.parse_u16()? as usize,
        },

        CONSTANT_METHOD_HANDLE => Constant::MethodHandle {
            kind: MethodHandleKind::from(input.parse_u8()?)?,
            index: input.parse_u16()? as usize,
        },

        CONSTANT_INVOKE_DYNAMIC => Constant::InvokeDynamic {
            bootstrap_method_attr: input.parse_u16()? as usize,
            name_and_type: input.parse_u16()? as usize,
        },

        other => return Err(ClassError::UnknownConstantTag(other)),
    })
}

/// The class file's table of shared literals and symbolic references. Built
/// once per parsed file and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantPool {
    entries: Box<[Constant]>,
}

impl ConstantPool {
    pub fn parse(input: &mut ByteParser<'_>) -> ClassResult<ConstantPool> {
        let num_consts = match input.parse_u16()? as usize {
            0 => return Err(ClassError::ConstantPoolTooSmall),
            num => num - 1,
        };

        let mut entries = Vec::with_capacity(num_consts + 1);

        // First slot is unused. Everything uses 1-based indices into the pool.
        entries.push(Constant::Nothing);

        let mut cur = 0;
        while cur < num_consts {
            let constant = parse_constant(input)?;
            let is_double_wide = match constant {
                Constant::Long(_) | Constant::Double(_) => true,
                _ => false,
            };

            cur += 1;
            entries.push(constant);
            if is_double_wide {
                cur += 1;
                entries.push(Constant::Nothing);
            }
        }

        Ok(ConstantPool {
            entries: entries.into(),
        })
    }

    /// Number of slots, counting the reserved slot 0.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    pub fn get(&self, index: PoolIndex) -> ClassResult<&Constant> {
        self.entries
            .get(index)
            .ok_or(ClassError::InvalidPoolIndex(index))
    }

    /// Resolves the string stored at `index`. Errors if the index is out of
    /// range or the slot does not hold a `Utf8` entry.
    pub fn utf8(&self, index: PoolIndex) -> ClassResult<&str> {
        self.get(index)?
            .as_utf8()
            .ok_or(ClassError::InvalidPoolType(index))
    }

    /// Resolves a `Class` entry at `index` down to its internal name.
    pub fn class_name(&self, index: PoolIndex) -> ClassResult<&str> {
        match self.get(index)? {
            &Constant::Class(name) => self.utf8(name),
            _ => Err(ClassError::InvalidPoolType(index)),
        }
    }

    /// Resolves the literal stored at `index`, following the `String` → `Utf8`
    /// indirection. This is the lookup a `ConstantValue` attribute performs.
    pub fn value(&self, index: PoolIndex) -> ClassResult<ConstantValue> {
        Ok(match self.get(index)? {
            &Constant::Integer(val) => ConstantValue::Int(val),
            &Constant::Long(val) => ConstantValue::Long(val),
            &Constant::Float(val) => ConstantValue::Float(val),
            &Constant::Double(val) => ConstantValue::Double(val),
            &Constant::String(utf8) => ConstantValue::Str(self.utf8(utf8)?.to_owned()),
            _ => return Err(ClassError::InvalidPoolType(index)),
        })
    }
}

impl From<Vec<Constant>> for ConstantPool {
    /// Builds a pool directly from entries. Slot 0 must already hold the
    /// reserved placeholder; mainly useful for constructing pools in tests.
    fn from(entries: Vec<Constant>) -> Self {
        ConstantPool {
            entries: entries.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(entries: Vec<Constant>) -> ConstantPool {
        let mut all = vec![Constant::Nothing];
        all.extend(entries);
        ConstantPool::from(all)
    }

    #[test]
    fn test_parse_pool_long_takes_two_slots() {
        // count = 4: a Long (2 slots) followed by a Utf8
        let mut bytes = vec![0x00, 0x04];
        bytes.push(CONSTANT_LONG);
        bytes.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 42]);
        bytes.push(CONSTANT_UTF8);
        bytes.extend_from_slice(&[0x00, 0x02]);
        bytes.extend_from_slice(b"hi");

        let pool = ConstantPool::parse(&mut ByteParser::new(&bytes)).unwrap();
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.get(1), Ok(&Constant::Long(42)));
        assert_eq!(pool.get(2), Ok(&Constant::Nothing));
        assert_eq!(pool.utf8(3), Ok("hi"));
    }

    #[test]
    fn test_accessor_wrong_tag() {
        let pool = pool(vec![Constant::Integer(7)]);
        assert_eq!(pool.utf8(1), Err(ClassError::InvalidPoolType(1)));
        assert_eq!(pool.value(1), Ok(ConstantValue::Int(7)));
    }

    #[test]
    fn test_accessor_out_of_range() {
        let pool = pool(vec![]);
        assert_eq!(pool.utf8(3), Err(ClassError::InvalidPoolIndex(3)));
    }

    #[test]
    fn test_string_value_follows_indirection() {
        let pool = pool(vec![Constant::String(2), Constant::Utf8("max".into())]);
        assert_eq!(pool.value(1), Ok(ConstantValue::Str("max".into())));
    }

    #[test]
    fn test_class_name_follows_indirection() {
        let pool = pool(vec![
            Constant::Class(2),
            Constant::Utf8("java/lang/String".into()),
        ]);
        assert_eq!(pool.class_name(1), Ok("java/lang/String"));
    }
}

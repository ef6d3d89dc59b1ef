//! # Type descriptor grammar
//!
//! ```txt
//! field_type  := "[" field_type
//!              | "B" | "C" | "D" | "F" | "I" | "J" | "S" | "Z" | "V"
//!              | "L" <internal name> ";"
//!              ;
//! method_desc := "(" field_type* ")" field_type ;
//! ```
//!
//! `V` (void) only ever appears as a method return type.

use crate::{parse::ByteParser, ClassError, ClassResult};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Void,
    /// A reference type, holding the slash-separated internal name.
    Object(String),
}

impl BaseType {
    /// The single-character descriptor code, or `None` for object types.
    pub fn code(&self) -> Option<char> {
        Some(match self {
            BaseType::Byte => 'B',
            BaseType::Char => 'C',
            BaseType::Double => 'D',
            BaseType::Float => 'F',
            BaseType::Int => 'I',
            BaseType::Long => 'J',
            BaseType::Short => 'S',
            BaseType::Boolean => 'Z',
            BaseType::Void => 'V',
            BaseType::Object(_) => return None,
        })
    }

    pub fn keyword(&self) -> &str {
        match self {
            BaseType::Byte => "byte",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Short => "short",
            BaseType::Boolean => "boolean",
            BaseType::Void => "void",
            BaseType::Object(name) => name,
        }
    }
}

/// A parsed type descriptor: a base type wrapped in zero or more array
/// dimensions. Derived purely from the descriptor string, immutable.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Type {
    pub dimensions: usize,
    pub base: BaseType,
}

impl Type {
    /// Parses one complete field descriptor from the start of `descriptor`.
    /// Trailing input is ignored; callers slice method descriptors before
    /// handing the pieces here.
    pub fn parse(descriptor: &str) -> ClassResult<Type> {
        parse_type(&mut ByteParser::new(descriptor.as_bytes()))
    }

    /// The number of local-variable slots a value of this type occupies.
    /// `long` and `double` take two, everything else (arrays included) one.
    pub fn slot_width(&self) -> usize {
        match (self.dimensions, &self.base) {
            (0, BaseType::Long) | (0, BaseType::Double) => 2,
            _ => 1,
        }
    }

    pub fn is_void(&self) -> bool {
        self.dimensions == 0 && self.base == BaseType::Void
    }

    /// Re-renders the canonical internal form, e.g. `[[Ljava/lang/String;`.
    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        for _ in 0..self.dimensions {
            out.push('[');
        }
        match &self.base {
            BaseType::Object(name) => {
                out.push('L');
                out.push_str(name);
                out.push(';');
            }
            other => out.push(other.code().unwrap_or('?')),
        }
        out
    }
}

impl std::fmt::Display for Type {
    /// The human-readable rendering: `int[]`, `java.lang.String`.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.base {
            BaseType::Object(name) => {
                let mut segments = name.split('/');
                if let Some(first) = segments.next() {
                    write!(f, "{}", first)?;
                }
                for segment in segments {
                    write!(f, ".{}", segment)?;
                }
            }
            other => write!(f, "{}", other.keyword())?,
        }

        for _ in 0..self.dimensions {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

pub(crate) fn parse_type(input: &mut ByteParser<'_>) -> ClassResult<Type> {
    let mut dimensions = 0;
    while input.peek(1).map(|b| b[0] == b'[').unwrap_or(false) {
        input.take(1)?;
        dimensions += 1;
    }

    let base = match input.parse_u8()? {
        b'B' => BaseType::Byte,
        b'C' => BaseType::Char,
        b'D' => BaseType::Double,
        b'F' => BaseType::Float,
        b'I' => BaseType::Int,
        b'J' => BaseType::Long,
        b'S' => BaseType::Short,
        b'Z' => BaseType::Boolean,
        b'V' => BaseType::Void,
        b'L' => {
            let name = input
                .take_while(|ch| ch != b';')
                .map_err(|_| ClassError::UnterminatedObjectType)?;
            // The input came from a str, so this cannot actually fail
            let name = std::str::from_utf8(name)
                .map_err(|_| ClassError::UnterminatedObjectType)?;
            BaseType::Object(name.to_owned())
        }
        other => return Err(ClassError::BadDescriptorType(other as char)),
    };

    Ok(Type { dimensions, base })
}

/// A parsed method descriptor: the ordered parameter types and the return
/// type.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MethodDescriptor {
    pub params: Vec<Type>,
    pub ret: Type,
}

impl MethodDescriptor {
    /// Parses a full method descriptor such as `(IJLfoo/Bar;)V`. The
    /// parenthesized parameter run and the trailing return type are each
    /// parsed with the field-type grammar; `void` is rejected in parameter
    /// position.
    pub fn parse(descriptor: &str) -> ClassResult<MethodDescriptor> {
        let mut input = ByteParser::new(descriptor.as_bytes());
        input.expect(b"(")?;

        let mut params = Vec::new();
        while input.peek(1)?[0] != b')' {
            let ty = parse_type(&mut input)?;
            if ty.base == BaseType::Void {
                return Err(ClassError::VoidParameter);
            }
            params.push(ty);
        }

        input.expect(b")")?;
        let ret = parse_type(&mut input)?;

        Ok(MethodDescriptor { params, ret })
    }

    /// Assigns each parameter its local-variable slot. Slot numbering starts
    /// at 0 for static methods and at 1 otherwise (slot 0 holds the implicit
    /// receiver), and `long`/`double` parameters advance the counter by two.
    pub fn param_slots(&self, is_static: bool) -> Vec<usize> {
        let mut slots = Vec::with_capacity(self.params.len());
        let mut next = if is_static { 0 } else { 1 };
        for param in &self.params {
            slots.push(next);
            next += param.slot_width();
        }
        slots
    }
}

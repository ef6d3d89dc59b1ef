//! Access-flag constants and the small slice of them the model cares about.
//! Flag combinations are not validated here; metadata extraction only needs
//! to read the bits that are set.

/// Marked or implicitly public in source.
pub const ACC_PUBLIC: u16 = 0x0001;
/// Marked private in source.
pub const ACC_PRIVATE: u16 = 0x0002;
/// Marked protected in source.
pub const ACC_PROTECTED: u16 = 0x0004;
/// Declared static.
pub const ACC_STATIC: u16 = 0x0008;
/// Declared final; must not be overridden.
pub const ACC_FINAL: u16 = 0x0010;
/// Declared abstract; no implementation is provided.
pub const ACC_ABSTRACT: u16 = 0x0400;
/// Is an interface, not a class.
pub const ACC_INTERFACE: u16 = 0x0200;
/// Declared as an enum type.
pub const ACC_ENUM: u16 = 0x4000;
/// Declared as an annotation type.
pub const ACC_ANNOTATION: u16 = 0x2000;
/// Declared synthetic; not present in the source code.
pub const ACC_SYNTHETIC: u16 = 0x1000;
/// Declared native; implemented in a language other than Java.
pub const ACC_NATIVE: u16 = 0x0100;

/// The declared visibility of a class or member.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Scope {
    /// Package-private; no modifier in source.
    Default,
    Public,
    Private,
    Protected,
}

impl Scope {
    pub fn from_flags(flags: u16) -> Scope {
        if flags & ACC_PUBLIC != 0 {
            Scope::Public
        } else if flags & ACC_PROTECTED != 0 {
            Scope::Protected
        } else if flags & ACC_PRIVATE != 0 {
            Scope::Private
        } else {
            Scope::Default
        }
    }

    /// The source keyword, or the empty string for package-private.
    pub fn keyword(self) -> &'static str {
        match self {
            Scope::Default => "",
            Scope::Public => "public",
            Scope::Private => "private",
            Scope::Protected => "protected",
        }
    }
}

impl Default for Scope {
    fn default() -> Scope {
        Scope::Default
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

pub fn is_static(flags: u16) -> bool {
    flags & ACC_STATIC != 0
}

pub fn is_final(flags: u16) -> bool {
    flags & ACC_FINAL != 0
}

pub fn is_abstract(flags: u16) -> bool {
    flags & ACC_ABSTRACT != 0
}

pub fn is_interface(flags: u16) -> bool {
    flags & ACC_INTERFACE != 0
}

pub fn is_enum(flags: u16) -> bool {
    flags & ACC_ENUM != 0
}

pub fn is_synthetic(flags: u16) -> bool {
    flags & ACC_SYNTHETIC != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_from_flags() {
        assert_eq!(Scope::from_flags(ACC_PUBLIC | ACC_STATIC), Scope::Public);
        assert_eq!(Scope::from_flags(ACC_PROTECTED), Scope::Protected);
        assert_eq!(Scope::from_flags(ACC_PRIVATE | ACC_FINAL), Scope::Private);
        assert_eq!(Scope::from_flags(ACC_STATIC), Scope::Default);
    }
}

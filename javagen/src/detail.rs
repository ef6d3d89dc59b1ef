use std::collections::HashMap;
use std::sync::Arc;

/// A package path + simple name pair acting as a value-typed class identity.
/// Two details with the same full internal name are interchangeable.
#[derive(Clone, Debug)]
pub struct ClassDetail {
    /// Slash-separated package path, empty for the default package.
    pub package: String,
    /// The simple name, e.g. `Drive`.
    pub name: String,
    /// The full slash-separated internal form, e.g. `ler/robot/subsystems/Drive`.
    pub full: String,
}

impl ClassDetail {
    pub fn from_internal(full: &str) -> ClassDetail {
        let (package, name) = match full.rfind('/') {
            Some(pos) => (&full[..pos], &full[pos + 1..]),
            None => ("", full),
        };

        ClassDetail {
            package: package.to_owned(),
            name: name.to_owned(),
            full: full.to_owned(),
        }
    }

    /// The dotted display form, e.g. `ler.robot.subsystems.Drive`.
    pub fn dotted(&self) -> String {
        self.full.replace('/', ".")
    }
}

// Package and simple name are derived from `full`, so identity is the full
// name alone.
impl PartialEq for ClassDetail {
    fn eq(&self, other: &ClassDetail) -> bool {
        self.full == other.full
    }
}

impl Eq for ClassDetail {}

impl std::hash::Hash for ClassDetail {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.full.hash(state);
    }
}

impl std::fmt::Display for ClassDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

/// Memoizes [`ClassDetail`] resolution per distinct full name, so every
/// element of one loaded class shares a single instance. Scoped to one load;
/// no process-wide registry.
#[derive(Default)]
pub struct DetailInterner {
    cache: HashMap<String, Arc<ClassDetail>>,
}

impl DetailInterner {
    pub fn new() -> DetailInterner {
        DetailInterner::default()
    }

    pub fn resolve(&mut self, internal: &str) -> Arc<ClassDetail> {
        if let Some(detail) = self.cache.get(internal) {
            return detail.clone();
        }

        let detail = Arc::new(ClassDetail::from_internal(internal));
        self.cache.insert(internal.to_owned(), detail.clone());
        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_internal() {
        let detail = ClassDetail::from_internal("ler/robot/subsystems/Drive");
        assert_eq!(detail.package, "ler/robot/subsystems");
        assert_eq!(detail.name, "Drive");
        assert_eq!(detail.dotted(), "ler.robot.subsystems.Drive");
    }

    #[test]
    fn test_default_package() {
        let detail = ClassDetail::from_internal("Main");
        assert_eq!(detail.package, "");
        assert_eq!(detail.name, "Main");
        assert_eq!(detail.dotted(), "Main");
    }

    #[test]
    fn test_interner_shares_instances() {
        let mut interner = DetailInterner::new();
        let a = interner.resolve("java/lang/String");
        let b = interner.resolve("java/lang/String");
        assert!(Arc::ptr_eq(&a, &b));
    }
}

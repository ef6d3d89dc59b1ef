//! File-system entry points for the read path.

use crate::class::JavaClass;
use crate::Result;
use classfile::class::ClassFile;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reads and resolves a single class file.
pub fn load_class(path: &Path) -> Result<JavaClass> {
    let bytes = fs::read(path)?;
    let file = ClassFile::parse(bytes)?;
    JavaClass::from_file(&file)
}

/// Loads every `.class` file under `root`. Each file gets its own result:
/// one malformed or unreadable class never aborts its siblings, it is
/// reported in place and logged.
pub fn load_directory(root: &Path) -> Vec<(PathBuf, Result<JavaClass>)> {
    let mut results = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("class") {
            continue;
        }

        let result = load_class(path);
        if let Err(err) = &result {
            log::warn!("failed to load {}: {}", path.display(), err);
        }
        results.push((path.to_owned(), result));
    }

    results
}

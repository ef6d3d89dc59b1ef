//! Semantic model over parsed class files, plus a Java source generator.
//!
//! The read path turns a [`classfile::class::ClassFile`] into a [`JavaClass`]:
//! resolved names, structured types, parameter names and line numbers pulled
//! out of debug attributes. The write path goes the other way, rendering a
//! declarative [`builder::ClassBuilder`] description into formatted Java
//! source and persisting it under a package directory tree.
//!
//! [`JavaClass`]: class::JavaClass

pub mod builder;
pub mod class;
pub mod detail;
pub mod element;
pub mod loader;
pub mod print;
pub mod style;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("class file error: {0}")]
    Class(#[from] classfile::ClassError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

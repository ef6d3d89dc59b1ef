//! Aggregation of a parsed class file into one [`JavaClass`].

use crate::detail::{ClassDetail, DetailInterner};
use crate::element::{JavaField, JavaMethod};
use crate::Result;
use classfile::{
    access::{self, Scope},
    attribute::{self, Handlers},
    class::ClassFile,
};
use std::sync::Arc;

/// The fully resolved view of one class file: identity, hierarchy, and its
/// ordered fields and methods. Read-only once built.
#[derive(Clone, Debug)]
pub struct JavaClass {
    pub detail: Arc<ClassDetail>,
    pub superclass: Arc<ClassDetail>,
    pub interfaces: Vec<Arc<ClassDetail>>,

    pub fields: Vec<JavaField>,
    pub methods: Vec<JavaMethod>,

    pub scope: Scope,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_interface: bool,
    pub is_enum: bool,

    /// From the `SourceFile` attribute, when the compiler emitted one.
    pub source_file: Option<String>,
    /// Simple names of member classes listed in the `InnerClasses` attribute.
    pub inner_classes: Vec<String>,
}

impl JavaClass {
    /// Builds the semantic model. A field or method that fails to resolve is
    /// dropped with a warning; the rest of the class still loads.
    pub fn from_file(file: &ClassFile) -> Result<JavaClass> {
        let mut interner = DetailInterner::new();

        let detail = interner.resolve(file.pool.class_name(file.this_class)?);
        let superclass = match file.super_class {
            // Only java/lang/Object itself has no superclass entry
            0 => interner.resolve("java/lang/Object"),
            index => interner.resolve(file.pool.class_name(index)?),
        };

        let mut interfaces = Vec::with_capacity(file.interfaces.len());
        for &index in file.interfaces.iter() {
            interfaces.push(interner.resolve(file.pool.class_name(index)?));
        }

        let mut fields = Vec::with_capacity(file.fields.len());
        for info in file.fields.iter() {
            match JavaField::new(file, detail.clone(), info) {
                Ok(field) => fields.push(field),
                Err(err) => log::warn!("dropping field of {}: {}", detail.dotted(), err),
            }
        }

        let mut methods = Vec::with_capacity(file.methods.len());
        for info in file.methods.iter() {
            match JavaMethod::new(file, detail.clone(), info) {
                Ok(method) => methods.push(method),
                Err(err) => log::warn!("dropping method of {}: {}", detail.dotted(), err),
            }
        }

        let mut source_file = None;
        let mut inner_classes = Vec::new();
        {
            let pool = &file.pool;
            let mut handlers = Handlers::new()
                .on("SourceFile", |input| {
                    let index = attribute::parse_source_file(input)?;
                    source_file = Some(pool.utf8(index)?.to_owned());
                    Ok(())
                })
                .on("InnerClasses", |input| {
                    for inner in attribute::parse_inner_classes(input)?.iter() {
                        if let Some(name) = inner.name {
                            inner_classes.push(pool.utf8(name)?.to_owned());
                        }
                    }
                    Ok(())
                });
            attribute::dispatch(pool, &file.attributes, &mut handlers)?;
        }

        Ok(JavaClass {
            detail,
            superclass,
            interfaces,
            fields,
            methods,
            scope: Scope::from_flags(file.access_flags),
            is_final: access::is_final(file.access_flags),
            is_abstract: access::is_abstract(file.access_flags),
            is_interface: access::is_interface(file.access_flags),
            is_enum: access::is_enum(file.access_flags),
            source_file,
            inner_classes,
        })
    }
}

//! Semantic field and method models, built from raw member records plus the
//! constant pool and attribute dispatcher.

use crate::detail::ClassDetail;
use crate::Result;
use classfile::{
    access::{self, Scope},
    attribute::{self, Handlers, LocalVariable},
    class::ClassFile,
    constant::{ConstantPool, ConstantValue, PoolIndex},
    descriptor::{MethodDescriptor, Type},
    field::FieldInfo,
    method::MethodInfo,
};
use std::sync::Arc;

/// The parts a field and a method share. Identity is structural: two elements
/// with the same (parent class, name, descriptor) are the same element no
/// matter where they were constructed.
#[derive(Clone, Debug)]
pub struct Element {
    pub name: String,
    pub descriptor: String,
    pub parent: Arc<ClassDetail>,
    pub scope: Scope,
    pub is_static: bool,
    pub is_final: bool,
}

impl Element {
    fn resolve(
        pool: &ConstantPool,
        parent: Arc<ClassDetail>,
        access_flags: u16,
        name: PoolIndex,
        descriptor: PoolIndex,
    ) -> Result<Element> {
        Ok(Element {
            name: pool.utf8(name)?.to_owned(),
            descriptor: pool.utf8(descriptor)?.to_owned(),
            parent,
            scope: Scope::from_flags(access_flags),
            is_static: access::is_static(access_flags),
            is_final: access::is_final(access_flags),
        })
    }

    /// The `public static final ` prefix, empty for a bare package-private
    /// member. Always ends with a space when non-empty.
    pub fn modifiers(&self) -> String {
        let mut out = String::new();
        if self.scope != Scope::Default {
            out.push_str(self.scope.keyword());
            out.push(' ');
        }
        if self.is_static {
            out.push_str("static ");
        }
        if self.is_final {
            out.push_str("final ");
        }
        out
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Element) -> bool {
        self.parent.full == other.parent.full
            && self.name == other.name
            && self.descriptor == other.descriptor
    }
}

impl Eq for Element {}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{}{}", self.parent.dotted(), self.name, self.descriptor)
    }
}

/// A field of a loaded class.
#[derive(Clone, Debug, PartialEq)]
pub struct JavaField {
    pub element: Element,
    pub ty: Type,
    /// Present only when the field carries a `ConstantValue` attribute,
    /// i.e. `static final` primitives and strings.
    pub constant: Option<ConstantValue>,
}

impl JavaField {
    pub fn new(file: &ClassFile, parent: Arc<ClassDetail>, info: &FieldInfo) -> Result<JavaField> {
        let element = Element::resolve(
            &file.pool,
            parent,
            info.access_flags,
            info.name,
            info.descriptor,
        )?;
        let ty = Type::parse(&element.descriptor)?;

        let mut constant = None;
        {
            let pool = &file.pool;
            let mut handlers = Handlers::new().on("ConstantValue", |input| {
                constant = Some(pool.value(attribute::parse_constant_value(input)?)?);
                Ok(())
            });
            attribute::dispatch(pool, &info.attributes, &mut handlers)?;
        }

        Ok(JavaField {
            element,
            ty,
            constant,
        })
    }

    /// `int MAX_SPEED=5`: the declared type and name, with the constant
    /// value appended for final constants.
    pub fn pretty_name(&self) -> String {
        let mut out = format!("{} {}", self.ty, self.element.name);
        if self.element.is_final {
            if let Some(value) = &self.constant {
                out.push('=');
                out.push_str(&value.to_string());
            }
        }
        out
    }

    /// The pretty name with modifiers in front, e.g.
    /// `public static final int MAX_SPEED=5`.
    pub fn full_pretty_name(&self) -> String {
        format!("{}{}", self.element.modifiers(), self.pretty_name())
    }
}

/// One declared method parameter. The name stays empty when the class was
/// compiled without a local-variable table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodParam {
    pub name: String,
    pub ty: Type,
}

/// A method of a loaded class.
#[derive(Clone, Debug, PartialEq)]
pub struct JavaMethod {
    pub element: Element,
    pub params: Vec<MethodParam>,
    pub ret: Type,
    /// Source line of the declaration, or -1 when no `LineNumberTable` was
    /// present.
    pub start_line: i32,
    pretty: String,
}

impl JavaMethod {
    pub fn new(file: &ClassFile, parent: Arc<ClassDetail>, info: &MethodInfo) -> Result<JavaMethod> {
        let element = Element::resolve(
            &file.pool,
            parent,
            info.access_flags,
            info.name,
            info.descriptor,
        )?;
        let descriptor = MethodDescriptor::parse(&element.descriptor)?;

        // Collect the debug tables out of the nested Code attribute. Both are
        // optional; stripped debug info just means reduced fidelity.
        let mut first_line: Option<u16> = None;
        let mut variables: Vec<LocalVariable> = Vec::new();
        {
            let pool = &file.pool;
            let mut handlers = Handlers::new().on("Code", |input| {
                let code = attribute::parse_code(input)?;
                let mut nested = Handlers::new()
                    .on("LineNumberTable", |input| {
                        let table = attribute::parse_line_number_table(input)?;
                        first_line = table.first().map(|entry| entry.line);
                        Ok(())
                    })
                    .on("LocalVariableTable", |input| {
                        variables = attribute::parse_local_variable_table(input)?.into_vec();
                        Ok(())
                    });
                attribute::dispatch(pool, &code.attributes, &mut nested)
            });
            attribute::dispatch(pool, &info.attributes, &mut handlers)?;
        }

        let params = resolve_params(&file.pool, &descriptor, element.is_static, &variables)?;

        // The first table entry points at the first instruction, one line
        // past the declaration itself.
        let start_line = first_line.map(|line| line as i32 - 1).unwrap_or(-1);

        let pretty = pretty_signature(&element.name, &params, &descriptor.ret);

        Ok(JavaMethod {
            element,
            params,
            ret: descriptor.ret,
            start_line,
            pretty,
        })
    }

    /// `drive(double, double)=>boolean`, memoized at construction.
    pub fn pretty_name(&self) -> &str {
        &self.pretty
    }

    /// The pretty signature with modifiers in front.
    pub fn full_pretty_name(&self) -> String {
        format!("{}{}", self.element.modifiers(), self.pretty)
    }
}

/// First pass derives the ordered parameter list and slot assignment from the
/// descriptor alone; second pass fills in names from local-variable entries
/// that are live at offset 0 and are not the implicit receiver.
fn resolve_params(
    pool: &ConstantPool,
    descriptor: &MethodDescriptor,
    is_static: bool,
    variables: &[LocalVariable],
) -> Result<Vec<MethodParam>> {
    let slots = descriptor.param_slots(is_static);
    let mut params: Vec<MethodParam> = descriptor
        .params
        .iter()
        .map(|ty| MethodParam {
            name: String::new(),
            ty: ty.clone(),
        })
        .collect();

    for var in variables {
        if var.start_pc != 0 {
            // Declared inside the body, not a parameter
            continue;
        }
        let name = pool.utf8(var.name)?;
        if name == "this" {
            continue;
        }
        if let Some(position) = slots.iter().position(|&slot| slot == var.slot as usize) {
            params[position].name = name.to_owned();
        }
    }

    Ok(params)
}

fn pretty_signature(name: &str, params: &[MethodParam], ret: &Type) -> String {
    let mut out = format!("{}(", name);
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&param.ty.to_string());
    }
    out.push(')');
    if !ret.is_void() {
        out.push_str("=>");
        out.push_str(&ret.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(full: &str) -> Arc<ClassDetail> {
        Arc::new(ClassDetail::from_internal(full))
    }

    fn element(parent: &str, name: &str, descriptor: &str) -> Element {
        Element {
            name: name.to_owned(),
            descriptor: descriptor.to_owned(),
            parent: detail(parent),
            scope: Scope::Public,
            is_static: false,
            is_final: false,
        }
    }

    #[test]
    fn test_structural_equality() {
        let a = element("ler/robot/Drive", "stop", "()V");
        let b = element("ler/robot/Drive", "stop", "()V");
        assert_eq!(a, b);
        assert_ne!(a, element("ler/robot/Arm", "stop", "()V"));
        assert_ne!(a, element("ler/robot/Drive", "stop", "(I)V"));
    }

    #[test]
    fn test_element_display() {
        let e = element("ler/robot/Drive", "stop", "()V");
        assert_eq!(e.to_string(), "ler.robot.Drive.stop()V");
    }

    #[test]
    fn test_modifiers_ordering() {
        let mut e = element("a/B", "x", "I");
        e.scope = Scope::Public;
        e.is_static = true;
        e.is_final = true;
        assert_eq!(e.modifiers(), "public static final ");

        e.scope = Scope::Default;
        e.is_static = false;
        e.is_final = false;
        assert_eq!(e.modifiers(), "");
    }

    #[test]
    fn test_pretty_signature_void() {
        let params = vec![
            MethodParam {
                name: String::new(),
                ty: Type::parse("I").unwrap(),
            },
            MethodParam {
                name: String::new(),
                ty: Type::parse("Ljava/lang/String;").unwrap(),
            },
        ];
        let ret = Type::parse("V").unwrap();
        assert_eq!(
            pretty_signature("configure", &params, &ret),
            "configure(int, java.lang.String)"
        );
    }

    #[test]
    fn test_pretty_signature_with_return() {
        let ret = Type::parse("Z").unwrap();
        assert_eq!(pretty_signature("isFinished", &[], &ret), "isFinished()=>boolean");
    }
}

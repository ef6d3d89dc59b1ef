//! Declarative class descriptions rendered to formatted Java source.
//!
//! The description is built fresh per generation request, rendered with
//! [`ClassBuilder::render`], and persisted with [`ClassBuilder::write`].
//! Rendering is pure: the same description always produces byte-identical
//! text.

use crate::Result;
use classfile::access::Scope;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const INDENT: &str = "    ";

/// A type as it appears in generated source: the simple name to write, plus
/// the import needed to make that name resolve. Primitives, same-package and
/// already-visible types carry no import.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct TypeTag {
    pub import: Option<String>,
    pub name: String,
    pub is_array: bool,
}

impl TypeTag {
    pub fn new(name: &str) -> TypeTag {
        TypeTag {
            import: None,
            name: name.to_owned(),
            is_array: false,
        }
    }

    /// A type referenced through an import, e.g.
    /// `TypeTag::imported("ler.robot.subsystems.Drive", "Drive")`.
    pub fn imported(import: &str, name: &str) -> TypeTag {
        TypeTag {
            import: Some(import.to_owned()),
            name: name.to_owned(),
            is_array: false,
        }
    }

    /// Splits a dotted fully-qualified name into an import + simple name.
    pub fn from_qualified(qualified: &str) -> TypeTag {
        match qualified.rfind('.') {
            Some(pos) => TypeTag::imported(qualified, &qualified[pos + 1..]),
            None => TypeTag::new(qualified),
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_array {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Field {
    pub ty: TypeTag,
    pub name: String,
    pub scope: Scope,
    pub doc: Option<String>,
    pub is_static: bool,
    pub is_final: bool,
    /// Initializer expression, rendered as ` = <init>` when present.
    pub init: Option<String>,
}

impl Field {
    pub fn new(ty: TypeTag, name: &str, scope: Scope) -> Field {
        Field {
            ty,
            name: name.to_owned(),
            scope,
            ..Field::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MethodParam {
    pub ty: TypeTag,
    pub name: String,
    pub doc: Option<String>,
}

impl MethodParam {
    pub fn new(ty: TypeTag, name: &str) -> MethodParam {
        MethodParam {
            ty,
            name: name.to_owned(),
            doc: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Method {
    /// `None` renders as `void`, unless `name` is also `None`, which makes
    /// the whole method a constructor.
    pub ret: Option<TypeTag>,
    pub name: Option<String>,
    pub params: Vec<MethodParam>,
    pub scope: Scope,
    pub doc: Option<String>,
    pub is_static: bool,
    pub is_final: bool,
    /// `None` renders a bodyless signature terminated with `;`.
    pub body: Option<String>,
    /// Annotation names rendered one per line above the method, `@`-prefixed.
    pub annotations: Vec<String>,
}

impl Method {
    pub fn constructor(params: Vec<MethodParam>, scope: Scope, body: &str) -> Method {
        Method {
            params,
            scope,
            body: Some(body.to_owned()),
            ..Method::default()
        }
    }
}

/// A full class description: everything needed to render one `.java` file.
#[derive(Clone, Debug, Default)]
pub struct ClassBuilder {
    pub package: String,
    pub name: String,
    pub scope: Scope,
    pub doc: Option<String>,
    pub superclass: Option<TypeTag>,
    pub interfaces: Vec<TypeTag>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

impl ClassBuilder {
    pub fn new(package: &str, name: &str, scope: Scope) -> ClassBuilder {
        ClassBuilder {
            package: package.to_owned(),
            name: name.to_owned(),
            scope,
            ..ClassBuilder::default()
        }
    }

    /// Every distinct import the description pulls in, sorted.
    fn imports(&self) -> BTreeSet<&str> {
        let mut tags: Vec<&TypeTag> = Vec::new();
        tags.extend(self.superclass.iter());
        tags.extend(self.interfaces.iter());
        tags.extend(self.fields.iter().map(|field| &field.ty));
        for method in &self.methods {
            tags.extend(method.ret.iter());
            tags.extend(method.params.iter().map(|param| &param.ty));
        }

        tags.into_iter()
            .filter_map(|tag| tag.import.as_deref())
            .collect()
    }

    /// Renders the complete source text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("package {};\n\n", self.package));

        let imports = self.imports();
        if !imports.is_empty() {
            for import in &imports {
                out.push_str(&format!("import {};\n", import));
            }
            out.push('\n');
        }

        render_doc(&mut out, self.doc.as_deref(), "");

        if self.scope != Scope::Default {
            out.push_str(self.scope.keyword());
            out.push(' ');
        }
        out.push_str("class ");
        out.push_str(&self.name);
        if let Some(superclass) = &self.superclass {
            out.push_str(&format!(" extends {}", superclass));
        }
        if !self.interfaces.is_empty() {
            out.push_str(" implements ");
            for (i, interface) in self.interfaces.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&interface.to_string());
            }
        }
        out.push_str(" {\n");

        for field in &self.fields {
            out.push('\n');
            self.render_field(&mut out, field);
        }

        for method in &self.methods {
            out.push('\n');
            self.render_method(&mut out, method);
        }

        out.push_str("}\n");
        out
    }

    fn render_field(&self, out: &mut String, field: &Field) {
        render_doc(out, field.doc.as_deref(), INDENT);

        out.push_str(INDENT);
        push_modifiers(out, field.scope, field.is_static, field.is_final);
        out.push_str(&format!("{} {}", field.ty, field.name));
        if let Some(init) = &field.init {
            out.push_str(&format!(" = {}", init));
        }
        out.push_str(";\n");
    }

    fn render_method(&self, out: &mut String, method: &Method) {
        render_doc(out, method.doc.as_deref(), INDENT);

        for annotation in &method.annotations {
            out.push_str(&format!("{}@{}\n", INDENT, annotation));
        }

        out.push_str(INDENT);
        push_modifiers(out, method.scope, method.is_static, method.is_final);

        match (&method.ret, &method.name) {
            // Constructor: no return type, named after the class
            (None, None) => out.push_str(&self.name),
            (ret, Some(name)) => {
                match ret {
                    Some(ty) => out.push_str(&ty.to_string()),
                    None => out.push_str("void"),
                }
                out.push(' ');
                out.push_str(name);
            }
            // A named return type without a name still renders a constructor;
            // the description is degenerate but the output stays valid
            (Some(_), None) => out.push_str(&self.name),
        }

        out.push('(');
        for (i, param) in method.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&format!("{} {}", param.ty, param.name));
        }
        out.push(')');

        match &method.body {
            None => out.push_str(";\n"),
            Some(body) => {
                out.push_str(" {\n");
                for line in body.trim_end().lines() {
                    if line.is_empty() {
                        out.push('\n');
                    } else {
                        out.push_str(&format!("{}{}{}\n", INDENT, INDENT, line));
                    }
                }
                out.push_str(INDENT);
                out.push_str("}\n");
            }
        }
    }

    /// Renders the class and writes it to
    /// `<base>/<package as directories>/<Name>.java`, creating directories as
    /// needed. The file appears fully written or not at all: the text goes to
    /// a temporary file in the target directory first and is renamed over the
    /// final path.
    pub fn write(&self, base: &Path) -> Result<PathBuf> {
        let dir = base.join(self.package.replace('.', "/"));
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.java", self.name));
        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        file.write_all(self.render().as_bytes())?;
        file.persist(&path).map_err(|err| err.error)?;

        Ok(path)
    }
}

fn push_modifiers(out: &mut String, scope: Scope, is_static: bool, is_final: bool) {
    if scope != Scope::Default {
        out.push_str(scope.keyword());
        out.push(' ');
    }
    if is_static {
        out.push_str("static ");
    }
    if is_final {
        out.push_str("final ");
    }
}

fn render_doc(out: &mut String, doc: Option<&str>, indent: &str) {
    let doc = match doc {
        Some(doc) if !doc.trim().is_empty() => doc,
        _ => return,
    };

    out.push_str(indent);
    out.push_str("/**\n");
    for line in doc.trim_end().lines() {
        if line.is_empty() {
            out.push_str(&format!("{} *\n", indent));
        } else {
            out.push_str(&format!("{} * {}\n", indent, line));
        }
    }
    out.push_str(indent);
    out.push_str(" */\n");
}

//! Styled terminal rendering of a loaded class, declaration-first like a
//! javap listing.

use crate::class::JavaClass;
use crate::style::style;

fn pad(count: usize) {
    for _ in 0..count {
        print!("  ");
    }
}

fn print_class_decl(class: &JavaClass) {
    if class.scope != classfile::access::Scope::Default {
        print!("{} ", style("access").paint(class.scope.keyword()));
    }

    if class.is_enum {
        print!("{} ", style("keyword").paint("enum"));
    } else if class.is_interface {
        print!("{} ", style("keyword").paint("interface"));
    } else {
        if class.is_final {
            print!("{} ", style("access").paint("final"));
        } else if class.is_abstract {
            print!("{} ", style("access").paint("abstract"));
        }
        print!("{} ", style("keyword").paint("class"));
    }

    print!("{}", style("class.name").paint(class.detail.dotted()));

    match class.superclass.full.as_str() {
        "java/lang/Object" | "java/lang/Enum" => {}
        _ => print!(
            " {} {}",
            style("extends").paint("extends"),
            style("class.name").paint(class.superclass.dotted())
        ),
    }

    if !class.interfaces.is_empty() {
        print!(" {} ", style("extends").paint("implements"));
        for (i, interface) in class.interfaces.iter().enumerate() {
            if i > 0 {
                print!(", ");
            }
            print!("{}", style("class.name").paint(interface.dotted()));
        }
    }
}

pub fn print_class(class: &JavaClass) {
    if let Some(source) = &class.source_file {
        println!("{}", style("comment").paint(format!("// compiled from {}", source)));
    }

    print_class_decl(class);
    println!(" {{");

    for field in &class.fields {
        pad(1);
        println!("{};", style("member").paint(field.full_pretty_name()));
    }

    if !class.fields.is_empty() && !class.methods.is_empty() {
        println!();
    }

    for method in &class.methods {
        pad(1);
        print!("{};", style("member").paint(method.full_pretty_name()));
        if method.start_line >= 0 {
            print!(
                " {}",
                style("comment").paint(format!("// line {}", method.start_line))
            );
        }
        println!();
    }

    for inner in &class.inner_classes {
        pad(1);
        println!(
            "{}",
            style("comment").paint(format!("// inner class {}", inner))
        );
    }

    println!("}}");
}

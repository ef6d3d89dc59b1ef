//! End-to-end checks of the semantic model built from in-memory class files.

mod common;

use classfile::access::{ACC_FINAL, ACC_PUBLIC, ACC_STATIC};
use classfile::attribute::AttributeInfo;
use classfile::class::{ClassFile, Version};
use classfile::constant::{Constant, ConstantPool};
use classfile::field::FieldInfo;
use classfile::method::MethodInfo;
use common::Bytes;
use javagen::class::JavaClass;

fn utf8(text: &str) -> Constant {
    Constant::Utf8(text.to_owned())
}

fn class_file(
    pool: Vec<Constant>,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
) -> ClassFile {
    let mut entries = vec![
        Constant::Nothing,
        utf8("ler/robot/subsystems/Drive"),
        Constant::Class(1),
        utf8("java/lang/Object"),
        Constant::Class(3),
    ];
    entries.extend(pool);

    ClassFile {
        version: Version {
            major: 52,
            minor: 0,
        },
        pool: ConstantPool::from(entries),
        access_flags: ACC_PUBLIC,
        this_class: 2,
        super_class: 4,
        interfaces: Box::new([]),
        fields: fields.into(),
        methods: methods.into(),
        attributes: Box::new([]),
    }
}

#[test]
fn constant_field_pretty_name() {
    // Pool slots 5.. : name, descriptor, "ConstantValue", the value itself
    let file = class_file(
        vec![
            utf8("MAX_SPEED"),
            utf8("I"),
            utf8("ConstantValue"),
            Constant::Integer(5),
        ],
        vec![FieldInfo {
            access_flags: ACC_PUBLIC | ACC_STATIC | ACC_FINAL,
            name: 5,
            descriptor: 6,
            attributes: Box::new([AttributeInfo {
                name: 7,
                data: {
                    let mut out = Bytes::new();
                    out.u16(8);
                    out.0.into()
                },
            }]),
        }],
        vec![],
    );

    let class = JavaClass::from_file(&file).unwrap();
    assert_eq!(class.detail.dotted(), "ler.robot.subsystems.Drive");
    assert_eq!(class.superclass.full, "java/lang/Object");
    assert_eq!(class.fields.len(), 1);

    let field = &class.fields[0];
    assert_eq!(field.pretty_name(), "int MAX_SPEED=5");
    assert_eq!(
        field.full_pretty_name(),
        "public static final int MAX_SPEED=5"
    );
}

#[test]
fn method_params_named_from_local_variable_table() {
    // drive(double speed, double rotation): doubles take two slots each, so
    // with the implicit receiver the slots are 1 and 3.
    let line_table = {
        let mut out = Bytes::new();
        out.u16(1).u16(0).u16(43);
        out.0
    };
    let local_table = {
        let mut out = Bytes::new();
        out.u16(3);
        out.u16(0).u16(1).u16(10).u16(13).u16(0); // this
        out.u16(0).u16(1).u16(11).u16(14).u16(1); // speed
        out.u16(0).u16(1).u16(12).u16(14).u16(3); // rotation
        out.0
    };
    let code = {
        let mut out = Bytes::new();
        out.u16(2).u16(5); // max_stack, max_locals
        out.u32(1).u8(0xB1); // one return instruction
        out.u16(0); // no exception handlers
        out.u16(2); // two nested attributes
        out.u16(8).u32(line_table.len() as u32).raw(&line_table);
        out.u16(9).u32(local_table.len() as u32).raw(&local_table);
        out.0
    };

    let file = class_file(
        vec![
            utf8("drive"),                        // 5
            utf8("(DD)V"),                        // 6
            utf8("Code"),                         // 7
            utf8("LineNumberTable"),              // 8
            utf8("LocalVariableTable"),           // 9
            utf8("this"),                         // 10
            utf8("speed"),                        // 11
            utf8("rotation"),                     // 12
            utf8("Ller/robot/subsystems/Drive;"), // 13
            utf8("D"),                            // 14
        ],
        vec![],
        vec![MethodInfo {
            access_flags: ACC_PUBLIC,
            name: 5,
            descriptor: 6,
            attributes: Box::new([AttributeInfo {
                name: 7,
                data: code.into(),
            }]),
        }],
    );

    let class = JavaClass::from_file(&file).unwrap();
    assert_eq!(class.methods.len(), 1);

    let method = &class.methods[0];
    assert_eq!(method.params.len(), 2);
    assert_eq!(method.params[0].name, "speed");
    assert_eq!(method.params[1].name, "rotation");
    // First table entry names the first instruction's line; the declaration
    // sits one line above it.
    assert_eq!(method.start_line, 42);
    assert_eq!(method.pretty_name(), "drive(double, double)");
}

#[test]
fn missing_debug_tables_leave_sentinels() {
    let file = class_file(
        vec![utf8("isFinished"), utf8("()Z")],
        vec![],
        vec![MethodInfo {
            access_flags: ACC_PUBLIC,
            name: 5,
            descriptor: 6,
            attributes: Box::new([]),
        }],
    );

    let class = JavaClass::from_file(&file).unwrap();
    let method = &class.methods[0];
    assert_eq!(method.start_line, -1);
    assert!(method.params.is_empty());
    assert_eq!(method.pretty_name(), "isFinished()=>boolean");
}

#[test]
fn missing_local_variable_table_leaves_names_empty() {
    let code = {
        let mut out = Bytes::new();
        out.u16(1).u16(2);
        out.u32(1).u8(0xB1);
        out.u16(0);
        out.u16(0); // no nested attributes at all
        out.0
    };

    let file = class_file(
        vec![utf8("setSpeed"), utf8("(I)V"), utf8("Code")],
        vec![],
        vec![MethodInfo {
            access_flags: ACC_PUBLIC,
            name: 5,
            descriptor: 6,
            attributes: Box::new([AttributeInfo {
                name: 7,
                data: code.into(),
            }]),
        }],
    );

    let class = JavaClass::from_file(&file).unwrap();
    let method = &class.methods[0];
    assert_eq!(method.params.len(), 1);
    assert_eq!(method.params[0].name, "");
    assert_eq!(method.start_line, -1);
}

#[test]
fn bad_element_does_not_abort_class() {
    // Second field's descriptor is an unterminated object type; only that
    // field disappears.
    let file = class_file(
        vec![
            utf8("good"),   // 5
            utf8("I"),      // 6
            utf8("broken"), // 7
            utf8("Lfoo"),   // 8
        ],
        vec![
            FieldInfo {
                access_flags: ACC_PUBLIC,
                name: 5,
                descriptor: 6,
                attributes: Box::new([]),
            },
            FieldInfo {
                access_flags: ACC_PUBLIC,
                name: 7,
                descriptor: 8,
                attributes: Box::new([]),
            },
        ],
        vec![],
    );

    let class = JavaClass::from_file(&file).unwrap();
    assert_eq!(class.fields.len(), 1);
    assert_eq!(class.fields[0].element.name, "good");
}

#[test]
fn elements_compare_structurally() {
    let make = || {
        class_file(
            vec![utf8("stop"), utf8("()V")],
            vec![],
            vec![MethodInfo {
                access_flags: ACC_PUBLIC,
                name: 5,
                descriptor: 6,
                attributes: Box::new([]),
            }],
        )
    };

    let first = JavaClass::from_file(&make()).unwrap();
    let second = JavaClass::from_file(&make()).unwrap();
    assert_eq!(first.methods[0].element, second.methods[0].element);
}

#[test]
fn parse_binary_round_trip() {
    let class = ClassFile::parse(common::minimal_class()).unwrap();
    let model = JavaClass::from_file(&class).unwrap();
    assert_eq!(model.detail.name, "Foo");
    assert_eq!(model.superclass.full, "java/lang/Object");
    assert!(model.fields.is_empty() && model.methods.is_empty());
}

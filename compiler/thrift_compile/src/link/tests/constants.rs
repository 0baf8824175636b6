use pretty_assertions::assert_eq;
use proptest::prelude::*;
use thrift_ir::{
    BaseTypeId, Constant, ConstantValue, Enum, EnumItem, Field, Program, Struct, Type, Typedef,
};

use super::{cycle, link, link_err, root_struct};
use crate::{Compilation, CompileErrorKind, TypeId, TypedValue, Value};

fn constant(name: &str, ty: Type, value: ConstantValue) -> Constant {
    Constant::new(name, ty, value).at(1)
}

fn root_constant<'c>(compilation: &'c Compilation, name: &str) -> &'c TypedValue {
    let id = compilation.root_module().constant(name).unwrap();
    &compilation.constant(id).value
}

fn with_default(ty: Type, value: ConstantValue) -> Program {
    Program::new().with_definition(
        Struct::structure("A", vec![Field::new(1, "f", ty).with_default(value).at(2)])
            .at(1),
    )
}

fn status() -> Enum {
    Enum::new(
        "Status",
        vec![EnumItem::new("OK").at(2), EnumItem::new("FAILED").at(3)],
    )
    .at(1)
}

fn mismatch(expected: &str, found: &str) -> CompileErrorKind {
    CompileErrorKind::ConstantTypeMismatch {
        expected: expected.to_owned(),
        found: found.to_owned(),
    }
}

#[test]
fn test_i16_default_range() {
    let err = link(with_default(Type::base(BaseTypeId::I16), ConstantValue::int(100_000)))
        .unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::ConstantRange {
            value: "100000".to_owned(),
            ty: "i16".to_owned(),
        }
    );
    assert_eq!(err.line, 2);

    let compilation =
        link(with_default(Type::base(BaseTypeId::I16), ConstantValue::int(32767))).unwrap();
    let field = &root_struct(&compilation, "A").fields[0];
    assert_eq!(
        field.default,
        Some(TypedValue {
            ty: TypeId::I16,
            value: Value::Int(32767),
        })
    );
}

#[test]
fn test_literal_beyond_i64_rejected() {
    let huge = i128::from(i64::MAX) + 1;
    let program = Program::new().with_definition(constant(
        "BIG",
        Type::base(BaseTypeId::I64),
        ConstantValue::int(huge),
    ));
    assert_eq!(
        link_err(program),
        CompileErrorKind::ConstantRange {
            value: huge.to_string(),
            ty: "i64".to_owned(),
        }
    );
}

#[test]
fn test_literal_beyond_i64_rejected_for_double_and_enum() {
    let huge = i128::from(i64::MAX) + 1;
    let program = Program::new().with_definition(constant(
        "BIG",
        Type::base(BaseTypeId::Double),
        ConstantValue::int(huge),
    ));
    assert_eq!(
        link_err(program),
        CompileErrorKind::ConstantRange {
            value: huge.to_string(),
            ty: "double".to_owned(),
        }
    );

    let tiny = i128::from(i64::MIN) - 1;
    let program = Program::new()
        .with_definition(status())
        .with_definition(constant("X", Type::reference("Status"), ConstantValue::int(tiny)));
    assert_eq!(
        link_err(program),
        CompileErrorKind::ConstantRange {
            value: tiny.to_string(),
            ty: "Status".to_owned(),
        }
    );
}

#[test]
fn test_scalar_coercions() {
    let program = Program::new()
        .with_definition(constant("T", Type::base(BaseTypeId::Bool), ConstantValue::int(1)))
        .with_definition(constant("F", Type::base(BaseTypeId::Bool), ConstantValue::Bool(false)))
        .with_definition(constant("D", Type::base(BaseTypeId::Double), ConstantValue::int(3)))
        .with_definition(constant(
            "B",
            Type::base(BaseTypeId::Binary),
            ConstantValue::string("raw"),
        ))
        .with_definition(constant("N", Type::base(BaseTypeId::I8), ConstantValue::int(-128)));
    let compilation = link(program).unwrap();
    assert_eq!(root_constant(&compilation, "T").value, Value::Bool(true));
    assert_eq!(root_constant(&compilation, "F").value, Value::Bool(false));
    assert_eq!(root_constant(&compilation, "D").value, Value::Double(3.0));
    assert_eq!(root_constant(&compilation, "B").value, Value::String("raw".to_owned()));
    assert_eq!(root_constant(&compilation, "N").value, Value::Int(-128));
}

#[test]
fn test_scalar_mismatches() {
    let cases = [
        (Type::base(BaseTypeId::Bool), ConstantValue::int(2), mismatch("bool", "integer literal")),
        (
            Type::base(BaseTypeId::I32),
            ConstantValue::string("1"),
            mismatch("i32", "string literal"),
        ),
        (
            Type::base(BaseTypeId::I32),
            ConstantValue::Double(1.5),
            mismatch("i32", "double literal"),
        ),
        (
            Type::base(BaseTypeId::String),
            ConstantValue::list(vec![]),
            mismatch("string", "list literal"),
        ),
    ];
    for (ty, value, expected) in cases {
        let program = Program::new().with_definition(constant("X", ty, value));
        assert_eq!(link_err(program), expected);
    }
}

#[test]
fn test_containers() {
    let program = Program::new()
        .with_definition(constant(
            "IDS",
            Type::set(Type::base(BaseTypeId::I32)),
            ConstantValue::list(vec![ConstantValue::int(1), ConstantValue::int(2)]),
        ))
        .with_definition(constant(
            "LIMITS",
            Type::map(Type::base(BaseTypeId::String), Type::base(BaseTypeId::I64)),
            ConstantValue::map(vec![(ConstantValue::string("max"), ConstantValue::int(10))]),
        ));
    let compilation = link(program).unwrap();
    assert_eq!(
        root_constant(&compilation, "IDS").value,
        Value::Set(vec![Value::Int(1), Value::Int(2)])
    );
    assert_eq!(
        root_constant(&compilation, "LIMITS").value,
        Value::Map(vec![(Value::String("max".to_owned()), Value::Int(10))])
    );
}

#[test]
fn test_container_element_range_checked() {
    let program = Program::new().with_definition(constant(
        "BYTES",
        Type::list(Type::base(BaseTypeId::I8)),
        ConstantValue::list(vec![ConstantValue::int(1), ConstantValue::int(300)]),
    ));
    assert_eq!(
        link_err(program),
        CompileErrorKind::ConstantRange {
            value: "300".to_owned(),
            ty: "byte".to_owned(),
        }
    );
}

#[test]
fn test_enum_values() {
    let program = Program::new()
        .with_definition(status())
        .with_definition(Typedef::new("Alias", Type::reference("Status")).at(4))
        .with_definition(constant(
            "BY_NAME",
            Type::reference("Status"),
            ConstantValue::reference("Status.FAILED"),
        ))
        .with_definition(constant(
            "BY_VALUE",
            Type::reference("Alias"),
            ConstantValue::int(0),
        ))
        .with_definition(constant(
            "THROUGH_ALIAS",
            Type::reference("Status"),
            ConstantValue::reference("Alias.OK"),
        ))
        .with_definition(constant(
            "AS_INT",
            Type::base(BaseTypeId::I32),
            ConstantValue::reference("Status.FAILED"),
        ));
    let compilation = link(program).unwrap();
    let failed = Value::EnumItem {
        name: "FAILED".to_owned(),
        value: 1,
    };
    let ok = Value::EnumItem {
        name: "OK".to_owned(),
        value: 0,
    };
    assert_eq!(root_constant(&compilation, "BY_NAME").value, failed);
    assert_eq!(root_constant(&compilation, "BY_VALUE").value, ok);
    assert_eq!(root_constant(&compilation, "THROUGH_ALIAS").value, ok);
    assert_eq!(root_constant(&compilation, "AS_INT").value, Value::Int(1));
}

#[test]
fn test_enum_value_must_exist() {
    let program = Program::new()
        .with_definition(status())
        .with_definition(constant("X", Type::reference("Status"), ConstantValue::int(7)));
    assert_eq!(link_err(program), mismatch("Status", "integer 7"));

    let program = Program::new()
        .with_definition(status())
        .with_definition(constant(
            "Y",
            Type::reference("Status"),
            ConstantValue::reference("Status.MISSING"),
        ));
    assert_eq!(
        link_err(program),
        CompileErrorKind::UnresolvedReference {
            kind: "enum item",
            name: "Status.MISSING".to_owned(),
        }
    );
}

#[test]
fn test_constant_references_are_kept() {
    let program = Program::new()
        .with_definition(constant("LIMIT", Type::base(BaseTypeId::I32), ConstantValue::int(10)))
        .with_definition(constant(
            "ALIAS",
            Type::base(BaseTypeId::I32),
            ConstantValue::reference("LIMIT"),
        ))
        .with_definition(constant(
            "WIDE",
            Type::base(BaseTypeId::I64),
            ConstantValue::reference("ALIAS"),
        ));
    let compilation = link(program).unwrap();
    let limit = compilation.root_module().constant("LIMIT").unwrap();
    let alias = compilation.root_module().constant("ALIAS").unwrap();

    let wide = root_constant(&compilation, "WIDE");
    assert_eq!(wide.ty, TypeId::I64);
    assert_eq!(wide.value, Value::Reference(alias));
    assert_eq!(root_constant(&compilation, "ALIAS").value, Value::Reference(limit));
    assert_eq!(compilation.resolve_value(&wide.value), &Value::Int(10));
}

#[test]
fn test_referenced_constant_must_fit() {
    let program = Program::new()
        .with_definition(constant("BIG", Type::base(BaseTypeId::I32), ConstantValue::int(70_000)))
        .with_definition(constant(
            "SMALL",
            Type::base(BaseTypeId::I16),
            ConstantValue::reference("BIG"),
        ));
    assert_eq!(
        link_err(program),
        CompileErrorKind::ConstantRange {
            value: "70000".to_owned(),
            ty: "i16".to_owned(),
        }
    );

    let program = Program::new()
        .with_definition(constant(
            "NAME",
            Type::base(BaseTypeId::String),
            ConstantValue::string("x"),
        ))
        .with_definition(constant(
            "NUMBER",
            Type::base(BaseTypeId::I32),
            ConstantValue::reference("NAME"),
        ));
    assert_eq!(link_err(program), mismatch("i32", "string"));
}

#[test]
fn test_constant_cycle() {
    let program = Program::new()
        .with_definition(constant("A", Type::base(BaseTypeId::I32), ConstantValue::reference("B")))
        .with_definition(constant("B", Type::base(BaseTypeId::I32), ConstantValue::reference("A")));
    assert_eq!(link_err(program), cycle(&["A", "B", "A"]));
}

#[test]
fn test_reference_to_type_is_not_a_constant() {
    let program = Program::new()
        .with_definition(Struct::structure("S", vec![]).at(1))
        .with_definition(constant("X", Type::base(BaseTypeId::I32), ConstantValue::reference("S")));
    assert_eq!(
        link_err(program),
        CompileErrorKind::KindMismatch {
            name: "S".to_owned(),
            expected: "constant",
            found: "type",
        }
    );
}

#[test]
fn test_unknown_constant() {
    let program = Program::new().with_definition(constant(
        "X",
        Type::base(BaseTypeId::I32),
        ConstantValue::reference("NOPE"),
    ));
    assert_eq!(
        link_err(program),
        CompileErrorKind::UnresolvedReference {
            kind: "constant",
            name: "NOPE".to_owned(),
        }
    );
}

fn point() -> Struct {
    Struct::structure(
        "Point",
        vec![
            Field::new(1, "x", Type::base(BaseTypeId::I32))
                .required()
                .at(2),
            Field::new(2, "y", Type::base(BaseTypeId::I32)).at(3),
        ],
    )
    .at(1)
}

#[test]
fn test_struct_literal() {
    let program = Program::new()
        .with_definition(point())
        .with_definition(constant(
            "ORIGIN",
            Type::reference("Point"),
            ConstantValue::map(vec![
                (ConstantValue::string("y"), ConstantValue::int(0)),
                (ConstantValue::string("x"), ConstantValue::int(0)),
            ]),
        ));
    let compilation = link(program).unwrap();
    assert_eq!(
        root_constant(&compilation, "ORIGIN").value,
        Value::Struct {
            fields: vec![
                ("x".to_owned(), Value::Int(0)),
                ("y".to_owned(), Value::Int(0)),
            ],
        }
    );
}

#[test]
fn test_struct_literal_errors() {
    let cases = [
        (
            vec![
                (ConstantValue::string("x"), ConstantValue::int(0)),
                (ConstantValue::string("z"), ConstantValue::int(0)),
            ],
            "map with unknown field \"z\"",
        ),
        (
            vec![(ConstantValue::string("y"), ConstantValue::int(0))],
            "map missing required field \"x\"",
        ),
        (
            vec![(ConstantValue::int(1), ConstantValue::int(0))],
            "map with integer literal keys",
        ),
    ];
    for (items, found) in cases {
        let program = Program::new()
            .with_definition(point())
            .with_definition(constant(
                "P",
                Type::reference("Point"),
                ConstantValue::map(items),
            ));
        assert_eq!(link_err(program), mismatch("Point", found));
    }
}

#[test]
fn test_union_literal_sets_exactly_one_field() {
    let union = Struct::union(
        "Either",
        vec![
            Field::new(1, "left", Type::base(BaseTypeId::I32)).at(2),
            Field::new(2, "right", Type::base(BaseTypeId::String)).at(3),
        ],
    )
    .at(1);

    let program = Program::new()
        .with_definition(union.clone())
        .with_definition(constant(
            "BOTH",
            Type::reference("Either"),
            ConstantValue::map(vec![
                (ConstantValue::string("left"), ConstantValue::int(1)),
                (ConstantValue::string("right"), ConstantValue::string("r")),
            ]),
        ));
    assert_eq!(link_err(program), mismatch("Either", "map setting 2 union fields"));

    let program = Program::new()
        .with_definition(union)
        .with_definition(constant(
            "LEFT",
            Type::reference("Either"),
            ConstantValue::map(vec![(ConstantValue::string("left"), ConstantValue::int(1))]),
        ));
    let compilation = link(program).unwrap();
    assert_eq!(
        root_constant(&compilation, "LEFT").value,
        Value::Struct {
            fields: vec![("left".to_owned(), Value::Int(1))],
        }
    );
}

#[test]
fn test_default_may_reference_later_definitions() {
    let program = Program::new()
        .with_definition(
            Struct::structure(
                "Node",
                vec![
                    Field::new(1, "status", Type::reference("Status"))
                        .with_default(ConstantValue::reference("Status.OK"))
                        .at(2),
                    Field::new(2, "children", Type::list(Type::reference("Node")))
                        .with_default(ConstantValue::list(vec![]))
                        .at(3),
                    Field::new(3, "limit", Type::base(BaseTypeId::I32))
                        .with_default(ConstantValue::reference("LIMIT"))
                        .at(4),
                ],
            )
            .at(1),
        )
        .with_definition(status())
        .with_definition(constant("LIMIT", Type::base(BaseTypeId::I32), ConstantValue::int(5)));
    let compilation = link(program).unwrap();
    let root = compilation.root_module();
    let node = root_struct(&compilation, "Node");
    let defaults: Vec<&Value> = node
        .fields
        .iter()
        .map(|field| &field.default.as_ref().unwrap().value)
        .collect();
    assert_eq!(
        defaults,
        vec![
            &Value::EnumItem {
                name: "OK".to_owned(),
                value: 0,
            },
            &Value::List(vec![]),
            &Value::Reference(root.constant("LIMIT").unwrap()),
        ]
    );
}

proptest! {
    #[test]
    fn prop_i16_defaults_in_range_accepted(value in i16::MIN..=i16::MAX) {
        let compilation =
            link(with_default(Type::base(BaseTypeId::I16), ConstantValue::int(value))).unwrap();
        let field = &root_struct(&compilation, "A").fields[0];
        prop_assert_eq!(
            &field.default.as_ref().unwrap().value,
            &Value::Int(i64::from(value))
        );
    }

    #[test]
    fn prop_i16_defaults_out_of_range_rejected(
        value in prop_oneof![i64::MIN..i64::from(i16::MIN), (i64::from(i16::MAX) + 1)..=i64::MAX]
    ) {
        let kind = link_err(with_default(Type::base(BaseTypeId::I16), ConstantValue::int(value)));
        prop_assert_eq!(
            kind,
            CompileErrorKind::ConstantRange {
                value: value.to_string(),
                ty: "i16".to_owned(),
            }
        );
    }

    #[test]
    fn prop_byte_constants_match_i8(value in -1000i64..1000) {
        let program = Program::new().with_definition(constant(
            "B",
            Type::base(BaseTypeId::I8),
            ConstantValue::int(value),
        ));
        prop_assert_eq!(link(program).is_ok(), i8::try_from(value).is_ok());
    }
}

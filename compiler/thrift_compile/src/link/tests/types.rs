use pretty_assertions::assert_eq;
use thrift_ir::{
    Annotation, BaseTypeId, Constant, ConstantValue, Enum, EnumItem, Field, Program, Service,
    Struct, Type, TypeReference, Typedef,
};

use super::{cycle, link, link_err, link_with, root_struct, root_type};
use crate::{CompileErrorKind, CompileOptions, Primitive, TypeId, TypeSpec, WireType};

#[test]
fn test_typedef_wire_type_is_transparent() {
    let program = Program::new()
        .with_definition(Typedef::new("C", Type::reference("B")).at(1))
        .with_definition(Typedef::new("B", Type::reference("A")).at(2))
        .with_definition(Typedef::new("A", Type::base(BaseTypeId::I64)).at(3))
        .with_definition(Typedef::new("Names", Type::list(Type::base(BaseTypeId::String))).at(4));
    let compilation = link(program).unwrap();
    let types = compilation.types();

    for name in ["A", "B", "C"] {
        assert_eq!(types.wire_type(root_type(&compilation, name)), WireType::I64);
    }
    assert_eq!(types.unwrap_typedefs(root_type(&compilation, "C")), TypeId::I64);
    assert_eq!(types.wire_type(root_type(&compilation, "Names")), WireType::List);

    let TypeSpec::Typedef(c) = types.get(root_type(&compilation, "C")) else {
        panic!("C is not a typedef");
    };
    assert_eq!(c.target, root_type(&compilation, "B"));
}

#[test]
fn test_typedef_cycle_rejected() {
    let program = Program::new()
        .with_definition(Typedef::new("A", Type::reference("B")).at(1))
        .with_definition(Typedef::new("B", Type::reference("A")).at(2));
    let err = link(program).unwrap_err();
    assert_eq!(err.kind, cycle(&["A", "B", "A"]));
    assert_eq!(err.line, 2);
    assert_eq!(err.file, "main.thrift");
}

#[test]
fn test_typedef_recursion_through_list_in_any_order() {
    let list = Typedef::new("A", Type::list(Type::reference("B"))).at(1);
    let alias = Typedef::new("B", Type::reference("A")).at(2);

    for program in [
        Program::new()
            .with_definition(list.clone())
            .with_definition(alias.clone()),
        Program::new()
            .with_definition(alias.clone())
            .with_definition(list.clone()),
    ] {
        let compilation = link(program).unwrap();
        let types = compilation.types();
        let a = root_type(&compilation, "A");
        let b = root_type(&compilation, "B");
        assert_eq!(types.wire_type(a), WireType::List);
        assert_eq!(types.wire_type(b), WireType::List);
        assert_eq!(types.unwrap_typedefs(b), types.unwrap_typedefs(a));
        assert_eq!(types.display(types.unwrap_typedefs(a)), "list<B>");
    }
}

#[test]
fn test_enum_values_auto_assigned() {
    let program = Program::new().with_definition(
        Enum::new(
            "Status",
            vec![
                EnumItem::new("UNKNOWN").at(2),
                EnumItem::new("ACTIVE").valued(5).at(3),
                EnumItem::new("DISABLED").at(4),
                EnumItem::new("LEGACY_ACTIVE").valued(5).at(5),
            ],
        )
        .at(1),
    );
    let compilation = link(program).unwrap();
    let id = root_type(&compilation, "Status");
    let spec = compilation.types().get(id).as_enum().unwrap();

    let values: Vec<(&str, i32)> = spec
        .items
        .iter()
        .map(|item| (item.name.as_str(), item.value))
        .collect();
    assert_eq!(
        values,
        vec![("UNKNOWN", 0), ("ACTIVE", 5), ("DISABLED", 6), ("LEGACY_ACTIVE", 5)]
    );
    assert_eq!(compilation.types().wire_type(id), WireType::I32);
}

#[test]
fn test_enum_value_must_fit_i32() {
    let program = Program::new().with_definition(
        Enum::new(
            "Big",
            vec![
                EnumItem::new("MAX").valued(i64::from(i32::MAX)).at(2),
                EnumItem::new("OVER").at(3),
            ],
        )
        .at(1),
    );
    let err = link(program).unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::ConstantRange {
            value: "2147483648".to_owned(),
            ty: "i32".to_owned(),
        }
    );
    assert_eq!(err.line, 3);
}

#[test]
fn test_enum_duplicate_item_name() {
    let program = Program::new().with_definition(
        Enum::new(
            "Color",
            vec![EnumItem::new("RED").at(2), EnumItem::new("RED").at(3)],
        )
        .at(1),
    );
    assert_eq!(
        link_err(program),
        CompileErrorKind::Redefinition {
            name: "Color.RED".to_owned(),
            previous_line: 2,
        }
    );
}

#[test]
fn test_forward_reference() {
    let program = Program::new()
        .with_definition(
            Struct::structure("User", vec![Field::new(1, "id", Type::reference("UserId")).at(2)])
                .at(1),
        )
        .with_definition(Typedef::new("UserId", Type::base(BaseTypeId::I64)).at(5));
    let compilation = link(program).unwrap();
    let user = root_struct(&compilation, "User");
    assert_eq!(user.fields[0].ty, root_type(&compilation, "UserId"));
    assert_eq!(
        compilation.types().wire_type(user.fields[0].ty),
        WireType::I64
    );
}

#[test]
fn test_same_type_resolves_to_same_handle() {
    let program = Program::new()
        .with_definition(Struct::structure("Point", vec![]).at(1))
        .with_definition(
            Struct::structure(
                "Shape",
                vec![
                    Field::new(1, "origin", Type::reference("Point")).at(3),
                    Field::new(2, "corner", Type::reference("Point")).at(4),
                    Field::new(3, "xs", Type::list(Type::base(BaseTypeId::I32))).at(5),
                    Field::new(4, "ys", Type::list(Type::base(BaseTypeId::I32))).at(6),
                ],
            )
            .at(2),
        );
    let compilation = link(program).unwrap();
    let shape = root_struct(&compilation, "Shape");
    assert_eq!(shape.fields[0].ty, shape.fields[1].ty);
    assert_eq!(shape.fields[0].ty, root_type(&compilation, "Point"));
    assert_eq!(shape.fields[2].ty, shape.fields[3].ty);
    assert_eq!(compilation.types().display(shape.fields[2].ty), "list<i32>");
}

#[test]
fn test_unresolved_type() {
    let missing = TypeReference::new("Missing").at(7);
    let program = Program::new().with_definition(
        Struct::structure(
            "A",
            vec![Field::new(1, "b", Type::Reference(missing)).at(7)],
        )
        .at(6),
    );
    let err = link(program).unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::UnresolvedReference {
            kind: "type",
            name: "Missing".to_owned(),
        }
    );
    assert_eq!(err.line, 7);
}

#[test]
fn test_names_shared_across_kinds() {
    let program = Program::new()
        .with_definition(Struct::structure("Config", vec![]).at(1))
        .with_definition(
            Constant::new("Config", Type::base(BaseTypeId::I32), ConstantValue::int(1)).at(4),
        );
    let err = link(program).unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::Redefinition {
            name: "Config".to_owned(),
            previous_line: 1,
        }
    );
    assert_eq!(err.line, 4);
}

#[test]
fn test_service_used_as_type() {
    let program = Program::new()
        .with_definition(Service::new("Api", vec![]).at(1))
        .with_definition(
            Struct::structure("A", vec![Field::new(1, "api", Type::reference("Api")).at(3)])
                .at(2),
        );
    assert_eq!(
        link_err(program),
        CompileErrorKind::KindMismatch {
            name: "Api".to_owned(),
            expected: "type",
            found: "service",
        }
    );
}

#[test]
fn test_annotated_primitive_gets_own_handle() {
    let annotated =
        Type::base(BaseTypeId::String).with_annotation(Annotation::new("cpp.type", "Str"));
    let program = Program::new().with_definition(
        Struct::structure(
            "A",
            vec![
                Field::new(1, "plain", Type::base(BaseTypeId::String)).at(2),
                Field::new(2, "tagged", annotated).at(3),
            ],
        )
        .at(1),
    );
    let compilation = link(program).unwrap();
    let a = root_struct(&compilation, "A");
    assert_eq!(a.fields[0].ty, TypeId::STRING);
    assert_ne!(a.fields[1].ty, TypeId::STRING);

    let TypeSpec::Primitive { kind, annotations } = compilation.types().get(a.fields[1].ty) else {
        panic!("tagged field is not a primitive");
    };
    assert_eq!(*kind, Primitive::String);
    assert_eq!(annotations.get("cpp.type").map(String::as_str), Some("Str"));
}

#[test]
fn test_duplicate_annotation() {
    let program = Program::new().with_definition(
        Typedef::new("Id", Type::base(BaseTypeId::I64))
            .with_annotation(Annotation::new("go.name", "ID").at(2))
            .with_annotation(Annotation::new("go.name", "Ident").at(3))
            .at(1),
    );
    let err = link(program.clone()).unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::DuplicateAnnotation {
            name: "go.name".to_owned(),
        }
    );
    assert_eq!(err.line, 3);

    let options = CompileOptions::new().allow_duplicate_annotations();
    let compilation = link_with(program, &options).unwrap();
    let id = root_type(&compilation, "Id");
    assert_eq!(
        compilation
            .types()
            .get(id)
            .annotations()
            .get("go.name")
            .map(String::as_str),
        Some("Ident")
    );
}

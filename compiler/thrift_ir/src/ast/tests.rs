use pretty_assertions::assert_eq;

use super::*;
use crate::{Located, Named};

#[test]
fn include_alias_defaults_to_file_stem() {
    assert_eq!(Include::new("shared.thrift").alias(), "shared");
    assert_eq!(Include::new("common/bar.thrift").alias(), "bar");
    assert_eq!(Include::new("idl/v2/types").alias(), "types");
}

#[test]
fn include_alias_prefers_explicit_name() {
    let include = Include::new("common/bar.thrift").named("b").at(3);
    assert_eq!(include.alias(), "b");
    assert_eq!(include.line(), 3);
}

#[test]
fn program_headers_keep_source_order() {
    let program = Program::new()
        .with_namespace(Namespace::new("go", "example"))
        .with_include(Include::new("a.thrift"))
        .with_include(Include::new("b.thrift").named("bee"));

    let aliases: Vec<_> = program.includes().map(Include::alias).collect();
    assert_eq!(aliases, vec!["a", "bee"]);
    assert_eq!(program.namespaces().count(), 1);
}

#[test]
fn definitions_convert_from_items() {
    let program = Program::new()
        .with_definition(Typedef::new("UUID", Type::base(BaseTypeId::String)))
        .with_definition(Struct::union("Contents", vec![]).at(9))
        .with_definition(Enum::new("Role", vec![EnumItem::new("User").valued(1)]));

    let names: Vec<_> = program.definitions.iter().map(Named::name).collect();
    assert_eq!(names, vec!["UUID", "Contents", "Role"]);
    assert_eq!(program.definitions[1].kind_name(), "union");
    assert_eq!(program.definitions[1].line(), 9);
}

#[test]
fn type_display_matches_idl_syntax() {
    let ty = Type::map(
        Type::base(BaseTypeId::String),
        Type::list(Type::reference("shared.User")),
    );
    assert_eq!(ty.to_string(), "map<string, list<shared.User>>");
    assert_eq!(Type::base(BaseTypeId::I8).to_string(), "byte");
}

#[test]
fn annotations_attach_to_non_reference_types() {
    let list = Type::list(Type::base(BaseTypeId::I32)).with_annotation(Annotation::new("k", "v"));
    assert_eq!(list.annotations().len(), 1);

    let reference = Type::reference("Foo").with_annotation(Annotation::new("k", "v"));
    assert!(reference.annotations().is_empty());
}

#[test]
fn field_builder_sets_requiredness_and_default() {
    let field = Field::new(1, "count", Type::base(BaseTypeId::I16))
        .required()
        .with_default(ConstantValue::int(7))
        .at(12);

    assert_eq!(field.requiredness, Requiredness::Required);
    assert_eq!(field.default, Some(ConstantValue::Int(7)));
    assert_eq!(field.line(), 12);
    let plain = Field::new(2, "x", Type::base(BaseTypeId::Bool));
    assert_eq!(plain.requiredness, Requiredness::Unspecified);
}

#[test]
fn function_builder_defaults_to_void() {
    let function = Function::new("ping", vec![]);
    assert_eq!(function.return_type, None);
    assert!(!function.one_way);

    let function = function.oneway();
    assert!(function.one_way);
}

#[test]
fn constant_map_builder_wraps_pairs() {
    let value = ConstantValue::map(vec![(ConstantValue::string("a"), ConstantValue::int(1))]);
    let ConstantValue::Map(map) = value else {
        panic!("expected a map literal");
    };
    assert_eq!(map.items.len(), 1);
    assert_eq!(map.items[0].key, ConstantValue::String("a".to_string()));
}

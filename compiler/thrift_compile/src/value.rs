//! Evaluated constant values.

use crate::{ConstId, ModuleId, TypeId};

/// A constant value after evaluation against its expected type.
///
/// Values are untyped on their own; the type they were checked against
/// lives next to them in `TypedValue` and, for nested values, follows from
/// the element/key/value/field types of that type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    /// Any integer kind (`byte`, `i16`, `i32`, `i64`), already range-checked.
    Int(i64),
    Double(f64),
    /// A `string` or `binary` value.
    String(String),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    /// An enum item, by name and value.
    EnumItem { name: String, value: i32 },
    /// A struct-like literal. Fields are kept in declaration order of the
    /// type; only fields present in the literal appear.
    Struct { fields: Vec<(String, Value)> },
    /// A reference to another top-level constant.
    Reference(ConstId),
}

impl Value {
    /// Short description of the value's shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::EnumItem { .. } => "enum item",
            Value::Struct { .. } => "struct",
            Value::Reference(_) => "constant reference",
        }
    }
}

/// A value tagged with the type it was checked against.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedValue {
    pub ty: TypeId,
    pub value: Value,
}

/// A resolved top-level `const`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantSpec {
    pub name: String,
    pub module: ModuleId,
    /// The declared type and the value checked against it.
    pub value: TypedValue,
    pub line: u32,
}

impl ConstantSpec {
    #[inline]
    pub fn ty(&self) -> TypeId {
        self.value.ty
    }
}

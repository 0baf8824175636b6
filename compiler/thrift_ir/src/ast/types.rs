//! Type expressions.
//!
//! A `Type` is written wherever the IDL expects a type: field types,
//! typedef targets, container element types, function return types.

use std::fmt;

use super::{impl_located, Annotation};

/// An unresolved type expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// A built-in type: `i32`, `string (format = "uuid")`.
    Base(BaseType),
    /// `map<K, V>`
    Map(MapType),
    /// `list<T>`
    List(ListType),
    /// `set<T>`
    Set(SetType),
    /// A named type, possibly qualified by an include alias: `User`, `shared.UUID`.
    Reference(TypeReference),
}

impl Type {
    /// A built-in type without annotations.
    pub fn base(id: BaseTypeId) -> Self {
        Type::Base(BaseType {
            id,
            annotations: Vec::new(),
        })
    }

    /// `list<value>`
    pub fn list(value: Type) -> Self {
        Type::List(ListType {
            value: Box::new(value),
            annotations: Vec::new(),
            line: 0,
        })
    }

    /// `set<value>`
    pub fn set(value: Type) -> Self {
        Type::Set(SetType {
            value: Box::new(value),
            annotations: Vec::new(),
            line: 0,
        })
    }

    /// `map<key, value>`
    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(MapType {
            key: Box::new(key),
            value: Box::new(value),
            annotations: Vec::new(),
            line: 0,
        })
    }

    /// A reference to a named type.
    pub fn reference(name: impl Into<String>) -> Self {
        Type::Reference(TypeReference::new(name))
    }

    /// Annotations attached to the type expression.
    ///
    /// References carry none; annotations belong to the referenced definition.
    pub fn annotations(&self) -> &[Annotation] {
        match self {
            Type::Base(base) => &base.annotations,
            Type::Map(map) => &map.annotations,
            Type::List(list) => &list.annotations,
            Type::Set(set) => &set.annotations,
            Type::Reference(_) => &[],
        }
    }

    /// Attach an annotation to a built-in or container type.
    ///
    /// References cannot be annotated in the IDL, so this leaves them unchanged.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        match &mut self {
            Type::Base(base) => base.annotations.push(annotation),
            Type::Map(map) => map.annotations.push(annotation),
            Type::List(list) => list.annotations.push(annotation),
            Type::Set(set) => set.annotations.push(annotation),
            Type::Reference(_) => {}
        }
        self
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Base(base) => write!(f, "{}", base.id),
            Type::Map(map) => write!(f, "map<{}, {}>", map.key, map.value),
            Type::List(list) => write!(f, "list<{}>", list.value),
            Type::Set(set) => write!(f, "set<{}>", set.value),
            Type::Reference(reference) => write!(f, "{}", reference.name),
        }
    }
}

/// A built-in type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseType {
    pub id: BaseTypeId,
    pub annotations: Vec<Annotation>,
}

/// Built-in type identifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseTypeId {
    Bool,
    /// `byte` (also spelled `i8`).
    I8,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
}

impl BaseTypeId {
    /// The keyword used for this type in IDL source.
    pub const fn as_str(self) -> &'static str {
        match self {
            BaseTypeId::Bool => "bool",
            BaseTypeId::I8 => "byte",
            BaseTypeId::I16 => "i16",
            BaseTypeId::I32 => "i32",
            BaseTypeId::I64 => "i64",
            BaseTypeId::Double => "double",
            BaseTypeId::String => "string",
            BaseTypeId::Binary => "binary",
        }
    }
}

impl fmt::Display for BaseTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `map<K, V>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapType {
    pub key: Box<Type>,
    pub value: Box<Type>,
    pub annotations: Vec<Annotation>,
    pub line: u32,
}

/// `list<T>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListType {
    pub value: Box<Type>,
    pub annotations: Vec<Annotation>,
    pub line: u32,
}

/// `set<T>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetType {
    pub value: Box<Type>,
    pub annotations: Vec<Annotation>,
    pub line: u32,
}

/// A reference to a named type: `User` or `shared.User`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeReference {
    pub name: String,
    pub line: u32,
}

impl TypeReference {
    pub fn new(name: impl Into<String>) -> Self {
        TypeReference {
            name: name.into(),
            line: 0,
        }
    }
}

impl_located!(MapType, ListType, SetType, TypeReference);

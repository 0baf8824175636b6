//! Top-level definitions and their members.

use std::fmt;

use super::{impl_located, Annotation, ConstantValue, Type};
use crate::{Located, Named};

/// Anything that can be declared at the top level of a Thrift file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Definition {
    Constant(Constant),
    Typedef(Typedef),
    Enum(Enum),
    Struct(Struct),
    Service(Service),
}

impl Definition {
    /// The kind of definition, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Definition::Constant(_) => "constant",
            Definition::Typedef(_) => "typedef",
            Definition::Enum(_) => "enum",
            Definition::Struct(s) => s.kind.as_str(),
            Definition::Service(_) => "service",
        }
    }
}

impl Named for Definition {
    fn name(&self) -> &str {
        match self {
            Definition::Constant(c) => &c.name,
            Definition::Typedef(t) => &t.name,
            Definition::Enum(e) => &e.name,
            Definition::Struct(s) => &s.name,
            Definition::Service(s) => &s.name,
        }
    }
}

impl Located for Definition {
    fn line(&self) -> u32 {
        match self {
            Definition::Constant(c) => c.line,
            Definition::Typedef(t) => t.line,
            Definition::Enum(e) => e.line,
            Definition::Struct(s) => s.line,
            Definition::Service(s) => s.line,
        }
    }
}

macro_rules! impl_into_definition {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Definition {
                fn from(def: $variant) -> Self {
                    Definition::$variant(def)
                }
            }
        )*
    };
}

impl_into_definition!(Constant, Typedef, Enum, Struct, Service);

/// A constant.
///
/// ```thrift
/// const i32 MAX_RETRIES = 3
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constant {
    pub name: String,
    pub ty: Type,
    pub value: ConstantValue,
    pub line: u32,
}

impl Constant {
    pub fn new(name: impl Into<String>, ty: Type, value: ConstantValue) -> Self {
        Constant {
            name: name.into(),
            ty,
            value,
            line: 0,
        }
    }
}

/// An alias for another type.
///
/// ```thrift
/// typedef i64 Timestamp (unit = "milliseconds")
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Typedef {
    pub name: String,
    pub ty: Type,
    pub annotations: Vec<Annotation>,
    pub line: u32,
}

impl Typedef {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Typedef {
            name: name.into(),
            ty,
            annotations: Vec::new(),
            line: 0,
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A set of named integer values.
///
/// ```thrift
/// enum Role { User = 1, Moderator, Admin = 10 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enum {
    pub name: String,
    pub items: Vec<EnumItem>,
    pub annotations: Vec<Annotation>,
    pub line: u32,
}

impl Enum {
    pub fn new(name: impl Into<String>, items: Vec<EnumItem>) -> Self {
        Enum {
            name: name.into(),
            items,
            annotations: Vec::new(),
            line: 0,
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// One item of an enum.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumItem {
    pub name: String,
    /// Explicit value, or `None` to continue from the previous item.
    pub value: Option<i64>,
    pub annotations: Vec<Annotation>,
    pub line: u32,
}

impl EnumItem {
    pub fn new(name: impl Into<String>) -> Self {
        EnumItem {
            name: name.into(),
            value: None,
            annotations: Vec::new(),
            line: 0,
        }
    }

    #[must_use]
    pub fn valued(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Which flavor of struct-like type a `Struct` is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructureKind {
    Struct,
    Union,
    Exception,
}

impl StructureKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            StructureKind::Struct => "struct",
            StructureKind::Union => "union",
            StructureKind::Exception => "exception",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A struct, union, or exception.
///
/// ```thrift
/// struct User {
///     1: required string name
///     2: optional Status status = Status.Enabled
/// }
///
/// union Contents { 1: string plainText; 2: binary pdf }
///
/// exception ServiceError { 1: required string message }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Struct {
    pub name: String,
    pub kind: StructureKind,
    pub fields: Vec<Field>,
    pub annotations: Vec<Annotation>,
    pub line: u32,
}

impl Struct {
    pub fn new(kind: StructureKind, name: impl Into<String>, fields: Vec<Field>) -> Self {
        Struct {
            name: name.into(),
            kind,
            fields,
            annotations: Vec::new(),
            line: 0,
        }
    }

    /// A plain `struct`.
    pub fn structure(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(StructureKind::Struct, name, fields)
    }

    pub fn union(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(StructureKind::Union, name, fields)
    }

    pub fn exception(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(StructureKind::Exception, name, fields)
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Whether a field was marked `required`, `optional`, or neither.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requiredness {
    #[default]
    Unspecified,
    Required,
    Optional,
}

/// A field of a struct-like type, or an entry in a function's parameter or
/// `throws` list.
///
/// ```thrift
/// 1: required i32 foo = 0
/// 2: optional binary (max_length = "4096") bar
/// 3: i64 baz (go.name = "qux")
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub id: i16,
    pub name: String,
    pub ty: Type,
    pub requiredness: Requiredness,
    pub default: Option<ConstantValue>,
    pub annotations: Vec<Annotation>,
    pub line: u32,
}

impl Field {
    pub fn new(id: i16, name: impl Into<String>, ty: Type) -> Self {
        Field {
            id,
            name: name.into(),
            ty,
            requiredness: Requiredness::Unspecified,
            default: None,
            annotations: Vec::new(),
            line: 0,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.requiredness = Requiredness::Required;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.requiredness = Requiredness::Optional;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: ConstantValue) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A collection of functions, optionally extending another service.
///
/// ```thrift
/// service KeyValue extends shared.Base {
///     void setValue(1: string key, 2: binary value)
///     binary getValue(1: string key) throws (1: KeyNotFound notFound)
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Service {
    pub name: String,
    pub functions: Vec<Function>,
    pub parent: Option<ServiceReference>,
    pub annotations: Vec<Annotation>,
    pub line: u32,
}

impl Service {
    pub fn new(name: impl Into<String>, functions: Vec<Function>) -> Self {
        Service {
            name: name.into(),
            functions,
            parent: None,
            annotations: Vec::new(),
            line: 0,
        }
    }

    #[must_use]
    pub fn extends(mut self, parent: ServiceReference) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A reference to another service: `Base` or `shared.Base`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceReference {
    pub name: String,
    pub line: u32,
}

impl ServiceReference {
    pub fn new(name: impl Into<String>) -> Self {
        ServiceReference {
            name: name.into(),
            line: 0,
        }
    }
}

/// A function inside a service.
///
/// ```thrift
/// binary getValue(1: string key)
///     throws (1: KeyNotFoundError notFound) (ttl.milliseconds = "250")
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub name: String,
    pub parameters: Vec<Field>,
    /// `None` for `void`.
    pub return_type: Option<Type>,
    pub exceptions: Vec<Field>,
    pub one_way: bool,
    pub annotations: Vec<Annotation>,
    pub line: u32,
}

impl Function {
    /// A `void` function with the given parameters.
    pub fn new(name: impl Into<String>, parameters: Vec<Field>) -> Self {
        Function {
            name: name.into(),
            parameters,
            return_type: None,
            exceptions: Vec::new(),
            one_way: false,
            annotations: Vec::new(),
            line: 0,
        }
    }

    #[must_use]
    pub fn returns(mut self, ty: Type) -> Self {
        self.return_type = Some(ty);
        self
    }

    #[must_use]
    pub fn throws(mut self, exceptions: Vec<Field>) -> Self {
        self.exceptions = exceptions;
        self
    }

    #[must_use]
    pub fn oneway(mut self) -> Self {
        self.one_way = true;
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl_located!(
    Constant,
    Typedef,
    Enum,
    EnumItem,
    Struct,
    Field,
    Service,
    ServiceReference,
    Function,
);

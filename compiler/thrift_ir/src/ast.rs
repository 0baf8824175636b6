//! Syntax tree for one Thrift IDL file.
//!
//! # Module Structure
//!
//! - `types`: type expressions (`i32`, `list<Foo>`, `shared.UUID`)
//! - `constants`: constant value expressions (`42`, `[1, 2]`, `Status.Enabled`)
//! - `items`: top-level definitions and their members (fields, functions)
//!
//! Every node is plain owned data with a builder-style API, so tests and
//! out-of-process parsers construct trees the same way.

mod constants;
mod items;
mod types;

pub use constants::{ConstantList, ConstantMap, ConstantMapItem, ConstantReference, ConstantValue};
pub use items::{
    Constant, Definition, Enum, EnumItem, Field, Function, Requiredness, Service,
    ServiceReference, Struct, StructureKind, Typedef,
};
pub use types::{BaseType, BaseTypeId, ListType, MapType, SetType, Type, TypeReference};

/// Implements `Located` and an `at(line)` builder for nodes with a `line` field.
macro_rules! impl_located {
    ($($ty:ty),* $(,)?) => {
        $(
            impl crate::Located for $ty {
                fn line(&self) -> u32 {
                    self.line
                }
            }

            impl $ty {
                /// Set the declaration line.
                #[must_use]
                pub fn at(mut self, line: u32) -> Self {
                    self.line = line;
                    self
                }
            }
        )*
    };
}
pub(crate) use impl_located;

/// A parsed Thrift file.
///
/// ```thrift
/// include "shared.thrift"
/// namespace go example.service
///
/// struct User { 1: required string name }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    /// Includes and namespaces, in source order.
    pub headers: Vec<Header>,
    /// Top-level definitions, in source order.
    pub definitions: Vec<Definition>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an include header.
    #[must_use]
    pub fn with_include(mut self, include: Include) -> Self {
        self.headers.push(Header::Include(include));
        self
    }

    /// Append a namespace header.
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.headers.push(Header::Namespace(namespace));
        self
    }

    /// Append a definition.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<Definition>) -> Self {
        self.definitions.push(definition.into());
        self
    }

    /// Iterate over the include headers.
    pub fn includes(&self) -> impl Iterator<Item = &Include> {
        self.headers.iter().filter_map(|header| match header {
            Header::Include(include) => Some(include),
            Header::Namespace(_) => None,
        })
    }

    /// Iterate over the namespace headers.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.headers.iter().filter_map(|header| match header {
            Header::Namespace(namespace) => Some(namespace),
            Header::Include(_) => None,
        })
    }
}

/// A file header.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Header {
    Include(Include),
    Namespace(Namespace),
}

/// An include of another Thrift file.
///
/// ```thrift
/// include "shared.thrift"
/// include t "common/types.thrift"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Include {
    /// Path of the included file, already normalized by the caller.
    pub path: String,
    /// Explicit alias, if one was given.
    pub name: Option<String>,
    pub line: u32,
}

impl Include {
    /// Include `path` under its default alias.
    pub fn new(path: impl Into<String>) -> Self {
        Include {
            path: path.into(),
            name: None,
            line: 0,
        }
    }

    /// Give the include an explicit alias.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The alias the included module is visible under.
    ///
    /// This is the explicit name when present, otherwise the file stem:
    /// `common/bar.thrift` is visible as `bar`.
    pub fn alias(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => module_name(&self.path),
        }
    }
}

/// The name a file's module goes by: its file stem.
///
/// `common/bar.thrift` is `bar`.
pub fn module_name(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    file.strip_suffix(".thrift").unwrap_or(file)
}

/// A namespace declaration for a code generation target.
///
/// ```thrift
/// namespace py foo.bar
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Namespace {
    /// Target language scope (`py`, `go`, `*`).
    pub scope: String,
    pub name: String,
    pub line: u32,
}

impl Namespace {
    pub fn new(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Namespace {
            scope: scope.into(),
            name: name.into(),
            line: 0,
        }
    }
}

/// A `key = "value"` annotation.
///
/// ```thrift
/// typedef i64 Timestamp (unit = "milliseconds")
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    pub name: String,
    pub value: String,
    pub line: u32,
}

impl Annotation {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Annotation {
            name: name.into(),
            value: value.into(),
            line: 0,
        }
    }
}

impl_located!(Include, Namespace, Annotation);

#[cfg(test)]
mod tests;

//! Constant value expressions.
//!
//! These appear as the right-hand side of `const` definitions and as field
//! defaults. The linker checks them against their target type.

use super::impl_located;

/// An unchecked constant value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstantValue {
    /// `true` or `false`.
    Bool(bool),
    /// An integer literal.
    ///
    /// Held wider than any Thrift integer type; the linker range-checks it
    /// against the target width.
    Int(i128),
    /// A floating point literal.
    Double(f64),
    /// A string literal.
    String(String),
    /// A reference to another constant or to an enum item.
    Reference(ConstantReference),
    /// `[a, b, c]`
    List(ConstantList),
    /// `{k: v, ...}`
    Map(ConstantMap),
}

impl ConstantValue {
    pub fn int(value: impl Into<i128>) -> Self {
        ConstantValue::Int(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        ConstantValue::String(value.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        ConstantValue::Reference(ConstantReference::new(name))
    }

    pub fn list(items: Vec<ConstantValue>) -> Self {
        ConstantValue::List(ConstantList { items, line: 0 })
    }

    pub fn map(items: Vec<(ConstantValue, ConstantValue)>) -> Self {
        ConstantValue::Map(ConstantMap {
            items: items
                .into_iter()
                .map(|(key, value)| ConstantMapItem {
                    key,
                    value,
                    line: 0,
                })
                .collect(),
            line: 0,
        })
    }

    /// Short description of the literal's shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConstantValue::Bool(_) => "bool literal",
            ConstantValue::Int(_) => "integer literal",
            ConstantValue::Double(_) => "double literal",
            ConstantValue::String(_) => "string literal",
            ConstantValue::Reference(_) => "constant reference",
            ConstantValue::List(_) => "list literal",
            ConstantValue::Map(_) => "map literal",
        }
    }
}

/// A reference to a constant: `MAX`, `shared.MAX`, `Status.Enabled`,
/// `shared.Status.Enabled`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantReference {
    pub name: String,
    pub line: u32,
}

impl ConstantReference {
    pub fn new(name: impl Into<String>) -> Self {
        ConstantReference {
            name: name.into(),
            line: 0,
        }
    }
}

/// A list literal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantList {
    pub items: Vec<ConstantValue>,
    pub line: u32,
}

/// A map literal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantMap {
    pub items: Vec<ConstantMapItem>,
    pub line: u32,
}

/// One `key: value` pair of a map literal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantMapItem {
    pub key: ConstantValue,
    pub value: ConstantValue,
    pub line: u32,
}

impl_located!(ConstantReference, ConstantList, ConstantMap, ConstantMapItem);

//! The resolved type graph.
//!
//! All resolved types live in one `TypePool` and are referenced by their
//! 32-bit `TypeId`. Edges between types (a field's type, a list's element,
//! a typedef's target) are handles, never owning pointers, so recursion
//! through containers (`struct Node { 1: list<Node> children }`) needs no
//! back-references.
//!
//! # Design
//!
//! - Unannotated primitives have fixed handles (`TypeId::I32`, ...)
//! - Containers are interned: `list<i32>` written twice is one handle
//! - Every named type (typedef, enum, struct-like) gets exactly one handle
//! - Every handle carries a precomputed `WireType`

mod builder;
mod format;

pub(crate) use builder::TypePoolBuilder;

use std::collections::BTreeMap;
use std::fmt;

use thrift_ir::{BaseTypeId, StructureKind};

use crate::{ModuleId, TypedValue, WireType};

/// Annotations as resolved: keys are unique, iteration is sorted by key.
pub type Annotations = BTreeMap<String, String>;

/// A 32-bit index into the type pool.
///
/// Types are compared by handle: resolving the same definition from two
/// places yields the same `TypeId`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Primitive Types (indices 0-7) ===
    // Pre-interned at pool creation, without annotations.

    pub const BOOL: Self = Self(0);
    pub const BYTE: Self = Self(1);
    pub const I16: Self = Self(2);
    pub const I32: Self = Self(3);
    pub const I64: Self = Self(4);
    pub const DOUBLE: Self = Self(5);
    pub const STRING: Self = Self(6);
    pub const BINARY: Self = Self(7);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 8;

    /// Create a handle from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is one of the pre-interned primitives.
    #[inline]
    pub const fn is_builtin_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Built-in scalar kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Primitive {
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
}

impl Primitive {
    pub(crate) const ALL: [Primitive; 8] = [
        Primitive::Bool,
        Primitive::Byte,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::Double,
        Primitive::String,
        Primitive::Binary,
    ];

    /// The fixed handle of the unannotated primitive.
    pub const fn type_id(self) -> TypeId {
        match self {
            Primitive::Bool => TypeId::BOOL,
            Primitive::Byte => TypeId::BYTE,
            Primitive::I16 => TypeId::I16,
            Primitive::I32 => TypeId::I32,
            Primitive::I64 => TypeId::I64,
            Primitive::Double => TypeId::DOUBLE,
            Primitive::String => TypeId::STRING,
            Primitive::Binary => TypeId::BINARY,
        }
    }

    pub const fn wire_type(self) -> WireType {
        match self {
            Primitive::Bool => WireType::Bool,
            Primitive::Byte => WireType::Byte,
            Primitive::I16 => WireType::I16,
            Primitive::I32 => WireType::I32,
            Primitive::I64 => WireType::I64,
            Primitive::Double => WireType::Double,
            Primitive::String | Primitive::Binary => WireType::String,
        }
    }

    /// Inclusive value range for integer kinds.
    pub const fn int_range(self) -> Option<(i64, i64)> {
        match self {
            Primitive::Byte => Some((i8::MIN as i64, i8::MAX as i64)),
            Primitive::I16 => Some((i16::MIN as i64, i16::MAX as i64)),
            Primitive::I32 => Some((i32::MIN as i64, i32::MAX as i64)),
            Primitive::I64 => Some((i64::MIN, i64::MAX)),
            Primitive::Bool | Primitive::Double | Primitive::String | Primitive::Binary => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Byte => "byte",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::Double => "double",
            Primitive::String => "string",
            Primitive::Binary => "binary",
        }
    }
}

impl From<BaseTypeId> for Primitive {
    fn from(id: BaseTypeId) -> Self {
        match id {
            BaseTypeId::Bool => Primitive::Bool,
            BaseTypeId::I8 => Primitive::Byte,
            BaseTypeId::I16 => Primitive::I16,
            BaseTypeId::I32 => Primitive::I32,
            BaseTypeId::I64 => Primitive::I64,
            BaseTypeId::Double => Primitive::Double,
            BaseTypeId::String => Primitive::String,
            BaseTypeId::Binary => Primitive::Binary,
        }
    }
}

/// A fully resolved type.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeSpec {
    Primitive {
        kind: Primitive,
        annotations: Annotations,
    },
    List {
        value: TypeId,
        annotations: Annotations,
    },
    Set {
        value: TypeId,
        annotations: Annotations,
    },
    Map {
        key: TypeId,
        value: TypeId,
        annotations: Annotations,
    },
    Typedef(TypedefSpec),
    Enum(EnumSpec),
    Struct(StructSpec),
}

impl TypeSpec {
    /// The declared name of a named type.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeSpec::Typedef(t) => Some(&t.name),
            TypeSpec::Enum(e) => Some(&e.name),
            TypeSpec::Struct(s) => Some(&s.name),
            TypeSpec::Primitive { .. }
            | TypeSpec::List { .. }
            | TypeSpec::Set { .. }
            | TypeSpec::Map { .. } => None,
        }
    }

    pub fn annotations(&self) -> &Annotations {
        match self {
            TypeSpec::Primitive { annotations, .. }
            | TypeSpec::List { annotations, .. }
            | TypeSpec::Set { annotations, .. }
            | TypeSpec::Map { annotations, .. } => annotations,
            TypeSpec::Typedef(t) => &t.annotations,
            TypeSpec::Enum(e) => &e.annotations,
            TypeSpec::Struct(s) => &s.annotations,
        }
    }

    pub fn as_struct(&self) -> Option<&StructSpec> {
        match self {
            TypeSpec::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumSpec> {
        match self {
            TypeSpec::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_typedef(&self) -> Option<&TypedefSpec> {
        match self {
            TypeSpec::Typedef(t) => Some(t),
            _ => None,
        }
    }
}

/// `typedef <target> <name>`
#[derive(Clone, Debug, PartialEq)]
pub struct TypedefSpec {
    pub name: String,
    pub module: ModuleId,
    pub target: TypeId,
    pub annotations: Annotations,
    pub line: u32,
}

/// An enum with its items in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumSpec {
    pub name: String,
    pub module: ModuleId,
    pub items: Vec<EnumItemSpec>,
    pub annotations: Annotations,
    pub line: u32,
}

impl EnumSpec {
    pub fn item(&self, name: &str) -> Option<&EnumItemSpec> {
        self.items.iter().find(|item| item.name == name)
    }

    /// The first item carrying `value` (several items may share a value).
    pub fn item_by_value(&self, value: i64) -> Option<&EnumItemSpec> {
        self.items.iter().find(|item| i64::from(item.value) == value)
    }
}

/// One enum item, with its explicit or auto-assigned value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumItemSpec {
    pub name: String,
    pub value: i32,
    pub annotations: Annotations,
    pub line: u32,
}

/// A struct, union, or exception.
#[derive(Clone, Debug, PartialEq)]
pub struct StructSpec {
    pub name: String,
    pub module: ModuleId,
    pub kind: StructureKind,
    pub fields: Vec<FieldSpec>,
    pub annotations: Annotations,
    pub line: u32,
}

impl StructSpec {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_by_id(&self, id: i16) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id == id)
    }
}

/// Resolved requiredness of a field.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Requiredness {
    /// Must be present on the wire.
    Required,
    /// May be absent; absence is observable.
    Optional,
    /// Present unless explicitly absent. The requiredness of fields that
    /// declared neither `required` nor `optional`.
    Default,
}

/// A resolved field of a struct-like type or a function's parameter or
/// exception list.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub id: i16,
    pub name: String,
    pub ty: TypeId,
    pub requiredness: Requiredness,
    pub default: Option<TypedValue>,
    pub annotations: Annotations,
    pub line: u32,
}

/// A resolved type plus its wire tag.
#[derive(Clone, Debug, PartialEq)]
struct Item {
    spec: TypeSpec,
    wire: WireType,
}

/// The immutable pool of resolved types produced by a compilation.
#[derive(Clone, Debug, Default)]
pub struct TypePool {
    items: Vec<Item>,
}

impl TypePool {
    /// Get the spec behind a handle.
    ///
    /// # Panics
    /// Panics if `id` was not produced by the compilation owning this pool.
    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeSpec {
        &self.items[id.index()].spec
    }

    /// The wire-type tag of a type. Typedefs report their target's tag.
    #[inline]
    pub fn wire_type(&self, id: TypeId) -> WireType {
        self.items[id.index()].wire
    }

    /// Follow typedef targets until reaching a non-typedef type.
    pub fn unwrap_typedefs(&self, mut id: TypeId) -> TypeId {
        while let TypeSpec::Typedef(typedef) = self.get(id) {
            id = typedef.target;
        }
        id
    }

    /// Render a type the way it would be written in IDL.
    pub fn display(&self, id: TypeId) -> String {
        format::render(id, &|id| {
            self.items
                .get(id.index())
                .map(|item| format::View::Spec(&item.spec))
        })
    }

    /// Iterate over every type with its handle.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeSpec)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (type_id_at(index), &item.spec))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn type_id_at(index: usize) -> TypeId {
    TypeId(index as u32)
}

//! Thrift IR - Syntax Tree Types
//!
//! This crate contains the per-file syntax tree produced by the Thrift parser
//! and consumed, read-only, by the linker in `thrift_compile`:
//! - `Program`: one parsed IDL file (headers + definitions)
//! - `Definition`: constants, typedefs, enums, struct-likes, services
//! - `Type` and `ConstantValue`: unresolved type and value expressions
//!
//! # Design Philosophy
//!
//! - **Bare names**: every reference is the identifier exactly as written
//!   (`Foo`, `shared.Foo`, `Status.Enabled`). Nothing here is resolved.
//! - **Lines, not spans**: diagnostics point at the declaration line of the
//!   offending node, so each node carries a 1-based `line`.
//! - **Plain data**: the parser guarantees syntactic well-formedness only.
//!   Semantic checks belong to the linker.
//!
//! With the `serde` feature enabled every type derives `Serialize` and
//! `Deserialize`, so a parser running out of process can hand trees over
//! as data.

pub mod ast;
mod traits;

pub use ast::{
    module_name,
    Annotation, BaseType, BaseTypeId, Constant, ConstantList, ConstantMap, ConstantMapItem,
    ConstantReference, ConstantValue, Definition, Enum, EnumItem, Field, Function, Header,
    Include, ListType, MapType, Namespace, Program, Requiredness, Service, ServiceReference,
    SetType, Struct, StructureKind, Type, TypeReference, Typedef,
};
pub use traits::{Located, Named};

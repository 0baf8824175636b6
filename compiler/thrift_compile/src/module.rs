//! Resolved modules.

use std::collections::BTreeMap;

use crate::{ConstId, ModuleId, ServiceId, TypeId};

/// One resolved source file.
///
/// Name indices are `BTreeMap`s so iteration order does not depend on
/// hashing. Only fully resolved entries appear here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Module {
    /// File stem (`common/shared.thrift` is `shared`).
    pub name: String,
    pub path: String,
    /// Include alias to included module.
    pub includes: BTreeMap<String, ModuleId>,
    /// Namespace scope (`go`, `py`, `*`, ...) to namespace.
    pub namespaces: BTreeMap<String, String>,
    pub constants: BTreeMap<String, ConstId>,
    /// Typedefs, enums, structs, unions, and exceptions.
    pub types: BTreeMap<String, TypeId>,
    pub services: BTreeMap<String, ServiceId>,
}

impl Module {
    pub fn constant(&self, name: &str) -> Option<ConstId> {
        self.constants.get(name).copied()
    }

    pub fn ty(&self, name: &str) -> Option<TypeId> {
        self.types.get(name).copied()
    }

    pub fn service(&self, name: &str) -> Option<ServiceId> {
        self.services.get(name).copied()
    }

    pub fn include(&self, alias: &str) -> Option<ModuleId> {
        self.includes.get(alias).copied()
    }
}

//! Name lookup across a file and its includes.
//!
//! A reference is first looked up as a local name. Otherwise it is split
//! at the first `.` into an include alias and a name in that module.
//! Included modules are fully linked before their includers, so a lookup
//! through an alias always lands on a resolved symbol.

use tracing::trace;

use super::{Linker, Result, Site};
use crate::error::{CompileError, CompileErrorKind};
use crate::pool::{TypeId, TypeSpec};
use crate::scope::Resolved;
use crate::{ConstId, ModuleId, ServiceId};

/// What a constant reference names.
#[derive(Clone, Debug)]
pub(super) enum ConstantTarget {
    Constant(ConstId),
    /// An item of the enum `ty`.
    EnumItem { ty: TypeId, name: String, value: i32 },
}

impl<'a> Linker<'a> {
    /// The module and local name `name` refers to from `module`.
    fn locate(&self, module: ModuleId, name: &'a str) -> Option<(ModuleId, &'a str)> {
        let scope = self.scope(module);
        if scope.contains(name) {
            return Some((module, name));
        }
        let (alias, rest) = name.split_once('.')?;
        let target = scope.included(alias)?;
        self.scope(target).contains(rest).then_some((target, rest))
    }

    fn resolve_reference(
        &mut self,
        module: ModuleId,
        name: &'a str,
        line: u32,
        kind: &'static str,
    ) -> Result<Resolved> {
        let site = Site { module, line };
        match self.locate(module, name) {
            Some((target, local)) => self.resolve_definition(target, local, site),
            None => Err(self.error(
                site,
                CompileErrorKind::UnresolvedReference {
                    kind,
                    name: name.to_owned(),
                },
            )),
        }
    }

    /// Resolve `Name` or `alias.Name` to a type.
    pub(super) fn resolve_type_reference(
        &mut self,
        module: ModuleId,
        name: &'a str,
        line: u32,
    ) -> Result<TypeId> {
        match self.resolve_reference(module, name, line, "type")? {
            Resolved::Type(id) => Ok(id),
            other => Err(self.kind_mismatch(Site { module, line }, name, "type", other)),
        }
    }

    /// Resolve `Name` or `alias.Name` to a service.
    pub(super) fn resolve_service_reference(
        &mut self,
        module: ModuleId,
        name: &'a str,
        line: u32,
    ) -> Result<ServiceId> {
        match self.resolve_reference(module, name, line, "service")? {
            Resolved::Service(id) => Ok(id),
            other => Err(self.kind_mismatch(Site { module, line }, name, "service", other)),
        }
    }

    /// Resolve a constant reference: `NAME`, `alias.NAME`, `Enum.Item`, or
    /// `alias.Enum.Item`.
    pub(super) fn resolve_constant_reference(
        &mut self,
        module: ModuleId,
        name: &'a str,
        line: u32,
    ) -> Result<ConstantTarget> {
        let site = Site { module, line };

        if let Some((target, local)) = self.locate(module, name) {
            return match self.resolve_definition(target, local, site)? {
                Resolved::Constant(id) => Ok(ConstantTarget::Constant(id)),
                other => Err(self.kind_mismatch(site, name, "constant", other)),
            };
        }

        let Some((enum_name, item_name)) = name.rsplit_once('.') else {
            return Err(self.error(
                site,
                CompileErrorKind::UnresolvedReference {
                    kind: "constant",
                    name: name.to_owned(),
                },
            ));
        };
        let Some((target, local)) = self.locate(module, enum_name) else {
            return Err(self.error(
                site,
                CompileErrorKind::UnresolvedReference {
                    kind: "constant",
                    name: name.to_owned(),
                },
            ));
        };
        let ty = match self.resolve_definition(target, local, site)? {
            Resolved::Type(id) => self.types.unwrap_typedefs(id),
            other => return Err(self.kind_mismatch(site, enum_name, "enum", other)),
        };
        let Some(TypeSpec::Enum(spec)) = self.types.spec(ty) else {
            return Err(self.error(
                site,
                CompileErrorKind::KindMismatch {
                    name: enum_name.to_owned(),
                    expected: "enum",
                    found: "type",
                },
            ));
        };
        let Some(item) = spec.item(item_name) else {
            return Err(self.error(
                site,
                CompileErrorKind::UnresolvedReference {
                    kind: "enum item",
                    name: name.to_owned(),
                },
            ));
        };
        trace!(name, value = item.value, "enum item reference");
        Ok(ConstantTarget::EnumItem {
            ty,
            name: item.name.clone(),
            value: item.value,
        })
    }

    fn kind_mismatch(
        &self,
        site: Site,
        name: &str,
        expected: &'static str,
        found: Resolved,
    ) -> CompileError {
        self.error(
            site,
            CompileErrorKind::KindMismatch {
                name: name.to_owned(),
                expected,
                found: found.kind_name(),
            },
        )
    }
}

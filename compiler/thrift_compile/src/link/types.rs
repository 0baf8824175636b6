//! Type expressions and named type definitions.

use rustc_hash::FxHashMap;
use thrift_ir::{Enum, Struct, Type, Typedef};

use super::{DefaultOwner, Linker, PendingDefault, Result, Site};
use crate::error::CompileErrorKind;
use crate::options::FieldContext;
use crate::pool::{
    EnumItemSpec, EnumSpec, Primitive, StructSpec, TypeId, TypeSpec, TypedefSpec,
};
use crate::{ModuleId, WireType};

impl<'a> Linker<'a> {
    /// Resolve a type expression written in `module`.
    pub(super) fn resolve_type(&mut self, module: ModuleId, ty: &'a Type) -> Result<TypeId> {
        match ty {
            Type::Base(base) => {
                let annotations = self.annotations(module, &base.annotations)?;
                Ok(self.types.primitive(base.id.into(), annotations))
            }
            Type::List(list) => {
                let value =
                    self.in_container(|linker| linker.resolve_type(module, &list.value))?;
                let annotations = self.annotations(module, &list.annotations)?;
                Ok(self.types.list(value, annotations))
            }
            Type::Set(set) => {
                let value =
                    self.in_container(|linker| linker.resolve_type(module, &set.value))?;
                let annotations = self.annotations(module, &set.annotations)?;
                Ok(self.types.set(value, annotations))
            }
            Type::Map(map) => {
                let (key, value) = self.in_container(|linker| {
                    let key = linker.resolve_type(module, &map.key)?;
                    let value = linker.resolve_type(module, &map.value)?;
                    Ok((key, value))
                })?;
                let annotations = self.annotations(module, &map.annotations)?;
                Ok(self.types.map(key, value, annotations))
            }
            Type::Reference(reference) => {
                self.resolve_type_reference(module, &reference.name, reference.line)
            }
        }
    }

    /// Resolve `typedef <target> <name>`. A target written as a base type
    /// or container fixes the wire type before the target resolves, so
    /// recursion through the container links in any declaration order.
    pub(super) fn resolve_typedef(
        &mut self,
        module: ModuleId,
        typedef: &'a Typedef,
    ) -> Result<TypeId> {
        let id = self.reserve_type(module, &typedef.name, written_wire_type(&typedef.ty));
        let target = self.resolve_type(module, &typedef.ty)?;
        let site = Site {
            module,
            line: typedef.line,
        };
        // Typedefs share their target's wire type.
        let Some(wire) = self.types.wire(target) else {
            return Err(self.cycle_through(target, site));
        };
        let annotations = self.annotations(module, &typedef.annotations)?;
        self.types.fill(
            id,
            TypeSpec::Typedef(TypedefSpec {
                name: typedef.name.clone(),
                module,
                target,
                annotations,
                line: typedef.line,
            }),
            wire,
        );
        Ok(id)
    }

    pub(super) fn resolve_enum(
        &mut self,
        module: ModuleId,
        enumeration: &'a Enum,
    ) -> Result<TypeId> {
        let mut items = Vec::with_capacity(enumeration.items.len());
        let mut seen: FxHashMap<&str, u32> = FxHashMap::default();
        let mut next: i64 = 0;

        for item in &enumeration.items {
            let site = Site {
                module,
                line: item.line,
            };
            if let Some(&previous_line) = seen.get(item.name.as_str()) {
                return Err(self.error(
                    site,
                    CompileErrorKind::Redefinition {
                        name: format!("{}.{}", enumeration.name, item.name),
                        previous_line,
                    },
                ));
            }
            seen.insert(&item.name, item.line);

            let raw = item.value.unwrap_or(next);
            let Ok(value) = i32::try_from(raw) else {
                return Err(self.error(
                    site,
                    CompileErrorKind::ConstantRange {
                        value: raw.to_string(),
                        ty: "i32".to_owned(),
                    },
                ));
            };
            next = i64::from(value) + 1;

            items.push(EnumItemSpec {
                name: item.name.clone(),
                value,
                annotations: self.annotations(module, &item.annotations)?,
                line: item.line,
            });
        }

        let annotations = self.annotations(module, &enumeration.annotations)?;
        let id = self.reserve_type(module, &enumeration.name, Some(WireType::I32));
        self.types.fill(
            id,
            TypeSpec::Enum(EnumSpec {
                name: enumeration.name.clone(),
                module,
                items,
                annotations,
                line: enumeration.line,
            }),
            WireType::I32,
        );
        Ok(id)
    }

    /// Resolve a struct, union, or exception. Field defaults are queued
    /// and evaluated once every type exists.
    pub(super) fn resolve_struct(
        &mut self,
        module: ModuleId,
        structure: &'a Struct,
    ) -> Result<TypeId> {
        let id = self.reserve_type(module, &structure.name, Some(WireType::Struct));
        let fields = self.resolve_fields(
            module,
            &structure.fields,
            FieldContext::Structure(structure.kind),
        )?;
        let annotations = self.annotations(module, &structure.annotations)?;

        for (field, value) in fields.defaults {
            self.pending_defaults.push(PendingDefault {
                module,
                owner: DefaultOwner::Struct(id),
                field,
                value,
            });
        }
        self.types.fill(
            id,
            TypeSpec::Struct(StructSpec {
                name: structure.name.clone(),
                module,
                kind: structure.kind,
                fields: fields.specs,
                annotations,
                line: structure.line,
            }),
            WireType::Struct,
        );
        Ok(id)
    }
}

/// The wire type a type expression has regardless of what its references
/// resolve to. `None` for references.
fn written_wire_type(ty: &Type) -> Option<WireType> {
    match ty {
        Type::Base(base) => Some(Primitive::from(base.id).wire_type()),
        Type::List(_) => Some(WireType::List),
        Type::Set(_) => Some(WireType::Set),
        Type::Map(_) => Some(WireType::Map),
        Type::Reference(_) => None,
    }
}

//! Field lists of struct-likes and functions.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use thrift_ir::{ConstantValue, Field, Requiredness as Declared, StructureKind};

use super::{Linker, Result, Site};
use crate::error::CompileErrorKind;
use crate::options::FieldContext;
use crate::pool::{FieldSpec, Requiredness};
use crate::ModuleId;

/// Resolved fields plus the defaults still to evaluate, by field index.
pub(super) struct ResolvedFields<'a> {
    pub(super) specs: Vec<FieldSpec>,
    pub(super) defaults: SmallVec<[(usize, &'a ConstantValue); 4]>,
}

impl<'a> Linker<'a> {
    /// Resolve one field list. IDs and names must be unique within it.
    pub(super) fn resolve_fields(
        &mut self,
        module: ModuleId,
        fields: &'a [Field],
        context: FieldContext,
    ) -> Result<ResolvedFields<'a>> {
        let mut ids: FxHashMap<i16, &str> = FxHashMap::default();
        let mut names: FxHashSet<&str> = FxHashSet::default();
        let mut resolved = ResolvedFields {
            specs: Vec::with_capacity(fields.len()),
            defaults: SmallVec::new(),
        };

        for field in fields {
            let site = Site {
                module,
                line: field.line,
            };
            if let Some(previous) = ids.insert(field.id, &field.name) {
                return Err(self.error(
                    site,
                    CompileErrorKind::DuplicateFieldId {
                        id: field.id,
                        name: field.name.clone(),
                        previous: previous.to_owned(),
                    },
                ));
            }
            if !names.insert(&field.name) {
                return Err(self.error(
                    site,
                    CompileErrorKind::DuplicateFieldName {
                        name: field.name.clone(),
                    },
                ));
            }

            let requiredness = self.requiredness(field, context, site)?;
            if context == FieldContext::Structure(StructureKind::Union) && field.default.is_some() {
                return Err(self.error(
                    site,
                    CompileErrorKind::InvalidUnionField {
                        field: field.name.clone(),
                        reason: "cannot have a default value",
                    },
                ));
            }

            let ty = self.resolve_type(module, &field.ty)?;
            let annotations = self.annotations(module, &field.annotations)?;
            if let Some(default) = &field.default {
                resolved.defaults.push((resolved.specs.len(), default));
            }
            resolved.specs.push(FieldSpec {
                id: field.id,
                name: field.name.clone(),
                ty,
                requiredness,
                default: None,
                annotations,
                line: field.line,
            });
        }

        Ok(resolved)
    }

    fn requiredness(
        &self,
        field: &Field,
        context: FieldContext,
        site: Site,
    ) -> Result<Requiredness> {
        match field.requiredness {
            Declared::Required if context == FieldContext::Structure(StructureKind::Union) => {
                Err(self.error(
                    site,
                    CompileErrorKind::InvalidUnionField {
                        field: field.name.clone(),
                        reason: "cannot be required",
                    },
                ))
            }
            Declared::Required => Ok(Requiredness::Required),
            Declared::Optional => Ok(Requiredness::Optional),
            Declared::Unspecified => self.options.default_requiredness(context).ok_or_else(|| {
                self.error(
                    site,
                    CompileErrorKind::MissingRequiredness {
                        field: field.name.clone(),
                    },
                )
            }),
        }
    }
}

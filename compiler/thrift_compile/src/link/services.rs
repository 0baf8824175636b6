//! Services, inheritance, and functions.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use thrift_ir::{ConstantValue, Function, Service, StructureKind};

use super::{DefaultOwner, FunctionFields, Linker, PendingDefault, Result, Site};
use crate::error::CompileErrorKind;
use crate::options::FieldContext;
use crate::pool::{FieldSpec, TypeSpec};
use crate::service::{FunctionSpec, ServiceSpec};
use crate::{ModuleId, ServiceId};

type FunctionDefaults<'a> = SmallVec<[(FunctionFields, usize, &'a ConstantValue); 4]>;

impl<'a> Linker<'a> {
    /// Resolve a service. The parent is resolved first; a service that
    /// extends itself, directly or through ancestors, is a cycle.
    pub(super) fn resolve_service(
        &mut self,
        module: ModuleId,
        service: &'a Service,
    ) -> Result<ServiceId> {
        let parent = match &service.parent {
            Some(parent) => {
                Some(self.resolve_service_reference(module, &parent.name, parent.line)?)
            }
            None => None,
        };
        let inherited = self.inherited_functions(parent);

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut functions = Vec::with_capacity(service.functions.len());
        let mut defaults: SmallVec<[(usize, FunctionFields, usize, &'a ConstantValue); 4]> =
            SmallVec::new();

        for function in &service.functions {
            let site = Site {
                module,
                line: function.line,
            };
            if !seen.insert(&function.name) {
                return Err(self.error(
                    site,
                    CompileErrorKind::DuplicateFunctionName {
                        name: function.name.clone(),
                        inherited_from: None,
                    },
                ));
            }
            if let Some(owner) = inherited.get(function.name.as_str()) {
                return Err(self.error(
                    site,
                    CompileErrorKind::DuplicateFunctionName {
                        name: function.name.clone(),
                        inherited_from: Some(owner.clone()),
                    },
                ));
            }

            let (spec, function_defaults) = self.resolve_function(module, function)?;
            for (list, field, value) in function_defaults {
                defaults.push((functions.len(), list, field, value));
            }
            functions.push(spec);
        }

        let annotations = self.annotations(module, &service.annotations)?;
        let id = ServiceId::next(self.services.len());
        self.services.push(ServiceSpec {
            name: service.name.clone(),
            module,
            functions,
            parent,
            annotations,
            line: service.line,
        });
        for (function, list, field, value) in defaults {
            self.pending_defaults.push(PendingDefault {
                module,
                owner: DefaultOwner::Function {
                    service: id,
                    function,
                    list,
                },
                field,
                value,
            });
        }
        Ok(id)
    }

    /// Function names defined anywhere in the ancestor chain, mapped to the
    /// service defining them.
    fn inherited_functions(&self, mut parent: Option<ServiceId>) -> FxHashMap<String, String> {
        let mut inherited = FxHashMap::default();
        while let Some(id) = parent {
            let Some(service) = self.services.get(id.index()) else {
                break;
            };
            for function in &service.functions {
                inherited
                    .entry(function.name.clone())
                    .or_insert_with(|| service.name.clone());
            }
            parent = service.parent;
        }
        inherited
    }

    fn resolve_function(
        &mut self,
        module: ModuleId,
        function: &'a Function,
    ) -> Result<(FunctionSpec, FunctionDefaults<'a>)> {
        let site = Site {
            module,
            line: function.line,
        };
        if function.one_way {
            let problem = if function.return_type.is_some() {
                Some("must return void")
            } else if !function.exceptions.is_empty() {
                Some("cannot declare exceptions")
            } else {
                None
            };
            if let Some(reason) = problem {
                return Err(self.error(
                    site,
                    CompileErrorKind::InvalidOneway {
                        function: function.name.clone(),
                        reason,
                    },
                ));
            }
        }

        let parameters =
            self.resolve_fields(module, &function.parameters, FieldContext::Parameters)?;
        let exceptions = self.resolve_fields(module, &function.exceptions, FieldContext::Throws)?;
        for exception in &exceptions.specs {
            self.check_exception(module, function, exception)?;
        }
        let return_type = match &function.return_type {
            Some(ty) => Some(self.resolve_type(module, ty)?),
            None => None,
        };
        let annotations = self.annotations(module, &function.annotations)?;

        let mut defaults = FunctionDefaults::new();
        for (field, value) in parameters.defaults {
            defaults.push((FunctionFields::Parameters, field, value));
        }
        for (field, value) in exceptions.defaults {
            defaults.push((FunctionFields::Exceptions, field, value));
        }

        let spec = FunctionSpec {
            name: function.name.clone(),
            parameters: parameters.specs,
            return_type,
            exceptions: exceptions.specs,
            one_way: function.one_way,
            annotations,
            line: function.line,
        };
        Ok((spec, defaults))
    }

    /// A `throws` entry must name an exception, possibly through typedefs.
    fn check_exception(
        &self,
        module: ModuleId,
        function: &Function,
        exception: &FieldSpec,
    ) -> Result<()> {
        let ty = self.types.unwrap_typedefs(exception.ty);
        match self.types.spec(ty) {
            Some(TypeSpec::Struct(spec)) if spec.kind == StructureKind::Exception => Ok(()),
            _ => Err(self.error(
                Site {
                    module,
                    line: exception.line,
                },
                CompileErrorKind::InvalidThrows {
                    function: function.name.clone(),
                    field: exception.name.clone(),
                    found: self.types.display(exception.ty),
                },
            )),
        }
    }
}

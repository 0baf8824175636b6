//! The linker: turns a set of parsed files into a `Compilation`.
//!
//! # Passes
//!
//! 1. **Load**: starting at the root file, includes are loaded depth-first
//!    so every included module is fully linked before the file including
//!    it. Include cycles are rejected here.
//! 2. **Resolve**: each file's definitions are resolved on demand with
//!    memoization. A reference to a pending definition resolves it first,
//!    so forward references are legal.
//! 3. **Defaults**: field and parameter default values are evaluated once
//!    every type exists, since a default may name a type that is still
//!    being resolved when the field is seen.
//!
//! # Cycles
//!
//! A symbol being resolved is marked in progress together with the
//! container depth at which resolution started. Named types also reserve
//! their handle before resolving their parts. Re-entering an in-progress
//! type is legal only from deeper inside a list, set, or map than where it
//! started: `struct Node { 1: list<Node> children }` links,
//! `struct Node { 1: Node next }` does not. Re-entering a constant or a
//! service is always a cycle.

mod annotations;
mod constants;
mod fields;
mod lookup;
mod services;
mod types;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thrift_ir::{ConstantValue, Definition, Located, Named, Program};
use tracing::{debug, trace};

use crate::compilation::Compilation;
use crate::error::{CompileError, CompileErrorKind};
use crate::options::CompileOptions;
use crate::pool::{FieldSpec, TypeId, TypePoolBuilder};
use crate::scope::{Resolved, Scope, State};
use crate::service::ServiceSpec;
use crate::source::SourceSet;
use crate::value::{ConstantSpec, TypedValue};
use crate::{ConstId, Module, ModuleId, ServiceId, WireType};

type Result<T> = std::result::Result<T, CompileError>;

/// Where a node was written, for error locations.
#[derive(Copy, Clone, Debug)]
struct Site {
    module: ModuleId,
    line: u32,
}

/// A symbol on the resolution stack.
#[derive(Copy, Clone, Debug)]
struct Frame<'a> {
    module: ModuleId,
    name: &'a str,
    line: u32,
    reserved: Option<TypeId>,
}

/// Which field list of a function a default belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum FunctionFields {
    Parameters,
    Exceptions,
}

/// The field a deferred default value belongs to.
#[derive(Copy, Clone, Debug)]
enum DefaultOwner {
    Struct(TypeId),
    Function {
        service: ServiceId,
        function: usize,
        list: FunctionFields,
    },
}

#[derive(Debug)]
struct PendingDefault<'a> {
    module: ModuleId,
    owner: DefaultOwner,
    field: usize,
    value: &'a ConstantValue,
}

pub(crate) struct Linker<'a> {
    sources: &'a SourceSet,
    options: &'a CompileOptions,
    /// One scope per loaded file, indexed by `ModuleId`.
    scopes: Vec<Scope<'a>>,
    modules: Vec<Module>,
    module_ids: FxHashMap<&'a str, ModuleId>,
    /// Files whose includes are being loaded.
    loading: Vec<&'a str>,
    types: TypePoolBuilder,
    constants: Vec<ConstantSpec>,
    services: Vec<ServiceSpec>,
    stack: SmallVec<[Frame<'a>; 8]>,
    container_depth: u32,
    pending_defaults: Vec<PendingDefault<'a>>,
}

impl<'a> Linker<'a> {
    pub(crate) fn new(sources: &'a SourceSet, options: &'a CompileOptions) -> Self {
        Linker {
            sources,
            options,
            scopes: Vec::with_capacity(sources.len()),
            modules: Vec::with_capacity(sources.len()),
            module_ids: FxHashMap::default(),
            loading: Vec::new(),
            types: TypePoolBuilder::new(),
            constants: Vec::new(),
            services: Vec::new(),
            stack: SmallVec::new(),
            container_depth: 0,
            pending_defaults: Vec::new(),
        }
    }

    /// Link `root` and everything it includes.
    pub(crate) fn link(mut self, root: &str) -> Result<Compilation> {
        let sources = self.sources;
        let Some((root_path, program)) = sources.entry(root) else {
            return Err(CompileError::new(
                root,
                0,
                CompileErrorKind::UnresolvedInclude {
                    path: root.to_owned(),
                },
            ));
        };
        let root_id = self.load_module(root_path, program)?;
        self.resolve_defaults()?;
        self.finish(root_id)
    }

    // === Pass 1: include graph ===

    fn load_module(&mut self, path: &'a str, program: &'a Program) -> Result<ModuleId> {
        if let Some(&id) = self.module_ids.get(path) {
            return Ok(id);
        }

        self.loading.push(path);
        let mut includes: SmallVec<[(&'a str, ModuleId, u32); 4]> = SmallVec::new();
        let sources = self.sources;
        for include in program.includes() {
            let Some((child_path, child)) = sources.resolve_include(path, &include.path) else {
                return Err(CompileError::new(
                    path,
                    include.line,
                    CompileErrorKind::UnresolvedInclude {
                        path: include.path.clone(),
                    },
                ));
            };
            if let Some(start) = self.loading.iter().position(|p| *p == child_path) {
                let mut chain: Vec<String> = self.loading[start..]
                    .iter()
                    .map(|p| (*p).to_owned())
                    .collect();
                chain.push(child_path.to_owned());
                debug!(?chain, "include cycle");
                return Err(CompileError::new(
                    path,
                    include.line,
                    CompileErrorKind::CircularReference { chain },
                ));
            }
            let child_id = self.load_module(child_path, child)?;
            includes.push((include.alias(), child_id, include.line));
        }
        self.loading.pop();

        let id = ModuleId::next(self.scopes.len());
        let mut scope = Scope::new(path, program);
        for (alias, module, line) in includes {
            scope
                .include(alias, module, line)
                .map_err(|kind| CompileError::new(path, line, kind))?;
        }
        for (index, definition) in program.definitions.iter().enumerate() {
            scope
                .define(index)
                .map_err(|kind| CompileError::new(path, definition.line(), kind))?;
        }
        self.scopes.push(scope);
        self.module_ids.insert(path, id);

        // === Pass 2: definitions ===
        for definition in &program.definitions {
            let site = Site {
                module: id,
                line: definition.line(),
            };
            self.resolve_definition(id, definition.name(), site)?;
        }

        let module = self.export_module(id)?;
        debug!(
            path,
            types = module.types.len(),
            constants = module.constants.len(),
            services = module.services.len(),
            "module linked"
        );
        self.modules.push(module);
        Ok(id)
    }

    /// Build the public view of a fully resolved file.
    fn export_module(&self, id: ModuleId) -> Result<Module> {
        let scope = self.scope(id);
        let mut module = Module {
            name: thrift_ir::module_name(scope.path).to_owned(),
            path: scope.path.to_owned(),
            ..Module::default()
        };
        for (alias, included) in scope.includes() {
            module.includes.insert(alias.to_owned(), included);
        }
        for namespace in scope.program.namespaces() {
            module
                .namespaces
                .insert(namespace.scope.clone(), namespace.name.clone());
        }
        for definition in &scope.program.definitions {
            let name = definition.name().to_owned();
            match scope.state(definition.name()) {
                Some(State::Resolved(Resolved::Type(ty))) => {
                    module.types.insert(name, ty);
                }
                Some(State::Resolved(Resolved::Constant(constant))) => {
                    module.constants.insert(name, constant);
                }
                Some(State::Resolved(Resolved::Service(service))) => {
                    module.services.insert(name, service);
                }
                _ => {
                    return Err(self.internal(
                        Site {
                            module: id,
                            line: definition.line(),
                        },
                        format!("{name:?} left unresolved"),
                    ));
                }
            }
        }
        Ok(module)
    }

    // === Pass 2: on-demand resolution ===

    /// Resolve a top-level definition of `module`, memoized.
    ///
    /// `site` is where the reference was written; cycle errors point there.
    fn resolve_definition(&mut self, module: ModuleId, name: &str, site: Site) -> Result<Resolved> {
        let Some((definition, state)) = self.scope(module).lookup(name) else {
            return Err(self.internal(site, format!("{name:?} is not defined")));
        };

        match state {
            State::Resolved(resolved) => Ok(resolved),
            State::InProgress { depth, reserved } => match reserved {
                Some(id) if self.container_depth > depth => {
                    trace!(name, "recursive reference through a container");
                    Ok(Resolved::Type(id))
                }
                _ => Err(self.cycle_error(module, name, site)),
            },
            State::Pending => {
                let name = definition.name();
                let depth = self.container_depth;
                trace!(name, depth, "resolving");
                self.scope_mut(module).set_state(
                    name,
                    State::InProgress {
                        depth,
                        reserved: None,
                    },
                );
                self.stack.push(Frame {
                    module,
                    name,
                    line: definition.line(),
                    reserved: None,
                });

                let result = match definition {
                    Definition::Constant(constant) => self
                        .resolve_constant(module, constant)
                        .map(Resolved::Constant),
                    Definition::Typedef(typedef) => {
                        self.resolve_typedef(module, typedef).map(Resolved::Type)
                    }
                    Definition::Enum(enumeration) => {
                        self.resolve_enum(module, enumeration).map(Resolved::Type)
                    }
                    Definition::Struct(structure) => {
                        self.resolve_struct(module, structure).map(Resolved::Type)
                    }
                    Definition::Service(service) => {
                        self.resolve_service(module, service).map(Resolved::Service)
                    }
                };

                self.stack.pop();
                let resolved = result?;
                self.scope_mut(module)
                    .set_state(name, State::Resolved(resolved));
                Ok(resolved)
            }
        }
    }

    /// Allocate the handle of the named type on top of the stack, making
    /// it reachable through containers while its parts resolve.
    fn reserve_type(&mut self, module: ModuleId, name: &str, wire: Option<WireType>) -> TypeId {
        let id = self.types.reserve(name, wire);
        let depth = match self.scope(module).state(name) {
            Some(State::InProgress { depth, .. }) => depth,
            _ => self.container_depth,
        };
        self.scope_mut(module).set_state(
            name,
            State::InProgress {
                depth,
                reserved: Some(id),
            },
        );
        if let Some(frame) = self.stack.last_mut() {
            frame.reserved = Some(id);
        }
        id
    }

    /// Run `f` one container level deeper.
    fn in_container<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.container_depth += 1;
        let result = f(self);
        self.container_depth -= 1;
        result
    }

    // === Pass 3: deferred defaults ===

    fn resolve_defaults(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending_defaults);
        debug!(count = pending.len(), "evaluating field defaults");
        for default in pending {
            let Some((ty, line)) = self
                .default_slot(default.owner, default.field)
                .map(|field| (field.ty, field.line))
            else {
                return Err(self.internal(
                    Site {
                        module: default.module,
                        line: 0,
                    },
                    format!("no field #{} for {:?}", default.field, default.owner),
                ));
            };
            let value = self.eval_constant(default.module, default.value, ty, line)?;
            if let Some(field) = self.default_slot(default.owner, default.field) {
                field.default = Some(TypedValue { ty, value });
            }
        }
        Ok(())
    }

    fn default_slot(&mut self, owner: DefaultOwner, field: usize) -> Option<&mut FieldSpec> {
        match owner {
            DefaultOwner::Struct(id) => self.types.struct_mut(id)?.fields.get_mut(field),
            DefaultOwner::Function {
                service,
                function,
                list,
            } => {
                let function = self
                    .services
                    .get_mut(service.index())?
                    .functions
                    .get_mut(function)?;
                match list {
                    FunctionFields::Parameters => function.parameters.get_mut(field),
                    FunctionFields::Exceptions => function.exceptions.get_mut(field),
                }
            }
        }
    }

    fn finish(self, root: ModuleId) -> Result<Compilation> {
        let types = match self.types.finish() {
            Ok(types) => types,
            Err(id) => {
                return Err(CompileError::new(
                    self.scopes.get(root.index()).map_or("", |scope| scope.path),
                    0,
                    CompileErrorKind::Internal {
                        message: format!("{id:?} was reserved but never resolved"),
                    },
                ));
            }
        };
        Ok(Compilation {
            root,
            modules: self.modules,
            module_ids: self
                .module_ids
                .into_iter()
                .map(|(path, id)| (path.to_owned(), id))
                .collect(),
            types,
            constants: self.constants,
            services: self.services,
        })
    }

    // === Helpers ===

    fn scope(&self, module: ModuleId) -> &Scope<'a> {
        &self.scopes[module.index()]
    }

    fn scope_mut(&mut self, module: ModuleId) -> &mut Scope<'a> {
        &mut self.scopes[module.index()]
    }

    fn constant(&self, id: ConstId) -> Option<&ConstantSpec> {
        self.constants.get(id.index())
    }

    /// Error at `site`. Nodes built without a line are reported at the
    /// definition being resolved.
    fn error(&self, site: Site, kind: CompileErrorKind) -> CompileError {
        let line = match (site.line, self.stack.last()) {
            (0, Some(frame)) if frame.module == site.module => frame.line,
            (line, _) => line,
        };
        CompileError::new(self.scope(site.module).path, line, kind)
    }

    fn internal(&self, site: Site, message: String) -> CompileError {
        self.error(site, CompileErrorKind::Internal { message })
    }

    /// Cycle error for re-entering `name` while it is on the stack.
    fn cycle_error(&self, module: ModuleId, name: &str, site: Site) -> CompileError {
        let start = self
            .stack
            .iter()
            .position(|frame| frame.module == module && frame.name == name)
            .unwrap_or(0);
        let mut chain: Vec<String> = self.stack[start..]
            .iter()
            .map(|frame| frame.name.to_owned())
            .collect();
        chain.push(name.to_owned());
        debug!(?chain, "illegal cycle");
        self.error(site, CompileErrorKind::CircularReference { chain })
    }

    /// Cycle error for a type whose wire type depends on itself.
    fn cycle_through(&self, target: TypeId, site: Site) -> CompileError {
        match self
            .stack
            .iter()
            .find(|frame| frame.reserved == Some(target))
        {
            Some(frame) => self.cycle_error(frame.module, frame.name, site),
            None => self.internal(site, format!("{target:?} has no wire type")),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

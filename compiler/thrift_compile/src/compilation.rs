//! The result of a successful compilation.

use rustc_hash::FxHashMap;

use crate::pool::{TypeId, TypePool};
use crate::service::{FunctionSpec, ServiceSpec};
use crate::value::{ConstantSpec, Value};
use crate::{ConstId, Module, ModuleId, ServiceId};

/// Immutable, fully resolved graph for one compilation run.
///
/// Owns every module, type, constant, and service. Handles returned by
/// its accessors are only meaningful for this compilation.
#[derive(Clone, Debug)]
pub struct Compilation {
    pub(crate) root: ModuleId,
    pub(crate) modules: Vec<Module>,
    pub(crate) module_ids: FxHashMap<String, ModuleId>,
    pub(crate) types: TypePool,
    pub(crate) constants: Vec<ConstantSpec>,
    pub(crate) services: Vec<ServiceSpec>,
}

impl Compilation {
    #[inline]
    pub fn root(&self) -> ModuleId {
        self.root
    }

    pub fn root_module(&self) -> &Module {
        self.module(self.root)
    }

    /// # Panics
    /// Panics if `id` does not belong to this compilation.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    /// The module compiled from `path`, if that file took part.
    pub fn module_by_path(&self, path: &str) -> Option<&Module> {
        self.module_ids.get(path).map(|&id| self.module(id))
    }

    pub fn module_id(&self, path: &str) -> Option<ModuleId> {
        self.module_ids.get(path).copied()
    }

    /// Every module, in compilation order (includes before includers).
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(index, module)| (ModuleId::next(index), module))
    }

    #[inline]
    pub fn types(&self) -> &TypePool {
        &self.types
    }

    pub fn constant(&self, id: ConstId) -> &ConstantSpec {
        &self.constants[id.index()]
    }

    pub fn service(&self, id: ServiceId) -> &ServiceSpec {
        &self.services[id.index()]
    }

    /// The service's full function set: the root ancestor's functions
    /// first, the service's own functions last, each in declaration order.
    pub fn service_functions(&self, id: ServiceId) -> Vec<&FunctionSpec> {
        let mut chain = vec![self.service(id)];
        let mut current = self.service(id).parent;
        while let Some(parent) = current {
            let spec = self.service(parent);
            chain.push(spec);
            current = spec.parent;
        }
        chain
            .into_iter()
            .rev()
            .flat_map(|service| service.functions.iter())
            .collect()
    }

    /// Look up a named type as it would be referenced from `module`:
    /// `Name` or `alias.Name`.
    pub fn lookup_type(&self, module: ModuleId, name: &str) -> Option<TypeId> {
        let module = self.module(module);
        if let Some(id) = module.ty(name) {
            return Some(id);
        }
        let (alias, rest) = name.split_once('.')?;
        self.module(module.include(alias)?).ty(rest)
    }

    /// Follow constant references until reaching a literal value.
    pub fn resolve_value<'a>(&'a self, mut value: &'a Value) -> &'a Value {
        while let Value::Reference(id) = value {
            value = &self.constant(*id).value.value;
        }
        value
    }
}

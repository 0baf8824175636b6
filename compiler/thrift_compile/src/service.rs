//! Resolved services and functions.

use crate::pool::{Annotations, FieldSpec, TypeId, TypePool};
use crate::{ModuleId, ServiceId, WireType};

/// A resolved service.
///
/// `parent` is a non-owning handle into the same compilation; the
/// compilation owns every service.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceSpec {
    pub name: String,
    pub module: ModuleId,
    /// The service's own functions, in declaration order.
    pub functions: Vec<FunctionSpec>,
    pub parent: Option<ServiceId>,
    pub annotations: Annotations,
    pub line: u32,
}

impl ServiceSpec {
    /// Find one of this service's own functions.
    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// A resolved function.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionSpec {
    pub name: String,
    pub parameters: Vec<FieldSpec>,
    /// `None` for `void`.
    pub return_type: Option<TypeId>,
    pub exceptions: Vec<FieldSpec>,
    pub one_way: bool,
    pub annotations: Annotations,
    pub line: u32,
}

impl FunctionSpec {
    /// Wire type of the success result; `Void` when nothing is returned.
    pub fn result_wire_type(&self, pool: &TypePool) -> WireType {
        self.return_type
            .map_or(WireType::Void, |ty| pool.wire_type(ty))
    }
}

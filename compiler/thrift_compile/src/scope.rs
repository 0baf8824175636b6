//! Per-file symbol tables.
//!
//! A `Scope` maps each top-level name of one file to its definition and
//! resolution state, and each include alias to the included module. Scopes
//! live only while linking; their resolved entries end up in the file's
//! `Module`.

use rustc_hash::FxHashMap;
use thrift_ir::{Definition, Located, Named, Program};

use crate::error::CompileErrorKind;
use crate::{ConstId, ModuleId, ServiceId, TypeId};

/// A resolved top-level symbol.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Resolved {
    Type(TypeId),
    Constant(ConstId),
    Service(ServiceId),
}

impl Resolved {
    pub(crate) fn kind_name(self) -> &'static str {
        match self {
            Resolved::Type(_) => "type",
            Resolved::Constant(_) => "constant",
            Resolved::Service(_) => "service",
        }
    }
}

/// Resolution state of one symbol.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum State {
    Pending,
    /// Being resolved. `depth` is the container depth at which resolution
    /// started; `reserved` is the handle allocated for a named type.
    InProgress {
        depth: u32,
        reserved: Option<TypeId>,
    },
    Resolved(Resolved),
}

#[derive(Copy, Clone, Debug)]
struct Entry {
    index: usize,
    state: State,
}

#[derive(Copy, Clone, Debug)]
struct IncludeEntry {
    module: ModuleId,
    line: u32,
}

pub(crate) struct Scope<'a> {
    pub(crate) path: &'a str,
    pub(crate) program: &'a Program,
    entries: FxHashMap<&'a str, Entry>,
    includes: FxHashMap<&'a str, IncludeEntry>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(path: &'a str, program: &'a Program) -> Self {
        Scope {
            path,
            program,
            entries: FxHashMap::default(),
            includes: FxHashMap::default(),
        }
    }

    /// Register the definition at `index` of the program as pending.
    ///
    /// Names share one namespace per file regardless of kind.
    pub(crate) fn define(&mut self, index: usize) -> Result<(), CompileErrorKind> {
        let Some(definition) = self.program.definitions.get(index) else {
            return Err(CompileErrorKind::Internal {
                message: format!("definition #{index} is out of bounds"),
            });
        };
        let name = definition.name();
        if let Some(previous) = self.entries.get(name) {
            return Err(CompileErrorKind::Redefinition {
                name: name.to_owned(),
                previous_line: self.line_of(previous.index),
            });
        }
        self.entries.insert(
            name,
            Entry {
                index,
                state: State::Pending,
            },
        );
        Ok(())
    }

    /// Register an include alias.
    pub(crate) fn include(
        &mut self,
        alias: &'a str,
        module: ModuleId,
        line: u32,
    ) -> Result<(), CompileErrorKind> {
        if let Some(previous) = self.includes.get(alias) {
            return Err(CompileErrorKind::Redefinition {
                name: alias.to_owned(),
                previous_line: previous.line,
            });
        }
        self.includes.insert(alias, IncludeEntry { module, line });
        Ok(())
    }

    pub(crate) fn included(&self, alias: &str) -> Option<ModuleId> {
        self.includes.get(alias).map(|entry| entry.module)
    }

    pub(crate) fn includes(&self) -> impl Iterator<Item = (&'a str, ModuleId)> + '_ {
        self.includes
            .iter()
            .map(|(alias, entry)| (*alias, entry.module))
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The definition and current state of a local name.
    pub(crate) fn lookup(&self, name: &str) -> Option<(&'a Definition, State)> {
        let entry = self.entries.get(name)?;
        let definition = self.program.definitions.get(entry.index)?;
        Some((definition, entry.state))
    }

    pub(crate) fn state(&self, name: &str) -> Option<State> {
        self.entries.get(name).map(|entry| entry.state)
    }

    pub(crate) fn set_state(&mut self, name: &str, state: State) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.state = state;
        }
    }

    fn line_of(&self, index: usize) -> u32 {
        self.program
            .definitions
            .get(index)
            .map_or(0, Located::line)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;
    use thrift_ir::{BaseTypeId, Constant, ConstantValue, Struct, Type, Typedef};

    use super::*;

    fn program() -> Program {
        Program::new()
            .with_definition(Typedef::new("Id", Type::base(BaseTypeId::I64)).at(1))
            .with_definition(Struct::structure("User", vec![]).at(2))
            .with_definition(
                Constant::new("Id", Type::base(BaseTypeId::I32), ConstantValue::int(1)).at(5),
            )
    }

    #[test]
    fn test_redefinition_across_kinds() {
        let program = program();
        let mut scope = Scope::new("a.thrift", &program);
        scope.define(0).unwrap();
        scope.define(1).unwrap();
        let err = scope.define(2).unwrap_err();
        assert_eq!(
            err,
            CompileErrorKind::Redefinition {
                name: "Id".to_owned(),
                previous_line: 1,
            }
        );
    }

    #[test]
    fn test_lookup_and_state() {
        let program = program();
        let mut scope = Scope::new("a.thrift", &program);
        scope.define(1).unwrap();
        let (definition, state) = scope.lookup("User").unwrap();
        assert_eq!(definition.name(), "User");
        assert_eq!(state, State::Pending);
        assert!(scope.lookup("Missing").is_none());

        scope.set_state("User", State::Resolved(Resolved::Type(TypeId::from_raw(9))));
        assert_eq!(
            scope.state("User"),
            Some(State::Resolved(Resolved::Type(TypeId::from_raw(9))))
        );
        assert!(scope.contains("User"));
    }

    #[test]
    fn test_duplicate_include_alias() {
        let program = Program::new();
        let mut scope = Scope::new("a.thrift", &program);
        scope.include("shared", ModuleId::from_raw(0), 1).unwrap();
        let err = scope.include("shared", ModuleId::from_raw(1), 2).unwrap_err();
        assert_eq!(
            err,
            CompileErrorKind::Redefinition {
                name: "shared".to_owned(),
                previous_line: 1,
            }
        );
        assert_eq!(scope.included("shared"), Some(ModuleId::from_raw(0)));
        assert_eq!(scope.includes().count(), 1);
    }
}

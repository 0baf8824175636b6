//! Linker tests over in-memory programs.

use thrift_ir::Program;

use crate::{compile, Compilation, CompileError, CompileErrorKind, CompileOptions, SourceSet};
use crate::{StructSpec, TypeId, TypeSpec};

mod constants;
mod types;

const MAIN: &str = "main.thrift";

fn link(program: Program) -> Result<Compilation, CompileError> {
    link_with(program, &CompileOptions::default())
}

fn link_with(program: Program, options: &CompileOptions) -> Result<Compilation, CompileError> {
    compile(&SourceSet::new().with(MAIN, program), MAIN, options)
}

fn link_err(program: Program) -> CompileErrorKind {
    link(program).unwrap_err().kind
}

fn root_type(compilation: &Compilation, name: &str) -> TypeId {
    compilation.root_module().ty(name).unwrap()
}

fn root_struct<'c>(compilation: &'c Compilation, name: &str) -> &'c StructSpec {
    match compilation.types().get(root_type(compilation, name)) {
        TypeSpec::Struct(spec) => spec,
        other => panic!("{name} is not a struct: {other:?}"),
    }
}

fn cycle(names: &[&str]) -> CompileErrorKind {
    CompileErrorKind::CircularReference {
        chain: names.iter().map(|name| (*name).to_owned()).collect(),
    }
}

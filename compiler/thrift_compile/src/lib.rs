//! Thrift Compile - Linker for Thrift IDL
//!
//! Takes the syntax trees of a root file and everything it includes and
//! produces a `Compilation`: a closed graph of resolved types, constants,
//! and services, every type tagged with its wire type.
//!
//! # Architecture
//!
//! - `pool`: `TypePool` of resolved types addressed by `TypeId`
//! - `scope`: per-file symbol tables used while linking
//! - `link`: on-demand resolution, cycle detection, constant evaluation
//! - `compilation`: the immutable result, queried by code generators
//!
//! # Example
//!
//! ```
//! use thrift_compile::{compile, CompileOptions, SourceSet, WireType};
//! use thrift_ir::{BaseTypeId, Include, Program, Type, Typedef};
//!
//! let bar = Program::new()
//!     .with_definition(Typedef::new("Timestamp", Type::base(BaseTypeId::I64)).at(1));
//! let foo = Program::new()
//!     .with_include(Include::new("bar.thrift").at(1))
//!     .with_definition(Typedef::new("Timestamp", Type::reference("bar.Timestamp")).at(3));
//! let sources = SourceSet::new()
//!     .with("bar.thrift", bar)
//!     .with("foo.thrift", foo);
//!
//! let compilation = compile(&sources, "foo.thrift", &CompileOptions::default()).unwrap();
//! let timestamp = compilation.root_module().ty("Timestamp").unwrap();
//! assert_eq!(compilation.types().wire_type(timestamp), WireType::I64);
//! ```

mod compilation;
mod error;
mod ids;
mod link;
mod module;
mod options;
mod pool;
mod scope;
mod service;
mod source;
mod value;
mod wire;

use std::sync::Once;

pub use compilation::Compilation;
pub use error::{CompileError, CompileErrorKind};
pub use ids::{ConstId, ModuleId, ServiceId};
pub use module::Module;
pub use options::{CompileOptions, RequirednessPolicy};
pub use pool::{
    Annotations, EnumItemSpec, EnumSpec, FieldSpec, Primitive, Requiredness, StructSpec, TypeId,
    TypePool, TypeSpec, TypedefSpec,
};
pub use service::{FunctionSpec, ServiceSpec};
pub use source::SourceSet;
pub use value::{ConstantSpec, TypedValue, Value};
pub use wire::WireType;

/// Link `root` and every file it includes.
///
/// `root` and include paths are looked up in `sources`. The first error
/// aborts the run; there is no partial result.
#[tracing::instrument(level = "debug", skip(sources, options), fields(files = sources.len()))]
pub fn compile(
    sources: &SourceSet,
    root: &str,
    options: &CompileOptions,
) -> Result<Compilation, CompileError> {
    link::Linker::new(sources, options).link(root)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=thrift_compile=debug`
/// or `RUST_LOG=thrift_compile=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

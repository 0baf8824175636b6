//! Compilation errors.
//!
//! Compilation is fail-fast: the first violation aborts the run and is
//! returned as a `CompileError`. Every error names the file and line of
//! the offending node.

use thiserror::Error;
use thrift_diagnostic::{Diagnostic, ErrorCode, SourceLocation};

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileErrorKind {
    #[error("cannot include {path:?}: file is not part of the compilation")]
    UnresolvedInclude { path: String },

    #[error("unknown {kind} {name:?}")]
    UnresolvedReference { kind: &'static str, name: String },

    #[error("{name:?} is already defined on line {previous_line}")]
    Redefinition { name: String, previous_line: u32 },

    #[error("illegal cycle: {}", .chain.join(" -> "))]
    CircularReference { chain: Vec<String> },

    #[error("field ID {id} of {name:?} is already used by {previous:?}")]
    DuplicateFieldId {
        id: i16,
        name: String,
        previous: String,
    },

    #[error("field {name:?} is already defined")]
    DuplicateFieldName { name: String },

    #[error("function {name:?} is already defined{}", inherited_suffix(.inherited_from.as_deref()))]
    DuplicateFunctionName {
        name: String,
        inherited_from: Option<String>,
    },

    #[error("annotation {name:?} is already set")]
    DuplicateAnnotation { name: String },

    #[error("union field {field:?} {reason}")]
    InvalidUnionField { field: String, reason: &'static str },

    #[error("field {field:?} must be marked required or optional")]
    MissingRequiredness { field: String },

    #[error("oneway function {function:?} {reason}")]
    InvalidOneway {
        function: String,
        reason: &'static str,
    },

    #[error("exception {field:?} of {function:?} has type {found}, which is not an exception")]
    InvalidThrows {
        function: String,
        field: String,
        found: String,
    },

    #[error("{name:?} is a {found}, expected a {expected}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("cannot use {found} as a value of type {expected}")]
    ConstantTypeMismatch { expected: String, found: String },

    #[error("value {value} is out of range for type {ty}")]
    ConstantRange { value: String, ty: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

fn inherited_suffix(service: Option<&str>) -> String {
    service.map_or_else(String::new, |service| {
        format!(" by inherited service {service:?}")
    })
}

impl CompileErrorKind {
    /// The stable error code for this kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            CompileErrorKind::UnresolvedInclude { .. } => ErrorCode::E1001,
            CompileErrorKind::UnresolvedReference { .. } => ErrorCode::E2001,
            CompileErrorKind::Redefinition { .. } => ErrorCode::E2002,
            CompileErrorKind::CircularReference { .. } => ErrorCode::E2003,
            CompileErrorKind::DuplicateFieldId { .. } => ErrorCode::E2004,
            CompileErrorKind::DuplicateFieldName { .. } => ErrorCode::E2005,
            CompileErrorKind::DuplicateFunctionName { .. } => ErrorCode::E2006,
            CompileErrorKind::DuplicateAnnotation { .. } => ErrorCode::E2007,
            CompileErrorKind::InvalidUnionField { .. } => ErrorCode::E2008,
            CompileErrorKind::MissingRequiredness { .. } => ErrorCode::E2009,
            CompileErrorKind::InvalidOneway { .. } => ErrorCode::E2010,
            CompileErrorKind::InvalidThrows { .. } => ErrorCode::E2011,
            CompileErrorKind::KindMismatch { .. } => ErrorCode::E2012,
            CompileErrorKind::ConstantTypeMismatch { .. } => ErrorCode::E3001,
            CompileErrorKind::ConstantRange { .. } => ErrorCode::E3002,
            CompileErrorKind::Internal { .. } => ErrorCode::E9001,
        }
    }
}

/// A compilation failure at a source location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{file}:{line}: {kind}")]
pub struct CompileError {
    /// Path of the file containing the offending node.
    pub file: String,
    /// 1-based line of the offending node.
    pub line: u32,
    pub kind: CompileErrorKind,
}

impl CompileError {
    pub fn new(file: impl Into<String>, line: u32, kind: CompileErrorKind) -> Self {
        CompileError {
            file: file.into(),
            line,
            kind,
        }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.file.clone(), self.line)
    }

    /// Convert to a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = self.code();
        let diagnostic = Diagnostic::error(code)
            .with_message(self.kind.to_string())
            .with_label(self.location(), code.summary());

        match &self.kind {
            CompileErrorKind::CircularReference { chain } => {
                diagnostic
                    .with_note(format!("cycle: {}", chain.join(" -> ")))
                    .with_suggestion("break the cycle with a list, set, or map")
            }
            CompileErrorKind::UnresolvedReference { name, .. } if !name.contains('.') => {
                diagnostic.with_suggestion(format!(
                    "if {name:?} lives in another file, include it and write `alias.{name}`"
                ))
            }
            CompileErrorKind::UnresolvedInclude { path } => {
                diagnostic.with_note(format!("{path:?} was not found among the compiled sources"))
            }
            CompileErrorKind::MissingRequiredness { .. } => {
                diagnostic.with_suggestion("add `required` or `optional`")
            }
            CompileErrorKind::Internal { .. } => {
                diagnostic.with_note("this is a bug in the compiler")
            }
            _ => diagnostic,
        }
    }
}

impl From<CompileError> for Diagnostic {
    fn from(error: CompileError) -> Self {
        error.to_diagnostic()
    }
}

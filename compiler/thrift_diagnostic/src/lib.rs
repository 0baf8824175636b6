//! Diagnostic system for rich error reporting.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary location (which file and line)
//! - Notes (context such as the members of a reference cycle)
//! - Suggestions (how to fix)
//!
//! Compilation is fail-fast, so a run produces at most one diagnostic,
//! always an error.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label, SourceLocation};
pub use error_code::ErrorCode;

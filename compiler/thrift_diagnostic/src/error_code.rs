//! Error codes for all compiler diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the compiler phase.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Include graph errors
/// - E2xxx: Resolution and structural errors
/// - E3xxx: Constant evaluation errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Include Graph Errors (E1xxx)
    /// Included file is not part of the compilation
    E1001,

    // Resolution Errors (E2xxx)
    /// Unresolved reference
    E2001,
    /// Duplicate definition
    E2002,
    /// Illegal reference cycle
    E2003,
    /// Duplicate field ID
    E2004,
    /// Duplicate field name
    E2005,
    /// Duplicate function name (within a service or its ancestors)
    E2006,
    /// Duplicate annotation key
    E2007,
    /// Union field is required or has a default
    E2008,
    /// Field has no explicit requiredness under the strict policy
    E2009,
    /// Oneway function returns a value or throws
    E2010,
    /// `throws` entry is not an exception
    E2011,
    /// Reference names the wrong kind of definition
    E2012,

    // Constant Errors (E3xxx)
    /// Constant value does not fit its type
    E3001,
    /// Integer constant out of range for its type
    E3002,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()` which is exhaustive (Rust match enforces it).
    pub const ALL: &[ErrorCode] = &[
        // Include graph
        ErrorCode::E1001,
        // Resolution
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E2011,
        ErrorCode::E2012,
        // Constants
        ErrorCode::E3001,
        ErrorCode::E3002,
        // Internal
        ErrorCode::E9001,
    ];

    /// Get the numeric code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line summary of what the code means, for `--explain` style output.
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "included file is not part of the compilation",
            ErrorCode::E2001 => "unresolved reference",
            ErrorCode::E2002 => "duplicate definition",
            ErrorCode::E2003 => "illegal reference cycle",
            ErrorCode::E2004 => "duplicate field ID",
            ErrorCode::E2005 => "duplicate field name",
            ErrorCode::E2006 => "duplicate function name",
            ErrorCode::E2007 => "duplicate annotation",
            ErrorCode::E2008 => "invalid union field",
            ErrorCode::E2009 => "missing field requiredness",
            ErrorCode::E2010 => "invalid oneway function",
            ErrorCode::E2011 => "invalid throws clause",
            ErrorCode::E2012 => "reference to the wrong kind of definition",
            ErrorCode::E3001 => "constant type mismatch",
            ErrorCode::E3002 => "constant out of range",
            ErrorCode::E9001 => "internal compiler error",
        }
    }

    /// Check if this is an include graph error (E1xxx range).
    pub fn is_include_error(&self) -> bool {
        matches!(self, ErrorCode::E1001)
    }

    /// Check if this is a resolution error (E2xxx range).
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
                | ErrorCode::E2007
                | ErrorCode::E2008
                | ErrorCode::E2009
                | ErrorCode::E2010
                | ErrorCode::E2011
                | ErrorCode::E2012
        )
    }

    /// Check if this is a constant evaluation error (E3xxx range).
    pub fn is_constant_error(&self) -> bool {
        matches!(self, ErrorCode::E3001 | ErrorCode::E3002)
    }

    /// Check if this is an internal compiler error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

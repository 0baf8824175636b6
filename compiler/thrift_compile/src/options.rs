//! Compilation options.

use thrift_ir::StructureKind;

use crate::pool::Requiredness;

/// How fields without an explicit `required`/`optional` are treated.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum RequirednessPolicy {
    /// Unspecified struct and exception fields get `Default` requiredness.
    #[default]
    Lenient,
    /// Struct and exception fields must spell out their requiredness.
    Strict,
}

/// Where a field list appears. Decides the requiredness of fields that
/// declared none, and which structural rules apply.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum FieldContext {
    Structure(StructureKind),
    Parameters,
    Throws,
}

/// Configuration for one compilation run.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CompileOptions {
    /// Policy for fields without explicit requiredness.
    pub requiredness: RequirednessPolicy,
    /// Reject annotated entities that repeat an annotation key.
    pub check_annotations: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            requiredness: RequirednessPolicy::Lenient,
            check_annotations: true,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn strict_requiredness(mut self) -> Self {
        self.requiredness = RequirednessPolicy::Strict;
        self
    }

    /// Keep the last value of a repeated annotation key instead of failing.
    #[must_use]
    pub fn allow_duplicate_annotations(mut self) -> Self {
        self.check_annotations = false;
        self
    }

    /// Resolved requiredness of a field that declared none, or `None` if
    /// the policy rejects it.
    pub(crate) fn default_requiredness(&self, context: FieldContext) -> Option<Requiredness> {
        match context {
            FieldContext::Structure(StructureKind::Union) | FieldContext::Throws => {
                Some(Requiredness::Optional)
            }
            FieldContext::Structure(StructureKind::Struct | StructureKind::Exception) => {
                match self.requiredness {
                    RequirednessPolicy::Lenient => Some(Requiredness::Default),
                    RequirednessPolicy::Strict => None,
                }
            }
            FieldContext::Parameters => Some(Requiredness::Default),
        }
    }
}

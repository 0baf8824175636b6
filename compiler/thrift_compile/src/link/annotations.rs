use thrift_ir::Annotation;

use super::{Linker, Result, Site};
use crate::error::CompileErrorKind;
use crate::pool::Annotations;
use crate::ModuleId;

impl Linker<'_> {
    /// Collect annotations, rejecting repeated keys unless configured not
    /// to. When repeats are allowed the last value wins.
    pub(super) fn annotations(&self, module: ModuleId, list: &[Annotation]) -> Result<Annotations> {
        let mut annotations = Annotations::new();
        for annotation in list {
            let previous = annotations.insert(annotation.name.clone(), annotation.value.clone());
            if previous.is_some() && self.options.check_annotations {
                return Err(self.error(
                    Site {
                        module,
                        line: annotation.line,
                    },
                    CompileErrorKind::DuplicateAnnotation {
                        name: annotation.name.clone(),
                    },
                ));
            }
        }
        Ok(annotations)
    }
}

//! Input to a compilation: parsed programs keyed by path.

use rustc_hash::FxHashMap;
use thrift_ir::Program;

/// The parsed source files taking part in a compilation.
///
/// Keys are `/`-separated paths. An `include` is looked up relative to the
/// directory of the including file first, then verbatim.
#[derive(Clone, Debug, Default)]
pub struct SourceSet {
    programs: FxHashMap<String, Program>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the program parsed from `path`.
    pub fn insert(&mut self, path: impl Into<String>, program: Program) {
        self.programs.insert(path.into(), program);
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<String>, program: Program) -> Self {
        self.insert(path, program);
        self
    }

    pub fn get(&self, path: &str) -> Option<&Program> {
        self.programs.get(path)
    }

    /// Stored key and program for `path`.
    pub(crate) fn entry(&self, path: &str) -> Option<(&str, &Program)> {
        self.programs
            .get_key_value(path)
            .map(|(key, program)| (key.as_str(), program))
    }

    /// Find the file an `include` header in `from` refers to.
    pub(crate) fn resolve_include(&self, from: &str, include: &str) -> Option<(&str, &Program)> {
        let relative = match from.rfind('/') {
            Some(slash) => normalize(&format!("{}/{include}", &from[..slash])),
            None => normalize(include),
        };
        self.entry(&relative).or_else(|| self.entry(include))
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

/// Collapse `.` and `..` segments of a `/`-separated path.
fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." if parts.last().is_some_and(|last| *last != "..") => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    let joined = parts.join("/");
    if path.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use thrift_ir::Program;

    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a/./b/../c.thrift"), "a/c.thrift");
        assert_eq!(normalize("../shared.thrift"), "../shared.thrift");
        assert_eq!(normalize("/idl/x/../y.thrift"), "/idl/y.thrift");
    }

    #[test]
    fn test_resolve_include_relative_first() {
        let sources = SourceSet::new()
            .with("idl/foo.thrift", Program::new())
            .with("idl/common/bar.thrift", Program::new())
            .with("common/bar.thrift", Program::new());
        let found = sources.resolve_include("idl/foo.thrift", "common/bar.thrift");
        assert_eq!(found.map(|(path, _)| path), Some("idl/common/bar.thrift"));

        let found = sources.resolve_include("idl/common/bar.thrift", "../foo.thrift");
        assert_eq!(found.map(|(path, _)| path), Some("idl/foo.thrift"));

        assert!(sources.resolve_include("idl/foo.thrift", "missing.thrift").is_none());
        assert_eq!(sources.len(), 3);
    }

    #[test]
    fn test_resolve_include_verbatim_fallback() {
        let sources = SourceSet::new()
            .with("a/foo.thrift", Program::new())
            .with("shared.thrift", Program::new());
        let found = sources.resolve_include("a/foo.thrift", "shared.thrift");
        assert_eq!(found.map(|(path, _)| path), Some("shared.thrift"));
    }
}

//! Type formatting for error messages and debugging.

use super::{TypeId, TypeSpec};

/// What the renderer can see of a handle.
pub(super) enum View<'a> {
    Spec(&'a TypeSpec),
    /// A named type whose definition is still being resolved.
    Pending(&'a str),
}

/// Render `id` as IDL syntax. Named types render as their name.
pub(super) fn render<'a>(id: TypeId, lookup: &dyn Fn(TypeId) -> Option<View<'a>>) -> String {
    let mut buf = String::new();
    render_into(id, lookup, &mut buf);
    buf
}

fn render_into<'a>(id: TypeId, lookup: &dyn Fn(TypeId) -> Option<View<'a>>, buf: &mut String) {
    let spec = match lookup(id) {
        Some(View::Spec(spec)) => spec,
        Some(View::Pending(name)) => {
            buf.push_str(name);
            return;
        }
        None => {
            buf.push_str("<unknown>");
            return;
        }
    };

    match spec {
        TypeSpec::Primitive { kind, .. } => buf.push_str(kind.as_str()),
        TypeSpec::List { value, .. } => {
            buf.push_str("list<");
            render_into(*value, lookup, buf);
            buf.push('>');
        }
        TypeSpec::Set { value, .. } => {
            buf.push_str("set<");
            render_into(*value, lookup, buf);
            buf.push('>');
        }
        TypeSpec::Map { key, value, .. } => {
            buf.push_str("map<");
            render_into(*key, lookup, buf);
            buf.push_str(", ");
            render_into(*value, lookup, buf);
            buf.push('>');
        }
        TypeSpec::Typedef(t) => buf.push_str(&t.name),
        TypeSpec::Enum(e) => buf.push_str(&e.name),
        TypeSpec::Struct(s) => buf.push_str(&s.name),
    }
}

//! Focused traits for interface segregation.
//!
//! Each trait provides one focused capability:
//! - `Located` - just declaration-line access
//! - `Named` - just name access

/// Trait for nodes that remember the line they were declared on.
pub trait Located {
    /// The 1-based source line of the node.
    fn line(&self) -> u32;
}

/// Trait for nodes that declare a name.
pub trait Named {
    /// The declared name, exactly as written.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BaseTypeId, Definition, Type, Typedef};

    #[test]
    fn test_definition_traits() {
        let def = Definition::Typedef(Typedef::new("UUID", Type::base(BaseTypeId::String)).at(7));
        assert_eq!(def.name(), "UUID");
        assert_eq!(def.line(), 7);
    }
}

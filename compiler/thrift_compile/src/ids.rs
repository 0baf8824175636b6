//! Handles into the arenas owned by a `Compilation`.
//!
//! Every handle is a 32-bit index. Handles are only meaningful for the
//! compilation that produced them; they carry no lifetime and are never
//! reference counted.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw index.
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw index.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub(crate) const fn index(self) -> usize {
                self.0 as usize
            }

            /// Handle for the next slot of an arena holding `len` items.
            ///
            /// Arenas are bounded by the number of definitions in the
            /// compilation, which the IDL keeps far below `u32::MAX`.
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            pub(crate) const fn next(len: usize) -> Self {
                Self(len as u32)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// A resolved module (one per source file).
    ModuleId,
    "ModuleId"
);
define_id!(
    /// A resolved top-level constant.
    ConstId,
    "ConstId"
);
define_id!(
    /// A resolved service.
    ServiceId,
    "ServiceId"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_debug() {
        let id = ServiceId::from_raw(3);
        assert_eq!(id.raw(), 3);
        assert_eq!(id.index(), 3);
        assert_eq!(format!("{id:?}"), "ServiceId(3)");
        assert_eq!(ModuleId::next(5), ModuleId::from_raw(5));
    }
}

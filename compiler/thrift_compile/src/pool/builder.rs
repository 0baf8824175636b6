//! Mutable pool used while linking.
//!
//! Named types are allocated in two steps so that recursive definitions can
//! refer to themselves: `reserve` hands out the handle as soon as resolution
//! of the definition starts, `fill` stores the finished spec. `finish`
//! refuses to produce a pool while any reservation is still open.

use rustc_hash::FxHashMap;

use super::format::{self, View};
use super::{Annotations, Item, Primitive, StructSpec, TypeId, TypePool, TypeSpec};
use crate::WireType;

/// Interning key for anonymous types.
#[derive(Clone, Eq, PartialEq, Hash)]
enum ContainerKey {
    Primitive(Primitive, Annotations),
    List(TypeId, Annotations),
    Set(TypeId, Annotations),
    Map(TypeId, TypeId, Annotations),
}

enum Slot {
    Reserved { name: String, wire: Option<WireType> },
    Filled(Item),
}

pub(crate) struct TypePoolBuilder {
    slots: Vec<Slot>,
    interned: FxHashMap<ContainerKey, TypeId>,
}

impl TypePoolBuilder {
    /// Create a builder with the unannotated primitives pre-interned.
    pub(crate) fn new() -> Self {
        let mut builder = TypePoolBuilder {
            slots: Vec::with_capacity(64),
            interned: FxHashMap::default(),
        };
        for kind in Primitive::ALL {
            let id = builder.push(Slot::Filled(Item {
                spec: TypeSpec::Primitive {
                    kind,
                    annotations: Annotations::new(),
                },
                wire: kind.wire_type(),
            }));
            debug_assert_eq!(id, kind.type_id());
            builder
                .interned
                .insert(ContainerKey::Primitive(kind, Annotations::new()), id);
        }
        builder
    }

    // === Anonymous types ===

    pub(crate) fn primitive(&mut self, kind: Primitive, annotations: Annotations) -> TypeId {
        if annotations.is_empty() {
            return kind.type_id();
        }
        self.intern(
            ContainerKey::Primitive(kind, annotations.clone()),
            TypeSpec::Primitive { kind, annotations },
            kind.wire_type(),
        )
    }

    pub(crate) fn list(&mut self, value: TypeId, annotations: Annotations) -> TypeId {
        self.intern(
            ContainerKey::List(value, annotations.clone()),
            TypeSpec::List { value, annotations },
            WireType::List,
        )
    }

    pub(crate) fn set(&mut self, value: TypeId, annotations: Annotations) -> TypeId {
        self.intern(
            ContainerKey::Set(value, annotations.clone()),
            TypeSpec::Set { value, annotations },
            WireType::Set,
        )
    }

    pub(crate) fn map(&mut self, key: TypeId, value: TypeId, annotations: Annotations) -> TypeId {
        self.intern(
            ContainerKey::Map(key, value, annotations.clone()),
            TypeSpec::Map {
                key,
                value,
                annotations,
            },
            WireType::Map,
        )
    }

    fn intern(&mut self, key: ContainerKey, spec: TypeSpec, wire: WireType) -> TypeId {
        if let Some(&id) = self.interned.get(&key) {
            return id;
        }
        let id = self.push(Slot::Filled(Item { spec, wire }));
        self.interned.insert(key, id);
        id
    }

    // === Named types ===

    /// Allocate the handle of a named type before its spec is known.
    ///
    /// `wire` is known up front for enums, struct-likes, and typedefs of
    /// base types or containers. A typedef of a bare reference learns its
    /// tag from its target at `fill` time.
    pub(crate) fn reserve(&mut self, name: &str, wire: Option<WireType>) -> TypeId {
        self.push(Slot::Reserved {
            name: name.to_owned(),
            wire,
        })
    }

    /// Store the finished spec of a reserved handle.
    pub(crate) fn fill(&mut self, id: TypeId, spec: TypeSpec, wire: WireType) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = Slot::Filled(Item { spec, wire });
        }
    }

    /// Mutable access to a filled struct-like, for attaching field
    /// defaults once every type exists.
    pub(crate) fn struct_mut(&mut self, id: TypeId) -> Option<&mut StructSpec> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Filled(Item {
                spec: TypeSpec::Struct(spec),
                ..
            })) => Some(spec),
            _ => None,
        }
    }

    // === Queries ===

    /// The spec of a filled handle. `None` while the handle is reserved.
    pub(crate) fn spec(&self, id: TypeId) -> Option<&TypeSpec> {
        match self.slots.get(id.index()) {
            Some(Slot::Filled(item)) => Some(&item.spec),
            _ => None,
        }
    }

    pub(crate) fn wire(&self, id: TypeId) -> Option<WireType> {
        match self.slots.get(id.index())? {
            Slot::Filled(item) => Some(item.wire),
            Slot::Reserved { wire, .. } => *wire,
        }
    }

    /// Follow filled typedefs. Stops at the first reserved handle.
    pub(crate) fn unwrap_typedefs(&self, mut id: TypeId) -> TypeId {
        while let Some(TypeSpec::Typedef(typedef)) = self.spec(id) {
            id = typedef.target;
        }
        id
    }

    pub(crate) fn display(&self, id: TypeId) -> String {
        format::render(id, &|id| match self.slots.get(id.index())? {
            Slot::Filled(item) => Some(View::Spec(&item.spec)),
            Slot::Reserved { name, .. } => Some(View::Pending(name)),
        })
    }

    /// Freeze the pool. Fails with the first handle that was reserved
    /// but never filled.
    pub(crate) fn finish(self) -> Result<TypePool, TypeId> {
        let mut items = Vec::with_capacity(self.slots.len());
        for (index, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Slot::Filled(item) => items.push(item),
                Slot::Reserved { .. } => return Err(super::type_id_at(index)),
            }
        }
        Ok(TypePool { items })
    }

    fn push(&mut self, slot: Slot) -> TypeId {
        let id = super::type_id_at(self.slots.len());
        self.slots.push(slot);
        id
    }
}

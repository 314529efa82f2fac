// MHEG - mheg-runtime
// Module: Object registry
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Object registry.
//!
//! Live objects are stored in generational slots. An [`ObjectId`] is a slot
//! index plus the slot's generation at insertion time; once the object is
//! removed the slot's generation moves on and every old handle resolves to
//! nothing.

use std::collections::HashMap;
use std::fmt;

use mheg_error::{codes, Error, Result};
use mheg_foundation::{ExternalReference, GroupId};

use crate::object::MhegObject;

/// Handle of a live object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    index:      u32,
    generation: u32,
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    object:     Option<MhegObject>,
}

/// Owner of every live object, indexed by handle and by address
#[derive(Debug, Default)]
pub struct Registry {
    slots:      Vec<Slot>,
    by_address: HashMap<ExternalReference, ObjectId>,
    free:       Vec<u32>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object under its address.
    ///
    /// # Errors
    ///
    /// Fails with `DUPLICATE_OBJECT_NUMBER` if the address is already live.
    pub fn add_object(&mut self, object: MhegObject) -> Result<ObjectId> {
        if self.by_address.contains_key(object.address()) {
            return Err(Error::validation_error(
                codes::DUPLICATE_OBJECT_NUMBER,
                "Object number already in use in this group",
            ));
        }
        let address = object.address().clone();
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.object = Some(object);
                ObjectId { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, object: Some(object) });
                ObjectId { index, generation: 0 }
            }
        };
        self.by_address.insert(address, id);
        Ok(id)
    }

    /// Remove an object; its handle and any copies of it go stale
    pub fn remove_object(&mut self, id: ObjectId) -> Option<MhegObject> {
        let slot = self.slot_mut(id)?;
        let object = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.by_address.remove(object.address());
        Some(object)
    }

    /// Object behind a handle, unless the handle is stale
    pub fn get(&self, id: ObjectId) -> Option<&MhegObject> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.object.as_ref())
    }

    /// Mutable object behind a handle, unless the handle is stale
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut MhegObject> {
        self.slot_mut(id).and_then(|slot| slot.object.as_mut())
    }

    /// True if the handle still refers to a live object
    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Handle of the object at an absolute address
    pub fn lookup(&self, address: &ExternalReference) -> Option<ObjectId> {
        self.by_address.get(address).copied()
    }

    /// Handles of every object owned by `group`, group object included,
    /// in object-number order
    pub fn ids_in_group(&self, group: &GroupId) -> Vec<ObjectId> {
        let mut owned: Vec<(i32, ObjectId)> = self
            .by_address
            .iter()
            .filter(|(address, _)| &address.group_identifier == group)
            .map(|(address, id)| (address.object_number, *id))
            .collect();
        owned.sort_unstable();
        owned.into_iter().map(|(_, id)| id).collect()
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    /// True if no object is live
    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }

    /// Every live object with its handle, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &MhegObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object
                .as_ref()
                .map(|object| (ObjectId { index: index as u32, generation: slot.generation }, object))
        })
    }

    fn slot_mut(&mut self, id: ObjectId) -> Option<&mut Slot> {
        self.slots.get_mut(id.index as usize).filter(|slot| slot.generation == id.generation)
    }
}

#[cfg(test)]
mod tests {
    use mheg_foundation::VariableValue;

    use super::*;
    use crate::object::{ObjectBody, VariableState};

    fn variable(group: &str, number: i32) -> MhegObject {
        MhegObject::new(
            ExternalReference::new(group, number),
            ObjectBody::Variable(VariableState::new(VariableValue::Integer(number))),
        )
    }

    #[test]
    fn test_add_and_lookup() {
        let mut registry = Registry::new();
        let id = registry.add_object(variable("~//a", 1)).unwrap();
        assert_eq!(registry.lookup(&ExternalReference::new("~//a", 1)), Some(id));
        assert_eq!(registry.get(id).map(MhegObject::address), Some(&ExternalReference::new("~//a", 1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_address_is_rejected() {
        let mut registry = Registry::new();
        registry.add_object(variable("~//a", 1)).unwrap();
        let error = registry.add_object(variable("~//a", 1)).unwrap_err();
        assert_eq!(error.code, codes::DUPLICATE_OBJECT_NUMBER);
        assert!(registry.add_object(variable("~//b", 1)).is_ok());
    }

    #[test]
    fn test_removed_handle_goes_stale() {
        let mut registry = Registry::new();
        let old = registry.add_object(variable("~//a", 1)).unwrap();
        assert!(registry.remove_object(old).is_some());
        assert!(registry.get(old).is_none());
        assert!(registry.remove_object(old).is_none());

        // the slot is reused with a new generation
        let new = registry.add_object(variable("~//a", 2)).unwrap();
        assert_ne!(old, new);
        assert!(registry.get(old).is_none());
        assert!(registry.get(new).is_some());
    }

    #[test]
    fn test_ids_in_group_are_ordered() {
        let mut registry = Registry::new();
        let c = registry.add_object(variable("~//a", 7)).unwrap();
        let a = registry.add_object(variable("~//a", 0)).unwrap();
        registry.add_object(variable("~//b", 1)).unwrap();
        let b = registry.add_object(variable("~//a", 3)).unwrap();
        assert_eq!(registry.ids_in_group(&GroupId::from("~//a")), vec![a, b, c]);
    }
}

// MHEG - mheg-runtime
// Module: Reference and Generic resolution
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Reference and Generic resolution.
//!
//! Internal references take the caller's group; external references carry
//! their own. Either way the group identifier is made absolute against the
//! active application before the registry is searched. Resolution failures
//! are logged here and never escape as errors: readers get the zero value
//! of the kind, writers leave the target untouched.

use mheg_error::{kinds, Error};
use mheg_foundation::{
    absolute_group_id, ExternalReference, Generic, GenericValue, GroupId, ObjectReference, VariableType,
    VariableValue,
};

use crate::engine::Engine;
use crate::object::ObjectBody;
use crate::registry::ObjectId;

impl Engine {
    /// `gid` in its absolute `~//` form
    pub fn absolute_group_id(&self, gid: &GroupId) -> GroupId {
        let application = self
            .active_application
            .and_then(|id| self.registry.get(id))
            .map(|object| &object.root.address.group_identifier);
        absolute_group_id(gid, application)
    }

    /// Absolute address `reference` names when resolved in `caller_group`
    pub fn absolute_address(&self, reference: &ObjectReference, caller_group: &GroupId) -> ExternalReference {
        let mut address = reference.resolve(caller_group);
        address.group_identifier = self.absolute_group_id(&address.group_identifier);
        address
    }

    /// Live object `reference` names when resolved in `caller_group`
    pub fn find_object(&self, reference: &ObjectReference, caller_group: &GroupId) -> Option<ObjectId> {
        let address = self.absolute_address(reference, caller_group);
        let found = self.registry.lookup(&address);
        if found.is_none() {
            self.report(&address, kinds::object_not_found());
        }
        found
    }

    /// True if both references resolve to the same address
    pub fn references_equal(
        &self,
        a: &ObjectReference,
        scope_a: &GroupId,
        b: &ObjectReference,
        scope_b: &GroupId,
    ) -> bool {
        self.absolute_address(a, scope_a) == self.absolute_address(b, scope_b)
    }

    /// Value of `generic`, or the kind's zero value if it cannot be
    /// resolved
    pub fn get<T: VariableType>(&self, generic: &Generic<T>, caller_group: &GroupId) -> T {
        self.try_get(generic, caller_group).unwrap_or_else(T::zero)
    }

    /// Value of `generic`, or `None` if it cannot be resolved
    pub fn try_get<T: VariableType>(&self, generic: &Generic<T>, caller_group: &GroupId) -> Option<T> {
        match generic {
            Generic::Literal(value) => Some(value.clone()),
            Generic::Indirect(reference) => {
                let id = self.find_object(reference, caller_group)?;
                self.variable_payload::<T>(id).map_err(|error| self.report(reference, error)).ok()
            }
        }
    }

    fn variable_payload<T: VariableType>(&self, id: ObjectId) -> Result<T, Error> {
        let Some(object) = self.registry.get(id) else { return Err(kinds::stale_handle()) };
        let ObjectBody::Variable(variable) = &object.body else { return Err(kinds::not_a_variable()) };
        T::from_value(&variable.value).cloned().ok_or_else(kinds::variable_kind_mismatch)
    }

    /// Store `value` through `generic`: a literal slot is overwritten, an
    /// indirect one writes the variable it names. Returns false, leaving
    /// everything untouched, if the target is missing or of another kind.
    pub fn set<T: VariableType>(&mut self, generic: &mut Generic<T>, caller_group: &GroupId, value: T) -> bool {
        match generic {
            Generic::Literal(slot) => {
                *slot = value;
                true
            }
            Generic::Indirect(reference) => {
                let reference = reference.clone();
                self.set_output(&reference, caller_group, value)
            }
        }
    }

    /// Write an action's output variable, which must hold exactly `T`
    pub(crate) fn set_output<T: VariableType>(&mut self, reference: &ObjectReference, caller_group: &GroupId, value: T) -> bool {
        let Some(id) = self.find_object(reference, caller_group) else { return false };
        let result = match self.registry.get_mut(id).map(|object| &mut object.body) {
            Some(ObjectBody::Variable(variable)) => match T::from_value_mut(&mut variable.value) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(kinds::variable_kind_mismatch()),
            },
            Some(_) => Err(kinds::not_a_variable()),
            None => Err(kinds::stale_handle()),
        };
        result.map_err(|error| self.report(reference, error)).is_ok()
    }

    /// Resolve a parameter of any kind
    pub fn resolve_value(&self, value: &GenericValue, caller_group: &GroupId) -> Option<VariableValue> {
        Some(match value {
            GenericValue::Boolean(g) => VariableValue::Boolean(self.try_get(g, caller_group)?),
            GenericValue::Integer(g) => VariableValue::Integer(self.try_get(g, caller_group)?),
            GenericValue::OctetString(g) => VariableValue::OctetString(self.try_get(g, caller_group)?),
            GenericValue::ObjectReference(g) => VariableValue::ObjectReference(self.try_get(g, caller_group)?),
            GenericValue::ContentReference(g) => VariableValue::ContentReference(self.try_get(g, caller_group)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use mheg_foundation::OctetString;

    use super::*;
    use crate::config::EngineConfig;
    use crate::object::{MhegObject, VariableState};

    fn engine_with(value: VariableValue) -> (Engine, GroupId) {
        let mut engine = Engine::new(EngineConfig::default());
        let gid = GroupId::from("~//a");
        engine
            .registry
            .add_object(MhegObject::new(ExternalReference::new(gid.clone(), 1), ObjectBody::Variable(VariableState::new(value))))
            .unwrap();
        (engine, gid)
    }

    #[test]
    fn test_indirect_get_and_set() {
        let (mut engine, gid) = engine_with(VariableValue::Integer(7));
        let mut generic: Generic<i32> = Generic::Indirect(ObjectReference::Internal(1));
        assert_eq!(engine.get(&generic, &gid), 7);
        assert!(engine.set(&mut generic, &gid, 9));
        assert_eq!(engine.get(&generic, &gid), 9);
    }

    #[test]
    fn test_wrong_kind_yields_zero_without_mutation() {
        let (mut engine, gid) = engine_with(VariableValue::Integer(7));
        let mut generic: Generic<OctetString> = Generic::Indirect(ObjectReference::Internal(1));
        assert_eq!(engine.get(&generic, &gid), OctetString::new());
        assert!(!engine.set(&mut generic, &gid, "x".into()));
        let as_int: Generic<i32> = Generic::Indirect(ObjectReference::Internal(1));
        assert_eq!(engine.get(&as_int, &gid), 7);
    }

    #[test]
    fn test_missing_target_and_scopes() {
        let (engine, gid) = engine_with(VariableValue::Boolean(true));
        let missing: Generic<bool> = Generic::Indirect(ObjectReference::Internal(2));
        assert_eq!(engine.try_get(&missing, &gid), None);
        let external = ObjectReference::external("~//a", 1);
        let other = GroupId::from("~//b");
        assert!(engine.references_equal(&ObjectReference::Internal(1), &gid, &external, &other));
        assert!(!engine.references_equal(&ObjectReference::Internal(1), &other, &external, &gid));
    }
}

// MHEG - mheg-runtime
// Module: Variable actions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! SetVariable, TestVariable and the integer and octet-string mutators.
//!
//! An operand that cannot be resolved abandons the action: nothing is
//! written and no TestEvent is raised.

use mheg_error::{kinds, Error, Result};
use mheg_foundation::{EventType, GroupId};
use mheg_instructions::ActionKind;

use crate::engine::Engine;
use crate::object::{Arithmetic, Comparison, ObjectBody, VariableState};
use crate::registry::ObjectId;

impl Engine {
    pub(super) fn execute_variable_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        let (operation, operand) = match kind {
            ActionKind::SetVariable { value } => {
                let Some(value) = self.resolve_value(value, gid) else { return Ok(()) };
                return self.variable_mut(id)?.assign(value);
            }
            ActionKind::TestVariable { operator, comparison } => {
                let operator = Comparison::from_code(self.get(operator, gid))?;
                let Some(other) = self.resolve_value(comparison, gid) else { return Ok(()) };
                // the stored reference is scoped by the variable's own group
                let owner = self.group_of(id)?;
                let variable = self.variable(id)?;
                let result = variable.compare(operator, &other, |a, b| self.references_equal(a, &owner, b, gid))?;
                self.raise_sync(id, EventType::TestEvent, Some(result.into()));
                return Ok(());
            }
            ActionKind::Append { value } => {
                let Some(suffix) = self.try_get(value, gid) else { return Ok(()) };
                return self.variable_mut(id)?.append(&suffix);
            }
            ActionKind::Add { value } => (Arithmetic::Add, value),
            ActionKind::Subtract { value } => (Arithmetic::Subtract, value),
            ActionKind::Multiply { value } => (Arithmetic::Multiply, value),
            ActionKind::Divide { value } => (Arithmetic::Divide, value),
            ActionKind::Modulo { value } => (Arithmetic::Modulo, value),
            _ => return Err(Error::UNEXPECTED_TARGET),
        };
        let Some(operand) = self.try_get(operand, gid) else { return Ok(()) };
        self.variable_mut(id)?.apply(operation, operand)
    }

    fn variable(&self, id: ObjectId) -> Result<&VariableState> {
        match self.registry.get(id).map(|object| &object.body) {
            Some(ObjectBody::Variable(variable)) => Ok(variable),
            Some(_) => Err(kinds::not_a_variable()),
            None => Err(kinds::stale_handle()),
        }
    }

    fn variable_mut(&mut self, id: ObjectId) -> Result<&mut VariableState> {
        match self.body_mut(id)? {
            ObjectBody::Variable(variable) => Ok(variable),
            _ => Err(kinds::not_a_variable()),
        }
    }
}

#[cfg(test)]
mod tests {
    use mheg_foundation::{
        EventData, ExternalReference, Generic, GenericValue, ObjectReference, OctetString, VariableValue,
    };
    use mheg_instructions::ElementaryAction;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::EngineConfig;
    use crate::descriptor::{GroupDescriptor, ItemDescriptor};
    use crate::object::MhegObject;

    fn engine(values: &[VariableValue]) -> Engine {
        let mut app = GroupDescriptor::application("~//a");
        for (n, value) in (1..).zip(values) {
            app = app.with_item(ItemDescriptor::new(n, ObjectBody::Variable(VariableState::new(value.clone()))));
        }
        let mut engine = Engine::new(EngineConfig::default());
        engine.load_application(app).unwrap();
        engine.clear_history();
        engine
    }

    fn run(engine: &mut Engine, target: i32, kind: ActionKind) {
        engine.run_actions(&[ElementaryAction::new(ObjectReference::Internal(target), kind)], &GroupId::from("~//a"));
    }

    fn value(engine: &Engine, number: i32) -> Option<VariableValue> {
        let id = engine.lookup(&ExternalReference::new("~//a", number))?;
        engine.object(id).and_then(MhegObject::variable).map(|v| v.value.clone())
    }

    #[test]
    fn test_arithmetic_repeats_and_wraps() {
        let mut engine = engine(&[VariableValue::Integer(i32::MAX - 1)]);
        run(&mut engine, 1, ActionKind::Add { value: 1.into() });
        run(&mut engine, 1, ActionKind::Add { value: 1.into() });
        assert_eq!(value(&engine, 1), Some(VariableValue::Integer(i32::MIN)));
        run(&mut engine, 1, ActionKind::Divide { value: 0.into() });
        assert_eq!(value(&engine, 1), Some(VariableValue::Integer(i32::MIN)));
    }

    #[test]
    fn test_set_variable_converts_between_integer_and_string() {
        let mut engine = engine(&[VariableValue::Integer(0), VariableValue::OctetString(OctetString::new())]);
        run(&mut engine, 1, ActionKind::SetVariable { value: GenericValue::OctetString(OctetString::from("-42x").into()) });
        run(&mut engine, 2, ActionKind::SetVariable { value: GenericValue::Integer(17.into()) });
        assert_eq!(value(&engine, 1), Some(VariableValue::Integer(-42)));
        assert_eq!(value(&engine, 2), Some(VariableValue::OctetString("17".into())));
        run(&mut engine, 2, ActionKind::SetVariable { value: GenericValue::Boolean(true.into()) });
        assert_eq!(value(&engine, 2), Some(VariableValue::OctetString("17".into())));
    }

    #[test]
    fn test_test_variable_on_strings() {
        let mut engine = engine(&[VariableValue::OctetString("abc".into()), VariableValue::OctetString("abc".into())]);
        let indirect = GenericValue::OctetString(Generic::Indirect(ObjectReference::Internal(2)));
        run(&mut engine, 1, ActionKind::TestVariable { operator: 1.into(), comparison: indirect });
        run(&mut engine, 1, ActionKind::TestVariable { operator: 3.into(), comparison: GenericValue::OctetString(OctetString::from("b").into()) });
        let data: Vec<_> = engine.history().iter().map(|r| r.event.data.clone()).collect();
        assert_eq!(data, vec![Some(EventData::Boolean(true))]);
    }

    #[test]
    fn test_object_reference_compared_from_a_scene() {
        let mut engine = engine(&[VariableValue::ObjectReference(ObjectReference::Internal(5))]);
        let test = |comparison: ObjectReference| {
            ElementaryAction::new(ObjectReference::external("~//a", 1), ActionKind::TestVariable {
                operator:   1.into(),
                comparison: GenericValue::ObjectReference(comparison.into()),
            })
        };
        let scene = GroupId::from("~//a/scene");
        engine.run_actions(&[test(ObjectReference::external("~//a", 5)), test(ObjectReference::Internal(5))], &scene);
        let data: Vec<_> = engine.history().iter().map(|r| r.event.data.clone()).collect();
        assert_eq!(data, vec![Some(EventData::Boolean(true)), Some(EventData::Boolean(false))]);
    }

    #[test]
    fn test_append() {
        let mut engine = engine(&[VariableValue::OctetString("ab".into())]);
        run(&mut engine, 1, ActionKind::Append { value: OctetString::from("cd").into() });
        assert_eq!(value(&engine, 1), Some(VariableValue::OctetString("abcd".into())));
    }
}

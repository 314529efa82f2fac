// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Property tests for the lifecycle state machine and indirect parameters.

use mheg_foundation::{
    ContentReference, ExternalReference, Generic, GenericValue, GroupId, ObjectReference, OctetString,
    VariableType, VariableValue,
};
use mheg_instructions::{ActionKind, ElementaryAction};
use mheg_runtime::object::VariableState;
use mheg_runtime::{Engine, EngineConfig, GroupDescriptor, ItemDescriptor, ObjectBody};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

const APP: &str = "~//app";

#[derive(Debug, Clone, Copy)]
enum Step {
    Prepare,
    Activate,
    Deactivate,
    Destroy,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![Just(Step::Prepare), Just(Step::Activate), Just(Step::Deactivate), Just(Step::Destroy)]
}

fn engine(items: Vec<ItemDescriptor>) -> Engine {
    let app = items.into_iter().fold(GroupDescriptor::application(APP), GroupDescriptor::with_item);
    let mut engine = Engine::new(EngineConfig::default());
    engine.load_application(app).unwrap();
    engine
}

fn variable(number: i32, value: VariableValue) -> ItemDescriptor {
    ItemDescriptor::new(number, ObjectBody::Variable(VariableState::new(value)))
}

fn object_reference() -> impl Strategy<Value = ObjectReference> {
    prop_oneof![
        any::<i32>().prop_map(ObjectReference::Internal),
        ("(~//)?[a-z/]{0,12}", any::<i32>()).prop_map(|(group, n)| ObjectReference::external(group.as_str(), n)),
    ]
}

/// `set` then `get` through a literal slot and through variable `number`
fn set_then_get<T: VariableType>(engine: &mut Engine, number: i32, value: T) -> Result<(), TestCaseError> {
    let gid = GroupId::from(APP);
    let mut literal = Generic::Literal(T::zero());
    prop_assert!(engine.set(&mut literal, &gid, value.clone()));
    prop_assert_eq!(engine.get(&literal, &gid), value.clone());
    let mut indirect: Generic<T> = Generic::Indirect(ObjectReference::Internal(number));
    prop_assert!(engine.set(&mut indirect, &gid, value.clone()));
    prop_assert_eq!(engine.get(&indirect, &gid), value);
    Ok(())
}

proptest! {
    #[test]
    fn set_then_get_sees_the_value_for_every_kind(
        flag in any::<bool>(),
        number in any::<i32>(),
        text in "[ -~]{0,16}",
        reference in object_reference(),
        path in "[ -~]{0,16}",
    ) {
        let mut engine = engine(vec![
            variable(1, VariableValue::Boolean(!flag)),
            variable(2, VariableValue::Integer(0)),
            variable(3, VariableValue::OctetString(OctetString::new())),
            variable(4, VariableValue::ObjectReference(ObjectReference::default())),
            variable(5, VariableValue::ContentReference(ContentReference::default())),
        ]);
        set_then_get(&mut engine, 1, flag)?;
        set_then_get(&mut engine, 2, number)?;
        set_then_get(&mut engine, 3, OctetString::from(text.as_str()))?;
        set_then_get(&mut engine, 4, reference)?;
        set_then_get(&mut engine, 5, ContentReference::new(path.as_str()))?;
    }

    #[test]
    fn running_objects_are_always_available(steps in prop::collection::vec(step(), 0..24)) {
        let mut engine = engine(vec![variable(1, VariableValue::Integer(0)).inactive()]);
        let id = engine.lookup(&ExternalReference::new(APP, 1)).unwrap();
        for step in steps {
            match step {
                Step::Prepare => { engine.prepare(id); }
                Step::Activate => { engine.activate(id); }
                Step::Deactivate => { engine.deactivate(id); }
                Step::Destroy => { engine.destroy(id); }
            }
            let object = engine.object(id).unwrap();
            prop_assert!(!object.is_running() || object.is_available());
        }
    }

    #[test]
    fn destroy_restores_the_authored_value(initial in any::<i32>(), delta in any::<i32>()) {
        let mut engine = engine(vec![variable(1, VariableValue::Integer(initial))]);
        let id = engine.lookup(&ExternalReference::new(APP, 1)).unwrap();
        let add = ElementaryAction::new(ObjectReference::Internal(1), ActionKind::Add { value: delta.into() });
        engine.run_actions(&[add], &GroupId::from(APP));
        engine.destroy(id);
        engine.prepare(id);
        let value = engine.object(id).and_then(|o| o.variable()).map(|v| v.value.clone());
        prop_assert_eq!(value, Some(VariableValue::Integer(initial)));
    }

    #[test]
    fn indirect_write_then_read_sees_the_value(text in "[ -~]{0,16}") {
        // SetVariable through var 2 holding a reference to var 1, then read
        // var 1 back indirectly into var 3
        let mut engine = engine(vec![
            variable(1, VariableValue::OctetString(OctetString::new())),
            variable(2, VariableValue::ObjectReference(ObjectReference::Internal(1))),
            variable(3, VariableValue::OctetString(OctetString::new())),
        ]);
        let gid = GroupId::from(APP);
        let through_two = Generic::Indirect(ObjectReference::Internal(2));
        let write = ElementaryAction::new(through_two, ActionKind::SetVariable {
            value: GenericValue::OctetString(OctetString::from(text.as_str()).into()),
        });
        let read = ElementaryAction::new(ObjectReference::Internal(3), ActionKind::SetVariable {
            value: GenericValue::OctetString(Generic::Indirect(ObjectReference::Internal(1))),
        });
        engine.run_actions(&[write, read], &gid);

        let var = engine.lookup(&ExternalReference::new(APP, 3)).unwrap();
        let value = engine.object(var).and_then(|o| o.variable()).map(|v| v.value.clone());
        prop_assert_eq!(value, Some(VariableValue::OctetString(text.as_str().into())));
    }
}

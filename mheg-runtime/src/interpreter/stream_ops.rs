// MHEG - mheg-runtime
// Module: Stream actions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Stream counters, speed and audio volume.
//!
//! These only record logical state; the player reads it back.

use mheg_error::{codes, Error, Result};
use mheg_foundation::GroupId;
use mheg_instructions::ActionKind;

use crate::engine::Engine;
use crate::object::{AudioState, ObjectBody, StreamState};
use crate::registry::ObjectId;

impl Engine {
    pub(super) fn execute_stream_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        match kind {
            ActionKind::SetCounterPosition { position } => {
                let position = self.get(position, gid);
                self.stream_mut(id)?.counter_position = position;
            }
            ActionKind::SetCounterEndPosition { position } => {
                let position = self.get(position, gid);
                self.stream_mut(id)?.counter_end_position = position;
            }
            ActionKind::SetCounterTrigger { trigger_identifier, position } => {
                let trigger = self.get(trigger_identifier, gid);
                let position = position.as_ref().map(|position| self.get(position, gid));
                let stream = self.stream_mut(id)?;
                match position {
                    Some(position) => {
                        stream.counter_triggers.insert(trigger, position);
                    }
                    None => {
                        stream.counter_triggers.remove(&trigger);
                    }
                }
            }
            ActionKind::SetSpeed { numerator, denominator } => {
                let numerator = self.get(numerator, gid);
                let denominator = denominator.as_ref().map_or(1, |d| self.get(d, gid));
                if denominator == 0 {
                    return Err(Error::parameter_error(codes::DIVISION_BY_ZERO, "Speed denominator is zero"));
                }
                self.stream_mut(id)?.speed = (numerator, denominator);
            }
            ActionKind::SetVolume { value } => {
                let volume = self.get(value, gid);
                self.audio_mut(id)?.volume = volume;
            }
            ActionKind::GetVolume { var } => {
                let volume = self.audio_mut(id)?.volume;
                self.set_output(var, gid, volume);
            }
            _ => return Err(Error::UNEXPECTED_TARGET),
        }
        Ok(())
    }

    fn stream_mut(&mut self, id: ObjectId) -> Result<&mut StreamState> {
        match self.body_mut(id)? {
            ObjectBody::Stream(stream) => Ok(stream),
            _ => Err(Error::UNEXPECTED_TARGET),
        }
    }

    fn audio_mut(&mut self, id: ObjectId) -> Result<&mut AudioState> {
        match self.body_mut(id)? {
            ObjectBody::Audio(audio) => Ok(audio),
            _ => Err(Error::UNEXPECTED_TARGET),
        }
    }
}

#[cfg(test)]
mod tests {
    use mheg_foundation::{ExternalReference, ObjectReference, VariableValue};
    use mheg_instructions::ElementaryAction;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::EngineConfig;
    use crate::descriptor::{GroupDescriptor, ItemDescriptor};
    use crate::object::VariableState;

    fn engine() -> Engine {
        let stream = StreamState::new(None).with_component(ItemDescriptor::new(2, ObjectBody::Audio(AudioState::new(1, 5))));
        let app = GroupDescriptor::application("~//a")
            .with_item(ItemDescriptor::new(1, ObjectBody::Stream(stream)).inactive())
            .with_item(ItemDescriptor::new(3, ObjectBody::Variable(VariableState::new(VariableValue::Integer(0)))));
        let mut engine = Engine::new(EngineConfig::default());
        engine.load_application(app).unwrap();
        engine
    }

    fn run(engine: &mut Engine, target: i32, kind: ActionKind) {
        engine.run_actions(&[ElementaryAction::new(ObjectReference::Internal(target), kind)], &GroupId::from("~//a"));
    }

    fn stream(engine: &Engine) -> StreamState {
        let id = engine.lookup(&ExternalReference::new("~//a", 1)).unwrap();
        let ObjectBody::Stream(stream) = &engine.object(id).unwrap().body else { panic!("not a stream") };
        stream.clone()
    }

    #[test]
    fn test_trigger_table_adds_and_removes() {
        let mut engine = engine();
        run(&mut engine, 1, ActionKind::SetCounterTrigger { trigger_identifier: 1.into(), position: Some(100.into()) });
        run(&mut engine, 1, ActionKind::SetCounterTrigger { trigger_identifier: 2.into(), position: Some(200.into()) });
        run(&mut engine, 1, ActionKind::SetCounterTrigger { trigger_identifier: 1.into(), position: None });
        assert_eq!(stream(&engine).counter_triggers.into_iter().collect::<Vec<_>>(), vec![(2, 200)]);
    }

    #[test]
    fn test_speed_defaults_denominator_and_rejects_zero() {
        let mut engine = engine();
        run(&mut engine, 1, ActionKind::SetSpeed { numerator: 2.into(), denominator: None });
        assert_eq!(stream(&engine).speed, (2, 1));
        run(&mut engine, 1, ActionKind::SetSpeed { numerator: 1.into(), denominator: Some(0.into()) });
        assert_eq!(stream(&engine).speed, (2, 1));
    }

    #[test]
    fn test_volume_round_trip_through_variable() {
        let mut engine = engine();
        run(&mut engine, 2, ActionKind::SetVolume { value: (-3).into() });
        run(&mut engine, 2, ActionKind::GetVolume { var: ObjectReference::Internal(3) });
        let var = engine.lookup(&ExternalReference::new("~//a", 3)).unwrap();
        assert_eq!(engine.object(var).and_then(|o| o.variable()).map(|v| v.value.clone()), Some(VariableValue::Integer(-3)));
    }
}

// MHEG - mheg-runtime
// Module: Action interpreter
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Elementary action interpreter.
//!
//! [`Engine::execute_action`] resolves the target, checks it against the
//! opcode's legal-target table and hands the action to the family module
//! that implements it. Every failure is logged and ends only the one
//! action: broadcast content is not trusted to be well formed.

mod group_ops;
mod stream_ops;
mod token_ops;
mod variable_ops;
mod visible_ops;

use mheg_error::{codes, kinds, Error, ErrorCategory, Result};
use mheg_foundation::{EventType, ExternalReference, GroupId, ObjectReference};
use mheg_instructions::{ActionKind, ElementaryAction, NewContent};

use crate::engine::Engine;
use crate::object::{ContentBody, MhegObject, ObjectBody, VisibleObject};
use crate::registry::ObjectId;

impl Engine {
    /// Execute one action for `caller_group`.
    ///
    /// Never fails: an unresolved target, a target of the wrong kind, an
    /// unimplemented opcode or a bad parameter is reported and the action
    /// is skipped.
    pub fn execute_action(&mut self, action: &ElementaryAction, caller_group: &GroupId) {
        let opcode = action.opcode();
        let target = self.get(&action.target, caller_group);
        self.logger.trace(caller_group, format!("{opcode} {target}"));

        let engine_handled = match &action.kind {
            ActionKind::TransitionTo { .. } => Some(self.transition_to(&target, caller_group)),
            ActionKind::Launch => Some(self.start_application(&target, caller_group, false)),
            ActionKind::Spawn => Some(self.start_application(&target, caller_group, true)),
            _ => None,
        };
        if let Some(result) = engine_handled {
            if let Err(error) = result {
                self.report_detail(self.absolute_address(&target, caller_group), error, opcode);
            }
            return;
        }

        let address = self.absolute_address(&target, caller_group);
        let Some(id) = self.registry.lookup(&address) else {
            if let ActionKind::GetAvailabilityStatus { var } = &action.kind {
                self.set_output(var, caller_group, false);
                return;
            }
            self.report_detail(&address, Error::UNRESOLVED_TARGET, opcode);
            return;
        };
        let Some(kind) = self.registry.get(id).map(MhegObject::kind) else { return };
        if !opcode.legal_targets().accepts(kind) {
            self.report_detail(&address, Error::UNEXPECTED_TARGET, format!("{opcode} on {kind}"));
            return;
        }
        if opcode.is_unimplemented() {
            self.report_detail(&address, kinds::unimplemented_action("Action is not supported by this receiver"), opcode);
            return;
        }

        if let Err(error) = self.dispatch(id, &action.kind, caller_group) {
            self.report_detail(&address, error, opcode);
        }
    }

    fn dispatch(&mut self, id: ObjectId, kind: &ActionKind, caller_group: &GroupId) -> Result<()> {
        use ActionKind as A;
        match kind {
            A::Activate { .. }
            | A::Deactivate { .. }
            | A::Preload { .. }
            | A::Run { .. }
            | A::Stop { .. }
            | A::Unload { .. }
            | A::Clone { .. }
            | A::GetAvailabilityStatus { .. }
            | A::GetRunningStatus { .. }
            | A::SetData { .. } => self.execute_object_op(id, kind, caller_group),
            A::SetVariable { .. }
            | A::TestVariable { .. }
            | A::Add { .. }
            | A::Subtract { .. }
            | A::Multiply { .. }
            | A::Divide { .. }
            | A::Modulo { .. }
            | A::Append { .. } => self.execute_variable_op(id, kind, caller_group),
            A::Call { call_succeeded, parameters } => {
                self.call_program(id, call_succeeded, parameters, caller_group, false)
            }
            A::Fork { fork_succeeded, parameters } => {
                self.call_program(id, fork_succeeded, parameters, caller_group, true)
            }
            A::Quit { .. }
            | A::LockScreen { .. }
            | A::UnlockScreen { .. }
            | A::GetEngineSupport { .. }
            | A::StorePersistent { .. }
            | A::ReadPersistent { .. }
            | A::SendEvent { .. }
            | A::SetTimer { .. }
            | A::SetCachePriority { .. } => self.execute_group_op(id, kind, caller_group),
            A::Move { .. }
            | A::MoveTo { .. }
            | A::GetTokenPosition { .. }
            | A::CallActionSlot { .. }
            | A::AddItem { .. }
            | A::DelItem { .. }
            | A::SelectItem { .. }
            | A::DeselectItem { .. }
            | A::ToggleItem { .. }
            | A::GetItemStatus { .. }
            | A::GetListItem { .. }
            | A::GetListSize { .. }
            | A::GetCellItem { .. }
            | A::SetCellPosition { .. }
            | A::SetFirstItem { .. }
            | A::GetFirstItem { .. }
            | A::ScrollItems { .. } => self.execute_token_op(id, kind, caller_group),
            A::SetCounterPosition { .. }
            | A::SetCounterEndPosition { .. }
            | A::SetCounterTrigger { .. }
            | A::SetSpeed { .. }
            | A::SetVolume { .. }
            | A::GetVolume { .. } => self.execute_stream_op(id, kind, caller_group),
            _ => self.execute_visible_op(id, kind, caller_group),
        }
    }

    // ---------------------------------------------------------------------
    // Helpers shared by the families

    pub(crate) fn body_mut(&mut self, id: ObjectId) -> Result<&mut ObjectBody> {
        self.registry.get_mut(id).map(|object| &mut object.body).ok_or_else(kinds::stale_handle)
    }

    pub(crate) fn visible_mut(&mut self, id: ObjectId) -> Result<&mut VisibleObject> {
        match self.body_mut(id)? {
            ObjectBody::Visible(visible) => Ok(visible),
            _ => Err(Error::UNEXPECTED_TARGET),
        }
    }

    pub(crate) fn group_of(&self, id: ObjectId) -> Result<GroupId> {
        self.address_of(id).map(|address| address.group_identifier).ok_or_else(kinds::stale_handle)
    }

    /// Redraw the region of `id` if it is a running visible
    pub(crate) fn redraw_object(&mut self, id: ObjectId) {
        let region = self
            .registry
            .get(id)
            .filter(|object| object.is_running())
            .and_then(MhegObject::visible)
            .map(|visible| visible.common.region());
        if let Some(region) = region {
            self.redraw(region);
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle, status, Clone and SetData

    fn execute_object_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        match kind {
            ActionKind::Activate | ActionKind::Run => {
                self.activate(id);
            }
            ActionKind::Deactivate | ActionKind::Stop => {
                self.deactivate(id);
            }
            ActionKind::Preload => {
                self.prepare(id);
            }
            ActionKind::Unload => {
                self.destroy(id);
            }
            ActionKind::GetAvailabilityStatus { var } => {
                let available = self.registry.get(id).is_some_and(MhegObject::is_available);
                self.set_output(var, gid, available);
            }
            ActionKind::GetRunningStatus { var } => {
                let running = self.registry.get(id).is_some_and(MhegObject::is_running);
                self.set_output(var, gid, running);
            }
            ActionKind::Clone { clone_ref_var } => self.clone_object(id, clone_ref_var, gid)?,
            ActionKind::SetData { content } => self.set_data(id, content, gid)?,
            _ => return Err(Error::UNEXPECTED_TARGET),
        }
        Ok(())
    }

    /// Clone `id` into the first free object number of its group
    fn clone_object(&mut self, id: ObjectId, clone_ref_var: &ObjectReference, gid: &GroupId) -> Result<()> {
        let source = self.registry.get(id).ok_or_else(kinds::stale_handle)?;
        let group = source.root.address.group_identifier.clone();
        let number = (self.config.clone_number_start..=i32::MAX)
            .find(|&n| self.registry.lookup(&ExternalReference::new(group.clone(), n)).is_none())
            .ok_or(Error::new(ErrorCategory::Capacity, codes::CLONE_NUMBERS_EXHAUSTED, "No free object number for a clone"))?;
        let address = ExternalReference::new(group.clone(), number);
        let clone = source.clone_as(address.clone());

        let clone_id = self.registry.add_object(clone)?;
        let owner = self.registry.lookup(&ExternalReference::group(group));
        if let Some(state) = owner.and_then(|owner| self.registry.get_mut(owner)).and_then(|o| o.body.group_mut()) {
            state.items.push(clone_id);
        }
        self.logger.debug(&address, "Cloned");
        self.prepare(clone_id);
        self.set_output(clone_ref_var, gid, ObjectReference::External(address));
        Ok(())
    }

    fn set_data(&mut self, id: ObjectId, content: &NewContent, gid: &GroupId) -> Result<()> {
        let content = match content {
            NewContent::Included(bytes) => ContentBody::Included(self.get(bytes, gid)),
            NewContent::Referenced { reference, .. } => ContentBody::Referenced(self.get(reference, gid)),
        };
        let object = self.registry.get_mut(id).ok_or_else(kinds::stale_handle)?;
        if !object.body.set_content(content.clone()) {
            return Err(Error::UNEXPECTED_TARGET);
        }
        if !object.root.available {
            return Ok(());
        }
        let resident = match content {
            ContentBody::Included(bytes) => {
                object.body.install_content(bytes);
                object.root.needs_content = false;
                self.missing_content.retain(|(waiting, _)| *waiting != id);
                true
            }
            ContentBody::Referenced(reference) => self.request_content(id, reference),
        };
        if resident {
            self.redraw_object(id);
            self.raise_async(id, EventType::ContentAvailable, None);
        }
        Ok(())
    }
}

/// `address` as seen from `scope`: internal if it lives there
pub(crate) fn scoped_reference(address: ExternalReference, scope: &GroupId) -> ObjectReference {
    if &address.group_identifier == scope {
        ObjectReference::Internal(address.object_number)
    } else {
        ObjectReference::External(address)
    }
}

#[cfg(test)]
mod tests {
    use mheg_foundation::{BoxSize, VariableValue, XYPosition};
    use mheg_logging::LogOperation;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::config::EngineConfig;
    use crate::descriptor::{GroupDescriptor, ItemDescriptor};
    use crate::display::RecordingDisplay;
    use crate::object::{BitmapState, VariableState, VisibleBody};

    fn captured(engine: &mut Engine) -> Arc<Mutex<Vec<LogOperation>>> {
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&records);
        engine.logger_mut().register_handler(move |op: &LogOperation| {
            if let Ok(mut ops) = sink.lock() {
                ops.push(op.clone());
            }
        });
        records
    }

    #[test]
    fn test_unresolved_target_is_reported() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.load_application(GroupDescriptor::application("~//a")).unwrap();
        let log = captured(&mut engine);
        let gid = GroupId::from("~//a");
        engine.execute_action(&ElementaryAction::new(ObjectReference::Internal(9), ActionKind::Run), &gid);
        assert!(log.lock().unwrap().iter().any(|op| op.has_code(codes::UNRESOLVED_TARGET)));
    }

    #[test]
    fn test_availability_of_missing_object_is_false() {
        let mut engine = Engine::new(EngineConfig::default());
        let app = GroupDescriptor::application("~//a")
            .with_item(ItemDescriptor::new(1, ObjectBody::Variable(VariableState::new(VariableValue::Boolean(true)))));
        engine.load_application(app).unwrap();
        let gid = GroupId::from("~//a");
        let action = ElementaryAction::new(
            ObjectReference::Internal(9),
            ActionKind::GetAvailabilityStatus { var: ObjectReference::Internal(1) },
        );
        engine.execute_action(&action, &gid);
        let var = engine.lookup(&ExternalReference::new("~//a", 1)).unwrap();
        assert_eq!(engine.object(var).and_then(MhegObject::variable).map(|v| v.value.clone()), Some(VariableValue::Boolean(false)));
    }

    #[test]
    fn test_unimplemented_opcode_is_critical() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.load_application(GroupDescriptor::application("~//a")).unwrap();
        let log = captured(&mut engine);
        let gid = GroupId::from("~//a");
        let action = ElementaryAction::new(ObjectReference::Internal(0), ActionKind::CloseConnection { connection_tag: 1.into() });
        engine.execute_action(&action, &gid);
        let ops = log.lock().unwrap();
        assert!(ops.iter().any(|op| op.error.is_some_and(|e| e.is_not_implemented())));
    }

    #[test]
    fn test_bring_to_front_on_a_variable_touches_nothing() {
        let display = RecordingDisplay::new();
        let mut engine = Engine::new(EngineConfig::default()).with_display(display.clone());
        let app = GroupDescriptor::application("~//a")
            .with_item(ItemDescriptor::new(1, ObjectBody::Variable(VariableState::new(VariableValue::Integer(3)))));
        engine.load_application(app).unwrap();
        display.clear();
        let log = captured(&mut engine);
        let stack = engine.display_stack().to_vec();
        let objects = engine.registry().len();

        engine.execute_action(&ElementaryAction::new(ObjectReference::Internal(1), ActionKind::BringToFront), &GroupId::from("~//a"));

        assert!(display.calls().is_empty());
        assert_eq!(engine.display_stack(), stack.as_slice());
        assert_eq!(engine.registry().len(), objects);
        assert!(log.lock().unwrap().iter().any(|op| op.has_code(codes::UNEXPECTED_TARGET)));
    }

    #[test]
    fn test_set_data_redraws_running_bitmap() {
        let display = RecordingDisplay::new();
        let mut engine = Engine::new(EngineConfig::default()).with_display(display.clone());
        let bitmap = VisibleObject::new(XYPosition::new(1, 2), BoxSize::new(3, 4), VisibleBody::Bitmap(BitmapState::new(None)));
        let app = GroupDescriptor::application("~//a").with_item(ItemDescriptor::new(1, ObjectBody::Visible(bitmap)));
        engine.load_application(app).unwrap();
        display.clear();
        let gid = GroupId::from("~//a");
        let action = ElementaryAction::new(
            ObjectReference::Internal(1),
            ActionKind::SetData { content: NewContent::Included(mheg_foundation::OctetString::from("png").into()) },
        );
        engine.execute_action(&action, &gid);
        assert_eq!(
            display.calls(),
            vec![crate::display::DisplayCall::Redraw(mheg_foundation::Region::new(XYPosition::new(1, 2), BoxSize::new(3, 4)))]
        );
    }
}

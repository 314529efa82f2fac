// MHEG - mheg-runtime
// Module: Token and list group actions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Token movement, action slots and list editing.

use mheg_error::{codes, Error, Result};
use mheg_foundation::{EventType, GroupId, ObjectReference};
use mheg_instructions::ActionKind;

use super::scoped_reference;
use crate::engine::Engine;
use crate::object::{ListGroupState, ObjectBody, TokenGroupState};
use crate::registry::ObjectId;

const INVALID_INDEX: Error = Error::parameter_error(codes::INVALID_INDEX, "No item at this index");

impl Engine {
    pub(super) fn execute_token_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        match kind {
            ActionKind::Move { movement_identifier } => {
                let movement = self.get(movement_identifier, gid);
                let target = self.token(id)?.movement_target(movement)?;
                self.move_token(id, target)
            }
            ActionKind::MoveTo { index } => {
                let index = self.get(index, gid);
                self.move_token(id, index)
            }
            ActionKind::GetTokenPosition { var } => {
                let position = self.token(id)?.token_position;
                self.set_output(var, gid, position);
                Ok(())
            }
            ActionKind::CallActionSlot { index } => {
                let index = self.get(index, gid);
                let owner = self.group_of(id)?;
                if let Some(actions) = self.token(id)?.action_slot(index).cloned() {
                    self.queue_actions(&actions, &owner);
                }
                Ok(())
            }
            _ => self.execute_list_op(id, kind, gid),
        }
    }

    fn execute_list_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        let owner = self.group_of(id)?;
        match kind {
            ActionKind::AddItem { item_index, visible_reference } => {
                let index = self.get(item_index, gid);
                let reference = self.absolute_address(&self.get(visible_reference, gid), gid);
                let reference = scoped_reference(reference, &owner);
                if !self.list_mut(id)?.add_item(index, reference)? {
                    self.logger.debug(&owner, "Item already in list");
                }
            }
            ActionKind::DelItem { visible_reference } => {
                let reference = scoped_reference(self.absolute_address(&self.get(visible_reference, gid), gid), &owner);
                if !self.list_mut(id)?.del_item(&reference) {
                    self.logger.debug(&owner, format!("{reference} is not in the list"));
                }
            }
            ActionKind::SelectItem { item_index } => self.set_item_selected(id, self.get(item_index, gid), Some(true))?,
            ActionKind::DeselectItem { item_index } => self.set_item_selected(id, self.get(item_index, gid), Some(false))?,
            ActionKind::ToggleItem { item_index } => self.set_item_selected(id, self.get(item_index, gid), None)?,
            ActionKind::GetItemStatus { item_index, var } => {
                let index = self.get(item_index, gid);
                let list = self.list(id)?;
                let slot = list.slot(index).ok_or(INVALID_INDEX)?;
                let selected = list.item_list.get(slot).is_some_and(|item| item.selected);
                self.set_output(var, gid, selected);
            }
            ActionKind::GetListItem { item_index, var } => {
                let index = self.get(item_index, gid);
                let list = self.list(id)?;
                let slot = list.slot(index).ok_or(INVALID_INDEX)?;
                let reference = list.item_list.get(slot).map(|item| item.reference.clone()).ok_or(INVALID_INDEX)?;
                let reference = ObjectReference::External(self.absolute_address(&reference, &owner));
                self.set_output(var, gid, reference);
            }
            ActionKind::GetListSize { var } => {
                let size = i32::try_from(self.list(id)?.len()).unwrap_or(i32::MAX);
                self.set_output(var, gid, size);
            }
            ActionKind::GetCellItem { cell_index, item_ref_var } => {
                let cell = self.get(cell_index, gid);
                let list = self.list(id)?;
                let item = list.slot(list.first_item.saturating_add(cell.saturating_sub(1))).and_then(|slot| list.item_list.get(slot));
                // an empty cell reads as a null reference
                let reference = item
                    .map(|item| ObjectReference::External(self.absolute_address(&item.reference, &owner)))
                    .unwrap_or_default();
                self.set_output(item_ref_var, gid, reference);
            }
            ActionKind::SetCellPosition { cell_index, position } => {
                let cell = self.get(cell_index, gid);
                let at = self.point(position, gid);
                // the authored cells are all there is
                let slot = usize::try_from(cell.saturating_sub(1)).map_err(|_| INVALID_INDEX)?;
                *self.list_mut(id)?.positions.get_mut(slot).ok_or(INVALID_INDEX)? = at;
            }
            ActionKind::SetFirstItem { value } => {
                let value = self.get(value, gid);
                let list = self.list_mut(id)?;
                let slot = list.slot(value).ok_or(INVALID_INDEX)?;
                list.first_item = i32::try_from(slot + 1).unwrap_or(1);
            }
            ActionKind::GetFirstItem { var } => {
                let first = self.list(id)?.first_item;
                self.set_output(var, gid, first);
            }
            ActionKind::ScrollItems { items_to_scroll } => {
                let count = self.get(items_to_scroll, gid);
                self.list_mut(id)?.scroll(count);
            }
            _ => return Err(Error::UNEXPECTED_TARGET),
        }
        Ok(())
    }

    /// Move the token to `position`, raising TokenMovedFrom and TokenMovedTo
    /// if it changed
    fn move_token(&mut self, id: ObjectId, position: i32) -> Result<()> {
        let token = self.token_mut(id)?;
        let count = i32::try_from(token.items.len()).unwrap_or(i32::MAX);
        if !(0..=count).contains(&position) {
            return Err(Error::parameter_error(codes::INVALID_MOVEMENT, "Token position out of range"));
        }
        let old = token.token_position;
        if old == position {
            return Ok(());
        }
        token.token_position = position;
        self.raise_sync(id, EventType::TokenMovedFrom, Some(old.into()));
        self.raise_sync(id, EventType::TokenMovedTo, Some(position.into()));
        Ok(())
    }

    /// Select (`Some(true)`), deselect (`Some(false)`) or toggle (`None`)
    /// a list item.
    ///
    /// Selecting in a single-selection list deselects the rest first.
    fn set_item_selected(&mut self, id: ObjectId, index: i32, selected: Option<bool>) -> Result<()> {
        let list = self.list_mut(id)?;
        let slot = list.slot(index).ok_or(INVALID_INDEX)?;
        let current = list.item_list.get(slot).is_some_and(|item| item.selected);
        let wanted = selected.unwrap_or(!current);
        if wanted == current {
            return Ok(());
        }
        let mut changes = Vec::new();
        if wanted && !list.multiple_selection {
            for (other, item) in list.item_list.iter_mut().enumerate() {
                if item.selected {
                    item.selected = false;
                    changes.push((other, false));
                }
            }
        }
        if let Some(item) = list.item_list.get_mut(slot) {
            item.selected = wanted;
        }
        changes.push((slot, wanted));

        for (slot, selected) in changes {
            let index = i32::try_from(slot + 1).unwrap_or(i32::MAX);
            let event = if selected { EventType::ItemSelected } else { EventType::ItemDeselected };
            self.raise_sync(id, event, Some(index.into()));
        }
        Ok(())
    }

    fn token(&self, id: ObjectId) -> Result<&TokenGroupState> {
        self.registry.get(id).and_then(|object| object.body.token()).ok_or(Error::UNEXPECTED_TARGET)
    }

    fn token_mut(&mut self, id: ObjectId) -> Result<&mut TokenGroupState> {
        self.body_mut(id)?.token_mut().ok_or(Error::UNEXPECTED_TARGET)
    }

    fn list(&self, id: ObjectId) -> Result<&ListGroupState> {
        match self.registry.get(id).map(|object| &object.body) {
            Some(ObjectBody::ListGroup(list)) => Ok(list),
            _ => Err(Error::UNEXPECTED_TARGET),
        }
    }

    fn list_mut(&mut self, id: ObjectId) -> Result<&mut ListGroupState> {
        match self.body_mut(id)? {
            ObjectBody::ListGroup(list) => Ok(list),
            _ => Err(Error::UNEXPECTED_TARGET),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use mheg_foundation::{EventData, ExternalReference, VariableValue, XYPosition};
    use mheg_instructions::{ElementaryAction, Point};
    use mheg_logging::LogOperation;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::EngineConfig;
    use crate::descriptor::{GroupDescriptor, ItemDescriptor};
    use crate::object::{ListGroupState, TokenGroupItem, VariableState};

    fn items() -> Vec<TokenGroupItem> {
        (11..=13).map(|n| TokenGroupItem::new(ObjectReference::Internal(n))).collect()
    }

    fn run(engine: &mut Engine, kind: ActionKind) {
        engine.run_actions(&[ElementaryAction::new(ObjectReference::Internal(1), kind)], &GroupId::from("~//a"));
    }

    fn list_engine(multiple: bool) -> Engine {
        let mut list = ListGroupState::new(items(), vec![XYPosition::new(0, 0), XYPosition::new(0, 40)]);
        list.multiple_selection = multiple;
        let app = GroupDescriptor::application("~//a")
            .with_item(ItemDescriptor::new(1, ObjectBody::ListGroup(list)).inactive())
            .with_item(ItemDescriptor::new(2, ObjectBody::Variable(VariableState::new(VariableValue::Integer(0)))));
        let mut engine = Engine::new(EngineConfig::default());
        engine.load_application(app).unwrap();
        let list = engine.lookup(&ExternalReference::new("~//a", 1)).unwrap();
        engine.prepare(list);
        engine.clear_history();
        engine
    }

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

    fn list_state(engine: &Engine) -> &ListGroupState {
        let list = engine.lookup(&ExternalReference::new("~//a", 1)).unwrap();
        let ObjectBody::ListGroup(state) = &engine.object(list).unwrap().body else { panic!("not a list") };
        state
    }

    #[test]
    fn test_single_selection_moves_the_selection() {
        let mut engine = list_engine(false);
        run(&mut engine, ActionKind::SelectItem { item_index: 1.into() });
        run(&mut engine, ActionKind::SelectItem { item_index: 3.into() });
        run(&mut engine, ActionKind::ToggleItem { item_index: 3.into() });
        let events: Vec<_> = engine.history().iter().map(|r| (r.event.event_type, r.event.data.clone())).collect();
        assert_eq!(
            events,
            vec![
                (EventType::ItemSelected, Some(EventData::Integer(1))),
                (EventType::ItemDeselected, Some(EventData::Integer(1))),
                (EventType::ItemSelected, Some(EventData::Integer(3))),
                (EventType::ItemDeselected, Some(EventData::Integer(3))),
            ]
        );
    }

    #[test]
    fn test_list_size_after_editing() {
        let mut engine = list_engine(true);
        run(&mut engine, ActionKind::AddItem { item_index: 2.into(), visible_reference: ObjectReference::Internal(14).into() });
        run(&mut engine, ActionKind::DelItem { visible_reference: ObjectReference::external("~//a", 11).into() });
        run(&mut engine, ActionKind::GetListSize { var: ObjectReference::Internal(2) });
        let var = engine.lookup(&ExternalReference::new("~//a", 2)).unwrap();
        assert_eq!(engine.object(var).and_then(|o| o.variable()).map(|v| v.value.clone()), Some(VariableValue::Integer(3)));
        let list = engine.lookup(&ExternalReference::new("~//a", 1)).unwrap();
        let ObjectBody::ListGroup(state) = &engine.object(list).unwrap().body else { panic!("not a list") };
        assert_eq!(state.item_list[0].reference, ObjectReference::Internal(14));
    }

    #[test]
    fn test_extreme_token_parameters_are_logged_and_skipped() {
        let mut engine = list_engine(false);
        let log = captured(&mut engine);
        run(&mut engine, ActionKind::Move { movement_identifier: i32::MIN.into() });
        run(&mut engine, ActionKind::CallActionSlot { index: i32::MIN.into() });
        run(&mut engine, ActionKind::GetTokenPosition { var: ObjectReference::Internal(2) });
        let var = engine.lookup(&ExternalReference::new("~//a", 2)).unwrap();
        assert_eq!(engine.object(var).and_then(|o| o.variable()).map(|v| v.value.clone()), Some(VariableValue::Integer(1)));
        assert!(log.lock().unwrap().iter().any(|op| op.has_code(codes::INVALID_MOVEMENT)));
    }

    #[test]
    fn test_select_item_wraps_extreme_index() {
        let mut engine = list_engine(false);
        let list = engine.lookup(&ExternalReference::new("~//a", 1)).unwrap();
        if let Some(ObjectBody::ListGroup(state)) = engine.registry.get_mut(list).map(|o| &mut o.body) {
            state.wrap_around = true;
        }
        run(&mut engine, ActionKind::SelectItem { item_index: i32::MIN.into() });
        let selected: Vec<_> = list_state(&engine).item_list.iter().map(|item| item.selected).collect();
        assert_eq!(selected, vec![true, false, false]);
    }

    #[test]
    fn test_cell_position_outside_authored_cells_is_rejected() {
        let mut engine = list_engine(false);
        let log = captured(&mut engine);
        run(&mut engine, ActionKind::SetCellPosition { cell_index: 2.into(), position: Point::literal(5, 6) });
        run(&mut engine, ActionKind::SetCellPosition { cell_index: i32::MAX.into(), position: Point::literal(7, 8) });
        run(&mut engine, ActionKind::SetCellPosition { cell_index: 0.into(), position: Point::literal(7, 8) });
        assert_eq!(list_state(&engine).positions, vec![XYPosition::new(0, 0), XYPosition::new(5, 6)]);
        let rejected = log.lock().unwrap().iter().filter(|op| op.has_code(codes::INVALID_INDEX)).count();
        assert_eq!(rejected, 2);
    }
}

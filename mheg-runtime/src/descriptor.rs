// MHEG - mheg-runtime
// Module: Group descriptors
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Typed form of a decoded application or scene.
//!
//! A [`GroupDescriptor`] is what the decoder hands the engine: the group
//! identifier, its start-up and close-down actions and its items. The
//! engine validates a descriptor before registering any of its objects, so
//! a rejected load leaves nothing behind.

use std::collections::HashSet;

use mheg_error::{codes, Error, ErrorCategory, Result};
use mheg_foundation::GroupId;
use mheg_instructions::ActionList;

use crate::object::ObjectBody;

/// Body of a group item
pub type ItemBody = ObjectBody;

/// Whether a descriptor is an application or a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Application
    Application,
    /// Scene
    Scene,
}

/// One item of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
    /// Object number inside the group, greater than zero
    pub number:           i32,
    /// Activated together with the group
    pub initially_active: bool,
    /// Survives scene transitions
    pub shared:           bool,
    /// Kind-specific state
    pub body:             ItemBody,
}

impl ItemDescriptor {
    /// Initially active, unshared item
    pub fn new(number: i32, body: ItemBody) -> Self {
        Self { number, initially_active: true, shared: false, body }
    }

    /// Not activated with the group
    pub fn inactive(mut self) -> Self {
        self.initially_active = false;
        self
    }

    /// Kept across scene transitions
    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }
}

/// A decoded application or scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDescriptor {
    /// Group identifier, e.g. `~//a/startup`
    pub group_identifier: GroupId,
    /// Application or scene
    pub kind:             GroupKind,
    /// Items in authored order
    pub items:            Vec<ItemDescriptor>,
    /// Run on activation
    pub on_start_up:      ActionList,
    /// Run on deactivation
    pub on_close_down:    ActionList,
}

impl GroupDescriptor {
    /// Empty application
    pub fn application(group_identifier: impl Into<GroupId>) -> Self {
        Self::new(group_identifier, GroupKind::Application)
    }

    /// Empty scene
    pub fn scene(group_identifier: impl Into<GroupId>) -> Self {
        Self::new(group_identifier, GroupKind::Scene)
    }

    fn new(group_identifier: impl Into<GroupId>, kind: GroupKind) -> Self {
        Self {
            group_identifier: group_identifier.into(),
            kind,
            items: Vec::new(),
            on_start_up: Vec::new(),
            on_close_down: Vec::new(),
        }
    }

    /// Append an item
    pub fn with_item(mut self, item: ItemDescriptor) -> Self {
        self.items.push(item);
        self
    }

    /// Set the start-up actions
    pub fn with_on_start_up(mut self, actions: ActionList) -> Self {
        self.on_start_up = actions;
        self
    }

    /// Set the close-down actions
    pub fn with_on_close_down(mut self, actions: ActionList) -> Self {
        self.on_close_down = actions;
        self
    }

    /// Check the descriptor against the closed sets and numbering rules.
    ///
    /// # Errors
    ///
    /// - `INVALID_GROUP_ITEM` (fatal) if an item is an application or scene
    /// - `INVALID_STREAM_COMPONENT` (fatal) if a stream multiplexes
    ///   anything but audio, video or RT-graphics
    /// - `INVALID_GROUP_DESCRIPTOR` for an object number below 1
    /// - `DUPLICATE_OBJECT_NUMBER` if two items, components included,
    ///   share a number
    pub fn validate(&self) -> Result<()> {
        let mut numbers = HashSet::new();
        for item in &self.items {
            if item.body.kind().is_group() {
                return Err(Error::new(
                    ErrorCategory::ClosedSet,
                    codes::INVALID_GROUP_ITEM,
                    "Applications and scenes cannot be group items",
                ));
            }
            check_number(&mut numbers, item.number)?;
            if let ObjectBody::Stream(stream) = &item.body {
                for component in &stream.multiplex {
                    if component.body.stream_component_kind().is_none() {
                        return Err(Error::new(
                            ErrorCategory::ClosedSet,
                            codes::INVALID_STREAM_COMPONENT,
                            "Stream multiplex entry is not a stream component",
                        ));
                    }
                    check_number(&mut numbers, component.number)?;
                }
            }
        }
        Ok(())
    }
}

fn check_number(seen: &mut HashSet<i32>, number: i32) -> Result<()> {
    if number < 1 {
        return Err(Error::validation_error(
            codes::INVALID_GROUP_DESCRIPTOR,
            "Item object numbers start at 1",
        ));
    }
    if !seen.insert(number) {
        return Err(Error::validation_error(codes::DUPLICATE_OBJECT_NUMBER, "Duplicate object number in group"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use mheg_foundation::VariableValue;

    use super::*;
    use crate::object::{AudioState, GroupState, StreamState, VariableState};

    fn integer(number: i32) -> ItemDescriptor {
        ItemDescriptor::new(number, ObjectBody::Variable(VariableState::new(VariableValue::Integer(0))))
    }

    #[test]
    fn test_valid_scene() {
        let stream = StreamState::new(None).with_component(ItemDescriptor::new(3, ObjectBody::Audio(AudioState::new(1, 0))));
        let scene = GroupDescriptor::scene("~//scene")
            .with_item(integer(1))
            .with_item(ItemDescriptor::new(2, ObjectBody::Stream(stream)).inactive());
        assert_eq!(scene.validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_numbers_include_components() {
        let stream = StreamState::new(None).with_component(ItemDescriptor::new(1, ObjectBody::Audio(AudioState::new(1, 0))));
        let scene = GroupDescriptor::scene("~//scene")
            .with_item(integer(1))
            .with_item(ItemDescriptor::new(2, ObjectBody::Stream(stream)));
        assert_eq!(scene.validate().unwrap_err().code, codes::DUPLICATE_OBJECT_NUMBER);
    }

    #[test]
    fn test_closed_set_violations_are_fatal() {
        let nested = GroupDescriptor::scene("~//scene")
            .with_item(ItemDescriptor::new(1, ObjectBody::Scene(GroupState::default())));
        assert!(nested.validate().unwrap_err().is_fatal());

        let stream = StreamState::new(None).with_component(integer(3));
        let bad_multiplex =
            GroupDescriptor::scene("~//scene").with_item(ItemDescriptor::new(2, ObjectBody::Stream(stream)));
        let error = bad_multiplex.validate().unwrap_err();
        assert!(error.is_fatal());
        assert_eq!(error.code, codes::INVALID_STREAM_COMPONENT);
    }
}

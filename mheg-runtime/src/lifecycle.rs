// MHEG - mheg-runtime
// Module: Object lifecycle
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The four lifecycle transitions.
//!
//! ```text
//! Unavailable --prepare--> Available --activate--> Running
//!      ^                     |   ^                    |
//!      +------destroy--------+   +-----deactivate-----+
//! ```
//!
//! Each transition returns true only if it changed the state; calling it
//! from the wrong state is a no-op. Kind-specific side effects run before
//! the flag flips and the lifecycle event is raised last, so links see a
//! consistent object.

use mheg_error::kinds;
use mheg_foundation::{ContentReference, EventType, ExternalReference, GroupId, ObjectReference};
use mheg_instructions::{ActionList, ElementaryAction, Opcode};

use crate::content::ContentStatus;
use crate::engine::Engine;
use crate::object::{ContentBody, ObjectBody};
use crate::registry::ObjectId;

/// Kind-specific work of one transition, collected while the object is
/// borrowed and carried out afterwards
enum SideEffect {
    None,
    Group { gid: GroupId, actions: ActionList, items: Vec<ObjectId> },
    Link,
    Visible(ExternalReference),
    Stream(Vec<ObjectId>),
    Token { gid: GroupId, items: Vec<ObjectReference>, position: i32 },
    Program,
}

impl Engine {
    fn lifecycle_target(&self, id: ObjectId) -> bool {
        if self.registry.contains(id) {
            return true;
        }
        self.report(id, kinds::stale_handle());
        false
    }

    fn initially_active(&self, id: ObjectId) -> bool {
        self.registry.get(id).is_some_and(|object| object.initially_active)
    }

    /// Preparation: Unavailable to Available.
    ///
    /// Restores the authored attributes and requests content. Raises
    /// `IsAvailable`, then queues `ContentAvailable` if the content is
    /// already resident.
    pub fn prepare(&mut self, id: ObjectId) -> bool {
        if !self.lifecycle_target(id) {
            return false;
        }
        let Some(object) = self.registry.get_mut(id) else { return false };
        if object.root.available {
            return false;
        }
        object.body.reset_to_originals();
        let address = object.root.address.clone();
        let content = object.body.content().cloned();
        let items = object.body.group().map(|group| group.items.clone());
        for item in items.unwrap_or_default() {
            if self.initially_active(item) {
                self.prepare(item);
            }
        }

        let resident = match content {
            None => false,
            Some(ContentBody::Included(bytes)) => {
                if let Some(object) = self.registry.get_mut(id) {
                    object.body.install_content(bytes);
                }
                true
            }
            Some(ContentBody::Referenced(reference)) => self.request_content(id, reference),
        };

        if let Some(object) = self.registry.get_mut(id) {
            object.root.available = true;
        }
        self.logger.trace(&address, "Prepared");
        self.raise_sync(id, EventType::IsAvailable, None);
        if resident {
            self.raise_async(id, EventType::ContentAvailable, None);
        }
        true
    }

    /// Ask the loader for `reference` on behalf of `id`; true if the bytes
    /// were installed at once.
    ///
    /// A pending request replaces any earlier one of the same object.
    pub(crate) fn request_content(&mut self, id: ObjectId, reference: ContentReference) -> bool {
        let status = self.loader.try_load(&reference);
        let Some(object) = self.registry.get_mut(id) else { return false };
        match status {
            ContentStatus::Ready(bytes) => {
                object.body.install_content(bytes);
                object.root.needs_content = false;
                self.missing_content.retain(|(waiting, _)| *waiting != id);
                true
            }
            ContentStatus::Pending => {
                object.root.needs_content = true;
                self.logger.debug(&object.root.address, format!("Waiting for {reference}"));
                self.missing_content.retain(|(waiting, _)| *waiting != id);
                self.missing_content.push((id, reference));
                false
            }
        }
    }

    /// Activation: Available to Running, preparing first if needed
    pub fn activate(&mut self, id: ObjectId) -> bool {
        if !self.lifecycle_target(id) {
            return false;
        }
        if self.registry.get(id).is_some_and(|object| object.root.running) {
            return false;
        }
        self.prepare(id);

        let now = self.clock_ms;
        let Some(object) = self.registry.get_mut(id) else { return false };
        let address = object.root.address.clone();
        let gid = address.group_identifier.clone();
        let effect = match &mut object.body {
            ObjectBody::Application(group) | ObjectBody::Scene(group) => {
                group.activated_at = now;
                SideEffect::Group { gid, actions: group.on_start_up.clone(), items: group.items.clone() }
            }
            ObjectBody::Link(_) => SideEffect::Link,
            ObjectBody::Visible(_) => SideEffect::Visible(address.clone()),
            ObjectBody::Stream(stream) => SideEffect::Stream(stream.components.clone()),
            ObjectBody::TokenGroup(token) => SideEffect::Token {
                gid,
                items: token.item_references().cloned().collect(),
                position: token.token_position,
            },
            ObjectBody::ListGroup(list) => SideEffect::Token {
                gid,
                items: list.token.item_references().cloned().collect(),
                position: list.token.token_position,
            },
            _ => SideEffect::None,
        };

        let mut stream_started = false;
        match effect {
            SideEffect::Group { gid, actions, items } => {
                self.run_inline(&actions, &gid);
                for item in items {
                    if self.initially_active(item) {
                        self.activate(item);
                    }
                }
            }
            SideEffect::Link => {
                if !self.active_links.contains(&id) {
                    self.active_links.push(id);
                }
            }
            SideEffect::Visible(address) => {
                self.display_stack.retain(|visible| *visible != id);
                self.display_stack.push(id);
                self.display.show(&address);
            }
            SideEffect::Stream(components) => {
                for component in components {
                    if self.initially_active(component) {
                        self.activate(component);
                    }
                }
                stream_started = true;
            }
            SideEffect::Token { gid, items, position } => {
                for reference in items {
                    if let Some(item) = self.find_object(&reference, &gid) {
                        self.activate(item);
                    }
                }
                self.raise_sync(id, EventType::TokenMovedTo, Some(position.into()));
            }
            SideEffect::Program | SideEffect::None => {}
        }

        if let Some(object) = self.registry.get_mut(id) {
            object.root.running = true;
        }
        self.logger.debug(&address, "Running");
        self.raise_sync(id, EventType::IsRunning, None);
        if stream_started {
            self.raise_async(id, EventType::StreamPlaying, None);
        }
        true
    }

    /// Deactivation: Running to Available
    pub fn deactivate(&mut self, id: ObjectId) -> bool {
        if !self.lifecycle_target(id) {
            return false;
        }
        let Some(object) = self.registry.get_mut(id) else { return false };
        if !object.root.running {
            return false;
        }
        let address = object.root.address.clone();
        let gid = address.group_identifier.clone();
        let effect = match &mut object.body {
            ObjectBody::Application(group) | ObjectBody::Scene(group) => SideEffect::Group {
                gid,
                actions: group.on_close_down.clone(),
                items: group.items.clone(),
            },
            ObjectBody::Link(_) => SideEffect::Link,
            ObjectBody::Visible(_) => SideEffect::Visible(address.clone()),
            ObjectBody::Stream(stream) => SideEffect::Stream(stream.components.clone()),
            ObjectBody::TokenGroup(token) => {
                SideEffect::Token { gid, items: Vec::new(), position: token.token_position }
            }
            ObjectBody::ListGroup(list) => {
                SideEffect::Token { gid, items: Vec::new(), position: list.token.token_position }
            }
            ObjectBody::Program(program) => {
                program.forked = false;
                SideEffect::Program
            }
            _ => SideEffect::None,
        };

        let mut stream_stopped = false;
        match effect {
            SideEffect::Group { gid, actions, items } => {
                self.run_inline(&actions, &gid);
                for item in items.into_iter().rev() {
                    self.deactivate(item);
                }
            }
            SideEffect::Link => self.active_links.retain(|link| *link != id),
            SideEffect::Visible(address) => {
                self.display.hide(&address);
                self.display_stack.retain(|visible| *visible != id);
            }
            SideEffect::Stream(components) => {
                for component in components.into_iter().rev() {
                    self.deactivate(component);
                }
                stream_stopped = true;
            }
            SideEffect::Token { position, .. } => {
                self.raise_sync(id, EventType::TokenMovedFrom, Some(position.into()));
            }
            SideEffect::Program | SideEffect::None => {}
        }

        if let Some(object) = self.registry.get_mut(id) {
            object.root.running = false;
        }
        self.logger.debug(&address, "Stopped");
        self.raise_sync(id, EventType::IsStopped, None);
        if stream_stopped {
            self.raise_async(id, EventType::StreamStopped, None);
        }
        true
    }

    /// Destruction: Available to Unavailable, deactivating first if needed.
    ///
    /// A destroyed clone leaves the registry.
    pub fn destroy(&mut self, id: ObjectId) -> bool {
        if !self.lifecycle_target(id) {
            return false;
        }
        if !self.registry.get(id).is_some_and(|object| object.root.available) {
            return false;
        }
        self.deactivate(id);

        let Some(object) = self.registry.get_mut(id) else { return false };
        let address = object.root.address.clone();
        let owned = match &mut object.body {
            ObjectBody::Application(group) | ObjectBody::Scene(group) => {
                group.timers.clear();
                group.items.clone()
            }
            ObjectBody::Stream(stream) => stream.components.clone(),
            _ => Vec::new(),
        };
        for item in owned.into_iter().rev() {
            self.destroy(item);
        }

        self.missing_content.retain(|(waiting, _)| *waiting != id);
        let Some(object) = self.registry.get_mut(id) else { return false };
        object.body.release_content();
        object.root.needs_content = false;
        object.root.available = false;
        let cloned = object.cloned;
        self.logger.trace(&address, "Destroyed");
        self.raise_sync(id, EventType::IsDeleted, None);

        if cloned {
            self.discard_clone(id, &address);
        }
        true
    }

    fn discard_clone(&mut self, id: ObjectId, address: &ExternalReference) {
        let owner = self.registry.lookup(&ExternalReference::group(address.group_identifier.clone()));
        if let Some(group) = owner.and_then(|owner| self.registry.get_mut(owner)).and_then(|o| o.body.group_mut()) {
            group.items.retain(|item| *item != id);
        }
        self.active_links.retain(|link| *link != id);
        self.display_stack.retain(|visible| *visible != id);
        self.registry.remove_object(id);
        self.logger.debug(address, "Clone removed");
    }

    /// Run start-up or close-down actions at once.
    ///
    /// Actions that replace the running application or scene are refused
    /// here; they only make sense from a link.
    fn run_inline(&mut self, actions: &[ElementaryAction], gid: &GroupId) {
        for action in actions {
            if matches!(action.opcode(), Opcode::TransitionTo | Opcode::Launch | Opcode::Spawn | Opcode::Quit) {
                self.report_detail(
                    gid,
                    mheg_error::Error::runtime_error("Context change during group start-up or close-down"),
                    action.opcode(),
                );
                continue;
            }
            self.execute_action(action, gid);
        }
    }
}

#[cfg(test)]
mod tests {
    use mheg_foundation::{BoxSize, ContentReference, VariableValue, XYPosition};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::EngineConfig;
    use crate::content::MemoryContentLoader;
    use crate::descriptor::{GroupDescriptor, ItemDescriptor};
    use crate::object::{BitmapState, MhegObject, VariableState, VisibleBody, VisibleObject};

    fn bitmap(content: &str) -> ObjectBody {
        let body = VisibleBody::Bitmap(BitmapState::new(Some(ContentBody::Referenced(ContentReference::new(content)))));
        ObjectBody::Visible(VisibleObject::new(XYPosition::new(0, 0), BoxSize::new(10, 10), body))
    }

    fn events(engine: &Engine) -> Vec<(i32, EventType)> {
        engine.history().iter().map(|r| (r.event.source.object_number, r.event.event_type)).collect()
    }

    #[test]
    fn test_transitions_are_idempotent() {
        let mut engine = Engine::new(EngineConfig::default());
        let var = engine
            .registry
            .add_object(MhegObject::new(
                ExternalReference::new("~//a", 1),
                ObjectBody::Variable(VariableState::new(VariableValue::Integer(3))),
            ))
            .unwrap();
        assert!(engine.prepare(var));
        assert!(!engine.prepare(var));
        assert!(engine.activate(var));
        assert!(!engine.activate(var));
        assert!(engine.destroy(var));
        assert!(!engine.destroy(var));
        assert!(!engine.deactivate(var));
        assert_eq!(
            events(&engine),
            vec![(1, EventType::IsAvailable), (1, EventType::IsRunning), (1, EventType::IsStopped), (1, EventType::IsDeleted)]
        );
    }

    #[test]
    fn test_pending_content_defers_content_available() {
        let loader = MemoryContentLoader::new().with_content("pic.png", "png").with_deferred("pic.png");
        let mut engine = Engine::new(EngineConfig::default()).with_content_loader(loader);
        let app = GroupDescriptor::application("~//a").with_item(ItemDescriptor::new(1, bitmap("pic.png")));
        engine.load_application(app).unwrap();
        let pic = engine.lookup(&ExternalReference::new("~//a", 1)).unwrap();

        assert!(!events(&engine).contains(&(1, EventType::ContentAvailable)));
        assert_eq!(engine.missing_content().count(), 1);
        assert!(engine.object(pic).is_some_and(|o| o.root.needs_content && o.is_running()));

        assert!(engine.content_available(pic, "png".into()));
        assert_eq!(engine.missing_content().count(), 0);
        assert_eq!(events(&engine).last(), Some(&(1, EventType::ContentAvailable)));
        assert!(!engine.content_available(pic, "png".into()));
    }

    #[test]
    fn test_resident_content_is_announced_after_is_available() {
        let loader = MemoryContentLoader::new().with_content("pic.png", "png");
        let mut engine = Engine::new(EngineConfig::default()).with_content_loader(loader);
        let app = GroupDescriptor::application("~//a").with_item(ItemDescriptor::new(1, bitmap("pic.png")).inactive());
        engine.load_application(app).unwrap();
        let pic = engine.lookup(&ExternalReference::new("~//a", 1)).unwrap();
        engine.clear_history();

        engine.prepare(pic);
        assert_eq!(events(&engine), vec![(1, EventType::IsAvailable)]);
        engine.process_events();
        assert_eq!(events(&engine), vec![(1, EventType::IsAvailable), (1, EventType::ContentAvailable)]);
    }

    #[test]
    fn test_group_activation_order() {
        let mut engine = Engine::new(EngineConfig::default());
        let var = |n| ItemDescriptor::new(n, ObjectBody::Variable(VariableState::new(VariableValue::Boolean(false))));
        let app = GroupDescriptor::application("~//a").with_item(var(1)).with_item(var(2).inactive()).with_item(var(3));
        let id = engine.load_application(app).unwrap();
        let running: Vec<_> = (1..=3)
            .map(|n| engine.lookup(&ExternalReference::new("~//a", n)).and_then(|i| engine.object(i)).is_some_and(|o| o.is_running()))
            .collect();
        assert_eq!(running, vec![true, false, true]);

        engine.clear_history();
        engine.deactivate(id);
        assert_eq!(events(&engine), vec![(3, EventType::IsStopped), (1, EventType::IsStopped), (0, EventType::IsStopped)]);
    }
}

// MHEG - mheg-runtime
// Module: Engine
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The engine: registry, queues and collaborators in one place.
//!
//! The engine is single-threaded. Every entry point takes `&mut self` and
//! runs to completion; content and user input arrive through explicit
//! calls from the embedder, never from inside an action.
//!
//! # Event processing
//!
//! Synchronous events are matched against the active links the moment
//! they are raised and the effects of every matching link go to the *temp*
//! queue. [`Engine::process_events`] moves the temp queue in front of the
//! *main* queue after every action, so effects run before the actions that
//! were already waiting, and takes the next asynchronous event only once
//! both queues are empty.

use core::fmt;
use std::collections::VecDeque;

use mheg_error::{codes, Error, ErrorCategory, Result};
use mheg_foundation::{
    ContentReference, EventData, EventType, ExternalReference, GroupId, OctetString, Region,
};
use mheg_instructions::ElementaryAction;
use mheg_logging::Logger;

use crate::config::EngineConfig;
use crate::content::{ContentLoader, MemoryContentLoader};
use crate::descriptor::{GroupDescriptor, GroupKind};
use crate::display::{Display, NullDisplay};
use crate::events::{Event, EventQueue, EventRecord, QueuedAction};
use crate::object::{GroupState, MhegObject, ObjectBody};
use crate::persistent::PersistentStore;
use crate::registry::{ObjectId, Registry};

/// Why the active application has to go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuitRequest {
    /// Quit; the previously spawning application, if any, comes back
    Quit,
    /// Replace the application
    Launch(GroupId),
    /// Start another application and come back on its Quit
    Spawn(GroupId),
}

/// MHEG-5 runtime engine
pub struct Engine {
    pub(crate) config:             EngineConfig,
    pub(crate) logger:             Logger,
    pub(crate) registry:           Registry,
    pub(crate) loader:             Box<dyn ContentLoader + Send>,
    pub(crate) display:            Box<dyn Display + Send>,
    pub(crate) active_application: Option<ObjectId>,
    pub(crate) active_scene:       Option<ObjectId>,
    pub(crate) active_links:       Vec<ObjectId>,
    /// Bottom first
    pub(crate) display_stack:      Vec<ObjectId>,
    pub(crate) missing_content:    Vec<(ObjectId, ContentReference)>,
    pub(crate) events:             EventQueue,
    pub(crate) temp_actions:       VecDeque<QueuedAction>,
    pub(crate) main_actions:       VecDeque<QueuedAction>,
    pub(crate) clock_ms:           u64,
    pub(crate) persistent:         PersistentStore,
    pub(crate) app_stack:          Vec<GroupId>,
    pub(crate) quit_request:       Option<QuitRequest>,
    pub(crate) lock_count:         u32,
    pub(crate) rng_state:          u64,
    actions_this_cycle:            usize,
}

impl Engine {
    /// Engine with an empty in-memory loader and a display that discards
    /// everything
    pub fn new(config: EngineConfig) -> Self {
        let logger = Logger::new(config.log_level);
        let rng_state = config.random_seed | 1;
        Self {
            config,
            logger,
            registry: Registry::new(),
            loader: Box::new(MemoryContentLoader::new()),
            display: Box::new(NullDisplay),
            active_application: None,
            active_scene: None,
            active_links: Vec::new(),
            display_stack: Vec::new(),
            missing_content: Vec::new(),
            events: EventQueue::new(),
            temp_actions: VecDeque::new(),
            main_actions: VecDeque::new(),
            clock_ms: 0,
            persistent: PersistentStore::new(),
            app_stack: Vec::new(),
            quit_request: None,
            lock_count: 0,
            rng_state,
            actions_this_cycle: 0,
        }
    }

    /// Use `loader` for content and group descriptors
    pub fn with_content_loader(mut self, loader: impl ContentLoader + Send + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Send display side effects to `display`
    pub fn with_display(mut self, display: impl Display + Send + 'static) -> Self {
        self.display = Box::new(display);
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Logger, e.g. to register handlers
    pub fn logger_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }

    /// Object registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Live object behind `id`
    pub fn object(&self, id: ObjectId) -> Option<&MhegObject> {
        self.registry.get(id)
    }

    /// Handle of the object at `address`
    pub fn lookup(&self, address: &ExternalReference) -> Option<ObjectId> {
        self.registry.lookup(address)
    }

    /// Active application
    pub fn active_application(&self) -> Option<ObjectId> {
        self.active_application
    }

    /// Active scene
    pub fn active_scene(&self) -> Option<ObjectId> {
        self.active_scene
    }

    /// Running visibles, bottom first
    pub fn display_stack(&self) -> &[ObjectId] {
        &self.display_stack
    }

    /// Links currently matched against events, in activation order
    pub fn active_links(&self) -> &[ObjectId] {
        &self.active_links
    }

    /// Objects waiting for content
    pub fn missing_content(&self) -> impl Iterator<Item = &(ObjectId, ContentReference)> {
        self.missing_content.iter()
    }

    /// Events that reached the links so far
    pub fn history(&self) -> &[EventRecord] {
        self.events.history()
    }

    /// Forget the event history
    pub fn clear_history(&mut self) {
        self.events.clear_history();
    }

    /// Asynchronous events not yet processed
    pub fn pending_events(&self) -> impl Iterator<Item = &Event> {
        self.events.pending()
    }

    /// Engine clock in milliseconds
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Screen lock depth
    pub fn lock_count(&self) -> u32 {
        self.lock_count
    }

    /// Log a recoverable error about `source`
    pub fn report(&self, source: impl fmt::Display, error: Error) {
        self.logger.report(source, error, "");
    }

    pub(crate) fn report_detail(&self, source: impl fmt::Display, error: Error, detail: impl fmt::Display) {
        self.logger.report(source, error, detail);
    }

    pub(crate) fn address_of(&self, id: ObjectId) -> Option<ExternalReference> {
        self.registry.get(id).map(|object| object.root.address.clone())
    }

    // ---------------------------------------------------------------------
    // Events

    /// Raise a synchronous event: match it against the active links now
    pub fn emit_sync(&mut self, source: ExternalReference, event_type: EventType, data: Option<EventData>) {
        self.dispatch_event(Event { source, event_type, data }, true);
    }

    /// Raise an asynchronous event: queue it for [`Engine::process_events`]
    pub fn emit_async(&mut self, source: ExternalReference, event_type: EventType, data: Option<EventData>) {
        self.logger.trace(&source, format!("{event_type} queued"));
        self.events.push_async(Event { source, event_type, data });
    }

    pub(crate) fn raise_sync(&mut self, id: ObjectId, event_type: EventType, data: Option<EventData>) {
        if let Some(source) = self.address_of(id) {
            self.emit_sync(source, event_type, data);
        }
    }

    pub(crate) fn raise_async(&mut self, id: ObjectId, event_type: EventType, data: Option<EventData>) {
        if let Some(source) = self.address_of(id) {
            self.emit_async(source, event_type, data);
        }
    }

    fn dispatch_event(&mut self, event: Event, synchronous: bool) {
        self.logger.debug(&event.source, format!("{} event", event.event_type));
        let mut fired = Vec::new();
        for &link_id in &self.active_links {
            let Some(object) = self.registry.get(link_id) else { continue };
            let ObjectBody::Link(link) = &object.body else { continue };
            let group = &object.root.address.group_identifier;
            if link.condition_met(&event, |source| self.absolute_address(source, group)) {
                fired.extend(link.effect.iter().map(|action| QueuedAction::new(action.clone(), group.clone())));
            }
        }
        self.temp_actions.extend(fired);
        self.events.record(event, synchronous);
    }

    // ---------------------------------------------------------------------
    // Action queues

    /// Run `actions` in order for `caller_group`, link effects first, then
    /// process every asynchronous event
    pub fn run_actions(&mut self, actions: &[ElementaryAction], caller_group: &GroupId) {
        for action in actions.iter().rev() {
            self.main_actions.push_front(QueuedAction::new(action.clone(), caller_group.clone()));
        }
        self.run_queued_actions();
        self.process_events();
    }

    /// Process queued actions and asynchronous events until both queues
    /// are empty or a quit is requested
    pub fn process_events(&mut self) {
        loop {
            self.run_queued_actions();
            if self.quit_request.is_some() {
                break;
            }
            let Some(event) = self.events.pop_async() else { break };
            self.dispatch_event(event, false);
        }
        self.actions_this_cycle = 0;
    }

    fn run_queued_actions(&mut self) {
        self.prepend_temp_actions();
        while let Some(queued) = self.main_actions.pop_front() {
            if self.quit_request.is_some() {
                self.main_actions.clear();
                self.temp_actions.clear();
                return;
            }
            if self.actions_this_cycle >= self.config.max_actions_per_cycle {
                let dropped = self.main_actions.len() + self.temp_actions.len() + 1;
                self.report_detail(&queued.caller_group, Error::ACTION_LIMIT_EXCEEDED, format!("{dropped} actions dropped"));
                self.main_actions.clear();
                self.temp_actions.clear();
                return;
            }
            self.actions_this_cycle += 1;
            self.execute_action(&queued.action, &queued.caller_group);
            self.prepend_temp_actions();
        }
    }

    fn prepend_temp_actions(&mut self) {
        while let Some(action) = self.temp_actions.pop_back() {
            self.main_actions.push_front(action);
        }
    }

    pub(crate) fn queue_actions(&mut self, actions: &[ElementaryAction], caller_group: &GroupId) {
        self.temp_actions.extend(actions.iter().map(|action| QueuedAction::new(action.clone(), caller_group.clone())));
    }

    /// Keep only queued events and actions of `group`
    pub(crate) fn retain_queues_for(&mut self, group: &GroupId) {
        self.events.retain_group(group);
        self.main_actions.retain(|queued| &queued.caller_group == group);
        self.temp_actions.retain(|queued| &queued.caller_group == group);
    }

    fn clear_queues(&mut self) {
        self.events.clear_pending();
        self.main_actions.clear();
        self.temp_actions.clear();
    }

    // ---------------------------------------------------------------------
    // Groups

    /// Register the objects of `descriptor`, all unavailable, under the
    /// absolute form of its group identifier.
    ///
    /// Stream components are registered next to their stream. Nothing is
    /// registered if the descriptor is rejected.
    pub(crate) fn load_group(&mut self, mut descriptor: GroupDescriptor) -> Result<ObjectId> {
        descriptor.validate()?;
        descriptor.group_identifier = self.absolute_group_id(&descriptor.group_identifier);
        let group_id = descriptor.group_identifier.clone();
        let mut registered = Vec::new();
        match self.register_group(descriptor, &mut registered) {
            Ok(id) => {
                self.logger.debug(&group_id, format!("Loaded {} objects", registered.len()));
                Ok(id)
            }
            Err(error) => {
                for id in registered {
                    self.registry.remove_object(id);
                }
                Err(error)
            }
        }
    }

    fn register_group(&mut self, descriptor: GroupDescriptor, registered: &mut Vec<ObjectId>) -> Result<ObjectId> {
        let gid = descriptor.group_identifier;
        let state = GroupState::new(descriptor.on_start_up, descriptor.on_close_down);
        let body = match descriptor.kind {
            GroupKind::Application => ObjectBody::Application(state),
            GroupKind::Scene => ObjectBody::Scene(state),
        };
        let group = self.registry.add_object(MhegObject::new(ExternalReference::group(gid.clone()), body))?;
        registered.push(group);

        let mut items = Vec::with_capacity(descriptor.items.len());
        for mut item in descriptor.items {
            if let ObjectBody::Stream(stream) = &mut item.body {
                for component in core::mem::take(&mut stream.multiplex) {
                    let id = self.register_item(&gid, component.number, component.initially_active, component.shared, component.body)?;
                    registered.push(id);
                    stream.components.push(id);
                }
            }
            let id = self.register_item(&gid, item.number, item.initially_active, item.shared, item.body)?;
            registered.push(id);
            items.push(id);
        }
        if let Some(state) = self.registry.get_mut(group).and_then(|object| object.body.group_mut()) {
            state.items = items;
        }
        Ok(group)
    }

    fn register_item(&mut self, gid: &GroupId, number: i32, initially_active: bool, shared: bool, body: ObjectBody) -> Result<ObjectId> {
        let mut object = MhegObject::new(ExternalReference::new(gid.clone(), number), body);
        object.initially_active = initially_active;
        object.shared = shared;
        self.registry.add_object(object)
    }

    /// Tear a group down and drop every object it owns
    pub(crate) fn unload_group(&mut self, group: ObjectId) {
        let Some(gid) = self.address_of(group).map(|address| address.group_identifier) else {
            return;
        };
        self.deactivate(group);
        self.destroy(group);
        for id in self.registry.ids_in_group(&gid) {
            self.active_links.retain(|link| *link != id);
            self.display_stack.retain(|visible| *visible != id);
            self.missing_content.retain(|(waiting, _)| *waiting != id);
            self.registry.remove_object(id);
        }
        self.logger.debug(&gid, "Unloaded");
    }

    /// Load and start an application, replacing the active one.
    ///
    /// # Errors
    ///
    /// `INVALID_GROUP_DESCRIPTOR` if `descriptor` is a scene; any error of
    /// [`GroupDescriptor::validate`].
    pub fn load_application(&mut self, descriptor: GroupDescriptor) -> Result<ObjectId> {
        if descriptor.kind != GroupKind::Application {
            return Err(Error::validation_error(codes::INVALID_GROUP_DESCRIPTOR, "Descriptor is not an application"));
        }
        self.shutdown_application();
        let id = self.load_group(descriptor)?;
        self.active_application = Some(id);
        if let Some(address) = self.address_of(id) {
            self.logger.info(&address.group_identifier, "Application started");
        }
        self.activate(id);
        self.process_events();
        Ok(id)
    }

    fn shutdown_application(&mut self) {
        if let Some(scene) = self.active_scene.take() {
            self.unload_group(scene);
        }
        if let Some(app) = self.active_application {
            self.unload_group(app);
            self.active_application = None;
        }
        self.clear_queues();
        self.active_links.clear();
        self.display_stack.clear();
        self.missing_content.clear();
        self.lock_count = 0;
    }

    /// Queue a key press as a `UserInput` event from the active scene and
    /// process it
    pub fn user_input(&mut self, key: i32) {
        let Some(scene) = self.active_scene else {
            self.report("engine", Error::new(ErrorCategory::Resolution, codes::NO_ACTIVE_SCENE, "No active scene for user input"));
            return;
        };
        self.raise_async(scene, EventType::UserInput, Some(key.into()));
        self.process_events();
    }

    /// Deliver content the loader answered `Pending` for.
    ///
    /// Installs `bytes` into the waiting object, raises its deferred
    /// `ContentAvailable` event and processes events. Returns false if the
    /// object was not waiting for content.
    pub fn content_available(&mut self, id: ObjectId, bytes: OctetString) -> bool {
        let Some(position) = self.missing_content.iter().position(|(waiting, _)| *waiting == id) else {
            self.report(id, Error::new(ErrorCategory::Content, codes::CONTENT_NOT_REQUESTED, "Object is not waiting for content"));
            return false;
        };
        let (_, reference) = self.missing_content.remove(position);
        let Some(object) = self.registry.get_mut(id) else { return false };
        object.body.install_content(bytes);
        object.root.needs_content = false;
        let address = object.root.address.clone();
        let redraw = object.is_running().then(|| object.visible().map(|v| v.common.region())).flatten();
        self.logger.debug(&address, format!("Content {reference} arrived"));
        if let Some(region) = redraw {
            self.redraw(region);
        }
        self.emit_async(address, EventType::ContentAvailable, None);
        self.process_events();
        true
    }

    pub(crate) fn redraw(&mut self, region: Region) {
        if self.lock_count == 0 {
            self.display.redraw(region);
        }
    }

    // ---------------------------------------------------------------------
    // Application stacking

    pub(crate) fn request_quit(&mut self, request: QuitRequest) {
        self.logger.info("engine", format!("{request:?} requested"));
        self.quit_request = Some(request);
        self.clear_queues();
    }

    /// Pending quit request, leaving the application running
    pub fn take_quit_request(&mut self) -> Option<QuitRequest> {
        self.quit_request.take()
    }

    /// Act on a pending quit request.
    ///
    /// Tears the active application down, then starts the launched or
    /// spawned application, or returns to the one that spawned it. Returns
    /// false if no quit was requested.
    pub fn handle_quit(&mut self) -> bool {
        let Some(request) = self.quit_request.take() else { return false };
        let current = self.active_application.and_then(|id| self.address_of(id)).map(|a| a.group_identifier);
        self.shutdown_application();
        let next = match request {
            QuitRequest::Launch(gid) => Some(gid),
            QuitRequest::Spawn(gid) => {
                self.app_stack.extend(current);
                Some(gid)
            }
            QuitRequest::Quit => self.app_stack.pop(),
        };
        let Some(next) = next else {
            self.logger.info("engine", "No application left to run");
            return true;
        };
        match self.loader.fetch_group(&next) {
            Some(descriptor) => {
                if let Err(error) = self.load_application(descriptor) {
                    self.report(&next, error);
                }
            }
            None => self.report(&next, Error::new(ErrorCategory::Resolution, codes::GROUP_NOT_FOUND, "Application not found")),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use mheg_foundation::{ObjectReference, VariableValue};
    use mheg_instructions::ActionKind;

    use super::*;
    use crate::descriptor::ItemDescriptor;
    use crate::object::{LinkCondition, LinkState, VariableState};

    fn counter_app() -> GroupDescriptor {
        let add = ElementaryAction::new(ObjectReference::Internal(1), ActionKind::Add { value: 1.into() });
        let link = LinkState::new(LinkCondition::new(ObjectReference::Internal(1), EventType::TestEvent), vec![add]);
        GroupDescriptor::application("~//app")
            .with_item(ItemDescriptor::new(1, ObjectBody::Variable(VariableState::new(VariableValue::Integer(0)))))
            .with_item(ItemDescriptor::new(2, ObjectBody::Link(link)))
    }

    #[test]
    fn test_scene_descriptor_is_not_an_application() {
        let mut engine = Engine::new(EngineConfig::default());
        let error = engine.load_application(GroupDescriptor::scene("~//scene")).unwrap_err();
        assert_eq!(error.code, codes::INVALID_GROUP_DESCRIPTOR);
        assert!(engine.registry().is_empty());
    }

    #[test]
    fn test_load_registers_and_runs() {
        let mut engine = Engine::new(EngineConfig::default());
        let app = engine.load_application(counter_app()).unwrap();
        assert_eq!(engine.active_application(), Some(app));
        assert_eq!(engine.registry().len(), 3);
        assert_eq!(engine.active_links().len(), 1);
        assert!(engine.object(app).is_some_and(MhegObject::is_running));
    }

    #[test]
    fn test_action_limit_stops_feedback_loops() {
        let mut engine = Engine::new(EngineConfig::default().with_max_actions_per_cycle(50));
        let gid = GroupId::from("~//app");
        engine.load_application(counter_app()).unwrap();
        // every TestEvent queues an Add, and the link below turns each Add
        // back into a TestEvent through TestVariable
        let test = ElementaryAction::new(
            ObjectReference::Internal(1),
            ActionKind::TestVariable { operator: 2.into(), comparison: mheg_foundation::GenericValue::Integer((-1).into()) },
        );
        let var = engine.lookup(&ExternalReference::new("~//app", 1)).unwrap();
        if let Some(ObjectBody::Link(link)) = engine.lookup(&ExternalReference::new("~//app", 2)).and_then(|id| engine.registry.get_mut(id)).map(|o| &mut o.body) {
            link.effect.push(test.clone());
        }
        engine.run_actions(&[test], &gid);
        let value = engine.object(var).and_then(MhegObject::variable).map(|v| v.value.clone());
        assert!(matches!(value, Some(VariableValue::Integer(n)) if n > 0 && n <= 50));
        assert!(engine.main_actions.is_empty());
    }
}

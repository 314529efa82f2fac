// MHEG - mheg-runtime
// Module: Application and scene actions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Actions on applications and scenes, including the context changes
//! (TransitionTo, Launch, Spawn, Quit).

use mheg_error::{codes, Error, ErrorCategory, Result};
use mheg_foundation::{EventData, EventType, GroupId, ObjectReference, Region, VariableValue};
use mheg_instructions::ActionKind;

use crate::descriptor::GroupKind;
use crate::engine::{Engine, QuitRequest};
use crate::object::MhegObject;
use crate::registry::ObjectId;

/// EngineEvent data for a group that could not be loaded
const ENGINE_EVENT_GROUP_ID_REF_ERROR: i32 = 2;

const INTERNAL_REFERENCE_NOT_ALLOWED: Error = Error::new(
    ErrorCategory::Type,
    codes::INTERNAL_REFERENCE_NOT_ALLOWED,
    "Group must be named by an external reference",
);

impl Engine {
    pub(super) fn execute_group_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        match kind {
            ActionKind::Quit => self.request_quit(QuitRequest::Quit),
            ActionKind::LockScreen => self.lock_count = self.lock_count.saturating_add(1),
            ActionKind::UnlockScreen => {
                if self.lock_count > 0 {
                    self.lock_count -= 1;
                    if self.lock_count == 0 {
                        self.redraw(Region::full(self.config.screen_size));
                    }
                }
            }
            ActionKind::GetEngineSupport { feature, answer } => {
                let feature = self.get(feature, gid).to_string_lossy();
                let supported = self.config.engine_support(&feature).unwrap_or_else(|| {
                    self.logger.debug(gid, format!("Unknown engine feature {feature}"));
                    false
                });
                self.set_output(answer, gid, supported);
            }
            ActionKind::StorePersistent { store_succeeded, in_variables, out_file_name } => {
                let file = self.get(out_file_name, gid);
                let stored = self.store_persistent(file, in_variables, gid);
                self.set_output(store_succeeded, gid, stored.is_ok());
                stored?;
            }
            ActionKind::ReadPersistent { read_succeeded, out_variables, in_file_name } => {
                let file = self.get(in_file_name, gid);
                let read = self.read_persistent(&file, out_variables, gid);
                self.set_output(read_succeeded, gid, read.is_ok());
                read?;
            }
            ActionKind::SendEvent { emulated_event_source, emulated_event_type, emulated_event_data } => {
                let source = self.get(emulated_event_source, gid);
                let Some(source_id) = self.find_object(&source, gid) else { return Ok(()) };
                let data = match emulated_event_data {
                    Some(value) => match self.resolve_value(value, gid) {
                        Some(VariableValue::Boolean(b)) => Some(EventData::Boolean(b)),
                        Some(VariableValue::Integer(i)) => Some(EventData::Integer(i)),
                        Some(VariableValue::OctetString(s)) => Some(EventData::OctetString(s)),
                        Some(_) => {
                            return Err(Error::type_error("Event data must be boolean, integer or octet string"));
                        }
                        None => return Ok(()),
                    },
                    None => None,
                };
                if emulated_event_type.is_async() {
                    self.raise_async(source_id, *emulated_event_type, data);
                } else {
                    self.raise_sync(source_id, *emulated_event_type, data);
                }
            }
            ActionKind::SetTimer { timer_id, new_timer } => {
                let timer_id = self.get(timer_id, gid);
                self.set_timer(id, gid, timer_id, new_timer.as_ref());
            }
            ActionKind::SetCachePriority { priority } => {
                let priority = self.get(priority, gid);
                if let Some(group) = self.body_mut(id)?.group_mut() {
                    group.cache_priority = priority;
                }
            }

            _ => return Err(Error::UNEXPECTED_TARGET),
        }
        Ok(())
    }

    /// Launch or Spawn: ask for the active application to be replaced by
    /// the application `target` names
    pub(super) fn start_application(&mut self, target: &ObjectReference, _gid: &GroupId, spawn: bool) -> Result<()> {
        if self.active_application.is_none() {
            return Err(Error::NO_ACTIVE_APPLICATION);
        }
        let ObjectReference::External(address) = target else {
            return Err(INTERNAL_REFERENCE_NOT_ALLOWED);
        };
        let next = self.absolute_group_id(&address.group_identifier);
        self.request_quit(if spawn { QuitRequest::Spawn(next) } else { QuitRequest::Launch(next) });
        Ok(())
    }

    /// TransitionTo: replace the active scene.
    ///
    /// The application's unshared items stop, the old scene is torn down,
    /// events and actions of anything but the application are dropped, and
    /// the new scene is loaded and activated.
    pub(super) fn transition_to(&mut self, target: &ObjectReference, _gid: &GroupId) -> Result<()> {
        let ObjectReference::External(address) = target else {
            return Err(INTERNAL_REFERENCE_NOT_ALLOWED);
        };
        let scene_gid = self.absolute_group_id(&address.group_identifier);
        let app = self.active_application.ok_or(Error::NO_ACTIVE_APPLICATION)?;
        let app_gid = self.group_of(app)?;
        if let Some(scene) = self.active_scene {
            if self.group_of(scene)? == scene_gid {
                self.logger.debug(&scene_gid, "Scene already active");
                return Ok(());
            }
        }

        let Some(descriptor) = self.loader.fetch_group(&scene_gid) else {
            self.raise_async(app, EventType::EngineEvent, Some(ENGINE_EVENT_GROUP_ID_REF_ERROR.into()));
            return Err(Error::new(ErrorCategory::Resolution, codes::GROUP_NOT_FOUND, "Scene not found"));
        };
        if descriptor.kind != GroupKind::Scene {
            return Err(Error::validation_error(codes::INVALID_GROUP_DESCRIPTOR, "Descriptor is not a scene"));
        }
        self.logger.info(&scene_gid, "Transition");

        let items = self.registry.get(app).and_then(|o| o.body.group()).map(|g| g.items.clone()).unwrap_or_default();
        for item in items.into_iter().rev() {
            if self.registry.get(item).is_some_and(|object| !object.shared && object.is_running()) {
                self.deactivate(item);
            }
        }
        if let Some(scene) = self.active_scene.take() {
            self.unload_group(scene);
        }
        self.retain_queues_for(&app_gid);
        let registry = &self.registry;
        self.display_stack.retain(|&visible| registry.get(visible).is_some_and(MhegObject::is_running));

        let scene = self.load_group(descriptor)?;
        self.active_scene = Some(scene);
        self.activate(scene);
        Ok(())
    }
}

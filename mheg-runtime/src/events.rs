// MHEG - mheg-runtime
// Module: Events and action queues
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Events and the queues the engine keeps for them.
//!
//! Synchronous events are matched against the active links as soon as
//! they are raised; asynchronous events wait in [`EventQueue`] until the
//! engine processes them. Every event that reaches the links is recorded
//! in the history, in the order the links saw it.

use std::collections::VecDeque;

use mheg_foundation::{EventData, EventType, ExternalReference, GroupId};
use mheg_instructions::ElementaryAction;

/// An event raised by a runtime object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Absolute address of the source object
    pub source:     ExternalReference,
    /// Event type
    pub event_type: EventType,
    /// Event data, if the type carries any
    pub data:       Option<EventData>,
}

impl Event {
    /// Event without data
    pub fn new(source: ExternalReference, event_type: EventType) -> Self {
        Self { source, event_type, data: None }
    }

    /// Attach data
    pub fn with_data(mut self, data: impl Into<EventData>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// An event as seen by the active links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// The event
    pub event:       Event,
    /// True if matched when raised, false if it went through the queue
    pub synchronous: bool,
}

/// An action waiting in the temp or main queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedAction {
    /// The action
    pub action:       ElementaryAction,
    /// Group its internal references resolve in
    pub caller_group: GroupId,
}

impl QueuedAction {
    /// Queue `action` for `caller_group`
    pub fn new(action: ElementaryAction, caller_group: GroupId) -> Self {
        Self { action, caller_group }
    }
}

/// Asynchronous event queue plus the history of dispatched events
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<Event>,
    history: Vec<EventRecord>,
}

impl EventQueue {
    /// Empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an asynchronous event
    pub fn push_async(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    /// Next asynchronous event, if any
    pub fn pop_async(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    /// Events still waiting
    pub fn pending(&self) -> impl Iterator<Item = &Event> {
        self.pending.iter()
    }

    /// True if no asynchronous event is waiting
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every waiting event
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Keep only waiting events raised by objects of `group`
    pub fn retain_group(&mut self, group: &GroupId) {
        self.pending.retain(|event| &event.source.group_identifier == group);
    }

    /// Record an event reaching the links
    pub fn record(&mut self, event: Event, synchronous: bool) {
        self.history.push(EventRecord { event, synchronous });
    }

    /// Every event that reached the links, oldest first
    pub fn history(&self) -> &[EventRecord] {
        &self.history
    }

    /// Forget the history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retain_group_filters_by_source() {
        let mut queue = EventQueue::new();
        queue.push_async(Event::new(ExternalReference::new("~//app", 0), EventType::TimerFired));
        queue.push_async(Event::new(ExternalReference::new("~//scene", 3), EventType::StreamPlaying));
        queue.push_async(Event::new(ExternalReference::new("~//app", 2), EventType::UserInput).with_data(4));
        queue.retain_group(&GroupId::from("~//app"));

        let kinds: Vec<_> = queue.pending().map(|event| event.event_type).collect();
        assert_eq!(kinds, vec![EventType::TimerFired, EventType::UserInput]);
        assert_eq!(queue.pop_async().map(|event| event.source.object_number), Some(0));
    }
}

// MHEG - mheg-runtime
// Module: Links
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use mheg_foundation::{EventData, EventType, ExternalReference, ObjectReference};
use mheg_instructions::ActionList;

use crate::events::Event;

/// Event a link waits for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCondition {
    /// Source object, scoped to the link's group
    pub source:     ObjectReference,
    /// Event type
    pub event_type: EventType,
    /// Required data; `None` matches any data
    pub event_data: Option<EventData>,
}

impl LinkCondition {
    /// Condition on `event_type` from `source` with any data
    pub fn new(source: impl Into<ObjectReference>, event_type: EventType) -> Self {
        Self { source: source.into(), event_type, event_data: None }
    }

    /// Require the event to carry `data`
    pub fn with_data(mut self, data: impl Into<EventData>) -> Self {
        self.event_data = Some(data.into());
        self
    }
}

/// Link: condition plus effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
    /// Condition
    pub condition: LinkCondition,
    /// Actions queued when the condition matches
    pub effect:    ActionList,
}

impl LinkState {
    /// Link with the given condition and effect
    pub fn new(condition: LinkCondition, effect: ActionList) -> Self {
        Self { condition, effect }
    }

    /// True if `event` satisfies the condition.
    ///
    /// Type first, then data when the condition has any, then the source,
    /// whose absolute address `source_address` works out from the link's
    /// group.
    pub fn condition_met(
        &self,
        event: &Event,
        source_address: impl FnOnce(&ObjectReference) -> ExternalReference,
    ) -> bool {
        let condition = &self.condition;
        if condition.event_type != event.event_type {
            return false;
        }
        if let Some(expected) = &condition.event_data {
            if event.data.as_ref() != Some(expected) {
                return false;
            }
        }
        source_address(&condition.source) == event.source
    }
}

#[cfg(test)]
mod tests {
    use mheg_foundation::GroupId;

    use super::*;

    fn event(number: i32, event_type: EventType, data: Option<EventData>) -> Event {
        Event { source: ExternalReference::new("~//scene", number), event_type, data }
    }

    #[test]
    fn test_internal_source_uses_link_group() {
        let link = LinkState::new(LinkCondition::new(ObjectReference::Internal(4), EventType::IsRunning), vec![]);
        let group = GroupId::from("~//scene");
        assert!(link.condition_met(&event(4, EventType::IsRunning, None), |source| source.resolve(&group)));
        assert!(!link.condition_met(&event(4, EventType::IsRunning, None), |source| source.resolve(&GroupId::from("~//other"))));
        assert!(!link.condition_met(&event(5, EventType::IsRunning, None), |source| source.resolve(&group)));
        assert!(!link.condition_met(&event(4, EventType::IsStopped, None), |source| source.resolve(&group)));
    }

    #[test]
    fn test_data_must_match_when_given() {
        let condition = LinkCondition::new(ObjectReference::Internal(0), EventType::UserInput).with_data(15);
        let link = LinkState::new(condition, vec![]);
        let group = GroupId::from("~//scene");
        assert!(link.condition_met(&event(0, EventType::UserInput, Some(EventData::Integer(15))), |source| source.resolve(&group)));
        assert!(!link.condition_met(&event(0, EventType::UserInput, Some(EventData::Integer(16))), |source| source.resolve(&group)));
        assert!(!link.condition_met(&event(0, EventType::UserInput, None), |source| source.resolve(&group)));
    }
}

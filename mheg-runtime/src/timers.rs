// MHEG - mheg-runtime
// Module: Group timers
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Group timers.
//!
//! Timers run on the engine clock, which only moves when the embedder calls
//! [`Engine::advance_clock`]. A due timer raises an asynchronous
//! `TimerFired` event carrying its identifier.

use mheg_foundation::{EventType, GroupId};
use mheg_instructions::NewTimer;

use crate::engine::Engine;
use crate::registry::ObjectId;

/// A pending timer of an application or scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTimer {
    /// Timer identifier
    pub id:     i32,
    /// Engine clock value at which the timer fires
    pub due_ms: u64,
}

/// Due time of a timer set at `now` on a group activated at
/// `activated_at`.
///
/// Intervals below zero count as zero. Absolute times already in the past
/// are due at once.
pub(crate) fn due_time(now: u64, activated_at: u64, value: i32, absolute: bool) -> u64 {
    let value = u64::try_from(value).unwrap_or(0);
    if absolute { activated_at.saturating_add(value).max(now) } else { now.saturating_add(value) }
}

impl Engine {
    /// SetTimer on `group`: create or replace timer `timer_id`, or remove it
    /// when no new value is given
    pub(crate) fn set_timer(&mut self, group: ObjectId, caller_group: &GroupId, timer_id: i32, new_timer: Option<&NewTimer>) {
        let value = new_timer.map(|timer| {
            let absolute = timer.absolute_time.as_ref().is_some_and(|flag| self.get(flag, caller_group));
            (self.get(&timer.timer_value, caller_group), absolute)
        });
        let now = self.clock_ms;
        let Some(state) = self.registry.get_mut(group).and_then(|object| object.body.group_mut()) else {
            return;
        };
        state.timers.retain(|timer| timer.id != timer_id);
        if let Some((value, absolute)) = value {
            let due_ms = due_time(now, state.activated_at, value, absolute);
            state.timers.push(GroupTimer { id: timer_id, due_ms });
        }
    }

    /// Move the engine clock forward by `ms` and fire every timer that came
    /// due, earliest first, then process the resulting events
    pub fn advance_clock(&mut self, ms: u64) {
        self.clock_ms = self.clock_ms.saturating_add(ms);
        let now = self.clock_ms;

        let mut due = Vec::new();
        for id in [self.active_application, self.active_scene].into_iter().flatten() {
            let Some(object) = self.registry.get_mut(id) else { continue };
            let address = object.root.address.clone();
            let Some(state) = object.body.group_mut() else { continue };
            state.timers.retain(|timer| {
                if timer.due_ms <= now {
                    due.push((timer.due_ms, timer.id, address.clone()));
                    false
                } else {
                    true
                }
            });
        }
        due.sort_by_key(|(due_ms, id, _)| (*due_ms, *id));

        for (_, timer_id, address) in due {
            self.logger.debug(&address, format!("Timer {timer_id} fired"));
            self.emit_async(address, EventType::TimerFired, Some(timer_id.into()));
        }
        self.process_events();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_and_absolute_due_times() {
        assert_eq!(due_time(1_000, 0, 250, false), 1_250);
        assert_eq!(due_time(1_000, 200, 5_000, true), 5_200);
        assert_eq!(due_time(1_000, 200, 500, true), 1_000);
        assert_eq!(due_time(1_000, 0, -30, false), 1_000);
    }
}

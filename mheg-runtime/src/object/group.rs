// MHEG - mheg-runtime
// Module: Application and scene state
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use mheg_instructions::ActionList;

use crate::registry::ObjectId;
use crate::timers::GroupTimer;

/// State shared by applications and scenes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupState {
    /// Items in authored order
    pub items:          Vec<ObjectId>,
    /// Run when the group is activated, before its items
    pub on_start_up:    ActionList,
    /// Run when the group is deactivated, before its items
    pub on_close_down:  ActionList,
    /// Pending timers
    pub timers:         Vec<GroupTimer>,
    /// Engine clock at activation; absolute timers count from here
    pub activated_at:   u64,
    /// Cache priority hint
    pub cache_priority: i32,
}

impl GroupState {
    /// Group with the given start-up and close-down actions
    pub fn new(on_start_up: ActionList, on_close_down: ActionList) -> Self {
        Self { on_start_up, on_close_down, cache_priority: 127, ..Self::default() }
    }
}

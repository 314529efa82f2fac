// MHEG - mheg-runtime
// Module: Streams and stream components
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use super::ContentBody;
use crate::descriptor::ItemDescriptor;
use crate::registry::ObjectId;

/// Stream component router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamComponentKind {
    /// Audio
    Audio,
    /// Video
    Video,
    /// Real-time graphics
    RtGraphics,
}

/// Stream state.
///
/// Only the logical state lives here; decoding belongs to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamState {
    /// Stream content reference
    pub content:               Option<ContentBody>,
    /// Authored multiplex; each entry must be a stream component
    pub multiplex:             Vec<ItemDescriptor>,
    /// Registered components, filled when the owning group is loaded
    pub components:            Vec<ObjectId>,
    /// Counter position
    pub counter_position:      i32,
    /// Counter end position; -1 plays to the end
    pub counter_end_position:  i32,
    /// Trigger identifier to counter position
    pub counter_triggers:      BTreeMap<i32, i32>,
    /// Playback speed as numerator and denominator
    pub speed:                 (i32, i32),
    /// Play the stream in a loop
    pub looping:               bool,
}

impl Default for StreamState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl StreamState {
    /// Stream with the given content and no components
    pub fn new(content: Option<ContentBody>) -> Self {
        Self {
            content,
            multiplex: Vec::new(),
            components: Vec::new(),
            counter_position: 0,
            counter_end_position: -1,
            counter_triggers: BTreeMap::new(),
            speed: (1, 1),
            looping: false,
        }
    }

    /// Add a component to the authored multiplex
    pub fn with_component(mut self, item: ItemDescriptor) -> Self {
        self.multiplex.push(item);
        self
    }

    pub(crate) fn reset(&mut self) {
        self.counter_position = 0;
        self.counter_end_position = -1;
        self.counter_triggers.clear();
        self.speed = (1, 1);
    }
}

/// Audio stream component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioState {
    /// Elementary stream tag
    pub component_tag:   i32,
    /// Volume adjustment
    pub volume:          i32,
    /// Authored volume
    pub original_volume: i32,
}

impl AudioState {
    /// Audio component `component_tag` at `volume`
    pub const fn new(component_tag: i32, volume: i32) -> Self {
        Self { component_tag, volume, original_volume: volume }
    }

    pub(crate) fn reset(&mut self) {
        self.volume = self.original_volume;
    }
}

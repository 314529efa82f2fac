// MHEG - mheg-runtime
// Module: Token and list groups
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Token groups and list groups.
//!
//! A token group moves a token between its items along an authored
//! movement table. A list group adds an ordered, editable item list with
//! per-item selection on top of the same token.

use mheg_error::{codes, Error, Result};
use mheg_foundation::{ObjectReference, XYPosition};
use mheg_instructions::ActionList;

/// Token group item: a visible plus its action slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGroupItem {
    /// Visible the item stands for
    pub reference:    ObjectReference,
    /// Action slots; `None` is an empty slot
    pub action_slots: Vec<Option<ActionList>>,
}

impl TokenGroupItem {
    /// Item without action slots
    pub fn new(reference: impl Into<ObjectReference>) -> Self {
        Self { reference: reference.into(), action_slots: Vec::new() }
    }

    /// Append an action slot
    pub fn with_slot(mut self, slot: Option<ActionList>) -> Self {
        self.action_slots.push(slot);
        self
    }
}

/// Token group state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGroupState {
    /// Items, 1-based by token position
    pub items:                 Vec<TokenGroupItem>,
    /// Row per movement identifier, column per current position
    pub movement_table:        Vec<Vec<i32>>,
    /// Slots used while no item holds the token
    pub no_token_action_slots: Vec<Option<ActionList>>,
    /// Current position; 0 means no item holds the token
    pub token_position:        i32,
}

impl Default for TokenGroupState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TokenGroupState {
    /// Token group over `items` with the token on the first
    pub fn new(items: Vec<TokenGroupItem>) -> Self {
        Self { items, movement_table: Vec::new(), no_token_action_slots: Vec::new(), token_position: 1 }
    }

    /// Set the movement table
    pub fn with_movement_table(mut self, table: Vec<Vec<i32>>) -> Self {
        self.movement_table = table;
        self
    }

    /// Target of movement `movement_id` from the current position
    ///
    /// # Errors
    ///
    /// `INVALID_MOVEMENT` if the row or column does not exist.
    pub fn movement_target(&self, movement_id: i32) -> Result<i32> {
        let row = one_based(movement_id)
            .and_then(|row| self.movement_table.get(row))
            .ok_or(Error::parameter_error(codes::INVALID_MOVEMENT, "No such movement"))?;
        one_based(self.token_position)
            .and_then(|column| row.get(column))
            .copied()
            .ok_or(Error::parameter_error(codes::INVALID_MOVEMENT, "Movement has no entry for this position"))
    }

    /// Action slot `index` (1-based) of the item holding the token, or of
    /// the no-token slots
    pub fn action_slot(&self, index: i32) -> Option<&ActionList> {
        let slots = match one_based(self.token_position) {
            Some(item) => &self.items.get(item)?.action_slots,
            None => &self.no_token_action_slots,
        };
        slots.get(one_based(index)?)?.as_ref()
    }

    /// Item references in token order
    pub fn item_references(&self) -> impl Iterator<Item = &ObjectReference> {
        self.items.iter().map(|item| &item.reference)
    }

    pub(crate) fn reset(&mut self) {
        self.token_position = 1;
    }
}

/// Entry of a list group's item list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Visible in the list
    pub reference: ObjectReference,
    /// Selection status
    pub selected:  bool,
}

/// List group state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListGroupState {
    /// Token and authored items
    pub token:              TokenGroupState,
    /// Cell positions, 1-based by cell
    pub positions:          Vec<XYPosition>,
    /// Current item list
    pub item_list:          Vec<ListItem>,
    /// Index of the item shown in the first cell, 1-based
    pub first_item:         i32,
    /// Scrolling wraps around the ends
    pub wrap_around:        bool,
    /// More than one item may be selected
    pub multiple_selection: bool,
}

impl ListGroupState {
    /// List group over `items` laid out at `positions`
    pub fn new(items: Vec<TokenGroupItem>, positions: Vec<XYPosition>) -> Self {
        let mut list = Self { token: TokenGroupState::new(items), positions, ..Self::default() };
        list.reset();
        list
    }

    /// Number of items in the list
    pub fn len(&self) -> usize {
        self.item_list.len()
    }

    /// True if the list has no items
    pub fn is_empty(&self) -> bool {
        self.item_list.is_empty()
    }

    /// Map a 1-based item index to a list slot, wrapping if configured
    pub fn slot(&self, index: i32) -> Option<usize> {
        let len = i64::try_from(self.item_list.len()).ok()?;
        if len == 0 {
            return None;
        }
        let offset = i64::from(index) - 1;
        let offset = if self.wrap_around { offset.rem_euclid(len) } else { offset };
        if (0..len).contains(&offset) { usize::try_from(offset).ok() } else { None }
    }

    /// Insert `reference` at 1-based `index`; an index past the end appends.
    ///
    /// A reference already in the list is not added twice.
    ///
    /// # Errors
    ///
    /// `INVALID_INDEX` for an index below 1.
    pub fn add_item(&mut self, index: i32, reference: ObjectReference) -> Result<bool> {
        if index < 1 {
            return Err(Error::parameter_error(codes::INVALID_INDEX, "List index below 1"));
        }
        if self.item_list.iter().any(|item| item.reference == reference) {
            return Ok(false);
        }
        let at = usize::try_from(index - 1).unwrap_or(usize::MAX).min(self.item_list.len());
        self.item_list.insert(at, ListItem { reference, selected: false });
        Ok(true)
    }

    /// Remove `reference`; false if it was not in the list
    pub fn del_item(&mut self, reference: &ObjectReference) -> bool {
        let before = self.item_list.len();
        self.item_list.retain(|item| &item.reference != reference);
        let removed = self.item_list.len() != before;
        if removed {
            let len = i32::try_from(self.item_list.len()).unwrap_or(i32::MAX);
            self.first_item = self.first_item.min(len.max(1));
        }
        removed
    }

    /// Move the first visible item by `count`, clamping unless wrapping
    pub fn scroll(&mut self, count: i32) {
        let len = i64::try_from(self.item_list.len()).unwrap_or(i64::MAX);
        if len == 0 {
            return;
        }
        let target = i64::from(self.first_item) + i64::from(count);
        let first = if self.wrap_around { (target - 1).rem_euclid(len) + 1 } else { target.clamp(1, len) };
        self.first_item = i32::try_from(first).unwrap_or(i32::MAX);
    }

    pub(crate) fn reset(&mut self) {
        self.token.reset();
        self.first_item = 1;
        self.item_list = self
            .token
            .items
            .iter()
            .map(|item| ListItem { reference: item.reference.clone(), selected: false })
            .collect();
    }
}

/// Zero-based offset of a 1-based index; `None` below 1
fn one_based(index: i32) -> Option<usize> {
    index.checked_sub(1).and_then(|offset| usize::try_from(offset).ok())
}

// MHEG - mheg-runtime
// Module: Display collaborator
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Display collaborator.
//!
//! The engine keeps the display stack itself and tells the display what
//! changed. Objects are named by their absolute address.

use std::sync::{Arc, Mutex};

use mheg_foundation::{ExternalReference, Region};

/// Renderer side of the engine
pub trait Display {
    /// A visible started running
    fn show(&mut self, object: &ExternalReference);
    /// A visible stopped running
    fn hide(&mut self, object: &ExternalReference);
    /// Repaint `region`
    fn redraw(&mut self, region: Region);
    /// `object` moved to the top of the stack
    fn bring_to_front(&mut self, object: &ExternalReference);
    /// `object` moved to the bottom of the stack
    fn send_to_back(&mut self, object: &ExternalReference);
    /// `object` moved directly above `reference`
    fn put_before(&mut self, object: &ExternalReference, reference: &ExternalReference);
    /// `object` moved directly below `reference`
    fn put_behind(&mut self, object: &ExternalReference, reference: &ExternalReference);
}

/// Display that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn show(&mut self, _object: &ExternalReference) {}

    fn hide(&mut self, _object: &ExternalReference) {}

    fn redraw(&mut self, _region: Region) {}

    fn bring_to_front(&mut self, _object: &ExternalReference) {}

    fn send_to_back(&mut self, _object: &ExternalReference) {}

    fn put_before(&mut self, _object: &ExternalReference, _reference: &ExternalReference) {}

    fn put_behind(&mut self, _object: &ExternalReference, _reference: &ExternalReference) {}
}

/// A call made on a [`RecordingDisplay`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum DisplayCall {
    Show(ExternalReference),
    Hide(ExternalReference),
    Redraw(Region),
    BringToFront(ExternalReference),
    SendToBack(ExternalReference),
    PutBefore(ExternalReference, ExternalReference),
    PutBehind(ExternalReference, ExternalReference),
}

/// Display that stores every call.
///
/// Clones share the same record, so a test can keep one clone and hand the
/// other to the engine.
#[derive(Debug, Default, Clone)]
pub struct RecordingDisplay {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl RecordingDisplay {
    /// Display with an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far
    pub fn calls(&self) -> Vec<DisplayCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Forget recorded calls
    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn push(&self, call: DisplayCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Display for RecordingDisplay {
    fn show(&mut self, object: &ExternalReference) {
        self.push(DisplayCall::Show(object.clone()));
    }

    fn hide(&mut self, object: &ExternalReference) {
        self.push(DisplayCall::Hide(object.clone()));
    }

    fn redraw(&mut self, region: Region) {
        self.push(DisplayCall::Redraw(region));
    }

    fn bring_to_front(&mut self, object: &ExternalReference) {
        self.push(DisplayCall::BringToFront(object.clone()));
    }

    fn send_to_back(&mut self, object: &ExternalReference) {
        self.push(DisplayCall::SendToBack(object.clone()));
    }

    fn put_before(&mut self, object: &ExternalReference, reference: &ExternalReference) {
        self.push(DisplayCall::PutBefore(object.clone(), reference.clone()));
    }

    fn put_behind(&mut self, object: &ExternalReference, reference: &ExternalReference) {
        self.push(DisplayCall::PutBehind(object.clone(), reference.clone()));
    }
}

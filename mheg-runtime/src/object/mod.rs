// MHEG - mheg-runtime
// Module: Runtime objects
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Runtime objects.
//!
//! Every object embeds the same [`RootState`] and carries one
//! [`ObjectBody`] variant chosen at construction. The body is the
//! closed-set router for group items: every kind has exactly one variant,
//! and the compiler checks that every `match` over it is exhaustive.

mod group;
mod link;
mod stream;
mod token;
mod variable;
mod visible;

pub use group::GroupState;
pub use link::{LinkCondition, LinkState};
pub use stream::{AudioState, StreamComponentKind, StreamState};
pub use token::{ListGroupState, ListItem, TokenGroupItem, TokenGroupState};
pub use variable::{Comparison, VariableState};
pub(crate) use variable::Arithmetic;
pub use visible::{
    BitmapState, ButtonState, DrawCommand, DynamicLineArtState, EntryFieldState, FontRef,
    HyperTextState, InteractibleState, LineArtState, RtGraphicsState, SliderState, TextState,
    VideoState, VisibleBody, VisibleObject, VisibleState,
};

use mheg_foundation::{ContentReference, ExternalReference, ObjectKind, OctetString};

/// Lifecycle state shared by every object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootState {
    /// Absolute address
    pub address:       ExternalReference,
    /// Prepared and not yet destroyed
    pub available:     bool,
    /// Activated and not yet deactivated; implies `available`
    pub running:       bool,
    /// Waiting for the content loader
    pub needs_content: bool,
}

impl RootState {
    /// Unavailable object at `address`
    pub const fn new(address: ExternalReference) -> Self {
        Self { address, available: false, running: false, needs_content: false }
    }
}

/// Content of an object: carried inline or loaded by reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBody {
    /// Bytes carried in the object
    Included(OctetString),
    /// Bytes fetched through the content loader
    Referenced(ContentReference),
}

/// Class of a program object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramClass {
    /// Built into the receiver
    Resident,
    /// Lives in another application
    Remote,
    /// Delivered as code
    Interchanged,
}

/// Program state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramState {
    /// Program class
    pub class:  ProgramClass,
    /// Short or long program name
    pub name:   OctetString,
    /// True while running because of Fork
    pub forked: bool,
}

impl ProgramState {
    /// Resident program called `name`
    pub fn resident(name: impl Into<OctetString>) -> Self {
        Self { class: ProgramClass::Resident, name: name.into(), forked: false }
    }
}

/// Class of a passive resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    /// Colour palette
    Palette,
    /// Font
    Font,
    /// Cursor shape
    CursorShape,
}

/// Palette, font or cursor-shape state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceState {
    /// Resource class
    pub class:   ResourceClass,
    /// Authored content
    pub content: Option<ContentBody>,
    /// Installed bytes, once loaded
    pub data:    Option<OctetString>,
}

impl ResourceState {
    /// Resource with the given content
    pub const fn new(class: ResourceClass, content: Option<ContentBody>) -> Self {
        Self { class, content, data: None }
    }
}

/// Kind-specific part of an object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectBody {
    /// Application group
    Application(GroupState),
    /// Scene group
    Scene(GroupState),
    /// Resident, remote or interchanged program
    Program(ProgramState),
    /// Palette, font or cursor shape
    Resource(ResourceState),
    /// Variable of any kind
    Variable(VariableState),
    /// Link
    Link(LinkState),
    /// Stream
    Stream(StreamState),
    /// Audio stream component
    Audio(AudioState),
    /// Visible, including the video and RT-graphics components
    Visible(VisibleObject),
    /// Token group
    TokenGroup(TokenGroupState),
    /// List group
    ListGroup(ListGroupState),
}

impl ObjectBody {
    /// Concrete kind
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Application(_) => ObjectKind::Application,
            Self::Scene(_) => ObjectKind::Scene,
            Self::Program(p) => match p.class {
                ProgramClass::Resident => ObjectKind::ResidentProgram,
                ProgramClass::Remote => ObjectKind::RemoteProgram,
                ProgramClass::Interchanged => ObjectKind::InterchangedProgram,
            },
            Self::Resource(r) => match r.class {
                ResourceClass::Palette => ObjectKind::Palette,
                ResourceClass::Font => ObjectKind::Font,
                ResourceClass::CursorShape => ObjectKind::CursorShape,
            },
            Self::Variable(v) => ObjectKind::for_variable(v.kind()),
            Self::Link(_) => ObjectKind::Link,
            Self::Stream(_) => ObjectKind::Stream,
            Self::Audio(_) => ObjectKind::Audio,
            Self::Visible(v) => v.body.kind(),
            Self::TokenGroup(_) => ObjectKind::TokenGroup,
            Self::ListGroup(_) => ObjectKind::ListGroup,
        }
    }

    /// Stream component router; `None` for anything a stream cannot
    /// multiplex
    pub fn stream_component_kind(&self) -> Option<StreamComponentKind> {
        match self {
            Self::Audio(_) => Some(StreamComponentKind::Audio),
            Self::Visible(v) => match v.body {
                VisibleBody::Video(_) => Some(StreamComponentKind::Video),
                VisibleBody::RtGraphics(_) => Some(StreamComponentKind::RtGraphics),
                _ => None,
            },
            _ => None,
        }
    }

    /// Authored content, for kinds that carry content
    pub fn content(&self) -> Option<&ContentBody> {
        match self {
            Self::Resource(r) => r.content.as_ref(),
            Self::Stream(s) => s.content.as_ref(),
            Self::Visible(v) => v.body.content(),
            _ => None,
        }
    }

    /// Replace the authored content; false for kinds without content
    pub fn set_content(&mut self, content: ContentBody) -> bool {
        match self {
            Self::Resource(r) => r.content = Some(content),
            Self::Stream(s) => s.content = Some(content),
            Self::Visible(v) => return v.body.set_content(content),
            _ => return false,
        }
        true
    }

    /// Install loaded content bytes
    pub fn install_content(&mut self, bytes: OctetString) {
        match self {
            Self::Resource(r) => r.data = Some(bytes),
            Self::Visible(v) => v.body.install_content(bytes),
            // streams hand their content to the player; only the reference is kept
            _ => {}
        }
    }

    /// Drop installed content bytes
    pub fn release_content(&mut self) {
        match self {
            Self::Resource(r) => r.data = None,
            Self::Visible(v) => v.body.release_content(),
            _ => {}
        }
    }

    /// Group state of an application or scene
    pub fn group(&self) -> Option<&GroupState> {
        match self {
            Self::Application(g) | Self::Scene(g) => Some(g),
            _ => None,
        }
    }

    /// Mutable group state of an application or scene
    pub fn group_mut(&mut self) -> Option<&mut GroupState> {
        match self {
            Self::Application(g) | Self::Scene(g) => Some(g),
            _ => None,
        }
    }

    /// Token state of a token or list group
    pub fn token(&self) -> Option<&TokenGroupState> {
        match self {
            Self::TokenGroup(t) => Some(t),
            Self::ListGroup(l) => Some(&l.token),
            _ => None,
        }
    }

    /// Mutable token state of a token or list group
    pub fn token_mut(&mut self) -> Option<&mut TokenGroupState> {
        match self {
            Self::TokenGroup(t) => Some(t),
            Self::ListGroup(l) => Some(&mut l.token),
            _ => None,
        }
    }

    /// Restore authored attributes, as Preparation does
    pub fn reset_to_originals(&mut self) {
        match self {
            Self::Variable(v) => v.reset(),
            Self::Visible(v) => v.reset(),
            Self::Program(p) => p.forked = false,
            Self::TokenGroup(t) => t.reset(),
            Self::ListGroup(l) => l.reset(),
            Self::Audio(a) => a.reset(),
            Self::Stream(s) => s.reset(),
            Self::Application(_) | Self::Scene(_) | Self::Resource(_) | Self::Link(_) => {}
        }
    }

    /// Make the current attributes the ones Preparation restores, as a
    /// clone does
    pub fn snapshot_originals(&mut self) {
        match self {
            Self::Variable(v) => v.original = v.value.clone(),
            Self::Visible(v) => v.snapshot(),
            Self::Audio(a) => a.original_volume = a.volume,
            _ => {}
        }
    }
}

/// A runtime object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MhegObject {
    /// Lifecycle state
    pub root:             RootState,
    /// Activated together with its group
    pub initially_active: bool,
    /// Survives scene transitions in the application
    pub shared:           bool,
    /// Created by Clone; removed from the registry when destroyed
    pub cloned:           bool,
    /// Kind-specific state
    pub body:             ObjectBody,
}

impl MhegObject {
    /// Unavailable, initially active, unshared object
    pub fn new(address: ExternalReference, body: ObjectBody) -> Self {
        Self { root: RootState::new(address), initially_active: true, shared: false, cloned: false, body }
    }

    /// Concrete kind
    pub fn kind(&self) -> ObjectKind {
        self.body.kind()
    }

    /// Absolute address
    pub fn address(&self) -> &ExternalReference {
        &self.root.address
    }

    /// Availability flag
    pub fn is_available(&self) -> bool {
        self.root.available
    }

    /// Running flag
    pub fn is_running(&self) -> bool {
        self.root.running
    }

    /// Variable state, if this is a variable
    pub fn variable(&self) -> Option<&VariableState> {
        match &self.body {
            ObjectBody::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// Visible state, if this is a visible
    pub fn visible(&self) -> Option<&VisibleObject> {
        match &self.body {
            ObjectBody::Visible(v) => Some(v),
            _ => None,
        }
    }

    /// Unavailable, unshared copy at `address` whose originals are this
    /// object's current attributes
    pub fn clone_as(&self, address: ExternalReference) -> Self {
        let mut body = self.body.clone();
        body.snapshot_originals();
        body.release_content();
        Self {
            root: RootState::new(address),
            initially_active: self.initially_active,
            shared: false,
            cloned: true,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use mheg_foundation::VariableValue;

    use super::*;

    #[test]
    fn test_kind_follows_body() {
        let var = MhegObject::new(
            ExternalReference::new("~//a", 1),
            ObjectBody::Variable(VariableState::new(VariableValue::Boolean(true))),
        );
        assert_eq!(var.kind(), ObjectKind::BooleanVariable);

        let program = ObjectBody::Program(ProgramState::resident("GCD"));
        assert_eq!(program.kind(), ObjectKind::ResidentProgram);

        let font = ObjectBody::Resource(ResourceState::new(ResourceClass::Font, None));
        assert_eq!(font.kind(), ObjectKind::Font);
    }

    #[test]
    fn test_clone_snapshots_current_value() {
        let mut var = MhegObject::new(
            ExternalReference::new("~//a", 1),
            ObjectBody::Variable(VariableState::new(VariableValue::Integer(1))),
        );
        if let ObjectBody::Variable(v) = &mut var.body {
            v.value = VariableValue::Integer(42);
        }
        var.root.available = true;
        var.shared = true;

        let mut clone = var.clone_as(ExternalReference::new("~//a", 65536));
        assert!(clone.cloned);
        assert!(!clone.shared);
        assert!(!clone.is_available());
        clone.body.reset_to_originals();
        assert_eq!(clone.variable().map(|v| &v.value), Some(&VariableValue::Integer(42)));
    }

    #[test]
    fn test_stream_components() {
        let audio = ObjectBody::Audio(AudioState::new(3, 0));
        assert_eq!(audio.stream_component_kind(), Some(StreamComponentKind::Audio));
        let var = ObjectBody::Variable(VariableState::new(VariableValue::Integer(0)));
        assert_eq!(var.stream_component_kind(), None);
    }
}

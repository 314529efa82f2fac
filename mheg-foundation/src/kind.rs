// MHEG - mheg-foundation
// Module: Object kinds
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Closed set of concrete object kinds.
//!
//! Each kind carries the context-specific tag the decoder assigns it. The
//! tag is the only place where a kind can arrive from outside the type
//! system, so [`ObjectKind::from_tag`] is the fatal escape hatch for
//! malformed decoder output.

use core::fmt;

use mheg_error::{kinds, Result};

use crate::generic::VariableKind;

/// Concrete object kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum ObjectKind {
    /// Application group
    Application = 0,
    /// Scene group
    Scene = 1,
    /// Program built into the receiver
    ResidentProgram = 9,
    /// Program in another application
    RemoteProgram = 10,
    /// Program delivered as interchanged code
    InterchangedProgram = 11,
    /// Palette resource
    Palette = 12,
    /// Font resource
    Font = 13,
    /// Cursor shape resource
    CursorShape = 14,
    /// Boolean variable
    BooleanVariable = 15,
    /// Integer variable
    IntegerVariable = 16,
    /// Octet-string variable
    OctetStringVariable = 17,
    /// Object-reference variable
    ObjectRefVariable = 18,
    /// Content-reference variable
    ContentRefVariable = 19,
    /// Event-driven action trigger
    Link = 20,
    /// Multiplexed AV stream
    Stream = 21,
    /// Bitmap visible
    Bitmap = 22,
    /// Static line art
    LineArt = 23,
    /// Drawable line art
    DynamicLineArt = 24,
    /// Rectangle
    Rectangle = 25,
    /// Invisible interactive area
    Hotspot = 26,
    /// Two-state button
    SwitchButton = 27,
    /// Push button
    PushButton = 28,
    /// Static text
    Text = 29,
    /// Editable text
    EntryField = 30,
    /// Text with anchors
    HyperText = 31,
    /// Slider
    Slider = 32,
    /// Group moving a token between items
    TokenGroup = 33,
    /// Scrollable list of items
    ListGroup = 34,
    /// Audio stream component
    Audio = 95,
    /// Video stream component
    Video = 96,
    /// Real-time graphics stream component
    RtGraphics = 97,
}

impl ObjectKind {
    /// Every kind, in tag order
    pub const ALL: [Self; 31] = [
        Self::Application,
        Self::Scene,
        Self::ResidentProgram,
        Self::RemoteProgram,
        Self::InterchangedProgram,
        Self::Palette,
        Self::Font,
        Self::CursorShape,
        Self::BooleanVariable,
        Self::IntegerVariable,
        Self::OctetStringVariable,
        Self::ObjectRefVariable,
        Self::ContentRefVariable,
        Self::Link,
        Self::Stream,
        Self::Bitmap,
        Self::LineArt,
        Self::DynamicLineArt,
        Self::Rectangle,
        Self::Hotspot,
        Self::SwitchButton,
        Self::PushButton,
        Self::Text,
        Self::EntryField,
        Self::HyperText,
        Self::Slider,
        Self::TokenGroup,
        Self::ListGroup,
        Self::Audio,
        Self::Video,
        Self::RtGraphics,
    ];

    /// Kind for a decoder tag.
    ///
    /// # Errors
    ///
    /// Returns a fatal `ClosedSet` error for a tag outside the set.
    pub fn from_tag(tag: u32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(kinds::unknown_object_tag)
    }

    /// Decoder tag
    #[must_use]
    pub const fn tag(self) -> u32 {
        self as u32
    }

    /// Class name as authored
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::Scene => "Scene",
            Self::ResidentProgram => "ResidentProgram",
            Self::RemoteProgram => "RemoteProgram",
            Self::InterchangedProgram => "InterchangedProgram",
            Self::Palette => "Palette",
            Self::Font => "Font",
            Self::CursorShape => "CursorShape",
            Self::BooleanVariable => "BooleanVariable",
            Self::IntegerVariable => "IntegerVariable",
            Self::OctetStringVariable => "OctetStringVariable",
            Self::ObjectRefVariable => "ObjectRefVariable",
            Self::ContentRefVariable => "ContentRefVariable",
            Self::Link => "Link",
            Self::Stream => "Stream",
            Self::Bitmap => "Bitmap",
            Self::LineArt => "LineArt",
            Self::DynamicLineArt => "DynamicLineArt",
            Self::Rectangle => "Rectangle",
            Self::Hotspot => "Hotspot",
            Self::SwitchButton => "SwitchButton",
            Self::PushButton => "PushButton",
            Self::Text => "Text",
            Self::EntryField => "EntryField",
            Self::HyperText => "HyperText",
            Self::Slider => "Slider",
            Self::TokenGroup => "TokenGroup",
            Self::ListGroup => "ListGroup",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::RtGraphics => "RTGraphics",
        }
    }

    /// Variable kind held, for the five variable classes
    #[must_use]
    pub const fn variable_kind(self) -> Option<VariableKind> {
        match self {
            Self::BooleanVariable => Some(VariableKind::Boolean),
            Self::IntegerVariable => Some(VariableKind::Integer),
            Self::OctetStringVariable => Some(VariableKind::OctetString),
            Self::ObjectRefVariable => Some(VariableKind::ObjectReference),
            Self::ContentRefVariable => Some(VariableKind::ContentReference),
            _ => None,
        }
    }

    /// Variable class for a payload kind
    #[must_use]
    pub const fn for_variable(kind: VariableKind) -> Self {
        match kind {
            VariableKind::Boolean => Self::BooleanVariable,
            VariableKind::Integer => Self::IntegerVariable,
            VariableKind::OctetString => Self::OctetStringVariable,
            VariableKind::ObjectReference => Self::ObjectRefVariable,
            VariableKind::ContentReference => Self::ContentRefVariable,
        }
    }

    /// True for the five variable classes
    #[must_use]
    pub const fn is_variable(self) -> bool {
        self.variable_kind().is_some()
    }

    /// True for application and scene
    #[must_use]
    pub const fn is_group(self) -> bool {
        matches!(self, Self::Application | Self::Scene)
    }

    /// True for audio, video and RT-graphics
    #[must_use]
    pub const fn is_stream_component(self) -> bool {
        matches!(self, Self::Audio | Self::Video | Self::RtGraphics)
    }

    /// True for kinds placed on the display stack
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(
            self,
            Self::Bitmap
                | Self::LineArt
                | Self::DynamicLineArt
                | Self::Rectangle
                | Self::Hotspot
                | Self::SwitchButton
                | Self::PushButton
                | Self::Text
                | Self::EntryField
                | Self::HyperText
                | Self::Slider
                | Self::Video
                | Self::RtGraphics
        )
    }

    /// True for the program classes
    #[must_use]
    pub const fn is_program(self) -> bool {
        matches!(self, Self::ResidentProgram | Self::RemoteProgram | Self::InterchangedProgram)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use mheg_error::codes;

    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for kind in ObjectKind::ALL {
            assert_eq!(ObjectKind::from_tag(kind.tag()), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_tag_is_fatal() {
        for tag in [2, 8, 35, 94, 98, u32::MAX] {
            let err = ObjectKind::from_tag(tag).unwrap_err();
            assert!(err.is_fatal());
            assert_eq!(err.code, codes::UNKNOWN_OBJECT_TAG);
        }
    }

    #[test]
    fn test_variable_mapping() {
        for kind in VariableKind::ALL {
            let class = ObjectKind::for_variable(kind);
            assert!(class.is_variable());
            assert_eq!(class.variable_kind(), Some(kind));
        }
        assert!(!ObjectKind::Bitmap.is_variable());
    }

    #[test]
    fn test_families() {
        assert!(ObjectKind::Video.is_visible());
        assert!(ObjectKind::Video.is_stream_component());
        assert!(!ObjectKind::Audio.is_visible());
        assert!(ObjectKind::Scene.is_group());
        assert!(!ObjectKind::TokenGroup.is_group());
    }
}

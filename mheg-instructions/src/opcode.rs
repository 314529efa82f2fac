// MHEG - mheg-instructions
// Module: Elementary action opcodes
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Closed set of elementary action opcodes.
//!
//! Each opcode carries the context-specific tag the decoder assigns it.
//! Tags 225 to 236 belong to other productions and are not actions.

use core::fmt;

use mheg_error::{kinds, Result};

macro_rules! opcodes {
    ($( $name:ident = $tag:literal ),* $(,)?) => {
        /// Elementary action opcode
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        #[allow(missing_docs)]
        pub enum Opcode {
            $( $name = $tag, )*
        }

        impl Opcode {
            /// Every opcode, in tag order
            pub const ALL: &'static [Self] = &[$(Self::$name),*];

            /// Action name as authored
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)*
                }
            }
        }
    };
}

opcodes! {
    Activate = 115,
    Add = 116,
    AddItem = 117,
    Append = 118,
    BringToFront = 119,
    Call = 120,
    CallActionSlot = 121,
    Clear = 122,
    Clone = 123,
    CloseConnection = 124,
    Deactivate = 125,
    DelItem = 126,
    Deselect = 127,
    DeselectItem = 128,
    Divide = 129,
    DrawArc = 130,
    DrawLine = 131,
    DrawOval = 132,
    DrawPolygon = 133,
    DrawPolyline = 134,
    DrawRectangle = 135,
    DrawSector = 136,
    Fork = 137,
    GetAvailabilityStatus = 138,
    GetBoxSize = 139,
    GetCellItem = 140,
    GetCursorPosition = 141,
    GetEngineSupport = 142,
    GetEntryPoint = 143,
    GetFillColour = 144,
    GetFirstItem = 145,
    GetHighlightStatus = 146,
    GetInteractionStatus = 147,
    GetItemStatus = 148,
    GetLabel = 149,
    GetLastAnchorFired = 150,
    GetLineColour = 151,
    GetLineStyle = 152,
    GetLineWidth = 153,
    GetListItem = 154,
    GetListSize = 155,
    GetOverwriteMode = 156,
    GetPortion = 157,
    GetPosition = 158,
    GetRunningStatus = 159,
    GetSelectionStatus = 160,
    GetSliderValue = 161,
    GetTextContent = 162,
    GetTextData = 163,
    GetTokenPosition = 164,
    GetVolume = 165,
    Launch = 166,
    LockScreen = 167,
    Modulo = 168,
    Move = 169,
    MoveTo = 170,
    Multiply = 171,
    OpenConnection = 172,
    Preload = 173,
    PutBefore = 174,
    PutBehind = 175,
    Quit = 176,
    ReadPersistent = 177,
    Run = 178,
    ScaleBitmap = 179,
    ScaleVideo = 180,
    ScrollItems = 181,
    Select = 182,
    SelectItem = 183,
    SendEvent = 184,
    SendToBack = 185,
    SetBoxSize = 186,
    SetCachePriority = 187,
    SetCounterEndPosition = 188,
    SetCounterPosition = 189,
    SetCounterTrigger = 190,
    SetCursorPosition = 191,
    SetCursorShape = 192,
    SetData = 193,
    SetEntryPoint = 194,
    SetFillColour = 195,
    SetFirstItem = 196,
    SetFontRef = 197,
    SetHighlightStatus = 198,
    SetInteractionStatus = 199,
    SetLabel = 200,
    SetLineColour = 201,
    SetLineStyle = 202,
    SetLineWidth = 203,
    SetOverwriteMode = 204,
    SetPaletteRef = 205,
    SetPortion = 206,
    SetPosition = 207,
    SetSliderValue = 208,
    SetSpeed = 209,
    SetTimer = 210,
    SetTransparency = 211,
    SetVariable = 212,
    SetVolume = 213,
    Spawn = 214,
    Step = 215,
    Stop = 216,
    StorePersistent = 217,
    Subtract = 218,
    TestVariable = 219,
    Toggle = 220,
    ToggleItem = 221,
    TransitionTo = 222,
    Unload = 223,
    UnlockScreen = 224,
    SetBackgroundColour = 237,
    SetCellPosition = 238,
    SetInputRegister = 239,
    SetTextColour = 240,
    SetFontAttributes = 241,
    SetVideoDecodeOffset = 242,
    GetVideoDecodeOffset = 243,
    GetFocusPosition = 244,
    SetFocusPosition = 245,
    SetBitmapDecodeOffset = 246,
    GetBitmapDecodeOffset = 247,
    SetSliderParameters = 248,
}

impl Opcode {
    /// Opcode for a decoder tag.
    ///
    /// # Errors
    ///
    /// Returns a fatal `ClosedSet` error for a tag that is not an action.
    pub fn from_tag(tag: u32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.tag() == tag)
            .ok_or_else(kinds::unknown_opcode_tag)
    }

    /// Decoder tag
    #[must_use]
    pub const fn tag(self) -> u32 {
        self as u32
    }

    /// True for opcodes the receiver does not implement; they are logged at
    /// critical level and otherwise ignored
    #[must_use]
    pub const fn is_unimplemented(self) -> bool {
        matches!(
            self,
            Self::OpenConnection
                | Self::CloseConnection
                | Self::SetCursorPosition
                | Self::GetCursorPosition
                | Self::SetCursorShape
                | Self::SetInputRegister
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_count() {
        assert_eq!(Opcode::ALL.len(), 122);
    }

    #[test]
    fn test_tag_gap_is_rejected() {
        for tag in 225..=236 {
            assert!(Opcode::from_tag(tag).unwrap_err().is_fatal());
        }
        assert!(Opcode::from_tag(114).is_err());
        assert!(Opcode::from_tag(249).is_err());
    }

    #[test]
    fn test_tags_round_trip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_tag(op.tag()), Ok(*op));
        }
        assert_eq!(Opcode::from_tag(119), Ok(Opcode::BringToFront));
        assert_eq!(Opcode::SetSliderParameters.name(), "SetSliderParameters");
    }
}

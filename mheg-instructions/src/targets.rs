// MHEG - mheg-instructions
// Module: Legal target kinds
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Per-opcode table of object kinds an action may target.
//!
//! The set is a property of the opcode, not of the target: a Text accepts
//! SetFontRef but a Rectangle does not, even though both are visibles. The
//! interpreter consults this table before it dispatches, and logs
//! "unexpected target" for anything outside it.

use mheg_foundation::ObjectKind::{
    Application, Audio, Bitmap, BooleanVariable, ContentRefVariable, CursorShape,
    DynamicLineArt, EntryField, Font, Hotspot, HyperText, IntegerVariable, InterchangedProgram,
    Link, ListGroup, ObjectRefVariable, OctetStringVariable, Palette, PushButton, Rectangle,
    RemoteProgram, ResidentProgram, RtGraphics, Scene, Slider, Stream, SwitchButton, Text,
    TokenGroup, Video,
};
use mheg_foundation::ObjectKind;

use crate::opcode::Opcode;

/// Kinds an opcode accepts as its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRule {
    /// Target must resolve to one of these kinds
    Kinds(&'static [ObjectKind]),
    /// Any live object
    AnyKind,
    /// The action acts on the active application; its target names the
    /// application to start
    ActiveApplication,
}

impl TargetRule {
    /// True if `kind` is an acceptable resolved target
    #[must_use]
    pub fn accepts(self, kind: ObjectKind) -> bool {
        match self {
            Self::Kinds(kinds) => kinds.contains(&kind),
            Self::AnyKind => true,
            Self::ActiveApplication => kind == ObjectKind::Application,
        }
    }
}

const APPLICATION: &[ObjectKind] = &[Application];
const SCENE: &[ObjectKind] = &[Scene];
const GROUPS: &[ObjectKind] = &[Application, Scene];
const LINK: &[ObjectKind] = &[Link];
const INTEGER_VARIABLE: &[ObjectKind] = &[IntegerVariable];
const OCTET_STRING_VARIABLE: &[ObjectKind] = &[OctetStringVariable];
const VARIABLES: &[ObjectKind] = &[
    BooleanVariable,
    IntegerVariable,
    OctetStringVariable,
    ObjectRefVariable,
    ContentRefVariable,
];
const RESIDENT_PROGRAM: &[ObjectKind] = &[ResidentProgram];
const LIST_GROUP: &[ObjectKind] = &[ListGroup];
const TOKEN_GROUPS: &[ObjectKind] = &[ListGroup, TokenGroup];
const DYNAMIC_LINE_ART: &[ObjectKind] = &[DynamicLineArt];
const LINE_ART: &[ObjectKind] = &[DynamicLineArt, Rectangle];
const BUTTONS: &[ObjectKind] = &[Hotspot, PushButton, SwitchButton];
const LABELLED_BUTTONS: &[ObjectKind] = &[PushButton, SwitchButton];
const SWITCH_BUTTON: &[ObjectKind] = &[SwitchButton];
const ENTRY_FIELD: &[ObjectKind] = &[EntryField];
const HYPER_TEXT: &[ObjectKind] = &[HyperText];
const TEXTS: &[ObjectKind] = &[EntryField, HyperText, Text];
const INTERACTIBLES: &[ObjectKind] = &[EntryField, HyperText, Slider];
const SLIDER: &[ObjectKind] = &[Slider];
const BITMAP: &[ObjectKind] = &[Bitmap];
const VIDEO: &[ObjectKind] = &[Video];
const AUDIO: &[ObjectKind] = &[Audio];
const STREAM: &[ObjectKind] = &[Stream];
const CONTENT_HOLDERS: &[ObjectKind] = &[Bitmap, Text, EntryField, HyperText, Stream];
const STACKABLE: &[ObjectKind] =
    &[Bitmap, DynamicLineArt, EntryField, HyperText, Rectangle, Slider, Text, Video];
const PALETTED: &[ObjectKind] =
    &[Bitmap, DynamicLineArt, EntryField, HyperText, Rectangle, Slider, Text];
const CLONABLE: &[ObjectKind] = &[
    Bitmap,
    BooleanVariable,
    IntegerVariable,
    OctetStringVariable,
    ObjectRefVariable,
    ContentRefVariable,
    DynamicLineArt,
    EntryField,
    HyperText,
    Link,
    ListGroup,
    Rectangle,
    ResidentProgram,
    Slider,
    Text,
    TokenGroup,
];
const PRELOADABLE: &[ObjectKind] = &[
    Audio,
    Bitmap,
    BooleanVariable,
    IntegerVariable,
    OctetStringVariable,
    ObjectRefVariable,
    ContentRefVariable,
    DynamicLineArt,
    EntryField,
    HyperText,
    Link,
    ListGroup,
    Rectangle,
    ResidentProgram,
    Slider,
    Stream,
    Text,
    TokenGroup,
    Video,
];
const RUNNABLE: &[ObjectKind] = &[
    Audio,
    Bitmap,
    DynamicLineArt,
    EntryField,
    Hotspot,
    HyperText,
    ListGroup,
    PushButton,
    Rectangle,
    RtGraphics,
    Slider,
    Stream,
    SwitchButton,
    Text,
    TokenGroup,
    Video,
];
const STOPPABLE: &[ObjectKind] = &[
    RemoteProgram,
    ResidentProgram,
    InterchangedProgram,
    Audio,
    Video,
    RtGraphics,
    Stream,
    Bitmap,
    DynamicLineArt,
    Rectangle,
    Hotspot,
    SwitchButton,
    PushButton,
    Text,
    EntryField,
    HyperText,
    Slider,
    TokenGroup,
    ListGroup,
];
const UNLOADABLE: &[ObjectKind] = &[
    RemoteProgram,
    ResidentProgram,
    InterchangedProgram,
    Palette,
    Font,
    CursorShape,
    BooleanVariable,
    IntegerVariable,
    OctetStringVariable,
    ObjectRefVariable,
    ContentRefVariable,
    Link,
    Audio,
    Video,
    RtGraphics,
    Stream,
    Bitmap,
    DynamicLineArt,
    Rectangle,
    Hotspot,
    SwitchButton,
    PushButton,
    Text,
    EntryField,
    HyperText,
    Slider,
    TokenGroup,
    ListGroup,
];

impl Opcode {
    /// Kinds this opcode accepts as its resolved target.
    ///
    /// `TransitionTo` names a scene that is usually not loaded yet; the
    /// engine fetches it instead of looking it up, and the row only
    /// documents that the target is a scene.
    #[must_use]
    pub const fn legal_targets(self) -> TargetRule {
        use TargetRule::{ActiveApplication, AnyKind, Kinds};
        match self {
            Self::Activate | Self::Deactivate => Kinds(LINK),
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo => {
                Kinds(INTEGER_VARIABLE)
            }
            Self::Append => Kinds(OCTET_STRING_VARIABLE),
            Self::SetVariable | Self::TestVariable => Kinds(VARIABLES),
            Self::AddItem
            | Self::DelItem
            | Self::SelectItem
            | Self::DeselectItem
            | Self::ToggleItem
            | Self::GetCellItem
            | Self::GetFirstItem
            | Self::SetFirstItem
            | Self::GetItemStatus
            | Self::GetListItem
            | Self::GetListSize
            | Self::ScrollItems
            | Self::SetCellPosition => Kinds(LIST_GROUP),
            Self::CallActionSlot | Self::GetTokenPosition | Self::Move | Self::MoveTo => {
                Kinds(TOKEN_GROUPS)
            }
            Self::BringToFront
            | Self::SendToBack
            | Self::PutBefore
            | Self::PutBehind
            | Self::GetPosition
            | Self::SetPosition
            | Self::GetBoxSize
            | Self::SetBoxSize => Kinds(STACKABLE),
            Self::SetPaletteRef => Kinds(PALETTED),
            Self::Call | Self::Fork => Kinds(RESIDENT_PROGRAM),
            Self::Clone => Kinds(CLONABLE),
            Self::Preload => Kinds(PRELOADABLE),
            Self::Run => Kinds(RUNNABLE),
            Self::Stop => Kinds(STOPPABLE),
            Self::Unload => Kinds(UNLOADABLE),
            Self::Clear
            | Self::DrawArc
            | Self::DrawLine
            | Self::DrawOval
            | Self::DrawPolygon
            | Self::DrawPolyline
            | Self::DrawRectangle
            | Self::DrawSector
            | Self::GetFillColour
            | Self::GetLineColour
            | Self::GetLineStyle
            | Self::GetLineWidth => Kinds(DYNAMIC_LINE_ART),
            Self::SetFillColour | Self::SetLineColour | Self::SetLineStyle | Self::SetLineWidth => {
                Kinds(LINE_ART)
            }
            Self::Select | Self::Deselect => Kinds(BUTTONS),
            Self::GetLabel | Self::SetLabel => Kinds(LABELLED_BUTTONS),
            Self::Toggle | Self::GetSelectionStatus => Kinds(SWITCH_BUTTON),
            Self::GetEntryPoint
            | Self::SetEntryPoint
            | Self::GetOverwriteMode
            | Self::SetOverwriteMode => Kinds(ENTRY_FIELD),
            Self::GetLastAnchorFired | Self::GetFocusPosition | Self::SetFocusPosition => {
                Kinds(HYPER_TEXT)
            }
            Self::GetTextContent
            | Self::GetTextData
            | Self::SetFontRef
            | Self::SetBackgroundColour
            | Self::SetTextColour
            | Self::SetFontAttributes => Kinds(TEXTS),
            Self::GetHighlightStatus
            | Self::SetHighlightStatus
            | Self::GetInteractionStatus
            | Self::SetInteractionStatus => Kinds(INTERACTIBLES),
            Self::GetPortion
            | Self::SetPortion
            | Self::GetSliderValue
            | Self::SetSliderValue
            | Self::Step
            | Self::SetSliderParameters => Kinds(SLIDER),
            Self::ScaleBitmap
            | Self::SetTransparency
            | Self::SetBitmapDecodeOffset
            | Self::GetBitmapDecodeOffset => Kinds(BITMAP),
            Self::ScaleVideo | Self::SetVideoDecodeOffset | Self::GetVideoDecodeOffset => {
                Kinds(VIDEO)
            }
            Self::GetVolume | Self::SetVolume => Kinds(AUDIO),
            Self::SetCounterEndPosition
            | Self::SetCounterPosition
            | Self::SetCounterTrigger
            | Self::SetSpeed => Kinds(STREAM),
            Self::SetData => Kinds(CONTENT_HOLDERS),
            Self::CloseConnection
            | Self::OpenConnection
            | Self::GetEngineSupport
            | Self::LockScreen
            | Self::UnlockScreen
            | Self::Quit
            | Self::ReadPersistent
            | Self::StorePersistent => Kinds(APPLICATION),
            Self::GetCursorPosition
            | Self::SetCursorPosition
            | Self::SetCursorShape
            | Self::SendEvent
            | Self::SetInputRegister
            | Self::TransitionTo => Kinds(SCENE),
            Self::SetTimer | Self::SetCachePriority => Kinds(GROUPS),
            Self::GetAvailabilityStatus | Self::GetRunningStatus => AnyKind,
            Self::Launch | Self::Spawn => ActiveApplication,
        }
    }
}

// MHEG - mheg-instructions
// Module: Elementary actions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Typed elementary actions.
//!
//! An [`ElementaryAction`] is a target reference plus an [`ActionKind`]
//! carrying the opcode's parameters. Parameters are Generic wherever the
//! authoring format allows indirection; output variables are plain object
//! references because they must name a variable.

use alloc::vec::Vec;

use mheg_foundation::{
    EventType, GenericBoolean, GenericContentReference, GenericInteger, GenericObjectReference,
    GenericOctetString, GenericValue, ObjectReference,
};

use crate::opcode::Opcode;

/// One action of an action list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementaryAction {
    /// Object the action applies to
    pub target: GenericObjectReference,
    /// Opcode and parameters
    pub kind:   ActionKind,
}

impl ElementaryAction {
    /// Action on `target`
    pub fn new(target: impl Into<GenericObjectReference>, kind: ActionKind) -> Self {
        Self { target: target.into(), kind }
    }

    /// Opcode of this action
    #[must_use]
    pub fn opcode(&self) -> Opcode {
        self.kind.opcode()
    }
}

/// Ordered list of actions, as carried by links, groups and action slots
pub type ActionList = Vec<ElementaryAction>;

/// Pair of integer coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: GenericInteger,
    /// Vertical coordinate
    pub y: GenericInteger,
}

impl Point {
    /// Literal point
    #[must_use]
    pub fn literal(x: i32, y: i32) -> Self {
        Self { x: x.into(), y: y.into() }
    }
}

/// Pair of output integer variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointVariables {
    /// Receives the horizontal value
    pub x_var: ObjectReference,
    /// Receives the vertical value
    pub y_var: ObjectReference,
}

/// Arc or sector geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcParameters {
    /// Bounding box origin
    pub origin:         Point,
    /// Ellipse width
    pub ellipse_width:  GenericInteger,
    /// Ellipse height
    pub ellipse_height: GenericInteger,
    /// Start angle in 1/64 degrees
    pub start_angle:    GenericInteger,
    /// Arc angle in 1/64 degrees
    pub arc_angle:      GenericInteger,
}

/// Colour parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewColour {
    /// Palette index
    Index(GenericInteger),
    /// Absolute RGBT octets
    Absolute(GenericOctetString),
}

/// New content for SetData
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewContent {
    /// Content included in the action
    Included(GenericOctetString),
    /// Content to load from a reference
    Referenced {
        /// Where the content lives
        reference:      GenericContentReference,
        /// Expected size, if known
        size:           Option<GenericInteger>,
        /// Cache priority hint
        cache_priority: Option<GenericInteger>,
    },
}

/// New font for SetFontRef
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewFont {
    /// Font by name
    Name(GenericOctetString),
    /// Font object
    Reference(GenericObjectReference),
}

/// New timer for SetTimer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimer {
    /// Interval or absolute time in milliseconds
    pub timer_value:   GenericInteger,
    /// True if `timer_value` counts from group activation
    pub absolute_time: Option<GenericBoolean>,
}

/// Opcode together with its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ActionKind {
    Activate,
    Add { value: GenericInteger },
    AddItem { item_index: GenericInteger, visible_reference: GenericObjectReference },
    Append { value: GenericOctetString },
    BringToFront,
    Call { call_succeeded: ObjectReference, parameters: Vec<GenericValue> },
    CallActionSlot { index: GenericInteger },
    Clear,
    Clone { clone_ref_var: ObjectReference },
    CloseConnection { connection_tag: GenericInteger },
    Deactivate,
    DelItem { visible_reference: GenericObjectReference },
    Deselect,
    DeselectItem { item_index: GenericInteger },
    Divide { value: GenericInteger },
    DrawArc(ArcParameters),
    DrawLine { from: Point, to: Point },
    DrawOval { origin: Point, ellipse_width: GenericInteger, ellipse_height: GenericInteger },
    DrawPolygon { points: Vec<Point> },
    DrawPolyline { points: Vec<Point> },
    DrawRectangle { from: Point, to: Point },
    DrawSector(ArcParameters),
    Fork { fork_succeeded: ObjectReference, parameters: Vec<GenericValue> },
    GetAvailabilityStatus { var: ObjectReference },
    GetBoxSize(PointVariables),
    GetCellItem { cell_index: GenericInteger, item_ref_var: ObjectReference },
    GetCursorPosition(PointVariables),
    GetEngineSupport { feature: GenericOctetString, answer: ObjectReference },
    GetEntryPoint { var: ObjectReference },
    GetFillColour { var: ObjectReference },
    GetFirstItem { var: ObjectReference },
    GetHighlightStatus { var: ObjectReference },
    GetInteractionStatus { var: ObjectReference },
    GetItemStatus { item_index: GenericInteger, var: ObjectReference },
    GetLabel { var: ObjectReference },
    GetLastAnchorFired { var: ObjectReference },
    GetLineColour { var: ObjectReference },
    GetLineStyle { var: ObjectReference },
    GetLineWidth { var: ObjectReference },
    GetListItem { item_index: GenericInteger, var: ObjectReference },
    GetListSize { var: ObjectReference },
    GetOverwriteMode { var: ObjectReference },
    GetPortion { var: ObjectReference },
    GetPosition(PointVariables),
    GetRunningStatus { var: ObjectReference },
    GetSelectionStatus { var: ObjectReference },
    GetSliderValue { var: ObjectReference },
    GetTextContent { var: ObjectReference },
    GetTextData { var: ObjectReference },
    GetTokenPosition { var: ObjectReference },
    GetVolume { var: ObjectReference },
    Launch,
    LockScreen,
    Modulo { value: GenericInteger },
    Move { movement_identifier: GenericInteger },
    MoveTo { index: GenericInteger },
    Multiply { value: GenericInteger },
    OpenConnection {
        open_succeeded: ObjectReference,
        protocol:       GenericOctetString,
        address:        GenericOctetString,
        connection_tag: GenericInteger,
    },
    Preload,
    PutBefore { reference_visible: GenericObjectReference },
    PutBehind { reference_visible: GenericObjectReference },
    Quit,
    ReadPersistent {
        read_succeeded: ObjectReference,
        out_variables:  Vec<ObjectReference>,
        in_file_name:   GenericOctetString,
    },
    Run,
    ScaleBitmap { x_scale: GenericInteger, y_scale: GenericInteger },
    ScaleVideo { x_scale: GenericInteger, y_scale: GenericInteger },
    ScrollItems { items_to_scroll: GenericInteger },
    Select,
    SelectItem { item_index: GenericInteger },
    SendEvent {
        emulated_event_source: GenericObjectReference,
        emulated_event_type:   EventType,
        emulated_event_data:   Option<GenericValue>,
    },
    SendToBack,
    SetBoxSize { x_size: GenericInteger, y_size: GenericInteger },
    SetCachePriority { priority: GenericInteger },
    SetCounterEndPosition { position: GenericInteger },
    SetCounterPosition { position: GenericInteger },
    SetCounterTrigger { trigger_identifier: GenericInteger, position: Option<GenericInteger> },
    SetCursorPosition(Point),
    SetCursorShape { shape: Option<GenericObjectReference> },
    SetData { content: NewContent },
    SetEntryPoint { value: GenericInteger },
    SetFillColour { colour: Option<NewColour> },
    SetFirstItem { value: GenericInteger },
    SetFontRef { font: NewFont },
    SetHighlightStatus { value: GenericBoolean },
    SetInteractionStatus { value: GenericBoolean },
    SetLabel { label: GenericOctetString },
    SetLineColour { colour: NewColour },
    SetLineStyle { value: GenericInteger },
    SetLineWidth { value: GenericInteger },
    SetOverwriteMode { value: GenericBoolean },
    SetPaletteRef { palette: GenericObjectReference },
    SetPortion { value: GenericInteger },
    SetPosition(Point),
    SetSliderValue { value: GenericInteger },
    SetSpeed { numerator: GenericInteger, denominator: Option<GenericInteger> },
    SetTimer { timer_id: GenericInteger, new_timer: Option<NewTimer> },
    SetTransparency { value: GenericInteger },
    SetVariable { value: GenericValue },
    SetVolume { value: GenericInteger },
    Spawn,
    Step { value: GenericInteger },
    Stop,
    StorePersistent {
        store_succeeded: ObjectReference,
        in_variables:    Vec<ObjectReference>,
        out_file_name:   GenericOctetString,
    },
    Subtract { value: GenericInteger },
    TestVariable { operator: GenericInteger, comparison: GenericValue },
    Toggle,
    ToggleItem { item_index: GenericInteger },
    TransitionTo { connection_tag: Option<GenericInteger>, transition_effect: Option<GenericInteger> },
    Unload,
    UnlockScreen,
    SetBackgroundColour { colour: NewColour },
    SetCellPosition { cell_index: GenericInteger, position: Point },
    SetInputRegister { value: GenericInteger },
    SetTextColour { colour: NewColour },
    SetFontAttributes { attributes: GenericOctetString },
    SetVideoDecodeOffset(Point),
    GetVideoDecodeOffset(PointVariables),
    GetFocusPosition { var: ObjectReference },
    SetFocusPosition { value: GenericInteger },
    SetBitmapDecodeOffset(Point),
    GetBitmapDecodeOffset(PointVariables),
    SetSliderParameters { min: GenericInteger, max: GenericInteger, step: GenericInteger },
}

macro_rules! opcode_of {
    ($kind:expr; $($name:ident),* $(,)?) => {
        match $kind {
            $(ActionKind::$name { .. } => Opcode::$name,)*
        }
    };
}

impl ActionKind {
    /// Opcode these parameters belong to
    #[must_use]
    pub fn opcode(&self) -> Opcode {
        opcode_of!(self;
            Activate, Add, AddItem, Append, BringToFront, Call, CallActionSlot, Clear, Clone,
            CloseConnection, Deactivate, DelItem, Deselect, DeselectItem, Divide, DrawArc,
            DrawLine, DrawOval, DrawPolygon, DrawPolyline, DrawRectangle, DrawSector, Fork,
            GetAvailabilityStatus, GetBoxSize, GetCellItem, GetCursorPosition, GetEngineSupport,
            GetEntryPoint, GetFillColour, GetFirstItem, GetHighlightStatus, GetInteractionStatus,
            GetItemStatus, GetLabel, GetLastAnchorFired, GetLineColour, GetLineStyle,
            GetLineWidth, GetListItem, GetListSize, GetOverwriteMode, GetPortion, GetPosition,
            GetRunningStatus, GetSelectionStatus, GetSliderValue, GetTextContent, GetTextData,
            GetTokenPosition, GetVolume, Launch, LockScreen, Modulo, Move, MoveTo, Multiply,
            OpenConnection, Preload, PutBefore, PutBehind, Quit, ReadPersistent, Run,
            ScaleBitmap, ScaleVideo, ScrollItems, Select, SelectItem, SendEvent, SendToBack,
            SetBoxSize, SetCachePriority, SetCounterEndPosition, SetCounterPosition,
            SetCounterTrigger, SetCursorPosition, SetCursorShape, SetData, SetEntryPoint,
            SetFillColour, SetFirstItem, SetFontRef, SetHighlightStatus, SetInteractionStatus,
            SetLabel, SetLineColour, SetLineStyle, SetLineWidth, SetOverwriteMode,
            SetPaletteRef, SetPortion, SetPosition, SetSliderValue, SetSpeed, SetTimer,
            SetTransparency, SetVariable, SetVolume, Spawn, Step, Stop, StorePersistent,
            Subtract, TestVariable, Toggle, ToggleItem, TransitionTo, Unload, UnlockScreen,
            SetBackgroundColour, SetCellPosition, SetInputRegister, SetTextColour,
            SetFontAttributes, SetVideoDecodeOffset, GetVideoDecodeOffset, GetFocusPosition,
            SetFocusPosition, SetBitmapDecodeOffset, GetBitmapDecodeOffset, SetSliderParameters,
        )
    }
}

#[cfg(test)]
mod tests {
    use mheg_foundation::Generic;

    use super::*;

    #[test]
    fn test_opcode_follows_parameters() {
        let action = ElementaryAction::new(
            ObjectReference::Internal(3),
            ActionKind::SetVariable { value: GenericValue::Integer(Generic::Literal(4)) },
        );
        assert_eq!(action.opcode(), Opcode::SetVariable);
        assert_eq!(ActionKind::BringToFront.opcode(), Opcode::BringToFront);
        assert_eq!(
            ActionKind::SetPosition(Point::literal(1, 2)).opcode(),
            Opcode::SetPosition
        );
    }
}

// MHEG - mheg-runtime
// Module: Visible objects
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Visible objects.
//!
//! [`VisibleBody`] is the renderable-kind router. Every visible shares
//! [`VisibleState`] (position, box size, palette); the body holds what the
//! concrete kind adds. Pixels are the display's business, so only the
//! logical attributes the actions read and write live here.

use mheg_foundation::{BoxSize, Colour, ObjectKind, ObjectReference, OctetString, Region, XYPosition};

use super::ContentBody;

/// Geometry and palette shared by every visible
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleState {
    /// Top-left corner
    pub position:          XYPosition,
    /// Size
    pub box_size:          BoxSize,
    /// Palette in use
    pub palette:           Option<ObjectReference>,
    /// Authored position
    pub original_position: XYPosition,
    /// Authored size
    pub original_box_size: BoxSize,
    /// Authored palette
    pub original_palette:  Option<ObjectReference>,
}

impl VisibleState {
    /// Visible geometry at `position` with `box_size`
    pub fn new(position: XYPosition, box_size: BoxSize) -> Self {
        Self {
            position,
            box_size,
            palette: None,
            original_position: position,
            original_box_size: box_size,
            original_palette: None,
        }
    }

    /// Screen region covered
    pub const fn region(&self) -> Region {
        Region::new(self.position, self.box_size)
    }
}

/// Highlight and interaction flags of interactibles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractibleState {
    /// Highlighted
    pub highlight_status:   bool,
    /// Receiving user input
    pub interaction_status: bool,
    /// The engine, not the application, draws the highlight
    pub engine_resp:        bool,
}

impl InteractibleState {
    fn reset(&mut self) {
        self.highlight_status = false;
        self.interaction_status = false;
    }
}

/// Bitmap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitmapState {
    /// Authored content
    pub content:               Option<ContentBody>,
    /// Decoded bitmap bytes
    pub data:                  Option<OctetString>,
    /// Scaled size, if ScaleBitmap was applied
    pub scale:                 Option<BoxSize>,
    /// Transparency percentage
    pub transparency:          i32,
    /// Decode offset
    pub decode_offset:         XYPosition,
    /// Tile the bitmap over its box
    pub tiling:                bool,
    /// Authored transparency
    pub original_transparency: i32,
}

impl BitmapState {
    /// Bitmap with the given content
    pub fn new(content: Option<ContentBody>) -> Self {
        Self { content, ..Self::default() }
    }
}

/// Line and fill attributes of line art and rectangles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineArtState {
    /// Line width in pixels
    pub line_width:            i32,
    /// 1 solid, 2 dashed, 3 dotted
    pub line_style:            i32,
    /// Line colour
    pub line_colour:           Colour,
    /// Fill colour; `None` is transparent
    pub fill_colour:           Option<Colour>,
    /// Authored line width
    pub original_line_width:   i32,
    /// Authored line style
    pub original_line_style:   i32,
    /// Authored line colour
    pub original_line_colour:  Colour,
    /// Authored fill colour
    pub original_fill_colour:  Option<Colour>,
    /// Draw a border along the bounding box
    pub bordered_bounding_box: bool,
}

impl Default for LineArtState {
    fn default() -> Self {
        Self {
            line_width:            1,
            line_style:            1,
            line_colour:           Colour::default(),
            fill_colour:           None,
            original_line_width:   1,
            original_line_style:   1,
            original_line_colour:  Colour::default(),
            original_fill_colour:  None,
            bordered_bounding_box: true,
        }
    }
}

impl LineArtState {
    fn reset(&mut self) {
        self.line_width = self.original_line_width;
        self.line_style = self.original_line_style;
        self.line_colour = self.original_line_colour.clone();
        self.fill_colour = self.original_fill_colour.clone();
    }

    fn snapshot(&mut self) {
        self.original_line_width = self.line_width;
        self.original_line_style = self.line_style;
        self.original_line_colour = self.line_colour.clone();
        self.original_fill_colour = self.fill_colour.clone();
    }
}

/// One drawing primitive recorded by DynamicLineArt
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum DrawCommand {
    Arc { origin: XYPosition, size: BoxSize, start_angle: i32, arc_angle: i32 },
    Sector { origin: XYPosition, size: BoxSize, start_angle: i32, arc_angle: i32 },
    Line { from: XYPosition, to: XYPosition },
    Oval { origin: XYPosition, size: BoxSize },
    Polygon(Vec<XYPosition>),
    Polyline(Vec<XYPosition>),
    Rectangle { from: XYPosition, to: XYPosition },
}

/// Line art that can be drawn on at run time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicLineArtState {
    /// Line and fill attributes
    pub line_art: LineArtState,
    /// Primitives drawn since the last Clear
    pub drawing:  Vec<DrawCommand>,
}

/// Hotspot, push button or switch button
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Selection status
    pub selected:       bool,
    /// Label
    pub label:          OctetString,
    /// Authored label
    pub original_label: OctetString,
}

impl ButtonState {
    /// Button with a label
    pub fn labelled(label: impl Into<OctetString>) -> Self {
        let label = label.into();
        Self { selected: false, original_label: label.clone(), label }
    }
}

/// Font selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontRef {
    /// Font by name
    Name(OctetString),
    /// Font object
    Reference(ObjectReference),
}

impl Default for FontRef {
    fn default() -> Self {
        Self::Name(OctetString::from("rec://font/uk1"))
    }
}

/// Text attributes shared by text, entry fields and hypertext
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextState {
    /// Authored content
    pub content:                    Option<ContentBody>,
    /// Text bytes
    pub data:                       OctetString,
    /// Font
    pub font:                       FontRef,
    /// Text colour
    pub text_colour:                Colour,
    /// Background colour
    pub background_colour:          Colour,
    /// Font attributes, e.g. `plain.24.28.0`
    pub font_attributes:            OctetString,
    /// Authored font
    pub original_font:              FontRef,
    /// Authored text colour
    pub original_text_colour:       Colour,
    /// Authored background colour
    pub original_background_colour: Colour,
    /// Authored font attributes
    pub original_font_attributes:   OctetString,
}

impl TextState {
    /// Text with the given content
    pub fn new(content: Option<ContentBody>) -> Self {
        Self { content, ..Self::default() }
    }

    fn reset(&mut self) {
        self.font = self.original_font.clone();
        self.text_colour = self.original_text_colour.clone();
        self.background_colour = self.original_background_colour.clone();
        self.font_attributes = self.original_font_attributes.clone();
    }

    fn snapshot(&mut self) {
        self.original_font = self.font.clone();
        self.original_text_colour = self.text_colour.clone();
        self.original_background_colour = self.background_colour.clone();
        self.original_font_attributes = self.font_attributes.clone();
    }
}

/// Editable text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFieldState {
    /// Text attributes
    pub text:           TextState,
    /// Interaction flags
    pub interactible:   InteractibleState,
    /// Insertion point
    pub entry_point:    i32,
    /// Overwrite rather than insert
    pub overwrite_mode: bool,
    /// Longest accepted text; 0 is unbounded
    pub max_length:     i32,
}

/// Text with anchors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HyperTextState {
    /// Text attributes
    pub text:              TextState,
    /// Interaction flags
    pub interactible:      InteractibleState,
    /// Anchor with the focus, 1-based
    pub focus_position:    i32,
    /// Anchor data of the last anchor fired
    pub last_anchor_fired: OctetString,
}

/// Slider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderState {
    /// Interaction flags
    pub interactible:   InteractibleState,
    /// Current value
    pub value:          i32,
    /// Portion shown by a proportional slider
    pub portion:        i32,
    /// Minimum value
    pub min_value:      i32,
    /// Maximum value
    pub max_value:      i32,
    /// Step size
    pub step_size:      i32,
    /// Authored value
    pub original_value: i32,
    /// Authored portion
    pub original_portion: i32,
    /// Authored minimum
    pub original_min:   i32,
    /// Authored maximum
    pub original_max:   i32,
    /// Authored step
    pub original_step:  i32,
}

impl Default for SliderState {
    fn default() -> Self {
        Self::new(1, 100, 1)
    }
}

impl SliderState {
    /// Slider over `min..=max` starting at `min`
    pub fn new(min_value: i32, max_value: i32, step_size: i32) -> Self {
        Self {
            interactible: InteractibleState::default(),
            value: min_value,
            portion: 1,
            min_value,
            max_value,
            step_size,
            original_value: min_value,
            original_portion: 1,
            original_min: min_value,
            original_max: max_value,
            original_step: step_size,
        }
    }

    /// Clamp `value` into `min..=max`
    pub fn clamp(&self, value: i32) -> i32 {
        if self.min_value > self.max_value {
            return self.min_value;
        }
        value.clamp(self.min_value, self.max_value)
    }

    fn reset(&mut self) {
        self.min_value = self.original_min;
        self.max_value = self.original_max;
        self.step_size = self.original_step;
        self.portion = self.original_portion;
        self.value = self.clamp(self.original_value);
        self.interactible.reset();
    }

    fn snapshot(&mut self) {
        self.original_value = self.value;
        self.original_portion = self.portion;
        self.original_min = self.min_value;
        self.original_max = self.max_value;
        self.original_step = self.step_size;
    }
}

/// Video stream component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoState {
    /// Elementary stream tag
    pub component_tag: i32,
    /// Scaled size, if ScaleVideo was applied
    pub scale:         Option<BoxSize>,
    /// Decode offset
    pub decode_offset: XYPosition,
}

/// Real-time graphics (subtitles) stream component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RtGraphicsState {
    /// Elementary stream tag
    pub component_tag: i32,
}

/// Renderable-kind router
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum VisibleBody {
    Bitmap(BitmapState),
    LineArt(LineArtState),
    DynamicLineArt(DynamicLineArtState),
    Rectangle(LineArtState),
    Hotspot(ButtonState),
    PushButton(ButtonState),
    SwitchButton(ButtonState),
    Text(TextState),
    EntryField(EntryFieldState),
    HyperText(HyperTextState),
    Slider(SliderState),
    Video(VideoState),
    RtGraphics(RtGraphicsState),
}

impl VisibleBody {
    /// Concrete kind
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::Bitmap(_) => ObjectKind::Bitmap,
            Self::LineArt(_) => ObjectKind::LineArt,
            Self::DynamicLineArt(_) => ObjectKind::DynamicLineArt,
            Self::Rectangle(_) => ObjectKind::Rectangle,
            Self::Hotspot(_) => ObjectKind::Hotspot,
            Self::PushButton(_) => ObjectKind::PushButton,
            Self::SwitchButton(_) => ObjectKind::SwitchButton,
            Self::Text(_) => ObjectKind::Text,
            Self::EntryField(_) => ObjectKind::EntryField,
            Self::HyperText(_) => ObjectKind::HyperText,
            Self::Slider(_) => ObjectKind::Slider,
            Self::Video(_) => ObjectKind::Video,
            Self::RtGraphics(_) => ObjectKind::RtGraphics,
        }
    }

    /// Authored content of content-carrying kinds
    pub fn content(&self) -> Option<&ContentBody> {
        match self {
            Self::Bitmap(b) => b.content.as_ref(),
            Self::Text(t) => t.content.as_ref(),
            Self::EntryField(e) => e.text.content.as_ref(),
            Self::HyperText(h) => h.text.content.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn set_content(&mut self, content: ContentBody) -> bool {
        match self {
            Self::Bitmap(b) => b.content = Some(content),
            Self::Text(t) => t.content = Some(content),
            Self::EntryField(e) => e.text.content = Some(content),
            Self::HyperText(h) => h.text.content = Some(content),
            _ => return false,
        }
        true
    }

    pub(crate) fn install_content(&mut self, bytes: OctetString) {
        match self {
            Self::Bitmap(b) => b.data = Some(bytes),
            Self::Text(t) => t.data = bytes,
            Self::EntryField(e) => e.text.data = bytes,
            Self::HyperText(h) => h.text.data = bytes,
            _ => {}
        }
    }

    pub(crate) fn release_content(&mut self) {
        if let Self::Bitmap(b) = self {
            b.data = None;
        }
    }

    /// Text attributes of text kinds
    pub fn text(&self) -> Option<&TextState> {
        match self {
            Self::Text(t) => Some(t),
            Self::EntryField(e) => Some(&e.text),
            Self::HyperText(h) => Some(&h.text),
            _ => None,
        }
    }

    /// Mutable text attributes of text kinds
    pub fn text_mut(&mut self) -> Option<&mut TextState> {
        match self {
            Self::Text(t) => Some(t),
            Self::EntryField(e) => Some(&mut e.text),
            Self::HyperText(h) => Some(&mut h.text),
            _ => None,
        }
    }

    /// Line attributes of line-art kinds
    pub fn line_art(&self) -> Option<&LineArtState> {
        match self {
            Self::LineArt(l) | Self::Rectangle(l) => Some(l),
            Self::DynamicLineArt(d) => Some(&d.line_art),
            _ => None,
        }
    }

    /// Mutable line attributes of line-art kinds
    pub fn line_art_mut(&mut self) -> Option<&mut LineArtState> {
        match self {
            Self::LineArt(l) | Self::Rectangle(l) => Some(l),
            Self::DynamicLineArt(d) => Some(&mut d.line_art),
            _ => None,
        }
    }

    /// Interaction flags of interactible kinds
    pub fn interactible(&self) -> Option<&InteractibleState> {
        match self {
            Self::EntryField(e) => Some(&e.interactible),
            Self::HyperText(h) => Some(&h.interactible),
            Self::Slider(s) => Some(&s.interactible),
            _ => None,
        }
    }

    /// Mutable interaction flags of interactible kinds
    pub fn interactible_mut(&mut self) -> Option<&mut InteractibleState> {
        match self {
            Self::EntryField(e) => Some(&mut e.interactible),
            Self::HyperText(h) => Some(&mut h.interactible),
            Self::Slider(s) => Some(&mut s.interactible),
            _ => None,
        }
    }

    /// Button state of button kinds
    pub fn button_mut(&mut self) -> Option<&mut ButtonState> {
        match self {
            Self::Hotspot(b) | Self::PushButton(b) | Self::SwitchButton(b) => Some(b),
            _ => None,
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Bitmap(b) => {
                b.scale = None;
                b.transparency = b.original_transparency;
                b.decode_offset = XYPosition::default();
            }
            Self::LineArt(l) | Self::Rectangle(l) => l.reset(),
            Self::DynamicLineArt(d) => {
                d.line_art.reset();
                d.drawing.clear();
            }
            Self::Hotspot(b) | Self::PushButton(b) | Self::SwitchButton(b) => {
                b.selected = false;
                b.label = b.original_label.clone();
            }
            Self::Text(t) => t.reset(),
            Self::EntryField(e) => {
                e.text.reset();
                e.interactible.reset();
                e.entry_point = 0;
            }
            Self::HyperText(h) => {
                h.text.reset();
                h.interactible.reset();
                h.focus_position = 0;
                h.last_anchor_fired = OctetString::new();
            }
            Self::Slider(s) => s.reset(),
            Self::Video(v) => {
                v.scale = None;
                v.decode_offset = XYPosition::default();
            }
            Self::RtGraphics(_) => {}
        }
    }

    fn snapshot(&mut self) {
        match self {
            Self::Bitmap(b) => b.original_transparency = b.transparency,
            Self::LineArt(l) | Self::Rectangle(l) => l.snapshot(),
            Self::DynamicLineArt(d) => d.line_art.snapshot(),
            Self::Hotspot(b) | Self::PushButton(b) | Self::SwitchButton(b) => {
                b.original_label = b.label.clone();
            }
            Self::Text(t) => t.snapshot(),
            Self::EntryField(e) => e.text.snapshot(),
            Self::HyperText(h) => h.text.snapshot(),
            Self::Slider(s) => s.snapshot(),
            Self::Video(_) | Self::RtGraphics(_) => {}
        }
    }
}

/// A visible object: shared geometry plus the concrete body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleObject {
    /// Geometry and palette
    pub common: VisibleState,
    /// Kind-specific state
    pub body:   VisibleBody,
}

impl VisibleObject {
    /// Visible at `position` with `box_size`
    pub fn new(position: XYPosition, box_size: BoxSize, body: VisibleBody) -> Self {
        Self { common: VisibleState::new(position, box_size), body }
    }

    /// Restore authored geometry and attributes
    pub fn reset(&mut self) {
        self.common.position = self.common.original_position;
        self.common.box_size = self.common.original_box_size;
        self.common.palette = self.common.original_palette.clone();
        self.body.reset();
    }

    /// Make the current geometry and attributes the authored ones
    pub fn snapshot(&mut self) {
        self.common.original_position = self.common.position;
        self.common.original_box_size = self.common.box_size;
        self.common.original_palette = self.common.palette.clone();
        self.body.snapshot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_geometry() {
        let mut bitmap = VisibleObject::new(
            XYPosition::new(10, 20),
            BoxSize::new(100, 50),
            VisibleBody::Bitmap(BitmapState::default()),
        );
        bitmap.common.position = XYPosition::new(0, 0);
        bitmap.common.box_size = BoxSize::new(1, 1);
        bitmap.reset();
        assert_eq!(bitmap.common.region(), Region::new(XYPosition::new(10, 20), BoxSize::new(100, 50)));
    }

    #[test]
    fn test_slider_clamps() {
        let slider = SliderState::new(0, 10, 2);
        assert_eq!(slider.clamp(-3), 0);
        assert_eq!(slider.clamp(11), 10);
        assert_eq!(slider.clamp(4), 4);
    }

    #[test]
    fn test_dynamic_line_art_reset_clears_drawing() {
        let mut art = VisibleBody::DynamicLineArt(DynamicLineArtState::default());
        if let VisibleBody::DynamicLineArt(d) = &mut art {
            d.drawing.push(DrawCommand::Line { from: XYPosition::new(0, 0), to: XYPosition::new(5, 5) });
            d.line_art.line_width = 4;
        }
        art.reset();
        assert_eq!(art.line_art().map(|l| l.line_width), Some(1));
        assert!(matches!(&art, VisibleBody::DynamicLineArt(d) if d.drawing.is_empty()));
    }
}

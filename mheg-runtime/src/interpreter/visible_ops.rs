// MHEG - mheg-runtime
// Module: Visible actions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Actions on visibles: the display stack, geometry and the per-kind
//! attributes of bitmaps, line art, text, buttons, interactibles, sliders
//! and video.
//!
//! A change to something on screen redraws the object's region if it is
//! running. Getters write into the caller's variables and never redraw.

use mheg_error::{codes, kinds, Error, Result};
use mheg_foundation::{BoxSize, Colour, EventType, GroupId, ObjectReference, OctetString, XYPosition};
use mheg_instructions::{ActionKind, ArcParameters, NewColour, NewFont, Point, PointVariables};

use crate::engine::Engine;
use crate::object::{
    ButtonState, DrawCommand, DynamicLineArtState, FontRef, LineArtState, MhegObject, SliderState, TextState,
    VisibleBody, VisibleObject,
};
use crate::registry::ObjectId;

impl Engine {
    pub(super) fn execute_visible_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        use ActionKind as A;
        match kind {
            A::BringToFront | A::SendToBack | A::PutBefore { .. } | A::PutBehind { .. } => self.restack(id, kind, gid),
            A::SetPosition(point) => {
                let position = self.point(point, gid);
                // old and new region both need repainting
                self.redraw_object(id);
                self.visible_mut(id)?.common.position = position;
                self.redraw_object(id);
                Ok(())
            }
            A::GetPosition(vars) => {
                let position = self.visible(id)?.common.position;
                self.set_point(vars, gid, position);
                Ok(())
            }
            A::SetBoxSize { x_size, y_size } => {
                let size = BoxSize::new(self.get(x_size, gid), self.get(y_size, gid));
                if size.width < 0 || size.height < 0 {
                    return Err(Error::parameter_error(codes::INVALID_GEOMETRY, "Negative box size"));
                }
                self.redraw_object(id);
                self.visible_mut(id)?.common.box_size = size;
                self.redraw_object(id);
                Ok(())
            }
            A::GetBoxSize(vars) => {
                let size = self.visible(id)?.common.box_size;
                self.set_point(vars, gid, XYPosition::new(size.width, size.height));
                Ok(())
            }
            A::SetPaletteRef { palette } => {
                let palette = ObjectReference::External(self.absolute_address(&self.get(palette, gid), gid));
                self.visible_mut(id)?.common.palette = Some(palette);
                self.redraw_object(id);
                Ok(())
            }
            A::ScaleBitmap { .. }
            | A::SetTransparency { .. }
            | A::SetBitmapDecodeOffset(_)
            | A::GetBitmapDecodeOffset(_)
            | A::ScaleVideo { .. }
            | A::SetVideoDecodeOffset(_)
            | A::GetVideoDecodeOffset(_) => self.execute_picture_op(id, kind, gid),
            A::SetLineWidth { .. }
            | A::SetLineStyle { .. }
            | A::SetLineColour { .. }
            | A::SetFillColour { .. }
            | A::GetLineWidth { .. }
            | A::GetLineStyle { .. }
            | A::GetLineColour { .. }
            | A::GetFillColour { .. }
            | A::DrawArc(_)
            | A::DrawSector(_)
            | A::DrawLine { .. }
            | A::DrawOval { .. }
            | A::DrawPolygon { .. }
            | A::DrawPolyline { .. }
            | A::DrawRectangle { .. }
            | A::Clear => self.execute_line_art_op(id, kind, gid),
            A::GetTextContent { .. }
            | A::GetTextData { .. }
            | A::SetFontRef { .. }
            | A::SetTextColour { .. }
            | A::SetBackgroundColour { .. }
            | A::SetFontAttributes { .. }
            | A::GetEntryPoint { .. }
            | A::SetEntryPoint { .. }
            | A::GetOverwriteMode { .. }
            | A::SetOverwriteMode { .. }
            | A::GetLastAnchorFired { .. }
            | A::GetFocusPosition { .. }
            | A::SetFocusPosition { .. } => self.execute_text_op(id, kind, gid),
            A::Select | A::Deselect | A::Toggle | A::GetSelectionStatus { .. } | A::GetLabel { .. } | A::SetLabel { .. } => {
                self.execute_button_op(id, kind, gid)
            }
            A::SetHighlightStatus { .. }
            | A::GetHighlightStatus { .. }
            | A::SetInteractionStatus { .. }
            | A::GetInteractionStatus { .. } => self.execute_interactible_op(id, kind, gid),
            A::SetSliderValue { .. }
            | A::GetSliderValue { .. }
            | A::Step { .. }
            | A::SetSliderParameters { .. }
            | A::SetPortion { .. }
            | A::GetPortion { .. } => self.execute_slider_op(id, kind, gid),
            _ => Err(Error::UNEXPECTED_TARGET),
        }
    }

    // ---------------------------------------------------------------------
    // Display stack

    /// Move `id` on the display stack and tell the display.
    ///
    /// Objects that are not running are not on the stack; moving them does
    /// nothing.
    fn restack(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        let address = self.address_of(id).ok_or_else(kinds::stale_handle)?;
        let reference = match kind {
            ActionKind::PutBefore { reference_visible } | ActionKind::PutBehind { reference_visible } => {
                let reference = self.get(reference_visible, gid);
                let Some(reference) = self.find_object(&reference, gid) else { return Ok(()) };
                Some(reference)
            }
            _ => None,
        };
        let Some(from) = self.display_stack.iter().position(|&visible| visible == id) else {
            self.logger.debug(&address, "Not on the display stack");
            return Ok(());
        };
        if reference == Some(id) {
            return Ok(());
        }

        match (kind, reference) {
            (ActionKind::BringToFront, _) => {
                self.display_stack.remove(from);
                self.display_stack.push(id);
                self.display.bring_to_front(&address);
            }
            (ActionKind::SendToBack, _) => {
                self.display_stack.remove(from);
                self.display_stack.insert(0, id);
                self.display.send_to_back(&address);
            }
            (_, Some(reference)) => {
                let reference_address = self.address_of(reference).ok_or_else(kinds::stale_handle)?;
                if !self.display_stack.contains(&reference) {
                    return Err(Error::parameter_error(codes::INVALID_INDEX, "Reference visible is not on the display stack"));
                }
                self.display_stack.remove(from);
                let at = self.display_stack.iter().position(|&visible| visible == reference).unwrap_or(0);
                if matches!(kind, ActionKind::PutBefore { .. }) {
                    self.display_stack.insert(at + 1, id);
                    self.display.put_before(&address, &reference_address);
                } else {
                    self.display_stack.insert(at, id);
                    self.display.put_behind(&address, &reference_address);
                }
            }
            _ => return Err(Error::UNEXPECTED_TARGET),
        }
        self.redraw_object(id);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Bitmap and video

    fn execute_picture_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        match kind {
            ActionKind::ScaleBitmap { x_scale, y_scale } | ActionKind::ScaleVideo { x_scale, y_scale } => {
                let scale = BoxSize::new(self.get(x_scale, gid), self.get(y_scale, gid));
                match &mut self.visible_mut(id)?.body {
                    VisibleBody::Bitmap(bitmap) => bitmap.scale = Some(scale),
                    VisibleBody::Video(video) => video.scale = Some(scale),
                    _ => return Err(Error::UNEXPECTED_TARGET),
                }
            }
            ActionKind::SetTransparency { value } => {
                let transparency = self.get(value, gid).clamp(0, 100);
                match &mut self.visible_mut(id)?.body {
                    VisibleBody::Bitmap(bitmap) => bitmap.transparency = transparency,
                    _ => return Err(Error::UNEXPECTED_TARGET),
                }
            }
            ActionKind::SetBitmapDecodeOffset(point) | ActionKind::SetVideoDecodeOffset(point) => {
                let offset = self.point(point, gid);
                match &mut self.visible_mut(id)?.body {
                    VisibleBody::Bitmap(bitmap) => bitmap.decode_offset = offset,
                    VisibleBody::Video(video) => video.decode_offset = offset,
                    _ => return Err(Error::UNEXPECTED_TARGET),
                }
            }
            ActionKind::GetBitmapDecodeOffset(vars) | ActionKind::GetVideoDecodeOffset(vars) => {
                let offset = match &self.visible(id)?.body {
                    VisibleBody::Bitmap(bitmap) => bitmap.decode_offset,
                    VisibleBody::Video(video) => video.decode_offset,
                    _ => return Err(Error::UNEXPECTED_TARGET),
                };
                self.set_point(vars, gid, offset);
                return Ok(());
            }
            _ => return Err(Error::UNEXPECTED_TARGET),
        }
        self.redraw_object(id);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Line art

    fn execute_line_art_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        match kind {
            ActionKind::SetLineWidth { value } => {
                let width = self.get(value, gid);
                self.line_art_mut(id)?.line_width = width;
            }
            ActionKind::SetLineStyle { value } => {
                let style = self.get(value, gid);
                self.line_art_mut(id)?.line_style = style;
            }
            ActionKind::SetLineColour { colour } => {
                let colour = self.colour(colour, gid);
                self.line_art_mut(id)?.line_colour = colour;
            }
            ActionKind::SetFillColour { colour } => {
                let colour = colour.as_ref().map(|colour| self.colour(colour, gid));
                self.line_art_mut(id)?.fill_colour = colour;
            }
            ActionKind::GetLineWidth { var } => {
                let width = self.line_art(id)?.line_width;
                self.set_output(var, gid, width);
                return Ok(());
            }
            ActionKind::GetLineStyle { var } => {
                let style = self.line_art(id)?.line_style;
                self.set_output(var, gid, style);
                return Ok(());
            }
            ActionKind::GetLineColour { var } => {
                let colour = self.line_art(id)?.line_colour.clone();
                self.colour_output(var, gid, Some(colour));
                return Ok(());
            }
            ActionKind::GetFillColour { var } => {
                let colour = self.line_art(id)?.fill_colour.clone();
                self.colour_output(var, gid, colour);
                return Ok(());
            }
            ActionKind::Clear => self.drawing_mut(id)?.drawing.clear(),
            _ => {
                let command = self.draw_command(kind, gid)?;
                self.drawing_mut(id)?.drawing.push(command);
            }
        }
        self.redraw_object(id);
        Ok(())
    }

    fn draw_command(&self, kind: &ActionKind, gid: &GroupId) -> Result<DrawCommand> {
        let arc = |params: &ArcParameters| {
            (
                self.point(&params.origin, gid),
                BoxSize::new(self.get(&params.ellipse_width, gid), self.get(&params.ellipse_height, gid)),
                self.get(&params.start_angle, gid),
                self.get(&params.arc_angle, gid),
            )
        };
        let points = |points: &[Point]| points.iter().map(|point| self.point(point, gid)).collect::<Vec<_>>();
        Ok(match kind {
            ActionKind::DrawArc(params) => {
                let (origin, size, start_angle, arc_angle) = arc(params);
                DrawCommand::Arc { origin, size, start_angle, arc_angle }
            }
            ActionKind::DrawSector(params) => {
                let (origin, size, start_angle, arc_angle) = arc(params);
                DrawCommand::Sector { origin, size, start_angle, arc_angle }
            }
            ActionKind::DrawLine { from, to } => DrawCommand::Line { from: self.point(from, gid), to: self.point(to, gid) },
            ActionKind::DrawOval { origin, ellipse_width, ellipse_height } => DrawCommand::Oval {
                origin: self.point(origin, gid),
                size:   BoxSize::new(self.get(ellipse_width, gid), self.get(ellipse_height, gid)),
            },
            ActionKind::DrawPolygon { points: corners } => DrawCommand::Polygon(points(corners)),
            ActionKind::DrawPolyline { points: corners } => DrawCommand::Polyline(points(corners)),
            ActionKind::DrawRectangle { from, to } => {
                DrawCommand::Rectangle { from: self.point(from, gid), to: self.point(to, gid) }
            }
            _ => return Err(Error::UNEXPECTED_TARGET),
        })
    }

    // ---------------------------------------------------------------------
    // Text, entry fields and hypertext

    fn execute_text_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        match kind {
            ActionKind::GetTextContent { var } | ActionKind::GetTextData { var } => {
                let text = self.visible(id)?.body.text().map(|text| text.data.clone()).ok_or(Error::UNEXPECTED_TARGET)?;
                self.set_output(var, gid, text);
                return Ok(());
            }
            ActionKind::SetFontRef { font } => {
                let font = match font {
                    NewFont::Name(name) => FontRef::Name(self.get(name, gid)),
                    NewFont::Reference(reference) => {
                        FontRef::Reference(ObjectReference::External(self.absolute_address(&self.get(reference, gid), gid)))
                    }
                };
                self.text_mut(id)?.font = font;
            }
            ActionKind::SetTextColour { colour } => {
                let colour = self.colour(colour, gid);
                self.text_mut(id)?.text_colour = colour;
            }
            ActionKind::SetBackgroundColour { colour } => {
                let colour = self.colour(colour, gid);
                self.text_mut(id)?.background_colour = colour;
            }
            ActionKind::SetFontAttributes { attributes } => {
                let attributes = self.get(attributes, gid);
                self.text_mut(id)?.font_attributes = attributes;
            }
            ActionKind::GetEntryPoint { var } => {
                let VisibleBody::EntryField(field) = &self.visible(id)?.body else { return Err(Error::UNEXPECTED_TARGET) };
                let entry_point = field.entry_point;
                self.set_output(var, gid, entry_point);
                return Ok(());
            }
            ActionKind::SetEntryPoint { value } => {
                let value = self.get(value, gid);
                let VisibleBody::EntryField(field) = &mut self.visible_mut(id)?.body else {
                    return Err(Error::UNEXPECTED_TARGET);
                };
                let end = i32::try_from(field.text.data.len()).unwrap_or(i32::MAX);
                field.entry_point = value.clamp(0, end);
            }
            ActionKind::GetOverwriteMode { var } => {
                let VisibleBody::EntryField(field) = &self.visible(id)?.body else { return Err(Error::UNEXPECTED_TARGET) };
                let overwrite = field.overwrite_mode;
                self.set_output(var, gid, overwrite);
                return Ok(());
            }
            ActionKind::SetOverwriteMode { value } => {
                let value = self.get(value, gid);
                let VisibleBody::EntryField(field) = &mut self.visible_mut(id)?.body else {
                    return Err(Error::UNEXPECTED_TARGET);
                };
                field.overwrite_mode = value;
                return Ok(());
            }
            ActionKind::GetLastAnchorFired { var } => {
                let VisibleBody::HyperText(text) = &self.visible(id)?.body else { return Err(Error::UNEXPECTED_TARGET) };
                let anchor = text.last_anchor_fired.clone();
                self.set_output(var, gid, anchor);
                return Ok(());
            }
            ActionKind::GetFocusPosition { var } => {
                let VisibleBody::HyperText(text) = &self.visible(id)?.body else { return Err(Error::UNEXPECTED_TARGET) };
                let focus = text.focus_position;
                self.set_output(var, gid, focus);
                return Ok(());
            }
            ActionKind::SetFocusPosition { value } => {
                let value = self.get(value, gid);
                let VisibleBody::HyperText(text) = &mut self.visible_mut(id)?.body else {
                    return Err(Error::UNEXPECTED_TARGET);
                };
                text.focus_position = value;
            }
            _ => return Err(Error::UNEXPECTED_TARGET),
        }
        self.redraw_object(id);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Buttons

    fn execute_button_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        match kind {
            ActionKind::Select | ActionKind::Deselect | ActionKind::Toggle => {
                let button = self.button_mut(id)?;
                let selected = match kind {
                    ActionKind::Select => true,
                    ActionKind::Deselect => false,
                    _ => !button.selected,
                };
                if button.selected == selected {
                    return Ok(());
                }
                button.selected = selected;
                self.redraw_object(id);
                let event = if selected { EventType::IsSelected } else { EventType::IsDeselected };
                self.raise_sync(id, event, None);
            }
            ActionKind::GetSelectionStatus { var } => {
                let selected = button(&self.visible(id)?.body)?.selected;
                self.set_output(var, gid, selected);
            }
            ActionKind::GetLabel { var } => {
                let label = button(&self.visible(id)?.body)?.label.clone();
                self.set_output(var, gid, label);
            }
            ActionKind::SetLabel { label } => {
                let label = self.get(label, gid);
                self.button_mut(id)?.label = label;
                self.redraw_object(id);
            }
            _ => return Err(Error::UNEXPECTED_TARGET),
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Interactibles

    fn execute_interactible_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        match kind {
            ActionKind::SetHighlightStatus { value } => {
                let value = self.get(value, gid);
                let state = self.visible_mut(id)?.body.interactible_mut().ok_or(Error::UNEXPECTED_TARGET)?;
                if state.highlight_status == value {
                    return Ok(());
                }
                state.highlight_status = value;
                self.redraw_object(id);
                let event = if value { EventType::HighlightOn } else { EventType::HighlightOff };
                self.raise_sync(id, event, None);
            }
            ActionKind::SetInteractionStatus { value } => {
                let value = self.get(value, gid);
                let state = self.visible_mut(id)?.body.interactible_mut().ok_or(Error::UNEXPECTED_TARGET)?;
                let was = core::mem::replace(&mut state.interaction_status, value);
                if was && !value {
                    self.raise_async(id, EventType::InteractionCompleted, None);
                }
            }
            ActionKind::GetHighlightStatus { var } => {
                let highlight = self.visible(id)?.body.interactible().ok_or(Error::UNEXPECTED_TARGET)?.highlight_status;
                self.set_output(var, gid, highlight);
            }
            ActionKind::GetInteractionStatus { var } => {
                let interacting =
                    self.visible(id)?.body.interactible().ok_or(Error::UNEXPECTED_TARGET)?.interaction_status;
                self.set_output(var, gid, interacting);
            }
            _ => return Err(Error::UNEXPECTED_TARGET),
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Sliders

    fn execute_slider_op(&mut self, id: ObjectId, kind: &ActionKind, gid: &GroupId) -> Result<()> {
        match kind {
            ActionKind::SetSliderValue { value } => {
                let value = self.get(value, gid);
                let slider = self.slider_mut(id)?;
                slider.value = slider.clamp(value);
                self.slider_moved(id);
            }
            ActionKind::Step { value } => {
                let steps = self.get(value, gid);
                let slider = self.slider_mut(id)?;
                let target = slider.value.saturating_add(steps.saturating_mul(slider.step_size));
                slider.value = slider.clamp(target);
                self.slider_moved(id);
            }
            ActionKind::SetSliderParameters { min, max, step } => {
                let (min, max, step) = (self.get(min, gid), self.get(max, gid), self.get(step, gid));
                let slider = self.slider_mut(id)?;
                slider.min_value = min;
                slider.max_value = max;
                slider.step_size = step;
                slider.value = slider.clamp(slider.value);
                self.redraw_object(id);
            }
            ActionKind::SetPortion { value } => {
                let portion = self.get(value, gid);
                self.slider_mut(id)?.portion = portion;
                self.redraw_object(id);
            }
            ActionKind::GetSliderValue { var } => {
                let value = self.slider(id)?.value;
                self.set_output(var, gid, value);
            }
            ActionKind::GetPortion { var } => {
                let portion = self.slider(id)?.portion;
                self.set_output(var, gid, portion);
            }
            _ => return Err(Error::UNEXPECTED_TARGET),
        }
        Ok(())
    }

    fn slider_moved(&mut self, id: ObjectId) {
        self.redraw_object(id);
        self.raise_async(id, EventType::SliderValueChanged, None);
    }

    // ---------------------------------------------------------------------
    // Parameter helpers

    pub(super) fn point(&self, point: &Point, gid: &GroupId) -> XYPosition {
        XYPosition::new(self.get(&point.x, gid), self.get(&point.y, gid))
    }

    fn set_point(&mut self, vars: &PointVariables, gid: &GroupId, point: XYPosition) {
        self.set_output(&vars.x_var, gid, point.x);
        self.set_output(&vars.y_var, gid, point.y);
    }

    fn colour(&self, colour: &NewColour, gid: &GroupId) -> Colour {
        match colour {
            NewColour::Index(index) => Colour::Index(self.get(index, gid)),
            NewColour::Absolute(octets) => Colour::Absolute(self.get(octets, gid)),
        }
    }

    /// Write a colour into an integer (index) or octet-string (absolute)
    /// variable; a transparent fill reads as an empty string
    fn colour_output(&mut self, var: &ObjectReference, gid: &GroupId, colour: Option<Colour>) {
        match colour {
            Some(Colour::Index(index)) => {
                self.set_output(var, gid, index);
            }
            Some(Colour::Absolute(octets)) => {
                self.set_output(var, gid, octets);
            }
            None => {
                self.set_output(var, gid, OctetString::new());
            }
        }
    }

    // ---------------------------------------------------------------------
    // Accessors

    fn visible(&self, id: ObjectId) -> Result<&VisibleObject> {
        self.registry.get(id).and_then(MhegObject::visible).ok_or(Error::UNEXPECTED_TARGET)
    }

    fn line_art(&self, id: ObjectId) -> Result<&LineArtState> {
        self.visible(id)?.body.line_art().ok_or(Error::UNEXPECTED_TARGET)
    }

    fn line_art_mut(&mut self, id: ObjectId) -> Result<&mut LineArtState> {
        self.visible_mut(id)?.body.line_art_mut().ok_or(Error::UNEXPECTED_TARGET)
    }

    fn drawing_mut(&mut self, id: ObjectId) -> Result<&mut DynamicLineArtState> {
        match &mut self.visible_mut(id)?.body {
            VisibleBody::DynamicLineArt(art) => Ok(art),
            _ => Err(Error::UNEXPECTED_TARGET),
        }
    }

    fn text_mut(&mut self, id: ObjectId) -> Result<&mut TextState> {
        self.visible_mut(id)?.body.text_mut().ok_or(Error::UNEXPECTED_TARGET)
    }

    fn button_mut(&mut self, id: ObjectId) -> Result<&mut ButtonState> {
        self.visible_mut(id)?.body.button_mut().ok_or(Error::UNEXPECTED_TARGET)
    }

    fn slider(&self, id: ObjectId) -> Result<&SliderState> {
        match &self.visible(id)?.body {
            VisibleBody::Slider(slider) => Ok(slider),
            _ => Err(Error::UNEXPECTED_TARGET),
        }
    }

    fn slider_mut(&mut self, id: ObjectId) -> Result<&mut SliderState> {
        match &mut self.visible_mut(id)?.body {
            VisibleBody::Slider(slider) => Ok(slider),
            _ => Err(Error::UNEXPECTED_TARGET),
        }
    }
}

fn button(body: &VisibleBody) -> Result<&ButtonState> {
    match body {
        VisibleBody::Hotspot(button) | VisibleBody::PushButton(button) | VisibleBody::SwitchButton(button) => Ok(button),
        _ => Err(Error::UNEXPECTED_TARGET),
    }
}

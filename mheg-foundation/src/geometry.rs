// MHEG - mheg-foundation
// Module: Geometry and colours
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Positions, sizes, regions and colours of visibles.

use core::fmt;

use crate::octet_string::OctetString;

/// Position on the scene coordinate system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct XYPosition {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl XYPosition {
    /// New position
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoxSize {
    /// Width
    pub width:  i32,
    /// Height
    pub height: i32,
}

impl BoxSize {
    /// New size
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Rectangle to redraw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Region {
    /// Top-left corner
    pub origin: XYPosition,
    /// Extent
    pub size:   BoxSize,
}

impl Region {
    /// Region covering `size` from the origin
    #[must_use]
    pub const fn full(size: BoxSize) -> Self {
        Self { origin: XYPosition::new(0, 0), size }
    }

    /// Region of a visible at `origin` with `size`
    #[must_use]
    pub const fn new(origin: XYPosition, size: BoxSize) -> Self {
        Self { origin, size }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.origin.x, self.origin.y, self.size.width, self.size.height
        )
    }
}

/// Colour: a palette index or an absolute RGBT octet string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Colour {
    /// Index into the active palette
    Index(i32),
    /// Absolute colour bytes
    Absolute(OctetString),
}

impl Default for Colour {
    fn default() -> Self {
        Self::Index(0)
    }
}

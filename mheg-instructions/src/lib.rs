// MHEG - mheg-instructions
// Module: Elementary actions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![forbid(unsafe_code)] // Rule 2

//! Elementary actions for the MHEG-5 runtime engine.
//!
//! This crate describes actions; it does not execute them. The runtime's
//! interpreter owns execution.
//!
//! # Architecture
//!
//! - `opcode`: the closed set of 122 opcodes with their decoder tags
//! - `action`: typed actions, one parameter shape per opcode
//! - `targets`: the per-opcode legal-target-kind table

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod action;
pub mod opcode;
pub mod targets;

pub use mheg_error::{Error, Result};

pub use crate::{
    action::{
        ActionKind, ActionList, ArcParameters, ElementaryAction, NewColour, NewContent, NewFont,
        NewTimer, Point, PointVariables,
    },
    opcode::Opcode,
    targets::TargetRule,
};

// MHEG - mheg-runtime
// Module: MHEG-5 runtime engine
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! MHEG-5 runtime engine.
//!
//! The [`Engine`] owns every live object of the running application and
//! scene in a [`Registry`] keyed by global address. It drives the
//! Prepare / Activate / Deactivate / Destroy lifecycle, matches events
//! against links and executes the elementary actions links and groups
//! carry.
//!
//! Content arrives through a [`ContentLoader`] and presentation changes
//! leave through a [`Display`]; both are traits so that a receiver can
//! plug in its carousel and its graphics plane.
//!
//! ```
//! use mheg_runtime::{Engine, EngineConfig, GroupDescriptor};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.load_application(GroupDescriptor::application("~//startup")).unwrap();
//! assert!(engine.active_application().is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use mheg_error::{Error, Result};

pub mod config;
pub mod content;
pub mod descriptor;
pub mod display;
pub mod engine;
pub mod events;
mod interpreter;
mod lifecycle;
pub mod object;
pub mod persistent;
pub mod programs;
pub mod registry;
mod resolve;
pub mod timers;

pub use config::{EngineConfig, EngineFeature, FeatureRule, DEFAULT_RECEIVER_IDENTITY};
pub use content::{ContentLoader, ContentStatus, MemoryContentLoader};
pub use descriptor::{GroupDescriptor, GroupKind, ItemBody, ItemDescriptor};
pub use display::{Display, DisplayCall, NullDisplay, RecordingDisplay};
pub use engine::{Engine, QuitRequest};
pub use events::{Event, EventRecord};
pub use object::{MhegObject, ObjectBody};
pub use persistent::PersistentStore;
pub use programs::{find_resident_program, ResidentProgram, RESIDENT_PROGRAMS};
pub use registry::{ObjectId, Registry};

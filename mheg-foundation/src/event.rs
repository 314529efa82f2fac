// MHEG - mheg-foundation
// Module: Events
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Event types and event data.

use core::fmt;

use mheg_error::{kinds, Result};

use crate::octet_string::OctetString;

macro_rules! event_types {
    ($( $(#[$doc:meta])* $name:ident = $code:literal, $async_:literal; )*) => {
        /// Event type raised by runtime objects
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum EventType {
            $( $(#[$doc])* $name = $code, )*
        }

        impl EventType {
            /// Every event type, in code order
            pub const ALL: &'static [Self] = &[$(Self::$name),*];

            /// Name as authored
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)*
                }
            }

            /// True for events that are queued rather than matched at once
            /// when raised through SendEvent
            #[must_use]
            pub const fn is_async(self) -> bool {
                match self {
                    $(Self::$name => $async_,)*
                }
            }
        }
    };
}

event_types! {
    /// Object became available
    IsAvailable = 1, false;
    /// Content finished loading
    ContentAvailable = 2, true;
    /// Object was destroyed
    IsDeleted = 3, false;
    /// Object started running
    IsRunning = 4, false;
    /// Object stopped running
    IsStopped = 5, false;
    /// Key press
    UserInput = 6, true;
    /// Hypertext anchor fired
    AnchorFired = 7, true;
    /// Group timer fired
    TimerFired = 8, true;
    /// Forked program finished
    AsynchStopped = 9, true;
    /// Interaction with an interactible ended
    InteractionCompleted = 10, true;
    /// Token left an item
    TokenMovedFrom = 11, false;
    /// Token reached an item
    TokenMovedTo = 12, false;
    /// Stream event marker reached
    StreamEvent = 13, true;
    /// Stream started presenting
    StreamPlaying = 14, true;
    /// Stream stopped presenting
    StreamStopped = 15, true;
    /// Stream counter trigger reached
    CounterTrigger = 16, true;
    /// Highlight switched on
    HighlightOn = 17, false;
    /// Highlight switched off
    HighlightOff = 18, false;
    /// Cursor entered the object
    CursorEnter = 19, true;
    /// Cursor left the object
    CursorLeave = 20, true;
    /// Button selected
    IsSelected = 21, false;
    /// Button deselected
    IsDeselected = 22, false;
    /// TestVariable result
    TestEvent = 23, false;
    /// First list item presented
    FirstItemPresented = 24, false;
    /// Last list item presented
    LastItemPresented = 25, false;
    /// List scrolled to its head
    HeadItems = 26, false;
    /// List scrolled to its tail
    TailItems = 27, false;
    /// List item selected
    ItemSelected = 28, false;
    /// List item deselected
    ItemDeselected = 29, false;
    /// Entry field full
    EntryFieldFull = 30, true;
    /// Receiver-specific engine event
    EngineEvent = 31, true;
    /// Focus moved between hypertext anchors
    FocusMoved = 32, true;
    /// Slider value changed
    SliderValueChanged = 33, true;
}

impl EventType {
    /// Event type for a decoder code.
    ///
    /// # Errors
    ///
    /// Returns a fatal `ClosedSet` error for a code outside 1..=33.
    pub fn from_code(code: u32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|event| event.code() == code)
            .ok_or_else(kinds::unknown_event_type)
    }

    /// Decoder code
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Data carried by an event, and matched by link conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventData {
    /// Boolean data
    Boolean(bool),
    /// Integer data
    Integer(i32),
    /// Octet-string data
    OctetString(OctetString),
}

impl fmt::Display for EventData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::OctetString(v) => write!(f, "\"{v}\""),
        }
    }
}

impl From<bool> for EventData {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for EventData {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<OctetString> for EventData {
    fn from(value: OctetString) -> Self {
        Self::OctetString(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_dense() {
        assert_eq!(EventType::ALL.len(), 33);
        for (index, event) in EventType::ALL.iter().enumerate() {
            assert_eq!(event.code() as usize, index + 1);
            assert_eq!(EventType::from_code(event.code()), Ok(*event));
        }
    }

    #[test]
    fn test_unknown_code_is_fatal() {
        assert!(EventType::from_code(0).unwrap_err().is_fatal());
        assert!(EventType::from_code(34).unwrap_err().is_fatal());
    }

    #[test]
    fn test_async_flags() {
        assert!(!EventType::IsAvailable.is_async());
        assert!(EventType::ContentAvailable.is_async());
        assert!(EventType::TimerFired.is_async());
        assert!(!EventType::TestEvent.is_async());
        assert!(EventType::SliderValueChanged.is_async());
    }
}

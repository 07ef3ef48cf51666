// Copyright (C) 2025 Michael Herstine <sp1ff@pobox.com>
//
// This file is part of journal-logger.
//
// journal-logger is free software: you can redistribute it and/or modify it under the terms of the
// GNU General Public License as published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// mpdpopm is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even
// the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details.
//
// You should have received a copy of the GNU General Public License along with mpdpopm.  If not,
// see <http://www.gnu.org/licenses/>.

//! The event: one message, resolved & ready for dispatch.

use crate::attrs::AttrSet;
use crate::message_id::MESSAGE_ID;
use crate::severity::Severity;

/// The composite a sink receives: message text, severity & the attribute set (which carries the
/// message identifier under its canonical key). Built fresh per message, consumed once by the
/// dispatcher.
#[derive(Clone, Debug)]
pub struct Event {
    pub message: String,
    pub severity: Severity,
    pub attrs: AttrSet,
}

impl Event {
    pub fn new(message: String, severity: Severity, attrs: AttrSet) -> Event {
        Event {
            message,
            severity,
            attrs,
        }
    }
    /// The identifier correlating this event across sinks.
    pub fn message_id(&self) -> Option<&str> {
        self.attrs.get(MESSAGE_ID).map(|value| value.raw())
    }
}

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

//! The systemd journal sink.
//!
//! journald accepts log entries over a Unix datagram socket speaking the [native protocol]: a
//! sequence of `KEY=value\n` fields, with a length-prefixed variant (`KEY\n` + little-endian
//! `u64` byte count + value + `\n`) for values that themselves embed a newline. Field names
//! are upper-case by [convention]; we upper-case every attribute key before submission, and the
//! attribute values travel as their verbatim text -- the journal is not a typed sink.
//!
//! [native protocol]: https://systemd.io/JOURNAL_NATIVE_PROTOCOL/
//! [convention]: https://www.freedesktop.org/software/systemd/man/systemd.journal-fields.html
//!
//! There is no configuration flag for this sink; it's active exactly when the journal socket
//! accepts a connection at startup (a runtime probe, in the manner of `logger(1)` falling back
//! when no syslogd is listening).

use crate::error::{Error, Result};
use crate::event::Event;
use crate::severity::Severity;
use crate::sink::Sink;

use backtrace::Backtrace;

use std::os::unix::net::UnixDatagram;
use std::path::Path;

/// Where journald listens for native-protocol datagrams.
pub const JOURNAL_SOCKET: &str = "/run/systemd/journal/socket";

/// The journal's priority scale. The enumeration values duplicate the `PRIORITY=` numbering
/// (which is `<syslog.h>`'s, `LOG_EMERG` = 0 through `LOG_DEBUG` = 7).
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Priority {
    /// system is unusable
    PRI_EMERG = 0,
    /// action must be taken immediately
    PRI_ALERT = 1,
    /// critical conditions
    PRI_CRIT = 2,
    /// error conditions
    PRI_ERR = 3,
    /// warning conditions
    PRI_WARNING = 4,
    /// normal, but significant condition
    PRI_NOTICE = 5,
    /// informational message
    PRI_INFO = 6,
    /// debug-level message
    PRI_DEBUG = 7,
}

impl std::convert::From<Severity> for Priority {
    /// The fixed severity translation table for this sink.
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => Priority::PRI_DEBUG,
            Severity::Info => Priority::PRI_INFO,
            Severity::Warning => Priority::PRI_WARNING,
            Severity::Error => Priority::PRI_ERR,
            Severity::Critical => Priority::PRI_CRIT,
            Severity::Emergency => Priority::PRI_EMERG,
        }
    }
}

/// Append one field in the native protocol's encoding.
fn put_field(buf: &mut Vec<u8>, key: &str, value: &str) {
    use bytes::BufMut;
    buf.put_slice(key.as_bytes());
    if value.contains('\n') {
        buf.put_u8(b'\n');
        buf.put_u64_le(value.len() as u64);
        buf.put_slice(value.as_bytes());
    } else {
        buf.put_u8(b'=');
        buf.put_slice(value.as_bytes());
    }
    buf.put_u8(b'\n');
}

/// Serialize `event` into one native-protocol datagram: `MESSAGE`, `PRIORITY`, then the
/// attributes (keys upper-cased, values verbatim).
pub fn serialize(event: &Event) -> Vec<u8> {
    let mut buf = Vec::new();
    put_field(&mut buf, "MESSAGE", &event.message);
    put_field(
        &mut buf,
        "PRIORITY",
        &format!("{}", Priority::from(event.severity) as u8),
    );
    for (key, value) in &event.attrs {
        put_field(&mut buf, &key.to_ascii_uppercase(), value.raw());
    }
    buf
}

/// Sending events to journald over its datagram socket.
pub struct JournalSink {
    socket: UnixDatagram,
}

impl JournalSink {
    /// Is there a journal service to talk to at all?
    pub fn available() -> bool {
        Path::new(JOURNAL_SOCKET).exists()
    }
    /// Construct a [`JournalSink`] connected to the system journal socket.
    pub fn system() -> Result<JournalSink> {
        JournalSink::connect(JOURNAL_SOCKET)
    }
    /// Construct a [`JournalSink`] connected to the datagram socket at `path`.
    pub fn connect<P: AsRef<Path>>(path: P) -> Result<JournalSink> {
        let socket = UnixDatagram::unbound().map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        socket.connect(path).map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        Ok(JournalSink { socket })
    }
}

impl Sink for JournalSink {
    fn name(&self) -> &'static str {
        "journal"
    }
    fn send(&mut self, event: &Event) -> Result<()> {
        self.socket
            .send(&serialize(event))
            .map_err(|err| Error::Transport {
                source: Box::new(err),
                back: Backtrace::new(),
            })?;
        Ok(())
    }
}

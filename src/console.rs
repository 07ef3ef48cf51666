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

//! The console/structured-output sink.
//!
//! Writes one line per event to its writer (standard error, in the binary). The default
//! rendering is a JSON object -- `level`, the typed attributes, `message` -- so the inferred
//! attribute types survive into anything consuming the stream. The plain rendering
//! (`--json=false`) is a timestamped single line for human eyes.
//!
//! This sink alone honors a minimum-severity filter (default [`Info`]; the binary lets the
//! `PRIORITY` environment variable override it): events ranking below the threshold are
//! dropped here and only here.
//!
//! [`Info`]: crate::severity::Severity::Info

use crate::error::{Error, Result};
use crate::event::Event;
use crate::severity::Severity;
use crate::sink::Sink;

use backtrace::Backtrace;
use chrono::prelude::*;

use std::io::Write;

/// Console sink over any writer; [`ConsoleSink::to_stderr`] is the one the binary uses.
pub struct ConsoleSink<W: Write> {
    writer: W,
    minimum: Severity,
    json: bool,
}

impl ConsoleSink<std::io::Stderr> {
    pub fn to_stderr(minimum: Severity, json: bool) -> Self {
        ConsoleSink::new(std::io::stderr(), minimum, json)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W, minimum: Severity, json: bool) -> Self {
        ConsoleSink {
            writer,
            minimum,
            json,
        }
    }
}

/// Render `event` as a single JSON object. Attribute order is the attribute set's key order;
/// the identifier rides along like any other attribute.
pub fn render_json(event: &Event) -> String {
    let mut map = serde_json::Map::new();
    map.insert(
        "level".to_owned(),
        serde_json::Value::String(event.severity.to_string()),
    );
    for (key, value) in &event.attrs {
        map.insert(key.clone(), value.to_json());
    }
    map.insert(
        "message".to_owned(),
        serde_json::Value::String(event.message.clone()),
    );
    serde_json::Value::Object(map).to_string()
}

/// Render `event` as a plain, timestamped line.
pub fn render_plain(event: &Event, timestamp: Option<DateTime<Utc>>) -> String {
    let mut line = format!(
        "{} {} {}",
        timestamp.unwrap_or_else(Utc::now).to_rfc3339(),
        event.severity,
        event.message
    );
    for (key, value) in &event.attrs {
        line.push_str(&format!(" {}={}", key, value.raw()));
    }
    line
}

impl<W: Write> Sink for ConsoleSink<W> {
    fn name(&self) -> &'static str {
        "console"
    }
    fn send(&mut self, event: &Event) -> Result<()> {
        if event.severity < self.minimum {
            return Ok(());
        }
        let line = if self.json {
            render_json(event)
        } else {
            render_plain(event, None)
        };
        writeln!(self.writer, "{}", line).map_err(|err| Error::Console {
            source: err,
            back: Backtrace::new(),
        })
    }
}

#[cfg(test)]
mod console_tests {
    use super::*;
    use crate::attrs::parse_pairs;
    use crate::diag::Diag;
    use crate::message_id;

    fn event_of(message: &str, severity: Severity, tokens: &[&str]) -> Event {
        let mut attrs =
            parse_pairs(&tokens.iter().map(|s| s.to_string()).collect::<Vec<_>>()).unwrap();
        message_id::assign(&mut attrs, &Diag::disabled());
        Event::new(message.to_owned(), severity, attrs)
    }

    #[test]
    fn test_json_rendering_preserves_types() {
        let event = event_of(
            "deployed",
            Severity::Warning,
            &["count=42", "ratio=3.14", "ok=true", "host=bree"],
        );
        let parsed: serde_json::Value = serde_json::from_str(&render_json(&event)).unwrap();
        assert_eq!(parsed["level"], "warning");
        assert_eq!(parsed["message"], "deployed");
        assert_eq!(parsed["count"], 42);
        assert_eq!(parsed["ratio"], 3.14);
        assert_eq!(parsed["ok"], true);
        assert_eq!(parsed["host"], "bree");
        assert!(parsed["MESSAGE_ID"].is_string());
    }

    #[test]
    fn test_plain_rendering() {
        let event = event_of("hello", Severity::Error, &["message_id=abc"]);
        let line = render_plain(&event, Some(std::time::UNIX_EPOCH.into()));
        assert_eq!(line, "1970-01-01T00:00:00+00:00 error hello MESSAGE_ID=abc");
    }

    #[test]
    fn test_minimum_severity_filter() {
        let mut buf = Vec::new();
        {
            let mut sink = ConsoleSink::new(&mut buf, Severity::Warning, true);
            sink.send(&event_of("too quiet", Severity::Info, &[]))
                .unwrap();
            sink.send(&event_of("loud enough", Severity::Error, &[]))
                .unwrap();
        }
        let written = String::from_utf8(buf).unwrap();
        assert!(!written.contains("too quiet"));
        assert!(written.contains("loud enough"));
        assert_eq!(written.lines().count(), 1);
    }
}

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
//! A `logger(1)` work-alike that turns free-text into structured events & fans them out to the
//! console and the [systemd] [journal].
//!
//! [systemd]: https://systemd.io/
//! [journal]: https://www.freedesktop.org/software/systemd/man/systemd-journald.service.html
//!
//! # Introduction
//!
//! The classic `logger` utility takes a message (an argument, or lines piped on standard
//! input), stamps it with a priority, and hands it to the system log. This crate does the same,
//! with two additions the original never had: trailing `key=value` tokens become a typed
//! attribute set attached to the event, and every event carries a `MESSAGE_ID` -- caller-supplied
//! or a freshly minted UUID -- so one logical event can be correlated across sinks.
//!
//! The pipeline is deliberately boring: resolve the message source, map the priority text to a
//! [`Severity`](severity::Severity), parse & type-infer the attributes, assign the identifier,
//! and dispatch the resulting [`Event`](event::Event) to whichever sinks are live. Sinks are
//! behind the [`Sink`](sink::Sink) trait; the console sink renders typed JSON on standard
//! error, the journal sink speaks journald's native datagram protocol. Each sink translates
//! [`Severity`](severity::Severity) into its own priority representation, and a failure in one
//! never blocks the other.
//!
//! All of it is synchronous & single-threaded: one invocation processes one bounded batch of
//! messages in arrival order and exits. Fatal conditions (no message source, a malformed
//! attribute token) propagate as [`Error`](error::Error) values to `main`, the only place that
//! terminates the process.
//!
//! # Usage
//!
//! ```text
//! $ logger -s -p user.warn "disk almost full" disk=/dev/sda2 used_pct=93.4
//! {"MESSAGE_ID":"0b21...","disk":"/dev/sda2","level":"warning","message":"disk almost full","used_pct":93.4}
//! ```
//!
//! With piped input, each line becomes one event and every positional argument is an attribute
//! token:
//!
//! ```text
//! $ journalctl -q -n 2 -o cat | logger -p daemon.err replayed=true
//! ```

pub mod attrs;
pub mod cli;
pub mod console;
pub mod diag;
pub mod error;
pub mod event;
pub mod input;
pub mod journal;
pub mod message_id;
pub mod severity;
pub mod sink;

use crate::attrs::AttrValue;
use crate::cli::Cli;
use crate::console::ConsoleSink;
use crate::diag::Diag;
use crate::error::Result;
use crate::event::Event;
use crate::input::Batch;
use crate::journal::JournalSink;
use crate::severity::Severity;
use crate::sink::Sink;

/// Environment variable overriding the console sink's minimum severity.
pub const PRIORITY_VAR: &str = "PRIORITY";
/// Environment variable whose value, when present, is injected as a `GROUP_ID` attribute on
/// every event in the batch. Kept independent of `MESSAGE_ID`: the one groups a batch, the
/// other names a single event.
pub const GROUP_ID_VAR: &str = "_GROUP_ID";

/// The batch driver: build & dispatch one [`Event`] per message, in arrival order.
///
/// The first fatal error aborts the whole batch (nothing is dispatched for the failing message
/// or any later one); sink-level delivery failures are contained inside
/// [`dispatch`](sink::dispatch) and do not surface here.
pub fn process(
    batch: &Batch,
    priority: &str,
    group_id: Option<&str>,
    sinks: &mut [Box<dyn Sink>],
    diag: &Diag,
) -> Result<()> {
    for message in &batch.messages {
        diag.note("run", &format!("processing message {:?}", message));

        let severity = Severity::resolve(priority, diag);
        let mut attrs = attrs::parse_pairs(&batch.attr_tokens)?;
        if let Some(value) = group_id {
            attrs.insert("GROUP_ID".to_owned(), AttrValue::text(value));
        }
        message_id::assign(&mut attrs, diag);

        let event = Event::new(message.clone(), severity, attrs);
        sink::dispatch(sinks, &event, diag);
    }
    Ok(())
}

/// Tie the pieces together for one real invocation: resolve the message source from the actual
/// standard input, read the environment, stand up the live sinks, and run [`process`].
pub fn run(cli: &Cli, diag: &Diag) -> Result<()> {
    use std::io::IsTerminal;

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let batch = input::resolve(&cli.args, stdin.lock(), interactive, diag)?;

    let minimum = match std::env::var(PRIORITY_VAR) {
        Ok(spec) => Severity::resolve(&spec, diag),
        Err(_) => Severity::default(),
    };
    let group_id = std::env::var(GROUP_ID_VAR).ok();

    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    if cli.stderr {
        sinks.push(Box::new(ConsoleSink::to_stderr(minimum, cli.json)));
    }
    // The journal sink is gated by a runtime probe, not configuration.
    if JournalSink::available() {
        match JournalSink::system() {
            Ok(sink) => {
                diag.note("journal", "journald is available");
                sinks.push(Box::new(sink));
            }
            Err(err) => diag.fault(
                "journal",
                &format!("journal socket present but unusable: {}", err),
            ),
        }
    } else {
        diag.note("journal", "journal socket not present; skipping journal sink");
    }

    process(&batch, &cli.priority, group_id.as_deref(), &mut sinks, diag)
}

#[cfg(test)]
mod batch_tests {
    use super::*;
    use crate::error::Error;
    use crate::message_id::MESSAGE_ID;

    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingSink {
        events: Rc<RefCell<Vec<Event>>>,
    }

    impl Sink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }
        fn send(&mut self, event: &Event) -> Result<()> {
            self.events.borrow_mut().push(event.clone());
            Ok(())
        }
    }

    fn recording() -> (Vec<Box<dyn Sink>>, Rc<RefCell<Vec<Event>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        (
            vec![Box::new(RecordingSink {
                events: events.clone(),
            }) as Box<dyn Sink>],
            events,
        )
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_event_per_message() {
        let diag = Diag::disabled();
        let (mut sinks, events) = recording();
        let batch = Batch {
            messages: strings(&["first", "second"]),
            attr_tokens: strings(&["a=1"]),
        };
        process(&batch, "daemon.err", Some("grp-7"), &mut sinks, &diag).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        for event in events.iter() {
            assert_eq!(event.severity, Severity::Error);
            assert_eq!(event.attrs.get("a").unwrap().raw(), "1");
            assert_eq!(event.attrs.get("GROUP_ID").unwrap().raw(), "grp-7");
            assert!(event.message_id().is_some());
        }
        // Each message got its own identifier.
        assert_ne!(events[0].message_id(), events[1].message_id());
    }

    #[test]
    fn test_malformed_token_aborts_before_any_dispatch() {
        let diag = Diag::disabled();
        let (mut sinks, events) = recording();
        let batch = Batch {
            messages: strings(&["only"]),
            attr_tokens: strings(&["good=1", "bad"]),
        };
        assert!(matches!(
            process(&batch, "user.notice", None, &mut sinks, &diag),
            Err(Error::BadAttributePair { .. })
        ));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_caller_supplied_id_flows_through() {
        let diag = Diag::disabled();
        let (mut sinks, events) = recording();
        let batch = Batch {
            messages: strings(&["only"]),
            attr_tokens: strings(&["message_id=abc-123"]),
        };
        process(&batch, "user.notice", None, &mut sinks, &diag).unwrap();
        let events = events.borrow();
        assert_eq!(events[0].message_id(), Some("abc-123"));
        assert!(events[0].attrs.contains_key(MESSAGE_ID));
        assert!(!events[0].attrs.contains_key("message_id"));
    }
}

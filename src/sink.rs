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

//! The sink abstraction & event fan-out.
//!
//! A [`Sink`] is a destination capable of receiving one rendered event: the console stream, the
//! system journal, whatever comes next. Each implementation owns its rendering & its severity
//! translation. [`dispatch`] fans one event out to every active sink *in order*, isolating
//! failures: a sink that errors is reported through the diagnostics handle and the remaining
//! sinks still get the event. Each send is attempted exactly once.

use crate::diag::Diag;
use crate::error::Result;
use crate::event::Event;

/// Operations all sinks must support.
pub trait Sink {
    /// Short name for diagnostics ("console", "journal").
    fn name(&self) -> &'static str;
    /// Deliver one event. Exactly one attempt; the dispatcher never retries.
    fn send(&mut self, event: &Event) -> Result<()>;
}

/// Deliver `event` to every sink in `sinks`, in order, swallowing (but diagnosing) per-sink
/// failures. Delivery failure at one sink never blocks another, and never surfaces to the
/// caller -- the process exit status is not a sink's to decide.
pub fn dispatch(sinks: &mut [Box<dyn Sink>], event: &Event, diag: &Diag) {
    for sink in sinks.iter_mut() {
        if let Err(err) = sink.send(event) {
            diag.fault(sink.name(), &format!("failed to send event: {}", err));
        }
    }
}

#[cfg(test)]
mod sink_tests {
    use super::*;
    use crate::attrs::AttrSet;
    use crate::error::Error;
    use crate::severity::Severity;

    use backtrace::Backtrace;

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

    struct FailingSink;

    impl Sink for FailingSink {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn send(&mut self, _event: &Event) -> Result<()> {
            Err(Error::Transport {
                source: "socket gone".into(),
                back: Backtrace::new(),
            })
        }
    }

    #[test]
    fn test_one_sink_failing_does_not_block_the_next() {
        let diag = Diag::disabled();
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut sinks: Vec<Box<dyn Sink>> = vec![
            Box::new(FailingSink),
            Box::new(RecordingSink {
                events: events.clone(),
            }),
        ];
        let event = Event::new("hello".to_owned(), Severity::Info, AttrSet::new());
        dispatch(&mut sinks, &event, &diag);
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(events.borrow()[0].message, "hello");
    }
}

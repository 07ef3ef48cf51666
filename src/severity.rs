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

//! Severity definitions & priority resolution.
//!
//! [`Severity`] is this crate's internal ranking of log importance. It is deliberately *not* the
//! syslog level set: it's the six levels the event pipeline distinguishes, totally ordered from
//! [`Debug`] (least) to [`Emergency`] (most). Each sink translates a [`Severity`] into its own
//! native representation at dispatch time (the journal sink's table lives in
//! [`journal`](crate::journal)).
//!
//! [`Debug`]: Severity::Debug
//! [`Emergency`]: Severity::Emergency
//!
//! [`Severity::resolve`] maps the free-text specifiers accepted by `logger(1)` (`"user.notice"`,
//! `"daemon.err"`, ...) onto that ranking by case-insensitive keyword search.

use crate::diag::Diag;

type StdResult<T, E> = std::result::Result<T, E>;

/// Ordinal severity of one log event.
///
/// The derived ordering is the interesting part: the console sink's minimum-severity filter is
/// just a `<` comparison, so the variants must be declared least-severe first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// debug-level message
    Debug,
    /// informational message; the default
    Info,
    /// warning conditions
    Warning,
    /// error conditions
    Error,
    /// critical conditions
    Critical,
    /// system is unusable
    Emergency,
}

impl std::default::Default for Severity {
    /// The default severity is `Info`, matching `logger(1)`'s `user.notice`.
    fn default() -> Self {
        Severity::Info
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                Severity::Debug => "debug",
                Severity::Info => "info",
                Severity::Warning => "warning",
                Severity::Error => "error",
                Severity::Critical => "critical",
                Severity::Emergency => "emergency",
            }
        )
    }
}

/// Keyword table for [`Severity::resolve`]; searched in order, first hit wins.
const KEYWORDS: [(&str, Severity); 7] = [
    ("debug", Severity::Debug),
    ("notice", Severity::Info),
    ("warn", Severity::Warning),
    ("err", Severity::Error),
    ("crit", Severity::Critical),
    ("alert", Severity::Critical),
    ("emerg", Severity::Emergency),
];

impl Severity {
    /// Map a free-text priority specifier (e.g. `"user.notice"`, `"daemon.err"`) to a
    /// [`Severity`].
    ///
    /// Resolution is lenient: an unrecognized specifier is reported through `diag` and falls
    /// back to the default rather than failing the invocation.
    pub fn resolve(spec: &str, diag: &Diag) -> Severity {
        let folded = spec.to_ascii_lowercase();
        for (keyword, severity) in KEYWORDS {
            if folded.contains(keyword) {
                return severity;
            }
        }
        diag.fault(
            "severity",
            &format!("unknown priority name '{}'; defaulting to info", spec),
        );
        Severity::default()
    }
}

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

//! Internal diagnostics.
//!
//! The pipeline components don't log through an ambient global; they are handed a [`Diag`] and
//! report through that. [`Diag`] in turn emits [`tracing`] events, so whatever subscriber the
//! binary installs (if any) sees them. By default nothing is installed and diagnostics go
//! nowhere; setting the `LOGLOGGER` environment variable to `"true"` turns them on.
//!
//! [`tracing`]: https://docs.rs/tracing/latest/tracing/index.html

/// Handle through which pipeline components report internal diagnostics.
#[derive(Clone, Debug)]
pub struct Diag {
    enabled: bool,
}

/// Environment variable gating internal diagnostics.
pub const DIAG_VAR: &str = "LOGLOGGER";

impl Diag {
    /// Enabled iff `LOGLOGGER` is set to exactly `"true"` at the time of the call.
    pub fn from_env() -> Diag {
        Diag {
            enabled: std::env::var(DIAG_VAR).map(|v| v == "true").unwrap_or(false),
        }
    }
    /// A handle that drops everything; what the components get in tests.
    pub fn disabled() -> Diag {
        Diag { enabled: false }
    }
    pub fn enabled(&self) -> bool {
        self.enabled
    }
    /// Progress/trace-grade diagnostic.
    pub fn note(&self, component: &'static str, message: &str) {
        if self.enabled {
            tracing::debug!(target: "logger", component, "{}", message);
        }
    }
    /// Something went wrong, but the pipeline carries on.
    pub fn fault(&self, component: &'static str, message: &str) {
        if self.enabled {
            tracing::error!(target: "logger", component, "{}", message);
        }
    }
}

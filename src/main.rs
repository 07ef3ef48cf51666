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

//! The `logger` binary.
//!
//! The pipeline itself never calls [`std::process::exit`]; fatal conditions travel up here as
//! [`Error`] values and this, the outermost layer, picks the exit status. The statuses are part
//! of the tool's contract: 0 on success, [`EXIT_USAGE`] when there's nothing to log,
//! [`EXIT_FORMAT`] on a malformed `key=value` token, 1 for anything else.

use journal_logger::cli::Cli;
use journal_logger::diag::Diag;
use journal_logger::error::Error;

use clap::{CommandFactory, Parser};

/// No message argument and no piped input.
pub const EXIT_USAGE: i32 = 3;
/// A trailing token that wasn't a `key=value` pair.
pub const EXIT_FORMAT: i32 = 4;

fn main() {
    let cli = Cli::parse();

    let diag = Diag::from_env();
    if diag.enabled() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let status = match journal_logger::run(&cli, &diag) {
        Ok(()) => 0,
        Err(Error::NoMessageSource { .. }) => {
            let _ = Cli::command().print_help();
            EXIT_USAGE
        }
        Err(err @ Error::BadAttributePair { .. }) => {
            eprintln!("logger: {}", err);
            EXIT_FORMAT
        }
        Err(err) => {
            eprintln!("logger: {}", err);
            1
        }
    };
    std::process::exit(status);
}

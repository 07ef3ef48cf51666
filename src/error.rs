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
//! [journal-logger](crate) errors

use backtrace::Backtrace;

/// [journal-logger](crate) error type
///
/// [journal-logger](crate) eschews libraries like [thiserror], [anyhow] & [Snafu] in favor of
/// a straightforward enumeration with a few match arms chosen on the basis of what the caller
/// will need to respond. In particular, `main` needs to pick the process exit status from the
/// variant, so the fatal conditions (no message source, malformed attribute pair) each get
/// their own arm.
///
/// [thiserror]: https://docs.rs/thiserror
/// [anyhow]: https://docs.rs/anyhow
/// [Snafu]: https://docs.rs/snafu/latest/snafu
#[non_exhaustive]
pub enum Error {
    /// Neither piped input nor a positional message argument was supplied
    NoMessageSource { back: Backtrace },
    /// A trailing token did not split into a `key=value` pair
    BadAttributePair { token: String, back: Backtrace },
    /// The console sink failed to write
    Console {
        source: std::io::Error,
        back: Backtrace,
    },
    /// General transport layer error (journal socket)
    Transport {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        back: Backtrace,
    },
}

impl std::fmt::Display for Error {
    // `Error` is non-exhaustive so that adding variants won't be a breaking change to our
    // callers. That means the compiler won't catch us if we miss a variant here, so we
    // always include a `_` arm.
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::NoMessageSource { .. } => {
                write!(f, "No message given, and standard input is a terminal")
            }
            Error::BadAttributePair { token, .. } => {
                write!(f, "'{}' is not a key=value pair", token)
            }
            Error::Console { source, .. } => {
                write!(f, "While writing to the console sink, got {}", source)
            }
            Error::Transport { source, .. } => write!(f, "Transport error: {:?}", source),
            _ => write!(f, "Other journal-logger error"),
        }
    }
}

impl std::fmt::Debug for Error {
    // `Error` is non-exhaustive so that adding variants won't be a breaking change to our
    // callers. That means the compiler won't catch us if we miss a variant here, so we
    // always include a `_` arm.
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::NoMessageSource { back } => write!(f, "{}\n{:?}", self, back),
            Error::BadAttributePair { token: _, back } => write!(f, "{}\n{:?}", self, back),
            Error::Console { source: _, back } => write!(f, "{}\n{:?}", self, back),
            Error::Transport { source: _, back } => write!(f, "{}\n{:?}", self, back),
            err => write!(f, "journal-logger error: {}", err),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

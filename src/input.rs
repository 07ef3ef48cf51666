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

//! Resolving the messages for one invocation.
//!
//! Messages come from exactly one of two places: standard input, when it's a pipe or a
//! redirection (one message per line), or the first positional argument. Which one also decides
//! where the attribute tokens start: with piped input *every* positional argument is an
//! attribute token; otherwise they're the arguments after the first.

use crate::diag::Diag;
use crate::error::{Error, Result};

use backtrace::Backtrace;

use std::io::BufRead;

/// What one invocation will process: the messages in arrival order, and the positional tokens
/// to be parsed as `key=value` attributes for each of them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    pub messages: Vec<String>,
    pub attr_tokens: Vec<String>,
}

/// Resolve the invocation's message source.
///
/// `interactive` is whether standard input is attached to a terminal; `reader` is only consumed
/// when it isn't. A read error mid-stream is diagnosed and the lines already read are kept --
/// losing the tail of a pipe is not worth losing the head over. With an interactive stdin and
/// no positional arguments there is nothing to log, which is a usage error.
pub fn resolve<R: BufRead>(
    args: &[String],
    reader: R,
    interactive: bool,
    diag: &Diag,
) -> Result<Batch> {
    if !interactive {
        diag.note("input", "stdin is open; reading messages line by line");
        let mut messages = Vec::new();
        for line in reader.lines() {
            match line {
                Ok(text) => {
                    let message = text.trim().to_owned();
                    diag.note("input", &format!("read {:?} from stdin", message));
                    messages.push(message);
                }
                Err(err) => {
                    diag.fault("input", &format!("error reading stdin: {}", err));
                    break;
                }
            }
        }
        Ok(Batch {
            messages,
            attr_tokens: args.to_vec(),
        })
    } else if let Some(first) = args.first() {
        Ok(Batch {
            messages: vec![first.trim().to_owned()],
            attr_tokens: args[1..].to_vec(),
        })
    } else {
        Err(Error::NoMessageSource {
            back: Backtrace::new(),
        })
    }
}

#[cfg(test)]
mod input_tests {
    use super::*;

    use std::io::Cursor;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_piped_input() {
        let diag = Diag::disabled();
        let stdin = Cursor::new("first line\n  second line  \n");
        let batch = resolve(&strings(&["a=1", "b=2"]), stdin, false, &diag).unwrap();
        assert_eq!(batch.messages, vec!["first line", "second line"]);
        // With piped input, every positional argument is an attribute token.
        assert_eq!(batch.attr_tokens, strings(&["a=1", "b=2"]));
    }

    #[test]
    fn test_positional_message() {
        let diag = Diag::disabled();
        let stdin = Cursor::new("");
        let batch = resolve(&strings(&["  hello  ", "a=1"]), stdin, true, &diag).unwrap();
        assert_eq!(batch.messages, vec!["hello"]);
        assert_eq!(batch.attr_tokens, strings(&["a=1"]));
    }

    #[test]
    fn test_no_source_is_a_usage_error() {
        let diag = Diag::disabled();
        let stdin = Cursor::new("");
        assert!(matches!(
            resolve(&[], stdin, true, &diag),
            Err(Error::NoMessageSource { .. })
        ));
    }

    #[test]
    fn test_empty_pipe_yields_empty_batch() {
        let diag = Diag::disabled();
        let stdin = Cursor::new("");
        let batch = resolve(&[], stdin, false, &diag).unwrap();
        assert!(batch.messages.is_empty());
    }
}

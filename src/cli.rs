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

//! Command-line surface.
//!
//! The flag set mirrors `logger(1)` so existing muscle memory & scripts keep working. Not every
//! flag is wired up: `-i`, `-t` & `-f` are accepted for compatibility but have no effect at
//! present.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "logger",
    about = "Make entries in the system log",
    override_usage = "logger [-is] [-f file] [-p pri] [-t tag] [message ...]",
    version
)]
pub struct Cli {
    /// Log the process id of the logger process with each line.
    #[arg(short = 'i', long)]
    pub pid: bool,

    /// Log the message to standard error, as well as the system log.
    #[arg(short = 's', long)]
    pub stderr: bool,

    /// Express log message as json.
    #[arg(
        short = 'j',
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub json: bool,

    /// NOP
    #[arg(short = 'f', long)]
    pub file: Option<std::path::PathBuf>,

    /// Enter the message with the specified priority.
    #[arg(short = 'p', long, default_value = "user.notice")]
    pub priority: String,

    /// Mark every line in the log with the specified tag.
    #[arg(short = 't', long)]
    pub tag: Option<String>,

    /// The message, followed by key=value attribute pairs.
    #[arg(value_name = "message ...")]
    pub args: Vec<String>,
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["logger", "hello"]);
        assert!(!cli.stderr);
        assert!(cli.json);
        assert_eq!(cli.priority, "user.notice");
        assert_eq!(cli.args, vec!["hello"]);
    }

    #[test]
    fn test_flags_and_pairs() {
        let cli = Cli::parse_from([
            "logger",
            "-s",
            "-p",
            "daemon.err",
            "--json=false",
            "hello",
            "a=1",
            "b=2",
        ]);
        assert!(cli.stderr);
        assert!(!cli.json);
        assert_eq!(cli.priority, "daemon.err");
        assert_eq!(cli.args, vec!["hello", "a=1", "b=2"]);
    }

    #[test]
    fn test_inert_flags_accepted() {
        let cli = Cli::parse_from(["logger", "-i", "-t", "mytag", "-f", "/dev/null", "hello"]);
        assert!(cli.pid);
        assert_eq!(cli.tag.as_deref(), Some("mytag"));
        assert!(cli.file.is_some());
    }
}

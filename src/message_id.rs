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

//! Message-identifier assignment.
//!
//! Every event carries exactly one `MESSAGE_ID` attribute under that canonical key (the
//! journal's field-naming convention). The caller may supply one under any casing
//! (`message_id=abc-123`); it is re-keyed to the canonical form. Absent that, a fresh UUID v4
//! is minted.

use crate::attrs::{AttrSet, AttrValue};
use crate::diag::Diag;

use uuid::Uuid;

/// The canonical identifier key.
pub const MESSAGE_ID: &str = "MESSAGE_ID";

/// Guarantee `attrs` holds exactly one canonical `MESSAGE_ID` entry.
///
/// All keys matching the reserved name case-insensitively are removed; the surviving value is
/// re-inserted under [`MESSAGE_ID`]. An exactly-canonical entry wins over differently-cased
/// ones, otherwise the first alias in key order supplies the value.
pub fn assign(attrs: &mut AttrSet, diag: &Diag) {
    let aliases: Vec<String> = attrs
        .keys()
        .filter(|key| key.eq_ignore_ascii_case(MESSAGE_ID))
        .cloned()
        .collect();

    if aliases.is_empty() {
        let id = Uuid::new_v4().to_string();
        diag.note("message_id", &format!("generated message id {}", id));
        attrs.insert(MESSAGE_ID.to_owned(), AttrValue::text(id));
        return;
    }

    let mut kept: Option<AttrValue> = None;
    for alias in aliases {
        let value = attrs.remove(&alias);
        if kept.is_none() || alias == MESSAGE_ID {
            kept = value;
        }
    }
    if let Some(value) = kept {
        diag.note(
            "message_id",
            &format!("message id {} supplied by caller", value.raw()),
        );
        attrs.insert(MESSAGE_ID.to_owned(), value);
    }
}

#[cfg(test)]
mod message_id_tests {
    use super::*;
    use crate::attrs::parse_pairs;

    fn attrs_of(tokens: &[&str]) -> AttrSet {
        parse_pairs(&tokens.iter().map(|s| s.to_string()).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_caller_supplied_id_is_canonicalized() {
        let diag = Diag::disabled();
        let mut attrs = attrs_of(&["message_id=abc-123", "other=1"]);
        assign(&mut attrs, &diag);
        assert_eq!(attrs.get(MESSAGE_ID).unwrap().raw(), "abc-123");
        assert!(!attrs.contains_key("message_id"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_generated_id_is_a_uuid() {
        let diag = Diag::disabled();
        let mut attrs = AttrSet::new();
        assign(&mut attrs, &diag);
        let id = attrs.get(MESSAGE_ID).unwrap().raw().to_owned();
        assert!(Uuid::parse_str(&id).is_ok());

        // And a second event gets a *different* one.
        let mut attrs = AttrSet::new();
        assign(&mut attrs, &diag);
        assert_ne!(attrs.get(MESSAGE_ID).unwrap().raw(), id);
    }

    #[test]
    fn test_no_casing_duplicates_survive() {
        let diag = Diag::disabled();
        let mut attrs = attrs_of(&["Message_Id=a", "MESSAGE_ID=b"]);
        assign(&mut attrs, &diag);
        // The exactly-canonical entry wins, and only one identifier remains.
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get(MESSAGE_ID).unwrap().raw(), "b");
    }
}

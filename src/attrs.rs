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

//! Trailing `key=value` attribute parsing & type inference.
//!
//! Every positional token after the message must be a `key=value` pair; together they form the
//! event's attribute set. The value's type is *inferred* so that type-aware sinks (the JSON
//! console sink) can render `count=42` as a number and `dry_run=true` as a boolean, while
//! untyped sinks (the journal) still receive the text exactly as the caller wrote it. To that
//! end an [`AttrValue`] carries both the verbatim text and the inferred [`Kind`].
//!
//! Inference is an ordered predicate chain, not reflection: signed 64-bit integer first, then
//! 64-bit float (also chosen whenever the text contains a decimal point), then the boolean
//! literals, then plain text as the fallback.

use crate::error::{Error, Result};

use backtrace::Backtrace;

use std::collections::BTreeMap;

/// The attribute payload of a single event. Keys are case-sensitive; a repeated key overwrites
/// the earlier value.
pub type AttrSet = BTreeMap<String, AttrValue>;

/// The inferred type of an attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    /// base-10 signed 64-bit integer
    Integer(i64),
    /// 64-bit float
    Float(f64),
    /// the literals `true` & `false`
    Boolean(bool),
    /// anything else
    Text,
}

/// One attribute value: the text as the caller supplied it, plus what we made of it.
#[derive(Clone, Debug, PartialEq)]
pub struct AttrValue {
    raw: String,
    kind: Kind,
}

impl AttrValue {
    /// Run the inference chain over `raw`.
    pub fn infer(raw: String) -> AttrValue {
        let kind = infer_kind(&raw);
        AttrValue { raw, kind }
    }
    /// An attribute that is text by fiat, inference not consulted (identifiers & the like).
    pub fn text<S: Into<String>>(raw: S) -> AttrValue {
        AttrValue {
            raw: raw.into(),
            kind: Kind::Text,
        }
    }
    /// The value exactly as the caller wrote it; what untyped sinks are given.
    pub fn raw(&self) -> &str {
        &self.raw
    }
    pub fn kind(&self) -> &Kind {
        &self.kind
    }
    /// Render for a type-aware sink. A float JSON cannot represent (NaN, the infinities) falls
    /// back to its verbatim text.
    pub fn to_json(&self) -> serde_json::Value {
        match self.kind {
            Kind::Integer(n) => serde_json::Value::from(n),
            Kind::Float(x) => serde_json::Number::from_f64(x)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(self.raw.clone())),
            Kind::Boolean(b) => serde_json::Value::Bool(b),
            Kind::Text => serde_json::Value::String(self.raw.clone()),
        }
    }
}

fn infer_kind(raw: &str) -> Kind {
    // A decimal point forces the float interpretation ("3.0" shall be a float, not the
    // integer 3).
    if !raw.contains('.') {
        if let Ok(n) = raw.parse::<i64>() {
            return Kind::Integer(n);
        }
    }
    if let Ok(x) = raw.parse::<f64>() {
        return Kind::Float(x);
    }
    if let Ok(b) = raw.parse::<bool>() {
        return Kind::Boolean(b);
    }
    Kind::Text
}

/// Parse the trailing positional tokens into an [`AttrSet`].
///
/// Each token must split into exactly two parts on the first `=`; a token without one (or with
/// an empty key) fails the *whole* invocation -- partial results are discarded by the caller
/// dropping the `Err`.
pub fn parse_pairs(tokens: &[String]) -> Result<AttrSet> {
    let mut attrs = AttrSet::new();
    for token in tokens {
        let (key, value) = token
            .split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| Error::BadAttributePair {
                token: token.clone(),
                back: Backtrace::new(),
            })?;
        // Last-occurrence wins on a repeated key.
        attrs.insert(key.to_owned(), AttrValue::infer(value.to_owned()));
    }
    Ok(attrs)
}

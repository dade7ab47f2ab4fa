/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Java literal syntax accepted on the right-hand side of a field
//! declaration.

use buckle_node::attrs::raw::RawValue;
use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());
static DECIMAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").unwrap());

/// Type suffix of a numeric literal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display)]
pub enum Suffix {
    #[display("L")]
    Long,
    #[display("F")]
    Float,
    #[display("D")]
    Double,
}

#[derive(Debug, PartialEq)]
pub(crate) struct Literal {
    pub(crate) value: RawValue,
    pub(crate) suffix: Option<Suffix>,
}

impl Literal {
    fn plain(value: RawValue) -> Literal {
        Literal {
            value,
            suffix: None,
        }
    }
}

/// Lexes a single literal, `None` if `text` is not one.
pub(crate) fn lex(text: &str) -> Option<Literal> {
    match text {
        "true" => Some(Literal::plain(RawValue::Bool(true))),
        "false" => Some(Literal::plain(RawValue::Bool(false))),
        _ if text.starts_with('"') => unquote(text).map(|s| Literal::plain(RawValue::String(s))),
        _ => lex_number(text),
    }
}

fn lex_number(text: &str) -> Option<Literal> {
    let (body, suffix) = match text.char_indices().last()? {
        (i, 'l' | 'L') => (&text[..i], Some(Suffix::Long)),
        (i, 'f' | 'F') => (&text[..i], Some(Suffix::Float)),
        (i, 'd' | 'D') => (&text[..i], Some(Suffix::Double)),
        _ => (text, None),
    };

    let value = match suffix {
        None | Some(Suffix::Long) if INTEGER_REGEX.is_match(body) => {
            RawValue::Int(body.parse().ok()?)
        }
        None | Some(Suffix::Float) | Some(Suffix::Double) if DECIMAL_REGEX.is_match(body) => {
            RawValue::Float(body.parse().ok()?)
        }
        _ => return None,
    };
    Some(Literal { value, suffix })
}

/// Strips the quotes of a string literal and resolves its escapes.
fn unquote(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return None,
            '\\' => out.push(match chars.next()? {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '0' => '\0',
                c @ ('"' | '\'' | '\\') => c,
                _ => return None,
            }),
            c => out.push(c),
        }
    }
    Some(out)
}

/// Renders `s` as a Java string literal.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

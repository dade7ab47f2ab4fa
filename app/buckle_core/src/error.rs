/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::fmt;

/// What kind of text was being parsed when a [`ParseError`] occurred.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ParsedKind {
    TargetLabel,
    TargetPattern,
    Package,
}

impl fmt::Display for ParsedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedKind::TargetLabel => write!(f, "target label"),
            ParsedKind::TargetPattern => write!(f, "target pattern"),
            ParsedKind::Package => write!(f, "package"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum ParseErrorReason {
    #[error("Must be absolute, starting with `//` or `cell//`")]
    AbsoluteRequired,
    #[error("Cell name `{0}` must be non-empty and contain only `[A-Za-z0-9_]`")]
    InvalidCellName(String),
    #[error("Expected `:` separating the package from the target name")]
    MissingColon,
    #[error("Package path contains an empty segment")]
    EmptySegment,
    #[error("Package path segment `{0}` is not allowed")]
    InvalidSegment(String),
    #[error("Target name `{0}` is empty or contains invalid characters")]
    InvalidTargetName(String),
    #[error("Flavor `{0}` is empty or contains invalid characters")]
    InvalidFlavor(String),
    #[error("Expected pattern to end with `:name`, `:` or `/...`")]
    UnexpectedPatternFormat,
    #[error("Patterns match targets regardless of flavors, remove `#{0}`")]
    FlavoredPattern(String),
}

/// Malformed label, package or pattern text.
///
/// `position` is the byte offset into `text` where the problem was found.
#[derive(Debug, Clone, Eq, PartialEq, Hash, thiserror::Error)]
#[error("Invalid {kind} `{text}` (at position {position}): {reason}")]
pub struct ParseError {
    pub kind: ParsedKind,
    pub text: String,
    pub position: usize,
    pub reason: ParseErrorReason,
}

impl ParseError {
    pub(crate) fn new(
        kind: ParsedKind,
        text: &str,
        position: usize,
        reason: ParseErrorReason,
    ) -> ParseError {
        ParseError {
            kind,
            text: text.to_owned(),
            position,
            reason,
        }
    }
}

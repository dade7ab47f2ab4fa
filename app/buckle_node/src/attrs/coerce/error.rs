/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use buckle_core::target::TargetLabel;
use itertools::Itertools;

/// Failure to coerce a raw value into its declared attribute type.
///
/// Carries the target being coerced (when known) and the path of the
/// attribute inside the rule arguments, e.g. `srcs[2]` or `env["HOME"]`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Error coercing {}: {kind}", location(.target.as_ref(), .attr))]
pub struct CoercionError {
    pub target: Option<TargetLabel>,
    pub attr: String,
    pub kind: CoercionErrorKind,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoercionErrorKind {
    #[error("expected value of type `{expected}`, got value `{value}` of type `{actual}`")]
    TypeMismatch {
        expected: String,
        actual: &'static str,
        value: String,
    },
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("missing required field `{0}`")]
    MissingRequiredField(String),
    #[error("invalid {expected} `{value}`: {reason}")]
    Malformed {
        expected: &'static str,
        value: String,
        reason: String,
    },
    #[error(
        "value `{value}` matches no alternative of `{expected}`:\n{}",
        join_errors(.errors)
    )]
    NoMatchingAlternative {
        expected: String,
        value: String,
        errors: Vec<CoercionError>,
    },
}

fn location(target: Option<&TargetLabel>, attr: &str) -> String {
    match (target, attr.is_empty()) {
        (Some(target), false) => format!("attribute `{attr}` of `{target}`"),
        (Some(target), true) => format!("attributes of `{target}`"),
        (None, false) => format!("attribute `{attr}`"),
        (None, true) => "value".to_owned(),
    }
}

fn join_errors(errors: &[CoercionError]) -> String {
    errors.iter().map(|e| format!("  {e}")).join("\n")
}

#[cfg(test)]
mod tests {
    use buckle_core::target::TargetLabel;

    use super::CoercionError;
    use super::CoercionErrorKind;

    #[test]
    fn display() {
        let e = CoercionError {
            target: Some(TargetLabel::testing_parse("//foo:bar")),
            attr: "srcs[1]".to_owned(),
            kind: CoercionErrorKind::TypeMismatch {
                expected: "str".to_owned(),
                actual: "int",
                value: "3".to_owned(),
            },
        };
        assert_eq!(
            concat!(
                "Error coercing attribute `srcs[1]` of `//foo:bar`: ",
                "expected value of type `str`, got value `3` of type `int`",
            ),
            e.to_string()
        );

        let e = CoercionError {
            target: Some(TargetLabel::testing_parse("//foo:bar")),
            attr: String::new(),
            kind: CoercionErrorKind::UnknownField("srcz".to_owned()),
        };
        assert_eq!(
            "Error coercing attributes of `//foo:bar`: unknown field `srcz`",
            e.to_string()
        );
    }
}

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

use allocative::Allocative;
use dupe::Dupe;

use crate::error::ParseError;
use crate::error::ParseErrorReason;
use crate::error::ParsedKind;
use crate::package::split_cell;
use crate::package::PackageLabel;
use crate::package::PackagePath;
use crate::target::label::TargetLabel;

/// A pattern that matches one or more target labels.
///
/// Matching is a pure function of the pattern and the label. Flavors never
/// participate in matching: `//foo:bar#shared` is matched by every pattern
/// that matches `//foo:bar`.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Allocative)]
pub enum TargetPattern {
    /// Matches every target. This is what `PUBLIC` visibility means.
    MatchAll,
    /// A single target. Ex. `//some/package:name`
    Exact(TargetLabel),
    /// Every target in exactly one package, sub-packages excluded.
    /// Ex. `//some/package:`
    Package(PackageLabel),
    /// Every target in a package and all packages below it.
    /// Ex. `//some/package/...`. The path is not required to be an actual
    /// package.
    Recursive(PackageLabel),
}

impl TargetPattern {
    /// The textual visibility token meaning [`TargetPattern::MatchAll`].
    pub const PUBLIC: &'static str = "PUBLIC";

    /// Parses `//a/b:c` (exact), `//a/b:` (package) or `//a/b/...`
    /// (recursive). `cell//` prefixes are accepted in place of `//`.
    /// An exact pattern may not carry flavors.
    pub fn parse(text: &str) -> Result<TargetPattern, ParseError> {
        let kind = ParsedKind::TargetPattern;
        let (cell, offset) = split_cell(kind, text)?;
        let rest = &text[offset..];

        if rest == "..." {
            return Ok(TargetPattern::Recursive(PackageLabel::new(
                cell,
                PackagePath::parse(kind, text, offset, "")?,
            )));
        }
        if let Some(path) = rest.strip_suffix("/...") {
            return Ok(TargetPattern::Recursive(PackageLabel::new(
                cell,
                PackagePath::parse(kind, text, offset, path)?,
            )));
        }

        match rest.strip_suffix(':') {
            Some(path) if !path.contains(':') => Ok(TargetPattern::Package(PackageLabel::new(
                cell,
                PackagePath::parse(kind, text, offset, path)?,
            ))),
            _ if rest.contains(':') => {
                let label = TargetLabel::parse_as(kind, text)?;
                if !label.flavors().is_empty() {
                    return Err(ParseError::new(
                        kind,
                        text,
                        text.find('#').unwrap_or(text.len()),
                        ParseErrorReason::FlavoredPattern(label.flavors().to_string()),
                    ));
                }
                Ok(TargetPattern::Exact(label))
            }
            _ => Err(ParseError::new(
                kind,
                text,
                text.len(),
                ParseErrorReason::UnexpectedPatternFormat,
            )),
        }
    }

    pub fn matches(&self, target: &TargetLabel) -> bool {
        match self {
            TargetPattern::MatchAll => true,
            TargetPattern::Exact(label) => label.same_unflavored(target),
            TargetPattern::Package(pkg) => target.pkg() == pkg,
            TargetPattern::Recursive(pkg) => target.pkg().starts_with(pkg),
        }
    }

    pub fn testing_parse(text: &str) -> TargetPattern {
        TargetPattern::parse(text).unwrap()
    }
}

impl Dupe for TargetPattern {}

impl fmt::Display for TargetPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetPattern::MatchAll => write!(f, "{}", Self::PUBLIC),
            TargetPattern::Exact(label) => write!(f, "{label}"),
            TargetPattern::Package(pkg) => write!(f, "{pkg}:"),
            TargetPattern::Recursive(pkg) if pkg.path().is_root() => write!(f, "{pkg}..."),
            TargetPattern::Recursive(pkg) => write!(f, "{pkg}/..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use test_case::test_case;

    use super::TargetPattern;
    use crate::error::ParseErrorReason;
    use crate::package::PackageLabel;
    use crate::target::label::TargetLabel;

    fn label(s: &str) -> TargetLabel {
        TargetLabel::testing_parse(s)
    }

    #[test_case("//foo/bar:baz")]
    #[test_case("//foo/bar:")]
    #[test_case("//foo/bar/...")]
    #[test_case("//...")]
    #[test_case("//:")]
    #[test_case("other//foo/...")]
    fn display_round_trips(text: &str) {
        assert_eq!(text, TargetPattern::testing_parse(text).to_string());
    }

    #[test]
    fn parse_variants() {
        assert_eq!(
            TargetPattern::Package(PackageLabel::testing_new("root", "foo/bar")),
            TargetPattern::testing_parse("//foo/bar:")
        );
        assert_eq!(
            TargetPattern::Recursive(PackageLabel::testing_new("root", "foo")),
            TargetPattern::testing_parse("//foo/...")
        );
        assert_eq!(
            TargetPattern::Recursive(PackageLabel::testing_new("root", "")),
            TargetPattern::testing_parse("//...")
        );
        assert_eq!(
            TargetPattern::Exact(label("//foo:bar")),
            TargetPattern::testing_parse("//foo:bar")
        );
    }

    #[test]
    fn parse_errors() {
        assert_matches!(
            TargetPattern::parse("//foo/bar").unwrap_err().reason,
            ParseErrorReason::UnexpectedPatternFormat
        );
        assert_matches!(
            TargetPattern::parse("foo/...").unwrap_err().reason,
            ParseErrorReason::AbsoluteRequired
        );
        assert_matches!(
            TargetPattern::parse("//foo/../...").unwrap_err().reason,
            ParseErrorReason::InvalidSegment(_)
        );
        assert_matches!(
            TargetPattern::parse("//foo:bar:").unwrap_err().reason,
            ParseErrorReason::InvalidTargetName(_)
        );
    }

    #[test_case("//foo:bar#x", "x")]
    #[test_case("cell//foo:bar#b,a", "a,b")]
    fn flavored_exact_is_rejected(text: &str, flavors: &str) {
        let err = TargetPattern::parse(text).unwrap_err();
        assert_matches!(err.reason, ParseErrorReason::FlavoredPattern(f) if f == flavors);
        assert!(TargetPattern::parse(text.split('#').next().unwrap()).is_ok());
    }

    #[test]
    fn match_all() {
        for l in ["//:a", "//foo:bar", "other//x/y:z#f"] {
            assert!(TargetPattern::MatchAll.matches(&label(l)));
        }
    }

    #[test]
    fn exact() {
        let p = TargetPattern::testing_parse("//foo:bar");
        assert!(p.matches(&label("//foo:bar")));
        assert!(p.matches(&label("//foo:bar#shared")));
        assert!(!p.matches(&label("//foo:baz")));
        assert!(!p.matches(&label("//foo/bar:bar")));
        assert!(!p.matches(&label("other//foo:bar")));
    }

    #[test]
    fn package() {
        let p = TargetPattern::testing_parse("//foo/bar:");
        assert!(p.matches(&label("//foo/bar:x")));
        assert!(p.matches(&label("//foo/bar:x#flavor")));
        assert!(!p.matches(&label("//foo/bar/baz:x")));
        assert!(!p.matches(&label("//foo:x")));
    }

    #[test]
    fn recursive() {
        let p = TargetPattern::testing_parse("//foo/bar/...");
        assert!(p.matches(&label("//foo/bar:x")));
        assert!(p.matches(&label("//foo/bar/baz:x")));
        assert!(p.matches(&label("//foo/bar/baz/qux:x#f")));
        assert!(!p.matches(&label("//foo:x")));
        assert!(!p.matches(&label("//foo/barbaz:x")));
        assert!(!p.matches(&label("other//foo/bar:x")));

        let root = TargetPattern::testing_parse("//...");
        assert!(root.matches(&label("//:x")));
        assert!(root.matches(&label("//a/b/c:x")));
    }

    #[test]
    fn recursive_is_transitive() {
        let outer = TargetPattern::testing_parse("//a/...");
        let inner = TargetPattern::testing_parse("//a/b/...");
        for l in ["//a/b:x", "//a/b/c:x", "//a/b/c/d:x"] {
            let l = label(l);
            assert!(inner.matches(&l));
            assert!(outer.matches(&l));
        }
    }
}

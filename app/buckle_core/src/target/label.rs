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
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;

use crate::cells::CellName;
use crate::error::ParseError;
use crate::error::ParseErrorReason;
use crate::error::ParsedKind;
use crate::package::split_cell;
use crate::package::PackageLabel;
use crate::package::PackagePath;
use crate::target::flavors::Flavors;
use crate::target::name::TargetName;

#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
struct TargetLabelData {
    pkg: PackageLabel,
    name: TargetName,
    flavors: Flavors,
}

/// The identity of a buildable unit: `cell//base/path:name#flavor1,flavor2`.
///
/// Labels are immutable and cheap to clone. Two labels are equal iff cell,
/// base path, name and flavor set are all equal.
#[derive(Clone, Dupe, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct TargetLabel(Arc<TargetLabelData>);

impl TargetLabel {
    pub fn new(pkg: PackageLabel, name: TargetName) -> TargetLabel {
        Self::with_flavors(pkg, name, Flavors::empty())
    }

    pub fn with_flavors(pkg: PackageLabel, name: TargetName, flavors: Flavors) -> TargetLabel {
        TargetLabel(Arc::new(TargetLabelData { pkg, name, flavors }))
    }

    /// Parses a fully qualified label. The text must start with `//` (root
    /// cell) or `cell//`.
    pub fn parse(text: &str) -> Result<TargetLabel, ParseError> {
        Self::parse_as(ParsedKind::TargetLabel, text)
    }

    pub(crate) fn parse_as(kind: ParsedKind, text: &str) -> Result<TargetLabel, ParseError> {
        let (cell, offset) = split_cell(kind, text)?;
        let rest = &text[offset..];
        let Some(colon) = rest.find(':') else {
            return Err(ParseError::new(
                kind,
                text,
                text.len(),
                ParseErrorReason::MissingColon,
            ));
        };
        let path = PackagePath::parse(kind, text, offset, &rest[..colon])?;

        let name_offset = offset + colon + 1;
        let name_and_flavors = &rest[colon + 1..];
        let (name, flavors) = match name_and_flavors.split_once('#') {
            Some((name, flavors)) => (name, Some(flavors)),
            None => (name_and_flavors, None),
        };
        let target_name = TargetName::new(name).ok_or_else(|| {
            ParseError::new(
                kind,
                text,
                name_offset,
                ParseErrorReason::InvalidTargetName(name.to_owned()),
            )
        })?;

        let flavors = match flavors {
            None => Flavors::empty(),
            Some(flavors) => Flavors::new(flavors.split(',')).map_err(|bad| {
                ParseError::new(
                    kind,
                    text,
                    name_offset + name.len() + 1,
                    ParseErrorReason::InvalidFlavor(bad.to_owned()),
                )
            })?,
        };

        Ok(TargetLabel::with_flavors(
            PackageLabel::new(cell, path),
            target_name,
            flavors,
        ))
    }

    pub fn pkg(&self) -> &PackageLabel {
        &self.0.pkg
    }

    pub fn cell(&self) -> &CellName {
        self.0.pkg.cell()
    }

    pub fn base_path(&self) -> &PackagePath {
        self.0.pkg.path()
    }

    pub fn name(&self) -> &TargetName {
        &self.0.name
    }

    pub fn flavors(&self) -> &Flavors {
        &self.0.flavors
    }

    /// This label with its flavors stripped.
    pub fn unflavored(&self) -> TargetLabel {
        if self.0.flavors.is_empty() {
            return self.dupe();
        }
        TargetLabel::new(self.0.pkg.dupe(), self.0.name.dupe())
    }

    /// This label with `flavors` added to the ones it already has.
    pub fn with_added_flavors(&self, flavors: &Flavors) -> TargetLabel {
        TargetLabel::with_flavors(
            self.0.pkg.dupe(),
            self.0.name.dupe(),
            self.0.flavors.union(flavors),
        )
    }

    /// Compares everything but the flavors.
    pub fn same_unflavored(&self, other: &TargetLabel) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.name == other.0.name && self.0.pkg == other.0.pkg)
    }

    pub fn testing_parse(text: &str) -> TargetLabel {
        TargetLabel::parse(text).unwrap()
    }
}

impl fmt::Display for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0.pkg, self.0.name)?;
        if !self.0.flavors.is_empty() {
            write!(f, "#{}", self.0.flavors)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use test_case::test_case;

    use super::TargetLabel;
    use crate::error::ParseErrorReason;
    use crate::target::flavors::Flavors;

    #[test_case("//java/com/example:build_config")]
    #[test_case("//:root")]
    #[test_case("fbcode//foo/bar:baz")]
    #[test_case("//foo:bar#headers,shared")]
    fn canonical_round_trip(text: &str) {
        assert_eq!(text, TargetLabel::testing_parse(text).to_string());
    }

    #[test]
    fn flavors_are_order_independent() {
        let a = TargetLabel::testing_parse("//foo:bar#b,a,b");
        let b = TargetLabel::testing_parse("//foo:bar#a,b");
        assert_eq!(a, b);
        assert_eq!("//foo:bar#a,b", a.to_string());
        assert_ne!(a, TargetLabel::testing_parse("//foo:bar"));
        assert_eq!(a.unflavored(), TargetLabel::testing_parse("//foo:bar"));
        assert!(a.same_unflavored(&TargetLabel::testing_parse("//foo:bar")));
    }

    #[test]
    fn cell_participates_in_equality() {
        assert_ne!(
            TargetLabel::testing_parse("//foo:bar"),
            TargetLabel::testing_parse("other//foo:bar")
        );
        assert_eq!(
            TargetLabel::testing_parse("//foo:bar"),
            TargetLabel::testing_parse("root//foo:bar")
        );
    }

    #[test]
    fn with_added_flavors() {
        let label = TargetLabel::testing_parse("//java/com/example:build_config");
        let flavored = label.with_added_flavors(&Flavors::new(["graph_enhanced"]).unwrap());
        assert_eq!(
            "//java/com/example:build_config#graph_enhanced",
            flavored.to_string()
        );
        assert_eq!(label, flavored.unflavored());
    }

    #[test]
    fn errors() {
        assert_matches!(
            TargetLabel::parse("foo:bar").unwrap_err().reason,
            ParseErrorReason::AbsoluteRequired
        );
        assert_matches!(
            TargetLabel::parse("//foo/bar").unwrap_err().reason,
            ParseErrorReason::MissingColon
        );
        assert_matches!(
            TargetLabel::parse("//foo/./bar:baz").unwrap_err().reason,
            ParseErrorReason::InvalidSegment(s) if s == "."
        );
        let e = TargetLabel::parse("//foo:").unwrap_err();
        assert_matches!(e.reason, ParseErrorReason::InvalidTargetName(_));
        assert_eq!(6, e.position);
        assert_matches!(
            TargetLabel::parse("//foo:bar#a,,b").unwrap_err().reason,
            ParseErrorReason::InvalidFlavor(s) if s.is_empty()
        );
        assert_matches!(
            TargetLabel::parse("a/b//foo:bar").unwrap_err().reason,
            ParseErrorReason::InvalidCellName(_)
        );
    }
}

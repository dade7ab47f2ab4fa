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

/// The base path of a package: `/`-separated segments relative to the cell
/// root. The root package has no segments.
#[derive(Clone, Dupe, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct PackagePath(Arc<str>);

impl PackagePath {
    /// Validates `path` starting at byte `offset` of `original`, so that errors
    /// point into the text the user wrote.
    pub(crate) fn parse(
        kind: ParsedKind,
        original: &str,
        offset: usize,
        path: &str,
    ) -> Result<PackagePath, ParseError> {
        if path.is_empty() {
            return Ok(PackagePath(Arc::from("")));
        }
        let mut position = offset;
        for segment in path.split('/') {
            if segment.is_empty() {
                return Err(ParseError::new(
                    kind,
                    original,
                    position,
                    ParseErrorReason::EmptySegment,
                ));
            }
            if segment == "."
                || segment == ".."
                || segment.contains([':', '#', ',', '\\'])
                || segment.contains(char::is_whitespace)
            {
                return Err(ParseError::new(
                    kind,
                    original,
                    position,
                    ParseErrorReason::InvalidSegment(segment.to_owned()),
                ));
            }
            position += segment.len() + 1;
        }
        Ok(PackagePath(Arc::from(path)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Whether `prefix` names this path or one of its ancestors, comparing
    /// whole segments (`foo/barbaz` does not start with `foo/bar`).
    pub fn starts_with(&self, prefix: &PackagePath) -> bool {
        if prefix.is_root() {
            return true;
        }
        match self.0.strip_prefix(&*prefix.0) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl fmt::Display for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A package: a cell plus a base path, e.g. `//java/com/example`.
#[derive(Clone, Dupe, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct PackageLabel {
    cell: CellName,
    path: PackagePath,
}

impl PackageLabel {
    pub fn new(cell: CellName, path: PackagePath) -> PackageLabel {
        PackageLabel { cell, path }
    }

    /// Parses `//base/path` or `cell//base/path`.
    pub fn parse(text: &str) -> Result<PackageLabel, ParseError> {
        let (cell, rest_offset) = split_cell(ParsedKind::Package, text)?;
        let path =
            PackagePath::parse(ParsedKind::Package, text, rest_offset, &text[rest_offset..])?;
        Ok(PackageLabel { cell, path })
    }

    pub fn cell(&self) -> &CellName {
        &self.cell
    }

    pub fn path(&self) -> &PackagePath {
        &self.path
    }

    /// Whether this package is `other` or nested (at any depth) below it.
    pub fn starts_with(&self, other: &PackageLabel) -> bool {
        self.cell == other.cell && self.path.starts_with(&other.path)
    }

    pub fn testing_new(cell: &str, path: &str) -> PackageLabel {
        PackageLabel {
            cell: CellName::testing_new(cell),
            path: PackagePath::parse(ParsedKind::Package, path, 0, path).unwrap(),
        }
    }
}

impl fmt::Display for PackageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}//{}", self.cell.label_prefix(), self.path)
    }
}

/// Splits the cell off an absolute label, returning the cell and the byte
/// offset just past the `//` separator.
pub(crate) fn split_cell(kind: ParsedKind, text: &str) -> Result<(CellName, usize), ParseError> {
    match text.find("//") {
        Some(0) => Ok((CellName::root(), 2)),
        Some(i) => {
            let cell = &text[..i];
            let cell = CellName::new(cell).map_err(|_| {
                ParseError::new(
                    kind,
                    text,
                    0,
                    ParseErrorReason::InvalidCellName(cell.to_owned()),
                )
            })?;
            Ok((cell, i + 2))
        }
        None => Err(ParseError::new(
            kind,
            text,
            0,
            ParseErrorReason::AbsoluteRequired,
        )),
    }
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::sync::Arc;

use allocative::Allocative;
use derive_more::Display;
use dupe::Dupe;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, thiserror::Error)]
enum CellNameError {
    #[error("Cell name must be non-empty and contain only `[A-Za-z0-9_]`, got `{0}`")]
    Invalid(String),
}

const ROOT_CELL: &str = "root";

static CELL_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

static ROOT: Lazy<CellName> = Lazy::new(|| CellName(Arc::from(ROOT_CELL)));

/// A `CellName` names the repository a target label originates from.
///
/// The cell within a fully qualified target like `foo//some:target` is `foo`.
/// A label written as `//some:target` belongs to the root cell, which is
/// displayed without a prefix.
#[derive(Clone, Dupe, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct CellName(Arc<str>);

impl CellName {
    pub fn new(name: &str) -> anyhow::Result<CellName> {
        if !CELL_NAME_REGEX.is_match(name) {
            return Err(CellNameError::Invalid(name.to_owned()).into());
        }
        if name == ROOT_CELL {
            return Ok(Self::root());
        }
        Ok(CellName(Arc::from(name)))
    }

    pub fn root() -> CellName {
        ROOT.dupe()
    }

    pub fn is_root(&self) -> bool {
        &*self.0 == ROOT_CELL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn testing_new(name: &str) -> CellName {
        CellName::new(name).unwrap()
    }

    /// The prefix written before `//` in the textual form of labels.
    pub(crate) fn label_prefix(&self) -> &str {
        if self.is_root() { "" } else { self.as_str() }
    }
}

#[cfg(test)]
mod tests {
    use super::CellName;

    #[test]
    fn root_is_interned() {
        assert_eq!(CellName::root(), CellName::testing_new("root"));
        assert!(CellName::testing_new("root").is_root());
        assert!(!CellName::testing_new("fbcode").is_root());
    }

    #[test]
    fn rejects_invalid_names() {
        assert!(CellName::new("").is_err());
        assert!(CellName::new("foo/bar").is_err());
        assert!(CellName::new("foo bar").is_err());
        assert!(CellName::new("foo-bar").is_err());
        assert!(CellName::new("third_party2").is_ok());
    }
}

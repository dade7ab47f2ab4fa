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
use itertools::Itertools;

/// The flavor set of a target, e.g. `#headers,shared`.
///
/// Flavors are stored sorted and deduplicated, so two labels that list the
/// same flavors in a different order compare equal.
#[derive(Clone, Dupe, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct Flavors(Option<Arc<[Arc<str>]>>);

impl Flavors {
    pub fn empty() -> Flavors {
        Flavors(None)
    }

    /// Builds a flavor set, returning the first invalid flavor on failure.
    pub fn new<'a>(flavors: impl IntoIterator<Item = &'a str>) -> Result<Flavors, &'a str> {
        let mut parts = Vec::new();
        for flavor in flavors {
            if !Self::is_valid(flavor) {
                return Err(flavor);
            }
            parts.push(flavor);
        }
        // Sort to get a deterministic order.
        parts.sort_unstable();
        parts.dedup();
        if parts.is_empty() {
            return Ok(Flavors(None));
        }
        Ok(Flavors(Some(parts.into_iter().map(Arc::from).collect())))
    }

    fn is_valid(flavor: &str) -> bool {
        !flavor.is_empty()
            && !flavor.contains(['#', ',', ':', '/'])
            && !flavor.contains(char::is_whitespace)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().flat_map(|xs| xs.iter().map(|x| &**x))
    }

    /// Union of two flavor sets.
    pub fn union(&self, other: &Flavors) -> Flavors {
        match (&self.0, &other.0) {
            (_, None) => self.dupe(),
            (None, _) => other.dupe(),
            _ => {
                let merged: Vec<&str> = self.iter().chain(other.iter()).collect();
                // Both inputs already passed validation.
                Flavors::new(merged).unwrap_or_default()
            }
        }
    }
}

impl fmt::Display for Flavors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().join(","))
    }
}

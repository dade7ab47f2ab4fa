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

use buckle_core::target::TargetLabel;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::attrs::coerced_attr::CoercedAttr;

/// Coerced arguments of a rule (or record), in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrValues(IndexMap<String, CoercedAttr>);

impl AttrValues {
    pub(crate) fn with_capacity(n: usize) -> AttrValues {
        AttrValues(IndexMap::with_capacity(n))
    }

    pub(crate) fn insert(&mut self, name: String, value: CoercedAttr) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&CoercedAttr> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CoercedAttr)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every target label referenced by these values, in attribute order,
    /// each label once.
    pub fn deps(&self) -> Vec<TargetLabel> {
        let mut deps = Vec::new();
        for (_, v) in self.iter() {
            v.traverse(&mut |t| deps.push(t));
        }
        deps.into_iter().unique().cloned().collect()
    }
}

impl fmt::Display for AttrValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.0.iter().map(|(k, v)| format!("{k:?}: {v}")).join(", ")
        )
    }
}

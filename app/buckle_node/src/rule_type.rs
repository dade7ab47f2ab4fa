/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::borrow::Borrow;
use std::sync::Arc;

use allocative::Allocative;
use derive_more::Display;
use dupe::Dupe;

/// The tag naming a rule type, e.g. `java_library`.
#[derive(Debug, Clone, Dupe, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct RuleType(Arc<str>);

impl RuleType {
    pub fn new(name: &str) -> RuleType {
        RuleType(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RuleType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

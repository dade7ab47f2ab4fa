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

static TARGET_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-+=@~]+$").unwrap());

/// The short name of a target, the part after the `:`.
#[derive(Clone, Dupe, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct TargetName(Arc<str>);

impl TargetName {
    pub fn new(name: &str) -> Option<TargetName> {
        if TARGET_NAME_REGEX.is_match(name) {
            Some(TargetName(Arc::from(name)))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn testing_new(name: &str) -> TargetName {
        TargetName::new(name).unwrap()
    }
}

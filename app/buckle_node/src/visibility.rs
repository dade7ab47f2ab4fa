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
use std::fmt::Display;
use std::sync::Arc;

use allocative::Allocative;
use buckle_core::pattern::TargetPattern;
use buckle_core::target::TargetLabel;
use dupe::Dupe;
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("`{target}` is not visible to `{requester}` (visibility: {visibility})")]
pub struct VisibilityError {
    pub target: TargetLabel,
    pub requester: TargetLabel,
    pub visibility: VisibilitySpecification,
}

/// The patterns a target may be depended on from. Empty means private.
///
/// Targets in the same package ignore each other's visibility; that
/// exemption is applied by rule nodes, not here.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Dupe, Allocative)]
pub struct VisibilitySpecification(Arc<[TargetPattern]>);

impl Default for VisibilitySpecification {
    fn default() -> Self {
        VisibilitySpecification(Arc::new([]))
    }
}

impl VisibilitySpecification {
    /// `MatchAll` anywhere in the list makes the whole specification public.
    pub fn new(patterns: Vec<TargetPattern>) -> VisibilitySpecification {
        if patterns.contains(&TargetPattern::MatchAll) {
            return Self::public();
        }
        VisibilitySpecification(patterns.into())
    }

    pub fn public() -> VisibilitySpecification {
        VisibilitySpecification(Arc::new([TargetPattern::MatchAll]))
    }

    pub fn is_public(&self) -> bool {
        matches!(&*self.0, [TargetPattern::MatchAll])
    }

    pub fn is_private(&self) -> bool {
        self.0.is_empty()
    }

    pub fn patterns(&self) -> &[TargetPattern] {
        &self.0
    }

    pub fn is_visible_to(&self, target: &TargetLabel) -> bool {
        self.0.iter().any(|pattern| pattern.matches(target))
    }
}

impl Display for VisibilitySpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.0.iter().map(|p| format!("\"{p}\"")).join(", ")
        )
    }
}

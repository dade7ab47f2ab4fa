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
use dupe::Dupe;

use crate::attrs::coerced_attr::CoercedAttr;
use crate::attrs::spec::VISIBILITY;
use crate::attrs::values::AttrValues;
use crate::rule_type::RuleType;
use crate::visibility::VisibilityError;
use crate::visibility::VisibilitySpecification;

/// A declared rule with its arguments coerced.
///
/// Immutable once built. `deps` lists every target label referenced by the
/// arguments, in attribute order, without duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleNode {
    label: TargetLabel,
    rule_type: RuleType,
    attrs: AttrValues,
    deps: Vec<TargetLabel>,
    visibility: VisibilitySpecification,
}

impl RuleNode {
    pub fn new(label: TargetLabel, rule_type: RuleType, attrs: AttrValues) -> RuleNode {
        let deps = attrs.deps();
        let visibility = match attrs.get(VISIBILITY) {
            Some(CoercedAttr::Visibility(v)) => v.dupe(),
            _ => VisibilitySpecification::default(),
        };
        RuleNode {
            label,
            rule_type,
            attrs,
            deps,
            visibility,
        }
    }

    pub fn label(&self) -> &TargetLabel {
        &self.label
    }

    pub fn rule_type(&self) -> &RuleType {
        &self.rule_type
    }

    pub fn attrs(&self) -> &AttrValues {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&CoercedAttr> {
        self.attrs.get(name)
    }

    pub fn deps(&self) -> &[TargetLabel] {
        &self.deps
    }

    pub fn visibility(&self) -> &VisibilitySpecification {
        &self.visibility
    }

    /// Targets in the same package can always see each other.
    pub fn is_visible_to(&self, requester: &TargetLabel) -> bool {
        requester.pkg() == self.label.pkg() || self.visibility.is_visible_to(requester)
    }

    pub fn check_visible_to(&self, requester: &TargetLabel) -> Result<(), VisibilityError> {
        if self.is_visible_to(requester) {
            Ok(())
        } else {
            Err(VisibilityError {
                target: self.label.dupe(),
                requester: requester.dupe(),
                visibility: self.visibility.dupe(),
            })
        }
    }
}

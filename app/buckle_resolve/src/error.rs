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

use buckle_core::target::TargetLabel;
use buckle_node::attrs::coerce::error::CoercionError;
use buckle_node::visibility::VisibilityError;
use dupe::Dupe;
use itertools::Itertools;

/// A failed resolution, with the chain of targets that led to it.
///
/// The first element of `chain` is the target whose resolution was
/// requested; every following element is a dependency of the one before.
/// Every waiter on a failed construction receives a clone of its error.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Error resolving {}: {kind}", format_chain(.chain))]
pub struct ResolveError {
    pub chain: Vec<TargetLabel>,
    pub kind: ResolveErrorKind,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveErrorKind {
    #[error("`{0}` is not declared")]
    NotFound(TargetLabel),
    #[error("`{target}` has unknown rule type `{rule_type}`")]
    UnknownRuleType {
        target: TargetLabel,
        rule_type: String,
    },
    #[error(transparent)]
    Coercion(CoercionError),
    #[error("dependency cycle detected: {}", format_chain(.0))]
    DependencyCycle(Vec<TargetLabel>),
    #[error(transparent)]
    Visibility(VisibilityError),
    #[error("declaration store failed: {0:#}")]
    Store(Arc<anyhow::Error>),
}

fn format_chain(chain: &[TargetLabel]) -> String {
    chain.iter().map(|t| format!("`{t}`")).join(" -> ")
}

impl ResolveError {
    pub(crate) fn new(target: &TargetLabel, kind: ResolveErrorKind) -> ResolveError {
        ResolveError {
            chain: vec![target.dupe()],
            kind,
        }
    }

    /// The same failure, as seen from `dependent`.
    pub(crate) fn via(mut self, dependent: &TargetLabel) -> ResolveError {
        self.chain.insert(0, dependent.dupe());
        self
    }

    pub fn kind(&self) -> &ResolveErrorKind {
        &self.kind
    }

    pub fn chain(&self) -> &[TargetLabel] {
        &self.chain
    }
}

#[cfg(test)]
mod tests {
    use buckle_core::target::TargetLabel;

    use super::ResolveError;
    use super::ResolveErrorKind;

    #[test]
    fn display() {
        let a = TargetLabel::testing_parse("//a:a");
        let b = TargetLabel::testing_parse("//b:b");
        let e = ResolveError::new(
            &a,
            ResolveErrorKind::DependencyCycle(vec![a.clone(), b.clone(), a.clone()]),
        )
        .via(&b)
        .via(&a);
        assert_eq!(
            concat!(
                "Error resolving `//a:a` -> `//b:b` -> `//a:a`: ",
                "dependency cycle detected: `//a:a` -> `//b:b` -> `//a:a`",
            ),
            e.to_string()
        );
        assert_eq!(&[a.clone(), b, a], e.chain());
    }
}

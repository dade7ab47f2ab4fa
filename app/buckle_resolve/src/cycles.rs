/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Cycle detection along a single resolution path.

use std::iter;

use buckle_core::target::TargetLabel;
use dupe::Dupe;
use indexmap::set::IndexSet;

/// The stack of targets being resolved on one path from a top-level request.
///
/// Each `visit` returns a new detector, so sibling dependencies never see
/// each other and unrelated requests never share a stack.
#[derive(Debug, Clone, Default)]
pub(crate) struct CycleDetector {
    stack: IndexSet<TargetLabel>,
}

impl CycleDetector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Pushes `key`, or returns the cycle `[key, ..., key]` if it is already
    /// on the stack.
    pub(crate) fn visit(&self, key: &TargetLabel) -> Result<Self, Vec<TargetLabel>> {
        if self.stack.contains(key) {
            let cycle = self
                .stack
                .iter()
                .skip_while(|k| *k != key)
                .chain(iter::once(key))
                .map(|k| k.dupe())
                .collect();
            return Err(cycle);
        }
        let mut stack = self.stack.clone();
        stack.insert(key.dupe());
        Ok(Self { stack })
    }

    /// The target whose construction is currently running on this path.
    pub(crate) fn top(&self) -> Option<&TargetLabel> {
        self.stack.last()
    }
}

#[cfg(test)]
mod tests {
    use buckle_core::target::TargetLabel;

    use crate::cycles::CycleDetector;

    fn k(name: &str) -> TargetLabel {
        TargetLabel::testing_parse(&format!("//pkg:{name}"))
    }

    #[test]
    fn cycle_detection_when_no_cycles() {
        let detector = CycleDetector::new();
        assert_eq!(None, detector.top());
        let detector1 = detector.visit(&k("1")).unwrap();
        let detector12 = detector1.visit(&k("2")).unwrap();
        let detector123 = detector12.visit(&k("3")).unwrap();
        let detector1234 = detector123.visit(&k("4")).unwrap();
        assert_eq!(Some(&k("4")), detector1234.top());

        // Siblings are independent.
        let detector13 = detector1.visit(&k("3")).unwrap();
        let _detector132 = detector13.visit(&k("2")).unwrap();
    }

    #[test]
    fn cycle_detection_when_cycles() {
        let detector = CycleDetector::new();
        let detector = detector.visit(&k("1")).unwrap();
        let detector = detector.visit(&k("2")).unwrap();
        let detector = detector.visit(&k("3")).unwrap();
        let cycle = detector.visit(&k("2")).unwrap_err();
        assert_eq!(vec![k("2"), k("3"), k("2")], cycle);
    }

    #[test]
    fn self_cycle() {
        let detector = CycleDetector::new().visit(&k("1")).unwrap();
        assert_eq!(vec![k("1"), k("1")], detector.visit(&k("1")).unwrap_err());
    }
}

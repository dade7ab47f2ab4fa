/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Cycle detection across concurrent resolution paths.
//!
//! A construction that waits on another target's in-flight construction
//! records a `waiter -> target` edge. Every construction waits on at most one
//! target at a time, so following edges from `target` either ends or comes
//! back to `waiter`, in which case the two paths would wait on each other
//! forever.

use std::collections::HashMap;

use buckle_core::target::TargetLabel;
use dupe::Dupe;
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub(crate) struct WaitForGraph {
    edges: Mutex<HashMap<TargetLabel, TargetLabel>>,
}

/// Removes the edge when the waiter stops waiting.
pub(crate) struct WaitGuard<'a> {
    graph: &'a WaitForGraph,
    waiter: TargetLabel,
}

impl WaitForGraph {
    /// Records that `waiter` waits on `target`, or returns the cycle
    /// `[waiter, target, ..., waiter]` that doing so would close.
    pub(crate) fn wait<'a>(
        &'a self,
        waiter: &TargetLabel,
        target: &TargetLabel,
    ) -> Result<WaitGuard<'a>, Vec<TargetLabel>> {
        let mut edges = self.edges.lock();

        let mut chain = vec![waiter.dupe(), target.dupe()];
        let mut cur = target;
        while let Some(next) = edges.get(cur) {
            chain.push(next.dupe());
            if next == waiter {
                return Err(chain);
            }
            if chain.len() > edges.len() + 2 {
                break;
            }
            cur = next;
        }

        edges.insert(waiter.dupe(), target.dupe());
        Ok(WaitGuard {
            graph: self,
            waiter: waiter.dupe(),
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.edges.lock().len()
    }
}

impl Drop for WaitGuard<'_> {
    fn drop(&mut self) {
        self.graph.edges.lock().remove(&self.waiter);
    }
}

#[cfg(test)]
mod tests {
    use buckle_core::target::TargetLabel;

    use super::WaitForGraph;

    fn k(name: &str) -> TargetLabel {
        TargetLabel::testing_parse(&format!("//pkg:{name}"))
    }

    #[test]
    fn chains_without_cycles() {
        let graph = WaitForGraph::default();
        let _ab = graph.wait(&k("a"), &k("b")).unwrap();
        let _bc = graph.wait(&k("b"), &k("c")).unwrap();
        let _dc = graph.wait(&k("d"), &k("c")).unwrap();
        assert_eq!(3, graph.len());
    }

    #[test]
    fn closing_edge_is_rejected() {
        let graph = WaitForGraph::default();
        let _ab = graph.wait(&k("a"), &k("b")).unwrap();
        let _bc = graph.wait(&k("b"), &k("c")).unwrap();
        let cycle = graph.wait(&k("c"), &k("a")).err().unwrap();
        assert_eq!(vec![k("c"), k("a"), k("b"), k("c")], cycle);
        assert_eq!(2, graph.len());
    }

    #[test]
    fn guard_removes_edge() {
        let graph = WaitForGraph::default();
        {
            let _ab = graph.wait(&k("a"), &k("b")).unwrap();
            assert_eq!(1, graph.len());
        }
        assert_eq!(0, graph.len());
        let _ba = graph.wait(&k("b"), &k("a")).unwrap();
    }
}

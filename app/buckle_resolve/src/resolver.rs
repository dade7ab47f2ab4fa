/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use buckle_core::target::TargetLabel;
use buckle_node::attrs::coerce::ctx::CoercionContext;
use buckle_node::nodes::RuleNode;
use buckle_node::registry::RuleRegistry;
use buckle_node::registry::RULE_REGISTRY;
use buckle_node::visibility::VisibilityError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use dupe::Dupe;
use futures::future::join_all;
use futures::future::BoxFuture;
use futures::future::Shared;
use futures::FutureExt;

use crate::config::ResolverConfig;
use crate::cycles::CycleDetector;
use crate::error::ResolveError;
use crate::error::ResolveErrorKind;
use crate::store::DeclarationStore;
use crate::wait_for::WaitForGraph;

type ResolveResult = Result<Arc<RuleNode>, ResolveError>;

enum CacheEntry {
    /// Construction started; everyone else awaits the same future.
    InProgress(Shared<BoxFuture<'static, ResolveResult>>),
    Done(Arc<RuleNode>),
}

struct ResolverData {
    registry: Arc<RuleRegistry>,
    store: Arc<dyn DeclarationStore>,
    config: ResolverConfig,
    cache: DashMap<TargetLabel, CacheEntry>,
    waits: WaitForGraph,
    constructions: AtomicUsize,
}

/// Resolves targets into rule nodes, constructing each node at most once.
///
/// A target is looked up in the declaration store, its arguments are coerced
/// against the schema of its rule type, and every dependency is resolved
/// and checked for visibility before the node is cached. Concurrent requests
/// for the same target share one construction. Failed constructions are not
/// cached, so a later request starts afresh.
#[derive(Clone, Dupe)]
pub struct RuleResolver(Arc<ResolverData>);

impl RuleResolver {
    pub fn new(
        registry: Arc<RuleRegistry>,
        store: Arc<dyn DeclarationStore>,
        config: ResolverConfig,
    ) -> RuleResolver {
        RuleResolver(Arc::new(ResolverData {
            registry,
            store,
            config,
            cache: DashMap::new(),
            waits: WaitForGraph::default(),
            constructions: AtomicUsize::new(0),
        }))
    }

    /// A resolver over the process-wide rule registry, configured from the
    /// environment.
    pub fn from_global_registry(store: Arc<dyn DeclarationStore>) -> anyhow::Result<RuleResolver> {
        Ok(RuleResolver::new(
            RULE_REGISTRY.get()?.dupe(),
            store,
            ResolverConfig::from_env()?,
        ))
    }

    /// Resolves `target`. When `requested_by` is given, `target` must also be
    /// visible to it.
    pub async fn resolve(
        &self,
        target: &TargetLabel,
        requested_by: Option<&TargetLabel>,
    ) -> ResolveResult {
        let node = self.get_or_compute(target, &CycleDetector::new()).await?;
        if let Some(requester) = requested_by {
            self.check_visibility(requester, &node)?;
        }
        Ok(node)
    }

    /// Resolves all of `targets` concurrently, results in the same order.
    pub async fn resolve_many(&self, targets: &[TargetLabel]) -> Vec<ResolveResult> {
        join_all(targets.iter().map(|t| self.resolve(t, None))).await
    }

    /// The node for `target` if it has already been constructed.
    pub fn get_if_resolved(&self, target: &TargetLabel) -> Option<Arc<RuleNode>> {
        match self.0.cache.get(target)?.value() {
            CacheEntry::Done(node) => Some(node.dupe()),
            CacheEntry::InProgress(_) => None,
        }
    }

    /// Number of rule nodes constructed so far.
    pub fn constructions(&self) -> usize {
        self.0.constructions.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.0.config
    }

    async fn get_or_compute(&self, key: &TargetLabel, parent: &CycleDetector) -> ResolveResult {
        let path = parent.visit(key).map_err(|cycle| {
            tracing::debug!("cycle detected resolving `{}`", key);
            ResolveError::new(key, ResolveErrorKind::DependencyCycle(cycle))
        })?;

        // Registered before touching the cache, so a failure here never
        // leaves behind an entry nobody drives.
        let _wait = match parent.top() {
            Some(waiter) => Some(self.0.waits.wait(waiter, key).map_err(|cycle| {
                tracing::debug!("`{}` and `{}` wait on each other", waiter, key);
                ResolveError::new(key, ResolveErrorKind::DependencyCycle(cycle))
            })?),
            None => None,
        };

        let fut = match self.0.cache.entry(key.dupe()) {
            Entry::Occupied(e) => match e.get() {
                CacheEntry::Done(node) => {
                    tracing::trace!("rule node cache hit for `{}`", key);
                    return Ok(node.dupe());
                }
                CacheEntry::InProgress(fut) => fut.clone(),
            },
            Entry::Vacant(e) => {
                let fut = self.compute(key.dupe(), path).shared();
                e.insert(CacheEntry::InProgress(fut.clone()));
                fut
            }
        };
        fut.await
    }

    fn compute(&self, key: TargetLabel, path: CycleDetector) -> BoxFuture<'static, ResolveResult> {
        let this = self.dupe();
        async move {
            let res = this.construct(&key, &path).await;
            match &res {
                Ok(node) => {
                    this.0.cache.insert(key, CacheEntry::Done(node.dupe()));
                }
                Err(e) => {
                    tracing::debug!("resolving `{}` failed: {}", key, e);
                    this.0.cache.remove(&key);
                }
            }
            res
        }
        .boxed()
    }

    async fn construct(&self, key: &TargetLabel, path: &CycleDetector) -> ResolveResult {
        tracing::debug!("constructing rule node for `{}`", key);

        let declaration = match self.0.store.lookup(key).await {
            Ok(Some(declaration)) => declaration,
            Ok(None) => {
                return Err(ResolveError::new(
                    key,
                    ResolveErrorKind::NotFound(key.dupe()),
                ));
            }
            Err(e) => {
                return Err(ResolveError::new(
                    key,
                    ResolveErrorKind::Store(Arc::new(e)),
                ));
            }
        };

        let Some(schema) = self.0.registry.get(&declaration.rule_type) else {
            return Err(ResolveError::new(
                key,
                ResolveErrorKind::UnknownRuleType {
                    target: key.dupe(),
                    rule_type: declaration.rule_type,
                },
            ));
        };

        let attrs = schema
            .spec()
            .coerce(&CoercionContext::new(key), &declaration.attrs)
            .map_err(|e| ResolveError::new(key, ResolveErrorKind::Coercion(e)))?;
        let node = RuleNode::new(key.dupe(), schema.rule_type().dupe(), attrs);

        for dep in node.deps() {
            let dep_node = self
                .get_or_compute(dep, path)
                .await
                .map_err(|e| e.via(key))?;
            self.check_visibility(key, &dep_node)?;
        }

        self.0.constructions.fetch_add(1, Ordering::Relaxed);
        Ok(Arc::new(node))
    }

    fn check_visibility(
        &self,
        dependent: &TargetLabel,
        node: &RuleNode,
    ) -> Result<(), ResolveError> {
        match node.check_visible_to(dependent) {
            Ok(()) => Ok(()),
            Err(e) if !self.0.config.enforce_visibility => {
                tracing::warn!("{} (ignored: visibility is not enforced)", e);
                Ok(())
            }
            Err(e) => Err(visibility_error(dependent, e)),
        }
    }
}

fn visibility_error(dependent: &TargetLabel, e: VisibilityError) -> ResolveError {
    let target = e.target.dupe();
    ResolveError::new(&target, ResolveErrorKind::Visibility(e)).via(dependent)
}

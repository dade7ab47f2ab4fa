/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Where raw rule declarations come from.

use std::collections::HashMap;

use async_trait::async_trait;
use buckle_core::target::TargetLabel;
use buckle_node::attrs::raw::RawValue;
use indexmap::IndexMap;

/// A rule as written in a build file: its rule type and untyped arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDeclaration {
    pub rule_type: String,
    pub attrs: IndexMap<String, RawValue>,
}

impl RawDeclaration {
    pub fn new<K: Into<String>>(
        rule_type: &str,
        attrs: impl IntoIterator<Item = (K, RawValue)>,
    ) -> RawDeclaration {
        RawDeclaration {
            rule_type: rule_type.to_owned(),
            attrs: attrs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Source of parsed declarations, keyed by target.
#[async_trait]
pub trait DeclarationStore: Send + Sync + 'static {
    /// `Ok(None)` if the target is not declared.
    async fn lookup(&self, target: &TargetLabel) -> anyhow::Result<Option<RawDeclaration>>;
}

/// Declarations held in memory. Flavored targets share the declaration of
/// their unflavored target.
#[derive(Debug, Default)]
pub struct InMemoryDeclarations {
    declarations: HashMap<TargetLabel, RawDeclaration>,
}

impl InMemoryDeclarations {
    pub fn new() -> InMemoryDeclarations {
        InMemoryDeclarations::default()
    }

    pub fn insert(&mut self, target: TargetLabel, declaration: RawDeclaration) {
        self.declarations.insert(target.unflavored(), declaration);
    }

    /// Builder-style `insert` of a parsed label.
    pub fn with(mut self, target: &str, declaration: RawDeclaration) -> anyhow::Result<Self> {
        self.insert(TargetLabel::parse(target)?, declaration);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[async_trait]
impl DeclarationStore for InMemoryDeclarations {
    async fn lookup(&self, target: &TargetLabel) -> anyhow::Result<Option<RawDeclaration>> {
        Ok(self.declarations.get(&target.unflavored()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use buckle_core::target::TargetLabel;
    use buckle_node::attrs::raw::RawValue;

    use super::DeclarationStore;
    use super::InMemoryDeclarations;
    use super::RawDeclaration;

    #[tokio::test]
    async fn lookup() -> anyhow::Result<()> {
        let decl = RawDeclaration::new("genrule", [("out", RawValue::from("a.txt"))]);
        let store = InMemoryDeclarations::new().with("//gen:a", decl.clone())?;
        assert_eq!(1, store.len());
        assert_eq!(
            Some(&decl),
            store
                .lookup(&TargetLabel::testing_parse("//gen:a"))
                .await?
                .as_ref()
        );
        assert_eq!(
            Some(decl),
            store
                .lookup(&TargetLabel::testing_parse("//gen:a#flavor"))
                .await?
        );
        assert_eq!(
            None,
            store.lookup(&TargetLabel::testing_parse("//gen:b")).await?
        );
        Ok(())
    }
}

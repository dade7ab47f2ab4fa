/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! The table of rule schemas, keyed by rule type.

use std::collections::HashMap;
use std::sync::Arc;

use buckle_core::late_binding::LateBinding;
use dupe::Dupe;
use itertools::Itertools;

use crate::attrs::attr::Attribute;
use crate::attrs::spec::AttributeSpec;
use crate::rule_type::RuleType;

#[derive(Debug, thiserror::Error)]
enum RuleRegistryError {
    #[error("Rule type `{0}` is registered twice")]
    DuplicateRuleType(RuleType),
}

/// The attribute contract of one rule type.
#[derive(Debug)]
pub struct RuleSchema {
    rule_type: RuleType,
    spec: Arc<AttributeSpec>,
}

impl RuleSchema {
    /// Declares a rule type with the given attributes. The internal
    /// attributes (like `visibility`) are added automatically.
    pub fn new(
        rule_type: &str,
        attributes: Vec<(String, Attribute)>,
    ) -> anyhow::Result<RuleSchema> {
        Ok(RuleSchema {
            rule_type: RuleType::new(rule_type),
            spec: Arc::new(AttributeSpec::for_rule(attributes)?),
        })
    }

    pub fn rule_type(&self) -> &RuleType {
        &self.rule_type
    }

    pub fn spec(&self) -> &Arc<AttributeSpec> {
        &self.spec
    }
}

/// Every known rule type. Built once at startup, read-only afterwards.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    schemas: HashMap<RuleType, Arc<RuleSchema>>,
}

impl RuleRegistry {
    pub fn new() -> RuleRegistry {
        RuleRegistry::default()
    }

    pub fn register(&mut self, schema: RuleSchema) -> anyhow::Result<()> {
        let rule_type = schema.rule_type.dupe();
        if self.schemas.contains_key(&rule_type) {
            return Err(RuleRegistryError::DuplicateRuleType(rule_type).into());
        }
        self.schemas.insert(rule_type, Arc::new(schema));
        Ok(())
    }

    pub fn get(&self, rule_type: &str) -> Option<&Arc<RuleSchema>> {
        self.schemas.get(rule_type)
    }

    /// Registered rule types, sorted.
    pub fn rule_types(&self) -> Vec<&RuleType> {
        self.schemas.keys().sorted().collect()
    }
}

/// The process-wide registry. Initialized once before the first resolution.
pub static RULE_REGISTRY: LateBinding<Arc<RuleRegistry>> = LateBinding::new("RULE_REGISTRY");

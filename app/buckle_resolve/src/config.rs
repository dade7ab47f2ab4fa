/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use buckle_core::env_helper::EnvHelper;
use dupe::Dupe;

static ENFORCE_VISIBILITY: EnvHelper<bool> = EnvHelper::new("BUCKLE_ENFORCE_VISIBILITY");

#[derive(Debug, Clone, Copy, Dupe, Eq, PartialEq)]
pub struct ResolverConfig {
    /// When false, visibility violations are logged and resolution
    /// continues.
    pub enforce_visibility: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            enforce_visibility: true,
        }
    }
}

impl ResolverConfig {
    /// Defaults, overridden by `$BUCKLE_ENFORCE_VISIBILITY`.
    pub fn from_env() -> anyhow::Result<ResolverConfig> {
        let default = ResolverConfig::default();
        Ok(ResolverConfig {
            enforce_visibility: ENFORCE_VISIBILITY
                .get_copied()?
                .unwrap_or(default.enforce_visibility),
        })
    }
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use anyhow::Context;
use once_cell::sync::OnceCell;

#[derive(Debug, thiserror::Error)]
#[error("{0} already set")]
struct AlreadySet(&'static str);

/// A process-wide value populated once at startup and read-only afterwards.
pub struct LateBinding<T> {
    /// Name for diagnostic.
    name: &'static str,
    symbol: OnceCell<T>,
}

impl<T> LateBinding<T> {
    pub const fn new(name: &'static str) -> LateBinding<T> {
        LateBinding {
            name,
            symbol: OnceCell::new(),
        }
    }

    pub fn init(&self, symbol: T) -> anyhow::Result<()> {
        self.symbol
            .set(symbol)
            .map_err(|_| AlreadySet(self.name).into())
    }

    pub fn is_set(&self) -> bool {
        self.symbol.get().is_some()
    }

    #[inline]
    pub fn get(&self) -> anyhow::Result<&T> {
        self.symbol
            .get()
            .with_context(|| format!("{} not set (internal error)", self.name))
    }
}

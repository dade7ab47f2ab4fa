/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::env;
use std::env::VarError;
use std::error::Error;
use std::str::FromStr;

use once_cell::sync::OnceCell;

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("${var} is not valid unicode")]
    NotUnicode { var: &'static str },
    #[error("Invalid value `{value}` for ${var}")]
    Invalid {
        var: &'static str,
        value: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

/// A resolver setting overridden through an environment variable. The value
/// is parsed with `FromStr` on first access and cached for the process.
///
/// Lives in a `static`, one per variable.
pub struct EnvHelper<T: 'static> {
    var: &'static str,
    cell: OnceCell<Option<T>>,
}

impl<T> EnvHelper<T> {
    pub const fn new(var: &'static str) -> Self {
        Self {
            var,
            cell: OnceCell::new(),
        }
    }
}

impl<T> EnvHelper<T>
where
    T: FromStr,
    T::Err: Into<Box<dyn Error + Send + Sync>>,
{
    /// `None` when the variable is unset. A failed parse is not cached.
    pub fn get(&'static self) -> Result<Option<&'static T>, EnvError> {
        let var = self.var;
        self.cell
            .get_or_try_init(|| match env::var(var) {
                Ok(value) => {
                    tracing::info!("Env override found: ${} = {}", var, value);
                    match value.parse::<T>() {
                        Ok(v) => Ok(Some(v)),
                        Err(e) => Err(EnvError::Invalid {
                            var,
                            value,
                            source: e.into(),
                        }),
                    }
                }
                Err(VarError::NotPresent) => Ok(None),
                Err(VarError::NotUnicode(..)) => Err(EnvError::NotUnicode { var }),
            })
            .map(Option::as_ref)
    }

    pub fn get_copied(&'static self) -> Result<Option<T>, EnvError>
    where
        T: Copy,
    {
        Ok(self.get()?.copied())
    }
}

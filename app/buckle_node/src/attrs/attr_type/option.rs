/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::fmt;

use crate::attrs::attr_type::AttrType;
use crate::attrs::coerce::ctx::CoercionContext;
use crate::attrs::coerce::error::CoercionError;
use crate::attrs::coerce::AttrTypeCoerce;
use crate::attrs::coerced_attr::CoercedAttr;
use crate::attrs::raw::RawValue;

#[derive(Debug, PartialEq)]
pub struct OptionAttrType {
    pub inner: AttrType,
}

impl fmt::Display for OptionAttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | None", self.inner)
    }
}

impl AttrTypeCoerce for OptionAttrType {
    /// `None` stays `None` without consulting the inner coercer; anything
    /// else is coerced as the inner type.
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        if value.is_none() {
            Ok(CoercedAttr::None)
        } else {
            self.inner.coerce(ctx, value)
        }
    }
}

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
use crate::attrs::coerce::type_mismatch;
use crate::attrs::coerce::AttrTypeCoerce;
use crate::attrs::coerced_attr::CoercedAttr;
use crate::attrs::raw::RawValue;

#[derive(Debug, PartialEq)]
pub struct ListAttrType {
    pub inner: AttrType,
}

impl fmt::Display for ListAttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list[{}]", self.inner)
    }
}

impl AttrTypeCoerce for ListAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        let RawValue::List(items) = value else {
            return Err(type_mismatch(ctx, self, value));
        };
        let items = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.inner.coerce(&ctx.index(i), item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CoercedAttr::List(items))
    }
}

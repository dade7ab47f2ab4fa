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

use itertools::Itertools;

use crate::attrs::attr_type::AttrType;
use crate::attrs::coerce::ctx::CoercionContext;
use crate::attrs::coerce::error::CoercionError;
use crate::attrs::coerce::error::CoercionErrorKind;
use crate::attrs::coerce::AttrTypeCoerce;
use crate::attrs::coerced_attr::CoercedAttr;
use crate::attrs::raw::RawValue;

#[derive(Debug, PartialEq)]
pub struct OneOfAttrType {
    pub xs: Vec<AttrType>,
}

impl fmt::Display for OneOfAttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xs.iter().join(" | "))
    }
}

impl AttrTypeCoerce for OneOfAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        let mut errors = Vec::new();
        // Bias towards the start of the list - try and use the first alternative that coerces.
        for (i, x) in self.xs.iter().enumerate() {
            match x.coerce(ctx, value) {
                Ok(v) => return Ok(CoercedAttr::OneOf(Box::new(v), i as u32)),
                Err(e) => errors.push(e),
            }
        }
        Err(ctx.error(CoercionErrorKind::NoMatchingAlternative {
            expected: self.to_string(),
            value: value.to_string(),
            errors,
        }))
    }
}

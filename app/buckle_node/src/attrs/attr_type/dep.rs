/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use buckle_core::target::TargetLabel;
use derive_more::Display;

use crate::attrs::coerce::ctx::CoercionContext;
use crate::attrs::coerce::error::CoercionError;
use crate::attrs::coerce::error::CoercionErrorKind;
use crate::attrs::coerce::type_mismatch;
use crate::attrs::coerce::AttrTypeCoerce;
use crate::attrs::coerced_attr::CoercedAttr;
use crate::attrs::raw::RawValue;

#[derive(Debug, Eq, PartialEq, Display)]
#[display("dep")]
pub struct DepAttrType;

impl AttrTypeCoerce for DepAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        let RawValue::String(s) = value else {
            return Err(type_mismatch(ctx, self, value));
        };
        match TargetLabel::parse(s) {
            Ok(label) => Ok(CoercedAttr::Target(label)),
            Err(e) => Err(ctx.error(CoercionErrorKind::Malformed {
                expected: "target label",
                value: s.clone(),
                reason: format!("{} (at position {})", e.reason, e.position),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use buckle_core::target::TargetLabel;

    use crate::attrs::attr_type::AttrType;
    use crate::attrs::coerce::ctx::CoercionContext;
    use crate::attrs::coerce::error::CoercionErrorKind;
    use crate::attrs::coerced_attr::CoercedAttr;
    use crate::attrs::raw::RawValue;

    #[test]
    fn dep() {
        let ctx = CoercionContext::no_target();
        assert_eq!(
            Ok(CoercedAttr::Target(TargetLabel::testing_parse(
                "//lib:util#shared"
            ))),
            AttrType::dep().coerce(&ctx, &RawValue::from("//lib:util#shared"))
        );
        assert_matches!(
            AttrType::dep().coerce(&ctx, &RawValue::from(":util")),
            Err(e) if matches!(
                &e.kind,
                CoercionErrorKind::Malformed { reason, .. } if reason.contains("position 0")
            )
        );
        assert_matches!(
            AttrType::dep().coerce(&ctx, &RawValue::from(1)),
            Err(e) if matches!(e.kind, CoercionErrorKind::TypeMismatch { .. })
        );
    }
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use buckle_core::pattern::TargetPattern;
use derive_more::Display;

use crate::attrs::coerce::ctx::CoercionContext;
use crate::attrs::coerce::error::CoercionError;
use crate::attrs::coerce::error::CoercionErrorKind;
use crate::attrs::coerce::type_mismatch;
use crate::attrs::coerce::AttrTypeCoerce;
use crate::attrs::coerced_attr::CoercedAttr;
use crate::attrs::raw::RawValue;
use crate::visibility::VisibilitySpecification;

/// A list of target patterns, with `PUBLIC` meaning every target.
#[derive(Debug, Eq, PartialEq, Display)]
#[display("visibility")]
pub struct VisibilityAttrType;

impl AttrTypeCoerce for VisibilityAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        let RawValue::List(items) = value else {
            return Err(type_mismatch(ctx, self, value));
        };

        let mut patterns = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let ctx = ctx.index(i);
            let Some(text) = item.unpack_str() else {
                return Err(type_mismatch(&ctx, "str", item));
            };
            if text == TargetPattern::PUBLIC {
                // PUBLIC subsumes everything else in the list.
                return Ok(CoercedAttr::Visibility(VisibilitySpecification::public()));
            }
            let pattern = TargetPattern::parse(text).map_err(|e| {
                ctx.error(CoercionErrorKind::Malformed {
                    expected: "visibility pattern",
                    value: text.to_owned(),
                    reason: format!("{} (at position {})", e.reason, e.position),
                })
            })?;
            patterns.push(pattern);
        }
        Ok(CoercedAttr::Visibility(VisibilitySpecification::new(
            patterns,
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use buckle_core::pattern::TargetPattern;

    use crate::attrs::attr_type::AttrType;
    use crate::attrs::coerce::ctx::CoercionContext;
    use crate::attrs::coerce::error::CoercionErrorKind;
    use crate::attrs::coerced_attr::CoercedAttr;
    use crate::attrs::raw::RawValue;
    use crate::visibility::VisibilitySpecification;

    fn coerce(v: RawValue) -> Result<CoercedAttr, crate::attrs::coerce::error::CoercionError> {
        AttrType::visibility().coerce(&CoercionContext::no_target(), &v)
    }

    #[test]
    fn public() {
        assert_eq!(
            Ok(CoercedAttr::Visibility(VisibilitySpecification::public())),
            coerce(RawValue::list(["//foo:", "PUBLIC"]))
        );
    }

    #[test]
    fn patterns() {
        assert_eq!(
            Ok(CoercedAttr::Visibility(VisibilitySpecification::new(vec![
                TargetPattern::testing_parse("//foo/..."),
                TargetPattern::testing_parse("//bar:baz"),
            ]))),
            coerce(RawValue::list(["//foo/...", "//bar:baz"]))
        );
        assert_eq!(
            Ok(CoercedAttr::Visibility(VisibilitySpecification::default())),
            coerce(RawValue::List(Vec::new()))
        );
    }

    #[test]
    fn errors() {
        let e = coerce(RawValue::list(["//foo:", "//bar"])).unwrap_err();
        assert_eq!("[1]", e.attr);
        assert_matches!(e.kind, CoercionErrorKind::Malformed { .. });
        assert_matches!(
            coerce(RawValue::from("PUBLIC")).unwrap_err().kind,
            CoercionErrorKind::TypeMismatch { actual: "str", .. }
        );
    }
}

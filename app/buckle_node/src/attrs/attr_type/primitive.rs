/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use derive_more::Display;

use crate::attrs::coerce::ctx::CoercionContext;
use crate::attrs::coerce::error::CoercionError;
use crate::attrs::coerce::error::CoercionErrorKind;
use crate::attrs::coerce::type_mismatch;
use crate::attrs::coerce::AttrTypeCoerce;
use crate::attrs::coerced_attr::CoercedAttr;
use crate::attrs::raw::RawValue;

/// Largest magnitude below which every integer has an exact `f64`.
const MAX_EXACT_FLOAT_INT: i64 = 1 << 53;

#[derive(Debug, Eq, PartialEq, Display)]
#[display("bool")]
pub struct BoolAttrType;

#[derive(Debug, Eq, PartialEq, Display)]
#[display("int")]
pub struct IntAttrType;

#[derive(Debug, Eq, PartialEq, Display)]
#[display("long")]
pub struct LongAttrType;

#[derive(Debug, Eq, PartialEq, Display)]
#[display("float")]
pub struct FloatAttrType;

#[derive(Debug, Eq, PartialEq, Display)]
#[display("str")]
pub struct StringAttrType;

impl AttrTypeCoerce for BoolAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        match value {
            RawValue::Bool(b) => Ok(CoercedAttr::Bool(*b)),
            _ => Err(type_mismatch(ctx, self, value)),
        }
    }
}

impl AttrTypeCoerce for IntAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        match value {
            RawValue::Int(i) => match i32::try_from(*i) {
                Ok(i) => Ok(CoercedAttr::Int(i)),
                Err(_) => Err(ctx.error(CoercionErrorKind::TypeMismatch {
                    expected: self.to_string(),
                    actual: "int outside the 32-bit range",
                    value: value.to_string(),
                })),
            },
            _ => Err(type_mismatch(ctx, self, value)),
        }
    }
}

impl AttrTypeCoerce for LongAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        match value {
            RawValue::Int(i) => Ok(CoercedAttr::Long(*i)),
            _ => Err(type_mismatch(ctx, self, value)),
        }
    }
}

impl AttrTypeCoerce for FloatAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        match value {
            RawValue::Float(x) => Ok(CoercedAttr::Float(*x)),
            RawValue::Int(i) if i.unsigned_abs() <= MAX_EXACT_FLOAT_INT as u64 => {
                Ok(CoercedAttr::Float(*i as f64))
            }
            _ => Err(type_mismatch(ctx, self, value)),
        }
    }
}

impl AttrTypeCoerce for StringAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        match value {
            RawValue::String(s) => Ok(CoercedAttr::String(s.as_str().into())),
            _ => Err(type_mismatch(ctx, self, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use test_case::test_case;

    use crate::attrs::attr_type::AttrType;
    use crate::attrs::coerce::ctx::CoercionContext;
    use crate::attrs::coerce::error::CoercionErrorKind;
    use crate::attrs::coerced_attr::CoercedAttr;
    use crate::attrs::raw::RawValue;

    fn coerce(t: AttrType, v: impl Into<RawValue>) -> Result<CoercedAttr, CoercionErrorKind> {
        t.coerce(&CoercionContext::no_target(), &v.into())
            .map_err(|e| e.kind)
    }

    #[test_case(true)]
    #[test_case(false)]
    fn bool_values(b: bool) {
        assert_eq!(Ok(CoercedAttr::Bool(b)), coerce(AttrType::bool(), b));
    }

    #[test_case(0)]
    #[test_case(-1)]
    #[test_case(i32::MAX)]
    #[test_case(i32::MIN)]
    fn int_values(i: i32) {
        assert_eq!(Ok(CoercedAttr::Int(i)), coerce(AttrType::int(), i));
        assert_eq!(Ok(CoercedAttr::Long(i.into())), coerce(AttrType::long(), i));
    }

    #[test_case(i64::MAX)]
    #[test_case(i64::MIN)]
    fn long_values(i: i64) {
        assert_eq!(Ok(CoercedAttr::Long(i)), coerce(AttrType::long(), i));
        assert_matches!(
            coerce(AttrType::int(), i),
            Err(CoercionErrorKind::TypeMismatch { .. })
        );
    }

    #[test]
    fn float_values() {
        assert_eq!(Ok(CoercedAttr::Float(1.5)), coerce(AttrType::float(), 1.5));
        assert_eq!(Ok(CoercedAttr::Float(3.0)), coerce(AttrType::float(), 3));
        assert_eq!(
            Ok(CoercedAttr::Float(9007199254740992.0)),
            coerce(AttrType::float(), 1i64 << 53)
        );
        assert_matches!(
            coerce(AttrType::float(), (1i64 << 53) + 1),
            Err(CoercionErrorKind::TypeMismatch { .. })
        );
    }

    #[test]
    fn floats_never_truncate() {
        assert_matches!(
            coerce(AttrType::int(), 1.0),
            Err(CoercionErrorKind::TypeMismatch { actual: "float", .. })
        );
        assert_matches!(
            coerce(AttrType::long(), 2.5),
            Err(CoercionErrorKind::TypeMismatch { actual: "float", .. })
        );
    }

    #[test]
    fn string_values() {
        assert_eq!(
            Ok(CoercedAttr::String("hello".into())),
            coerce(AttrType::string(), "hello")
        );
        assert_eq!(
            Err(CoercionErrorKind::TypeMismatch {
                expected: "str".to_owned(),
                actual: "bool",
                value: "True".to_owned(),
            }),
            coerce(AttrType::string(), true)
        );
        assert_matches!(
            coerce(AttrType::bool(), "true"),
            Err(CoercionErrorKind::TypeMismatch { actual: "str", .. })
        );
    }
}

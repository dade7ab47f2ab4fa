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
use std::sync::Arc;

use crate::attrs::coerce::ctx::CoercionContext;
use crate::attrs::coerce::error::CoercionError;
use crate::attrs::coerce::type_mismatch;
use crate::attrs::coerce::AttrTypeCoerce;
use crate::attrs::coerced_attr::CoercedAttr;
use crate::attrs::raw::RawValue;
use crate::attrs::spec::AttributeSpec;

/// A fixed set of named fields, each with its own type and optional
/// default. Written as a dict in build files.
#[derive(Debug, PartialEq)]
pub struct RecordAttrType {
    pub fields: Arc<AttributeSpec>,
}

impl fmt::Display for RecordAttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record(")?;
        for (i, (name, attr)) in self.fields.attrs().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, attr.coercer())?;
        }
        write!(f, ")")
    }
}

impl AttrTypeCoerce for RecordAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        let RawValue::Dict(entries) = value else {
            return Err(type_mismatch(ctx, self, value));
        };
        Ok(CoercedAttr::Record(self.fields.coerce(ctx, entries)?))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use crate::attrs::attr::Attribute;
    use crate::attrs::attr_type::AttrType;
    use crate::attrs::coerce::ctx::CoercionContext;
    use crate::attrs::coerce::error::CoercionErrorKind;
    use crate::attrs::coerced_attr::CoercedAttr;
    use crate::attrs::raw::RawValue;
    use crate::attrs::spec::AttributeSpec;

    fn signing_config() -> AttrType {
        AttrType::record(Arc::new(
            AttributeSpec::new(vec![
                ("keystore".to_owned(), Attribute::required(AttrType::path(), "")),
                (
                    "alias".to_owned(),
                    Attribute::with_default(AttrType::string(), "release".into(), ""),
                ),
                (
                    "validity_days".to_owned(),
                    Attribute::optional(AttrType::int(), ""),
                ),
            ])
            .unwrap(),
        ))
    }

    #[test]
    fn display() {
        assert_eq!(
            "record(keystore=path, alias=str, validity_days=int | None)",
            signing_config().to_string()
        );
    }

    #[test]
    fn defaults_are_applied() {
        let ctx = CoercionContext::no_target();
        let CoercedAttr::Record(values) = signing_config()
            .coerce(&ctx, &RawValue::dict([("keystore", "debug.keystore")]))
            .unwrap()
        else {
            panic!("expected a record");
        };
        assert_eq!(
            Some(&CoercedAttr::Path("debug.keystore".into())),
            values.get("keystore")
        );
        assert_eq!(Some(&CoercedAttr::String("release".into())), values.get("alias"));
        assert_eq!(Some(&CoercedAttr::None), values.get("validity_days"));
    }

    #[test]
    fn explicit_none_takes_the_default() {
        let ctx = CoercionContext::no_target();
        let v = RawValue::dict([
            ("keystore", RawValue::from("k")),
            ("alias", RawValue::None),
        ]);
        let CoercedAttr::Record(values) = signing_config().coerce(&ctx, &v).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(Some(&CoercedAttr::String("release".into())), values.get("alias"));
    }

    #[test]
    fn strictness() {
        let ctx = CoercionContext::no_target();
        let ctx = ctx.field("signing");
        assert_matches!(
            signing_config().coerce(&ctx, &RawValue::dict([("alias", "x")])),
            Err(e) if e.attr == "signing"
                && e.kind == CoercionErrorKind::MissingRequiredField("keystore".to_owned())
        );
        assert_matches!(
            signing_config().coerce(
                &ctx,
                &RawValue::dict([("keystore", "k"), ("keystroe", "k")])
            ),
            Err(e) if e.kind == CoercionErrorKind::UnknownField("keystroe".to_owned())
        );
        let e = signing_config()
            .coerce(
                &ctx,
                &RawValue::dict([
                    ("keystore", RawValue::from("k")),
                    ("validity_days", RawValue::from("x")),
                ]),
            )
            .unwrap_err();
        assert_eq!("signing.validity_days", e.attr);
    }
}

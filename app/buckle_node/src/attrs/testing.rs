/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Helpers for building rule arguments in tests.

use indexmap::IndexMap;

use crate::attrs::coerce::ctx::CoercionContext;
use crate::attrs::coerce::error::CoercionError;
use crate::attrs::raw::RawValue;
use crate::attrs::spec::AttributeSpec;
use crate::attrs::values::AttrValues;

/// Coerces `overrides`, filling every required attribute that is not
/// overridden with the empty value of its type (empty list, empty string,
/// `None`, ...). Required attributes whose type has no empty value must be
/// overridden.
pub fn coerce_with_defaults(
    spec: &AttributeSpec,
    overrides: IndexMap<String, RawValue>,
) -> Result<AttrValues, CoercionError> {
    let mut values = overrides;
    for (name, attr) in spec.attrs() {
        if attr.is_required() && !values.contains_key(name) {
            if let Some(empty) = attr.coercer().empty_raw_value() {
                values.insert(name.to_owned(), empty);
            }
        }
    }
    spec.coerce(&CoercionContext::no_target(), &values)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use indexmap::indexmap;

    use super::coerce_with_defaults;
    use crate::attrs::attr::Attribute;
    use crate::attrs::attr_type::AttrType;
    use crate::attrs::coerce::error::CoercionErrorKind;
    use crate::attrs::coerced_attr::CoercedAttr;
    use crate::attrs::raw::RawValue;
    use crate::attrs::spec::AttributeSpec;

    #[test]
    fn fills_required_fields() {
        let spec = AttributeSpec::for_rule(vec![
            (
                "srcs".to_owned(),
                Attribute::required(AttrType::list(AttrType::source()), ""),
            ),
            (
                "package".to_owned(),
                Attribute::required(AttrType::string(), ""),
            ),
            (
                "extra".to_owned(),
                Attribute::required(AttrType::option(AttrType::dep()), ""),
            ),
            ("count".to_owned(), Attribute::required(AttrType::int(), "")),
        ])
        .unwrap();

        assert_matches!(
            coerce_with_defaults(&spec, indexmap! {}),
            Err(e) if e.kind == CoercionErrorKind::MissingRequiredField("count".to_owned())
        );

        let values =
            coerce_with_defaults(&spec, indexmap! { "count".to_owned() => RawValue::from(2) })
                .unwrap();
        assert_eq!(Some(&CoercedAttr::List(Vec::new())), values.get("srcs"));
        assert_eq!(Some(&CoercedAttr::String("".into())), values.get("package"));
        assert_eq!(Some(&CoercedAttr::None), values.get("extra"));
        assert_eq!(Some(&CoercedAttr::Int(2)), values.get("count"));
    }
}

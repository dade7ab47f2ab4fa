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
use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::attrs::attr::Attribute;
use crate::attrs::attr_type::AttrType;
use crate::attrs::coerce::ctx::CoercionContext;
use crate::attrs::coerce::error::CoercionError;
use crate::attrs::coerce::error::CoercionErrorKind;
use crate::attrs::raw::RawValue;
use crate::attrs::values::AttrValues;

/// Name of the attribute every rule has, listing who may depend on it.
pub const VISIBILITY: &str = "visibility";

/// The ordered, typed attributes of a rule type or of a record.
///
/// Coercing a raw argument map against a spec is strict: unknown keys and
/// missing required attributes are errors, and defaults are only applied
/// to attributes that are absent or explicitly `None`.
#[derive(Debug, PartialEq)]
pub struct AttributeSpec {
    attributes: IndexMap<String, Attribute>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum AttributeSpecError {
    #[error("User provided attribute `{0}` overrides internal attribute")]
    InternalAttributeRedefined(String),
    #[error("Duplicate attribute `{0}`")]
    DuplicateAttribute(String),
    #[error("Invalid default for attribute `{0}`")]
    InvalidDefault(String),
}

fn internal_attrs() -> Vec<(&'static str, Attribute)> {
    vec![(
        VISIBILITY,
        Attribute::with_default(
            AttrType::visibility(),
            RawValue::List(Vec::new()),
            "a list of visibility patterns restricting what targets can depend on this one",
        ),
    )]
}

impl AttributeSpec {
    /// A spec with exactly the given attributes, as used by records.
    pub fn new(attributes: Vec<(String, Attribute)>) -> anyhow::Result<Self> {
        let mut instances = IndexMap::with_capacity(attributes.len());
        for (name, instance) in attributes {
            match instances.entry(name) {
                Entry::Vacant(e) => {
                    e.insert(instance);
                }
                Entry::Occupied(e) => {
                    return Err(AttributeSpecError::DuplicateAttribute(e.key().clone()).into());
                }
            }
        }
        let spec = AttributeSpec {
            attributes: instances,
        };
        spec.validate_defaults()?;
        Ok(spec)
    }

    /// A spec for a rule type: the given attributes plus the internal ones.
    pub fn for_rule(attributes: Vec<(String, Attribute)>) -> anyhow::Result<Self> {
        let internal = internal_attrs();
        let mut all = Vec::with_capacity(internal.len() + attributes.len());
        for (name, instance) in internal.iter() {
            all.push(((*name).to_owned(), instance.clone()));
        }
        for (name, instance) in attributes {
            if internal.iter().any(|(n, _)| *n == name) {
                return Err(AttributeSpecError::InternalAttributeRedefined(name).into());
            }
            all.push((name, instance));
        }
        Self::new(all)
    }

    fn validate_defaults(&self) -> anyhow::Result<()> {
        let root = CoercionContext::no_target();
        for (name, attr) in &self.attributes {
            if let Some(default) = attr.default() {
                attr.coercer()
                    .coerce(&root.field(name), default)
                    .with_context(|| AttributeSpecError::InvalidDefault(name.clone()))?;
            }
        }
        Ok(())
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attrs(&self) -> impl ExactSizeIterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Coerces a raw argument map into values for every attribute of this
    /// spec, in spec order.
    pub fn coerce(
        &self,
        ctx: &CoercionContext,
        values: &IndexMap<String, RawValue>,
    ) -> Result<AttrValues, CoercionError> {
        if let Some(unknown) = values.keys().find(|k| !self.attributes.contains_key(*k)) {
            return Err(ctx.error(CoercionErrorKind::UnknownField(unknown.clone())));
        }

        let mut res = AttrValues::with_capacity(self.attributes.len());
        for (name, attr) in &self.attributes {
            let field_ctx = ctx.field(name);
            let raw = match (values.get(name), attr.default()) {
                (Some(v), Some(default)) if v.is_none() => default,
                (Some(v), _) => v,
                (None, Some(default)) => default,
                (None, None) => {
                    return Err(ctx.error(CoercionErrorKind::MissingRequiredField(name.clone())));
                }
            };
            res.insert(name.clone(), attr.coercer().coerce(&field_ctx, raw)?);
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use buckle_core::target::TargetLabel;
    use indexmap::indexmap;

    use super::AttributeSpec;
    use super::VISIBILITY;
    use crate::attrs::attr::Attribute;
    use crate::attrs::attr_type::AttrType;
    use crate::attrs::coerce::ctx::CoercionContext;
    use crate::attrs::coerce::error::CoercionErrorKind;
    use crate::attrs::coerced_attr::CoercedAttr;
    use crate::attrs::raw::RawValue;
    use crate::visibility::VisibilitySpecification;

    fn java_library() -> AttributeSpec {
        AttributeSpec::for_rule(vec![
            (
                "srcs".to_owned(),
                Attribute::optional(AttrType::list(AttrType::source()), ""),
            ),
            (
                "deps".to_owned(),
                Attribute::optional(AttrType::list(AttrType::dep()), ""),
            ),
            (
                "source_level".to_owned(),
                Attribute::with_default(AttrType::int(), 8.into(), ""),
            ),
            ("main".to_owned(), Attribute::required(AttrType::string(), "")),
        ])
        .unwrap()
    }

    #[test]
    fn internal_attrs_come_first() {
        let spec = java_library();
        assert_eq!(
            vec![VISIBILITY, "srcs", "deps", "source_level", "main"],
            spec.attrs().map(|(n, _)| n).collect::<Vec<_>>()
        );
        assert_eq!(5, spec.len());
    }

    #[test]
    fn construction_errors() {
        let e = AttributeSpec::new(vec![
            ("a".to_owned(), Attribute::required(AttrType::int(), "")),
            ("a".to_owned(), Attribute::required(AttrType::int(), "")),
        ])
        .unwrap_err();
        assert_eq!("Duplicate attribute `a`", e.to_string());

        let e = AttributeSpec::for_rule(vec![(
            VISIBILITY.to_owned(),
            Attribute::required(AttrType::string(), ""),
        )])
        .unwrap_err();
        assert_eq!(
            "User provided attribute `visibility` overrides internal attribute",
            e.to_string()
        );

        let e = AttributeSpec::new(vec![(
            "n".to_owned(),
            Attribute::with_default(AttrType::int(), "x".into(), ""),
        )])
        .unwrap_err();
        assert_eq!("Invalid default for attribute `n`", e.to_string());
    }

    #[test]
    fn coerce() {
        let target = TargetLabel::testing_parse("//java/com/example:lib");
        let ctx = CoercionContext::new(&target);
        let values = java_library()
            .coerce(
                &ctx,
                &indexmap! {
                    "main".to_owned() => RawValue::from("com.example.Main"),
                    "deps".to_owned() => RawValue::list(["//lib:a", "//lib:b"]),
                },
            )
            .unwrap();
        assert_eq!(
            Some(&CoercedAttr::Visibility(VisibilitySpecification::default())),
            values.get(VISIBILITY)
        );
        assert_eq!(Some(&CoercedAttr::List(Vec::new())), values.get("srcs"));
        assert_eq!(Some(&CoercedAttr::Int(8)), values.get("source_level"));
        assert_eq!(
            vec![
                TargetLabel::testing_parse("//lib:a"),
                TargetLabel::testing_parse("//lib:b")
            ],
            values.deps()
        );
    }

    #[test]
    fn coerce_errors() {
        let target = TargetLabel::testing_parse("//java/com/example:lib");
        let ctx = CoercionContext::new(&target);
        let spec = java_library();

        let e = spec
            .coerce(&ctx, &indexmap! { "srcz".to_owned() => RawValue::list(["a"]) })
            .unwrap_err();
        assert_eq!(CoercionErrorKind::UnknownField("srcz".to_owned()), e.kind);
        assert_eq!(Some(target.clone()), e.target);

        let e = spec.coerce(&ctx, &indexmap! {}).unwrap_err();
        assert_eq!(
            CoercionErrorKind::MissingRequiredField("main".to_owned()),
            e.kind
        );
        assert_eq!(
            "Error coercing attributes of `//java/com/example:lib`: missing required field `main`",
            e.to_string()
        );

        // An explicit None does not satisfy a required attribute.
        let e = spec
            .coerce(&ctx, &indexmap! { "main".to_owned() => RawValue::None })
            .unwrap_err();
        assert_eq!("main", e.attr);
        assert_matches!(e.kind, CoercionErrorKind::TypeMismatch { actual: "NoneType", .. });
    }
}

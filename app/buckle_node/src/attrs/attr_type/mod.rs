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

use dupe::Dupe;

use crate::attrs::attr_type::dep::DepAttrType;
use crate::attrs::attr_type::dict::DictAttrType;
use crate::attrs::attr_type::list::ListAttrType;
use crate::attrs::attr_type::one_of::OneOfAttrType;
use crate::attrs::attr_type::option::OptionAttrType;
use crate::attrs::attr_type::path::PathAttrType;
use crate::attrs::attr_type::path::SourceAttrType;
use crate::attrs::attr_type::primitive::BoolAttrType;
use crate::attrs::attr_type::primitive::FloatAttrType;
use crate::attrs::attr_type::primitive::IntAttrType;
use crate::attrs::attr_type::primitive::LongAttrType;
use crate::attrs::attr_type::primitive::StringAttrType;
use crate::attrs::attr_type::record::RecordAttrType;
use crate::attrs::attr_type::visibility::VisibilityAttrType;
use crate::attrs::coerce::ctx::CoercionContext;
use crate::attrs::coerce::error::CoercionError;
use crate::attrs::coerce::AttrTypeCoerce;
use crate::attrs::coerced_attr::CoercedAttr;
use crate::attrs::raw::RawValue;
use crate::attrs::spec::AttributeSpec;

pub mod dep;
pub mod dict;
pub mod list;
pub mod one_of;
pub mod option;
pub mod path;
pub mod primitive;
pub mod record;
pub mod visibility;

/// The declared type of an attribute. Cheap to clone.
///
/// Types nest arbitrarily, e.g. `AttrType::option(AttrType::list(AttrType::either(...)))`.
#[derive(Debug, Clone, Dupe, PartialEq)]
pub struct AttrType(Arc<AttrTypeInner>);

#[derive(Debug, PartialEq)]
pub enum AttrTypeInner {
    Bool(BoolAttrType),
    Int(IntAttrType),
    Long(LongAttrType),
    Float(FloatAttrType),
    String(StringAttrType),
    Path(PathAttrType),
    Source(SourceAttrType),
    Dep(DepAttrType),
    List(ListAttrType),
    Option(OptionAttrType),
    OneOf(OneOfAttrType),
    Dict(DictAttrType),
    Record(RecordAttrType),
    Visibility(VisibilityAttrType),
}

impl AttrType {
    pub fn inner(&self) -> &AttrTypeInner {
        &self.0
    }

    pub fn bool() -> Self {
        Self(Arc::new(AttrTypeInner::Bool(BoolAttrType)))
    }

    /// A 32-bit integer.
    pub fn int() -> Self {
        Self(Arc::new(AttrTypeInner::Int(IntAttrType)))
    }

    /// A 64-bit integer.
    pub fn long() -> Self {
        Self(Arc::new(AttrTypeInner::Long(LongAttrType)))
    }

    pub fn float() -> Self {
        Self(Arc::new(AttrTypeInner::Float(FloatAttrType)))
    }

    pub fn string() -> Self {
        Self(Arc::new(AttrTypeInner::String(StringAttrType)))
    }

    /// A relative path within the package.
    pub fn path() -> Self {
        Self(Arc::new(AttrTypeInner::Path(PathAttrType)))
    }

    /// Either a relative path or the label of a rule producing the source.
    pub fn source() -> Self {
        Self(Arc::new(AttrTypeInner::Source(SourceAttrType)))
    }

    /// A dependency on another target.
    pub fn dep() -> Self {
        Self(Arc::new(AttrTypeInner::Dep(DepAttrType)))
    }

    pub fn list(inner: AttrType) -> Self {
        Self(Arc::new(AttrTypeInner::List(ListAttrType { inner })))
    }

    pub fn option(inner: AttrType) -> Self {
        Self(Arc::new(AttrTypeInner::Option(OptionAttrType { inner })))
    }

    /// Alternatives are tried in order and the first one that accepts the
    /// value wins.
    pub fn one_of(xs: Vec<AttrType>) -> Self {
        Self(Arc::new(AttrTypeInner::OneOf(OneOfAttrType { xs })))
    }

    pub fn either(a: AttrType, b: AttrType) -> Self {
        Self::one_of(vec![a, b])
    }

    /// A map from string keys to values of `value`, in declaration order.
    pub fn dict(value: AttrType) -> Self {
        Self(Arc::new(AttrTypeInner::Dict(DictAttrType { value })))
    }

    pub fn record(fields: Arc<AttributeSpec>) -> Self {
        Self(Arc::new(AttrTypeInner::Record(RecordAttrType { fields })))
    }

    pub fn visibility() -> Self {
        Self(Arc::new(AttrTypeInner::Visibility(VisibilityAttrType)))
    }

    pub fn coerce(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        self.0.coercer().coerce_item(ctx, value)
    }

    /// The raw value an attribute of this type takes when nothing is
    /// specified and no explicit default was declared. `None` for types with
    /// no natural empty value.
    pub fn empty_raw_value(&self) -> Option<RawValue> {
        match &*self.0 {
            AttrTypeInner::Option(_) => Some(RawValue::None),
            AttrTypeInner::List(_) | AttrTypeInner::Visibility(_) => {
                Some(RawValue::List(Vec::new()))
            }
            AttrTypeInner::Dict(_) => Some(RawValue::Dict(Default::default())),
            AttrTypeInner::String(_) | AttrTypeInner::Path(_) | AttrTypeInner::Source(_) => {
                Some(RawValue::String(String::new()))
            }
            AttrTypeInner::OneOf(one_of) => one_of.xs.iter().find_map(|x| x.empty_raw_value()),
            AttrTypeInner::Bool(_)
            | AttrTypeInner::Int(_)
            | AttrTypeInner::Long(_)
            | AttrTypeInner::Float(_)
            | AttrTypeInner::Dep(_)
            | AttrTypeInner::Record(_) => None,
        }
    }
}

impl AttrTypeInner {
    fn coercer(&self) -> &dyn AttrTypeCoerce {
        match self {
            AttrTypeInner::Bool(x) => x,
            AttrTypeInner::Int(x) => x,
            AttrTypeInner::Long(x) => x,
            AttrTypeInner::Float(x) => x,
            AttrTypeInner::String(x) => x,
            AttrTypeInner::Path(x) => x,
            AttrTypeInner::Source(x) => x,
            AttrTypeInner::Dep(x) => x,
            AttrTypeInner::List(x) => x,
            AttrTypeInner::Option(x) => x,
            AttrTypeInner::OneOf(x) => x,
            AttrTypeInner::Dict(x) => x,
            AttrTypeInner::Record(x) => x,
            AttrTypeInner::Visibility(x) => x,
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            AttrTypeInner::Bool(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::Int(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::Long(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::Float(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::String(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::Path(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::Source(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::Dep(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::List(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::Option(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::OneOf(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::Dict(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::Record(x) => fmt::Display::fmt(x, f),
            AttrTypeInner::Visibility(x) => fmt::Display::fmt(x, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AttrType;
    use crate::attrs::raw::RawValue;

    #[test]
    fn display() {
        assert_eq!("list[str]", AttrType::list(AttrType::string()).to_string());
        assert_eq!(
            "list[source] | None",
            AttrType::option(AttrType::list(AttrType::source())).to_string()
        );
        assert_eq!(
            "dict[str, int | str]",
            AttrType::dict(AttrType::either(AttrType::int(), AttrType::string())).to_string()
        );
    }

    #[test]
    fn empty_raw_value() {
        assert_eq!(
            Some(RawValue::None),
            AttrType::option(AttrType::int()).empty_raw_value()
        );
        assert_eq!(
            Some(RawValue::List(Vec::new())),
            AttrType::list(AttrType::dep()).empty_raw_value()
        );
        assert_eq!(
            Some(RawValue::String(String::new())),
            AttrType::string().empty_raw_value()
        );
        assert_eq!(None, AttrType::int().empty_raw_value());
        assert_eq!(None, AttrType::dep().empty_raw_value());
        assert_eq!(
            Some(RawValue::String(String::new())),
            AttrType::either(AttrType::int(), AttrType::string()).empty_raw_value()
        );
    }
}

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
use std::fmt::Display;

use indexmap::IndexMap;
use itertools::Itertools;

/// An untyped attribute value, as produced by the build file parser before
/// any coercion has happened.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// The value is absent (`None` in a build file).
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<RawValue>),
    Dict(IndexMap<String, RawValue>),
}

impl RawValue {
    pub fn list<T: Into<RawValue>>(items: impl IntoIterator<Item = T>) -> RawValue {
        RawValue::List(items.into_iter().map(Into::into).collect())
    }

    pub fn dict<K: Into<String>, V: Into<RawValue>>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> RawValue {
        RawValue::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The name of the shape of this value, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::None => "NoneType",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::Float(_) => "float",
            RawValue::String(_) => "str",
            RawValue::List(_) => "list",
            RawValue::Dict(_) => "dict",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, RawValue::None)
    }

    pub fn unpack_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::None => write!(f, "None"),
            RawValue::Bool(true) => write!(f, "True"),
            RawValue::Bool(false) => write!(f, "False"),
            RawValue::Int(i) => write!(f, "{i}"),
            RawValue::Float(x) => write!(f, "{x:?}"),
            RawValue::String(s) => write!(f, "{s:?}"),
            RawValue::List(xs) => write!(f, "[{}]", xs.iter().join(", ")),
            RawValue::Dict(xs) => write!(
                f,
                "{{{}}}",
                xs.iter().map(|(k, v)| format!("{k:?}: {v}")).join(", ")
            ),
        }
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<i32> for RawValue {
    fn from(i: i32) -> Self {
        RawValue::Int(i.into())
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Int(i)
    }
}

impl From<f64> for RawValue {
    fn from(x: f64) -> Self {
        RawValue::Float(x)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(x: Option<T>) -> Self {
        x.map_or(RawValue::None, Into::into)
    }
}

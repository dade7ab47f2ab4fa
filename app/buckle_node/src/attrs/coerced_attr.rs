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
use std::sync::Arc;

use buckle_core::target::TargetLabel;
use itertools::Itertools;

use crate::attrs::values::AttrValues;
use crate::visibility::VisibilitySpecification;

/// A source file: either a path relative to the package, or the output of
/// another rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceRef {
    Path(Arc<str>),
    Target(TargetLabel),
}

impl Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRef::Path(p) => write!(f, "{p}"),
            SourceRef::Target(t) => write!(f, "{t}"),
        }
    }
}

/// A coerced attribute value, shaped by the type it was coerced against.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedAttr {
    None,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f64),
    String(Arc<str>),
    Path(Arc<str>),
    Source(SourceRef),
    Target(TargetLabel),
    List(Vec<CoercedAttr>),
    /// The value together with the index of the alternative that accepted it.
    OneOf(Box<CoercedAttr>, u32),
    Dict(Vec<(String, CoercedAttr)>),
    Record(AttrValues),
    Visibility(VisibilitySpecification),
}

impl CoercedAttr {
    /// Visits every target label this value depends on, in order.
    ///
    /// Visibility patterns are not dependencies and are not visited.
    pub fn traverse<'a>(&'a self, visitor: &mut dyn FnMut(&'a TargetLabel)) {
        match self {
            CoercedAttr::Target(t) => visitor(t),
            CoercedAttr::Source(SourceRef::Target(t)) => visitor(t),
            CoercedAttr::List(xs) => {
                for x in xs {
                    x.traverse(visitor);
                }
            }
            CoercedAttr::OneOf(x, _) => x.traverse(visitor),
            CoercedAttr::Dict(entries) => {
                for (_, v) in entries {
                    v.traverse(visitor);
                }
            }
            CoercedAttr::Record(values) => {
                for (_, v) in values.iter() {
                    v.traverse(visitor);
                }
            }
            CoercedAttr::None
            | CoercedAttr::Bool(_)
            | CoercedAttr::Int(_)
            | CoercedAttr::Long(_)
            | CoercedAttr::Float(_)
            | CoercedAttr::String(_)
            | CoercedAttr::Path(_)
            | CoercedAttr::Source(SourceRef::Path(_))
            | CoercedAttr::Visibility(_) => {}
        }
    }

    /// Looks through `OneOf` to the value that was actually coerced.
    pub fn unpack_one_of(&self) -> &CoercedAttr {
        match self {
            CoercedAttr::OneOf(x, _) => x.unpack_one_of(),
            x => x,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self.unpack_one_of(), CoercedAttr::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.unpack_one_of() {
            CoercedAttr::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value of an `int` or `long` attribute.
    pub fn as_i64(&self) -> Option<i64> {
        match self.unpack_one_of() {
            CoercedAttr::Int(i) => Some((*i).into()),
            CoercedAttr::Long(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.unpack_one_of() {
            CoercedAttr::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// String value of a `str` or `path` attribute.
    pub fn as_str(&self) -> Option<&str> {
        match self.unpack_one_of() {
            CoercedAttr::String(s) | CoercedAttr::Path(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[CoercedAttr]> {
        match self.unpack_one_of() {
            CoercedAttr::List(xs) => Some(xs),
            _ => None,
        }
    }

    pub fn as_target(&self) -> Option<&TargetLabel> {
        match self.unpack_one_of() {
            CoercedAttr::Target(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&AttrValues> {
        match self.unpack_one_of() {
            CoercedAttr::Record(values) => Some(values),
            _ => None,
        }
    }
}

impl Display for CoercedAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercedAttr::None => write!(f, "None"),
            CoercedAttr::Bool(true) => write!(f, "True"),
            CoercedAttr::Bool(false) => write!(f, "False"),
            CoercedAttr::Int(i) => write!(f, "{i}"),
            CoercedAttr::Long(i) => write!(f, "{i}"),
            CoercedAttr::Float(x) => write!(f, "{x:?}"),
            CoercedAttr::String(s) | CoercedAttr::Path(s) => write!(f, "{:?}", &**s),
            CoercedAttr::Source(s) => write!(f, "\"{s}\""),
            CoercedAttr::Target(t) => write!(f, "\"{t}\""),
            CoercedAttr::List(xs) => write!(f, "[{}]", xs.iter().join(", ")),
            CoercedAttr::OneOf(x, _) => write!(f, "{x}"),
            CoercedAttr::Dict(entries) => write!(
                f,
                "{{{}}}",
                entries
                    .iter()
                    .map(|(k, v)| format!("{k:?}: {v}"))
                    .join(", ")
            ),
            CoercedAttr::Record(values) => write!(f, "{values}"),
            CoercedAttr::Visibility(v) => write!(f, "{v}"),
        }
    }
}

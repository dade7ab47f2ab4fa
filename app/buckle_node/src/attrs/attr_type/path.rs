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
use crate::attrs::coerced_attr::SourceRef;
use crate::attrs::raw::RawValue;

#[derive(Debug, thiserror::Error)]
enum PathError {
    #[error("path must be relative")]
    Absolute,
    #[error("path must not contain `{0}` segments")]
    Segment(&'static str),
    #[error("path must not contain empty segments")]
    EmptySegment,
    #[error("path must not contain `\\`")]
    Backslash,
}

#[derive(Debug, Eq, PartialEq, Display)]
#[display("path")]
pub struct PathAttrType;

#[derive(Debug, Eq, PartialEq, Display)]
#[display("source")]
pub struct SourceAttrType;

/// Strips a leading `./` and trailing `/`, and turns `.` into the empty path.
fn cleanup_path(value: &str) -> &str {
    let value = value.strip_prefix("./").unwrap_or(value);
    let value = value.trim_end_matches('/');
    if value == "." { "" } else { value }
}

fn validate_relative_path(path: &str) -> Result<(), PathError> {
    if path.starts_with('/') {
        return Err(PathError::Absolute);
    }
    if path.contains('\\') {
        return Err(PathError::Backslash);
    }
    if path.is_empty() {
        return Ok(());
    }
    for segment in path.split('/') {
        match segment {
            "" => return Err(PathError::EmptySegment),
            "." => return Err(PathError::Segment(".")),
            ".." => return Err(PathError::Segment("..")),
            _ => {}
        }
    }
    Ok(())
}

fn coerce_path(ctx: &CoercionContext, value: &str) -> Result<Box<str>, CoercionError> {
    let path = cleanup_path(value);
    validate_relative_path(path).map_err(|e| {
        ctx.error(CoercionErrorKind::Malformed {
            expected: "relative path",
            value: value.to_owned(),
            reason: e.to_string(),
        })
    })?;
    Ok(path.into())
}

/// Whether `value` is written as a target label (`//pkg:name` or
/// `cell//pkg:name`) rather than as a path.
fn looks_like_label(value: &str) -> bool {
    match value.split_once("//") {
        Some((cell, _)) => cell.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
        None => false,
    }
}

impl AttrTypeCoerce for PathAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        match value {
            RawValue::String(s) => Ok(CoercedAttr::Path(coerce_path(ctx, s)?.into())),
            _ => Err(type_mismatch(ctx, self, value)),
        }
    }
}

impl AttrTypeCoerce for SourceAttrType {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError> {
        let RawValue::String(s) = value else {
            return Err(type_mismatch(ctx, self, value));
        };
        if looks_like_label(s) {
            let label = TargetLabel::parse(s).map_err(|e| {
                ctx.error(CoercionErrorKind::Malformed {
                    expected: "source label",
                    value: s.clone(),
                    reason: format!("{} (at position {})", e.reason, e.position),
                })
            })?;
            Ok(CoercedAttr::Source(SourceRef::Target(label)))
        } else {
            Ok(CoercedAttr::Source(SourceRef::Path(
                coerce_path(ctx, s)?.into(),
            )))
        }
    }
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use crate::attrs::attr_type::AttrType;
use crate::attrs::raw::RawValue;

/// One named entry of a rule schema: its type, default and documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Raw default, coerced like a user supplied value. `None` means the
    /// attribute is required.
    default: Option<RawValue>,
    doc: String,
    coercer: AttrType,
}

impl Attribute {
    pub fn required(coercer: AttrType, doc: &str) -> Self {
        Attribute {
            default: None,
            doc: doc.to_owned(),
            coercer,
        }
    }

    pub fn with_default(coercer: AttrType, default: RawValue, doc: &str) -> Self {
        Attribute {
            default: Some(default),
            doc: doc.to_owned(),
            coercer,
        }
    }

    /// An attribute that may be omitted. It defaults to the empty value of
    /// its type, or to `None` for types without one.
    pub fn optional(coercer: AttrType, doc: &str) -> Self {
        match coercer.empty_raw_value() {
            Some(default) => Self::with_default(coercer, default, doc),
            None => Self::with_default(AttrType::option(coercer), RawValue::None, doc),
        }
    }

    pub fn default(&self) -> Option<&RawValue> {
        self.default.as_ref()
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn coercer(&self) -> &AttrType {
        &self.coercer
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}
